//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] generates the OpenAPI document for the REST API. It registers:
//!
//! - **Paths**: the five users endpoints and both health checks
//! - **Schemas**: domain type wrappers ([`ErrorSchema`], [`ErrorCodeSchema`],
//!   [`UserSchema`]) that describe domain types without coupling them to
//!   utoipa, plus the [`UserRequestBody`] payload
//!
//! The document is served by Swagger UI in debug builds and printed by
//! `cargo run --bin openapi-dump`.

use utoipa::OpenApi;

use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema, UserSchema};
use crate::inbound::http::users::UserRequestBody;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Users backend API",
        description = "CRUD over the user resource, plus health checks.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(UserSchema, UserRequestBody, ErrorSchema, ErrorCodeSchema)),
    tags(
        (name = "users", description = "Create, read, update and delete users"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
