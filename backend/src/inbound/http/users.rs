//! Users API handlers.
//!
//! ```text
//! GET    /api/v1/users
//! GET    /api/v1/users/{id}
//! POST   /api/v1/users        {"name":"Ada","email":"ada@example.com"}
//! PUT    /api/v1/users/{id}   {"name":"Ada L","email":"ada@example.com"}
//! DELETE /api/v1/users/{id}
//! ```
//!
//! Inputs are validated before the store is called. Store outcomes map to
//! `404` for a missing user and `500` for everything else.

use actix_web::http::header;
use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;
use utoipa::ToSchema;

use crate::domain::ports::UserPersistenceError;
use crate::domain::{Error, User, UserRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, UserSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{USER_ID, parse_user_id, user_validation_error};

/// Public path of the users collection, used for `Location` headers.
pub const USERS_PATH: &str = "/api/v1/users";

/// Request body for `POST /api/v1/users` and `PUT /api/v1/users/{id}`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(deny_unknown_fields)]
#[schema(as = UserRequest)]
pub struct UserRequestBody {
    #[schema(example = "Ada Lovelace", max_length = 255)]
    pub name: String,
    #[schema(example = "ada@example.com", max_length = 255)]
    pub email: String,
}

impl TryFrom<UserRequestBody> for UserRequest {
    type Error = Error;

    fn try_from(value: UserRequestBody) -> Result<Self, Self::Error> {
        UserRequest::try_from_strings(value.name, value.email)
            .map_err(|err| user_validation_error(&err))
    }
}

fn map_persistence_error(err: UserPersistenceError) -> Error {
    match err {
        UserPersistenceError::NotFound { id } => Error::not_found(format!("user {id} not found"))
            .with_details(json!({ "id": id.as_i64() })),
        other => {
            error!(error = %other, "user store call failed");
            Error::internal(other.to_string())
        }
    }
}

/// Register the users endpoints on a scope or app.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use users_backend::inbound::http::users;
///
/// let app = App::new().service(web::scope("/api/v1").configure(users::configure));
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_users)
        .service(get_user)
        .service(create_user)
        .service(update_user)
        .service(delete_user);
}

/// List all users ordered by identifier.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    responses(
        (status = 200, description = "Users ordered by ascending id", body = [UserSchema]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<User>>> {
    let ctx = state.request_context();
    let users = state
        .users
        .list(&ctx)
        .await
        .map_err(map_persistence_error)?;
    Ok(web::Json(users))
}

/// Fetch one user.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = i64, Path, description = "User identifier", minimum = 1)),
    responses(
        (status = 200, description = "The user", body = UserSchema),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 404, description = "No such user", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<User>> {
    let id = parse_user_id(&path, USER_ID)?;
    let ctx = state.request_context();
    let user = state
        .users
        .get(&ctx, id)
        .await
        .map_err(map_persistence_error)?;
    Ok(web::Json(user))
}

/// Create a user. Responds `201` with a `Location` header.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = UserRequestBody,
    responses(
        (
            status = 201,
            description = "User created",
            body = UserSchema,
            headers(("Location" = String, description = "URL of the new user"))
        ),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<UserRequestBody>,
) -> ApiResult<HttpResponse> {
    let request = UserRequest::try_from(payload.into_inner())?;
    let ctx = state.request_context();
    let user = state
        .users
        .create(&ctx, &request)
        .await
        .map_err(map_persistence_error)?;
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("{USERS_PATH}/{}", user.id())))
        .json(user))
}

/// Replace a user's name and email.
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    params(("id" = i64, Path, description = "User identifier", minimum = 1)),
    request_body = UserRequestBody,
    responses(
        (status = 200, description = "Updated user", body = UserSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "No such user", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UserRequestBody>,
) -> ApiResult<web::Json<User>> {
    let id = parse_user_id(&path, USER_ID)?;
    let request = UserRequest::try_from(payload.into_inner())?;
    let ctx = state.request_context();
    let user = state
        .users
        .update(&ctx, id, &request)
        .await
        .map_err(map_persistence_error)?;
    Ok(web::Json(user))
}

/// Delete a user. Responds `204` with an empty body.
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    params(("id" = i64, Path, description = "User identifier", minimum = 1)),
    responses(
        (status = 204, description = "User deleted"),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 404, description = "No such user", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_user_id(&path, USER_ID)?;
    let ctx = state.request_context();
    state
        .users
        .delete(&ctx, id)
        .await
        .map_err(map_persistence_error)?;
    Ok(HttpResponse::NoContent().finish())
}
