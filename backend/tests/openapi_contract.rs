//! Contract tests for the generated OpenAPI document.
//!
//! The document is inspected as JSON so the assertions read like the
//! published contract consumers see.

use rstest::{fixture, rstest};
use serde_json::Value;
use users_backend::ApiDoc;
use utoipa::OpenApi;

#[fixture]
fn document() -> Value {
    serde_json::to_value(ApiDoc::openapi()).expect("OpenAPI document serialises")
}

fn operation<'a>(document: &'a Value, path: &str, method: &str) -> &'a Value {
    document
        .get("paths")
        .and_then(|paths| paths.get(path))
        .and_then(|item| item.get(method))
        .unwrap_or_else(|| panic!("missing operation {method} {path}"))
}

fn response_schema_ref(operation: &Value, status: &str) -> Option<String> {
    let schema = operation
        .get("responses")?
        .get(status)?
        .get("content")?
        .get("application/json")?
        .get("schema")?;
    let reference = schema
        .get("$ref")
        .or_else(|| schema.get("items").and_then(|items| items.get("$ref")))?;
    reference.as_str().map(str::to_owned)
}

#[rstest]
#[case("/api/v1/users", "get", "listUsers")]
#[case("/api/v1/users", "post", "createUser")]
#[case("/api/v1/users/{id}", "get", "getUser")]
#[case("/api/v1/users/{id}", "put", "updateUser")]
#[case("/api/v1/users/{id}", "delete", "deleteUser")]
fn users_operations_are_published(
    document: Value,
    #[case] path: &str,
    #[case] method: &str,
    #[case] operation_id: &str,
) {
    let op = operation(&document, path, method);
    assert_eq!(op["operationId"], operation_id);
    assert!(
        op["tags"]
            .as_array()
            .is_some_and(|tags| tags.iter().any(|tag| tag == "users")),
        "{operation_id} should be tagged users"
    );
}

#[rstest]
#[case("/api/v1/users", "get", "200")]
#[case("/api/v1/users", "post", "201")]
#[case("/api/v1/users/{id}", "get", "200")]
#[case("/api/v1/users/{id}", "put", "200")]
fn success_bodies_reference_the_user_schema(
    document: Value,
    #[case] path: &str,
    #[case] method: &str,
    #[case] status: &str,
) {
    let op = operation(&document, path, method);
    assert_eq!(
        response_schema_ref(op, status).as_deref(),
        Some("#/components/schemas/User")
    );
}

#[rstest]
#[case("/api/v1/users/{id}", "get", "404")]
#[case("/api/v1/users/{id}", "put", "400")]
#[case("/api/v1/users/{id}", "delete", "404")]
#[case("/api/v1/users", "post", "500")]
fn failures_reference_the_error_schema(
    document: Value,
    #[case] path: &str,
    #[case] method: &str,
    #[case] status: &str,
) {
    let op = operation(&document, path, method);
    assert_eq!(
        response_schema_ref(op, status).as_deref(),
        Some("#/components/schemas/Error")
    );
}

#[rstest]
fn create_documents_the_location_header(document: Value) {
    let op = operation(&document, "/api/v1/users", "post");
    assert!(op["responses"]["201"]["headers"].get("Location").is_some());
}

#[rstest]
fn delete_has_an_empty_204(document: Value) {
    let op = operation(&document, "/api/v1/users/{id}", "delete");
    let no_content = &op["responses"]["204"];
    assert!(no_content.is_object());
    assert!(no_content.get("content").is_none());
}

#[rstest]
#[case("/health/ready")]
#[case("/health/live")]
fn health_checks_are_published(document: Value, #[case] path: &str) {
    let op = operation(&document, path, "get");
    assert!(op["responses"].get("200").is_some());
    assert!(op["responses"].get("503").is_some());
}

#[rstest]
fn user_schema_is_camel_case(document: Value) {
    let properties = &document["components"]["schemas"]["User"]["properties"];
    for field in ["id", "name", "email", "createdAt", "updatedAt"] {
        assert!(properties.get(field).is_some(), "User should expose {field}");
    }
    assert!(properties.get("created_at").is_none());
}
