//! Tests for HTTP error mapping.

use super::*;
use actix_web::body::to_bytes;
use actix_web::test::TestRequest;
use actix_web::{App, HttpResponse, test as actix_test, web};
use rstest::{fixture, rstest};
use rstest_bdd_macros::{given, then, when};
use serde::Deserialize;
use serde_json::{Value, json};

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[fixture]
fn internal_error_case(expected_trace_id: String) -> Error {
    Error::internal("connection reset by peer")
        .with_trace_id(expected_trace_id)
        .with_details(json!({ "sql": "SELECT 1" }))
}

#[fixture]
fn not_found_case(expected_trace_id: String) -> Error {
    Error::not_found("user 9 not found")
        .with_trace_id(expected_trace_id)
        .with_details(json!({ "id": 9 }))
}

#[rstest]
#[case(ErrorCode::InvalidRequest, StatusCode::BAD_REQUEST)]
#[case(ErrorCode::NotFound, StatusCode::NOT_FOUND)]
#[case(ErrorCode::InternalError, StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] code: ErrorCode, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&Error::new(code, "x")), status);
}

async fn assert_error_response(
    error: Error,
    expected_status: StatusCode,
    expected_trace_id: Option<&str>,
) -> Error {
    let response = ResponseError::error_response(&error);
    assert_eq!(response.status(), expected_status);

    let header = response.headers().get(TRACE_ID_HEADER);
    match expected_trace_id {
        Some(expected) => {
            let trace_id = header
                .expect("trace-id header is set by error_response")
                .to_str()
                .expect("trace-id is valid UTF-8");
            assert_eq!(trace_id, expected);
        }
        None => assert!(header.is_none(), "trace-id header should not be present"),
    }

    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");

    serde_json::from_slice(&bytes).expect("Error JSON deserialisation succeeds")
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted(internal_error_case: Error, expected_trace_id: String) {
    let redacted = assert_error_response(
        internal_error_case,
        StatusCode::INTERNAL_SERVER_ERROR,
        Some(expected_trace_id.as_str()),
    )
    .await;
    assert_eq!(redacted.code(), ErrorCode::InternalError);
    assert_eq!(redacted.message(), "Internal server error");
    assert_eq!(redacted.trace_id(), Some(expected_trace_id.as_str()));
    assert!(redacted.details().is_none());
}

#[rstest]
#[actix_web::test]
async fn client_errors_keep_their_payload(not_found_case: Error, expected_trace_id: String) {
    let payload = assert_error_response(
        not_found_case,
        StatusCode::NOT_FOUND,
        Some(expected_trace_id.as_str()),
    )
    .await;
    assert_eq!(payload.code(), ErrorCode::NotFound);
    assert_eq!(payload.message(), "user 9 not found");
    assert_eq!(payload.details(), Some(&json!({ "id": 9 })));
}

#[rstest]
#[actix_web::test]
async fn error_without_trace_id_omits_trace_header() {
    let error = Error::invalid_request("bad").with_details(json!({ "field": "name" }));

    let payload = assert_error_response(error, StatusCode::BAD_REQUEST, None).await;
    assert_eq!(payload.trace_id(), None);
    assert_eq!(payload.details(), Some(&json!({ "field": "name" })));
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct Payload {
    name: String,
}

async fn accept_payload(body: web::Json<Payload>) -> HttpResponse {
    HttpResponse::Ok().body(body.into_inner().name)
}

#[rstest]
#[case(r#"{"name":"#, "invalid_json")]
#[case(r#"{"name":"Ada","admin":true}"#, "invalid_json")]
#[case(r#"{}"#, "invalid_json")]
#[actix_web::test]
async fn json_extractor_failures_use_the_error_body(#[case] body: &str, #[case] code: &str) {
    let app = actix_test::init_service(
        App::new()
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .route("/payload", web::post().to(accept_payload)),
    )
    .await;

    let request = TestRequest::post()
        .uri("/payload")
        .insert_header(("content-type", "application/json"))
        .set_payload(body.to_owned())
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let value: Value = actix_test::read_body_json(response).await;
    assert_eq!(value["code"], "invalid_request");
    assert_eq!(value["details"]["code"], code);
}

#[rstest]
#[actix_web::test]
async fn wrong_content_type_is_rejected() {
    let app = actix_test::init_service(
        App::new()
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .route("/payload", web::post().to(accept_payload)),
    )
    .await;

    let request = TestRequest::post()
        .uri("/payload")
        .insert_header(("content-type", "text/plain"))
        .set_payload(r#"{"name":"Ada"}"#)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let value: Value = actix_test::read_body_json(response).await;
    assert_eq!(value["details"]["code"], "unsupported_content_type");
}

#[given("a store failure surfaced as an internal error")]
fn a_store_failure_surfaced_as_an_internal_error() -> Error {
    Error::internal("relation \"users\" does not exist").with_trace_id(TRACE_ID)
}

#[when("the adapter redacts the client payload")]
fn the_adapter_redacts_the_client_payload(error: Error) -> Error {
    super::redact_if_internal(&error)
}

#[then("clients see only the generic message and the trace id")]
fn clients_see_only_the_generic_message_and_the_trace_id(redacted: Error) {
    assert_eq!(redacted.message(), "Internal server error");
    assert_eq!(redacted.trace_id(), Some(TRACE_ID));
}

#[rstest]
fn redaction_hides_backend_text() {
    let error = a_store_failure_surfaced_as_an_internal_error();
    let redacted = the_adapter_redacts_the_client_payload(error);
    clients_see_only_the_generic_message_and_the_trace_id(redacted);
}

#[test]
fn from_actix_error_is_redacted_internal_error() {
    let err: Error = actix_web::error::ErrorBadRequest("boom").into();

    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), "Internal server error");
    assert_eq!(err.trace_id(), None);
}
