//! Tests for HTTP error mapping.

use super::*;
use actix_web::body::to_bytes;
use rstest::rstest;
use serde_json::{Value, json};

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

async fn body_of(error: &Error) -> Value {
    let response = ResponseError::error_response(error);
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    serde_json::from_slice(&bytes).expect("error body is JSON")
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::conflict("taken"), StatusCode::CONFLICT)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] error: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), status);
}

#[rstest]
#[actix_web::test]
async fn body_carries_only_the_message() {
    let error = Error::validation(["Username is required"]);

    assert_eq!(
        body_of(&error).await,
        json!({"message": "Validation failed: Username is required"})
    );
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted() {
    let error = Error::internal("todo task repository query failed: database error");

    assert_eq!(
        body_of(&error).await,
        json!({"message": INTERNAL_ERROR_MESSAGE})
    );
}

#[rstest]
fn trace_id_is_echoed_in_header() {
    let error = Error::not_found("User with ID u1 not found").with_trace_id(TRACE_ID);

    let response = ResponseError::error_response(&error);

    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .expect("trace-id header is set")
        .to_str()
        .expect("trace-id header is ASCII");
    assert_eq!(header, TRACE_ID);
}

#[rstest]
fn trace_header_is_absent_outside_a_request() {
    let response = ResponseError::error_response(&Error::conflict("taken"));

    assert!(response.headers().get(TRACE_ID_HEADER).is_none());
}

#[rstest]
fn actix_errors_become_internal() {
    let actix = actix_web::error::ErrorBadGateway("upstream");

    assert_eq!(Error::from(actix).code(), ErrorCode::InternalError);
}
