//! Tests for domain error construction and serialisation.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn base_error() -> Error {
    Error::invalid_request("status is required")
}

#[rstest]
#[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(Error::not_found("missing"), ErrorCode::NotFound)]
#[case(Error::internal("boom"), ErrorCode::InternalError)]
fn constructors_set_code(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn try_new_rejects_blank_messages() {
    let result = Error::try_new(ErrorCode::InvalidRequest, "   ");
    assert_eq!(result, Err(ErrorValidationError::EmptyMessage));
}

#[rstest]
fn try_with_trace_id_rejects_blank_values(base_error: Error) {
    let result = base_error.try_with_trace_id(" ");
    assert_eq!(result, Err(ErrorValidationError::EmptyTraceId));
}

#[rstest]
fn trace_id_is_absent_out_of_scope(base_error: Error) {
    assert!(base_error.trace_id().is_none());
}

#[tokio::test]
async fn new_captures_trace_id_in_scope() {
    let trace_id: TraceId = TRACE_ID.parse().expect("valid UUID");
    let error = TraceId::scope(trace_id, async { Error::internal("boom") }).await;
    assert_eq!(error.trace_id(), Some(TRACE_ID));
}

#[rstest]
fn equality_compares_kind_and_payload() {
    let left = Error::invalid_request("invalid status: XX").with_details(json!({"value": "XX"}));
    let same = Error::invalid_request("invalid status: XX").with_details(json!({"value": "XX"}));
    let other_value =
        Error::invalid_request("invalid status: XX").with_details(json!({"value": "YY"}));
    let other_kind = Error::internal("invalid status: XX").with_details(json!({"value": "XX"}));

    assert_eq!(left, same);
    assert_ne!(left, other_value);
    assert_ne!(left, other_kind);
}

#[rstest]
fn serialises_camel_case_and_skips_empty_fields(base_error: Error) {
    let value = serde_json::to_value(&base_error).expect("serialise error");
    assert_eq!(
        value,
        json!({"code": "invalid_request", "message": "status is required"})
    );

    let traced = base_error
        .with_trace_id(TRACE_ID)
        .with_details(json!({"field": "status"}));
    let value = serde_json::to_value(&traced).expect("serialise error");
    assert_eq!(value["traceId"], json!(TRACE_ID));
    assert_eq!(value["details"]["field"], json!("status"));
}
