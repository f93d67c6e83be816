//! Frozen-schema regression tests for the response envelope.

use mcp_stt_harness::protocol::JsonRpcResponse;
use mcp_stt_harness::schema::{validate_json, RESPONSE_ENVELOPE_SCHEMA};

#[test]
fn success_envelope_satisfies_the_schema() {
    let instance = r#"{"jsonrpc":"2.0","id":1,"result":{"status":"ok"}}"#;
    validate_json(RESPONSE_ENVELOPE_SCHEMA, instance).expect("success envelope must validate");
}

#[test]
fn error_envelope_satisfies_the_schema() {
    let instance =
        r#"{"jsonrpc":"2.0","id":2,"error":{"code":-32601,"message":"unknown method"}}"#;
    validate_json(RESPONSE_ENVELOPE_SCHEMA, instance).expect("error envelope must validate");
}

#[test]
fn result_and_error_together_are_rejected() {
    let instance =
        r#"{"jsonrpc":"2.0","id":3,"result":{},"error":{"code":-32603,"message":"boom"}}"#;
    assert!(
        validate_json(RESPONSE_ENVELOPE_SCHEMA, instance).is_err(),
        "an envelope may carry result or error, never both"
    );
}

#[test]
fn envelope_without_id_is_rejected() {
    let instance = r#"{"jsonrpc":"2.0","result":{}}"#;
    assert!(validate_json(RESPONSE_ENVELOPE_SCHEMA, instance).is_err());
}

#[test]
fn parsed_response_reserializes_to_a_valid_envelope() {
    let raw = r#"{"jsonrpc":"2.0","id":9,"result":{"content":[],"isError":false}}"#;
    let resp: JsonRpcResponse = serde_json::from_str(raw).unwrap();

    let reserialized = serde_json::to_string(&resp).unwrap();
    validate_json(RESPONSE_ENVELOPE_SCHEMA, &reserialized)
        .expect("round-tripped envelope must still validate");
}
