//! Request-body field schema.
//!
//! Every endpoint describes its body as a fixed set of string fields, each
//! either required or optional and each owning the error code reported when
//! the field is absent or of the wrong type. The schema is evaluated once at
//! the HTTP boundary; handlers only ever see fully validated draft values.
//!
//! Bodies arrive as a `serde_json::Value`. Anything that is not a JSON
//! object (missing body, malformed JSON) simply has no fields, so required
//! fields report their own codes instead of a generic parse error.

use serde_json::Value;

use crate::error::{DomainError, DomainResult, ErrorCode};

/// Extract a required string field.
///
/// Fails with `on_invalid` when the field is absent, null, not a string, or
/// blank.
pub fn required_string(body: &Value, name: &str, on_invalid: ErrorCode) -> DomainResult<String> {
    match body.get(name) {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.clone()),
        _ => Err(DomainError::validation(on_invalid)),
    }
}

/// Extract an optional string field.
///
/// Absent and null both mean "not provided". A present value of any other
/// type fails with `on_invalid`.
pub fn optional_string(
    body: &Value,
    name: &str,
    on_invalid: ErrorCode,
) -> DomainResult<Option<String>> {
    match body.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(DomainError::validation(on_invalid)),
    }
}
