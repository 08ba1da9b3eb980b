use axum::body::Bytes;
use serde_json::Value;

/// Parse a request body as JSON, degrading to `Value::Null` when the body
/// is absent or not valid JSON.
///
/// The field schema then reports its own "missing field" code instead of a
/// generic parse failure, which is the shape clients match on.
pub fn lenient_json(body: &Bytes) -> Value {
    serde_json::from_slice(body).unwrap_or(Value::Null)
}
