//! JSON-RPC envelope handling
//!
//! The node wraps every answer in `{"jsonrpc", "id", "result" | "error"}`.
//! [`parse_envelope`] checks the HTTP status first and only then looks inside.

use bncnode_errors::{Error, Result};
use serde_json::Value;

/// Unwrap the `result` member of a node response.
///
/// 204 No Content is a success with a `Null` payload. Any other status except
/// 200 fails with the raw body text and is not parsed further.
pub fn parse_envelope(status: u16, body: &[u8]) -> Result<Value> {
    match status {
        204 => return Ok(Value::Null),
        200 => {}
        _ => {
            return Err(Error::HttpStatus {
                status,
                body: String::from_utf8_lossy(body).into_owned(),
            })
        }
    }

    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(Error::EmptyResponse);
    }

    let mut envelope: Value =
        serde_json::from_slice(body).map_err(|e| Error::MalformedPayload(e.to_string()))?;

    if let Some(error) = envelope.get("error").and_then(Value::as_object) {
        if !error.is_empty() {
            return Err(Error::Rpc {
                code: error.get("code").and_then(Value::as_i64).unwrap_or(0),
                message: error
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
            });
        }
    }

    envelope
        .get_mut("result")
        .map(Value::take)
        .ok_or(Error::MissingResult)
}
