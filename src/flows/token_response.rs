//! Access-Token Response Handling
//!
//! Maps the outcome of one token-endpoint exchange into a typed token or
//! a typed error. Pure; no side effects.

use serde_json::Value;

use crate::core::HttpResponse;
use crate::error::{ErrorResponse, GrantError};
use crate::types::AccessTokenResponse;

/// Handle a completed token-endpoint exchange.
///
/// Checks run in contract order: a transport failure surfaces verbatim
/// without touching the body; a recognized OAuth2 error body wins over
/// the status code (servers return error bodies on 2xx and non-2xx
/// alike); a non-2xx status without an error body is an unexpected
/// status; a 2xx body that is not a JSON object is malformed; a 2xx
/// object missing `access_token` or `token_type` is unparseable.
pub fn handle_token_response(
    outcome: Result<HttpResponse, GrantError>,
) -> Result<AccessTokenResponse, GrantError> {
    let response = outcome?;

    let object = match serde_json::from_str::<Value>(&response.body) {
        Ok(Value::Object(object)) => Some(object),
        _ => None,
    };

    if let Some(object) = &object {
        if let Some(error) = ErrorResponse::from_json(object) {
            tracing::warn!(code = %error.code, "token endpoint returned a protocol error");
            return Err(error.into());
        }
    }

    if !(200..300).contains(&response.status) {
        return Err(GrantError::UnexpectedStatus {
            status: response.status,
        });
    }

    let object = object.ok_or_else(|| GrantError::MalformedResponse {
        message: "token endpoint body is not a JSON object".to_string(),
    })?;

    serde_json::from_value(Value::Object(object)).map_err(|e| GrantError::UnparseableToken {
        message: e.to_string(),
    })
}
