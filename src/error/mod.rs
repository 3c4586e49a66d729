//! OAuth2 Error Types
//!
//! Error hierarchy for the authorization code grant, plus recognition of
//! RFC 6749 error responses.

use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

/// Root error type for the grant flow.
///
/// Every failure of a running attempt is one of these kinds and is
/// delivered exactly once; nothing is retried internally.
#[derive(Error, Debug)]
pub enum GrantError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Authorization server error: {0}")]
    Protocol(ErrorResponse),

    #[error("Malformed response body: {message}")]
    MalformedResponse { message: String },

    #[error("Unexpected HTTP status {status}")]
    UnexpectedStatus { status: u16 },

    #[error("Unparseable access token response: {message}")]
    UnparseableToken { message: String },

    #[error("Invalid authorization response: {message}")]
    InvalidAuthorizationResponse { message: String },

    #[error("State parameter mismatch (possible CSRF attack)")]
    StateMismatch,

    #[error("Client authentication failed: {message}")]
    ClientAuthentication { message: String },

    #[error("Flow was discarded before the attempt completed")]
    FlowDiscarded,
}

impl GrantError {
    /// Get error code for telemetry.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "OAUTH2_CONFIG",
            Self::Network(_) => "OAUTH2_NETWORK",
            Self::Protocol(_) => "OAUTH2_PROTOCOL",
            Self::MalformedResponse { .. } => "OAUTH2_MALFORMED",
            Self::UnexpectedStatus { .. } => "OAUTH2_STATUS",
            Self::UnparseableToken { .. } => "OAUTH2_TOKEN_PARSE",
            Self::InvalidAuthorizationResponse { .. } => "OAUTH2_AUTH_RESPONSE",
            Self::StateMismatch => "OAUTH2_STATE",
            Self::ClientAuthentication { .. } => "OAUTH2_CLIENT_AUTH",
            Self::FlowDiscarded => "OAUTH2_DISCARDED",
        }
    }

    /// Check if a fresh attempt could plausibly succeed.
    ///
    /// The flow never retries on its own; this is a hint for callers.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(e) => e.is_retryable(),
            Self::Protocol(response) => matches!(
                response.code,
                ErrorCode::ServerError | ErrorCode::TemporarilyUnavailable
            ),
            Self::UnexpectedStatus { status } => (500..600).contains(status),
            _ => false,
        }
    }
}

/// Configuration error raised at construction time, never by a running
/// attempt.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Missing required field: {field}")]
    MissingRequired { field: String },

    #[error("Invalid endpoint URL: {url}")]
    InvalidEndpoint { url: String },
}

/// Network/transport error, surfaced verbatim from the transport.
#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("Connection failed: {message}")]
    ConnectionFailed { message: String },

    #[error("Request timeout after {timeout:?}")]
    Timeout { timeout: Duration },

    #[error("TLS error: {message}")]
    TlsError { message: String },
}

impl NetworkError {
    /// Check if error is retryable.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::TlsError { .. })
    }
}

/// Result type for grant flow operations.
pub type GrantResult<T> = Result<T, GrantError>;

/// Error code vocabulary of RFC 6749 §4.1.2.1 and §5.2.
///
/// Codes outside the vocabulary are carried in `Unrecognized` rather than
/// dropped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorCode {
    InvalidRequest,
    InvalidClient,
    InvalidGrant,
    UnauthorizedClient,
    UnsupportedGrantType,
    UnsupportedResponseType,
    InvalidScope,
    AccessDenied,
    ServerError,
    TemporarilyUnavailable,
    Unrecognized(String),
}

impl ErrorCode {
    /// Map a wire code to the vocabulary.
    pub fn from_wire(code: &str) -> Self {
        match code {
            "invalid_request" => Self::InvalidRequest,
            "invalid_client" => Self::InvalidClient,
            "invalid_grant" => Self::InvalidGrant,
            "unauthorized_client" => Self::UnauthorizedClient,
            "unsupported_grant_type" => Self::UnsupportedGrantType,
            "unsupported_response_type" => Self::UnsupportedResponseType,
            "invalid_scope" => Self::InvalidScope,
            "access_denied" => Self::AccessDenied,
            "server_error" => Self::ServerError,
            "temporarily_unavailable" => Self::TemporarilyUnavailable,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    /// The wire form of the code.
    pub fn as_str(&self) -> &str {
        match self {
            Self::InvalidRequest => "invalid_request",
            Self::InvalidClient => "invalid_client",
            Self::InvalidGrant => "invalid_grant",
            Self::UnauthorizedClient => "unauthorized_client",
            Self::UnsupportedGrantType => "unsupported_grant_type",
            Self::UnsupportedResponseType => "unsupported_response_type",
            Self::InvalidScope => "invalid_scope",
            Self::AccessDenied => "access_denied",
            Self::ServerError => "server_error",
            Self::TemporarilyUnavailable => "temporarily_unavailable",
            Self::Unrecognized(code) => code,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// OAuth2 error response from the authorization or token endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorResponse {
    /// Error code.
    pub code: ErrorCode,
    /// Human-readable description.
    pub description: Option<String>,
    /// URI with further information.
    pub uri: Option<String>,
    /// Echoed state parameter (redirect responses only).
    pub state: Option<String>,
}

impl ErrorResponse {
    /// Recognize an error response in a flat parameter map.
    ///
    /// Returns `Some` if and only if an `error` key is present. Invoked on
    /// every redirect and on every token endpoint body; when both an error
    /// code and success fields appear in one payload, the error wins.
    pub fn from_params(params: &HashMap<String, String>) -> Option<Self> {
        let code = ErrorCode::from_wire(params.get("error")?);
        Some(Self {
            code,
            description: params.get("error_description").cloned(),
            uri: params.get("error_uri").cloned(),
            state: params.get("state").cloned(),
        })
    }

    /// Recognize an error response in a parsed JSON object.
    ///
    /// Only string-valued members participate; a non-string `error` member
    /// is not a protocol error.
    pub fn from_json(object: &serde_json::Map<String, serde_json::Value>) -> Option<Self> {
        let params: HashMap<String, String> = object
            .iter()
            .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
            .collect();
        Self::from_params(&params)
    }
}

impl std::fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code)?;
        if let Some(description) = &self.description {
            write!(f, ": {}", description)?;
        }
        if let Some(uri) = &self.uri {
            write!(f, " (see {})", uri)?;
        }
        Ok(())
    }
}

impl From<ErrorResponse> for GrantError {
    fn from(response: ErrorResponse) -> Self {
        Self::Protocol(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_error_code_round_trip() {
        for code in [
            "invalid_request",
            "invalid_client",
            "invalid_grant",
            "unauthorized_client",
            "unsupported_grant_type",
            "unsupported_response_type",
            "invalid_scope",
            "access_denied",
            "server_error",
            "temporarily_unavailable",
        ] {
            assert_eq!(ErrorCode::from_wire(code).as_str(), code);
        }
    }

    #[test]
    fn test_unrecognized_code_is_carried() {
        let code = ErrorCode::from_wire("vendor_specific_failure");
        assert_eq!(
            code,
            ErrorCode::Unrecognized("vendor_specific_failure".to_string())
        );
        assert_eq!(code.as_str(), "vendor_specific_failure");
    }

    #[test]
    fn test_recognize_error_params() {
        let response = ErrorResponse::from_params(&params(&[
            ("error", "access_denied"),
            ("error_description", "User denied"),
            ("state", "xyz"),
        ]))
        .unwrap();

        assert_eq!(response.code, ErrorCode::AccessDenied);
        assert_eq!(response.description, Some("User denied".to_string()));
        assert!(response.uri.is_none());
        assert_eq!(response.state, Some("xyz".to_string()));
    }

    #[test]
    fn test_absent_error_key_is_not_recognized() {
        assert!(ErrorResponse::from_params(&params(&[("code", "abc")])).is_none());
        assert!(ErrorResponse::from_params(&HashMap::new()).is_none());
    }

    #[test]
    fn test_recognition_is_idempotent() {
        let set = params(&[("error", "invalid_grant"), ("error_uri", "https://e/doc")]);
        assert_eq!(
            ErrorResponse::from_params(&set),
            ErrorResponse::from_params(&set)
        );
    }

    #[test]
    fn test_error_wins_over_success_fields() {
        let object = serde_json::json!({
            "access_token": "abc",
            "token_type": "bearer",
            "error": "invalid_client"
        });
        let response = ErrorResponse::from_json(object.as_object().unwrap()).unwrap();
        assert_eq!(response.code, ErrorCode::InvalidClient);
    }

    #[test]
    fn test_non_string_error_member_ignored() {
        let object = serde_json::json!({ "error": 42 });
        assert!(ErrorResponse::from_json(object.as_object().unwrap()).is_none());
    }

    #[test]
    fn test_is_retryable() {
        let unavailable = GrantError::Protocol(ErrorResponse {
            code: ErrorCode::TemporarilyUnavailable,
            description: None,
            uri: None,
            state: None,
        });
        assert!(unavailable.is_retryable());
        assert!(GrantError::UnexpectedStatus { status: 503 }.is_retryable());
        assert!(!GrantError::UnexpectedStatus { status: 404 }.is_retryable());
        assert!(!GrantError::StateMismatch.is_retryable());
    }

    #[test]
    fn test_error_codes_for_telemetry() {
        assert_eq!(GrantError::StateMismatch.error_code(), "OAUTH2_STATE");
        assert_eq!(GrantError::FlowDiscarded.error_code(), "OAUTH2_DISCARDED");
    }
}
