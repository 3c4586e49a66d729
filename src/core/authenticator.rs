//! Client Authentication
//!
//! Mechanisms proving the client's identity to the token endpoint. An
//! authenticator augments the outgoing token request with credentials; a
//! flow with no authenticator identifies itself with a plain `client_id`
//! form field instead. Exactly one of the two mechanisms is in effect.

use async_trait::async_trait;
use base64::Engine;
use secrecy::{ExposeSecret, SecretString};
use url::form_urlencoded;

use crate::core::HttpRequest;
use crate::error::GrantError;

/// Client authenticator interface (for dependency injection).
#[async_trait]
pub trait ClientAuthenticator: Send + Sync {
    /// Add client credentials to the outgoing token request, or fail with
    /// a client-authentication error.
    async fn authorize(&self, request: HttpRequest) -> Result<HttpRequest, GrantError>;
}

/// HTTP Basic client authentication (RFC 6749 §2.3.1).
pub struct ClientSecretBasic {
    client_id: String,
    client_secret: SecretString,
}

impl ClientSecretBasic {
    /// Create new Basic authenticator.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: SecretString::new(client_secret.into()),
        }
    }
}

impl std::fmt::Debug for ClientSecretBasic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientSecretBasic")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .finish()
    }
}

#[async_trait]
impl ClientAuthenticator for ClientSecretBasic {
    async fn authorize(&self, mut request: HttpRequest) -> Result<HttpRequest, GrantError> {
        let credentials = format!("{}:{}", self.client_id, self.client_secret.expose_secret());
        let encoded = base64::engine::general_purpose::STANDARD.encode(credentials);
        request
            .headers
            .insert("authorization".to_string(), format!("Basic {}", encoded));
        Ok(request)
    }
}

/// Client authentication via `client_id`/`client_secret` form fields.
pub struct ClientSecretPost {
    client_id: String,
    client_secret: SecretString,
}

impl ClientSecretPost {
    /// Create new form-field authenticator.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: SecretString::new(client_secret.into()),
        }
    }
}

impl std::fmt::Debug for ClientSecretPost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientSecretPost")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .finish()
    }
}

#[async_trait]
impl ClientAuthenticator for ClientSecretPost {
    async fn authorize(&self, mut request: HttpRequest) -> Result<HttpRequest, GrantError> {
        let fields = form_urlencoded::Serializer::new(String::new())
            .append_pair("client_id", &self.client_id)
            .append_pair("client_secret", self.client_secret.expose_secret())
            .finish();

        let mut body = request.body.take().unwrap_or_default();
        if !body.is_empty() {
            body.push('&');
        }
        body.push_str(&fields);
        request.body = Some(body);
        Ok(request)
    }
}

/// Mock client authenticator for testing.
#[derive(Default)]
pub struct MockClientAuthenticator {
    request_history: std::sync::Mutex<Vec<HttpRequest>>,
    next_error: std::sync::Mutex<Option<String>>,
}

impl MockClientAuthenticator {
    /// Create new mock authenticator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the next authorize call with a client-authentication error.
    pub fn set_next_error(&self, message: impl Into<String>) -> &Self {
        *self.next_error.lock().unwrap() = Some(message.into());
        self
    }

    /// Get request history.
    pub fn get_requests(&self) -> Vec<HttpRequest> {
        self.request_history.lock().unwrap().clone()
    }
}

#[async_trait]
impl ClientAuthenticator for MockClientAuthenticator {
    async fn authorize(&self, mut request: HttpRequest) -> Result<HttpRequest, GrantError> {
        self.request_history.lock().unwrap().push(request.clone());

        if let Some(message) = self.next_error.lock().unwrap().take() {
            return Err(GrantError::ClientAuthentication { message });
        }

        request
            .headers
            .insert("authorization".to_string(), "Mock credentials".to_string());
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_basic_authenticator_adds_header() {
        let authenticator = ClientSecretBasic::new("client-1", "s3cret");
        let request = authenticator
            .authorize(HttpRequest::post_form("https://t", "grant_type=x".to_string()))
            .await
            .unwrap();

        let expected = base64::engine::general_purpose::STANDARD.encode("client-1:s3cret");
        assert_eq!(
            request.headers.get("authorization").map(String::as_str),
            Some(format!("Basic {}", expected).as_str())
        );
        // Body is untouched.
        assert_eq!(request.body.as_deref(), Some("grant_type=x"));
    }

    #[tokio::test]
    async fn test_post_authenticator_appends_fields() {
        let authenticator = ClientSecretPost::new("client-1", "s3cret");
        let request = authenticator
            .authorize(HttpRequest::post_form("https://t", "grant_type=x".to_string()))
            .await
            .unwrap();

        let body = request.body.unwrap();
        assert_eq!(body, "grant_type=x&client_id=client-1&client_secret=s3cret");
        assert!(!request.headers.contains_key("authorization"));
    }

    #[tokio::test]
    async fn test_post_authenticator_on_empty_body() {
        let authenticator = ClientSecretPost::new("client-1", "s3cret");
        let request = authenticator
            .authorize(HttpRequest::get("https://t"))
            .await
            .unwrap();
        assert_eq!(
            request.body.as_deref(),
            Some("client_id=client-1&client_secret=s3cret")
        );
    }

    #[tokio::test]
    async fn test_mock_authenticator_failure() {
        let authenticator = MockClientAuthenticator::new();
        authenticator.set_next_error("keychain item missing");

        let result = authenticator.authorize(HttpRequest::get("https://t")).await;
        assert!(matches!(
            result,
            Err(GrantError::ClientAuthentication { .. })
        ));
        assert_eq!(authenticator.get_requests().len(), 1);
    }

    #[test]
    fn test_debug_redacts_secret() {
        let rendered = format!("{:?}", ClientSecretBasic::new("client-1", "s3cret"));
        assert!(!rendered.contains("s3cret"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
