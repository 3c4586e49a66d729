//! Token Types
//!
//! Request and response types for the token exchange step.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use url::form_urlencoded;
use url::Url;

/// The only grant type this engine exchanges.
pub const GRANT_TYPE_AUTHORIZATION_CODE: &str = "authorization_code";

/// Token request, built once per attempt and discarded after transmission.
///
/// `client_id` is populated only when no client authenticator is
/// configured; the two client-identification mechanisms are mutually
/// exclusive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessTokenRequest {
    /// Authorization code received in the redirect.
    pub code: String,
    /// Redirect URI; must match the one used in the authorization step.
    pub redirect_uri: Option<Url>,
    /// Plain client identifier for unauthenticated clients.
    pub client_id: Option<String>,
}

impl AccessTokenRequest {
    /// Serialize to a form-urlencoded POST body.
    pub fn to_body(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        serializer.append_pair("grant_type", GRANT_TYPE_AUTHORIZATION_CODE);
        serializer.append_pair("code", &self.code);
        if let Some(redirect_uri) = &self.redirect_uri {
            serializer.append_pair("redirect_uri", redirect_uri.as_str());
        }
        if let Some(client_id) = &self.client_id {
            serializer.append_pair("client_id", client_id);
        }
        serializer.finish()
    }
}

/// Successful token response per RFC 6749 §5.1.
///
/// `access_token` and `token_type` are required; a body without both is
/// not a token response. Ownership passes to the caller; nothing here is
/// persisted by the flow.
#[derive(Clone, Deserialize)]
pub struct AccessTokenResponse {
    /// Access token.
    pub access_token: String,
    /// Token type (usually "Bearer").
    pub token_type: String,
    /// Lifetime in seconds.
    #[serde(default)]
    pub expires_in: Option<u64>,
    /// Refresh token.
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Granted scopes (space-delimited).
    #[serde(default)]
    pub scope: Option<String>,
    /// Additional fields.
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl AccessTokenResponse {
    /// Expiry instant, measured from now.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_in
            .map(|secs| Utc::now() + Duration::seconds(secs as i64))
    }

    /// Granted scopes split on whitespace.
    pub fn scopes(&self) -> Vec<String> {
        self.scope
            .as_deref()
            .map(|s| s.split_whitespace().map(String::from).collect())
            .unwrap_or_default()
    }

    /// Format as an Authorization header value.
    pub fn authorization_header(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }
}

impl std::fmt::Debug for AccessTokenResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessTokenResponse")
            .field("access_token", &"[REDACTED]")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .field(
                "refresh_token",
                &self.refresh_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("scope", &self.scope)
            .finish()
    }
}
