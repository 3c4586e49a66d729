//! Configuration Types
//!
//! Grant flow configuration.

use base64::Engine;
use rand::Rng;
use serde::{Deserialize, Serialize};
use url::Url;

/// Immutable configuration for one authorization code grant flow.
///
/// Created once at flow construction and never modified afterwards; every
/// attempt reads from the same value. Collaborators (transport, user
/// agent, client authenticator) are injected at flow construction, not
/// carried here.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GrantConfiguration {
    /// Authorization endpoint URL.
    pub authorization_endpoint: Url,
    /// Token endpoint URL.
    pub token_endpoint: Url,
    /// Client identifier.
    pub client_id: String,
    /// Registered redirect URI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_uri: Option<Url>,
    /// Scopes to request.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scopes: Vec<String>,
    /// Anti-CSRF state. Opaque; compared only by equality against the
    /// state echoed in the redirect.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

impl GrantConfiguration {
    /// Render scopes as the single space-delimited `scope` value.
    pub fn scope_value(&self) -> Option<String> {
        if self.scopes.is_empty() {
            None
        } else {
            Some(self.scopes.join(" "))
        }
    }
}

/// Generate a random state value (32 bytes, URL-safe base64).
pub fn random_state() -> String {
    let mut rng = rand::thread_rng();
    let bytes: [u8; 32] = rng.gen();
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}
