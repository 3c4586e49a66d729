//! Configuration Builder
//!
//! Fluent builder for grant flow configuration.

use url::Url;

use crate::error::{ConfigurationError, GrantError};
use crate::types::{random_state, GrantConfiguration};

/// Grant configuration builder.
#[derive(Default)]
pub struct GrantConfigurationBuilder {
    authorization_endpoint: Option<String>,
    token_endpoint: Option<String>,
    client_id: Option<String>,
    redirect_uri: Option<String>,
    scopes: Vec<String>,
    state: Option<String>,
}

impl GrantConfigurationBuilder {
    /// Create new configuration builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set authorization endpoint.
    pub fn authorization_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.authorization_endpoint = Some(endpoint.into());
        self
    }

    /// Set token endpoint.
    pub fn token_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.token_endpoint = Some(endpoint.into());
        self
    }

    /// Set client ID.
    pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    /// Set redirect URI.
    pub fn redirect_uri(mut self, redirect_uri: impl Into<String>) -> Self {
        self.redirect_uri = Some(redirect_uri.into());
        self
    }

    /// Set scopes.
    pub fn scopes(mut self, scopes: Vec<String>) -> Self {
        self.scopes = scopes;
        self
    }

    /// Add a scope.
    pub fn add_scope(mut self, scope: impl Into<String>) -> Self {
        self.scopes.push(scope.into());
        self
    }

    /// Set the anti-CSRF state.
    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    /// Mint a random anti-CSRF state.
    pub fn generate_state(mut self) -> Self {
        self.state = Some(random_state());
        self
    }

    /// Build the grant configuration.
    pub fn build(self) -> Result<GrantConfiguration, GrantError> {
        let authorization_endpoint = parse_endpoint(
            self.authorization_endpoint,
            "authorization_endpoint",
        )?;
        let token_endpoint = parse_endpoint(self.token_endpoint, "token_endpoint")?;

        let client_id = self.client_id.ok_or_else(|| {
            GrantError::Configuration(ConfigurationError::MissingRequired {
                field: "client_id".to_string(),
            })
        })?;

        let redirect_uri = self
            .redirect_uri
            .map(|raw| {
                Url::parse(&raw).map_err(|_| {
                    GrantError::Configuration(ConfigurationError::InvalidEndpoint { url: raw })
                })
            })
            .transpose()?;

        Ok(GrantConfiguration {
            authorization_endpoint,
            token_endpoint,
            client_id,
            redirect_uri,
            scopes: self.scopes,
            state: self.state,
        })
    }
}

fn parse_endpoint(endpoint: Option<String>, field: &str) -> Result<Url, GrantError> {
    let raw = endpoint.ok_or_else(|| {
        GrantError::Configuration(ConfigurationError::MissingRequired {
            field: field.to_string(),
        })
    })?;
    Url::parse(&raw)
        .map_err(|_| GrantError::Configuration(ConfigurationError::InvalidEndpoint { url: raw }))
}

/// Create a new grant configuration builder.
pub fn grant_config() -> GrantConfigurationBuilder {
    GrantConfigurationBuilder::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_success() {
        let config = grant_config()
            .authorization_endpoint("https://provider.example/authorize")
            .token_endpoint("https://provider.example/token")
            .client_id("client-1")
            .redirect_uri("https://app.example/cb")
            .add_scope("openid")
            .add_scope("profile")
            .state("xyz")
            .build()
            .unwrap();

        assert_eq!(config.client_id, "client-1");
        assert_eq!(config.scopes, vec!["openid", "profile"]);
        assert_eq!(config.state, Some("xyz".to_string()));
        assert_eq!(
            config.redirect_uri.unwrap().as_str(),
            "https://app.example/cb"
        );
    }

    #[test]
    fn test_builder_missing_client_id() {
        let result = grant_config()
            .authorization_endpoint("https://provider.example/authorize")
            .token_endpoint("https://provider.example/token")
            .build();
        assert!(matches!(result, Err(GrantError::Configuration(_))));
    }

    #[test]
    fn test_builder_invalid_endpoint() {
        let result = grant_config()
            .authorization_endpoint("not a url")
            .token_endpoint("https://provider.example/token")
            .client_id("client-1")
            .build();
        assert!(matches!(
            result,
            Err(GrantError::Configuration(ConfigurationError::InvalidEndpoint { .. }))
        ));
    }

    #[test]
    fn test_builder_generated_state() {
        let config = grant_config()
            .authorization_endpoint("https://provider.example/authorize")
            .token_endpoint("https://provider.example/token")
            .client_id("client-1")
            .generate_state()
            .build()
            .unwrap();
        assert!(config.state.is_some());
        assert!(!config.state.unwrap().is_empty());
    }

    #[test]
    fn test_builder_optional_fields_absent() {
        let config = grant_config()
            .authorization_endpoint("https://provider.example/authorize")
            .token_endpoint("https://provider.example/token")
            .client_id("client-1")
            .build()
            .unwrap();
        assert!(config.redirect_uri.is_none());
        assert!(config.scopes.is_empty());
        assert!(config.state.is_none());
    }
}
