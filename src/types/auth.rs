//! Authorization Types
//!
//! Request and response types for the authorization step.

use std::collections::HashMap;

use url::form_urlencoded;
use url::Url;

use crate::error::{ConfigurationError, ErrorResponse, GrantError};
use crate::types::GrantConfiguration;

/// The only response type this engine requests.
pub const RESPONSE_TYPE_CODE: &str = "code";

/// Authorization request, built fresh per attempt and discarded once the
/// authorization URL has been issued.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthorizationRequest {
    /// Client identifier.
    pub client_id: String,
    /// Redirect URI.
    pub redirect_uri: Option<Url>,
    /// Rendered scope value (space-delimited).
    pub scope: Option<String>,
    /// Anti-CSRF state.
    pub state: Option<String>,
}

impl AuthorizationRequest {
    /// Build the request from a flow configuration.
    pub fn from_config(config: &GrantConfiguration) -> Self {
        Self {
            client_id: config.client_id.clone(),
            redirect_uri: config.redirect_uri.clone(),
            scope: config.scope_value(),
            state: config.state.clone(),
        }
    }

    /// Serialize to a query string (`response_type=code` first).
    pub fn to_query(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        serializer.append_pair("response_type", RESPONSE_TYPE_CODE);
        serializer.append_pair("client_id", &self.client_id);
        if let Some(redirect_uri) = &self.redirect_uri {
            serializer.append_pair("redirect_uri", redirect_uri.as_str());
        }
        if let Some(scope) = &self.scope {
            serializer.append_pair("scope", scope);
        }
        if let Some(state) = &self.state {
            serializer.append_pair("state", state);
        }
        serializer.finish()
    }

    /// Parse a request back out of a query string.
    pub fn from_query(query: &str) -> Result<Self, GrantError> {
        let params: HashMap<String, String> = form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect();

        match params.get("response_type").map(String::as_str) {
            Some(RESPONSE_TYPE_CODE) => {}
            other => {
                return Err(ConfigurationError::InvalidConfig {
                    message: format!("response_type must be \"code\", got {:?}", other),
                }
                .into())
            }
        }

        let client_id = params
            .get("client_id")
            .cloned()
            .ok_or_else(|| ConfigurationError::MissingRequired {
                field: "client_id".to_string(),
            })?;

        let redirect_uri = params
            .get("redirect_uri")
            .map(|raw| {
                Url::parse(raw).map_err(|_| ConfigurationError::InvalidEndpoint {
                    url: raw.clone(),
                })
            })
            .transpose()?;

        Ok(Self {
            client_id,
            redirect_uri,
            scope: params.get("scope").cloned(),
            state: params.get("state").cloned(),
        })
    }

    /// The full authorization URL for the user agent, preserving any query
    /// parameters already present on the endpoint.
    pub fn authorization_url(&self, endpoint: &Url) -> Url {
        let mut url = endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("response_type", RESPONSE_TYPE_CODE);
            pairs.append_pair("client_id", &self.client_id);
            if let Some(redirect_uri) = &self.redirect_uri {
                pairs.append_pair("redirect_uri", redirect_uri.as_str());
            }
            if let Some(scope) = &self.scope {
                pairs.append_pair("scope", scope);
            }
            if let Some(state) = &self.state {
                pairs.append_pair("state", state);
            }
        }
        url
    }
}

/// Authorization response extracted from a matched redirect.
///
/// Consumed immediately by state validation; never persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthorizationResponse {
    /// Authorization code.
    pub code: String,
    /// Echoed state.
    pub state: Option<String>,
}

impl AuthorizationResponse {
    /// Parse the query string of a matched redirect.
    ///
    /// A recognized `error` parameter wins over everything else; a
    /// redirect with neither `error` nor `code` is invalid.
    pub fn from_redirect(redirect: &Url) -> Result<Self, GrantError> {
        let params: HashMap<String, String> = redirect.query_pairs().into_owned().collect();

        if let Some(error) = ErrorResponse::from_params(&params) {
            return Err(error.into());
        }

        let code = params.get("code").cloned().ok_or_else(|| {
            GrantError::InvalidAuthorizationResponse {
                message: "redirect carries neither code nor error".to_string(),
            }
        })?;

        Ok(Self {
            code,
            state: params.get("state").cloned(),
        })
    }
}
