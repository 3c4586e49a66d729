//! Authorization Code Flow
//!
//! RFC 6749 Section 4.1 - Authorization Code Grant orchestration.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::core::{
    AttemptGuard, ClientAuthenticator, HttpRequest, HttpTransport, RedirectRecognizer, UserAgent,
};
use crate::error::GrantError;
use crate::flows::handle_token_response;
use crate::types::{
    AccessTokenRequest, AccessTokenResponse, AuthorizationRequest, AuthorizationResponse,
    GrantConfiguration,
};

/// Validation hook run on every successful token response before it is
/// delivered. Inject a custom policy (e.g. required scopes) at flow
/// construction; the default accepts everything.
pub trait ResponseValidator: Send + Sync {
    /// Accept or reject a parsed token response.
    fn validate(&self, response: &AccessTokenResponse) -> Result<(), GrantError>;
}

/// Default pass-through validator.
#[derive(Debug, Default)]
pub struct AcceptAllValidator;

impl ResponseValidator for AcceptAllValidator {
    fn validate(&self, _response: &AccessTokenResponse) -> Result<(), GrantError> {
        Ok(())
    }
}

/// Authorization Code Grant orchestrator.
///
/// Owns an immutable [`GrantConfiguration`] and the injected collaborators
/// for its whole lifetime. Each [`authenticate`](Self::authenticate) call
/// is one independent attempt; the flow keeps no state between attempts.
/// Attempts may run concurrently against the same flow, but one user-agent
/// surface handles one attempt at a time.
pub struct AuthorizationCodeGrantFlow {
    config: GrantConfiguration,
    transport: Arc<dyn HttpTransport>,
    user_agent: Arc<dyn UserAgent>,
    authenticator: Option<Arc<dyn ClientAuthenticator>>,
    response_validator: Arc<dyn ResponseValidator>,
}

impl AuthorizationCodeGrantFlow {
    /// Create a flow with the default pass-through response validator and
    /// no client authenticator.
    pub fn new(
        config: GrantConfiguration,
        transport: Arc<dyn HttpTransport>,
        user_agent: Arc<dyn UserAgent>,
    ) -> Self {
        Self {
            config,
            transport,
            user_agent,
            authenticator: None,
            response_validator: Arc::new(AcceptAllValidator),
        }
    }

    /// Authenticate the client to the token endpoint through a credential
    /// mechanism instead of a plain `client_id` form field.
    pub fn with_client_authenticator(mut self, authenticator: Arc<dyn ClientAuthenticator>) -> Self {
        self.authenticator = Some(authenticator);
        self
    }

    /// Replace the response validation hook.
    pub fn with_response_validator(mut self, validator: Arc<dyn ResponseValidator>) -> Self {
        self.response_validator = validator;
        self
    }

    /// Get the flow configuration.
    pub fn config(&self) -> &GrantConfiguration {
        &self.config
    }

    /// Run one authentication attempt end to end.
    ///
    /// The returned future resolves exactly once, on the caller's executor
    /// context, with either the validated token response or the first
    /// failure. Steps run strictly in order and nothing is retried; the
    /// user-agent phase is unbounded and user-paced.
    pub async fn authenticate(&self) -> Result<AccessTokenResponse, GrantError> {
        let request = AuthorizationRequest::from_config(&self.config);
        let authorization_url = request.authorization_url(&self.config.authorization_endpoint);
        debug!(
            endpoint = %self.config.authorization_endpoint,
            client_id = %self.config.client_id,
            "presenting authorization request"
        );

        // The guard outlives the user-agent phase; recognizers that escape
        // into a longer-lived task observe FlowDiscarded once the attempt
        // future is gone.
        let attempt = Arc::new(AttemptGuard);
        let recognizer = RedirectRecognizer::new(
            self.config.redirect_uri.clone(),
            Arc::downgrade(&attempt),
        );

        let redirect = self
            .user_agent
            .present(HttpRequest::get(authorization_url.as_str()), recognizer)
            .await?;
        debug!(path = redirect.path(), "redirect recognized");

        let authorization = AuthorizationResponse::from_redirect(&redirect)?;

        if authorization.state != self.config.state {
            warn!("redirect state does not match the configured state");
            return Err(GrantError::StateMismatch);
        }

        let token_request = AccessTokenRequest {
            code: authorization.code,
            redirect_uri: self.config.redirect_uri.clone(),
            // Mutually exclusive with authenticator-based identification.
            client_id: if self.authenticator.is_none() {
                Some(self.config.client_id.clone())
            } else {
                None
            },
        };

        let mut http_request = HttpRequest::post_form(
            self.config.token_endpoint.as_str(),
            token_request.to_body(),
        );

        if let Some(authenticator) = &self.authenticator {
            http_request = authenticator.authorize(http_request).await?;
        }

        debug!(endpoint = %self.config.token_endpoint, "exchanging authorization code");
        let outcome = self.transport.send(http_request).await;
        let token = handle_token_response(outcome)?;

        self.response_validator.validate(&token)?;
        debug!("token exchange complete");
        Ok(token)
    }
}
