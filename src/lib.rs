//! OAuth2 Authorization Code Grant
//!
//! Client-side engine for the Authorization Code Grant (RFC 6749
//! Section 4.1): builds the authorization request, hands it to an
//! external user agent, recognizes and validates the redirect (including
//! the anti-CSRF state check), exchanges the authorization code at the
//! token endpoint, and maps every response into a typed token or a typed
//! error.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use oauth2_authcode::{grant_config, AuthorizationCodeGrantFlow, ReqwestHttpTransport};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = grant_config()
//!         .authorization_endpoint("https://provider.com/authorize")
//!         .token_endpoint("https://provider.com/token")
//!         .client_id("my-client-id")
//!         .redirect_uri("https://myapp.com/callback")
//!         .add_scope("openid")
//!         .generate_state()
//!         .build()?;
//!
//!     let flow = AuthorizationCodeGrantFlow::new(
//!         config,
//!         Arc::new(ReqwestHttpTransport::new()?),
//!         Arc::new(MyBrowserUserAgent::new()), // your UserAgent impl
//!     );
//!
//!     let token = flow.authenticate().await?;
//!     println!("Authorization: {}", token.authorization_header());
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! The crate is organized into several sub-modules:
//!
//! - `types`: request/response data shapes and the grant configuration
//! - `error`: error taxonomy and OAuth2 error-response recognition
//! - `core`: collaborator boundaries (HTTP transport, user agent, client
//!   authenticator)
//! - `flows`: the grant orchestrator and the token-response handler
//! - `builders`: fluent configuration builder

pub mod builders;
pub mod core;
pub mod error;
pub mod flows;
pub mod types;

// Re-export builders
pub use builders::{grant_config, GrantConfigurationBuilder};

// Re-export errors
pub use error::{
    ConfigurationError, ErrorCode, ErrorResponse, GrantError, GrantResult, NetworkError,
};

// Re-export types
pub use types::{
    random_state, AccessTokenRequest, AccessTokenResponse, AuthorizationRequest,
    AuthorizationResponse, GrantConfiguration,
};

// Re-export core components
pub use core::{
    // Transport
    HttpMethod, HttpRequest, HttpResponse, HttpTransport, MockHttpTransport,
    ReqwestHttpTransport,
    // User agent
    AttemptGuard, RedirectRecognizer, ScriptedUserAgent, UserAgent,
    // Client authentication
    ClientAuthenticator, ClientSecretBasic, ClientSecretPost, MockClientAuthenticator,
};

// Re-export flows
pub use flows::{
    handle_token_response, AcceptAllValidator, AuthorizationCodeGrantFlow, ResponseValidator,
};
