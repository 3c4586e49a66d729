//! Grant Flow
//!
//! The Authorization Code Grant (RFC 6749 Section 4.1): orchestration of
//! the authorization step, redirect validation, and token exchange, plus
//! the handler turning token-endpoint exchanges into typed results.

pub mod authorization_code;
pub mod token_response;

pub use authorization_code::{
    AcceptAllValidator, AuthorizationCodeGrantFlow, ResponseValidator,
};
pub use token_response::handle_token_response;
