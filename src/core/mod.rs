//! Grant Flow Core Components
//!
//! Collaborator boundaries the flow depends on.

pub mod authenticator;
pub mod transport;
pub mod user_agent;

pub use authenticator::*;
pub use transport::*;
pub use user_agent::*;
