//! Grant Flow Types
//!
//! Core type definitions for the authorization code grant.

pub mod auth;
pub mod config;
pub mod token;

pub use auth::*;
pub use config::*;
pub use token::*;
