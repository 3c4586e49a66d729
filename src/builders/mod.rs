//! Builders
//!
//! Fluent builder for the grant configuration.

pub mod config;

pub use config::{grant_config, GrantConfigurationBuilder};
