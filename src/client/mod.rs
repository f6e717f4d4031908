//! HTTP client for the API
//!
//! The transport collaborator: consumes records built by [`crate::api`] and
//! talks to the REST endpoints. The model layer never calls into here.

mod client;
mod config;
mod tests;

pub use client::Client;
pub use config::{ClientConfig, ConfigBuilder, DEFAULT_BASE_URL};
