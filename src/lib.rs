//! guardrail-keys
//!
//! Configure guardrail validator selections and manage the API keys
//! issued for them:
//! - Validator and model catalog with selection rules
//! - Authenticated client for the remote key service
//! - Lifecycle controller that discards out-of-date responses
//! - Pluggable credential sources (static, environment, OAuth client credentials)

pub mod cli;
pub mod config;
pub mod controller;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;
