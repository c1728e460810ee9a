//! Infrastructure layer - External service implementations

pub mod credentials;
pub mod http_client;
pub mod key_service;
pub mod logging;
