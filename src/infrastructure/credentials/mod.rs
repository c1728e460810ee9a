//! Credential provider implementations

mod cached_provider;
mod client_credentials;
mod env_provider;
mod static_provider;

pub use cached_provider::CachedCredentialProvider;
pub use client_credentials::{ClientCredentialsConfig, ClientCredentialsProvider};
pub use env_provider::EnvCredentialProvider;
pub use static_provider::StaticCredentialProvider;
