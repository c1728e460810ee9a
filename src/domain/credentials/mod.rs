//! Credential acquisition domain

mod credential;
mod provider;

pub use credential::BearerCredential;
pub use provider::CredentialProvider;

#[cfg(test)]
pub use provider::mock;
