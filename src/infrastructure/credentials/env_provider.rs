use async_trait::async_trait;
use std::env;

use crate::domain::{BearerCredential, CredentialProvider, KeyError};

pub const DEFAULT_TOKEN_VAR: &str = "GUARDRAIL_KEYS_TOKEN";

/// Credential provider that reads an access token from an environment
/// variable on every call, so a rotated token is picked up immediately
#[derive(Debug, Clone)]
pub struct EnvCredentialProvider {
    token_var: String,
}

impl EnvCredentialProvider {
    pub fn new(token_var: impl Into<String>) -> Self {
        Self {
            token_var: token_var.into(),
        }
    }

    pub fn token_var(&self) -> &str {
        &self.token_var
    }
}

impl Default for EnvCredentialProvider {
    fn default() -> Self {
        Self::new(DEFAULT_TOKEN_VAR)
    }
}

#[async_trait]
impl CredentialProvider for EnvCredentialProvider {
    async fn acquire_credential(
        &self,
        _audience: Option<&str>,
    ) -> Result<BearerCredential, KeyError> {
        let token = env::var(&self.token_var).map_err(|_| {
            KeyError::auth(format!(
                "Environment variable '{}' not set; log in first",
                self.token_var
            ))
        })?;

        if token.trim().is_empty() {
            return Err(KeyError::auth(format!(
                "Environment variable '{}' is empty",
                self.token_var
            )));
        }

        Ok(BearerCredential::new(token.trim()))
    }

    fn provider_name(&self) -> &'static str {
        "env"
    }
}
