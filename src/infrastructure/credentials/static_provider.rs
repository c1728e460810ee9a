use async_trait::async_trait;

use crate::domain::{BearerCredential, CredentialProvider, KeyError};

/// Credential provider that always yields the same token
pub struct StaticCredentialProvider {
    token: String,
}

impl StaticCredentialProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl std::fmt::Debug for StaticCredentialProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticCredentialProvider")
            .field("token", &"[REDACTED]")
            .finish()
    }
}

#[async_trait]
impl CredentialProvider for StaticCredentialProvider {
    async fn acquire_credential(
        &self,
        _audience: Option<&str>,
    ) -> Result<BearerCredential, KeyError> {
        if self.token.trim().is_empty() {
            return Err(KeyError::auth("No access token provided"));
        }

        Ok(BearerCredential::new(self.token.clone()))
    }

    fn provider_name(&self) -> &'static str {
        "static"
    }
}
