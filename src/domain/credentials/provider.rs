use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::Arc;

use super::BearerCredential;
use crate::domain::KeyError;

/// Source of bearer credentials for the key service.
///
/// Implementations fail with [`KeyError::Auth`] when no valid session exists
/// or a refresh is rejected. Any caching is the implementation's concern.
#[async_trait]
pub trait CredentialProvider: Send + Sync + Debug {
    /// Obtain a credential valid for the given audience
    async fn acquire_credential(
        &self,
        audience: Option<&str>,
    ) -> Result<BearerCredential, KeyError>;

    /// Get provider name for logging/debugging
    fn provider_name(&self) -> &'static str;
}

#[async_trait]
impl<T: CredentialProvider + ?Sized> CredentialProvider for Arc<T> {
    async fn acquire_credential(
        &self,
        audience: Option<&str>,
    ) -> Result<BearerCredential, KeyError> {
        (**self).acquire_credential(audience).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }
}
