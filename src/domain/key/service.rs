//! Remote key service port

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::entity::{DeleteAck, IssuedKey, KeyId, KeyRecord};
use crate::domain::credentials::BearerCredential;
use crate::domain::selection::Selection;
use crate::domain::KeyError;

/// Remote operations on issued keys.
///
/// Every call is a single request/response with no retry. The caller obtains
/// a fresh credential right before each call.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait KeyService: Send + Sync {
    /// Lists the keys issued to the authenticated principal
    async fn list(&self, credential: &BearerCredential) -> Result<Vec<KeyRecord>, KeyError>;

    /// Registers a new key for a validated selection
    async fn create(
        &self,
        credential: &BearerCredential,
        selection: &Selection,
    ) -> Result<IssuedKey, KeyError>;

    /// Revokes a key; unknown ids are reported by the server as an error
    async fn delete(
        &self,
        credential: &BearerCredential,
        key_id: &KeyId,
    ) -> Result<DeleteAck, KeyError>;
}
