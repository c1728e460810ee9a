//! Issued key domain
//!
//! Server-owned records describing API keys and the configuration they
//! were issued with, plus the port used to reach the key service.

mod entity;
mod service;

pub use entity::{ApiKeySecret, DeleteAck, IssuedKey, KeyId, KeyRecord};
pub use service::KeyService;

#[cfg(test)]
pub use service::MockKeyService;
