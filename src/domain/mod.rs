//! Domain layer - Core types, invariants and ports

pub mod catalog;
pub mod credentials;
pub mod error;
pub mod key;
pub mod operation;
pub mod selection;

pub use catalog::{CatalogEntry, CatalogList, ModelId, ValidatorCatalog, ValidatorId};
pub use credentials::{BearerCredential, CredentialProvider};
pub use error::{ErrorKind, KeyError};
pub use key::{ApiKeySecret, DeleteAck, IssuedKey, KeyId, KeyRecord, KeyService};
pub use operation::{Epoch, OperationKind, OperationSlot, OperationState};
pub use selection::{Selection, SelectionError, ValidatorList};
