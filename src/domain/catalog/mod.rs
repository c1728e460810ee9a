//! Validator catalog domain
//!
//! Immutable reference data listing the validators and models a key can be
//! configured with.

mod builtin;
mod entity;
mod registry;

pub use entity::{CatalogEntry, ModelId, ValidatorId};
pub use registry::{CatalogList, ValidatorCatalog};
