//! Selection domain
//!
//! The client-side choice of validators and model for a key that is about
//! to be created.

mod entity;
mod validation;

pub use entity::Selection;
pub use validation::{SelectionError, ValidatorList};
