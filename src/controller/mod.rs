//! Key lifecycle controller
//!
//! Owns the selection store, the cached key listing and one
//! [`OperationSlot`](crate::domain::OperationSlot) per operation kind, and
//! sequences credential acquisition and remote calls against them.

mod lifecycle;
mod snapshot;

pub use lifecycle::{ControllerSettings, KeyLifecycleController};
pub use snapshot::ControllerSnapshot;
