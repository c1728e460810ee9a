//! Per-operation request tracking
//!
//! Each logical operation (list, create, delete) owns an epoch counter and a
//! state. Responses are applied only when they carry the current epoch.

mod state;

pub use state::{Epoch, OperationKind, OperationSlot, OperationState};
