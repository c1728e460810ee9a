use crate::domain::{
    DeleteAck, Epoch, IssuedKey, KeyRecord, OperationKind, OperationSlot, OperationState,
    Selection,
};

/// Everything a presentation layer needs to render the controller.
///
/// The list operation's success result is the number of records accepted;
/// the records themselves live in [`ControllerSnapshot::keys`], which is only
/// ever replaced as a whole by an accepted listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControllerSnapshot {
    pub(super) selection: Selection,
    pub(super) keys: Vec<KeyRecord>,
    pub(super) list: OperationSlot<usize>,
    pub(super) create: OperationSlot<IssuedKey>,
    pub(super) delete: OperationSlot<DeleteAck>,
}

impl ControllerSnapshot {
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn keys(&self) -> &[KeyRecord] {
        &self.keys
    }

    pub fn list(&self) -> &OperationState<usize> {
        self.list.state()
    }

    pub fn create(&self) -> &OperationState<IssuedKey> {
        self.create.state()
    }

    pub fn delete(&self) -> &OperationState<DeleteAck> {
        self.delete.state()
    }

    /// Latest epoch handed out for an operation kind
    pub fn latest_epoch(&self, kind: OperationKind) -> Epoch {
        match kind {
            OperationKind::List => self.list.latest_epoch(),
            OperationKind::Create => self.create.latest_epoch(),
            OperationKind::Delete => self.delete.latest_epoch(),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.list().is_in_flight() || self.create().is_in_flight() || self.delete().is_in_flight()
    }
}

pub(super) fn list_slot(s: &mut ControllerSnapshot) -> &mut OperationSlot<usize> {
    &mut s.list
}

pub(super) fn create_slot(s: &mut ControllerSnapshot) -> &mut OperationSlot<IssuedKey> {
    &mut s.create
}

pub(super) fn delete_slot(s: &mut ControllerSnapshot) -> &mut OperationSlot<DeleteAck> {
    &mut s.delete
}
