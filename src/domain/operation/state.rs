use serde::Serialize;

use crate::domain::error::{ErrorKind, KeyError};

/// Monotonic request counter, scoped to one operation kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct Epoch(u64);

impl Epoch {
    pub fn value(&self) -> u64 {
        self.0
    }

    fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for Epoch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The logical operations tracked by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    List,
    Create,
    Delete,
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::List => f.write_str("list"),
            Self::Create => f.write_str("create"),
            Self::Delete => f.write_str("delete"),
        }
    }
}

/// Lifecycle of one operation kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationState<T> {
    Idle,
    InFlight {
        epoch: Epoch,
    },
    Succeeded {
        epoch: Epoch,
        result: T,
    },
    Failed {
        epoch: Epoch,
        error: KeyError,
    },
}

impl<T> Default for OperationState<T> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<T> OperationState<T> {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::InFlight { .. })
    }

    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Succeeded { .. } | Self::Failed { .. })
    }

    pub fn epoch(&self) -> Option<Epoch> {
        match self {
            Self::Idle => None,
            Self::InFlight { epoch }
            | Self::Succeeded { epoch, .. }
            | Self::Failed { epoch, .. } => Some(*epoch),
        }
    }

    pub fn result(&self) -> Option<&T> {
        match self {
            Self::Succeeded { result, .. } => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&KeyError> {
        match self {
            Self::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.error().map(KeyError::kind)
    }
}

/// Epoch counter plus current state for one operation kind.
///
/// The counter advances on every call, before any suspension point, so the
/// latest call always owns the slot. Outcomes carrying an older epoch are
/// rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationSlot<T> {
    latest: Epoch,
    state: OperationState<T>,
}

impl<T> Default for OperationSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> OperationSlot<T> {
    pub fn new() -> Self {
        Self {
            latest: Epoch::default(),
            state: OperationState::Idle,
        }
    }

    pub fn state(&self) -> &OperationState<T> {
        &self.state
    }

    pub fn latest_epoch(&self) -> Epoch {
        self.latest
    }

    pub fn is_current(&self, epoch: Epoch) -> bool {
        self.latest == epoch
    }

    /// Allocate the epoch for a new call, superseding any earlier one
    pub fn begin(&mut self) -> Epoch {
        self.latest = self.latest.next();
        self.latest
    }

    /// Mark the call in flight; false if it was superseded meanwhile
    pub fn start(&mut self, epoch: Epoch) -> bool {
        if !self.is_current(epoch) {
            return false;
        }

        self.state = OperationState::InFlight { epoch };
        true
    }

    /// Apply an outcome; false (and no change) if the epoch is stale
    pub fn settle(&mut self, epoch: Epoch, outcome: Result<T, KeyError>) -> bool {
        if !self.is_current(epoch) {
            return false;
        }

        self.state = match outcome {
            Ok(result) => OperationState::Succeeded { epoch, result },
            Err(error) => OperationState::Failed { epoch, error },
        };
        true
    }

    /// Return a settled operation to idle; false if nothing was settled
    pub fn acknowledge(&mut self) -> bool {
        if !self.state.is_settled() {
            return false;
        }

        self.state = OperationState::Idle;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_is_monotonic() {
        let mut slot: OperationSlot<u32> = OperationSlot::new();

        let first = slot.begin();
        let second = slot.begin();

        assert!(second > first);
        assert_eq!(slot.latest_epoch(), second);
        assert!(slot.state().is_idle());
    }

    #[test]
    fn test_full_cycle() {
        let mut slot = OperationSlot::new();
        let epoch = slot.begin();

        assert!(slot.start(epoch));
        assert_eq!(slot.state(), &OperationState::InFlight { epoch });

        assert!(slot.settle(epoch, Ok(5)));
        assert_eq!(slot.state().result(), Some(&5));

        assert!(slot.acknowledge());
        assert!(slot.state().is_idle());
    }

    #[test]
    fn test_stale_outcome_discarded_in_either_order() {
        for newer_first in [true, false] {
            let mut slot = OperationSlot::new();
            let older = slot.begin();
            slot.start(older);
            let newer = slot.begin();
            slot.start(newer);

            if newer_first {
                assert!(slot.settle(newer, Ok("newer")));
                assert!(!slot.settle(older, Ok("older")));
            } else {
                assert!(!slot.settle(older, Ok("older")));
                assert!(slot.settle(newer, Ok("newer")));
            }

            assert_eq!(slot.state().result(), Some(&"newer"));
            assert_eq!(slot.state().epoch(), Some(newer));
        }
    }

    #[test]
    fn test_superseded_call_cannot_start() {
        let mut slot: OperationSlot<()> = OperationSlot::new();
        let older = slot.begin();
        let _newer = slot.begin();

        assert!(!slot.start(older));
        assert!(slot.state().is_idle());
    }

    #[test]
    fn test_failure_state() {
        let mut slot: OperationSlot<()> = OperationSlot::new();
        let epoch = slot.begin();

        slot.settle(epoch, Err(KeyError::auth("expired")));

        assert_eq!(slot.state().error_kind(), Some(ErrorKind::Auth));
        assert!(slot.state().result().is_none());
    }

    #[test]
    fn test_acknowledge_ignores_in_flight() {
        let mut slot: OperationSlot<()> = OperationSlot::new();
        let epoch = slot.begin();
        slot.start(epoch);

        assert!(!slot.acknowledge());
        assert!(slot.state().is_in_flight());
    }
}
