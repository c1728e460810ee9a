use std::future::Future;
use std::sync::Arc;

use futures::Stream;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::snapshot::{create_slot, delete_slot, list_slot, ControllerSnapshot};
use crate::domain::{
    BearerCredential, CredentialProvider, DeleteAck, Epoch, IssuedKey, KeyError, KeyId,
    KeyRecord, KeyService, ModelId, OperationKind, OperationSlot, OperationState, Selection,
    SelectionError, ValidatorCatalog, ValidatorId, ValidatorList,
};

type SlotFn<T> = fn(&mut ControllerSnapshot) -> &mut OperationSlot<T>;

/// Per-session controller settings
#[derive(Debug, Clone)]
pub struct ControllerSettings {
    /// Audience requested from the credential provider
    pub audience: Option<String>,
    /// Refuse submissions that have no model selected
    pub require_model: bool,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            audience: None,
            require_model: true,
        }
    }
}

/// Orchestrates selection, credential acquisition and remote key calls for
/// one view session.
///
/// Handles are cheap to clone and share the same state, so operations may be
/// spawned and run concurrently. Each operation kind has its own epoch
/// counter; a response is applied only if no later call of the same kind was
/// issued in the meantime, otherwise it is dropped. Mutations never patch the
/// key cache locally: a confirmed create or delete triggers a fresh listing.
///
/// Errors never escape as `Err`; every method reports through the
/// operation's [`OperationState`].
pub struct KeyLifecycleController<S, P> {
    inner: Arc<Inner<S, P>>,
}

struct Inner<S, P> {
    service: S,
    credentials: P,
    catalog: ValidatorCatalog,
    settings: ControllerSettings,
    state: watch::Sender<ControllerSnapshot>,
}

impl<S, P> Clone for KeyLifecycleController<S, P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S, P> KeyLifecycleController<S, P>
where
    S: KeyService,
    P: CredentialProvider,
{
    pub fn new(service: S, credentials: P, catalog: ValidatorCatalog) -> Self {
        Self::with_settings(service, credentials, catalog, ControllerSettings::default())
    }

    pub fn with_settings(
        service: S,
        credentials: P,
        catalog: ValidatorCatalog,
        settings: ControllerSettings,
    ) -> Self {
        let (state, _) = watch::channel(ControllerSnapshot::default());

        Self {
            inner: Arc::new(Inner {
                service,
                credentials,
                catalog,
                settings,
                state,
            }),
        }
    }

    pub fn catalog(&self) -> &ValidatorCatalog {
        &self.inner.catalog
    }

    pub fn settings(&self) -> &ControllerSettings {
        &self.inner.settings
    }

    /// Receiver notified on every visible state change
    pub fn subscribe(&self) -> watch::Receiver<ControllerSnapshot> {
        self.inner.state.subscribe()
    }

    /// Stream of snapshots, one per visible change after the call.
    /// Ends when the controller is dropped.
    pub fn updates(&self) -> impl Stream<Item = ControllerSnapshot> + Send + use<S, P> {
        let rx = self.inner.state.subscribe();

        futures::stream::unfold(rx, |mut rx| async move {
            rx.changed().await.ok()?;
            let snapshot = rx.borrow_and_update().clone();
            Some((snapshot, rx))
        })
    }

    pub fn snapshot(&self) -> ControllerSnapshot {
        self.inner.state.borrow().clone()
    }

    pub fn selection(&self) -> Selection {
        self.inner.state.borrow().selection.clone()
    }

    pub fn keys(&self) -> Vec<KeyRecord> {
        self.inner.state.borrow().keys.clone()
    }

    // Selection store

    /// Toggle an input validator; returns whether it is now selected
    pub fn toggle_input(&self, id: impl Into<ValidatorId>) -> Result<bool, SelectionError> {
        let id = id.into();

        if !self.inner.catalog.is_input(&id) {
            return Err(SelectionError::UnknownValidator {
                list: ValidatorList::Input,
                id,
            });
        }

        debug!(validator = %id, "Toggling input validator");
        Ok(self.modify(|s| s.selection.toggle_input(id)))
    }

    /// Toggle an output validator; returns whether it is now selected
    pub fn toggle_output(&self, id: impl Into<ValidatorId>) -> Result<bool, SelectionError> {
        let id = id.into();

        if !self.inner.catalog.is_output(&id) {
            return Err(SelectionError::UnknownValidator {
                list: ValidatorList::Output,
                id,
            });
        }

        debug!(validator = %id, "Toggling output validator");
        Ok(self.modify(|s| s.selection.toggle_output(id)))
    }

    pub fn set_model(&self, id: impl Into<ModelId>) -> Result<(), SelectionError> {
        let id = id.into();

        if !self.inner.catalog.is_model(&id) {
            return Err(SelectionError::UnknownModel(id));
        }

        self.modify(|s| s.selection.set_model(id));
        Ok(())
    }

    pub fn clear_model(&self) {
        self.modify(|s| s.selection.clear_model());
    }

    pub fn reset_selection(&self) {
        self.modify(|s| s.selection.reset());
    }

    /// Return a settled operation to `Idle`
    pub fn acknowledge(&self, kind: OperationKind) -> bool {
        self.apply(|s| match kind {
            OperationKind::List => s.list.acknowledge(),
            OperationKind::Create => s.create.acknowledge(),
            OperationKind::Delete => s.delete.acknowledge(),
        })
    }

    // Remote operations

    /// Reload the key listing from the server
    pub async fn list(&self) -> OperationState<usize> {
        let epoch = self.modify(|s| s.list.begin());
        let service = &self.inner.service;

        let outcome = self
            .dispatch(OperationKind::List, epoch, list_slot, |credential| async move {
                service.list(&credential).await
            })
            .await;

        if let Some(outcome) = outcome {
            self.settle(OperationKind::List, epoch, |s| match outcome {
                Ok(keys) => {
                    if !s.list.settle(epoch, Ok(keys.len())) {
                        return false;
                    }
                    s.keys = keys;
                    true
                }
                Err(error) => s.list.settle(epoch, Err(error)),
            });
        }

        self.snapshot().list().clone()
    }

    /// Submit the current selection for a new key.
    ///
    /// An incomplete selection fails with a validation error without
    /// acquiring a credential or touching the network.
    pub async fn create(&self) -> OperationState<IssuedKey> {
        let (epoch, selection) = self.modify(|s| (s.create.begin(), s.selection.clone()));

        if let Err(error) = selection.validate(self.inner.settings.require_model) {
            info!(error = %error, "Rejecting incomplete selection");
            self.settle(OperationKind::Create, epoch, |s| {
                s.create.settle(epoch, Err(error.into()))
            });
            return self.snapshot().create().clone();
        }

        let service = &self.inner.service;
        let selection = &selection;

        let outcome = self
            .dispatch(OperationKind::Create, epoch, create_slot, |credential| async move {
                service.create(&credential, selection).await
            })
            .await;

        if let Some(outcome) = outcome {
            let confirmed = outcome.is_ok();
            self.settle(OperationKind::Create, epoch, |s| s.create.settle(epoch, outcome));

            // The server state changed even if this response was superseded
            if confirmed {
                self.list().await;
            }
        }

        self.snapshot().create().clone()
    }

    /// Revoke a key by id
    pub async fn delete(&self, key_id: KeyId) -> OperationState<DeleteAck> {
        let epoch = self.modify(|s| s.delete.begin());
        let service = &self.inner.service;
        let key_id = &key_id;

        let outcome = self
            .dispatch(OperationKind::Delete, epoch, delete_slot, |credential| async move {
                service.delete(&credential, key_id).await
            })
            .await;

        if let Some(outcome) = outcome {
            let confirmed = outcome.is_ok();
            self.settle(OperationKind::Delete, epoch, |s| s.delete.settle(epoch, outcome));

            if confirmed {
                self.list().await;
            }
        }

        self.snapshot().delete().clone()
    }

    /// Acquire a credential, mark the call in flight and perform it.
    ///
    /// Returns `None` when the call ended before reaching the network: the
    /// credential could not be acquired (already recorded as the failure) or
    /// a newer call of the same kind superseded this one.
    async fn dispatch<U, R, F, Fut>(
        &self,
        kind: OperationKind,
        epoch: Epoch,
        slot: SlotFn<U>,
        call: F,
    ) -> Option<Result<R, KeyError>>
    where
        F: FnOnce(BearerCredential) -> Fut,
        Fut: Future<Output = Result<R, KeyError>>,
    {
        let audience = self.inner.settings.audience.as_deref();

        let credential = match self.inner.credentials.acquire_credential(audience).await {
            Ok(credential) => credential,
            Err(error) => {
                warn!(
                    operation = %kind,
                    provider = self.inner.credentials.provider_name(),
                    error = %error,
                    "Credential acquisition failed"
                );
                self.settle(kind, epoch, |s| slot(s).settle(epoch, Err(error)));
                return None;
            }
        };

        if !self.apply(|s| slot(s).start(epoch)) {
            debug!(operation = %kind, epoch = %epoch, "Call superseded before dispatch");
            return None;
        }

        info!(operation = %kind, epoch = %epoch, "Request in flight");
        Some(call(credential).await)
    }

    fn settle(
        &self,
        kind: OperationKind,
        epoch: Epoch,
        f: impl FnOnce(&mut ControllerSnapshot) -> bool,
    ) -> bool {
        let accepted = self.apply(f);

        if accepted {
            debug!(operation = %kind, epoch = %epoch, "Applied response");
        } else {
            debug!(operation = %kind, epoch = %epoch, "Discarding stale response");
        }

        accepted
    }

    /// Mutate state, notifying subscribers only when `f` reports a change
    fn apply(&self, f: impl FnOnce(&mut ControllerSnapshot) -> bool) -> bool {
        let mut changed = false;
        self.inner.state.send_if_modified(|s| {
            changed = f(s);
            changed
        });
        changed
    }

    fn modify<R: Default>(&self, f: impl FnOnce(&mut ControllerSnapshot) -> R) -> R {
        let mut out = R::default();
        self.inner.state.send_modify(|s| out = f(s));
        out
    }
}
