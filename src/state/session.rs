//! Session store: the single owner of [`AuthState`] for an application.
//!
//! ARCHITECTURE
//! ============
//! A store holds the in-memory state, fans every assignment out to its
//! observers synchronously, and mirrors logins into an optional
//! [`KeyValueStorage`]. Without storage (SSR, native tests) the in-memory
//! behavior and notifications are identical; only persistence is skipped.
//!
//! TRADE-OFFS
//! ==========
//! Storage is written before state is assigned, so a rejected write leaves
//! both the state and the subscribers untouched. One operation lock spans the
//! storage calls and the assignment, keeping storage and state consistent
//! when clones are used from several threads. Observers run after all
//! internal locks are released and may call back into the store.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use super::auth::{AuthState, User};
use crate::config::SessionConfig;
use crate::util::storage::{KeyValueStorage, StorageError, browser_storage};

/// Error returned by [`SessionStore`] operations.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The durable storage rejected a read, write or removal.
    #[error("session storage error: {0}")]
    Storage(#[from] StorageError),
    /// The user record could not be encoded for storage.
    #[error("failed to encode user: {0}")]
    Encode(#[from] serde_json::Error),
    /// A top-level helper ran outside a tree that provided a store.
    #[error("no session store provided in context")]
    MissingContext,
}

type Observer = Arc<dyn Fn(&AuthState) + Send + Sync>;

struct Inner {
    /// Serializes storage access and state assignment across operations.
    op: Mutex<()>,
    state: Mutex<AuthState>,
    observers: Mutex<Vec<(u64, Observer)>>,
    next_observer_id: AtomicU64,
    storage: Option<Arc<dyn KeyValueStorage>>,
    config: SessionConfig,
}

impl Inner {
    fn op(&self) -> MutexGuard<'_, ()> {
        self.op.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn state(&self) -> MutexGuard<'_, AuthState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn observers(&self) -> MutexGuard<'_, Vec<(u64, Observer)>> {
        self.observers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Cloneable handle to one session. Clones share state and observers.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Inner>,
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("is_logged_in", &self.inner.state().is_logged_in)
            .field("has_storage", &self.has_storage())
            .field("subscribers", &self.subscriber_count())
            .field("config", &self.inner.config)
            .finish()
    }
}

impl SessionStore {
    /// Create a logged-out store. Pass `None` for `storage` outside a browser.
    pub fn new(storage: Option<Arc<dyn KeyValueStorage>>, config: SessionConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                op: Mutex::new(()),
                state: Mutex::new(AuthState::default()),
                observers: Mutex::new(Vec::new()),
                next_observer_id: AtomicU64::new(0),
                storage,
                config,
            }),
        }
    }

    /// Store backed by `storage`.
    pub fn with_storage<S>(storage: S, config: SessionConfig) -> Self
    where
        S: KeyValueStorage + 'static,
    {
        Self::new(Some(Arc::new(storage)), config)
    }

    /// Store with no durable storage, as used during server rendering.
    pub fn in_memory(config: SessionConfig) -> Self {
        Self::new(None, config)
    }

    /// Store backed by `localStorage` when running in a browser, otherwise
    /// in-memory only.
    pub fn for_environment(config: SessionConfig) -> Self {
        match browser_storage() {
            Some(storage) => Self::with_storage(storage, config),
            None => Self::in_memory(config),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.inner.config
    }

    /// Whether a durable storage capability is attached.
    pub fn has_storage(&self) -> bool {
        self.inner.storage.is_some()
    }

    /// Snapshot of the current state.
    pub fn current(&self) -> AuthState {
        self.inner.state().clone()
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.observers().len()
    }

    /// Register `observer`. It is called immediately with the current state and
    /// again after every state assignment until the returned handle is used to
    /// unsubscribe.
    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&AuthState) + Send + Sync + 'static,
    {
        let observer: Observer = Arc::new(observer);
        let id = self.inner.next_observer_id.fetch_add(1, Ordering::Relaxed);
        self.inner.observers().push((id, Arc::clone(&observer)));

        let current = self.current();
        observer(&current);

        Subscription { id, inner: Arc::downgrade(&self.inner) }
    }

    /// Record a successful login and persist it when storage is attached.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Storage`] if either entry cannot be written, or
    /// [`SessionError::Encode`] if `user` cannot be serialized. The in-memory
    /// state is unchanged on error.
    pub fn login(&self, token: impl Into<String>, user: User) -> Result<(), SessionError> {
        let token = token.into();
        let next = {
            let _op = self.inner.op();
            if let Some(storage) = &self.inner.storage {
                let user_json = serde_json::to_string(&user)?;
                storage.set(&self.inner.config.token_key, &token)?;
                storage.set(&self.inner.config.user_key, &user_json)?;
            }
            log::debug!("session login: user={} role={}", user.username, user.role);
            self.swap(AuthState::logged_in(token, user))
        };
        self.notify(&next);
        Ok(())
    }

    /// Clear the session and its persisted entries.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Storage`] if an entry cannot be removed.
    pub fn logout(&self) -> Result<(), SessionError> {
        let next = {
            let _op = self.inner.op();
            if let Some(storage) = &self.inner.storage {
                self.remove_persisted(storage.as_ref())?;
            }
            log::debug!("session logout");
            self.swap(AuthState::default())
        };
        self.notify(&next);
        Ok(())
    }

    /// Restore a persisted session. Intended to run once at startup.
    ///
    /// Does nothing without storage or when neither entry exists. A corrupt
    /// user entry, or only one of the two entries being present, discards the
    /// persisted session and resets to the logged-out state.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Storage`] if storage cannot be read or the stale
    /// entries cannot be removed.
    pub fn initialize(&self) -> Result<(), SessionError> {
        let Some(storage) = &self.inner.storage else {
            return Ok(());
        };
        let next = {
            let _op = self.inner.op();
            self.restore(storage.as_ref())?
        };
        if let Some(next) = next {
            self.notify(&next);
        }
        Ok(())
    }

    /// Reconcile state with `storage`. Caller holds the operation lock.
    /// Returns the assigned state, or `None` when nothing changed.
    fn restore(&self, storage: &dyn KeyValueStorage) -> Result<Option<AuthState>, StorageError> {
        let token = non_empty(storage.get(&self.inner.config.token_key)?);
        let user_json = non_empty(storage.get(&self.inner.config.user_key)?);

        match (token, user_json) {
            (Some(token), Some(user_json)) => match serde_json::from_str::<User>(&user_json) {
                Ok(user) => {
                    log::debug!("session restored: user={}", user.username);
                    Ok(Some(self.swap(AuthState::logged_in(token, user))))
                }
                Err(e) => {
                    log::warn!("discarding persisted session: malformed user entry: {e}");
                    self.discard_persisted(storage).map(Some)
                }
            },
            (None, None) => {
                log::debug!("no persisted session");
                Ok(None)
            }
            (token, _) => {
                let cfg = &self.inner.config;
                let (present, missing) =
                    if token.is_some() { (&cfg.token_key, &cfg.user_key) } else { (&cfg.user_key, &cfg.token_key) };
                log::warn!("discarding persisted session: {present} present without {missing}");
                self.discard_persisted(storage).map(Some)
            }
        }
    }

    fn discard_persisted(&self, storage: &dyn KeyValueStorage) -> Result<AuthState, StorageError> {
        self.remove_persisted(storage)?;
        Ok(self.swap(AuthState::default()))
    }

    fn remove_persisted(&self, storage: &dyn KeyValueStorage) -> Result<(), StorageError> {
        storage.remove(&self.inner.config.token_key)?;
        storage.remove(&self.inner.config.user_key)
    }

    fn swap(&self, next: AuthState) -> AuthState {
        *self.inner.state() = next.clone();
        next
    }

    fn notify(&self, next: &AuthState) {
        let observers: Vec<Observer> = self.inner.observers().iter().map(|(_, o)| Arc::clone(o)).collect();
        for observer in observers {
            observer(next);
        }
    }
}

/// Empty entries count as missing, matching how the browser app treated them.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Handle returned by [`SessionStore::subscribe`].
///
/// Dropping the handle leaves the observer attached.
#[derive(Debug)]
#[must_use = "the observer stays attached until `unsubscribe` is called"]
pub struct Subscription {
    id: u64,
    inner: Weak<Inner>,
}

impl Subscription {
    /// Detach the observer. No-op if the store has already been dropped.
    pub fn unsubscribe(self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.observers().retain(|(id, _)| *id != self.id);
        }
    }
}
