//! Leptos wiring for a [`SessionStore`].
//!
//! SYSTEM CONTEXT
//! ==============
//! The root component constructs one store, calls [`provide_session`], and
//! runs `initialize` once hydrated. Components read reactive state through
//! [`session_signal`] and log in or out through the store or through the
//! top-level [`login`] / [`logout`] helpers.

#[cfg(test)]
#[path = "context_test.rs"]
mod context_test;

use leptos::prelude::*;

use super::auth::{AuthState, User};
use super::session::{SessionError, SessionStore};

/// Make `store` available to every descendant of the current owner.
pub fn provide_session(store: SessionStore) {
    provide_context(store);
}

/// The store provided by an ancestor, if any.
pub fn use_session() -> Option<SessionStore> {
    use_context::<SessionStore>()
}

/// Signal mirroring `store`, updated on every state assignment.
///
/// The subscription is released when the current reactive owner is cleaned up.
pub fn session_signal(store: &SessionStore) -> RwSignal<AuthState> {
    let signal = RwSignal::new(store.current());
    let subscription = store.subscribe(move |state| {
        if signal.try_set(state.clone()).is_some() {
            log::trace!("session signal disposed; update dropped");
        }
    });
    on_cleanup(move || subscription.unsubscribe());
    signal
}

/// Log in on the store provided through context.
///
/// # Errors
///
/// Returns [`SessionError::MissingContext`] when no store was provided, or any
/// error from [`SessionStore::login`].
pub fn login(token: impl Into<String>, user: User) -> Result<(), SessionError> {
    use_session().ok_or(SessionError::MissingContext)?.login(token, user)
}

/// Log out on the store provided through context.
///
/// # Errors
///
/// Returns [`SessionError::MissingContext`] when no store was provided, or any
/// error from [`SessionStore::logout`].
pub fn logout() -> Result<(), SessionError> {
    use_session().ok_or(SessionError::MissingContext)?.logout()
}
