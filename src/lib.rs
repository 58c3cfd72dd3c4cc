//! # session
//!
//! Client-side authentication session state for the Leptos front-end.
//!
//! The crate tracks whether a user is logged in, their bearer token and basic
//! profile fields, and mirrors that state into browser `localStorage` so a
//! session survives page reloads. Storage is an injected capability: the
//! `hydrate` build attaches the browser's storage, while SSR and native tests
//! run the same store without one.

pub mod config;
pub mod net;
pub mod state;
pub mod util;

pub use config::SessionConfig;
pub use state::auth::{AuthState, User};
pub use state::context::{login, logout, provide_session, session_signal, use_session};
pub use state::session::{SessionError, SessionStore, Subscription};
pub use util::storage::{KeyValueStorage, MemoryStorage, StorageError};
