//! Session state modules.
//!
//! DESIGN
//! ======
//! `auth` holds the plain value types, `session` owns mutation and
//! persistence, and `context` wires a store into the Leptos reactive tree.

pub mod auth;
pub mod context;
pub mod session;
