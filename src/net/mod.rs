//! Wire types shared with the backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! Requests are issued by the application; this crate only models the
//! payloads it needs to turn a login response into a session.

pub mod types;
