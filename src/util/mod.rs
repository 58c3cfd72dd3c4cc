//! Utility helpers shared across the session modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns from session logic to
//! improve reuse and testability.

pub mod logging;
pub mod storage;
