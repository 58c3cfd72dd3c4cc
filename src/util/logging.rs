//! Browser console logging and panic reporting.
//!
//! Session code logs through the `log` facade. In the hydrate build this
//! routes records to the browser console; elsewhere records go to whichever
//! logger the host installed, if any.

#[cfg(test)]
#[path = "logging_test.rs"]
mod logging_test;

/// Install the console logger and panic hook. Safe to call more than once.
///
/// Returns `true` when this call installed the logger.
pub fn init(level: log::Level) -> bool {
    #[cfg(feature = "hydrate")]
    {
        console_error_panic_hook::set_once();
        console_log::init_with_level(level).is_ok()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        log::trace!("console logging skipped outside the browser (level {level})");
        false
    }
}
