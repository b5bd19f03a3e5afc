//! Browser bootstrap: console logging and panic reporting.
//!
//! SYSTEM CONTEXT
//! ==============
//! `tracing` records are forwarded to `log` (the crate enables tracing's
//! `log` feature), and `console_log` prints them in the devtools console.

/// Install the console logger and panic hook. Safe to call more than once.
pub fn init_logging(level: log::Level) {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(level).is_err() {
        log::debug!("console logger already installed");
    }
}
