#![deny(missing_docs)]
//! Shared logging utilities for the feed sieve workspace.
//!
//! This crate provides the `sieve_*` logging macros used across the codebase
//! and a minimal test initializer for the global logger. Every message is
//! stamped with the reactor's virtual clock so that a log of one pipeline run
//! reads in the order the timers actually fired.

use std::cell::Cell;

#[doc(hidden)]
pub use log;

thread_local! {
    /// Thread-local storage for the current reactor clock, in milliseconds.
    static VIRTUAL_MILLIS: Cell<u64> = const { Cell::new(0) };
}

/// Sets the reactor clock for the current thread.
/// The pipeline calls this every time it advances its clock.
pub fn set_virtual_millis(millis: u64) {
    VIRTUAL_MILLIS.with(|v| v.set(millis));
}

/// Retrieves the reactor clock for the current thread.
/// Returns 0 if no pipeline has advanced the clock yet.
pub fn virtual_millis() -> u64 {
    VIRTUAL_MILLIS.with(|v| v.get())
}

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! sieve_trace {
    ($($arg:tt)*) => {{
        $crate::log::trace!("[t={}ms] {}", $crate::virtual_millis(), format_args!($($arg)*));
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! sieve_info {
    ($($arg:tt)*) => {{
        $crate::log::info!("[t={}ms] {}", $crate::virtual_millis(), format_args!($($arg)*));
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! sieve_debug {
    ($($arg:tt)*) => {{
        $crate::log::debug!("[t={}ms] {}", $crate::virtual_millis(), format_args!($($arg)*));
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! sieve_warn {
    ($($arg:tt)*) => {{
        $crate::log::warn!("[t={}ms] {}", $crate::virtual_millis(), format_args!($($arg)*));
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! sieve_error {
    ($($arg:tt)*) => {{
        $crate::log::error!("[t={}ms] {}", $crate::virtual_millis(), format_args!($($arg)*));
    }};
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Another test may have installed the logger already.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
