#![deny(missing_docs)]
//! Shared logging utilities for the jobwatch workspace.
//!
//! This crate provides the `watch_*` logging macros used across the codebase,
//! the refresh-tick counter reported by the dashboard runtime, and a minimal
//! test initializer for the global logger.

use std::cell::Cell;

/// Re-exported so the macros resolve without a direct `log` dependency.
#[doc(hidden)]
pub use log;

thread_local! {
    /// Thread-local storage for the current refresh tick count.
    static REFRESH_TICK: Cell<u64> = const { Cell::new(0) };
}

/// Sets the refresh tick count for the current thread.
/// The dashboard runtime calls this once per scheduler tick.
pub fn set_refresh_tick(tick: u64) {
    REFRESH_TICK.with(|v| v.set(tick));
}

/// Retrieves the refresh tick count for the current thread.
/// Returns 0 if no tick has happened yet.
pub fn get_refresh_tick() -> u64 {
    REFRESH_TICK.with(|v| v.get())
}

/// Forwards a record to the `log` facade, tagged with the refresh tick that
/// was current on the emitting thread.
#[doc(hidden)]
#[macro_export]
macro_rules! __watch_log {
    ($level:expr, $($arg:tt)*) => {{
        $crate::log::log!(
            $level,
            "[tick {}] {}",
            $crate::get_refresh_tick(),
            format_args!($($arg)*)
        );
    }};
}

/// Logs a trace-level message tagged with the current refresh tick.
#[macro_export]
macro_rules! watch_trace {
    ($($arg:tt)*) => {
        $crate::__watch_log!($crate::log::Level::Trace, $($arg)*)
    };
}

/// Logs a debug-level message tagged with the current refresh tick.
#[macro_export]
macro_rules! watch_debug {
    ($($arg:tt)*) => {
        $crate::__watch_log!($crate::log::Level::Debug, $($arg)*)
    };
}

/// Logs an info-level message tagged with the current refresh tick.
#[macro_export]
macro_rules! watch_info {
    ($($arg:tt)*) => {
        $crate::__watch_log!($crate::log::Level::Info, $($arg)*)
    };
}

/// Logs a warn-level message tagged with the current refresh tick.
///
/// Transport failures use this level: they are expected and self-heal on the
/// next refresh.
#[macro_export]
macro_rules! watch_warn {
    ($($arg:tt)*) => {
        $crate::__watch_log!($crate::log::Level::Warn, $($arg)*)
    };
}

/// Logs an error-level message tagged with the current refresh tick.
#[macro_export]
macro_rules! watch_error {
    ($($arg:tt)*) => {
        $crate::__watch_log!($crate::log::Level::Error, $($arg)*)
    };
}

/// Initializes a terminal logger for tests.
///
/// Safe to call from every test: only the first call installs a logger, later
/// calls (or a logger installed elsewhere) are ignored.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    // The HTTP stack is chatty at debug level.
    let config = ConfigBuilder::new()
        .add_filter_ignore_str("hyper")
        .add_filter_ignore_str("reqwest")
        .build();

    let _ = TermLogger::init(level, config, TerminalMode::Mixed, ColorChoice::Auto);
}
