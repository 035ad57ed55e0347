//! Logging macros gated by a per-module `ENABLE_LOGS` switch.
//!
//! A module opts in by declaring the flag and importing the macros:
//! ```ignore
//! const ENABLE_LOGS: bool = true;
//! use crate::{log_info, log_warn};
//!
//! log_info!("stage {} completed", stage_id);
//! ```
//! Flip the flag to `false` to silence a noisy module without touching
//! `RUST_LOG`. The `log` level filter still applies on top.

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::debug!($($arg)*);
        }
    };
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::info!($($arg)*);
        }
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::warn!($($arg)*);
        }
    };
}

/// Errors are the one level a module should rarely silence; the flag is
/// still honoured so tests can run quietly.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::error!($($arg)*);
        }
    };
}
