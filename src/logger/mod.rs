//! Structured logging for raydium-swap
//!
//! - Standard log levels (Error/Warning/Info/Debug/Verbose)
//! - Per-module debug control via `--debug-<module>` flags
//! - Colored console output plus a daily log file
//!
//! ## Usage
//!
//! ```rust,no_run
//! use raydium_swap::logger::{self, LogTag};
//!
//! logger::init();
//! logger::info(LogTag::Swap, "Swap submitted");
//! logger::debug(LogTag::Rpc, "getMultipleAccounts payload: ..."); // only with --debug-rpc
//! ```

mod config;
mod core;
mod file;
mod format;
mod levels;
mod tags;

pub use config::{
    get_logger_config, init_from_args, set_logger_config, LoggerConfig,
};
pub use levels::LogLevel;
pub use tags::LogTag;

/// Initialize the logger system
///
/// Call once at startup, after `paths::ensure_all_directories()`.
/// Reads debug flags from the command line and opens the log file.
pub fn init() {
    config::init_from_args();
    file::init_file_logging();
}

/// Log at ERROR level (always shown)
pub fn error(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Error, message);
}

/// Log at WARNING level
pub fn warning(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Warning, message);
}

/// Log at INFO level
pub fn info(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Info, message);
}

/// Log at DEBUG level, shown only with `--debug-<tag>`
///
/// ```rust,no_run
/// # use raydium_swap::logger::{self, LogTag};
/// // Only shown with --debug-pool
/// logger::debug(LogTag::Pool, "candidate rejected: ...");
/// ```
pub fn debug(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Debug, message);
}

/// Log at VERBOSE level, shown only with `--verbose` or `--verbose-<tag>`
pub fn verbose(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Verbose, message);
}

/// Flush pending file writes. Call before exiting.
pub fn flush() {
    file::flush_file_logging();
}
