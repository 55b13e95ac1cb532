#![deny(missing_docs)]
//! Shared logging utilities for the SEO scout workspace.
//!
//! This crate provides the `scout_*` logging macros used across the codebase,
//! a per-thread analysis run context that the macros stamp onto every line,
//! and the logger initializers for the binary and for tests.

use std::cell::Cell;
use std::fs::File;
use std::path::{Path, PathBuf};

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

#[doc(hidden)]
pub use log as __log;

thread_local! {
    /// Thread-local storage for the analysis run currently being driven.
    static RUN_ID: Cell<u64> = const { Cell::new(0) };
}

/// Sets the analysis run id for the current thread.
/// The orchestrator driver calls this once per submission.
pub fn set_run_id(run_id: u64) {
    RUN_ID.with(|v| v.set(run_id));
}

/// Retrieves the analysis run id for the current thread.
/// Returns 0 if no run has been started on this thread.
pub fn current_run_id() -> u64 {
    RUN_ID.with(|v| v.get())
}

/// Prefix stamped on every `scout_*` log line; empty outside of a run.
#[doc(hidden)]
pub fn run_prefix() -> String {
    match current_run_id() {
        0 => String::new(),
        id => format!("[run {id}] "),
    }
}

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! scout_trace {
    ($($arg:tt)*) => {{
        $crate::__log::trace!("{}{}", $crate::run_prefix(), format_args!($($arg)*));
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! scout_info {
    ($($arg:tt)*) => {{
        $crate::__log::info!("{}{}", $crate::run_prefix(), format_args!($($arg)*));
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! scout_debug {
    ($($arg:tt)*) => {{
        $crate::__log::debug!("{}{}", $crate::run_prefix(), format_args!($($arg)*));
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! scout_warn {
    ($($arg:tt)*) => {{
        $crate::__log::warn!("{}{}", $crate::run_prefix(), format_args!($($arg)*));
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! scout_error {
    ($($arg:tt)*) => {{
        $crate::__log::error!("{}{}", $crate::run_prefix(), format_args!($($arg)*));
    }};
}

/// Destination for log output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogDestination {
    /// Write to the given file only.
    File(PathBuf),
    /// Write to the terminal (stderr for warnings and errors).
    Terminal,
    /// Write to both the terminal and the given file.
    Both(PathBuf),
}

/// Initialize the global logger with the specified destination and level.
///
/// A file that cannot be created is reported on stderr and skipped; the
/// remaining loggers are still installed. Calling this twice is a no-op.
pub fn initialize(destination: LogDestination, level: LevelFilter) {
    let config = build_config();

    let loggers: Vec<Box<dyn SharedLogger>> = match destination {
        LogDestination::File(path) => match create_file_logger(&path, level, config) {
            Some(file_logger) => vec![file_logger],
            None => return,
        },
        LogDestination::Terminal => vec![TermLogger::new(
            level,
            config,
            TerminalMode::Stderr,
            ColorChoice::Auto,
        )],
        LogDestination::Both(path) => {
            let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
                level,
                config.clone(),
                TerminalMode::Stderr,
                ColorChoice::Auto,
            )];
            if let Some(file_logger) = create_file_logger(&path, level, config) {
                loggers.push(file_logger);
            }
            loggers
        }
    };

    let _ = CombinedLogger::init(loggers);
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}

fn create_file_logger(
    path: &Path,
    level: LevelFilter,
    config: Config,
) -> Option<Box<WriteLogger<File>>> {
    match File::create(path) {
        Ok(file) => Some(WriteLogger::new(level, config, file)),
        Err(err) => {
            eprintln!("Warning: Could not create log file at {:?}: {}", path, err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_prefix_is_empty_until_a_run_starts() {
        std::thread::spawn(|| {
            assert_eq!(current_run_id(), 0);
            assert_eq!(run_prefix(), "");
            set_run_id(7);
            assert_eq!(current_run_id(), 7);
            assert_eq!(run_prefix(), "[run 7] ");
        })
        .join()
        .unwrap();
    }

    #[test]
    fn run_id_is_per_thread() {
        set_run_id(3);
        let other = std::thread::spawn(current_run_id).join().unwrap();
        assert_eq!(other, 0);
        assert_eq!(current_run_id(), 3);
    }

    #[test]
    fn macros_expand_without_a_logger() {
        initialize_for_tests();
        let stage = "current";
        scout_info!("stage {stage} started");
        scout_debug!("{} records", 20);
        scout_warn!("ignored");
    }

    #[test]
    fn file_logger_reports_unwritable_path() {
        let temp = tempfile::TempDir::new().unwrap();
        let missing = temp.path().join("missing").join("scout.log");
        let logger = create_file_logger(&missing, LevelFilter::Info, build_config());
        assert!(logger.is_none());
    }
}
