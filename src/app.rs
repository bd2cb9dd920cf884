//! Application startup and utilities.
//!
//! This module contains exit codes, tracing setup, and error reporting
//! that support the main entry point.

use std::fmt::Display;
use std::process::ExitCode;

use tracing::Level;
use tracing_subscriber::EnvFilter;
use wlan_iface::config::ConfigError;

/// Application exit codes.
pub mod exit_code {
    use std::process::ExitCode;

    /// Success (exit code 0).
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// Configuration error (exit code 1) - invalid args, unreadable config file, etc.
    pub const CONFIG_ERROR: ExitCode = ExitCode::FAILURE;

    /// Runtime error (exit code 2) - link change failed, nothing to select, etc.
    ///
    /// Note: This is a function rather than a constant because `ExitCode::from()` is not `const fn`.
    pub fn runtime_error() -> ExitCode {
        ExitCode::from(2)
    }
}

/// Prints helpful hints for common configuration errors.
pub fn print_config_hint(error: &ConfigError) {
    match error {
        ConfigError::FileRead { .. } | ConfigError::TomlParse(_) => {
            eprintln!("\nRun 'wlan-iface init' to generate a configuration template.");
        }
        ConfigError::InvalidBackend { .. }
        | ConfigError::EmptyBackends
        | ConfigError::DuplicateBackend { .. } => {
            eprintln!("\nValid backends are 'ip' and 'ifconfig', each listed at most once.");
        }
        _ => {}
    }
}

/// Prints `[!] message` to stderr and returns the runtime failure code.
pub fn die(message: impl Display) -> ExitCode {
    eprintln!("[!] {message}");
    exit_code::runtime_error()
}

/// Sets up the tracing subscriber for logging.
pub fn setup_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
