//! Error types for configuration parsing and validation.

use std::path::PathBuf;

use thiserror::Error;

use crate::interface::LinkBackend;

/// Error type for configuration operations.
///
/// Covers errors from parsing, validation, and file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("Failed to read config file '{}': {source}", path.display())]
    FileRead {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("Failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to write configuration file (for init command).
    #[error("Failed to write config file '{}': {source}", path.display())]
    FileWrite {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Invalid duration value (too large).
    #[error("Invalid duration for {field}: {reason}")]
    InvalidDuration {
        /// Name of the field
        field: &'static str,
        /// Reason for invalidity
        reason: String,
    },

    /// Unknown link backend name.
    #[error("Invalid backend '{value}': expected ip or ifconfig")]
    InvalidBackend {
        /// The invalid value provided
        value: String,
    },

    /// Backend list is empty.
    #[error("At least one link backend must be configured")]
    EmptyBackends,

    /// Backend listed more than once.
    #[error("Backend '{backend}' is listed more than once")]
    DuplicateBackend {
        /// The repeated backend
        backend: LinkBackend,
    },

    /// A string field is empty.
    #[error("Field {field} must not be empty")]
    Empty {
        /// Name of the field
        field: &'static str,
    },
}

/// Well-known field names used in errors.
///
/// Use these constants for compile-time safety when matching field names.
pub mod field {
    /// The readback grace period.
    pub const GRACE_PERIOD: &str = "grace_period_ms";
    /// The listing tool.
    pub const LIST_TOOL: &str = "list_tool";
    /// The registry root.
    pub const SYSFS_ROOT: &str = "sysfs_root";
    /// The data directory.
    pub const DATA_DIR: &str = "data_dir";
}
