//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// General settings
    #[serde(default)]
    pub general: GeneralSection,

    /// Interface lifecycle settings
    #[serde(default)]
    pub interface: InterfaceSection,

    /// Filesystem locations
    #[serde(default)]
    pub paths: PathsSection,
}

/// General settings section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneralSection {
    /// Enable debug logging
    #[serde(default)]
    pub debug: bool,
}

/// Interface lifecycle section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InterfaceSection {
    /// Wait between link-up and readback, in milliseconds
    pub grace_period_ms: Option<u64>,

    /// Link backends in priority order: "ip", "ifconfig"
    pub backends: Option<Vec<String>>,

    /// Interface registry root
    pub sysfs_root: Option<String>,

    /// Wireless listing tool
    pub list_tool: Option<String>,
}

/// Filesystem locations section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PathsSection {
    /// Data directory (supports `~`)
    pub data_dir: Option<String>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# WLAN-IFACE Configuration File

[general]
# Enable debug logging (same as --verbose)
# debug = false

[interface]
# Wait between a successful link-up command and the state readback,
# in milliseconds (default: 1000, max: 60000)
grace_period_ms = 1000

# Link backends in priority order (default: ["ip", "ifconfig"])
# Note: CLI --backend flags REPLACE this list entirely (not merged)
# backends = ["ip", "ifconfig"]

# Interface registry root (default: /sys/class/net)
# sysfs_root = "/sys/class/net"

# Program used to list wireless interfaces (default: iwconfig)
# list_tool = "iwconfig"

[paths]
# Data directory for reports, sessions, pixiewps data and handshakes
# Default: platform local data directory + /wlan-iface
# data_dir = "~/.local/share/wlan-iface"
"#
    .to_string()
}
