//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::interface::LinkBackend;

use super::cli::{Cli, Command};
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// The function validates all inputs and returns errors for invalid configurations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedConfig {
    /// Wait between a successful link-up and the state readback
    pub grace_period: Duration,

    /// Link backends in priority order (never empty, no duplicates)
    pub backends: Vec<LinkBackend>,

    /// Interface registry root
    pub sysfs_root: PathBuf,

    /// Wireless listing tool
    pub list_tool: String,

    /// Data directory root
    pub data_dir: PathBuf,

    /// Verbose logging enabled
    pub verbose: bool,

    /// Subcommand to execute
    pub command: Command,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let backends = self
            .backends
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");

        write!(
            f,
            "Config {{ grace_period: {}ms, backends: [{}], sysfs_root: {}, list_tool: {}, \
             data_dir: {}, verbose: {} }}",
            self.grace_period.as_millis(),
            backends,
            self.sysfs_root.display(),
            self.list_tool,
            self.data_dir.display(),
            self.verbose,
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values, which take
    /// precedence over built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The grace period exceeds the allowed maximum
    /// - A backend name is unknown, repeated, or the list is empty
    /// - The listing tool, registry root or data directory is empty
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let grace_period = Self::resolve_grace_period(cli, toml)?;
        let backends = Self::resolve_backends(cli, toml)?;
        let sysfs_root = Self::resolve_sysfs_root(cli, toml)?;
        let list_tool = Self::resolve_list_tool(cli, toml)?;
        let data_dir = Self::resolve_data_dir(cli, toml)?;

        // Flags only enable: true in either source wins
        let verbose = cli.verbose || toml.is_some_and(|t| t.general.debug);

        Ok(Self {
            grace_period,
            backends,
            sysfs_root,
            list_tool,
            data_dir,
            verbose,
            command: cli.command.clone(),
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    fn resolve_grace_period(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<Duration, ConfigError> {
        // Priority: CLI explicit > TOML > default. Zero is allowed.
        let millis = cli
            .grace_period_ms
            .or_else(|| toml.and_then(|t| t.interface.grace_period_ms))
            .unwrap_or(defaults::GRACE_PERIOD_MS);

        if millis > defaults::MAX_GRACE_PERIOD_MS {
            return Err(ConfigError::InvalidDuration {
                field: field::GRACE_PERIOD,
                reason: format!("must be at most {}ms", defaults::MAX_GRACE_PERIOD_MS),
            });
        }

        Ok(Duration::from_millis(millis))
    }

    fn resolve_backends(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<Vec<LinkBackend>, ConfigError> {
        // CLI backends replace TOML backends entirely
        let backends = if !cli.backends.is_empty() {
            cli.backends.iter().copied().map(LinkBackend::from).collect()
        } else if let Some(names) = toml.and_then(|t| t.interface.backends.as_ref()) {
            names
                .iter()
                .map(|name| parse_backend(name))
                .collect::<Result<Vec<_>, _>>()?
        } else {
            return Ok(defaults::backends());
        };

        validate_backends(&backends)?;
        Ok(backends)
    }

    fn resolve_sysfs_root(cli: &Cli, toml: Option<&TomlConfig>) -> Result<PathBuf, ConfigError> {
        let root = cli.sysfs_root.clone().unwrap_or_else(|| {
            toml.and_then(|t| t.interface.sysfs_root.as_deref())
                .map_or_else(|| PathBuf::from(defaults::SYSFS_ROOT), PathBuf::from)
        });

        if root.as_os_str().is_empty() {
            return Err(ConfigError::Empty {
                field: field::SYSFS_ROOT,
            });
        }

        Ok(root)
    }

    fn resolve_list_tool(cli: &Cli, toml: Option<&TomlConfig>) -> Result<String, ConfigError> {
        let tool = cli
            .list_tool
            .as_deref()
            .or_else(|| toml.and_then(|t| t.interface.list_tool.as_deref()))
            .unwrap_or(defaults::LIST_TOOL)
            .trim();

        if tool.is_empty() {
            return Err(ConfigError::Empty {
                field: field::LIST_TOOL,
            });
        }

        Ok(tool.to_string())
    }

    fn resolve_data_dir(cli: &Cli, toml: Option<&TomlConfig>) -> Result<PathBuf, ConfigError> {
        if let Some(ref path) = cli.data_dir {
            return non_empty_dir(path.clone());
        }

        toml.and_then(|t| t.paths.data_dir.as_deref())
            .map_or_else(|| Ok(defaults::data_dir()), |raw| non_empty_dir(expand_tilde(raw)))
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

// Helper functions

fn parse_backend(name: &str) -> Result<LinkBackend, ConfigError> {
    name.parse::<LinkBackend>()
        .map_err(|_| ConfigError::InvalidBackend {
            value: name.to_string(),
        })
}

fn validate_backends(backends: &[LinkBackend]) -> Result<(), ConfigError> {
    if backends.is_empty() {
        return Err(ConfigError::EmptyBackends);
    }

    for (i, backend) in backends.iter().enumerate() {
        if backends[..i].contains(backend) {
            return Err(ConfigError::DuplicateBackend { backend: *backend });
        }
    }

    Ok(())
}

fn non_empty_dir(path: PathBuf) -> Result<PathBuf, ConfigError> {
    if path.as_os_str().is_empty() {
        return Err(ConfigError::Empty {
            field: field::DATA_DIR,
        });
    }
    Ok(path)
}

/// Expands a leading `~` to the home directory. Left untouched when the
/// home directory is unknown or the tilde names another user.
fn expand_tilde(raw: &str) -> PathBuf {
    let rest = match raw.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest.trim_start_matches('/'),
        _ => return PathBuf::from(raw),
    };

    match dirs::home_dir() {
        Some(home) if rest.is_empty() => home,
        Some(home) => home.join(rest),
        None => PathBuf::from(raw),
    }
}
