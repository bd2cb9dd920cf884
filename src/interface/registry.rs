//! Read-only access to the OS interface registry.

use std::fmt;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Default location of the Linux interface registry.
pub const DEFAULT_SYSFS_ROOT: &str = "/sys/class/net";

/// Per-interface entry whose presence marks an 802.11 device.
const WIRELESS_MARKER: &str = "wireless";

/// Per-interface file holding the operational state token.
const OPERSTATE_FILE: &str = "operstate";

/// Per-interface file holding the hardware address.
const ADDRESS_FILE: &str = "address";

/// Operational link state as reported by the kernel.
///
/// Only `up` and `unknown` count as usable. Many drivers never report
/// carrier for wireless links and stay in `unknown` while working.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OperState {
    /// Link is operational.
    Up,
    /// Link is down.
    Down,
    /// Driver does not report state.
    Unknown,
    /// Any other token (`dormant`, `lowerlayerdown`, ...), preserved for logging.
    Other(String),
}

impl OperState {
    /// Parses a raw operstate token. Surrounding whitespace is ignored.
    #[must_use]
    pub fn parse(token: &str) -> Self {
        match token.trim() {
            "up" => Self::Up,
            "down" => Self::Down,
            "unknown" => Self::Unknown,
            other => Self::Other(other.to_string()),
        }
    }

    /// Returns true for `up` and `unknown`.
    #[must_use]
    pub const fn is_usable(&self) -> bool {
        matches!(self, Self::Up | Self::Unknown)
    }
}

impl fmt::Display for OperState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => f.write_str("up"),
            Self::Down => f.write_str("down"),
            Self::Unknown => f.write_str("unknown"),
            Self::Other(token) => f.write_str(token),
        }
    }
}

impl Serialize for OperState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Error type for registry reads.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A registry entry could not be read.
    #[error("Failed to read '{}': {source}", path.display())]
    Read {
        /// Path that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },
}

impl RegistryError {
    fn read(path: &Path, source: io::Error) -> Self {
        Self::Read {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Trait for querying interface metadata.
///
/// Every call goes to the OS; nothing is cached, so two calls for the
/// same name may observe different states.
///
/// # Design
///
/// - The sysfs implementation is [`SysfsRegistry`]
/// - Enables dependency injection for testing with mock implementations
pub trait InterfaceRegistry: Send + Sync {
    /// Returns true if an interface with this name is registered.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the registry cannot be queried.
    fn exists(&self, name: &str) -> Result<bool, RegistryError>;

    /// Returns true if the interface carries the wireless-capability marker.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the registry cannot be queried.
    fn is_wireless(&self, name: &str) -> Result<bool, RegistryError>;

    /// Reads the current operational state.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the state cannot be read.
    fn operational_state(&self, name: &str) -> Result<OperState, RegistryError>;

    /// Reads the raw hardware address string.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the address cannot be read.
    fn hardware_address(&self, name: &str) -> Result<String, RegistryError>;

    /// Lists every registered interface name, sorted.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the registry directory is unreadable.
    fn interfaces(&self) -> Result<Vec<String>, RegistryError>;
}

impl<T: InterfaceRegistry + ?Sized> InterfaceRegistry for &T {
    fn exists(&self, name: &str) -> Result<bool, RegistryError> {
        (**self).exists(name)
    }

    fn is_wireless(&self, name: &str) -> Result<bool, RegistryError> {
        (**self).is_wireless(name)
    }

    fn operational_state(&self, name: &str) -> Result<OperState, RegistryError> {
        (**self).operational_state(name)
    }

    fn hardware_address(&self, name: &str) -> Result<String, RegistryError> {
        (**self).hardware_address(name)
    }

    fn interfaces(&self) -> Result<Vec<String>, RegistryError> {
        (**self).interfaces()
    }
}

/// Registry backed by `/sys/class/net` (or another root with the same layout).
///
/// # Example
///
/// ```no_run
/// use wlan_iface::interface::{InterfaceRegistry, SysfsRegistry};
///
/// let registry = SysfsRegistry::default();
/// for name in registry.interfaces().unwrap_or_default() {
///     println!("{name}: wireless={:?}", registry.is_wireless(&name));
/// }
/// ```
#[derive(Debug, Clone)]
pub struct SysfsRegistry {
    root: PathBuf,
}

impl Default for SysfsRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_SYSFS_ROOT)
    }
}

impl SysfsRegistry {
    /// Creates a registry rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the registry root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves the directory for `name`, rejecting names that would
    /// escape the registry root.
    fn entry(&self, name: &str) -> Option<PathBuf> {
        let valid = !name.is_empty() && name != "." && name != ".." && !name.contains('/');
        valid.then(|| self.root.join(name))
    }

    fn read_entry_file(&self, name: &str, file: &str) -> Result<String, RegistryError> {
        let Some(dir) = self.entry(name) else {
            let path = self.root.join(name);
            return Err(RegistryError::read(
                &path,
                io::Error::new(ErrorKind::InvalidInput, "invalid interface name"),
            ));
        };
        let path = dir.join(file);
        std::fs::read_to_string(&path).map_err(|e| RegistryError::read(&path, e))
    }

    fn entry_has(&self, name: &str, child: Option<&str>) -> Result<bool, RegistryError> {
        let Some(dir) = self.entry(name) else {
            return Ok(false);
        };
        let path = child.map_or_else(|| dir.clone(), |c| dir.join(c));
        path.try_exists().map_err(|e| RegistryError::read(&path, e))
    }
}

impl InterfaceRegistry for SysfsRegistry {
    fn exists(&self, name: &str) -> Result<bool, RegistryError> {
        self.entry_has(name, None)
    }

    fn is_wireless(&self, name: &str) -> Result<bool, RegistryError> {
        self.entry_has(name, Some(WIRELESS_MARKER))
    }

    fn operational_state(&self, name: &str) -> Result<OperState, RegistryError> {
        self.read_entry_file(name, OPERSTATE_FILE)
            .map(|raw| OperState::parse(&raw))
    }

    fn hardware_address(&self, name: &str) -> Result<String, RegistryError> {
        self.read_entry_file(name, ADDRESS_FILE)
            .map(|raw| raw.trim().to_string())
    }

    fn interfaces(&self) -> Result<Vec<String>, RegistryError> {
        let entries =
            std::fs::read_dir(&self.root).map_err(|e| RegistryError::read(&self.root, e))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| RegistryError::read(&self.root, e))?;
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}
