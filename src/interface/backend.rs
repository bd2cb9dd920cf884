//! Link-state command backends.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::command::{CommandError, CommandRunner};
use super::error::LinkError;

/// Administrative link action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkAction {
    /// Bring the link administratively up.
    Up,
    /// Bring the link administratively down.
    Down,
}

impl LinkAction {
    /// Returns the command-line token for this action.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

impl fmt::Display for LinkAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An external command capable of changing link state.
///
/// Backends are tried in priority order by the controller; the first one
/// that exits with status zero wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkBackend {
    /// iproute2: `ip link set <iface> <up|down>`.
    Ip,
    /// net-tools: `ifconfig <iface> <up|down>`.
    Ifconfig,
}

/// Default backend priority: iproute2 first, net-tools as legacy fallback.
pub const DEFAULT_BACKENDS: [LinkBackend; 2] = [LinkBackend::Ip, LinkBackend::Ifconfig];

impl LinkBackend {
    /// Returns the program this backend runs.
    #[must_use]
    pub const fn program(self) -> &'static str {
        match self {
            Self::Ip => "ip",
            Self::Ifconfig => "ifconfig",
        }
    }

    /// Builds the argument list for `action` on `iface`.
    #[must_use]
    pub fn args(self, iface: &str, action: LinkAction) -> Vec<&str> {
        match self {
            Self::Ip => vec!["link", "set", iface, action.as_str()],
            Self::Ifconfig => vec![iface, action.as_str()],
        }
    }

    /// Runs this backend once.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::BackendUnavailable`] when the program is absent
    /// and [`LinkError::BackendFailed`] when it cannot be started or exits
    /// non-zero.
    pub fn apply<C: CommandRunner + ?Sized>(
        self,
        runner: &C,
        iface: &str,
        action: LinkAction,
    ) -> Result<(), LinkError> {
        let output = runner
            .run(self.program(), &self.args(iface, action))
            .map_err(|e| match e {
                CommandError::NotFound { .. } => LinkError::BackendUnavailable { backend: self },
                CommandError::Spawn { .. } => LinkError::BackendFailed {
                    backend: self,
                    code: None,
                },
            })?;

        if output.success() {
            Ok(())
        } else {
            tracing::debug!(
                "{} exited with {:?}: {}",
                self.program(),
                output.code,
                output.output.trim()
            );
            Err(LinkError::BackendFailed {
                backend: self,
                code: output.code,
            })
        }
    }
}

impl fmt::Display for LinkBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.program())
    }
}

impl FromStr for LinkBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ip" | "iproute2" => Ok(Self::Ip),
            "ifconfig" | "net-tools" => Ok(Self::Ifconfig),
            other => Err(other.to_string()),
        }
    }
}
