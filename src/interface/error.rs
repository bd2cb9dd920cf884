//! Error types for interface lifecycle operations.

use thiserror::Error;

use super::backend::LinkBackend;
use super::registry::{OperState, RegistryError};

/// Why a lifecycle operation failed.
///
/// The boolean operations on [`InterfaceController`](super::InterfaceController)
/// collapse these into `false`; the `try_` variants return them unchanged.
#[derive(Debug, Error)]
pub enum LinkError {
    /// The interface is not present in the registry.
    #[error("Interface '{name}' not found")]
    NotFound {
        /// Requested interface name
        name: String,
    },

    /// The backend program is not installed.
    #[error("Backend '{backend}' is not available")]
    BackendUnavailable {
        /// Backend that was attempted
        backend: LinkBackend,
    },

    /// The backend ran but did not exit successfully.
    #[error("Backend '{backend}' failed (exit code: {})", .code.map_or_else(|| "none".to_string(), |c| c.to_string()))]
    BackendFailed {
        /// Backend that was attempted
        backend: LinkBackend,
        /// Exit code, if the process exited normally
        code: Option<i32>,
    },

    /// No backends are configured.
    #[error("No link backends configured")]
    NoBackends,

    /// A backend reported success but the link is not usable after the grace period.
    #[error("Interface '{name}' is '{state}' after bring-up")]
    StateUnconfirmed {
        /// Interface name
        name: String,
        /// State observed on readback
        state: OperState,
    },

    /// The registry could not be read.
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),
}
