//! Data directory bootstrap.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Error type for workspace setup.
#[derive(Debug, Error)]
pub enum SetupError {
    /// A directory could not be created.
    #[error("Failed to create directory '{}': {source}", path.display())]
    CreateDir {
        /// Directory that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },
}

/// Directory layout used by the auditing tool.
///
/// Created once by the hosting application via [`Workspace::init`] before
/// anything consumes the paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    /// Root data directory.
    pub data_dir: PathBuf,
    /// Attack reports.
    pub reports_dir: PathBuf,
    /// Resumable sessions.
    pub sessions_dir: PathBuf,
    /// Pixie-dust intermediate data.
    pub pixiewps_dir: PathBuf,
    /// Captured handshakes.
    pub handshakes_dir: PathBuf,
    /// System temporary directory.
    pub temp_dir: PathBuf,
}

impl Workspace {
    /// Computes the layout under `data_dir` without touching the filesystem.
    #[must_use]
    pub fn layout(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            reports_dir: data_dir.join("reports"),
            sessions_dir: data_dir.join("sessions"),
            pixiewps_dir: data_dir.join("pixiewps"),
            handshakes_dir: data_dir.join("handshakes"),
            temp_dir: std::env::temp_dir(),
            data_dir,
        }
    }

    /// Computes the layout and creates every directory. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::CreateDir`] for the first directory that cannot be created.
    pub fn init(data_dir: impl Into<PathBuf>) -> Result<Self, SetupError> {
        let workspace = Self::layout(data_dir);
        for dir in workspace.directories() {
            std::fs::create_dir_all(dir).map_err(|e| SetupError::CreateDir {
                path: dir.to_path_buf(),
                source: e,
            })?;
        }
        tracing::debug!("Workspace ready at {}", workspace.data_dir.display());
        Ok(workspace)
    }

    /// Returns the managed directories, data directory first.
    #[must_use]
    pub fn directories(&self) -> [&Path; 5] {
        [
            &self.data_dir,
            &self.reports_dir,
            &self.sessions_dir,
            &self.pixiewps_dir,
            &self.handshakes_dir,
        ]
    }
}
