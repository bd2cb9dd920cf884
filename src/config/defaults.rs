//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::path::PathBuf;
use std::time::Duration;

use crate::interface::{DEFAULT_BACKENDS, DEFAULT_LIST_TOOL, DEFAULT_SYSFS_ROOT, LinkBackend};

/// Default grace period between link-up and readback, in milliseconds.
pub const GRACE_PERIOD_MS: u64 = 1000;

/// Upper bound for the grace period, in milliseconds.
pub const MAX_GRACE_PERIOD_MS: u64 = 60_000;

/// Default interface registry root.
pub const SYSFS_ROOT: &str = DEFAULT_SYSFS_ROOT;

/// Default wireless listing tool.
pub const LIST_TOOL: &str = DEFAULT_LIST_TOOL;

/// Directory name created under the platform data directory.
pub const DATA_DIR_NAME: &str = "wlan-iface";

/// Default grace period as Duration.
#[must_use]
pub const fn grace_period() -> Duration {
    Duration::from_millis(GRACE_PERIOD_MS)
}

/// Default backend priority.
#[must_use]
pub fn backends() -> Vec<LinkBackend> {
    DEFAULT_BACKENDS.to_vec()
}

/// Default data directory: `<data_local_dir>/wlan-iface`, or a directory of
/// that name under the working directory when the platform has none.
#[must_use]
pub fn data_dir() -> PathBuf {
    dirs::data_local_dir().map_or_else(
        || PathBuf::from(DATA_DIR_NAME),
        |base| base.join(DATA_DIR_NAME),
    )
}
