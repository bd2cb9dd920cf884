//! Wireless interface lifecycle.
//!
//! This module provides types and traits for:
//! - Querying the OS interface registry ([`InterfaceRegistry`], [`SysfsRegistry`])
//! - Running external commands ([`CommandRunner`], [`SystemRunner`])
//! - Link-state backends with fallback ([`LinkBackend`])
//! - Usability checks ([`InterfaceStateChecker`])
//! - Bringing links up and down with readback ([`InterfaceController`])
//! - Discovering and selecting wireless interfaces ([`InterfaceDiscovery`])

mod backend;
mod command;
mod controller;
pub mod discovery;
mod error;
mod registry;
mod state;

#[cfg(test)]
mod test_fixtures;

pub use backend::{DEFAULT_BACKENDS, LinkAction, LinkBackend};
pub use command::{CommandError, CommandOutput, CommandRunner, SystemRunner};
pub use controller::{DEFAULT_GRACE_PERIOD, InterfaceController};
pub use discovery::{DEFAULT_LIST_TOOL, InterfaceDiscovery};
pub use error::LinkError;
pub use registry::{DEFAULT_SYSFS_ROOT, InterfaceRegistry, OperState, RegistryError, SysfsRegistry};
pub use state::{InterfaceStateChecker, InterfaceStatus};
