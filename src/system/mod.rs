//! Host-level collaborators of the interface core.
//!
//! This module provides:
//! - Platform probes: Android detection, root check, required tools ([`platform`])
//! - Workspace directory bootstrap ([`Workspace`])

pub mod platform;
mod workspace;

pub use platform::{AndroidArch, PlatformReport};
pub use workspace::{SetupError, Workspace};
