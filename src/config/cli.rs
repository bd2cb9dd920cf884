//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::interface::LinkBackend;

/// WLAN-IFACE: wireless interface lifecycle helper
///
/// Finds wireless interfaces, brings them up or down with state
/// confirmation, and normalizes hardware addresses.
#[derive(Debug, Parser)]
#[command(name = "wlan-iface")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Interface registry root
    #[arg(long = "sysfs-root", global = true, value_name = "DIR")]
    pub sysfs_root: Option<PathBuf>,

    /// Wait between link-up and state readback, in milliseconds
    #[arg(long = "grace-period-ms", global = true, value_name = "MS")]
    pub grace_period_ms: Option<u64>,

    /// Link backend in priority order (can be specified multiple times)
    #[arg(long = "backend", value_enum, global = true)]
    pub backends: Vec<BackendArg>,

    /// Program used to list wireless interfaces
    #[arg(long = "list-tool", global = true, value_name = "PROGRAM")]
    pub list_tool: Option<String>,

    /// Data directory for reports, sessions and captures
    #[arg(long = "data-dir", global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Enable verbose (debug) logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for wlan-iface
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = "wlan-iface.toml")]
        output: PathBuf,
    },

    /// List wireless interfaces
    List,

    /// Pick a wireless interface
    Select {
        /// Prompt when more than one interface is found
        #[arg(long, short)]
        interactive: bool,
    },

    /// Bring an interface up and confirm it is usable
    Up {
        /// Interface name
        interface: String,
    },

    /// Bring an interface down
    Down {
        /// Interface name
        interface: String,
    },

    /// Show interface status
    Status {
        /// Interface name
        interface: String,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Normalize a hardware address
    Mac {
        /// Address such as aa:bb:cc:dd:ee:ff
        address: String,
    },

    /// Check privileges and required tools
    Check {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create the data directory layout
    Setup,
}

/// Link backend argument for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BackendArg {
    /// iproute2 `ip link set`
    #[value(name = "ip")]
    Ip,
    /// net-tools `ifconfig`
    #[value(name = "ifconfig")]
    Ifconfig,
}

impl From<BackendArg> for LinkBackend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Ip => Self::Ip,
            BackendArg::Ifconfig => Self::Ifconfig,
        }
    }
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }
}
