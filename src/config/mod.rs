//! Configuration layer for WLAN-IFACE.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - Values explicitly passed via command line
//! 2. **TOML config file** - Values from the configuration file
//! 3. **Built-in defaults** - Hardcoded default values
//!
//! For the backend list, CLI `--backend` flags **replace** the TOML list
//! entirely (not merged).
//!
//! # Boolean Flag Semantics
//!
//! `--verbose` and `general.debug` use OR semantics: if either is `true`,
//! debug logging is enabled.

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;


pub use cli::{BackendArg, Cli, Command};
pub use error::{ConfigError, field};
pub use toml::{TomlConfig, default_config_template};
pub use validated::{ValidatedConfig, write_default_config};
