//! WLAN-IFACE: wireless interface lifecycle helper
//!
//! A library for finding wireless interfaces, bringing them up or down
//! through interchangeable system tools with state confirmation, and
//! normalizing hardware addresses.

pub mod config;
pub mod interface;
pub mod network;
pub mod system;
pub mod time;
