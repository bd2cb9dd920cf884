//! Hardware address handling.
//!
//! This module provides [`NetworkAddress`], a validated 48-bit hardware
//! address with a canonical text form and an integer value.

mod address;

pub use address::{AddressError, NetworkAddress};
