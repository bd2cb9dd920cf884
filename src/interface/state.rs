//! Read-only usability checks for a single interface.

use serde::Serialize;

use super::registry::{InterfaceRegistry, OperState, RegistryError};
use crate::network::NetworkAddress;

/// Point-in-time view of one interface.
///
/// Values are read once when the status is built and never refreshed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterfaceStatus {
    /// Interface name.
    pub name: String,
    /// Whether the interface carries the wireless-capability marker.
    pub wireless: bool,
    /// Operational state at the time of the read.
    pub state: OperState,
    /// Hardware address, if readable and well-formed.
    pub hardware_address: Option<NetworkAddress>,
}

impl InterfaceStatus {
    /// Returns true if the interface is wireless and its link is usable.
    #[must_use]
    pub const fn is_usable(&self) -> bool {
        self.wireless && self.state.is_usable()
    }
}

/// Answers existence, capability and operational-state questions.
///
/// Every query goes straight to the registry.
#[derive(Debug, Clone, Default)]
pub struct InterfaceStateChecker<R> {
    registry: R,
}

impl<R: InterfaceRegistry> InterfaceStateChecker<R> {
    /// Creates a checker over `registry`.
    #[must_use]
    pub const fn new(registry: R) -> Self {
        Self { registry }
    }

    /// Returns the underlying registry.
    #[must_use]
    pub const fn registry(&self) -> &R {
        &self.registry
    }

    /// Returns true if the interface exists, is wireless, and is `up` or `unknown`.
    ///
    /// Checks run in that order and stop at the first failure. Any read
    /// error makes the whole check false.
    #[must_use]
    pub fn is_usable(&self, name: &str) -> bool {
        match self.usable(name) {
            Ok(usable) => usable,
            Err(e) => {
                tracing::debug!("Usability check for {name} failed: {e}");
                false
            }
        }
    }

    fn usable(&self, name: &str) -> Result<bool, RegistryError> {
        if !self.registry.exists(name)? {
            tracing::debug!("{name}: not present");
            return Ok(false);
        }
        if !self.registry.is_wireless(name)? {
            tracing::debug!("{name}: no wireless capability");
            return Ok(false);
        }
        let state = self.registry.operational_state(name)?;
        tracing::debug!("{name}: operstate {state}");
        Ok(state.is_usable())
    }

    /// Returns true if the interface is registered.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the registry cannot be queried.
    pub fn exists(&self, name: &str) -> Result<bool, RegistryError> {
        self.registry.exists(name)
    }

    /// Reads the current operational state.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the state cannot be read.
    pub fn operational_state(&self, name: &str) -> Result<OperState, RegistryError> {
        self.registry.operational_state(name)
    }

    /// Builds a full status snapshot for `name`.
    ///
    /// Returns `Ok(None)` if the interface does not exist. A missing or
    /// malformed hardware address does not fail the call.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if existence, capability or state cannot be read.
    pub fn status(&self, name: &str) -> Result<Option<InterfaceStatus>, RegistryError> {
        if !self.registry.exists(name)? {
            return Ok(None);
        }

        let wireless = self.registry.is_wireless(name)?;
        let state = self.registry.operational_state(name)?;
        let hardware_address = self
            .registry
            .hardware_address(name)
            .ok()
            .and_then(|raw| match NetworkAddress::new(&raw) {
                Ok(address) => Some(address),
                Err(e) => {
                    tracing::debug!("{name}: {e}");
                    None
                }
            });

        Ok(Some(InterfaceStatus {
            name: name.to_string(),
            wireless,
            state,
            hardware_address,
        }))
    }
}
