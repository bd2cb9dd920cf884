//! Link-state mutation with backend fallback and readback confirmation.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use super::backend::{DEFAULT_BACKENDS, LinkAction, LinkBackend};
use super::command::CommandRunner;
use super::error::LinkError;
use super::registry::InterfaceRegistry;
use super::state::InterfaceStateChecker;
use crate::time::{Sleeper, ThreadSleeper};

/// Default wait between a successful link-up command and the state readback.
pub const DEFAULT_GRACE_PERIOD: Duration = Duration::from_secs(1);

/// Brings interfaces administratively up or down.
///
/// # Bring-up protocol
///
/// 1. The interface must exist; otherwise no backend is run.
/// 2. Backends are tried in priority order until one exits with status zero.
/// 3. The controller blocks for the grace period.
/// 4. The operational state is read back; only `up` or `unknown` counts
///    as success. A zero exit status alone is not trusted.
///
/// Bring-down runs the same existence check and backend fallback but
/// trusts the exit status without a readback.
///
/// Lifecycle operations on the same interface name are serialized; operations
/// on different names do not block each other.
///
/// # Example
///
/// ```no_run
/// use wlan_iface::interface::{InterfaceController, SysfsRegistry, SystemRunner};
///
/// let controller = InterfaceController::new(SysfsRegistry::default(), SystemRunner);
/// if !controller.bring_up("wlan0") {
///     eprintln!("wlan0 did not come up");
/// }
/// ```
pub struct InterfaceController<R, C, S = ThreadSleeper> {
    checker: InterfaceStateChecker<R>,
    runner: C,
    sleeper: S,
    backends: Vec<LinkBackend>,
    grace_period: Duration,
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl<R, C> InterfaceController<R, C, ThreadSleeper>
where
    R: InterfaceRegistry,
    C: CommandRunner,
{
    /// Creates a controller with the default backends and grace period.
    #[must_use]
    pub fn new(registry: R, runner: C) -> Self {
        Self {
            checker: InterfaceStateChecker::new(registry),
            runner,
            sleeper: ThreadSleeper,
            backends: DEFAULT_BACKENDS.to_vec(),
            grace_period: DEFAULT_GRACE_PERIOD,
            locks: Mutex::new(HashMap::new()),
        }
    }
}

impl<R, C, S> InterfaceController<R, C, S>
where
    R: InterfaceRegistry,
    C: CommandRunner,
    S: Sleeper,
{
    /// Replaces the sleeper used for the grace period.
    #[must_use]
    pub fn with_sleeper<S2: Sleeper>(self, sleeper: S2) -> InterfaceController<R, C, S2> {
        InterfaceController {
            checker: self.checker,
            runner: self.runner,
            sleeper,
            backends: self.backends,
            grace_period: self.grace_period,
            locks: self.locks,
        }
    }

    /// Sets the backend priority order.
    #[must_use]
    pub fn with_backends(mut self, backends: impl IntoIterator<Item = LinkBackend>) -> Self {
        self.backends = backends.into_iter().collect();
        self
    }

    /// Sets the grace period waited before the bring-up readback.
    #[must_use]
    pub fn with_grace_period(mut self, grace_period: Duration) -> Self {
        self.grace_period = grace_period;
        self
    }

    /// Returns the configured backend order.
    #[must_use]
    pub fn backends(&self) -> &[LinkBackend] {
        &self.backends
    }

    /// Returns the configured grace period.
    #[must_use]
    pub const fn grace_period(&self) -> Duration {
        self.grace_period
    }

    /// Returns the state checker used for existence and readback.
    #[must_use]
    pub const fn checker(&self) -> &InterfaceStateChecker<R> {
        &self.checker
    }

    /// Brings `name` up and confirms it is usable.
    ///
    /// Returns `false` on any failure; see [`Self::try_bring_up`] for the reason.
    #[must_use]
    pub fn bring_up(&self, name: &str) -> bool {
        match self.try_bring_up(name) {
            Ok(()) => {
                tracing::info!("{name} is up");
                true
            }
            Err(e) => {
                tracing::warn!("Failed to bring {name} up: {e}");
                false
            }
        }
    }

    /// Brings `name` down.
    ///
    /// Returns `false` on any failure; see [`Self::try_bring_down`] for the reason.
    #[must_use]
    pub fn bring_down(&self, name: &str) -> bool {
        match self.try_bring_down(name) {
            Ok(()) => {
                tracing::info!("{name} is down");
                true
            }
            Err(e) => {
                tracing::warn!("Failed to bring {name} down: {e}");
                false
            }
        }
    }

    /// Brings `name` up, reporting why it failed.
    ///
    /// # Errors
    ///
    /// - [`LinkError::NotFound`] if the interface does not exist
    /// - [`LinkError::BackendUnavailable`] / [`LinkError::BackendFailed`] from the
    ///   last backend tried when none succeeded
    /// - [`LinkError::StateUnconfirmed`] if the readback is neither `up` nor `unknown`
    /// - [`LinkError::Registry`] if a registry read fails
    pub fn try_bring_up(&self, name: &str) -> Result<(), LinkError> {
        self.serialized(name, || self.bring_up_locked(name))
    }

    /// Brings `name` down, reporting why it failed.
    ///
    /// # Errors
    ///
    /// - [`LinkError::NotFound`] if the interface does not exist
    /// - [`LinkError::BackendUnavailable`] / [`LinkError::BackendFailed`] from the
    ///   last backend tried when none succeeded
    /// - [`LinkError::Registry`] if the existence check fails
    pub fn try_bring_down(&self, name: &str) -> Result<(), LinkError> {
        self.serialized(name, || {
            self.ensure_exists(name)?;
            self.apply(name, LinkAction::Down).map(|_| ())
        })
    }

    fn bring_up_locked(&self, name: &str) -> Result<(), LinkError> {
        self.ensure_exists(name)?;
        let backend = self.apply(name, LinkAction::Up)?;

        tracing::debug!(
            "{backend} brought {name} up, waiting {}ms before readback",
            self.grace_period.as_millis()
        );
        self.sleeper.sleep(self.grace_period);

        let state = self.checker.operational_state(name)?;
        tracing::debug!("{name} readback: {state}");
        if state.is_usable() {
            Ok(())
        } else {
            Err(LinkError::StateUnconfirmed {
                name: name.to_string(),
                state,
            })
        }
    }

    fn ensure_exists(&self, name: &str) -> Result<(), LinkError> {
        if self.checker.exists(name)? {
            Ok(())
        } else {
            Err(LinkError::NotFound {
                name: name.to_string(),
            })
        }
    }

    /// Runs backends in priority order, returning the first that succeeds.
    fn apply(&self, name: &str, action: LinkAction) -> Result<LinkBackend, LinkError> {
        let mut last_error = LinkError::NoBackends;

        for &backend in &self.backends {
            match backend.apply(&self.runner, name, action) {
                Ok(()) => return Ok(backend),
                Err(e) => {
                    tracing::debug!("{backend} {action} {name}: {e}");
                    last_error = e;
                }
            }
        }

        Err(last_error)
    }

    /// Runs `operation` while holding the lock for `name`.
    ///
    /// The lock entry is dropped from the map once no other caller holds it,
    /// so the map only contains names with an operation in progress.
    fn serialized<T>(&self, name: &str, operation: impl FnOnce() -> T) -> T {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(locks.entry(name.to_string()).or_default())
        };

        let result = {
            let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
            operation()
        };

        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        // One reference in the map, one here: nobody else is waiting.
        if Arc::strong_count(&lock) == 2 {
            locks.remove(name);
        }
        result
    }

    #[cfg(test)]
    fn tracked_locks(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
