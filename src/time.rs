//! Blocking delay abstraction for testability.
//!
//! This module provides a [`Sleeper`] trait that allows injecting mock
//! sleepers in tests while using real thread sleeps in production.

use std::time::Duration;

/// Abstraction over a blocking wait.
///
/// The interface controller waits for a grace period between issuing a
/// link-up command and reading back the link state. Tests substitute an
/// implementation that records the requested duration instead of sleeping.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use wlan_iface::time::{Sleeper, ThreadSleeper};
///
/// ThreadSleeper.sleep(Duration::ZERO);
/// ```
pub trait Sleeper: Send + Sync {
    /// Blocks the calling thread for `duration`.
    fn sleep(&self, duration: Duration);
}

/// Production sleeper backed by [`std::thread::sleep`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}

impl<T: Sleeper + ?Sized> Sleeper for &T {
    fn sleep(&self, duration: Duration) {
        (**self).sleep(duration);
    }
}
