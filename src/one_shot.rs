// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// OneShotLatch: a boolean that starts false, becomes true once and stays
// true. Typical use is "worker finished initialising".

use std::future::Future;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::scalar::BoolGuardedValue;

/// A single-use gate. Waiters block until [`set`](Self::set) is called;
/// after that every wait returns immediately, forever.
///
/// There is no reset. Setting an already-set latch does nothing.
#[derive(Debug, Default)]
pub struct OneShotLatch {
    flag: BoolGuardedValue,
}

impl OneShotLatch {
    /// Create an unset latch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an unset latch labelled `name` for `Debug` and log output.
    pub fn named(name: &'static str) -> Self {
        Self {
            flag: BoolGuardedValue::named(name, false),
        }
    }

    /// Whether the latch has been set.
    pub fn is_set(&self) -> bool {
        self.flag.get()
    }

    /// Set the latch and wake every waiter.
    pub fn set(&self) {
        self.set_all();
    }

    /// Set the latch and wake one waiter.
    pub fn set_one(&self) {
        let was_set = self.flag.guarded().update_one(|flag| std::mem::replace(flag, true));
        self.log_transition(was_set);
    }

    /// Set the latch and wake every waiter.
    ///
    /// Always notifies, even when already set: an earlier `set_one` may
    /// have left other waiters parked.
    pub fn set_all(&self) {
        let was_set = self.flag.guarded().update_all(|flag| std::mem::replace(flag, true));
        self.log_transition(was_set);
    }

    fn log_transition(&self, was_set: bool) {
        if !was_set {
            debug!(label = self.flag.guarded().name(), "latch set");
        }
    }

    /// Block until the latch is set.
    pub fn wait(&self) {
        self.flag.wait_equal(true);
    }

    /// Block until the latch is set or `deadline` passes. Returns `false`
    /// on timeout.
    pub fn wait_until(&self, deadline: Instant) -> bool {
        self.flag.wait_until_equal(deadline, true)
    }

    /// Block until the latch is set or `timeout` elapses. Returns `false`
    /// on timeout.
    pub fn wait_for(&self, timeout: Duration) -> bool {
        self.flag.wait_for_equal(timeout, true)
    }

    /// Resolves once the latch is set.
    pub fn wait_async(&self) -> impl Future<Output = ()> + '_ {
        self.flag.wait_equal_async(true)
    }

    #[cfg(feature = "tokio")]
    pub fn wait_until_async(&self, deadline: Instant) -> impl Future<Output = bool> + '_ {
        self.flag.wait_until_equal_async(deadline, true)
    }

    #[cfg(feature = "tokio")]
    pub fn wait_for_async(&self, timeout: Duration) -> impl Future<Output = bool> + '_ {
        self.flag.wait_for_equal_async(timeout, true)
    }
}
