// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// ScalarGuardedValue: a GuardedValue over a comparable T, with set/wait
// helpers phrased as "equal to" / "not equal to" a target value.

#[cfg(feature = "tokio")]
use std::future::Future;
use std::time::{Duration, Instant};

use crate::guarded::{GuardedValue, WaitFuture};

/// A [`GuardedValue`] over an equality-comparable value.
///
/// Holds the base primitive rather than extending it; the base is reachable
/// through [`guarded`](Self::guarded) for mutators and arbitrary predicates.
#[derive(Debug, Default)]
pub struct ScalarGuardedValue<T> {
    inner: GuardedValue<T>,
}

/// The common boolean case.
pub type BoolGuardedValue = ScalarGuardedValue<bool>;

impl<T: PartialEq> ScalarGuardedValue<T> {
    /// Create a scalar guarded value holding `value`.
    pub fn new(value: T) -> Self {
        Self {
            inner: GuardedValue::new(value),
        }
    }

    /// Create a scalar guarded value labelled `name` for `Debug` and log output.
    pub fn named(name: &'static str, value: T) -> Self {
        Self {
            inner: GuardedValue::named(name, value),
        }
    }

    /// The underlying guarded value.
    pub fn guarded(&self) -> &GuardedValue<T> {
        &self.inner
    }

    /// A copy of the current value, taken under the lock.
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.inner.get()
    }

    /// Run `f` on the current value while holding the lock.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.inner.with(f)
    }

    /// Mutable access without locking, through exclusive ownership.
    pub fn get_mut(&mut self) -> &mut T {
        self.inner.get_mut()
    }

    /// Consume the wrapper and return the stored value.
    pub fn into_inner(self) -> T {
        self.inner.into_inner()
    }

    /// Store `value` and wake one waiter.
    pub fn set_one(&self, value: T) {
        self.inner.update_one(|current| *current = value);
    }

    /// Store `value` and wake every waiter.
    pub fn set_all(&self, value: T) {
        self.inner.update_all(|current| *current = value);
    }

    /// Block until the stored value equals `value`.
    pub fn wait_equal(&self, value: T) {
        self.inner.wait(|current| *current == value);
    }

    /// Block until the stored value equals `value` or `deadline` passes.
    /// Returns `false` on timeout.
    pub fn wait_until_equal(&self, deadline: Instant, value: T) -> bool {
        self.inner.wait_until(deadline, |current| *current == value)
    }

    /// Block until the stored value equals `value` or `timeout` elapses.
    /// Returns `false` on timeout.
    pub fn wait_for_equal(&self, timeout: Duration, value: T) -> bool {
        self.inner.wait_for(timeout, |current| *current == value)
    }

    /// Block until the stored value differs from `value`.
    pub fn wait_unequal(&self, value: T) {
        self.inner.wait(|current| *current != value);
    }

    /// Block until the stored value differs from `value` or `deadline`
    /// passes. Returns `false` on timeout.
    pub fn wait_until_unequal(&self, deadline: Instant, value: T) -> bool {
        self.inner.wait_until(deadline, |current| *current != value)
    }

    /// Block until the stored value differs from `value` or `timeout`
    /// elapses. Returns `false` on timeout.
    pub fn wait_for_unequal(&self, timeout: Duration, value: T) -> bool {
        self.inner.wait_for(timeout, |current| *current != value)
    }

    /// Resolves once the stored value equals `value`.
    pub fn wait_equal_async(&self, value: T) -> WaitFuture<'_, T, impl FnMut(&T) -> bool> {
        self.inner.wait_async(move |current: &T| *current == value)
    }

    /// Resolves once the stored value differs from `value`.
    pub fn wait_unequal_async(&self, value: T) -> WaitFuture<'_, T, impl FnMut(&T) -> bool> {
        self.inner.wait_async(move |current: &T| *current != value)
    }

    #[cfg(feature = "tokio")]
    pub fn wait_until_equal_async(
        &self,
        deadline: Instant,
        value: T,
    ) -> impl Future<Output = bool> + '_ {
        self.inner
            .wait_until_async(deadline, move |current: &T| *current == value)
    }

    #[cfg(feature = "tokio")]
    pub fn wait_for_equal_async(
        &self,
        timeout: Duration,
        value: T,
    ) -> impl Future<Output = bool> + '_ {
        self.inner
            .wait_for_async(timeout, move |current: &T| *current == value)
    }

    #[cfg(feature = "tokio")]
    pub fn wait_until_unequal_async(
        &self,
        deadline: Instant,
        value: T,
    ) -> impl Future<Output = bool> + '_ {
        self.inner
            .wait_until_async(deadline, move |current: &T| *current != value)
    }

    #[cfg(feature = "tokio")]
    pub fn wait_for_unequal_async(
        &self,
        timeout: Duration,
        value: T,
    ) -> impl Future<Output = bool> + '_ {
        self.inner
            .wait_for_async(timeout, move |current: &T| *current != value)
    }
}

impl<T> AsRef<GuardedValue<T>> for ScalarGuardedValue<T> {
    fn as_ref(&self) -> &GuardedValue<T> {
        &self.inner
    }
}

impl<T: PartialEq> From<T> for ScalarGuardedValue<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}
