// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// GuardedValue: a value, the mutex that protects it and the condition that
// announces its changes, bundled so callers cannot get the pattern wrong.
//
// Threads block on a parking_lot condvar. Async tasks never touch the
// condvar; they park their wakers in a TaskWaiters registry kept under the
// same mutex, so one update call serves both kinds of waiter.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};
use tracing::trace;

use crate::task_waiters::TaskWaiters;

struct State<T> {
    value: T,
    tasks: TaskWaiters,
}

/// A value shared between threads and async tasks, together with the mutex
/// and condition signal needed to wait for it to change.
///
/// All mutation goes through [`update_one`](Self::update_one) or
/// [`update_all`](Self::update_all), which lock, run the mutator, unlock and
/// then wake waiters. All conditional blocking goes through the predicate
/// waits. The lock itself is never exposed.
///
/// `GuardedValue` is deliberately not `Clone`. Share it with `Arc` or by
/// reference. Every wait borrows `self`, so the value cannot be dropped
/// while anyone is waiting on it.
///
/// From async code use the `*_async` waits: the blocking ones park the
/// whole OS thread.
pub struct GuardedValue<T> {
    state: Mutex<State<T>>,
    cond: Condvar,
    name: Option<&'static str>,
}

impl<T> GuardedValue<T> {
    /// Create a guarded value holding `value`.
    pub fn new(value: T) -> Self {
        Self {
            state: Mutex::new(State {
                value,
                tasks: TaskWaiters::new(),
            }),
            cond: Condvar::new(),
            name: None,
        }
    }

    /// Create a guarded value with a label that shows up in `Debug` output
    /// and in trace events.
    pub fn named(name: &'static str, value: T) -> Self {
        Self {
            name: Some(name),
            ..Self::new(value)
        }
    }

    /// The label given to [`named`](Self::named), if any.
    pub fn name(&self) -> Option<&'static str> {
        self.name
    }

    /// A copy of the current value, taken under the lock.
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.state.lock().value.clone()
    }

    /// Run `f` on the current value while holding the lock.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.state.lock().value)
    }

    /// Mutable access without locking. Exclusive ownership guarantees
    /// nobody else is reading, writing or waiting.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.state.get_mut().value
    }

    /// Consume the guarded value and return what it held.
    pub fn into_inner(self) -> T {
        self.state.into_inner().value
    }

    /// Lock, run `mutator` on the value, unlock, then wake one waiter.
    ///
    /// A parked thread is preferred; if none is parked, one suspended task
    /// is woken instead. Use [`update_all`](Self::update_all) when waiters
    /// may be waiting on different predicates.
    pub fn update_one<R>(&self, mutator: impl FnOnce(&mut T) -> R) -> R {
        let ret = mutator(&mut self.state.lock().value);
        self.notify_one();
        ret
    }

    /// Lock, run `mutator` on the value, unlock, then wake every waiter.
    pub fn update_all<R>(&self, mutator: impl FnOnce(&mut T) -> R) -> R {
        let ret = mutator(&mut self.state.lock().value);
        self.notify_all();
        ret
    }

    /// Block the calling thread until `pred` holds for the value.
    ///
    /// Returns immediately if it already holds. The predicate is evaluated
    /// under the lock and re-evaluated on every wakeup.
    pub fn wait<F>(&self, mut pred: F)
    where
        F: FnMut(&T) -> bool,
    {
        let mut state = self.state.lock();
        while !pred(&state.value) {
            self.cond.wait(&mut state);
        }
    }

    /// Block until `pred` holds or `deadline` passes.
    ///
    /// Returns `true` if the predicate held before the deadline, or when it
    /// was checked one last time after the timed wait expired.
    pub fn wait_until<F>(&self, deadline: Instant, mut pred: F) -> bool
    where
        F: FnMut(&T) -> bool,
    {
        let mut state = self.state.lock();
        while !pred(&state.value) {
            if self.cond.wait_until(&mut state, deadline).timed_out() {
                let satisfied = pred(&state.value);
                trace!(label = self.name, satisfied, "wait_until: deadline reached");
                return satisfied;
            }
        }
        true
    }

    /// Block until `pred` holds or `timeout` elapses.
    ///
    /// The deadline is fixed once, on entry; wakeups do not extend it. A
    /// timeout too large to represent as an `Instant` waits without bound.
    pub fn wait_for<F>(&self, timeout: Duration, pred: F) -> bool
    where
        F: FnMut(&T) -> bool,
    {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => self.wait_until(deadline, pred),
            None => {
                self.wait(pred);
                true
            }
        }
    }

    /// A future that resolves once `pred` holds for the value.
    ///
    /// Waiting suspends only the awaiting task. Dropping the future before
    /// it resolves withdraws it cleanly.
    pub fn wait_async<F>(&self, pred: F) -> WaitFuture<'_, T, F>
    where
        F: FnMut(&T) -> bool,
    {
        WaitFuture {
            guarded: self,
            pred,
            key: None,
        }
    }

    /// Async counterpart of [`wait_until`](Self::wait_until).
    ///
    /// # Panics
    /// Panics when polled outside a Tokio runtime with the time driver
    /// enabled.
    #[cfg(feature = "tokio")]
    pub async fn wait_until_async<F>(&self, deadline: Instant, mut pred: F) -> bool
    where
        F: FnMut(&T) -> bool,
    {
        let deadline = tokio::time::Instant::from_std(deadline);
        let outcome = tokio::time::timeout_at(deadline, self.wait_async(&mut pred)).await;
        if outcome.is_ok() {
            return true;
        }
        let satisfied = self.with(|value| pred(value));
        trace!(label = self.name, satisfied, "wait_until_async: deadline reached");
        satisfied
    }

    /// Async counterpart of [`wait_for`](Self::wait_for).
    ///
    /// # Panics
    /// Panics when polled outside a Tokio runtime with the time driver
    /// enabled.
    #[cfg(feature = "tokio")]
    pub async fn wait_for_async<F>(&self, timeout: Duration, pred: F) -> bool
    where
        F: FnMut(&T) -> bool,
    {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => self.wait_until_async(deadline, pred).await,
            None => {
                self.wait_async(pred).await;
                true
            }
        }
    }

    /// Number of async tasks currently suspended on this value.
    pub fn task_waiters(&self) -> usize {
        self.state.lock().tasks.len()
    }

    fn notify_one(&self) {
        if self.cond.notify_one() {
            return;
        }
        let waker = self.state.lock().tasks.take_one();
        if let Some(waker) = waker {
            waker.wake();
        }
    }

    fn notify_all(&self) {
        self.cond.notify_all();
        let wakers = self.state.lock().tasks.take_all();
        for waker in wakers {
            waker.wake();
        }
    }
}

impl<T: Default> Default for GuardedValue<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> From<T> for GuardedValue<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T: fmt::Debug> fmt::Debug for GuardedValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut d = f.debug_struct("GuardedValue");
        if let Some(name) = self.name {
            d.field("name", &name);
        }
        match self.state.try_lock() {
            Some(state) => d
                .field("value", &state.value)
                .field("task_waiters", &state.tasks.len()),
            None => d.field("value", &format_args!("<locked>")),
        };
        d.finish()
    }
}

// ---------------------------------------------------------------------------
// WaitFuture
// ---------------------------------------------------------------------------

/// Future returned by [`GuardedValue::wait_async`].
#[must_use = "futures do nothing unless polled"]
pub struct WaitFuture<'a, T, F> {
    guarded: &'a GuardedValue<T>,
    pred: F,
    key: Option<usize>,
}

// The predicate is only ever called through `&mut`, never pinned.
impl<T, F> Unpin for WaitFuture<'_, T, F> {}

impl<T, F> Future for WaitFuture<'_, T, F>
where
    F: FnMut(&T) -> bool,
{
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        let this = self.get_mut();
        let guarded = this.guarded;
        let mut state = guarded.state.lock();

        if (this.pred)(&state.value) {
            if let Some(key) = this.key.take() {
                state.tasks.remove(key);
            }
            return Poll::Ready(());
        }

        // Registered before the lock drops, so an update that makes the
        // predicate true is guaranteed to see this waker.
        this.key = Some(state.tasks.register(this.key, cx.waker()));
        Poll::Pending
    }
}

impl<T, F> Drop for WaitFuture<'_, T, F> {
    fn drop(&mut self) {
        let Some(key) = self.key.take() else {
            return;
        };
        let notified = self.guarded.state.lock().tasks.remove(key);
        if notified {
            // A notify-one picked this waiter; hand the wake on.
            trace!(label = self.guarded.name, "forwarding wake from dropped waiter");
            self.guarded.notify_one();
        }
    }
}

impl<T, F> fmt::Debug for WaitFuture<'_, T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WaitFuture")
            .field("name", &self.guarded.name)
            .field("registered", &self.key.is_some())
            .finish()
    }
}
