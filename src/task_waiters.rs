// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// Registry of async tasks suspended on a GuardedValue.
// The registry lives inside the value's mutex: every method here assumes
// the caller holds that lock. Wakers handed back by `take_one`/`take_all`
// must be woken only after the lock is released.

use std::task::Waker;

use slab::Slab;

struct Slot {
    waker: Option<Waker>,
    // Set once a notify has taken this slot's waker and not yet been
    // consumed by the owning future.
    notified: bool,
}

/// Parked task wakers, keyed by the slab index held in each `WaitFuture`.
pub(crate) struct TaskWaiters {
    slots: Slab<Slot>,
}

impl TaskWaiters {
    pub(crate) fn new() -> Self {
        Self { slots: Slab::new() }
    }

    /// Number of registered (pending) task waiters.
    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    /// Register `waker` under `key`, or under a fresh key when `key` is
    /// `None`. Re-registering clears the notified mark, since the owner
    /// has observed the wake and gone back to sleep.
    pub(crate) fn register(&mut self, key: Option<usize>, waker: &Waker) -> usize {
        if let Some(key) = key {
            if let Some(slot) = self.slots.get_mut(key) {
                slot.notified = false;
                match &slot.waker {
                    Some(current) if current.will_wake(waker) => {}
                    _ => slot.waker = Some(waker.clone()),
                }
                return key;
            }
        }
        self.slots.insert(Slot {
            waker: Some(waker.clone()),
            notified: false,
        })
    }

    /// Drop a registration. Returns `true` if the slot had been handed a
    /// wake that its owner never consumed.
    pub(crate) fn remove(&mut self, key: usize) -> bool {
        self.slots.try_remove(key).is_some_and(|slot| slot.notified)
    }

    /// Pick one waiting task that has not been notified yet.
    pub(crate) fn take_one(&mut self) -> Option<Waker> {
        self.slots.iter_mut().find_map(|(_, slot)| {
            if slot.notified {
                return None;
            }
            let waker = slot.waker.take()?;
            slot.notified = true;
            Some(waker)
        })
    }

    /// Take the wakers of every waiting task.
    pub(crate) fn take_all(&mut self) -> Vec<Waker> {
        self.slots
            .iter_mut()
            .filter_map(|(_, slot)| {
                let waker = slot.waker.take()?;
                slot.notified = true;
                Some(waker)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use futures::task::noop_waker;

    #[test]
    fn register_reuses_key() {
        let mut tasks = TaskWaiters::new();
        let waker = noop_waker();
        let key = tasks.register(None, &waker);
        assert_eq!(tasks.register(Some(key), &waker), key);
        assert_eq!(tasks.len(), 1);
    }

    #[test]
    fn take_one_skips_notified_slots() {
        let mut tasks = TaskWaiters::new();
        let waker = noop_waker();
        let a = tasks.register(None, &waker);
        let b = tasks.register(None, &waker);

        assert!(tasks.take_one().is_some());
        assert!(tasks.take_one().is_some());
        assert!(tasks.take_one().is_none());

        // Both were handed a wake nobody consumed.
        assert!(tasks.remove(a));
        assert!(tasks.remove(b));
        assert_eq!(tasks.len(), 0);
    }

    #[test]
    fn reregister_clears_notified() {
        let mut tasks = TaskWaiters::new();
        let waker = noop_waker();
        let key = tasks.register(None, &waker);
        assert_eq!(tasks.take_all().len(), 1);
        tasks.register(Some(key), &waker);
        assert!(!tasks.remove(key));
    }

    #[test]
    fn remove_unknown_key() {
        let mut tasks = TaskWaiters::new();
        assert!(!tasks.remove(7));
    }
}
