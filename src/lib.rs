// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// Condition-guarded shared state.
// A value, a mutex and a condition signal bundled behind a closed API:
// mutate through update_one/update_all, block through predicate waits.
// Waits come in a blocking flavour for threads and an async flavour that
// suspends only the calling task.

mod task_waiters;

mod guarded;
pub use guarded::{GuardedValue, WaitFuture};

mod scalar;
pub use scalar::{BoolGuardedValue, ScalarGuardedValue};

mod one_shot;
pub use one_shot::OneShotLatch;
