// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// Tests for ScalarGuardedValue equality / inequality helpers.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use libcond::{BoolGuardedValue, GuardedValue, ScalarGuardedValue};

#[test]
fn set_one_and_set_all_store_value() {
    let s = ScalarGuardedValue::new(0);
    s.set_one(4);
    assert_eq!(s.get(), 4);
    s.set_all(9);
    assert_eq!(s.get(), 9);
}

#[test]
fn wait_equal_released_by_set_all() {
    let s = Arc::new(ScalarGuardedValue::new(0));

    let s2 = Arc::clone(&s);
    let waiter = thread::spawn(move || {
        s2.wait_equal(5);
        s2.get()
    });

    thread::sleep(Duration::from_millis(50));
    s.set_all(5);
    assert_eq!(waiter.join().unwrap(), 5);
}

#[test]
fn wait_unequal_released_by_set_all() {
    let s = Arc::new(ScalarGuardedValue::new(0));

    let s2 = Arc::clone(&s);
    let waiter = thread::spawn(move || s2.wait_unequal(0));

    thread::sleep(Duration::from_millis(50));
    s.set_all(5);
    waiter.join().unwrap();
}

#[test]
fn wait_equal_ignores_other_values() {
    let s = Arc::new(ScalarGuardedValue::new(0));

    let s2 = Arc::clone(&s);
    let waiter = thread::spawn(move || s2.wait_for_equal(Duration::from_secs(5), 3));

    for v in 1..=3 {
        thread::sleep(Duration::from_millis(10));
        s.set_one(v);
    }
    assert!(waiter.join().unwrap());
}

#[test]
fn equal_waits_time_out() {
    let s = ScalarGuardedValue::new(1);
    let start = Instant::now();
    assert!(!s.wait_for_equal(Duration::from_millis(30), 2));
    assert!(!s.wait_until_equal(Instant::now() + Duration::from_millis(30), 2));
    assert!(start.elapsed() >= Duration::from_millis(60));
}

#[test]
fn unequal_waits_time_out() {
    let s = ScalarGuardedValue::new(1);
    assert!(!s.wait_for_unequal(Duration::from_millis(30), 1));
    assert!(!s.wait_until_unequal(Instant::now() + Duration::from_millis(30), 1));
}

#[test]
fn satisfied_waits_return_immediately() {
    let s = ScalarGuardedValue::new('x');
    s.wait_equal('x');
    s.wait_unequal('y');
    assert!(s.wait_for_equal(Duration::ZERO, 'x'));
    assert!(s.wait_until_unequal(Instant::now(), 'y'));
}

#[test]
fn wait_until_unequal_released_before_deadline() {
    let s = Arc::new(ScalarGuardedValue::new(String::from("idle")));

    let s2 = Arc::clone(&s);
    let waiter = thread::spawn(move || {
        s2.wait_until_unequal(Instant::now() + Duration::from_secs(5), String::from("idle"))
    });

    thread::sleep(Duration::from_millis(30));
    s.set_one(String::from("busy"));
    assert!(waiter.join().unwrap());
    assert_eq!(s.get(), "busy");
}

#[test]
fn base_operations_reachable_through_guarded() {
    let s = ScalarGuardedValue::named("level", 10);
    assert_eq!(s.guarded().name(), Some("level"));

    let doubled = s.guarded().update_all(|v| {
        *v *= 2;
        *v
    });
    assert_eq!(doubled, 20);
    assert!(s.guarded().wait_for(Duration::from_millis(10), |v| *v > 15));

    let base: &GuardedValue<i32> = s.as_ref();
    assert_eq!(base.with(|v| *v), 20);
}

#[test]
fn bool_alias_and_defaults() {
    let mut b = BoolGuardedValue::default();
    assert!(!b.get());
    *b.get_mut() = true;
    assert!(b.into_inner());

    let s = ScalarGuardedValue::from(3u16);
    assert_eq!(s.with(|v| *v + 1), 4);
}
