//! Readiness signal: single-slot, coalescing wake semantics.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;
use thermolog_core::signal::ReadySignal;

#[test]
fn notifications_coalesce_into_one_pending_wake() {
    let signal = ReadySignal::new();
    for _ in 0..5 {
        signal.notify();
    }
    assert!(signal.try_wait());
    assert!(!signal.try_wait());
}

#[test]
fn notifier_closure_coalesces_too() {
    let signal = ReadySignal::new();
    let notify = signal.notifier();
    notify();
    notify();
    notify();
    assert!(signal.try_wait());
    assert!(!signal.try_wait());
}

#[test]
fn wait_clears_the_slot_for_the_next_notification() {
    let signal = ReadySignal::new();
    signal.notify();
    signal.wait().expect("wait");
    assert!(!signal.try_wait());
    signal.notify();
    assert!(signal.try_wait());
}

#[test]
fn burst_while_parked_wakes_the_consumer_exactly_once() {
    let signal = Arc::new(ReadySignal::new());
    // The burst lands before the consumer ever waits, so it must collapse
    // into a single pending wake.
    for _ in 0..5 {
        signal.notify();
    }

    let wakes = Arc::new(AtomicUsize::new(0));
    let consumer = {
        let signal = signal.clone();
        let wakes = wakes.clone();
        thread::spawn(move || {
            for _ in 0..2 {
                if signal.wait().is_err() {
                    return;
                }
                wakes.fetch_add(1, Ordering::SeqCst);
            }
        })
    };

    thread::sleep(Duration::from_millis(100));
    assert_eq!(wakes.load(Ordering::SeqCst), 1);

    signal.notify();
    consumer.join().expect("consumer join");
    assert_eq!(wakes.load(Ordering::SeqCst), 2);
}
