//! Dispatcher behavior against a live render loop: ordering, completion
//! visibility, reentrancy, and panic containment.

mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use common::{DriverHarness, TestBackend, TestGraphics, eventually};
use lumen_core::Settings;
use parking_lot::Mutex;

fn start_headless() -> DriverHarness {
    let (backend, _backend_state) = TestBackend::new();
    let (graphics, _deleted) = TestGraphics::new();
    DriverHarness::start(backend, graphics, Arc::new(Settings::new()), Vec::new())
}

#[test]
fn running_flag_tracks_loop_lifetime() {
    let mut harness = start_headless();
    assert!(eventually(Duration::from_secs(1), || harness.context.running()));

    harness.context.quit();
    assert!(harness.wait_exit(Duration::from_secs(5)));
    assert!(!harness.context.running());
}

#[test]
fn synchronous_call_completes_before_returning() {
    let harness = start_headless();
    let counter = Arc::new(AtomicUsize::new(0));

    for expected in 1..=3 {
        let observed = Arc::clone(&counter);
        harness.context.run_on_main(move || {
            observed.fetch_add(1, Ordering::SeqCst);
        });
        // Visible immediately: run_on_main returns strictly after the
        // action has executed on the loop thread.
        assert_eq!(counter.load(Ordering::SeqCst), expected);
    }

    harness.shutdown();
}

#[test]
fn synchronous_call_completes_from_any_thread() {
    let harness = start_headless();
    let context = Arc::clone(&harness.context);

    let worker = thread::spawn(move || {
        let counter = Arc::new(AtomicUsize::new(0));
        let observed = Arc::clone(&counter);
        context.run_on_main(move || {
            observed.fetch_add(7, Ordering::SeqCst);
        });
        counter.load(Ordering::SeqCst)
    });

    assert_eq!(worker.join().ok(), Some(7));
    harness.shutdown();
}

#[test]
fn async_calls_execute_in_fifo_order() {
    let harness = start_headless();
    let log = Arc::new(Mutex::new(Vec::new()));

    for value in 0..32 {
        let log = Arc::clone(&log);
        harness.context.run_on_main_async(move || {
            log.lock().push(value);
        });
    }
    // The queue has a single consumer, so this synchronous call is a fence:
    // every async action above has executed once it returns.
    harness.context.run_on_main(|| {});

    let observed = log.lock().clone();
    assert_eq!(observed, (0..32).collect::<Vec<_>>());
    harness.shutdown();
}

#[test]
fn reentrant_dispatch_does_not_deadlock() {
    let harness = start_headless();
    let context = Arc::clone(&harness.context);
    let counter = Arc::new(AtomicUsize::new(0));

    let observed = Arc::clone(&counter);
    let inner_context = Arc::clone(&context);
    context.run_on_main(move || {
        // Already on the loop thread: must run inline, not queue-and-wait
        // against a consumer that is busy running us.
        inner_context.run_on_main(move || {
            observed.fetch_add(1, Ordering::SeqCst);
        });
    });

    assert_eq!(counter.load(Ordering::SeqCst), 1);
    harness.shutdown();
}

#[test]
fn panicking_action_does_not_kill_the_loop() {
    let harness = start_headless();

    harness.context.run_on_main_async(|| panic!("application bug"));

    // The loop must survive and keep serving dispatches.
    let counter = Arc::new(AtomicUsize::new(0));
    let observed = Arc::clone(&counter);
    harness.context.run_on_main(move || {
        observed.fetch_add(1, Ordering::SeqCst);
    });
    assert_eq!(counter.load(Ordering::SeqCst), 1);

    assert!(harness.context.running());
    harness.shutdown();
}

#[test]
fn mixed_sync_and_async_keep_queue_order() {
    let harness = start_headless();
    let log = Arc::new(Mutex::new(Vec::new()));

    let first = Arc::clone(&log);
    harness.context.run_on_main_async(move || first.lock().push(1));
    let second = Arc::clone(&log);
    harness.context.run_on_main(move || second.lock().push(2));
    let third = Arc::clone(&log);
    harness.context.run_on_main_async(move || third.lock().push(3));
    harness.context.run_on_main(|| {});

    assert_eq!(log.lock().clone(), vec![1, 2, 3]);
    harness.shutdown();
}
