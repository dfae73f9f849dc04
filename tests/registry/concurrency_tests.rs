use crate::common::Counter;
use method_stub::{CallRecord, StubRegistry};
use std::sync::{Arc, Barrier};
use std::thread;

#[test]
fn test_two_threads_record_each_call_once() {
    let registry = StubRegistry::new(Counter::default());

    thread::scope(|scope| {
        scope.spawn(|| registry.call::<u64>("inc", (1u64,)).unwrap());
        scope.spawn(|| registry.call::<u64>("inc", (2u64,)).unwrap());
    });

    let history = registry.call_history("inc");
    assert_eq!(registry.call_count("inc"), 2);
    assert_eq!(history.len(), 2);
    for expected in [1u64, 2u64] {
        let record = CallRecord::new((expected,));
        assert_eq!(history.iter().filter(|call| **call == record).count(), 1);
    }
    assert_eq!(registry.subject().get(), 3);
}

#[test]
fn test_per_thread_order_is_preserved() {
    const THREADS: u64 = 8;
    const CALLS: u64 = 100;

    let registry = Arc::new(StubRegistry::new(Counter::default()));
    let barrier = Arc::new(Barrier::new(THREADS as usize));

    let handles: Vec<_> = (0..THREADS)
        .map(|worker| {
            let registry = Arc::clone(&registry);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for call in 0..CALLS {
                    registry
                        .call::<u64>("inc", (worker * 1_000 + call,))
                        .unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let history = registry.call_history("inc");
    assert_eq!(history.len() as u64, THREADS * CALLS);

    for worker in 0..THREADS {
        let seen: Vec<u64> = history
            .iter()
            .filter_map(|call| call.arg::<u64>(0).copied())
            .filter(|value| value / 1_000 == worker)
            .collect();
        let expected: Vec<u64> = (0..CALLS).map(|call| worker * 1_000 + call).collect();
        assert_eq!(seen, expected);
    }
}

#[test]
fn test_stub_swaps_while_calls_are_running() {
    let registry = StubRegistry::new(Counter::default());

    thread::scope(|scope| {
        scope.spawn(|| {
            for _ in 0..200 {
                registry.call::<u64>("inc", (1u64,)).unwrap();
            }
        });
        scope.spawn(|| {
            for _ in 0..50 {
                registry.stub("inc", |_: &Counter, _: u64| 0u64).unwrap();
                registry.restore("inc");
            }
        });
    });

    assert_eq!(registry.call_count("inc"), 200);
    assert!(!registry.is_stubbed("inc"));
    assert!(registry.subject().get() <= 200);
}

#[test]
fn test_blocked_override_does_not_hold_the_lock() {
    let registry = StubRegistry::new(Counter::default());
    let gate = Arc::new(Barrier::new(2));
    let inside = Arc::clone(&gate);

    // The override parks until another thread has dispatched through the
    // same registry, which needs the lock.
    registry
        .stub("reset", move |_: &Counter| {
            inside.wait();
        })
        .unwrap();

    thread::scope(|scope| {
        scope.spawn(|| registry.call::<()>("reset", ()).unwrap());
        scope.spawn(|| {
            registry.call::<u64>("inc", (9u64,)).unwrap();
            gate.wait();
        });
    });

    assert_eq!(registry.subject().get(), 9);
    assert_eq!(registry.call_count("reset"), 1);
    assert_eq!(registry.call_count("inc"), 1);
}
