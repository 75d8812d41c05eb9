//! Producer/consumer traffic through a shared `RingDeque`.
#![cfg(not(loom))]

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use ring_deque::{OperationError, RingDeque};

const PRODUCERS: usize = 4;
const CONSUMERS: usize = 3;
const PER_PRODUCER: usize = 2_000;

#[test]
fn test_mpmc_every_item_delivered_once() {
    let queue = Arc::new(RingDeque::new(16).unwrap());
    let start = Arc::new(Barrier::new(PRODUCERS + CONSUMERS));

    let producers: Vec<_> = (0..PRODUCERS)
        .map(|p| {
            let queue = Arc::clone(&queue);
            let start = Arc::clone(&start);
            thread::spawn(move || {
                start.wait();
                for i in 0..PER_PRODUCER {
                    let mut item = p * PER_PRODUCER + i;
                    // Alternate ends so both push paths race.
                    loop {
                        let mut guard = queue.lock();
                        let res = if i % 2 == 0 {
                            guard.push_back(item)
                        } else {
                            guard.push_front(item)
                        };
                        assert!(guard.len() <= guard.capacity());
                        drop(guard);
                        match res {
                            Ok(()) => break,
                            Err(full) => {
                                item = full.into_inner();
                                thread::yield_now();
                            }
                        }
                    }
                }
            })
        })
        .collect();

    let total = PRODUCERS * PER_PRODUCER;
    let consumed = Arc::new(AtomicUsize::new(0));
    let consumers: Vec<_> = (0..CONSUMERS)
        .map(|c| {
            let queue = Arc::clone(&queue);
            let start = Arc::clone(&start);
            let consumed = Arc::clone(&consumed);
            thread::spawn(move || {
                start.wait();
                let mut got = Vec::new();
                while consumed.load(Ordering::SeqCst) < total {
                    let popped = {
                        let mut guard = queue.lock();
                        if c % 2 == 0 {
                            guard.pop_front()
                        } else {
                            guard.pop_back()
                        }
                    };
                    match popped {
                        Ok(v) => {
                            consumed.fetch_add(1, Ordering::SeqCst);
                            got.push(v);
                        }
                        Err(OperationError::Empty) => thread::yield_now(),
                        Err(OperationError::Full) => unreachable!("pop never reports Full"),
                    }
                }
                got
            })
        })
        .collect();

    for p in producers {
        p.join().unwrap();
    }
    let mut seen = HashSet::new();
    for c in consumers {
        for v in c.join().unwrap() {
            assert!(seen.insert(v), "item {v} delivered twice");
        }
    }
    assert_eq!(seen.len(), total);
    assert!(queue.lock().is_empty());
}

#[test]
fn test_critical_section_is_atomic() {
    // Each thread pops the front, increments it and pushes it back under one guard.
    // Interleaving inside the section would lose increments.
    let queue = Arc::new(RingDeque::new(1).unwrap());
    queue.lock().push_back(0u64).unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let queue = Arc::clone(&queue);
            thread::spawn(move || {
                for _ in 0..1_000 {
                    let mut guard = queue.lock();
                    let v = guard.pop_front().unwrap();
                    guard.push_back(v + 1).unwrap();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }
    assert_eq!(queue.lock().pop_front(), Ok(8_000));
}

#[test]
fn test_try_lock_never_blocks() {
    let queue: Arc<RingDeque<u8>> = Arc::new(RingDeque::new(2).unwrap());
    let held = queue.lock();
    let other = Arc::clone(&queue);
    let acquired = thread::spawn(move || other.try_lock().is_some())
        .join()
        .unwrap();
    assert!(!acquired);
    held.unlock();
    assert!(queue.try_lock().is_some());
}
