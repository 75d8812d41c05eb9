//! Loom models of the lock discipline.
//!
//! ```bash
//! RUSTFLAGS="--cfg loom" cargo test --test loom --release
//! ```
#![cfg(loom)]

use loom::sync::Arc;
use loom::thread;
use ring_deque::{OperationError, RingDeque};

#[test]
fn test_push_push_full() {
    loom::model(|| {
        let deque = Arc::new(RingDeque::new(1).unwrap());

        let d1 = Arc::clone(&deque);
        let d2 = Arc::clone(&deque);
        let h1 = thread::spawn(move || d1.lock().push_back(1).is_ok());
        let h2 = thread::spawn(move || d2.lock().push_front(2).is_ok());

        let ok1 = h1.join().unwrap();
        let ok2 = h2.join().unwrap();

        // Capacity 1: exactly one push wins, whichever ran first.
        assert!(ok1 ^ ok2);
        let guard = deque.lock();
        assert!(guard.is_full());
        assert_eq!(guard.front(), Some(if ok1 { &1 } else { &2 }));
    });
}

#[test]
fn test_push_pop() {
    loom::model(|| {
        let deque = Arc::new(RingDeque::new(2).unwrap());
        deque.lock().push_back(1).unwrap();

        let d1 = Arc::clone(&deque);
        let d2 = Arc::clone(&deque);
        let h1 = thread::spawn(move || d1.lock().push_front(2).unwrap());
        let h2 = thread::spawn(move || d2.lock().pop_back());

        h1.join().unwrap();
        // The back element is 1 regardless of when the front push ran.
        assert_eq!(h2.join().unwrap(), Ok(1));
        let mut guard = deque.lock();
        assert_eq!(guard.pop_front(), Ok(2));
        assert_eq!(guard.pop_front(), Err(OperationError::Empty));
    });
}

#[test]
fn test_pop_inspect_push_back_is_atomic() {
    loom::model(|| {
        let deque = Arc::new(RingDeque::new(1).unwrap());
        deque.lock().push_back(0u32).unwrap();

        let handles: Vec<_> = (0..2)
            .map(|_| {
                let d = Arc::clone(&deque);
                thread::spawn(move || {
                    let mut guard = d.lock();
                    let v = guard.pop_front().unwrap();
                    guard.push_back(v + 1).unwrap();
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(deque.lock().pop_front(), Ok(2));
    });
}
