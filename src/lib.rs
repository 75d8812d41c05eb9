//! # Ring Deque
//!
//! A fixed-capacity double-ended queue over a contiguous ring buffer, guarded by a
//! single mutex, for producer/consumer code on memory-constrained systems.
//!
//! ## Key Features
//!
//! * **Static footprint:** the `capacity + 1` slot buffer is allocated once in the
//!   constructor. Nothing else allocates; every push and pop is O(1).
//! * **No counter:** one slot is always left empty, so `begin == end` means empty and
//!   `len == capacity` means full.
//! * **Caller-scoped locking:** [`RingDeque::lock`] returns a guard; several operations
//!   under one guard form one critical section. Without a guard the contents cannot be
//!   reached at all.
//! * **Non-blocking:** pushing onto a full deque returns [`FullError`] with the value,
//!   popping an empty one returns [`OperationError::Empty`]. Waiting strategies are up
//!   to the caller.
//!
//! ## Capacity Constraints
//!
//! * Capacity must be at least 1; [`ConstructionError::InvalidCapacity`] otherwise.
//! * Capacity is fixed for the life of the deque. There is no resizing.
//!
//! ## Examples
//!
//! ### Shared between threads
//!
//! ```rust
//! use std::sync::Arc;
//! use std::thread;
//! use ring_deque::RingDeque;
//!
//! let queue = Arc::new(RingDeque::new(4).unwrap());
//!
//! let producer = {
//!     let queue = Arc::clone(&queue);
//!     thread::spawn(move || {
//!         let mut sent = 0;
//!         while sent < 10 {
//!             if queue.lock().push_back(sent).is_ok() {
//!                 sent += 1;
//!             } else {
//!                 thread::yield_now();
//!             }
//!         }
//!     })
//! };
//!
//! let mut received = Vec::new();
//! while received.len() < 10 {
//!     let popped = queue.lock().pop_front();
//!     match popped {
//!         Ok(v) => received.push(v),
//!         Err(_) => thread::yield_now(),
//!     }
//! }
//! producer.join().unwrap();
//! assert_eq!(received, (0..10).collect::<Vec<_>>());
//! ```
//!
//! ### Both ends and traversal
//!
//! ```rust
//! use ring_deque::{OperationError, RingBuffer};
//!
//! let mut ring = RingBuffer::new(4).unwrap();
//! ring.push_back("a").unwrap();
//! ring.push_back("b").unwrap();
//! ring.push_front("z").unwrap();
//! assert_eq!(ring.iter().copied().collect::<Vec<_>>(), ["z", "a", "b"]);
//!
//! assert_eq!(ring.pop_back(), Ok("b"));
//! ring.push_back("c").unwrap();
//! ring.push_back("d").unwrap();
//! assert!(ring.is_full());
//! assert_eq!(ring.push_back("e").map_err(OperationError::from), Err(OperationError::Full));
//!
//! // Cursor walk from the front to the one-past-the-back sentinel.
//! let (mut cur, end) = (ring.begin_cursor().unwrap(), ring.end_cursor().unwrap());
//! let mut seen = Vec::new();
//! while cur != end {
//!     seen.push(*ring.at(cur).unwrap());
//!     cur = ring.advance(cur);
//! }
//! assert_eq!(seen, ["z", "a", "c", "d"]);
//! ```

// --- Module Declarations ---

pub mod any_deque;
pub mod cursor;
pub mod deque;
pub mod error;
pub mod record;
pub mod ring;
pub mod shell;
mod sync;

// --- Re-exports ---

pub use any_deque::AnyBoundedDeque;
pub use cursor::{Cursor, Iter};
pub use deque::{RingDeque, RingDequeGuard};
pub use error::{ConstructionError, FullError, OperationError};
pub use record::TextRecord;
pub use ring::RingBuffer;
