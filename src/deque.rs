//! Thread-shared bounded deque with caller-scoped locking.
//!
//! [`RingDeque`] pairs a [`RingBuffer`] with a single mutex. Nothing on the deque
//! itself reads or writes elements: every push, pop, query and traversal goes through
//! the [`RingDequeGuard`] returned by [`lock`](RingDeque::lock). Holding the guard
//! across several calls makes them one critical section:
//!
//! ```rust
//! use ring_deque::RingDeque;
//!
//! let jobs: RingDeque<u32> = RingDeque::new(4).unwrap();
//! jobs.lock().push_back(7).unwrap();
//!
//! // Pop, inspect and conditionally put back, atomically.
//! let mut guard = jobs.lock();
//! if let Ok(job) = guard.pop_front() {
//!     if job % 2 == 1 {
//!         guard.push_front(job).unwrap();
//!     }
//! }
//! guard.unlock();
//!
//! assert_eq!(jobs.lock().len(), 1);
//! ```
//!
//! The deque never waits for space or for data. Push on a full deque and pop on an
//! empty one fail immediately; any backpressure is layered on top by the caller.

use core::fmt;
use core::ops::{Deref, DerefMut};

use crate::error::ConstructionError;
use crate::ring::RingBuffer;
use crate::sync::{Mutex, MutexGuard};

/// A fixed-capacity double-ended queue guarded by one mutex.
///
/// `RingDeque<T>` is `Send + Sync` whenever `T: Send`, so it can be shared through an
/// `Arc` between producer and consumer threads.
pub struct RingDeque<T> {
    capacity: usize,
    ring: Mutex<RingBuffer<T>>,
}

impl<T> RingDeque<T> {
    /// Allocates a deque able to hold `capacity` elements at once.
    ///
    /// The lock is created only after the buffer has been obtained, so a failed
    /// construction leaves nothing behind.
    ///
    /// # Errors
    /// - [`ConstructionError::InvalidCapacity`] if `capacity == 0`.
    /// - [`ConstructionError::AllocationFailure`] if the storage cannot be allocated.
    pub fn new(capacity: usize) -> Result<Self, ConstructionError> {
        let ring = RingBuffer::new(capacity)?;
        tracing::debug!(capacity, "ring deque created");
        Ok(Self::from_ring(ring))
    }

    /// Wraps an existing ring, keeping its contents.
    pub fn from_ring(ring: RingBuffer<T>) -> Self {
        Self {
            capacity: ring.capacity(),
            ring: Mutex::new(ring),
        }
    }

    /// Number of elements the deque can hold. Fixed at construction, so no lock is
    /// taken.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Blocks until the lock is acquired and returns the guard.
    ///
    /// The lock is released when the guard is dropped or passed to
    /// [`RingDequeGuard::unlock`].
    #[inline]
    pub fn lock(&self) -> RingDequeGuard<'_, T> {
        RingDequeGuard {
            ring: self.ring.lock(),
        }
    }

    /// Acquires the lock only if it is free right now.
    #[inline]
    pub fn try_lock(&self) -> Option<RingDequeGuard<'_, T>> {
        self.ring.try_lock().map(|ring| RingDequeGuard { ring })
    }

    /// Tears the deque down: drops any remaining elements, then frees the buffer and
    /// the lock.
    ///
    /// Takes `self` by value, so it runs once and never while a guard is alive.
    /// Dropping the deque does the same thing.
    pub fn destroy(self) {
        tracing::debug!(capacity = self.capacity, "ring deque destroyed");
        drop(self);
    }

    /// Consumes the deque and returns the unsynchronized ring with its contents.
    pub fn into_inner(self) -> RingBuffer<T> {
        self.ring.into_inner()
    }
}

impl<T: fmt::Debug> fmt::Debug for RingDeque<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut d = f.debug_struct("RingDeque");
        d.field("capacity", &self.capacity);
        match self.try_lock() {
            Some(guard) => d.field("items", &*guard),
            None => d.field("items", &format_args!("<locked>")),
        };
        d.finish()
    }
}

/// Exclusive access to a locked [`RingDeque`].
///
/// Derefs to the [`RingBuffer`], which carries every query and mutation.
#[must_use = "dropping the guard releases the lock immediately"]
pub struct RingDequeGuard<'a, T> {
    ring: MutexGuard<'a, RingBuffer<T>>,
}

impl<T> RingDequeGuard<'_, T> {
    /// Releases the lock. Same as dropping the guard.
    #[inline]
    pub fn unlock(self) {}
}

impl<T> Deref for RingDequeGuard<'_, T> {
    type Target = RingBuffer<T>;

    #[inline(always)]
    fn deref(&self) -> &RingBuffer<T> {
        &self.ring
    }
}

impl<T> DerefMut for RingDequeGuard<'_, T> {
    #[inline(always)]
    fn deref_mut(&mut self) -> &mut RingBuffer<T> {
        &mut self.ring
    }
}

impl<T: fmt::Debug> fmt::Debug for RingDequeGuard<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&**self, f)
    }
}
