//! Slot cursors and the borrowing iterator built on them.

use core::fmt;
use core::iter::FusedIterator;

use crate::ring::RingBuffer;

/// An opaque position inside a [`RingBuffer`].
///
/// Obtained from [`RingBuffer::begin_cursor`] or [`RingBuffer::end_cursor`] and moved
/// with [`RingBuffer::advance`]. A cursor is a plain slot index: it does not borrow the
/// ring, and any push or pop may make it stale. [`RingBuffer::at`] returns `None` for a
/// stale cursor instead of reading a dead slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cursor {
    slot: usize,
}

impl Cursor {
    #[inline(always)]
    pub(crate) fn new(slot: usize) -> Self {
        Self { slot }
    }

    /// Physical slot index this cursor points at.
    #[inline(always)]
    pub fn slot(self) -> usize {
        self.slot
    }
}

/// Front-to-back iterator over a [`RingBuffer`].
///
/// Created by [`RingBuffer::iter`]. Holds a shared borrow of the ring, so the ring
/// cannot be pushed to or popped from while the iterator is alive.
pub struct Iter<'a, T> {
    ring: &'a RingBuffer<T>,
    head: usize,
    tail: usize,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    #[inline]
    pub(crate) fn new(
        ring: &'a RingBuffer<T>,
        head: usize,
        tail: usize,
        remaining: usize,
    ) -> Self {
        Self {
            ring,
            head,
            tail,
            remaining,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        // SAFETY: `remaining > 0` keeps `head` inside the live range of a ring that
        // cannot change while borrowed.
        let item = unsafe { self.ring.slot_ref(self.head) };
        self.head = self.ring.wrap_add(self.head, 1);
        self.remaining -= 1;
        Some(item)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        self.tail = self.ring.wrap_sub(self.tail, 1);
        self.remaining -= 1;
        // SAFETY: the slot behind `tail` was live and not yet yielded from the front.
        Some(unsafe { self.ring.slot_ref(self.tail) })
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            ring: self.ring,
            head: self.head,
            tail: self.tail,
            remaining: self.remaining,
        }
    }
}

impl<T> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("remaining", &self.remaining)
            .finish_non_exhaustive()
    }
}
