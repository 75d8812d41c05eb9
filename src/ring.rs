//! Fixed-capacity ring buffer with slots at both ends.
//!
//! # Layout
//! A [`RingBuffer`] with capacity `C` owns exactly `C + 1` slots of
//! `MaybeUninit<T>`. Two cursors describe the live range:
//!
//! - `begin`: slot of the front (oldest) element.
//! - `end`: slot one past the back (newest) element.
//!
//! Slots in `[begin, end)` (walking forward and wrapping at `C + 1`) are initialized;
//! every other slot is not. One slot is always left unused, so `begin == end` means
//! empty and `len == C` means full without a separate counter.
//!
//! ```text
//! capacity 4, slots 5, holding [z, a, b]:
//!
//!   slot:   0   1   2   3   4
//!         | a | b | . | . | z |
//!                   ^end      ^begin
//! ```
//!
//! Nothing here synchronizes. [`RingDeque`](crate::RingDeque) puts a lock around it.

use core::fmt;
use core::mem::{self, MaybeUninit};

use crate::cursor::{Cursor, Iter};
use crate::error::{ConstructionError, FullError, OperationError};

/// A bounded double-ended queue over `capacity + 1` contiguous slots.
///
/// Every push and pop is O(1) and never allocates; the only allocation happens in
/// [`new`](RingBuffer::new).
pub struct RingBuffer<T> {
    buf: Box<[MaybeUninit<T>]>,
    begin: usize,
    end: usize,
}

impl<T> RingBuffer<T> {
    /// Allocates an empty ring able to hold `capacity` elements.
    ///
    /// # Errors
    /// - [`ConstructionError::InvalidCapacity`] if `capacity == 0`.
    /// - [`ConstructionError::AllocationFailure`] if the `capacity + 1` slots cannot be
    ///   allocated.
    pub fn new(capacity: usize) -> Result<Self, ConstructionError> {
        if capacity == 0 {
            tracing::warn!("rejected ring buffer with zero capacity");
            return Err(ConstructionError::InvalidCapacity);
        }
        let alloc_failure = || {
            tracing::warn!(capacity, "ring buffer allocation failed");
            ConstructionError::AllocationFailure {
                requested: capacity,
            }
        };

        let slots = capacity.checked_add(1).ok_or_else(alloc_failure)?;
        let mut storage: Vec<MaybeUninit<T>> = Vec::new();
        storage
            .try_reserve_exact(slots)
            .map_err(|_| alloc_failure())?;
        // SAFETY: `MaybeUninit<T>` is valid uninitialized and `slots` were just reserved.
        unsafe { storage.set_len(slots) };

        tracing::trace!(capacity, "ring buffer allocated");
        Ok(Self {
            buf: storage.into_boxed_slice(),
            begin: 0,
            end: 0,
        })
    }

    /// Number of elements the ring can hold at once.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.buf.len() - 1
    }

    /// Physical slot count (`capacity + 1`).
    #[inline(always)]
    pub(crate) fn slots(&self) -> usize {
        self.buf.len()
    }

    /// Advances slot `idx` by `add` places, wrapping at the slot count.
    ///
    /// Requires `idx < slots` and `add < slots`. Written without `idx + add` so a
    /// zero-sized `T` with a capacity near `usize::MAX` cannot overflow.
    #[inline(always)]
    pub(crate) fn wrap_add(&self, idx: usize, add: usize) -> usize {
        let to_edge = self.slots() - idx;
        if add >= to_edge {
            add - to_edge
        } else {
            idx + add
        }
    }

    /// Moves slot `idx` back by `sub` places, wrapping at the slot count.
    #[inline(always)]
    pub(crate) fn wrap_sub(&self, idx: usize, sub: usize) -> usize {
        if sub > idx {
            self.slots() - (sub - idx)
        } else {
            idx - sub
        }
    }

    /// Current occupancy, `(end - begin) mod (capacity + 1)`.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.wrap_sub(self.end, self.begin)
    }

    /// Returns `true` if `begin == end`.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }

    /// Returns `true` if occupancy equals capacity.
    #[inline(always)]
    pub fn is_full(&self) -> bool {
        self.len() == self.capacity()
    }

    /// Free logical slots left before the ring is full.
    #[inline(always)]
    pub fn remaining(&self) -> usize {
        self.capacity() - self.len()
    }

    /// Appends `value` at the back.
    ///
    /// # Errors
    /// Returns the value inside [`FullError`] if the ring is full; the ring is unchanged.
    #[inline]
    pub fn push_back(&mut self, value: T) -> Result<(), FullError<T>> {
        if self.is_full() {
            return Err(FullError(value));
        }
        self.buf[self.end].write(value);
        self.end = self.wrap_add(self.end, 1);
        Ok(())
    }

    /// Prepends `value` at the front.
    ///
    /// # Errors
    /// Returns the value inside [`FullError`] if the ring is full; the ring is unchanged.
    #[inline]
    pub fn push_front(&mut self, value: T) -> Result<(), FullError<T>> {
        if self.is_full() {
            return Err(FullError(value));
        }
        self.begin = self.wrap_sub(self.begin, 1);
        self.buf[self.begin].write(value);
        Ok(())
    }

    /// Removes and returns the front element.
    ///
    /// # Errors
    /// [`OperationError::Empty`] if there is nothing to pop.
    #[inline]
    pub fn pop_front(&mut self) -> Result<T, OperationError> {
        if self.is_empty() {
            return Err(OperationError::Empty);
        }
        // SAFETY: the ring is non-empty, so `begin` is a live slot. Advancing `begin`
        // right after takes it out of the live range, so it is read exactly once.
        let value = unsafe { self.buf[self.begin].assume_init_read() };
        self.begin = self.wrap_add(self.begin, 1);
        Ok(value)
    }

    /// Removes and returns the back element.
    ///
    /// # Errors
    /// [`OperationError::Empty`] if there is nothing to pop.
    #[inline]
    pub fn pop_back(&mut self) -> Result<T, OperationError> {
        if self.is_empty() {
            return Err(OperationError::Empty);
        }
        self.end = self.wrap_sub(self.end, 1);
        // SAFETY: the slot just behind the old `end` was the newest live element and
        // is now outside the live range, so it is read exactly once.
        Ok(unsafe { self.buf[self.end].assume_init_read() })
    }

    /// Empties the ring and resets both cursors to slot 0.
    ///
    /// Live elements are dropped; the slot memory itself is not zeroed.
    pub fn clear(&mut self) {
        let (begin, len) = (self.begin, self.len());
        // Reset first: if an element's destructor panics the rest leak instead of
        // being dropped twice.
        self.begin = 0;
        self.end = 0;
        if mem::needs_drop::<T>() {
            for i in 0..len {
                let slot = self.wrap_add(begin, i);
                // SAFETY: `slot` was in the live range before the reset and is
                // visited once.
                unsafe { self.buf[slot].assume_init_drop() };
            }
        }
    }

    /// Returns a shared reference to the element at logical `index` (0 is the front).
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        if index < self.len() {
            let slot = self.wrap_add(self.begin, index);
            // SAFETY: `index < len` puts `slot` in the live range.
            Some(unsafe { self.slot_ref(slot) })
        } else {
            None
        }
    }

    /// Returns an exclusive reference to the element at logical `index`.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index < self.len() {
            let slot = self.wrap_add(self.begin, index);
            // SAFETY: `index < len` puts `slot` in the live range.
            Some(unsafe { self.buf[slot].assume_init_mut() })
        } else {
            None
        }
    }

    /// Front element, or `None` if empty.
    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.get(0)
    }

    /// Back element, or `None` if empty.
    #[inline]
    pub fn back(&self) -> Option<&T> {
        self.len().checked_sub(1).and_then(|last| self.get(last))
    }

    /// Exclusive reference to the front element.
    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.get_mut(0)
    }

    /// Exclusive reference to the back element.
    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        match self.len().checked_sub(1) {
            Some(last) => self.get_mut(last),
            None => None,
        }
    }

    // ─── cursors ─────────────────────────────────────────────────────────────

    /// Cursor at the front element, or `None` if empty.
    #[inline]
    pub fn begin_cursor(&self) -> Option<Cursor> {
        (!self.is_empty()).then(|| Cursor::new(self.begin))
    }

    /// Sentinel cursor one past the back element, or `None` if empty.
    ///
    /// Walking [`advance`](RingBuffer::advance) from
    /// [`begin_cursor`](RingBuffer::begin_cursor) reaches this cursor after exactly
    /// `len()` steps.
    #[inline]
    pub fn end_cursor(&self) -> Option<Cursor> {
        (!self.is_empty()).then(|| Cursor::new(self.end))
    }

    /// Cursor of the element after `cursor`, wrapping at the physical end.
    ///
    /// `cursor` must come from this ring and point at a live element; anything else
    /// is a caller bug caught by a debug assertion. Release builds still return a
    /// slot inside the buffer.
    #[inline]
    pub fn advance(&self, cursor: Cursor) -> Cursor {
        debug_assert!(
            self.is_live(cursor.slot()),
            "advance called with a cursor outside the live range"
        );
        let slot = cursor.slot() % self.slots();
        Cursor::new(self.wrap_add(slot, 1))
    }

    /// Element under `cursor`, or `None` for the sentinel or a stale cursor.
    #[inline]
    pub fn at(&self, cursor: Cursor) -> Option<&T> {
        if self.is_live(cursor.slot()) {
            // SAFETY: checked live just above.
            Some(unsafe { self.slot_ref(cursor.slot()) })
        } else {
            None
        }
    }

    /// Borrowing iterator from front to back.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self, self.begin, self.end, self.len())
    }

    #[inline]
    fn is_live(&self, slot: usize) -> bool {
        slot < self.slots() && self.wrap_sub(slot, self.begin) < self.len()
    }

    /// # Safety
    /// `slot` must be in the live range.
    #[inline(always)]
    pub(crate) unsafe fn slot_ref(&self, slot: usize) -> &T {
        unsafe { self.buf.get_unchecked(slot).assume_init_ref() }
    }

    /// Returns up to two contiguous slices covering the elements front to back.
    ///
    /// The second slice is empty unless the live range wraps past the last slot.
    pub fn as_slices(&self) -> (&[T], &[T]) {
        let ptr = self.buf.as_ptr() as *const T;
        // SAFETY: both ranges lie inside the live range, whose slots are initialized,
        // and `MaybeUninit<T>` has the same layout as `T`.
        unsafe {
            if self.begin <= self.end {
                (
                    core::slice::from_raw_parts(ptr.add(self.begin), self.end - self.begin),
                    &[],
                )
            } else {
                (
                    core::slice::from_raw_parts(ptr.add(self.begin), self.slots() - self.begin),
                    core::slice::from_raw_parts(ptr, self.end),
                )
            }
        }
    }

    /// Mutable counterpart of [`as_slices`](RingBuffer::as_slices).
    pub fn as_mut_slices(&mut self) -> (&mut [T], &mut [T]) {
        let slots = self.slots();
        let ptr = self.buf.as_mut_ptr() as *mut T;
        // SAFETY: as in `as_slices`; the two ranges never overlap.
        unsafe {
            if self.begin <= self.end {
                (
                    core::slice::from_raw_parts_mut(ptr.add(self.begin), self.end - self.begin),
                    &mut [],
                )
            } else {
                (
                    core::slice::from_raw_parts_mut(ptr.add(self.begin), slots - self.begin),
                    core::slice::from_raw_parts_mut(ptr, self.end),
                )
            }
        }
    }

    /// Raw `(begin, end)` slot indices, for diagnostics.
    #[inline]
    pub fn raw_cursors(&self) -> (usize, usize) {
        (self.begin, self.end)
    }
}

impl<T> Drop for RingBuffer<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: Clone> Clone for RingBuffer<T> {
    fn clone(&self) -> Self {
        let mut storage: Vec<MaybeUninit<T>> = Vec::with_capacity(self.slots());
        // SAFETY: as in `new`; the slots stay dead until written below.
        unsafe { storage.set_len(self.slots()) };
        let mut cloned = Self {
            buf: storage.into_boxed_slice(),
            begin: 0,
            end: 0,
        };
        for item in self.iter() {
            cloned.buf[cloned.end].write(item.clone());
            cloned.end += 1;
        }
        cloned
    }
}

impl<T: fmt::Debug> fmt::Debug for RingBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for RingBuffer<T> {
    fn eq(&self, other: &Self) -> bool {
        self.capacity() == other.capacity()
            && self.len() == other.len()
            && self.iter().eq(other.iter())
    }
}
impl<T: Eq> Eq for RingBuffer<T> {}

impl<'a, T> IntoIterator for &'a RingBuffer<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn ring_of(capacity: usize, items: &[i32]) -> RingBuffer<i32> {
        let mut r = RingBuffer::new(capacity).unwrap();
        for &i in items {
            r.push_back(i).unwrap();
        }
        r
    }

    // ─── construction ────────────────────────────────────────────────────────
    #[test]
    fn test_ring_new_is_empty() {
        for capacity in [1, 2, 3, 4, 17] {
            let r: RingBuffer<i32> = RingBuffer::new(capacity).unwrap();
            assert!(r.is_empty());
            assert!(!r.is_full());
            assert_eq!(r.len(), 0);
            assert_eq!(r.capacity(), capacity);
            assert_eq!(r.slots(), capacity + 1);
            assert_eq!(r.raw_cursors(), (0, 0));
        }
    }

    #[test]
    fn test_ring_new_rejects_zero_capacity() {
        assert_eq!(
            RingBuffer::<i32>::new(0).err(),
            Some(ConstructionError::InvalidCapacity)
        );
    }

    #[test]
    fn test_ring_new_reports_allocation_failure() {
        assert_eq!(
            RingBuffer::<u64>::new(usize::MAX / 2).err(),
            Some(ConstructionError::AllocationFailure {
                requested: usize::MAX / 2
            })
        );
        assert_eq!(
            RingBuffer::<()>::new(usize::MAX).err(),
            Some(ConstructionError::AllocationFailure {
                requested: usize::MAX
            })
        );
    }

    #[test]
    fn test_ring_zero_sized_near_max_capacity() {
        let capacity = usize::MAX - 1;
        let mut r: RingBuffer<()> = RingBuffer::new(capacity).unwrap();
        assert_eq!(r.capacity(), capacity);
        assert_eq!(r.slots(), usize::MAX);

        r.push_front(()).unwrap(); // begin wraps to the last slot
        r.push_back(()).unwrap();
        assert_eq!(r.raw_cursors(), (usize::MAX - 1, 1));
        assert_eq!(r.len(), 2);

        let copy = r.clone();
        assert_eq!(copy.len(), 2);
        assert_eq!(copy.capacity(), capacity);

        assert_eq!(r.pop_front(), Ok(()));
        assert_eq!(r.raw_cursors(), (0, 1));
        assert_eq!(r.pop_back(), Ok(()));
        assert!(r.is_empty());
        assert_eq!(r.pop_front(), Err(OperationError::Empty));
    }

    // ─── push / pop ──────────────────────────────────────────────────────────
    #[test]
    fn test_ring_capacity_four_scenario() {
        let mut r: RingBuffer<&str> = RingBuffer::new(4).unwrap();
        r.push_back("a").unwrap();
        r.push_back("b").unwrap();
        r.push_front("z").unwrap();
        assert_eq!(r.iter().copied().collect::<Vec<_>>(), ["z", "a", "b"]);
        assert_eq!(r.len(), 3);
        assert!(!r.is_full());

        assert_eq!(r.pop_back(), Ok("b"));
        assert_eq!(r.len(), 2);

        r.push_back("c").unwrap();
        r.push_back("d").unwrap();
        assert_eq!(r.len(), 4);
        assert!(r.is_full());

        let err = r.push_back("e").unwrap_err();
        assert_eq!(err.into_inner(), "e");
        assert_eq!(r.iter().copied().collect::<Vec<_>>(), ["z", "a", "c", "d"]);
    }

    #[test]
    fn test_ring_fifo_round_trip() {
        let mut r = ring_of(5, &[1, 2, 3, 4, 5]);
        let popped: Vec<_> = (0..5).map(|_| r.pop_front().unwrap()).collect();
        assert_eq!(popped, [1, 2, 3, 4, 5]);
        assert!(r.is_empty());
    }

    #[test]
    fn test_ring_opposite_ends_reverse() {
        let mut r = RingBuffer::new(3).unwrap();
        for i in 1..=3 {
            r.push_front(i).unwrap();
        }
        assert_eq!(r.pop_front(), Ok(3));
        assert_eq!(r.pop_front(), Ok(2));
        assert_eq!(r.pop_front(), Ok(1));

        let mut r = ring_of(3, &[1, 2, 3]);
        assert_eq!(r.pop_back(), Ok(3));
        assert_eq!(r.pop_back(), Ok(2));
        assert_eq!(r.pop_back(), Ok(1));
    }

    #[test]
    fn test_ring_saturation() {
        let mut r = ring_of(2, &[1, 2]);
        assert!(r.is_full());
        assert_eq!(r.remaining(), 0);
        assert_eq!(r.push_back(3), Err(FullError(3)));
        assert_eq!(r.push_front(0), Err(FullError(0)));
        assert_eq!(r.len(), 2);
        assert_eq!(r.front(), Some(&1));
        assert_eq!(r.back(), Some(&2));
    }

    #[test]
    fn test_ring_exhaustion() {
        let mut r: RingBuffer<i32> = RingBuffer::new(2).unwrap();
        assert_eq!(r.pop_front(), Err(OperationError::Empty));
        assert_eq!(r.pop_back(), Err(OperationError::Empty));
        assert_eq!(r.len(), 0);
        assert_eq!(r.front(), None);
        assert_eq!(r.back(), None);
    }

    #[test]
    fn test_ring_capacity_one() {
        let mut r = RingBuffer::new(1).unwrap();
        r.push_front('x').unwrap();
        assert!(r.is_full());
        assert_eq!(r.push_back('y'), Err(FullError('y')));
        assert_eq!(r.pop_back(), Ok('x'));
        assert!(r.is_empty());
    }

    // ─── wrap-around ─────────────────────────────────────────────────────────
    #[test]
    fn test_ring_wraps_at_physical_end() {
        let mut r = ring_of(4, &[1, 2, 3]);
        r.pop_front().unwrap();
        r.pop_front().unwrap();
        // begin = 2, end = 3
        r.push_back(4).unwrap();
        r.push_back(5).unwrap(); // end wraps to 0
        r.push_back(6).unwrap();
        assert!(r.is_full());
        assert_eq!(r.raw_cursors(), (2, 1));
        assert_eq!(r.get(0), Some(&3));
        assert_eq!(r.get(3), Some(&6));
        assert_eq!(r.get(4), None);
        let (head, tail) = r.as_slices();
        assert_eq!(head, &[3, 4, 5]);
        assert_eq!(tail, &[6]);
    }

    #[test]
    fn test_ring_push_front_wraps_below_zero() {
        let mut r = RingBuffer::new(4).unwrap();
        r.push_front(1).unwrap();
        assert_eq!(r.raw_cursors(), (4, 0));
        r.push_front(0).unwrap();
        assert_eq!(r.raw_cursors(), (3, 0));
        assert_eq!(r.as_slices(), (&[0, 1][..], &[][..]));
        assert_eq!(r.pop_back(), Ok(1));
        assert_eq!(r.raw_cursors(), (3, 4));
    }

    #[test]
    fn test_ring_as_mut_slices_edits_in_place() {
        let mut r = ring_of(3, &[1, 2, 3]);
        r.pop_front().unwrap();
        r.push_back(4).unwrap(); // wraps
        let (a, b) = r.as_mut_slices();
        for x in a.iter_mut().chain(b.iter_mut()) {
            *x *= 10;
        }
        assert_eq!(r.iter().copied().collect::<Vec<_>>(), [20, 30, 40]);
        *r.front_mut().unwrap() = 1;
        *r.back_mut().unwrap() = 9;
        assert_eq!(r.iter().copied().collect::<Vec<_>>(), [1, 30, 9]);
    }

    // ─── clear ───────────────────────────────────────────────────────────────
    #[test]
    fn test_ring_clear_resets_and_is_idempotent() {
        let mut r = ring_of(3, &[1, 2]);
        r.pop_front().unwrap();
        r.clear();
        assert!(r.is_empty());
        assert_eq!(r.raw_cursors(), (0, 0));
        r.clear();
        assert!(r.is_empty());
        r.push_back(7).unwrap();
        assert_eq!(r.pop_front(), Ok(7));
    }

    struct DropCounter(Rc<Cell<usize>>);
    impl Drop for DropCounter {
        fn drop(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn test_ring_drops_live_elements_exactly_once() {
        let drops = Rc::new(Cell::new(0));
        {
            let mut r = RingBuffer::new(3).unwrap();
            for _ in 0..3 {
                r.push_back(DropCounter(drops.clone())).ok().unwrap();
            }
            drop(r.pop_front().unwrap());
            assert_eq!(drops.get(), 1);
            r.push_back(DropCounter(drops.clone())).ok().unwrap();
            r.clear();
            assert_eq!(drops.get(), 4);
            r.push_front(DropCounter(drops.clone())).ok().unwrap();
            r.push_front(DropCounter(drops.clone())).ok().unwrap();
        }
        assert_eq!(drops.get(), 6);
    }

    #[test]
    fn test_ring_rejected_push_does_not_drop() {
        let drops = Rc::new(Cell::new(0));
        let mut r = RingBuffer::new(1).unwrap();
        r.push_back(DropCounter(drops.clone())).ok().unwrap();
        let rejected = r.push_back(DropCounter(drops.clone())).err().unwrap();
        assert_eq!(drops.get(), 0);
        drop(rejected.into_inner());
        assert_eq!(drops.get(), 1);
    }

    // ─── cursors ─────────────────────────────────────────────────────────────
    #[test]
    fn test_ring_cursor_walk() {
        let mut r: RingBuffer<&str> = RingBuffer::new(4).unwrap();
        r.push_back("a").unwrap();
        r.push_front("z").unwrap();

        let mut seen = Vec::new();
        let end = r.end_cursor().unwrap();
        let mut cur = r.begin_cursor().unwrap();
        while cur != end {
            seen.push(*r.at(cur).unwrap());
            cur = r.advance(cur);
        }
        assert_eq!(seen, ["z", "a"]);
        assert_eq!(r.at(end), None);
    }

    #[test]
    fn test_ring_cursors_none_when_empty() {
        let mut r = ring_of(2, &[1]);
        r.pop_back().unwrap();
        assert_eq!(r.begin_cursor(), None);
        assert_eq!(r.end_cursor(), None);
    }

    #[test]
    fn test_ring_at_rejects_foreign_cursor() {
        let big = ring_of(8, &[1, 2, 3, 4, 5, 6, 7]);
        let small = ring_of(2, &[1]);
        let far = big.advance(big.advance(big.advance(big.begin_cursor().unwrap())));
        assert_eq!(big.at(far), Some(&4));
        assert_eq!(small.at(far), None);
    }

    // ─── traits ──────────────────────────────────────────────────────────────
    #[test]
    fn test_ring_traits_clone_eq_debug() {
        let mut r = ring_of(3, &[1, 2, 3]);
        r.pop_front().unwrap();
        r.push_back(4).unwrap();
        let c = r.clone();
        assert_eq!(c, r);
        assert_eq!(c.raw_cursors(), (0, 3));
        assert_eq!(format!("{:?}", c), "[2, 3, 4]");
        assert_ne!(c, ring_of(4, &[2, 3, 4]));
    }
}
