//! Object-safe abstraction over bounded double-ended queues.

use crate::error::{FullError, OperationError};
use crate::ring::RingBuffer;

/// A double-ended queue with a fixed capacity.
///
/// Implemented by [`RingBuffer<T>`] (and so, through `DerefMut`, usable on a locked
/// [`RingDeque`](crate::RingDeque)) and by `heapless::Deque<T, N>`, so code can drive
/// either without knowing which backend it has.
pub trait AnyBoundedDeque<T> {
    /// Maximum number of elements held at once.
    fn capacity(&self) -> usize;
    /// Returns the number of elements in the deque.
    fn len(&self) -> usize;
    /// Returns `true` if the deque contains no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Returns `true` if another push would be rejected.
    fn is_full(&self) -> bool {
        self.len() == self.capacity()
    }
    /// Appends an element to the back, handing it back if full.
    fn push_back(&mut self, item: T) -> Result<(), FullError<T>>;
    /// Prepends an element to the front, handing it back if full.
    fn push_front(&mut self, item: T) -> Result<(), FullError<T>>;
    /// Removes and returns the element from the back.
    fn pop_back(&mut self) -> Result<T, OperationError>;
    /// Removes and returns the element from the front.
    fn pop_front(&mut self) -> Result<T, OperationError>;
    /// Removes all elements.
    fn clear(&mut self);
    /// Returns a shared reference to the front element, or `None` if empty.
    fn front(&self) -> Option<&T>;
    /// Returns a shared reference to the back element, or `None` if empty.
    fn back(&self) -> Option<&T>;
}

impl<T> AnyBoundedDeque<T> for RingBuffer<T> {
    fn capacity(&self) -> usize {
        self.capacity()
    }
    fn len(&self) -> usize {
        self.len()
    }
    fn is_empty(&self) -> bool {
        self.is_empty()
    }
    fn is_full(&self) -> bool {
        self.is_full()
    }
    fn push_back(&mut self, item: T) -> Result<(), FullError<T>> {
        self.push_back(item)
    }
    fn push_front(&mut self, item: T) -> Result<(), FullError<T>> {
        self.push_front(item)
    }
    fn pop_back(&mut self) -> Result<T, OperationError> {
        self.pop_back()
    }
    fn pop_front(&mut self) -> Result<T, OperationError> {
        self.pop_front()
    }
    fn clear(&mut self) {
        self.clear();
    }
    fn front(&self) -> Option<&T> {
        self.front()
    }
    fn back(&self) -> Option<&T> {
        self.back()
    }
}

impl<T, const N: usize> AnyBoundedDeque<T> for heapless::Deque<T, N> {
    fn capacity(&self) -> usize {
        N
    }
    fn len(&self) -> usize {
        self.len()
    }
    fn is_empty(&self) -> bool {
        self.is_empty()
    }
    fn is_full(&self) -> bool {
        self.is_full()
    }
    fn push_back(&mut self, item: T) -> Result<(), FullError<T>> {
        heapless::Deque::push_back(self, item).map_err(FullError)
    }
    fn push_front(&mut self, item: T) -> Result<(), FullError<T>> {
        heapless::Deque::push_front(self, item).map_err(FullError)
    }
    fn pop_back(&mut self) -> Result<T, OperationError> {
        heapless::Deque::pop_back(self).ok_or(OperationError::Empty)
    }
    fn pop_front(&mut self) -> Result<T, OperationError> {
        heapless::Deque::pop_front(self).ok_or(OperationError::Empty)
    }
    fn clear(&mut self) {
        self.clear();
    }
    fn front(&self) -> Option<&T> {
        self.front()
    }
    fn back(&self) -> Option<&T> {
        self.back()
    }
}
