//! Error types for construction and for push/pop on a bounded deque.

use core::fmt;

/// Reasons a deque could not be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConstructionError {
    /// The requested capacity was zero.
    #[error("deque capacity must be at least 1")]
    InvalidCapacity,
    /// The `capacity + 1` slot buffer could not be allocated.
    #[error("failed to allocate storage for {requested} elements")]
    AllocationFailure {
        /// Logical capacity that was requested.
        requested: usize,
    },
}

/// Reasons a push or pop was refused. The deque is left untouched in both cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum OperationError {
    /// Occupancy already equals capacity.
    #[error("deque is full")]
    Full,
    /// No elements to pop.
    #[error("deque is empty")]
    Empty,
}

/// A push rejected because the deque was full.
///
/// Carries the rejected value back to the caller so nothing is lost. Converts into
/// [`OperationError::Full`] for callers that only care about the taxonomy:
///
/// ```rust
/// use ring_deque::{OperationError, RingBuffer};
///
/// fn fill(ring: &mut RingBuffer<u8>) -> Result<(), OperationError> {
///     ring.push_back(1)?;
///     ring.push_back(2)?;
///     Ok(())
/// }
///
/// let mut ring = RingBuffer::new(1).unwrap();
/// assert_eq!(fill(&mut ring), Err(OperationError::Full));
/// ```
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct FullError<T>(pub T);

impl<T> FullError<T> {
    /// Returns the value that could not be pushed.
    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> fmt::Debug for FullError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FullError").finish_non_exhaustive()
    }
}

impl<T> fmt::Display for FullError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&OperationError::Full, f)
    }
}

impl<T> std::error::Error for FullError<T> {}

impl<T> From<FullError<T>> for OperationError {
    #[inline]
    fn from(_: FullError<T>) -> Self {
        OperationError::Full
    }
}
