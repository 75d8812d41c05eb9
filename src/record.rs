//! Fixed-size text element used by the interactive shell.

use core::fmt;

/// Byte capacity of a [`TextRecord`].
pub const TEXT_RECORD_CAPACITY: usize = 16;

/// A short string stored inline in a fixed 16-byte buffer.
///
/// Every element of the deque has the same size, so the shell never allocates per
/// push. Longer input is cut at the last character boundary that fits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TextRecord(heapless::String<TEXT_RECORD_CAPACITY>);

impl TextRecord {
    /// Builds a record from `text`, truncating to [`TEXT_RECORD_CAPACITY`] bytes.
    pub fn truncated(text: &str) -> Self {
        let mut inner = heapless::String::new();
        for ch in text.chars() {
            if inner.push(ch).is_err() {
                break;
            }
        }
        Self(inner)
    }

    /// The stored text.
    #[inline]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<&str> for TextRecord {
    fn from(text: &str) -> Self {
        Self::truncated(text)
    }
}

impl fmt::Display for TextRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
