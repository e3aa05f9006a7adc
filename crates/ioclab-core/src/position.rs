//! Positions within the message being analyzed or constructed.

use std::fmt;

/// An index into a message of length `L`, in the range `0..L`.
///
/// Ordering is significant: positions define the order of the symbols in
/// the output sequence.
///
/// # Examples
///
/// ```
/// use ioclab_core::Position;
///
/// let pos = Position::new(3);
/// assert_eq!(pos.index(), 3);
/// assert!(Position::new(1) < pos);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position(u32);

impl Position {
    /// Creates a position from a zero-based index.
    ///
    /// # Panics
    ///
    /// Panics if `index` does not fit in a `u32`.
    #[must_use]
    #[inline]
    pub fn new(index: usize) -> Self {
        let Ok(index) = u32::try_from(index) else {
            panic!("Position index must fit in u32, got {index}");
        };
        Self(index)
    }

    /// Returns the zero-based index of this position.
    #[must_use]
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns an iterator over positions `0..len`.
    pub fn range(len: usize) -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator {
        (0..len).map(Self::new)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
