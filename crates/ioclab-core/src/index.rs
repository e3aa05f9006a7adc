//! The bidirectional position–symbol index.
//!
//! [`PositionSymbolIndex`] is the inverse view of [`CandidateSets`]: for each
//! symbol, the ordered positions where it may still be placed, and for each
//! position, the symbols that may still take it.
//!
//! # Invariant
//!
//! `pos ∈ positions(symbol)` if and only if `symbol` is a candidate at `pos`
//! and `pos` has not been consumed. Consuming a position removes it from the
//! list of *every* symbol, not only the one placed there: a filled slot is no
//! longer available to anyone.
//!
//! The reverse search never mutates an index it shares with a sibling
//! branch; it derives a fresh copy with [`PositionSymbolIndex::with_consumed`].

use crate::{CandidateSets, Position, SymbolId};

/// Availability of positions per symbol and of symbols per position.
///
/// Every symbol of the source [`CandidateSets`] has an explicit entry, even
/// once its availability drops to zero.
///
/// # Examples
///
/// ```
/// use ioclab_core::{CandidateSets, Position, PositionSymbolIndex};
///
/// let sets = CandidateSets::new(vec![vec!['x', 'y'], vec!['x'], vec!['y']]);
/// let x = sets.symbols().id_of(&'x').unwrap();
/// let y = sets.symbols().id_of(&'y').unwrap();
///
/// let index = PositionSymbolIndex::from_candidates(&sets);
/// assert_eq!(index.availability(x), 2);
///
/// let next = index.with_consumed([Position::new(0)]);
/// assert_eq!(next.positions(x), &[Position::new(1)]);
/// assert_eq!(next.positions(y), &[Position::new(2)]);
/// // The original is untouched.
/// assert_eq!(index.availability(y), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionSymbolIndex {
    by_symbol: Vec<Vec<Position>>,
    by_position: Vec<Vec<SymbolId>>,
    consumed: Vec<bool>,
    open_count: usize,
}

impl PositionSymbolIndex {
    /// Builds the index for the initial, fully unassigned state.
    #[must_use]
    pub fn from_candidates<S>(candidates: &CandidateSets<S>) -> Self {
        let mut by_symbol = vec![Vec::new(); candidates.symbols().len()];
        let mut by_position = Vec::with_capacity(candidates.len());
        for (pos, set) in candidates.iter() {
            for &symbol in set {
                by_symbol[symbol.index()].push(pos);
            }
            by_position.push(set.to_vec());
        }
        Self {
            by_symbol,
            by_position,
            consumed: vec![false; candidates.len()],
            open_count: candidates.len(),
        }
    }

    /// Returns the message length.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_position.len()
    }

    /// Returns `true` if the message has no positions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_position.is_empty()
    }

    /// Returns the number of symbols tracked by the index.
    #[must_use]
    pub fn symbol_count(&self) -> usize {
        self.by_symbol.len()
    }

    /// Returns every tracked symbol id, ascending.
    pub fn symbols(&self) -> impl DoubleEndedIterator<Item = SymbolId> + ExactSizeIterator + use<> {
        (0..self.by_symbol.len()).map(SymbolId::from_index)
    }

    /// Returns the positions still available to `symbol`, ascending.
    #[must_use]
    pub fn positions(&self, symbol: SymbolId) -> &[Position] {
        &self.by_symbol[symbol.index()]
    }

    /// Returns the number of positions still available to `symbol`.
    #[must_use]
    pub fn availability(&self, symbol: SymbolId) -> usize {
        self.by_symbol[symbol.index()].len()
    }

    /// Returns the symbols that may still take `pos`.
    ///
    /// Empty once `pos` has been consumed.
    #[must_use]
    pub fn symbols_at(&self, pos: Position) -> &[SymbolId] {
        &self.by_position[pos.index()]
    }

    /// Returns `true` if `pos` has not been consumed.
    #[must_use]
    pub fn is_available(&self, pos: Position) -> bool {
        !self.consumed[pos.index()]
    }

    /// Returns the number of positions not yet consumed.
    #[must_use]
    pub fn open_count(&self) -> usize {
        self.open_count
    }

    /// Marks `positions` as filled, removing each from every symbol's list.
    ///
    /// Positions that were already consumed are ignored.
    pub fn consume<I>(&mut self, positions: I)
    where
        I: IntoIterator<Item = Position>,
    {
        for pos in positions {
            if self.consumed[pos.index()] {
                continue;
            }
            self.consumed[pos.index()] = true;
            self.open_count -= 1;
            for symbol in self.by_position[pos.index()].drain(..) {
                let list = &mut self.by_symbol[symbol.index()];
                if let Ok(i) = list.binary_search(&pos) {
                    list.remove(i);
                }
            }
        }
    }

    /// Returns a copy of this index with `positions` consumed.
    #[must_use]
    pub fn with_consumed<I>(&self, positions: I) -> Self
    where
        I: IntoIterator<Item = Position>,
    {
        let mut next = self.clone();
        next.consume(positions);
        next
    }

    /// Returns the first open position none of whose remaining symbols
    /// satisfies `usable`.
    ///
    /// Such a position can never be filled from this state.
    #[must_use]
    pub fn find_stranded<F>(&self, mut usable: F) -> Option<Position>
    where
        F: FnMut(SymbolId) -> bool,
    {
        self.by_position
            .iter()
            .enumerate()
            .filter(|&(i, _)| !self.consumed[i])
            .find(|(_, symbols)| !symbols.iter().any(|&s| usable(s)))
            .map(|(i, _)| Position::new(i))
    }
}
