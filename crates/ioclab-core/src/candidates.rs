//! Per-position candidate symbol sets.
//!
//! [`CandidateSets`] records which symbols each position of a message may
//! take. It is the input of the reverse search, supplied either explicitly
//! (one set per position) or through [`CandidateSets::uniform`] (one shared
//! alphabet replicated over the message length).

use std::hash::Hash;

use crate::{Position, SymbolId, SymbolTable};

/// Candidate symbols for every position of a message.
///
/// Symbols are interned in first-appearance order while scanning the sets
/// position by position. Duplicates inside a single position's set are
/// collapsed.
///
/// # Examples
///
/// ```
/// use ioclab_core::{CandidateSets, Position};
///
/// let sets = CandidateSets::new(vec![vec!['x', 'y'], vec!['y'], vec!['z', 'x']]);
/// assert_eq!(sets.len(), 3);
/// assert_eq!(sets.symbols().symbols(), &['x', 'y', 'z']);
/// assert!(sets.contains(Position::new(2), &'z'));
/// assert!(!sets.contains(Position::new(1), &'x'));
/// ```
#[derive(Debug, Clone)]
pub struct CandidateSets<S> {
    symbols: SymbolTable<S>,
    sets: Vec<Vec<SymbolId>>,
}

impl<S> Default for CandidateSets<S> {
    fn default() -> Self {
        Self {
            symbols: SymbolTable::default(),
            sets: Vec::new(),
        }
    }
}

impl<S> CandidateSets<S>
where
    S: Clone + Eq + Hash,
{
    /// Builds candidate sets from one collection of symbols per position.
    #[must_use]
    pub fn new<I, T>(sets: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: IntoIterator<Item = S>,
    {
        let mut symbols = SymbolTable::new();
        let sets = sets
            .into_iter()
            .map(|set| {
                let mut ids: Vec<SymbolId> = Vec::new();
                for symbol in set {
                    let id = symbols.intern(symbol);
                    if !ids.contains(&id) {
                        ids.push(id);
                    }
                }
                ids
            })
            .collect();
        Self { symbols, sets }
    }

    /// Builds candidate sets where every one of `len` positions accepts the
    /// whole `alphabet`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ioclab_core::{CandidateSets, Position};
    ///
    /// let sets = CandidateSets::uniform([0_u8, 1, 2], 5);
    /// assert_eq!(sets.len(), 5);
    /// assert_eq!(sets.candidates_at(Position::new(4)).len(), 3);
    /// ```
    #[must_use]
    pub fn uniform<I>(alphabet: I, len: usize) -> Self
    where
        I: IntoIterator<Item = S>,
    {
        let alphabet: Vec<S> = alphabet.into_iter().collect();
        Self::new((0..len).map(|_| alphabet.iter().cloned()))
    }

    /// Returns `true` if `symbol` is a candidate at `pos`.
    ///
    /// Positions outside the message never contain any symbol.
    #[must_use]
    pub fn contains(&self, pos: Position, symbol: &S) -> bool {
        let Some(id) = self.symbols.id_of(symbol) else {
            return false;
        };
        self.sets
            .get(pos.index())
            .is_some_and(|set| set.contains(&id))
    }
}

impl<S> CandidateSets<S> {
    /// Returns the message length `L`.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    /// Returns `true` if the message has no positions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Returns the table of every symbol appearing in any set.
    #[must_use]
    pub fn symbols(&self) -> &SymbolTable<S> {
        &self.symbols
    }

    /// Returns the candidate ids at `pos`, in first-appearance order.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is outside the message.
    #[must_use]
    pub fn candidates_at(&self, pos: Position) -> &[SymbolId] {
        &self.sets[pos.index()]
    }

    /// Returns an iterator over `(position, candidate ids)` pairs.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (Position, &[SymbolId])> {
        self.sets
            .iter()
            .enumerate()
            .map(|(i, set)| (Position::new(i), set.as_slice()))
    }

    /// Returns the positions whose candidate set is empty.
    ///
    /// A message with any such position has no complete assignment.
    #[must_use]
    pub fn empty_positions(&self) -> Vec<Position> {
        self.iter()
            .filter(|(_, set)| set.is_empty())
            .map(|(pos, _)| pos)
            .collect()
    }
}

impl<S, T> FromIterator<T> for CandidateSets<S>
where
    S: Clone + Eq + Hash,
    T: IntoIterator<Item = S>,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicates_within_a_set_are_collapsed() {
        let sets = CandidateSets::new(vec![vec!['a', 'b', 'a']]);
        assert_eq!(sets.candidates_at(Position::new(0)).len(), 2);
    }

    #[test]
    fn test_uniform_replicates_alphabet() {
        let sets = CandidateSets::uniform(['a', 'b'], 3);
        for (_, set) in sets.iter() {
            assert_eq!(set.len(), 2);
        }
        assert_eq!(sets.symbols().len(), 2);
    }

    #[test]
    fn test_uniform_with_zero_length_is_empty() {
        let sets = CandidateSets::uniform(['a', 'b'], 0);
        assert!(sets.is_empty());
        assert!(sets.symbols().is_empty());
    }

    #[test]
    fn test_empty_positions() {
        let sets = CandidateSets::new(vec![vec!['a'], vec![], vec!['b'], vec![]]);
        assert_eq!(
            sets.empty_positions(),
            vec![Position::new(1), Position::new(3)]
        );
    }

    #[test]
    fn test_contains_out_of_range() {
        let sets = CandidateSets::new(vec![vec!['a']]);
        assert!(!sets.contains(Position::new(5), &'a'));
        assert!(!sets.contains(Position::new(0), &'q'));
    }

    #[test]
    fn test_from_iterator() {
        let sets: CandidateSets<u8> = [vec![1, 2], vec![3]].into_iter().collect();
        assert_eq!(sets.len(), 2);
        assert_eq!(sets.symbols().symbols(), &[1, 2, 3]);
    }
}
