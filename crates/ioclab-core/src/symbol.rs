//! Interning of opaque symbol values.
//!
//! The search works on dense [`SymbolId`]s rather than on caller-supplied
//! symbol values. Ids are handed out in first-appearance order, which fixes
//! the order in which the search visits symbols and so makes its output
//! deterministic for a given input.

use std::{collections::HashMap, fmt, hash::Hash};

/// A dense identifier for an interned symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SymbolId(u32);

impl SymbolId {
    pub(crate) fn from_index(index: usize) -> Self {
        let Ok(raw) = u32::try_from(index) else {
            panic!("too many distinct symbols");
        };
        Self(raw)
    }

    /// Returns the zero-based index of this id in its [`SymbolTable`].
    #[must_use]
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{}", self.0)
    }
}

/// A two-way mapping between symbol values and their [`SymbolId`]s.
///
/// Lookups never insert: [`id_of`](Self::id_of) returns `None` for a value
/// that was never interned.
///
/// # Examples
///
/// ```
/// use ioclab_core::SymbolTable;
///
/// let mut table = SymbolTable::new();
/// let x = table.intern('x');
/// let y = table.intern('y');
/// assert_eq!(table.intern('x'), x);
/// assert!(x < y);
/// assert_eq!(table.symbol(y), &'y');
/// assert_eq!(table.id_of(&'z'), None);
/// ```
#[derive(Debug, Clone)]
pub struct SymbolTable<S> {
    symbols: Vec<S>,
    ids: HashMap<S, SymbolId>,
}

impl<S> Default for SymbolTable<S> {
    fn default() -> Self {
        Self {
            symbols: Vec::new(),
            ids: HashMap::new(),
        }
    }
}

impl<S> SymbolTable<S> {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of interned symbols.
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Returns `true` if no symbol has been interned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Returns the symbol value for an id.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this table.
    #[must_use]
    pub fn symbol(&self, id: SymbolId) -> &S {
        &self.symbols[id.index()]
    }

    /// Returns all symbol values, indexed by [`SymbolId::index`].
    #[must_use]
    pub fn symbols(&self) -> &[S] {
        &self.symbols
    }

    /// Returns an iterator over every issued id, in issue order.
    pub fn ids(&self) -> impl DoubleEndedIterator<Item = SymbolId> + ExactSizeIterator + use<S> {
        (0..self.symbols.len()).map(SymbolId::from_index)
    }
}

impl<S> SymbolTable<S>
where
    S: Clone + Eq + Hash,
{
    /// Returns the id of `symbol`, issuing a new one on first sight.
    ///
    /// # Panics
    ///
    /// Panics if more than `u32::MAX` distinct symbols are interned.
    pub fn intern(&mut self, symbol: S) -> SymbolId {
        if let Some(&id) = self.ids.get(&symbol) {
            return id;
        }
        let id = SymbolId::from_index(self.symbols.len());
        self.symbols.push(symbol.clone());
        self.ids.insert(symbol, id);
        id
    }

    /// Returns the id of `symbol` if it has been interned.
    #[must_use]
    pub fn id_of(&self, symbol: &S) -> Option<SymbolId> {
        self.ids.get(symbol).copied()
    }
}
