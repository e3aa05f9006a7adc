/// Counters collected while an [`Assignments`](crate::Assignments) sequence
/// is being consumed.
///
/// Counters only cover the part of the search tree explored so far; they
/// grow as the caller pulls more solutions.
///
/// # Examples
///
/// ```
/// use ioclab_core::CandidateSets;
/// use ioclab_search::{ReverseSearch, TargetRange};
///
/// let candidates = CandidateSets::uniform([0_u8, 1], 4);
/// let mut solutions = ReverseSearch::new(TargetRange::exact(1.0 / 3.0)?).search(&candidates)?;
/// let count = solutions.by_ref().count();
///
/// assert_eq!(solutions.stats().solutions(), count as u64);
/// assert!(solutions.stats().has_solutions());
/// # Ok::<(), ioclab_search::SearchError>(())
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SearchStats {
    pub(crate) branches: u64,
    pub(crate) pruned_stage_sizes: u64,
    pub(crate) dead_ends: u64,
    pub(crate) rejected_terminals: u64,
    pub(crate) solutions: u64,
    pub(crate) max_depth: usize,
}

impl SearchStats {
    /// Returns the number of placements tried (one per symbol and mask).
    #[must_use]
    pub fn branches(&self) -> u64 {
        self.branches
    }

    /// Returns the number of stage sizes discarded by the range forecasts.
    #[must_use]
    pub fn pruned_stage_sizes(&self) -> u64 {
        self.pruned_stage_sizes
    }

    /// Returns the number of branches abandoned because an open position
    /// had no usable symbol left.
    #[must_use]
    pub fn dead_ends(&self) -> u64 {
        self.dead_ends
    }

    /// Returns the number of complete assignments that fell outside the
    /// target range.
    #[must_use]
    pub fn rejected_terminals(&self) -> u64 {
        self.rejected_terminals
    }

    /// Returns the number of solutions yielded.
    #[must_use]
    pub fn solutions(&self) -> u64 {
        self.solutions
    }

    /// Returns the deepest stage reached.
    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Returns `true` if at least one solution was yielded.
    #[must_use]
    pub fn has_solutions(&self) -> bool {
        self.solutions > 0
    }

    /// Adds the counters of `other` into `self`.
    ///
    /// Used to aggregate statistics of independently consumed
    /// [`ReverseSearch::branches`](crate::ReverseSearch::branches).
    pub fn merge(&mut self, other: &Self) {
        self.branches += other.branches;
        self.pruned_stage_sizes += other.pruned_stage_sizes;
        self.dead_ends += other.dead_ends;
        self.rejected_terminals += other.rejected_terminals;
        self.solutions += other.solutions;
        self.max_depth = self.max_depth.max(other.max_depth);
    }
}
