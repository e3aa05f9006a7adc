use std::hash::Hash;

use ioclab_core::{
    CandidateSets, Normalization, PositionSymbolIndex, coincidence_metric_with,
    combination::MAX_MASK_BITS,
};

use crate::{Assignments, SearchError, TargetRange, stage::StagePlanner};

/// Configuration of a reverse IoC search.
///
/// A `ReverseSearch` holds no per-call state: every call to
/// [`search`](Self::search) builds a fresh position–symbol index and returns
/// a fresh sequence.
///
/// # Examples
///
/// ```
/// use ioclab_core::{CandidateSets, Normalization};
/// use ioclab_search::{ReverseSearch, TargetRange};
///
/// let candidates = CandidateSets::new(vec![vec!['a', 'b'], vec!['a'], vec!['b', 'c']]);
/// // With the length denominator, one pair over 3 positions is 2/3.
/// let search = ReverseSearch::new(TargetRange::exact(2.0 / 3.0)?)
///     .with_normalization(Normalization::Length);
///
/// let solutions: Vec<_> = search.search(&candidates)?.collect();
/// assert_eq!(
///     solutions,
///     vec![vec!['a', 'a', 'b'], vec!['a', 'a', 'c'], vec!['b', 'a', 'b']]
/// );
/// # Ok::<(), ioclab_search::SearchError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReverseSearch {
    target: TargetRange,
    normalization: Normalization,
}

impl ReverseSearch {
    /// Creates a search for `target` with the default
    /// [`Normalization::PairCount`] denominator.
    #[must_use]
    pub fn new(target: TargetRange) -> Self {
        Self {
            target,
            normalization: Normalization::default(),
        }
    }

    /// Creates a search for assignments whose IoC is within `tolerance` of
    /// the IoC of `sample`, measured with `normalization`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Metric`] if `sample` is empty, or
    /// [`SearchError::InvalidRange`] if `tolerance` is negative.
    pub fn matching<S>(
        sample: &[S],
        tolerance: f64,
        normalization: Normalization,
    ) -> Result<Self, SearchError>
    where
        S: Eq + Hash,
    {
        let ioc = coincidence_metric_with(sample, normalization)?;
        let target = TargetRange::from_ioc(&ioc, tolerance)?;
        Ok(Self::new(target).with_normalization(normalization))
    }

    /// Sets the denominator convention used for the range checks.
    #[must_use]
    pub fn with_normalization(mut self, normalization: Normalization) -> Self {
        self.normalization = normalization;
        self
    }

    /// Returns the target range.
    #[must_use]
    pub fn target(&self) -> TargetRange {
        self.target
    }

    /// Returns the denominator convention.
    #[must_use]
    pub fn normalization(&self) -> Normalization {
        self.normalization
    }

    /// Returns a lazy sequence of every assignment over `candidates` whose
    /// IoC lies within the target range.
    ///
    /// Every yielded assignment is complete, uses only candidate symbols at
    /// each position, and is yielded once. Two calls with the same arguments
    /// yield the same sequence. An empty message, or one with a position
    /// that has no candidate, yields nothing.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::TooManyPositions`] if a symbol is a candidate
    /// at more than 128 positions.
    pub fn search<S>(&self, candidates: &CandidateSets<S>) -> Result<Assignments<S>, SearchError>
    where
        S: Clone,
    {
        let symbols = candidates.symbols().symbols().to_vec();
        let planner = StagePlanner::new(self.target, candidates.len(), self.normalization);
        match self.prepare(candidates)? {
            Some(index) => Ok(Assignments::from_root(symbols, planner, index)),
            None => Ok(Assignments::empty(symbols, planner)),
        }
    }

    /// Returns the search split into independent sequences, one per
    /// top-level stage choice (a stage size and a symbol).
    ///
    /// The sequences share no state and may be consumed on different
    /// threads. Concatenated in order they yield exactly the items of
    /// [`search`](Self::search). Their statistics do not include the
    /// pruning done while planning the top-level split.
    ///
    /// # Errors
    ///
    /// Same as [`search`](Self::search).
    pub fn branches<S>(&self, candidates: &CandidateSets<S>) -> Result<Vec<Assignments<S>>, SearchError>
    where
        S: Clone,
    {
        let planner = StagePlanner::new(self.target, candidates.len(), self.normalization);
        let Some(index) = self.prepare(candidates)? else {
            return Ok(Vec::new());
        };
        Ok(Assignments::split_root(
            candidates.symbols().symbols(),
            planner,
            index,
        ))
    }

    /// Builds the root index, or `None` when the search is vacuous.
    fn prepare<S>(&self, candidates: &CandidateSets<S>) -> Result<Option<PositionSymbolIndex>, SearchError> {
        if candidates.is_empty() {
            log::debug!("reverse search over an empty message yields nothing");
            return Ok(None);
        }
        let empty = candidates.empty_positions();
        if !empty.is_empty() {
            log::debug!(
                "reverse search yields nothing: positions {empty:?} have no candidate symbol"
            );
            return Ok(None);
        }

        let index = PositionSymbolIndex::from_candidates(candidates);
        if let Some(symbol) = index
            .symbols()
            .find(|&symbol| index.availability(symbol) > MAX_MASK_BITS)
        {
            return Err(SearchError::TooManyPositions {
                symbol,
                positions: index.availability(symbol),
            });
        }

        log::debug!(
            "reverse search over {} positions and {} symbols, range [{}, {}] ({:?})",
            candidates.len(),
            index.symbol_count(),
            self.target.lo(),
            self.target.hi(),
            self.normalization
        );
        Ok(Some(index))
    }
}

/// Searches assignments whose IoC is within `tolerance` of `target_ioc`,
/// using the default [`Normalization::PairCount`] denominator.
///
/// `candidate_sets` holds one collection of candidate symbols per position.
///
/// # Errors
///
/// Returns [`SearchError::InvalidRange`] if `tolerance` is negative or a
/// bound is not finite, and [`SearchError::TooManyPositions`] as
/// [`ReverseSearch::search`] does.
///
/// # Examples
///
/// ```
/// use ioclab_search::search_assignments;
///
/// let solutions: Vec<_> = search_assignments(1.0, 0.0, [[1, 2], [1, 3]])?.collect();
/// assert_eq!(solutions, vec![vec![1, 1]]);
/// # Ok::<(), ioclab_search::SearchError>(())
/// ```
pub fn search_assignments<S, I, T>(
    target_ioc: f64,
    tolerance: f64,
    candidate_sets: I,
) -> Result<Assignments<S>, SearchError>
where
    S: Clone + Eq + Hash,
    I: IntoIterator<Item = T>,
    T: IntoIterator<Item = S>,
{
    let target = TargetRange::new(target_ioc, tolerance)?;
    let candidates = CandidateSets::new(candidate_sets);
    ReverseSearch::new(target).search(&candidates)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use ioclab_core::{MetricError, coincidence_metric};

    use super::*;

    fn exact(target: f64) -> ReverseSearch {
        ReverseSearch::new(TargetRange::exact(target).unwrap())
    }

    fn repeated_symbols(solution: &[char]) -> usize {
        let distinct: HashSet<_> = solution.iter().collect();
        solution.len() - distinct.len()
    }

    #[test]
    fn test_single_pair_over_three_positions() {
        let candidates = CandidateSets::uniform(['x', 'y'], 3);
        let solutions: Vec<_> = exact(1.0 / 3.0).search(&candidates).unwrap().collect();

        assert_eq!(solutions.len(), 6);
        for solution in &solutions {
            assert_eq!(repeated_symbols(solution), 1, "{solution:?}");
        }
    }

    #[test]
    fn test_equal_stage_sizes_are_not_duplicated() {
        // Two pairs over four positions: each split of positions is reached once.
        let candidates = CandidateSets::uniform(['x', 'y'], 4);
        let solutions: Vec<_> = exact(4.0 / 12.0).search(&candidates).unwrap().collect();

        let distinct: HashSet<_> = solutions.iter().cloned().collect();
        assert_eq!(distinct.len(), solutions.len());
        assert_eq!(solutions.len(), 6);
    }

    #[test]
    fn test_respects_candidate_sets() {
        let candidates = CandidateSets::new(vec![
            vec!['k', 'a'],
            vec!['e', 'a'],
            vec!['b', 'c'],
            vec!['a', 'b'],
            vec!['b', 'e'],
        ]);
        let search = ReverseSearch::matching(&['k', 'e', 'b', 'a', 'b'], 0.0, Normalization::PairCount)
            .unwrap();
        let solutions: Vec<_> = search.search(&candidates).unwrap().collect();

        assert!(solutions.contains(&vec!['k', 'e', 'b', 'a', 'b']));
        for solution in &solutions {
            for (pos, symbol) in solution.iter().enumerate() {
                assert!(candidates.contains(ioclab_core::Position::new(pos), symbol));
            }
            let ioc = coincidence_metric(solution).unwrap();
            assert!(search.target().contains(ioc.value()));
        }
    }

    #[test]
    fn test_unreachable_exact_target_is_empty() {
        // Two symbols can never make three positions all distinct.
        let candidates = CandidateSets::uniform(['x', 'y'], 3);
        let mut solutions = exact(0.0).search(&candidates).unwrap();
        assert_eq!(solutions.next(), None);
        assert!(!solutions.stats().has_solutions());
    }

    #[test]
    fn test_all_equal_target() {
        let candidates = CandidateSets::uniform(['x', 'y', 'z'], 4);
        let solutions: Vec<_> = exact(1.0).search(&candidates).unwrap().collect();
        assert_eq!(
            solutions,
            vec![vec!['x'; 4], vec!['y'; 4], vec!['z'; 4]]
        );
    }

    #[test]
    fn test_empty_message_yields_nothing() {
        let candidates = CandidateSets::<char>::new(Vec::<Vec<char>>::new());
        assert_eq!(exact(0.5).search(&candidates).unwrap().count(), 0);
        assert!(exact(0.5).branches(&candidates).unwrap().is_empty());
    }

    #[test]
    fn test_empty_candidate_set_yields_nothing() {
        let candidates = CandidateSets::new(vec![vec!['x'], vec![], vec!['x', 'y']]);
        let search = ReverseSearch::new(TargetRange::new(0.5, 0.5).unwrap());
        assert_eq!(search.search(&candidates).unwrap().count(), 0);
    }

    #[test]
    fn test_single_position() {
        let candidates = CandidateSets::new(vec![vec!['x', 'y']]);
        let solutions: Vec<_> = exact(0.0).search(&candidates).unwrap().collect();
        assert_eq!(solutions, vec![vec!['x'], vec!['y']]);
    }

    #[test]
    fn test_rejects_negative_tolerance() {
        let result = search_assignments(0.5, -0.1, [['a', 'b']]);
        assert!(matches!(result, Err(SearchError::InvalidRange { .. })));
    }

    #[test]
    fn test_rejects_too_many_positions() {
        let candidates = CandidateSets::uniform(['a'], MAX_MASK_BITS + 1);
        let result = exact(1.0).search(&candidates);
        assert!(matches!(
            result,
            Err(SearchError::TooManyPositions { positions, .. }) if positions == MAX_MASK_BITS + 1
        ));
    }

    #[test]
    fn test_matching_rejects_empty_sample() {
        let result = ReverseSearch::matching::<u8>(&[], 0.0, Normalization::PairCount);
        assert_eq!(result, Err(SearchError::Metric(MetricError::EmptyInput)));
    }

    #[test]
    fn test_search_is_restartable() {
        let candidates = CandidateSets::uniform([0_u8, 1, 2], 5);
        let search = ReverseSearch::new(TargetRange::new(0.2, 0.1).unwrap());

        let mut partial = search.search(&candidates).unwrap();
        let first_two: Vec<_> = partial.by_ref().take(2).collect();
        let all: Vec<_> = search.search(&candidates).unwrap().collect();

        assert_eq!(first_two, all[..2]);
        assert!(all.len() > 2);
    }

    #[test]
    fn test_branches_concatenate_to_search() {
        let candidates = CandidateSets::new(vec![
            vec!['a', 'b', 'c'],
            vec!['a', 'b'],
            vec!['b', 'c'],
            vec!['a', 'c'],
            vec!['a', 'b', 'c'],
            vec!['c'],
        ]);
        let search = ReverseSearch::new(TargetRange::new(0.2, 0.1).unwrap());

        let sequential: Vec<_> = search.search(&candidates).unwrap().collect();
        let split: Vec<_> = search
            .branches(&candidates)
            .unwrap()
            .into_iter()
            .flatten()
            .collect();
        assert_eq!(split, sequential);
        assert!(!sequential.is_empty());
    }

    #[test]
    fn test_stats_track_exploration() {
        let candidates = CandidateSets::uniform(['x', 'y'], 4);
        let mut solutions = exact(4.0 / 12.0).search(&candidates).unwrap();
        let count = solutions.by_ref().count() as u64;

        let stats = solutions.stats();
        assert_eq!(stats.solutions(), count);
        assert!(stats.branches() >= count);
        assert!(stats.pruned_stage_sizes() > 0);
        assert_eq!(stats.max_depth(), 2);
    }
}
