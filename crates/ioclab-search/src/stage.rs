//! Stage planning arithmetic.
//!
//! A *stage* commits one symbol to exactly `n` positions, adding
//! `n·(n−1)` to the IoC numerator. [`StagePlanner`] decides which stage
//! sizes are still worth trying from a given partial state, using only the
//! target range, the message length and the [`Normalization`]; it never
//! looks at individual symbols or positions.

use ioclab_core::{Normalization, pair_count};

use crate::TargetRange;

/// Range arithmetic for one search call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StagePlanner {
    range: TargetRange,
    len: usize,
    normalization: Normalization,
}

impl StagePlanner {
    /// Creates a planner for messages of `len` positions.
    #[must_use]
    pub fn new(range: TargetRange, len: usize, normalization: Normalization) -> Self {
        Self {
            range,
            len,
            normalization,
        }
    }

    /// Returns the message length.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` for an empty message.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn ratio(&self, numerator: u64) -> f64 {
        self.normalization.ratio(numerator, self.len)
    }

    /// Returns `true` if `numerator` does not exceed the upper bound.
    #[must_use]
    pub fn within_upper(&self, numerator: u64) -> bool {
        self.ratio(numerator) <= self.range.hi()
    }

    /// Returns `true` if `numerator` reaches the lower bound.
    #[must_use]
    pub fn reaches_lower(&self, numerator: u64) -> bool {
        self.ratio(numerator) >= self.range.lo()
    }

    /// Returns `true` if a complete assignment with `numerator` is in range.
    #[must_use]
    pub fn accepts(&self, numerator: u64) -> bool {
        self.range.contains(self.ratio(numerator))
    }

    /// Returns the largest repeat count `n ≤ len` such that one symbol
    /// repeated `n` times still stays within the upper bound.
    ///
    /// This bounds the size of the first stage.
    ///
    /// # Examples
    ///
    /// ```
    /// use ioclab_core::Normalization;
    /// use ioclab_search::{TargetRange, stage::StagePlanner};
    ///
    /// // 3 positions, target 2/6: a pair fits, a triple does not.
    /// let planner = StagePlanner::new(TargetRange::exact(1.0 / 3.0)?, 3, Normalization::PairCount);
    /// assert_eq!(planner.max_global(), 2);
    /// # Ok::<(), ioclab_search::SearchError>(())
    /// ```
    #[must_use]
    pub fn max_global(&self) -> usize {
        let mut max = 0;
        for n in 0..=self.len {
            if !self.within_upper(pair_count(n)) {
                break;
            }
            max = n;
        }
        max
    }

    /// Returns the largest numerator reachable by packing `remaining` slots
    /// with repeat counts of at most `n`, starting from `numerator`.
    ///
    /// `n·(n−1)` is convex, so greedily taking as many groups of `n` as fit
    /// and one final group with the rest is optimal.
    ///
    /// # Panics
    ///
    /// Panics if `n` is zero.
    #[must_use]
    pub fn forecast(numerator: u64, remaining: usize, n: usize) -> u64 {
        assert!(n > 0, "Stage size must be positive");
        let full = (remaining / n) as u64;
        numerator + full * pair_count(n) + pair_count(remaining % n)
    }

    /// Returns the stage sizes worth trying from a partial state, largest
    /// first, together with the number of sizes the forecasts discarded.
    ///
    /// A size `n` is kept when it fits in the open slots, keeps the
    /// numerator within the upper bound, and its optimistic
    /// [`forecast`](Self::forecast) still reaches the lower bound.
    ///
    /// # Examples
    ///
    /// ```
    /// use ioclab_core::Normalization;
    /// use ioclab_search::{TargetRange, stage::StagePlanner};
    ///
    /// let planner = StagePlanner::new(TargetRange::exact(1.0 / 3.0)?, 3, Normalization::PairCount);
    /// // From scratch only a pair can reach 2/6; singles never can.
    /// assert_eq!(planner.stage_sizes(0, 0, 2), (vec![2], 1));
    /// // After the pair, the last slot takes a single.
    /// assert_eq!(planner.stage_sizes(2, 2, 2), (vec![1], 0));
    /// # Ok::<(), ioclab_search::SearchError>(())
    /// ```
    #[must_use]
    pub fn stage_sizes(&self, numerator: u64, filled: usize, ceiling: usize) -> (Vec<usize>, u64) {
        let remaining = self.len.saturating_sub(filled);
        let mut sizes = Vec::new();
        let mut pruned = 0;
        for n in (1..=ceiling.min(remaining)).rev() {
            let within = self.within_upper(numerator + pair_count(n));
            if within && self.reaches_lower(Self::forecast(numerator, remaining, n)) {
                sizes.push(n);
            } else {
                pruned += 1;
            }
        }
        (sizes, pruned)
    }
}
