//! The coincidence metric.
//!
//! The Index of Coincidence of a sequence of length `L` is
//! `Σ count(s)·(count(s)−1) / denominator`, summed over the distinct symbols
//! `s` of the sequence. Two denominators are in use, selected with
//! [`Normalization`]:
//!
//! - [`Normalization::PairCount`] (`L·(L−1)`, the default) gives the
//!   probability that two symbols drawn without replacement are equal.
//! - [`Normalization::Length`] (`L`) gives the unnormalized repeat density.
//!
//! The reverse search takes the same [`Normalization`] value, so the metric
//! and the search pruning arithmetic always agree.

use std::{collections::HashMap, fmt, hash::Hash};

use crate::MetricError;

/// Returns `n·(n−1)`, the contribution of a symbol that occurs `n` times.
///
/// # Examples
///
/// ```
/// use ioclab_core::pair_count;
///
/// assert_eq!(pair_count(0), 0);
/// assert_eq!(pair_count(1), 0);
/// assert_eq!(pair_count(4), 12);
/// ```
#[must_use]
#[inline]
pub const fn pair_count(n: usize) -> u64 {
    let n = n as u64;
    n * n.saturating_sub(1)
}

/// The denominator convention of the coincidence metric.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Normalization {
    /// Denominator `L·(L−1)`.
    #[default]
    PairCount,
    /// Denominator `L`.
    Length,
}

impl Normalization {
    /// Returns the denominator for a sequence of length `len`.
    #[must_use]
    pub const fn denominator(self, len: usize) -> u64 {
        match self {
            Self::PairCount => pair_count(len),
            Self::Length => len as u64,
        }
    }

    /// Returns `numerator / denominator(len)` as a floating point value.
    ///
    /// A zero denominator (a single-symbol sequence under
    /// [`PairCount`](Self::PairCount)) can only carry a zero numerator, and
    /// is defined to yield `0.0`.
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn ratio(self, numerator: u64, len: usize) -> f64 {
        let denominator = self.denominator(len);
        if denominator == 0 {
            debug_assert_eq!(numerator, 0);
            return 0.0;
        }
        numerator as f64 / denominator as f64
    }
}

/// An exact Index of Coincidence value.
///
/// The numerator is kept as an integer so that callers can compare values
/// without rounding, and [`value`](Self::value) converts to `f64` on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ioc {
    numerator: u64,
    len: usize,
    normalization: Normalization,
}

impl Ioc {
    /// Creates an IoC from its numerator and the length of the sequence.
    #[must_use]
    pub const fn new(numerator: u64, len: usize, normalization: Normalization) -> Self {
        Self {
            numerator,
            len,
            normalization,
        }
    }

    /// Returns `Σ count(s)·(count(s)−1)`.
    #[must_use]
    pub const fn numerator(&self) -> u64 {
        self.numerator
    }

    /// Returns the denominator implied by the length and normalization.
    #[must_use]
    pub const fn denominator(&self) -> u64 {
        self.normalization.denominator(self.len)
    }

    /// Returns the length of the measured sequence.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the measured sequence was empty.
    ///
    /// Values produced by [`coincidence_metric`] are never empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the normalization used for the denominator.
    #[must_use]
    pub const fn normalization(&self) -> Normalization {
        self.normalization
    }

    /// Returns the IoC as a floating point value.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.normalization.ratio(self.numerator, self.len)
    }
}

impl fmt::Display for Ioc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} ({:.6})",
            self.numerator,
            self.denominator(),
            self.value()
        )
    }
}

/// Computes the Index of Coincidence with the default
/// [`Normalization::PairCount`] denominator.
///
/// # Errors
///
/// Returns [`MetricError::EmptyInput`] if `sequence` is empty.
///
/// # Examples
///
/// ```
/// use ioclab_core::coincidence_metric;
///
/// let ioc = coincidence_metric(&['a', 'a', 'b', 'b'])?;
/// assert!((ioc.value() - 1.0 / 3.0).abs() < 1e-12);
/// # Ok::<(), ioclab_core::MetricError>(())
/// ```
pub fn coincidence_metric<S>(sequence: &[S]) -> Result<Ioc, MetricError>
where
    S: Eq + Hash,
{
    coincidence_metric_with(sequence, Normalization::PairCount)
}

/// Computes the Index of Coincidence with an explicit normalization.
///
/// # Errors
///
/// Returns [`MetricError::EmptyInput`] if `sequence` is empty.
pub fn coincidence_metric_with<S>(
    sequence: &[S],
    normalization: Normalization,
) -> Result<Ioc, MetricError>
where
    S: Eq + Hash,
{
    if sequence.is_empty() {
        return Err(MetricError::EmptyInput);
    }
    let mut counts: HashMap<&S, usize> = HashMap::new();
    for symbol in sequence {
        *counts.entry(symbol).or_insert(0) += 1;
    }
    let numerator = counts.values().map(|&n| pair_count(n)).sum();
    Ok(Ioc::new(numerator, sequence.len(), normalization))
}
