//! Ciphertext profiling against uniform random text.
//!
//! A monoalphabetic substitution preserves the Index of Coincidence of its
//! plaintext, while a text spread evenly over its alphabet drifts towards
//! the random baseline. These helpers measure where a text sits between the
//! two.

use std::hash::Hash;

use crate::{Ioc, MetricError, Normalization, coincidence_metric_with, pair_count};

/// Occurrence counts of each symbol of a sequence.
///
/// Entries are sorted by descending count; ties keep first-appearance order.
///
/// # Examples
///
/// ```
/// use ioclab_core::profile::SymbolCounts;
///
/// let counts = SymbolCounts::from_sequence(b"banana");
/// assert_eq!(counts.counts().collect::<Vec<_>>(), vec![3, 2, 1]);
/// assert_eq!(counts.entries()[0].0, b'a');
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolCounts<S> {
    entries: Vec<(S, usize)>,
    len: usize,
}

impl<S> SymbolCounts<S>
where
    S: Clone + Eq + Hash,
{
    /// Counts the symbols of `sequence`.
    #[must_use]
    pub fn from_sequence(sequence: &[S]) -> Self {
        let mut table = crate::SymbolTable::new();
        let mut counts: Vec<usize> = Vec::new();
        for symbol in sequence {
            let id = table.intern(symbol.clone());
            if id.index() == counts.len() {
                counts.push(0);
            }
            counts[id.index()] += 1;
        }
        let mut entries: Vec<_> = table
            .ids()
            .map(|id| (table.symbol(id).clone(), counts[id.index()]))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        Self {
            entries,
            len: sequence.len(),
        }
    }
}

impl<S> SymbolCounts<S> {
    /// Returns `(symbol, count)` pairs, most frequent first.
    #[must_use]
    pub fn entries(&self) -> &[(S, usize)] {
        &self.entries
    }

    /// Returns the counts alone, most frequent first.
    pub fn counts(&self) -> impl ExactSizeIterator<Item = usize> {
        self.entries.iter().map(|&(_, n)| n)
    }

    /// Returns the number of distinct symbols.
    #[must_use]
    pub fn distinct(&self) -> usize {
        self.entries.len()
    }

    /// Returns the length of the counted sequence.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the counted sequence was empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `Σ count·(count−1)`.
    #[must_use]
    pub fn numerator(&self) -> u64 {
        self.counts().map(pair_count).sum()
    }

    /// Returns the Index of Coincidence of the counted sequence.
    ///
    /// # Errors
    ///
    /// Returns [`MetricError::EmptyInput`] if the sequence was empty.
    pub fn ioc(&self, normalization: Normalization) -> Result<Ioc, MetricError> {
        if self.is_empty() {
            return Err(MetricError::EmptyInput);
        }
        Ok(Ioc::new(self.numerator(), self.len, normalization))
    }
}

/// Returns the expected IoC of a uniform random text of length `len` over
/// `alphabet_size` symbols.
///
/// Under [`Normalization::PairCount`] this is `1 / alphabet_size` for any
/// `len ≥ 2`.
///
/// # Examples
///
/// ```
/// use ioclab_core::{Normalization, profile::expected_random_ioc};
///
/// let ioc = expected_random_ioc(26, 1000, Normalization::PairCount);
/// assert!((ioc - 1.0 / 26.0).abs() < 1e-12);
/// ```
#[must_use]
#[expect(clippy::cast_precision_loss)]
pub fn expected_random_ioc(alphabet_size: usize, len: usize, normalization: Normalization) -> f64 {
    let denominator = normalization.denominator(len);
    if alphabet_size == 0 || denominator == 0 {
        return 0.0;
    }
    pair_count(len) as f64 / alphabet_size as f64 / denominator as f64
}

/// An IoC measurement compared against the random baseline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IocProfile {
    /// The measured value.
    pub ioc: Ioc,
    /// The expected value for uniform random text of the same length.
    pub random: f64,
    /// `ioc / random`; `1.0` looks random, larger values show structure.
    pub ratio: f64,
}

impl IocProfile {
    /// Measures `sequence` against random text over `alphabet_size` symbols.
    ///
    /// # Errors
    ///
    /// Returns [`MetricError::EmptyInput`] if `sequence` is empty.
    pub fn measure<S>(
        sequence: &[S],
        alphabet_size: usize,
        normalization: Normalization,
    ) -> Result<Self, MetricError>
    where
        S: Eq + Hash,
    {
        let ioc = coincidence_metric_with(sequence, normalization)?;
        let random = expected_random_ioc(alphabet_size, sequence.len(), normalization);
        let ratio = if random > 0.0 { ioc.value() / random } else { 0.0 };
        Ok(Self { ioc, random, ratio })
    }
}

/// Builds a message of `len` symbols split into `parts` equal blocks, each
/// block repeating one distinct symbol.
///
/// The `len % parts` trailing positions cycle through the block symbols.
///
/// # Panics
///
/// Panics if `parts` is zero or greater than `len`.
///
/// # Examples
///
/// ```
/// use ioclab_core::profile::split_message;
///
/// assert_eq!(split_message(7, 3), vec![0, 0, 1, 1, 2, 2, 0]);
/// ```
#[must_use]
pub fn split_message(len: usize, parts: usize) -> Vec<usize> {
    assert!(
        (1..=len).contains(&parts),
        "Split must be between 1 and {len}, got {parts}"
    );
    let chunk = len / parts;
    let padding = len - parts * chunk;
    (0..parts)
        .flat_map(|symbol| std::iter::repeat_n(symbol, chunk))
        .chain((0..padding).map(|i| i % parts))
        .collect()
}

/// Returns the IoC of [`split_message`] for every split of a `len`-symbol
/// message, from one block to `len` blocks.
///
/// The curve shows how the statistic falls as the same length is spread
/// over more symbols. It holds exactly `len` entries, one per split.
#[must_use]
pub fn split_profile(len: usize, normalization: Normalization) -> Vec<(usize, Ioc)> {
    (1..=len)
        .map(|parts| {
            let counts = SymbolCounts::from_sequence(&split_message(len, parts));
            (parts, Ioc::new(counts.numerator(), len, normalization))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_ties_keep_first_appearance() {
        let counts = SymbolCounts::from_sequence(&['b', 'a', 'a', 'b', 'c']);
        assert_eq!(counts.entries(), &[('b', 2), ('a', 2), ('c', 1)]);
        assert_eq!(counts.distinct(), 3);
        assert_eq!(counts.numerator(), 4);
    }

    #[test]
    fn test_counts_agree_with_metric() {
        let text = b"attack at dawn";
        let counts = SymbolCounts::from_sequence(text);
        let ioc = coincidence_metric_with(text, Normalization::PairCount).unwrap();
        assert_eq!(counts.ioc(Normalization::PairCount).unwrap(), ioc);
    }

    #[test]
    fn test_counts_of_empty_sequence() {
        let counts = SymbolCounts::<u8>::from_sequence(&[]);
        assert!(counts.is_empty());
        assert_eq!(
            counts.ioc(Normalization::Length),
            Err(MetricError::EmptyInput)
        );
    }

    #[test]
    fn test_expected_random_length_normalization() {
        let ioc = expected_random_ioc(10, 11, Normalization::Length);
        assert!((ioc - 1.0).abs() < 1e-12);
        assert!(expected_random_ioc(0, 11, Normalization::Length).abs() < f64::EPSILON);
    }

    #[test]
    fn test_profile_ratio() {
        // Two symbols, each twice: 4 / 12 against 1 / 2.
        let profile = IocProfile::measure(b"aabb", 2, Normalization::PairCount).unwrap();
        assert!((profile.random - 0.5).abs() < 1e-12);
        assert!((profile.ratio - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_split_message_exact() {
        assert_eq!(split_message(6, 2), vec![0, 0, 0, 1, 1, 1]);
        assert_eq!(split_message(3, 3), vec![0, 1, 2]);
    }

    #[test]
    #[should_panic(expected = "Split must be")]
    fn test_split_message_rejects_zero_parts() {
        let _ = split_message(4, 0);
    }

    #[test]
    fn test_split_profile_covers_every_split() {
        for normalization in [Normalization::PairCount, Normalization::Length] {
            let profile = split_profile(9, normalization);
            let parts: Vec<_> = profile.iter().map(|&(parts, _)| parts).collect();
            assert_eq!(parts, (1..=9).collect::<Vec<_>>());
            for (parts, ioc) in profile {
                let message = split_message(9, parts);
                assert_eq!(
                    Ok(ioc),
                    coincidence_metric_with(&message, normalization),
                    "{parts} parts"
                );
            }
        }
        assert!(split_profile(0, Normalization::PairCount).is_empty());
    }

    #[test]
    fn test_split_profile_is_non_increasing() {
        let profile = split_profile(24, Normalization::PairCount);
        assert_eq!(profile.len(), 24);
        assert!((profile[0].1.value() - 1.0).abs() < f64::EPSILON);
        assert_eq!(profile[23].1.numerator(), 0);
        for pair in profile.windows(2) {
            assert!(pair[0].1.numerator() >= pair[1].1.numerator());
        }
    }
}
