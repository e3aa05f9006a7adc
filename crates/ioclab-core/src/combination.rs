//! Bitmask enumeration of `k`-of-`n` subsets.
//!
//! [`combinations`] yields every `n`-bit pattern with exactly `k` bits set,
//! each exactly once. Bit `i` of a pattern stands for the `i`-th item of
//! whatever list the caller is choosing from; the reverse search uses it to
//! choose which of a symbol's available positions the symbol takes.
//!
//! The enumeration places the first set bit at each position `i` in turn and
//! then, recursively, places the remaining `k−1` bits strictly above `i`.
//! [`Combinations`] unrolls that recursion into an explicit stack of picks,
//! one per recursion level, so patterns come out in lexicographic order of
//! their set-bit indices.
//!
//! # Examples
//!
//! ```
//! use ioclab_core::combinations;
//!
//! let masks: Vec<_> = combinations(4, 2).collect();
//! assert_eq!(masks, vec![0b0011, 0b0101, 0b1001, 0b0110, 0b1010, 0b1100]);
//! ```

use std::iter::FusedIterator;

use tinyvec::TinyVec;

/// A bitmask over at most [`MAX_MASK_BITS`] items.
pub type Mask = u128;

/// The largest `n` accepted by [`combinations`].
pub const MAX_MASK_BITS: usize = Mask::BITS as usize;

/// Returns an iterator over every `n`-bit mask with exactly `k` bits set.
///
/// `k = 0` yields the empty mask once.
///
/// # Panics
///
/// Panics if `k > n` or `n > MAX_MASK_BITS`.
#[must_use]
pub fn combinations(n: usize, k: usize) -> Combinations {
    Combinations::new(n, k)
}

/// Iterator returned by [`combinations`].
#[derive(Debug, Clone)]
pub struct Combinations {
    n: u8,
    /// Set-bit indices of the next mask, strictly increasing.
    picks: TinyVec<[u8; 8]>,
    done: bool,
}

impl Combinations {
    /// Creates the iterator; see [`combinations`].
    ///
    /// # Panics
    ///
    /// Panics if `k > n` or `n > MAX_MASK_BITS`.
    #[must_use]
    pub fn new(n: usize, k: usize) -> Self {
        assert!(
            n <= MAX_MASK_BITS,
            "Combination width must be at most {MAX_MASK_BITS}, got {n}"
        );
        assert!(k <= n, "Cannot choose {k} bits out of {n}");
        #[expect(clippy::cast_possible_truncation)]
        let picks = (0..k).map(|i| i as u8).collect();
        #[expect(clippy::cast_possible_truncation)]
        let n = n as u8;
        Self {
            n,
            picks,
            done: false,
        }
    }

    /// Returns the number of bits set in every mask.
    #[must_use]
    pub fn k(&self) -> usize {
        self.picks.len()
    }

    fn current_mask(&self) -> Mask {
        self.picks.iter().fold(0, |mask: Mask, &bit| mask | (1 << bit))
    }

    /// Moves the picks to the next tuple, returning `false` when exhausted.
    fn advance(&mut self) -> bool {
        let k = self.picks.len();
        let n = usize::from(self.n);
        // Deepest level that can still move right without running out of room.
        let Some(level) = (0..k)
            .rev()
            .find(|&i| usize::from(self.picks[i]) < n - k + i)
        else {
            return false;
        };
        self.picks[level] += 1;
        for i in level + 1..k {
            self.picks[i] = self.picks[i - 1] + 1;
        }
        true
    }
}

impl Iterator for Combinations {
    type Item = Mask;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let mask = self.current_mask();
        self.done = !self.advance();
        Some(mask)
    }
}

impl FusedIterator for Combinations {}

/// Returns an iterator over the indices of the set bits of `mask`, ascending.
///
/// # Examples
///
/// ```
/// use ioclab_core::combination::mask_bits;
///
/// let bits: Vec<_> = mask_bits(0b1010_0001).collect();
/// assert_eq!(bits, vec![0, 5, 7]);
/// ```
pub fn mask_bits(mut mask: Mask) -> impl Iterator<Item = usize> {
    std::iter::from_fn(move || {
        if mask == 0 {
            return None;
        }
        let bit = mask.trailing_zeros() as usize;
        mask &= mask - 1;
        Some(bit)
    })
}

/// Returns `C(n, k)`, or `None` if it does not fit in a `u128`.
///
/// # Examples
///
/// ```
/// use ioclab_core::combination::binomial;
///
/// assert_eq!(binomial(4, 2), Some(6));
/// assert_eq!(binomial(3, 5), Some(0));
/// ```
#[must_use]
pub fn binomial(n: usize, k: usize) -> Option<u128> {
    if k > n {
        return Some(0);
    }
    let k = k.min(n - k);
    let mut result: u128 = 1;
    for i in 0..k {
        // C(n, i + 1) = C(n, i)·(n − i)/(i + 1). Cancel the common factor of
        // C(n, i) and i + 1 first; what is left of i + 1 divides n − i.
        let (factor, divisor) = ((n - i) as u128, i as u128 + 1);
        let g = gcd(result, divisor);
        result = (result / g).checked_mul(factor / (divisor / g))?;
    }
    Some(result)
}

fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_one_of_four() {
        let masks: Vec<_> = combinations(4, 1).collect();
        assert_eq!(masks, vec![1, 2, 4, 8]);
    }

    #[test]
    fn test_two_of_four() {
        let masks: Vec<_> = combinations(4, 2).collect();
        assert_eq!(masks, vec![3, 5, 9, 6, 10, 12]);
    }

    #[test]
    fn test_zero_bits_yields_empty_mask_once() {
        let masks: Vec<_> = combinations(5, 0).collect();
        assert_eq!(masks, vec![0]);
        let masks: Vec<_> = combinations(0, 0).collect();
        assert_eq!(masks, vec![0]);
    }

    #[test]
    fn test_all_bits() {
        let masks: Vec<_> = combinations(6, 6).collect();
        assert_eq!(masks, vec![0b11_1111]);
    }

    #[test]
    fn test_full_width() {
        let mut iter = combinations(MAX_MASK_BITS, 1);
        assert_eq!(iter.next(), Some(1));
        assert_eq!(iter.last(), Some(1_u128 << 127));
    }

    #[test]
    fn test_fused() {
        let mut iter = combinations(2, 2);
        assert_eq!(iter.next(), Some(3));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
    }

    #[test]
    #[should_panic(expected = "Cannot choose")]
    fn test_rejects_k_greater_than_n() {
        let _ = combinations(2, 3);
    }

    #[test]
    #[should_panic(expected = "Combination width")]
    fn test_rejects_wide_masks() {
        let _ = combinations(MAX_MASK_BITS + 1, 1);
    }

    #[test]
    fn test_binomial_large() {
        assert_eq!(binomial(128, 1), Some(128));
        assert_eq!(binomial(10, 3), Some(120));
        // C(128, 63)·65 overflows even though C(128, 64) fits.
        let pascal = binomial(127, 63)
            .unwrap()
            .checked_add(binomial(127, 64).unwrap());
        assert_eq!(binomial(128, 64), pascal);
        assert!(pascal.is_some());
        assert_eq!(binomial(128, 64), binomial(128, 128 - 64));
    }

    #[test]
    fn test_binomial_overflow() {
        assert_eq!(binomial(200, 100), None);
        assert_eq!(binomial(200, 1), Some(200));
    }

    #[test]
    fn test_k_matches_popcount() {
        for (n, k) in [(0, 0), (5, 0), (5, 3), (MAX_MASK_BITS, 2)] {
            let iter = combinations(n, k);
            assert_eq!(iter.k(), k);
            assert!(iter.take(4).all(|mask| mask.count_ones() as usize == k));
        }
    }

    proptest! {
        #[test]
        fn prop_yields_every_k_subset_once((n, k) in (0_usize..=12).prop_flat_map(|n| (Just(n), 0..=n))) {
            let masks: Vec<_> = combinations(n, k).collect();
            let expected = usize::try_from(binomial(n, k).unwrap()).unwrap();
            prop_assert_eq!(masks.len(), expected);

            let distinct: HashSet<_> = masks.iter().copied().collect();
            prop_assert_eq!(distinct.len(), masks.len());

            for mask in masks {
                prop_assert_eq!(mask.count_ones() as usize, k);
                prop_assert_eq!(mask >> n, 0);
            }
        }

        #[test]
        fn prop_binomial_follows_pascal((n, k) in (1_usize..=MAX_MASK_BITS).prop_flat_map(|n| (Just(n), 1..=n))) {
            let left = binomial(n - 1, k - 1).unwrap();
            let right = binomial(n - 1, k).unwrap();
            prop_assert_eq!(binomial(n, k), left.checked_add(right));
        }

        #[test]
        fn prop_mask_bits_round_trip(mask in any::<u128>()) {
            let rebuilt = mask_bits(mask).fold(0_u128, |acc, bit| acc | (1_u128 << bit));
            prop_assert_eq!(rebuilt, mask);
        }
    }
}
