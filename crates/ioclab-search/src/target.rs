use ioclab_core::Ioc;

use crate::SearchError;

/// A closed interval `[lo, hi]` of acceptable IoC values.
///
/// # Examples
///
/// ```
/// use ioclab_search::TargetRange;
///
/// let range = TargetRange::new(0.066, 0.004)?;
/// assert!(range.contains(0.0665));
/// assert!(!range.contains(0.075));
///
/// assert!(TargetRange::new(0.066, -0.1).is_err());
/// # Ok::<(), ioclab_search::SearchError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetRange {
    lo: f64,
    hi: f64,
}

impl TargetRange {
    /// Creates the range `[target − tolerance, target + tolerance]`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidRange`] if `tolerance` is negative or
    /// either bound is not finite.
    pub fn new(target: f64, tolerance: f64) -> Result<Self, SearchError> {
        let (lo, hi) = (target - tolerance, target + tolerance);
        if tolerance < 0.0 {
            return Err(SearchError::InvalidRange { lo, hi });
        }
        Self::from_bounds(lo, hi)
    }

    /// Creates a range that only accepts `target` itself.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidRange`] if `target` is not finite.
    pub fn exact(target: f64) -> Result<Self, SearchError> {
        Self::from_bounds(target, target)
    }

    /// Creates a range around a measured IoC.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidRange`] if `tolerance` is negative or
    /// not finite.
    pub fn from_ioc(ioc: &Ioc, tolerance: f64) -> Result<Self, SearchError> {
        Self::new(ioc.value(), tolerance)
    }

    /// Creates the range `[lo, hi]`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidRange`] if `lo > hi` or either bound is
    /// not finite.
    pub fn from_bounds(lo: f64, hi: f64) -> Result<Self, SearchError> {
        if !lo.is_finite() || !hi.is_finite() || lo > hi {
            return Err(SearchError::InvalidRange { lo, hi });
        }
        Ok(Self { lo, hi })
    }

    /// Returns the lower bound.
    #[must_use]
    pub fn lo(&self) -> f64 {
        self.lo
    }

    /// Returns the upper bound.
    #[must_use]
    pub fn hi(&self) -> f64 {
        self.hi
    }

    /// Returns `true` if `value` lies within the range, bounds included.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        self.lo <= value && value <= self.hi
    }
}

#[cfg(test)]
mod tests {
    use ioclab_core::{Normalization, coincidence_metric};

    use super::*;

    #[test]
    fn test_zero_tolerance_is_exact() {
        let range = TargetRange::new(0.25, 0.0).unwrap();
        assert!(range.contains(0.25));
        assert!(!range.contains(0.250_000_1));
    }

    #[test]
    fn test_rejects_negative_tolerance() {
        assert!(matches!(
            TargetRange::new(0.5, -0.25),
            Err(SearchError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_rejects_inverted_bounds() {
        assert!(TargetRange::from_bounds(0.5, 0.4).is_err());
        assert!(TargetRange::from_bounds(0.4, 0.4).is_ok());
    }

    #[test]
    fn test_rejects_non_finite() {
        assert!(TargetRange::exact(f64::NAN).is_err());
        assert!(TargetRange::new(0.5, f64::INFINITY).is_err());
    }

    #[test]
    fn test_from_ioc_contains_the_measured_value() {
        let ioc = coincidence_metric(b"hello world").unwrap();
        assert_eq!(ioc.normalization(), Normalization::PairCount);
        let range = TargetRange::from_ioc(&ioc, 0.0).unwrap();
        assert!(range.contains(ioc.value()));
    }
}
