use ioclab_core::{MetricError, SymbolId};

/// Errors reported when setting up a reverse search.
#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum SearchError {
    /// The target range is empty, inverted, or not finite.
    #[display("invalid target range [{lo}, {hi}]")]
    InvalidRange {
        /// Lower bound of the rejected range.
        lo: f64,
        /// Upper bound of the rejected range.
        hi: f64,
    },
    /// A symbol is eligible at more positions than a combination mask holds.
    #[display("symbol {symbol} is eligible at {positions} positions, beyond the 128-bit mask limit")]
    TooManyPositions {
        /// The offending symbol.
        symbol: SymbolId,
        /// Number of positions it is eligible at.
        positions: usize,
    },
    /// The target could not be measured from a sample sequence.
    #[display("cannot measure target: {_0}")]
    Metric(#[from] MetricError),
}
