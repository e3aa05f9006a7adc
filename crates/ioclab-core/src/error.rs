/// Errors reported by the coincidence metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum MetricError {
    /// The metric was requested for a sequence with no symbols.
    #[display("cannot compute the index of coincidence of an empty sequence")]
    EmptyInput,
}
