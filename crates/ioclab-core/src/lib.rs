//! Core data structures for Index of Coincidence analysis.
//!
//! This crate provides the building blocks shared by the reverse-IoC search
//! and by the ciphertext profiling tools:
//!
//! 1. **Message model**
//!    - [`position`]: Type-safe index into the message being built
//!    - [`symbol`]: Interning of opaque symbol values into dense [`SymbolId`]s
//!    - [`candidates`]: Per-position candidate symbol sets
//!
//! 2. **Statistics**
//!    - [`metric`]: The coincidence metric and its [`Normalization`] conventions
//!    - [`profile`]: Comparisons against uniform random text
//!
//! 3. **Search primitives**
//!    - [`combination`]: Bitmask enumeration of `k`-of-`n` subsets
//!    - [`index`]: The bidirectional [`PositionSymbolIndex`]
//!
//! # Examples
//!
//! ```
//! use ioclab_core::{Normalization, coincidence_metric_with};
//!
//! let ioc = coincidence_metric_with(&['a', 'a', 'b', 'b'], Normalization::PairCount)?;
//! assert_eq!(ioc.numerator(), 4);
//! assert_eq!(ioc.denominator(), 12);
//! # Ok::<(), ioclab_core::MetricError>(())
//! ```

pub mod candidates;
pub mod combination;
mod error;
pub mod index;
pub mod metric;
pub mod position;
pub mod profile;
pub mod symbol;

pub use self::{
    candidates::CandidateSets,
    combination::{Combinations, Mask, combinations},
    error::MetricError,
    index::PositionSymbolIndex,
    metric::{Ioc, Normalization, coincidence_metric, coincidence_metric_with, pair_count},
    position::Position,
    symbol::{SymbolId, SymbolTable},
};
