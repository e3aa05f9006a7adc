//! Reverse Index of Coincidence search.
//!
//! Given a target IoC, a tolerance, and the candidate symbols of every
//! position of a message, [`ReverseSearch`] lazily enumerates the complete
//! assignments whose IoC falls within `[target − tolerance, target + tolerance]`.
//!
//! Instead of enumerating all `|symbols|^L` messages, the search works in
//! *stages*: each stage commits one symbol to exactly `n` positions at once,
//! stage sizes never increase along a path, and a closed-form forecast drops
//! any stage size whose best possible outcome can no longer reach the target.
//!
//! # Examples
//!
//! ```
//! use ioclab_core::{CandidateSets, coincidence_metric};
//! use ioclab_search::{ReverseSearch, TargetRange};
//!
//! // Three positions over {x, y}, target: exactly one repeated pair.
//! let candidates = CandidateSets::uniform(['x', 'y'], 3);
//! let target = TargetRange::exact(1.0 / 3.0)?;
//!
//! let solutions: Vec<Vec<char>> = ReverseSearch::new(target).search(&candidates)?.collect();
//! assert_eq!(solutions.len(), 6);
//! for solution in &solutions {
//!     assert!(target.contains(coincidence_metric(solution)?.value()));
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use self::{
    assignments::Assignments,
    engine::{ReverseSearch, search_assignments},
    error::SearchError,
    stats::SearchStats,
    target::TargetRange,
};

mod assignments;
mod engine;
mod error;
pub mod stage;
mod stats;
mod target;
