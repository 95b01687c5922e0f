//! Effort and priority suggestion.
//!
//! # Responsibility
//! - Produce the deterministic estimate/priority hint the core always
//!   has available, independent of any network-backed estimator.
//!
//! # Invariants
//! - Suggestions are advisory; create/update paths accept whatever the
//!   caller supplies regardless of provenance.

mod heuristic;

pub use heuristic::{suggest, Suggestion};
