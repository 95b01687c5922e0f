//! Scheduling-risk detection over the live task set.
//!
//! # Responsibility
//! - Flag every task that participates in at least one risky pairing.
//! - Normalize caller-supplied policy values before use.
//!
//! # Invariants
//! - Detection is a pure function of its inputs; it never fails for
//!   well-formed tasks.
//! - Flagging is symmetric: if A is flagged because of B, so is B.

mod detector;

pub use detector::{
    find_conflicts, ConflictPolicy, DEFAULT_MIN_HEAVY_MINS, DEFAULT_MIN_PRIORITY_SUM,
    DEFAULT_WINDOW_HOURS,
};
