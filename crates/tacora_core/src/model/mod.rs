//! Domain model for the task tracker.
//!
//! # Responsibility
//! - Define the canonical task record and its closed enumerations.
//! - Keep lifecycle and conflict logic working over one shared shape.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId`.
//! - A given id is live, pending deletion, or gone; never two at once.

pub mod task;
