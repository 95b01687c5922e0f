//! Delayed-deletion scheduling.
//!
//! # Responsibility
//! - Decouple user-visible deletion from permanent data loss.
//! - Own the pending-deletion table; nothing else mutates it.
//!
//! # Invariants
//! - At most one pending entry exists per task id.
//! - A pending task is absent from the live set until undone or reaped.

pub mod soft_delete;
