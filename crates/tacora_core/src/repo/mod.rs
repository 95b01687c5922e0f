//! Repository layer abstractions and store implementations.
//!
//! # Responsibility
//! - Define the live-set access contract shared by every store.
//! - Isolate SQLite query details from lifecycle orchestration.
//!
//! # Invariants
//! - Repository writes enforce `Task::validate()` before mutation.
//! - Repository APIs return semantic errors (`NotFound`, `DuplicateId`)
//!   in addition to storage transport errors.

pub mod mem_repo;
pub mod task_repo;
