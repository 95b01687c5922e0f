//! Core domain logic for Tacora, a personal task tracker.
//! This crate is the single source of truth for lifecycle invariants and
//! conflict analysis.

pub mod conflict;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod sched;
pub mod service;
pub mod suggest;
pub mod summary;

pub use conflict::{find_conflicts, ConflictPolicy};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{
    Priority, Task, TaskDraft, TaskId, TaskKind, TaskPatch, TaskValidationError,
};
pub use repo::mem_repo::MemoryTaskRepository;
pub use repo::task_repo::{RepoError, RepoResult, SqliteTaskRepository, TaskRepository};
pub use sched::soft_delete::{Clock, DeleteScheduler, PendingDeletion, SystemClock};
pub use service::task_service::TaskService;
pub use suggest::{suggest, Suggestion};
pub use summary::{compute_status, count_tasks_by_status, hours_left, Status, TaskCounts};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
