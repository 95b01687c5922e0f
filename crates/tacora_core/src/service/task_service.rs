//! Task lifecycle use-case service.
//!
//! # Responsibility
//! - Tie the repository (live set) and the soft-delete scheduler
//!   (pending table) into one facade for hosts.
//! - Convert lifecycle not-found conditions into silent no-ops, so a
//!   double undo or a delete of a missing id is always safe.
//!
//! # Invariants
//! - The service remains storage-agnostic; it works over any
//!   `TaskRepository` implementation.
//! - The live set and the pending table are only ever mutated through
//!   their owning component.

use crate::conflict::{find_conflicts, ConflictPolicy};
use crate::model::task::{Task, TaskDraft, TaskId, TaskPatch};
use crate::repo::task_repo::{RepoError, RepoResult, TaskRepository};
use crate::sched::soft_delete::{Clock, DeleteScheduler, SystemClock};
use crate::summary::{count_tasks_by_status, TaskCounts};
use log::debug;
use std::collections::HashSet;

/// Facade over a task repository plus a delete scheduler.
pub struct TaskService<R: TaskRepository, C: Clock = SystemClock> {
    repo: R,
    sched: DeleteScheduler<C>,
}

impl<R: TaskRepository> TaskService<R, SystemClock> {
    /// Creates a service over the given repository with the system
    /// wall clock driving the undo window.
    pub fn new(repo: R) -> Self {
        Self::with_scheduler(repo, DeleteScheduler::new())
    }
}

impl<R: TaskRepository, C: Clock> TaskService<R, C> {
    /// Creates a service with a caller-built scheduler, e.g. one with an
    /// injected clock.
    pub fn with_scheduler(repo: R, sched: DeleteScheduler<C>) -> Self {
        Self { repo, sched }
    }

    /// Creates a task from a draft and returns the stored record.
    pub fn create_task(&mut self, draft: &TaskDraft) -> RepoResult<Task> {
        self.repo.add_task(draft)
    }

    /// Merges a patch into the task matching `id`. A missing id is a
    /// silent no-op; validation failures still surface.
    pub fn update_task(&mut self, id: TaskId, patch: &TaskPatch) -> RepoResult<()> {
        match self.repo.update_task(id, patch) {
            Err(RepoError::NotFound(_)) => {
                debug!("event=task_update module=service status=noop id={id} reason=not_live");
                Ok(())
            }
            other => other,
        }
    }

    /// Deletes immediately, bypassing the undo window. Idempotent.
    pub fn remove_task(&mut self, id: TaskId) -> RepoResult<()> {
        self.repo.remove_task(id)
    }

    /// Starts a delayed deletion with a `delay_seconds` undo window.
    pub fn schedule_delete(&mut self, id: TaskId, delay_seconds: u32) -> RepoResult<()> {
        self.sched.schedule_delete(&mut self.repo, id, delay_seconds)
    }

    /// Cancels a pending deletion, restoring the original task.
    pub fn undo_delete(&mut self, id: TaskId) -> RepoResult<()> {
        self.sched.undo_delete(&mut self.repo, id)
    }

    /// Seconds left to undo the pending deletion of `id`, if any.
    pub fn undo_remaining_seconds(&self, id: TaskId) -> Option<i64> {
        self.sched.remaining_seconds(id)
    }

    /// Completes pending deletions whose window has elapsed; returns how
    /// many were completed.
    pub fn expire_due(&mut self) -> usize {
        self.sched.expire_due()
    }

    pub fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>> {
        self.repo.get_task(id)
    }

    pub fn list_tasks(&self) -> RepoResult<Vec<Task>> {
        self.repo.list_tasks()
    }

    /// Ids of live tasks currently judged to be in conflict.
    pub fn conflicts(&self, policy: &ConflictPolicy) -> RepoResult<HashSet<TaskId>> {
        Ok(find_conflicts(&self.repo.list_tasks()?, policy))
    }

    /// Dashboard counts over the live set, evaluated at the scheduler's
    /// current instant.
    pub fn counts(&self, policy: &ConflictPolicy) -> RepoResult<TaskCounts> {
        let tasks = self.repo.list_tasks()?;
        Ok(count_tasks_by_status(&tasks, policy, self.sched.now_ms()))
    }
}
