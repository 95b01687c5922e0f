//! In-memory task repository.
//!
//! # Responsibility
//! - Hold the live task set for hosts that keep state in process memory.
//! - Serve as the isolated store that tests construct per case.
//!
//! # Invariants
//! - Ids are unique across the live set at every instant.
//! - Mutations are visible to every subsequent read (no staleness).

use crate::model::task::{Task, TaskDraft, TaskId, TaskPatch};
use crate::repo::task_repo::{RepoError, RepoResult, TaskRepository};
use log::debug;

/// Process-memory task store with a defined lifecycle: constructed once
/// by the host, dropped at shutdown.
#[derive(Debug, Default)]
pub struct MemoryTaskRepository {
    tasks: Vec<Task>,
}

impl MemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    fn position(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| task.id == id)
    }
}

impl TaskRepository for MemoryTaskRepository {
    fn add_task(&mut self, draft: &TaskDraft) -> RepoResult<Task> {
        let task = Task::from_draft(draft);
        self.insert_task(&task)?;
        Ok(task)
    }

    fn insert_task(&mut self, task: &Task) -> RepoResult<()> {
        task.validate()?;

        if self.position(task.id).is_some() {
            return Err(RepoError::DuplicateId(task.id));
        }

        self.tasks.push(task.clone());
        debug!("event=task_insert module=repo status=ok id={}", task.id);
        Ok(())
    }

    fn update_task(&mut self, id: TaskId, patch: &TaskPatch) -> RepoResult<()> {
        let index = self.position(id).ok_or(RepoError::NotFound(id))?;

        // Validate the merged record before committing it to the live set.
        let mut merged = self.tasks[index].clone();
        merged.apply_patch(patch);
        merged.validate()?;

        self.tasks[index] = merged;
        Ok(())
    }

    fn remove_task(&mut self, id: TaskId) -> RepoResult<()> {
        if let Some(index) = self.position(id) {
            self.tasks.remove(index);
            debug!("event=task_remove module=repo status=ok id={id}");
        }
        Ok(())
    }

    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>> {
        Ok(self.tasks.iter().find(|task| task.id == id).cloned())
    }

    fn list_tasks(&self) -> RepoResult<Vec<Task>> {
        Ok(self.tasks.clone())
    }
}
