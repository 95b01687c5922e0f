//! Soft-delete scheduler with a bounded undo window.
//!
//! # Responsibility
//! - Move tasks from the live set into a pending-deletion table, holding
//!   them there for a grace window before they become unrecoverable.
//! - Restore pending tasks on undo with every original field intact.
//!
//! # Invariants
//! - Per id, the state machine is Live -> PendingDeletion -> Gone, with
//!   the single side transition PendingDeletion -> Live via undo. There
//!   is no path from Gone back to Live.
//! - The armed deadline stored in the pending entry is the cancel
//!   handle; dropping the entry disarms it. Re-scheduling an id replaces
//!   the previous entry, so the old deadline can never fire twice.
//! - Expired entries are reaped before any other effect, so callers can
//!   never observe (or undo) a deletion whose window has elapsed.
//!
//! The timer is a wall-clock deadline, not a background thread: entry
//! points reap lazily and hosts with an event loop call `expire_due()`
//! periodically. Undo after the window is therefore a no-op whether or
//! not a tick has run in between.

use crate::model::task::{Task, TaskId};
use crate::repo::task_repo::{RepoResult, TaskRepository};
use log::{debug, info};
use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};

/// Wall-clock source, injectable so tests never sleep.
pub trait Clock {
    /// Current instant in epoch milliseconds.
    fn now_ms(&self) -> i64;
}

/// System wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(elapsed) => elapsed.as_millis() as i64,
            // Clock before the epoch; treat as epoch rather than panic.
            Err(_) => 0,
        }
    }
}

/// Snapshot of a task held between delete request and permanent removal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDeletion {
    /// Full field copy taken at the moment of deletion.
    pub task: Task,
    /// Wall-clock time the deletion was requested, epoch ms.
    pub deleted_at_ms: i64,
    /// Armed one-shot deadline; doubles as the cancel handle.
    pub expires_at_ms: i64,
}

/// Owner of the pending-deletion table.
///
/// The scheduler never owns the live set; callers pass their repository
/// into the lifecycle operations, keeping each table under exactly one
/// logical owner.
#[derive(Debug)]
pub struct DeleteScheduler<C: Clock = SystemClock> {
    clock: C,
    pending: HashMap<TaskId, PendingDeletion>,
}

impl DeleteScheduler<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for DeleteScheduler<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> DeleteScheduler<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            pending: HashMap::new(),
        }
    }

    /// Current instant per the injected clock, epoch ms.
    pub fn now_ms(&self) -> i64 {
        self.clock.now_ms()
    }

    /// Removes the task from the live set and holds a snapshot for
    /// `delay_seconds` before it becomes permanently unrecoverable.
    ///
    /// An id with no matching live task is silently ignored. An existing
    /// pending entry for the same id is replaced, which disarms its old
    /// deadline.
    ///
    /// # Errors
    /// - Only storage transport errors; not-found is a no-op.
    pub fn schedule_delete<R: TaskRepository>(
        &mut self,
        repo: &mut R,
        id: TaskId,
        delay_seconds: u32,
    ) -> RepoResult<()> {
        let now_ms = self.clock.now_ms();
        self.reap_expired(now_ms);

        let Some(task) = repo.get_task(id)? else {
            debug!("event=delete_schedule module=sched status=noop id={id} reason=not_live");
            return Ok(());
        };

        repo.remove_task(id)?;
        let expires_at_ms = now_ms + i64::from(delay_seconds) * 1000;
        self.pending.insert(
            id,
            PendingDeletion {
                task,
                deleted_at_ms: now_ms,
                expires_at_ms,
            },
        );

        info!(
            "event=delete_schedule module=sched status=ok id={id} delay_s={delay_seconds}"
        );
        Ok(())
    }

    /// Cancels a pending deletion and re-inserts the snapshot into the
    /// live set with all original fields, id included.
    ///
    /// A missing or already-expired entry is silently ignored; undo
    /// cannot resurrect a task whose window has elapsed.
    ///
    /// # Errors
    /// - Only storage transport errors; not-found is a no-op.
    pub fn undo_delete<R: TaskRepository>(
        &mut self,
        repo: &mut R,
        id: TaskId,
    ) -> RepoResult<()> {
        self.reap_expired(self.clock.now_ms());

        let Some(entry) = self.pending.remove(&id) else {
            debug!("event=delete_undo module=sched status=noop id={id} reason=not_pending");
            return Ok(());
        };

        repo.insert_task(&entry.task)?;
        info!("event=delete_undo module=sched status=ok id={id}");
        Ok(())
    }

    /// Drops the pending entry for `id`, completing the deletion.
    ///
    /// The task left the live set when the deletion was scheduled, so
    /// this only forgets the snapshot. Idempotent; calling it twice or
    /// on an unknown id is a safe no-op.
    pub fn permanently_delete(&mut self, id: TaskId) {
        if self.pending.remove(&id).is_some() {
            info!("event=delete_permanent module=sched status=ok id={id}");
        }
    }

    /// Completes every pending deletion whose window has elapsed.
    ///
    /// Hosts with an event loop call this periodically; entry points
    /// also reap on their own, so skipping the tick only delays the
    /// memory release, never the observable state change.
    ///
    /// Returns the number of deletions completed.
    pub fn expire_due(&mut self) -> usize {
        self.reap_expired(self.clock.now_ms())
    }

    /// Seconds left in the grace window for `id`, rounded up, for UI
    /// countdown display. `None` when no undoable entry exists.
    pub fn remaining_seconds(&self, id: TaskId) -> Option<i64> {
        let entry = self.pending.get(&id)?;
        let left_ms = entry.expires_at_ms - self.clock.now_ms();
        if left_ms <= 0 {
            return None;
        }
        Some((left_ms + 999) / 1000)
    }

    /// Whether `id` currently sits in the pending-deletion table with an
    /// unexpired window.
    pub fn is_pending(&self, id: TaskId) -> bool {
        self.remaining_seconds(id).is_some()
    }

    /// Number of undoable entries currently held.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    fn reap_expired(&mut self, now_ms: i64) -> usize {
        let expired: Vec<TaskId> = self
            .pending
            .iter()
            .filter(|(_, entry)| entry.expires_at_ms <= now_ms)
            .map(|(id, _)| *id)
            .collect();

        for id in &expired {
            self.permanently_delete(*id);
        }
        expired.len()
    }
}

#[cfg(test)]
mod tests {
    use super::{Clock, DeleteScheduler, SystemClock};
    use crate::model::task::{Priority, TaskDraft, TaskKind};
    use crate::repo::mem_repo::MemoryTaskRepository;
    use crate::repo::task_repo::TaskRepository;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Clone)]
    struct ManualClock(Rc<Cell<i64>>);

    impl Clock for ManualClock {
        fn now_ms(&self) -> i64 {
            self.0.get()
        }
    }

    fn draft() -> TaskDraft {
        TaskDraft {
            title: "write lab report".to_string(),
            kind: TaskKind::School,
            due_at_ms: 1_700_000_000_000,
            estimated_mins: 60,
            priority: Priority::Medium,
        }
    }

    #[test]
    fn system_clock_is_after_epoch() {
        assert!(SystemClock.now_ms() > 0);
    }

    #[test]
    fn remaining_seconds_rounds_up() {
        let now = Rc::new(Cell::new(10_000));
        let mut repo = MemoryTaskRepository::new();
        let mut sched = DeleteScheduler::with_clock(ManualClock(now.clone()));

        let task = repo.add_task(&draft()).unwrap();
        sched.schedule_delete(&mut repo, task.id, 10).unwrap();

        now.set(10_001);
        assert_eq!(sched.remaining_seconds(task.id), Some(10));
        now.set(19_001);
        assert_eq!(sched.remaining_seconds(task.id), Some(1));
        now.set(20_000);
        assert_eq!(sched.remaining_seconds(task.id), None);
    }
}
