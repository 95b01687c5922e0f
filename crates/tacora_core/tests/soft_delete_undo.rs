use std::cell::Cell;
use std::rc::Rc;
use tacora_core::{
    Clock, DeleteScheduler, MemoryTaskRepository, Priority, TaskDraft, TaskKind, TaskRepository,
};
use uuid::Uuid;

#[derive(Clone)]
struct ManualClock(Rc<Cell<i64>>);

impl ManualClock {
    fn at(start_ms: i64) -> (Self, Rc<Cell<i64>>) {
        let inner = Rc::new(Cell::new(start_ms));
        (Self(inner.clone()), inner)
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> i64 {
        self.0.get()
    }
}

fn draft(title: &str) -> TaskDraft {
    TaskDraft {
        title: title.to_string(),
        kind: TaskKind::Work,
        due_at_ms: 1_700_000_000_000,
        estimated_mins: 90,
        priority: Priority::High,
    }
}

#[test]
fn schedule_then_undo_restores_identical_task() {
    let (clock, _) = ManualClock::at(1_000);
    let mut repo = MemoryTaskRepository::new();
    let mut sched = DeleteScheduler::with_clock(clock);

    let task = repo.add_task(&draft("quarterly numbers")).unwrap();
    sched.schedule_delete(&mut repo, task.id, 10).unwrap();
    sched.undo_delete(&mut repo, task.id).unwrap();

    let restored = repo.get_task(task.id).unwrap().unwrap();
    assert_eq!(restored, task);
    assert!(!sched.is_pending(task.id));
}

#[test]
fn pending_task_leaves_the_live_set_but_is_not_gone() {
    let (clock, _) = ManualClock::at(1_000);
    let mut repo = MemoryTaskRepository::new();
    let mut sched = DeleteScheduler::with_clock(clock);

    let task = repo.add_task(&draft("suspended")).unwrap();
    sched.schedule_delete(&mut repo, task.id, 10).unwrap();

    assert!(repo.get_task(task.id).unwrap().is_none());
    assert!(repo.list_tasks().unwrap().is_empty());
    assert!(sched.is_pending(task.id));
    assert_eq!(sched.pending_count(), 1);
}

#[test]
fn expiry_completes_the_deletion() {
    let (clock, now) = ManualClock::at(1_000);
    let mut repo = MemoryTaskRepository::new();
    let mut sched = DeleteScheduler::with_clock(clock);

    let task = repo.add_task(&draft("doomed")).unwrap();
    sched.schedule_delete(&mut repo, task.id, 5).unwrap();

    now.set(1_000 + 5_000);
    assert_eq!(sched.expire_due(), 1);
    assert_eq!(sched.pending_count(), 0);
    assert!(repo.get_task(task.id).unwrap().is_none());
}

#[test]
fn undo_after_window_elapsed_is_a_noop_even_without_a_tick() {
    let (clock, now) = ManualClock::at(1_000);
    let mut repo = MemoryTaskRepository::new();
    let mut sched = DeleteScheduler::with_clock(clock);

    let task = repo.add_task(&draft("too late")).unwrap();
    sched.schedule_delete(&mut repo, task.id, 5).unwrap();

    // Six seconds pass with no expire_due tick in between.
    now.set(1_000 + 6_000);
    sched.undo_delete(&mut repo, task.id).unwrap();

    assert!(repo.get_task(task.id).unwrap().is_none());
    assert!(repo.list_tasks().unwrap().is_empty());
    assert_eq!(sched.pending_count(), 0);
}

#[test]
fn permanently_delete_is_idempotent() {
    let (clock, now) = ManualClock::at(1_000);
    let mut repo = MemoryTaskRepository::new();
    let mut sched = DeleteScheduler::with_clock(clock);

    let task = repo.add_task(&draft("gone for good")).unwrap();
    sched.schedule_delete(&mut repo, task.id, 5).unwrap();

    sched.permanently_delete(task.id);
    sched.permanently_delete(task.id);
    now.set(1_000 + 10_000);
    sched.permanently_delete(task.id);

    assert!(repo.get_task(task.id).unwrap().is_none());
    assert_eq!(sched.pending_count(), 0);
}

#[test]
fn scheduling_an_unknown_id_is_a_noop() {
    let (clock, _) = ManualClock::at(1_000);
    let mut repo = MemoryTaskRepository::new();
    let mut sched = DeleteScheduler::with_clock(clock);

    sched
        .schedule_delete(&mut repo, Uuid::new_v4(), 5)
        .unwrap();

    assert_eq!(sched.pending_count(), 0);
}

#[test]
fn double_undo_is_safe() {
    let (clock, _) = ManualClock::at(1_000);
    let mut repo = MemoryTaskRepository::new();
    let mut sched = DeleteScheduler::with_clock(clock);

    let task = repo.add_task(&draft("clicked twice")).unwrap();
    sched.schedule_delete(&mut repo, task.id, 10).unwrap();
    sched.undo_delete(&mut repo, task.id).unwrap();
    sched.undo_delete(&mut repo, task.id).unwrap();

    assert_eq!(repo.len(), 1);
    assert!(repo.get_task(task.id).unwrap().is_some());
}

#[test]
fn rescheduling_replaces_the_previous_entry_and_its_deadline() {
    let (clock, now) = ManualClock::at(0);
    let mut repo = MemoryTaskRepository::new();
    let mut sched = DeleteScheduler::with_clock(clock);

    let task = repo.add_task(&draft("rearmed")).unwrap();
    sched.schedule_delete(&mut repo, task.id, 5).unwrap();

    // Undo and delete again at t=3s; the old t=5s deadline must be gone.
    now.set(3_000);
    sched.undo_delete(&mut repo, task.id).unwrap();
    sched.schedule_delete(&mut repo, task.id, 5).unwrap();

    // t=7s is past the first deadline but inside the second window.
    now.set(7_000);
    sched.undo_delete(&mut repo, task.id).unwrap();

    let restored = repo.get_task(task.id).unwrap().unwrap();
    assert_eq!(restored, task);
}

#[test]
fn remaining_seconds_counts_down_and_disappears_on_expiry() {
    let (clock, now) = ManualClock::at(0);
    let mut repo = MemoryTaskRepository::new();
    let mut sched = DeleteScheduler::with_clock(clock);

    let task = repo.add_task(&draft("countdown")).unwrap();
    assert_eq!(sched.remaining_seconds(task.id), None);

    sched.schedule_delete(&mut repo, task.id, 10).unwrap();
    assert_eq!(sched.remaining_seconds(task.id), Some(10));

    now.set(4_500);
    assert_eq!(sched.remaining_seconds(task.id), Some(6));

    now.set(10_000);
    assert_eq!(sched.remaining_seconds(task.id), None);
}

#[test]
fn an_id_is_never_live_and_pending_at_once() {
    let (clock, _) = ManualClock::at(1_000);
    let mut repo = MemoryTaskRepository::new();
    let mut sched = DeleteScheduler::with_clock(clock);

    let task = repo.add_task(&draft("exclusive")).unwrap();

    sched.schedule_delete(&mut repo, task.id, 10).unwrap();
    assert!(repo.get_task(task.id).unwrap().is_none());
    assert!(sched.is_pending(task.id));

    sched.undo_delete(&mut repo, task.id).unwrap();
    assert!(repo.get_task(task.id).unwrap().is_some());
    assert!(!sched.is_pending(task.id));
}
