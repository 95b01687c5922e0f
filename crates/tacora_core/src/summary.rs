//! Deadline-proximity status and dashboard counts.
//!
//! # Responsibility
//! - Classify tasks by how close their deadline is.
//! - Aggregate the counts the home view renders, including how many
//!   tasks the conflict detector flags.
//!
//! # Invariants
//! - `hours_left` never goes negative; past-due clamps to zero, which
//!   classifies as `Dangerous`.

use crate::conflict::{find_conflicts, ConflictPolicy};
use crate::model::task::Task;
use serde::{Deserialize, Serialize};

const DANGEROUS_WITHIN_HOURS: f64 = 24.0;
const WARNING_WITHIN_HOURS: f64 = 72.0;

const MS_PER_HOUR: f64 = 3_600_000.0;

/// Deadline-proximity bucket for a single task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    /// More than 72 hours out.
    Incoming,
    /// Within 72 hours.
    Warning,
    /// Within 24 hours (or already past due).
    Dangerous,
}

/// Hours until the deadline, clamped at zero for past-due tasks.
pub fn hours_left(due_at_ms: i64, now_ms: i64) -> f64 {
    ((due_at_ms - now_ms) as f64 / MS_PER_HOUR).max(0.0)
}

/// Buckets a deadline by proximity to now.
pub fn compute_status(due_at_ms: i64, now_ms: i64) -> Status {
    let hours = hours_left(due_at_ms, now_ms);
    if hours <= DANGEROUS_WITHIN_HOURS {
        Status::Dangerous
    } else if hours <= WARNING_WITHIN_HOURS {
        Status::Warning
    } else {
        Status::Incoming
    }
}

/// Aggregate counts over the live set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskCounts {
    pub incoming: usize,
    pub warning: usize,
    pub dangerous: usize,
    pub conflicting: usize,
    pub total: usize,
}

/// Counts tasks per proximity bucket plus conflict participation.
///
/// A task contributes to exactly one proximity bucket and additionally
/// to `conflicting` when the detector flags it, so the bucket counts sum
/// to `total` while `conflicting` overlaps them.
pub fn count_tasks_by_status(tasks: &[Task], policy: &ConflictPolicy, now_ms: i64) -> TaskCounts {
    let conflict_ids = find_conflicts(tasks, policy);

    let mut counts = TaskCounts {
        total: tasks.len(),
        ..TaskCounts::default()
    };

    for task in tasks {
        match compute_status(task.due_at_ms, now_ms) {
            Status::Incoming => counts.incoming += 1,
            Status::Warning => counts.warning += 1,
            Status::Dangerous => counts.dangerous += 1,
        }

        if conflict_ids.contains(&task.id) {
            counts.conflicting += 1;
        }
    }

    counts
}
