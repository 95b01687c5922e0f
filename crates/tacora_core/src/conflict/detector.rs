//! Pairwise interval-conflict detector.
//!
//! # Responsibility
//! - Identify pairs of tasks whose deadlines fall close together and
//!   which are jointly heavy or jointly important per policy.
//!
//! # Invariants
//! - The outer scan is sorted by due time; the early break on
//!   `delta_hours > window_hours` is only valid under that sort. Anyone
//!   changing the sort key must drop the pruning step.
//! - Non-positive policy fields clamp to documented defaults rather
//!   than failing the call.

use crate::model::task::{Task, TaskId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const DEFAULT_WINDOW_HOURS: f64 = 48.0;
pub const DEFAULT_MIN_HEAVY_MINS: u32 = 45;
pub const DEFAULT_MIN_PRIORITY_SUM: u32 = 5;

const MS_PER_HOUR: f64 = 3_600_000.0;

/// Thresholds governing what counts as a risky pairing.
///
/// Supplied by the caller on every detection call, usually sourced from
/// settings storage. Fields absent on deserialization, or holding
/// non-positive values, fall back to the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConflictPolicy {
    /// Proximity threshold between two deadlines, in hours.
    pub window_hours: f64,
    /// Effort threshold above which a task counts as heavy, in minutes.
    pub min_heavy_mins: u32,
    /// Combined priority-weight threshold (High=3, Medium=2, Low=1).
    pub min_priority_sum: u32,
}

impl Default for ConflictPolicy {
    fn default() -> Self {
        Self {
            window_hours: DEFAULT_WINDOW_HOURS,
            min_heavy_mins: DEFAULT_MIN_HEAVY_MINS,
            min_priority_sum: DEFAULT_MIN_PRIORITY_SUM,
        }
    }
}

impl ConflictPolicy {
    /// Returns a copy with every invalid field clamped to its default.
    pub fn normalized(&self) -> Self {
        Self {
            window_hours: if self.window_hours.is_finite() && self.window_hours > 0.0 {
                self.window_hours
            } else {
                DEFAULT_WINDOW_HOURS
            },
            min_heavy_mins: if self.min_heavy_mins > 0 {
                self.min_heavy_mins
            } else {
                DEFAULT_MIN_HEAVY_MINS
            },
            min_priority_sum: if self.min_priority_sum > 0 {
                self.min_priority_sum
            } else {
                DEFAULT_MIN_PRIORITY_SUM
            },
        }
    }
}

/// Returns the ids of every task participating in at least one risky
/// pairing under the given policy.
///
/// A pairing is risky when the two deadlines are at most `window_hours`
/// apart AND (the larger of the two effort estimates reaches
/// `min_heavy_mins` OR the two priority weights sum to at least
/// `min_priority_sum`). The OR deliberately errs toward over-flagging.
pub fn find_conflicts(tasks: &[Task], policy: &ConflictPolicy) -> HashSet<TaskId> {
    let policy = policy.normalized();

    let mut sorted: Vec<&Task> = tasks.iter().collect();
    sorted.sort_by(|a, b| a.due_at_ms.cmp(&b.due_at_ms).then_with(|| a.id.cmp(&b.id)));

    let mut flagged = HashSet::new();

    for i in 0..sorted.len() {
        for j in (i + 1)..sorted.len() {
            let delta_hours = (sorted[j].due_at_ms - sorted[i].due_at_ms) as f64 / MS_PER_HOUR;
            // Sorted by due time, so no later j can re-enter the window.
            if delta_hours > policy.window_hours {
                break;
            }

            let heavy = sorted[i]
                .estimated_mins
                .max(sorted[j].estimated_mins)
                >= policy.min_heavy_mins;
            let important = sorted[i].priority.weight() + sorted[j].priority.weight()
                >= policy.min_priority_sum;

            if heavy || important {
                flagged.insert(sorted[i].id);
                flagged.insert(sorted[j].id);
            }
        }
    }

    flagged
}
