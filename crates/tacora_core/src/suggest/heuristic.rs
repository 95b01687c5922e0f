//! Keyword-and-deadline heuristic for effort and priority hints.
//!
//! # Responsibility
//! - Estimate minutes of effort from the task kind and title keywords.
//! - Derive a priority from deadline proximity with kind-based floors.
//!
//! # Invariants
//! - Estimates land on a 15-minute grid within 15..=240.
//! - The same inputs always produce the same suggestion.

use crate::model::task::{Priority, TaskKind};
use crate::summary::hours_left;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

const MIN_ESTIMATE_MINS: u32 = 15;
const MAX_ESTIMATE_MINS: u32 = 240;
const ESTIMATE_GRID_MINS: u32 = 15;

static LONG_FORM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(final|report|presentation|write|essay|proposal|documentation)\b")
        .expect("valid long-form regex")
});
static BUILD_WORK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(lab|assignment|homework|project|implement|refactor)\b")
        .expect("valid build-work regex")
});
static STUDY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(exam|quiz|midterm|review|study)\b").expect("valid study regex")
});
static MEETING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(meeting|call|sync)\b").expect("valid meeting regex"));
static BUGFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(fix|bug|debug)\b").expect("valid bugfix regex"));
static FORCE_HIGH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"exam|final|report|presentation").expect("valid force-high regex")
});

/// Advisory estimate/priority hint with a short human rationale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub estimated_mins: u32,
    pub priority: Priority,
    pub rationale: String,
}

/// Suggests effort and priority for a task being drafted.
///
/// Purely local and deterministic; callers are free to ignore it or to
/// prefer an external estimator when one answers in time.
pub fn suggest(title: &str, kind: TaskKind, due_at_ms: i64, now_ms: i64) -> Suggestion {
    let hours = hours_left(due_at_ms, now_ms);
    let title_lower = title.to_lowercase();

    let estimated_mins = estimate_mins(&title_lower, kind);
    let priority = estimate_priority(&title_lower, kind, hours);

    let rationale = format!(
        "~{:.0} hours to deadline; {kind} task; estimated {estimated_mins} mins, priority {priority}",
        hours.round()
    );

    Suggestion {
        estimated_mins,
        priority,
        rationale,
    }
}

fn estimate_mins(title_lower: &str, kind: TaskKind) -> u32 {
    let mut est: u32 = match kind {
        TaskKind::Work => 90,
        TaskKind::School => 60,
        TaskKind::Group => 45,
        TaskKind::Club => 30,
        TaskKind::Other => 30,
    };

    if LONG_FORM_RE.is_match(title_lower) {
        est += 45;
    }
    if BUILD_WORK_RE.is_match(title_lower) {
        est += 30;
    }
    if STUDY_RE.is_match(title_lower) {
        est += 30;
    }
    if MEETING_RE.is_match(title_lower) {
        est = est.max(30);
    }
    if BUGFIX_RE.is_match(title_lower) {
        est += 15;
    }

    round_to_grid(est).clamp(MIN_ESTIMATE_MINS, MAX_ESTIMATE_MINS)
}

fn estimate_priority(title_lower: &str, kind: TaskKind, hours: f64) -> Priority {
    let mut priority = if hours <= 24.0 {
        Priority::High
    } else if hours <= 72.0 {
        Priority::Medium
    } else {
        Priority::Low
    };

    // School and work are never allowed to idle at Low.
    if matches!(kind, TaskKind::School | TaskKind::Work) && priority == Priority::Low {
        priority = Priority::Medium;
    }
    if FORCE_HIGH_RE.is_match(title_lower) {
        priority = Priority::High;
    }

    priority
}

fn round_to_grid(mins: u32) -> u32 {
    let half = ESTIMATE_GRID_MINS / 2;
    (mins + half) / ESTIMATE_GRID_MINS * ESTIMATE_GRID_MINS
}

#[cfg(test)]
mod tests {
    use super::round_to_grid;

    #[test]
    fn rounds_to_nearest_quarter_hour() {
        assert_eq!(round_to_grid(30), 30);
        assert_eq!(round_to_grid(37), 30);
        assert_eq!(round_to_grid(38), 45);
        assert_eq!(round_to_grid(52), 45);
        assert_eq!(round_to_grid(53), 60);
    }
}
