//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record shared by repository, scheduler and
//!   conflict detection.
//! - Provide draft/patch shapes for create and merge-update flows.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `kind` and `priority` are closed enums so weight lookups stay total.
//! - `due_at_ms` is an absolute instant in epoch milliseconds.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a task.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TaskId = Uuid;

/// Closed category set for tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskKind {
    Work,
    School,
    Group,
    Club,
    Other,
}

impl Display for TaskKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Work => "Work",
            Self::School => "School",
            Self::Group => "Group",
            Self::Club => "Club",
            Self::Other => "Other",
        };
        write!(f, "{name}")
    }
}

/// Task priority level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Numeric weight used only for conflict-threshold arithmetic.
    pub fn weight(self) -> u32 {
        match self {
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
        }
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        };
        write!(f, "{name}")
    }
}

/// Canonical task record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Stable global ID assigned on creation, immutable thereafter.
    pub id: TaskId,
    /// Human-readable title. Must not be blank.
    pub title: String,
    /// Serialized as `type` to match the external schema naming.
    #[serde(rename = "type")]
    pub kind: TaskKind,
    /// Deadline as epoch milliseconds, timezone-normalized.
    pub due_at_ms: i64,
    /// Expected effort in minutes. Must be positive.
    pub estimated_mins: u32,
    pub priority: Priority,
}

/// All task fields except the repository-assigned id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDraft {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: TaskKind,
    pub due_at_ms: i64,
    pub estimated_mins: u32,
    pub priority: Priority,
}

/// Partial update shape. Absent fields are left unchanged on merge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskPatch {
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<TaskKind>,
    pub due_at_ms: Option<i64>,
    pub estimated_mins: Option<u32>,
    pub priority: Option<Priority>,
}

/// Structural validation failures for task records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    BlankTitle,
    NonPositiveEstimate,
    NonPositiveDueAt,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankTitle => write!(f, "task title must not be blank"),
            Self::NonPositiveEstimate => {
                write!(f, "task estimated_mins must be a positive minute count")
            }
            Self::NonPositiveDueAt => {
                write!(f, "task due_at_ms must be a positive epoch-ms instant")
            }
        }
    }
}

impl Error for TaskValidationError {}

impl Task {
    /// Materializes a draft into a task with a freshly generated id.
    pub fn from_draft(draft: &TaskDraft) -> Self {
        Self::with_id(Uuid::new_v4(), draft)
    }

    /// Materializes a draft under a caller-provided stable id.
    ///
    /// Used by restore paths where identity already exists.
    pub fn with_id(id: TaskId, draft: &TaskDraft) -> Self {
        Self {
            id,
            title: draft.title.clone(),
            kind: draft.kind,
            due_at_ms: draft.due_at_ms,
            estimated_mins: draft.estimated_mins,
            priority: draft.priority,
        }
    }

    /// Merges a patch into this task. Fields absent from the patch keep
    /// their current value. The id is never touched.
    pub fn apply_patch(&mut self, patch: &TaskPatch) {
        if let Some(title) = patch.title.as_ref() {
            self.title = title.clone();
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(due_at_ms) = patch.due_at_ms {
            self.due_at_ms = due_at_ms;
        }
        if let Some(estimated_mins) = patch.estimated_mins {
            self.estimated_mins = estimated_mins;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
    }

    /// Checks structural invariants before persistence.
    ///
    /// # Errors
    /// - `BlankTitle` when the title is empty or whitespace-only.
    /// - `NonPositiveEstimate` when `estimated_mins` is zero.
    /// - `NonPositiveDueAt` when `due_at_ms` is not after the epoch.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.title.trim().is_empty() {
            return Err(TaskValidationError::BlankTitle);
        }
        if self.estimated_mins == 0 {
            return Err(TaskValidationError::NonPositiveEstimate);
        }
        if self.due_at_ms <= 0 {
            return Err(TaskValidationError::NonPositiveDueAt);
        }
        Ok(())
    }
}
