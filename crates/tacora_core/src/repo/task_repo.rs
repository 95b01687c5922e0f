//! Task repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over the live task set.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths call `Task::validate()` before SQL mutations.
//! - Read paths reject invalid persisted state instead of masking it.
//! - `remove_task` is idempotent; removing an absent id is not an error.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::task::{Priority, Task, TaskDraft, TaskId, TaskKind, TaskPatch,
    TaskValidationError};
use log::debug;
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const TASK_SELECT_SQL: &str = "SELECT
    uuid,
    title,
    type,
    due_at,
    estimated_mins,
    priority
FROM tasks";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for task persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(TaskValidationError),
    Db(DbError),
    NotFound(TaskId),
    DuplicateId(TaskId),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "task not found: {id}"),
            Self::DuplicateId(id) => write!(f, "task id already live: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted task data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TaskValidationError> for RepoError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface over the live task set.
pub trait TaskRepository {
    /// Creates a task from a draft, assigning a fresh unique id, and
    /// returns the stored record.
    fn add_task(&mut self, draft: &TaskDraft) -> RepoResult<Task>;
    /// Re-inserts a task under its existing id (restore path).
    ///
    /// # Errors
    /// - `DuplicateId` when the id is already live.
    fn insert_task(&mut self, task: &Task) -> RepoResult<()>;
    /// Merges the patch into the task matching `id`.
    ///
    /// # Errors
    /// - `NotFound` when `id` is absent from the live set.
    fn update_task(&mut self, id: TaskId, patch: &TaskPatch) -> RepoResult<()>;
    /// Unconditionally and immediately deletes the task. Idempotent.
    fn remove_task(&mut self, id: TaskId) -> RepoResult<()>;
    /// Gets one live task by id.
    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>>;
    /// Returns the current live set. Order carries no meaning; callers
    /// sort by whatever criterion they need (typically due time).
    fn list_tasks(&self) -> RepoResult<Vec<Task>>;
}

/// SQLite-backed task repository.
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations have not been applied.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` when the schema
    ///   does not match what this binary expects.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_task_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn add_task(&mut self, draft: &TaskDraft) -> RepoResult<Task> {
        let task = Task::from_draft(draft);
        self.insert_task(&task)?;
        Ok(task)
    }

    fn insert_task(&mut self, task: &Task) -> RepoResult<()> {
        task.validate()?;

        if self.get_task(task.id)?.is_some() {
            return Err(RepoError::DuplicateId(task.id));
        }

        self.conn.execute(
            "INSERT INTO tasks (
                uuid,
                title,
                type,
                due_at,
                estimated_mins,
                priority
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                task.id.to_string(),
                task.title.as_str(),
                kind_to_db(task.kind),
                task.due_at_ms,
                task.estimated_mins,
                priority_to_db(task.priority),
            ],
        )?;

        debug!("event=task_insert module=repo status=ok id={}", task.id);
        Ok(())
    }

    fn update_task(&mut self, id: TaskId, patch: &TaskPatch) -> RepoResult<()> {
        let mut task = self.get_task(id)?.ok_or(RepoError::NotFound(id))?;
        task.apply_patch(patch);
        task.validate()?;

        let changed = self.conn.execute(
            "UPDATE tasks
             SET
                title = ?2,
                type = ?3,
                due_at = ?4,
                estimated_mins = ?5,
                priority = ?6,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?1;",
            params![
                id.to_string(),
                task.title.as_str(),
                kind_to_db(task.kind),
                task.due_at_ms,
                task.estimated_mins,
                priority_to_db(task.priority),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn remove_task(&mut self, id: TaskId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM tasks WHERE uuid = ?1;", [id.to_string()])?;
        if changed > 0 {
            debug!("event=task_remove module=repo status=ok id={id}");
        }
        Ok(())
    }

    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TASK_SELECT_SQL} WHERE uuid = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_task_row(row)?));
        }

        Ok(None)
    }

    fn list_tasks(&self) -> RepoResult<Vec<Task>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TASK_SELECT_SQL} ORDER BY due_at ASC, uuid ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut tasks = Vec::new();

        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }

        Ok(tasks)
    }
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<Task> {
    let uuid_text: String = row.get("uuid")?;
    let id = Uuid::parse_str(&uuid_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{uuid_text}` in tasks.uuid"))
    })?;

    let kind_text: String = row.get("type")?;
    let kind = parse_kind(&kind_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid task kind `{kind_text}` in tasks.type"))
    })?;

    let priority_text: String = row.get("priority")?;
    let priority = parse_priority(&priority_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid priority `{priority_text}` in tasks.priority"
        ))
    })?;

    let task = Task {
        id,
        title: row.get("title")?,
        kind,
        due_at_ms: row.get("due_at")?,
        estimated_mins: row.get("estimated_mins")?,
        priority,
    };
    task.validate()?;
    Ok(task)
}

fn kind_to_db(kind: TaskKind) -> &'static str {
    match kind {
        TaskKind::Work => "Work",
        TaskKind::School => "School",
        TaskKind::Group => "Group",
        TaskKind::Club => "Club",
        TaskKind::Other => "Other",
    }
}

fn parse_kind(value: &str) -> Option<TaskKind> {
    match value {
        "Work" => Some(TaskKind::Work),
        "School" => Some(TaskKind::School),
        "Group" => Some(TaskKind::Group),
        "Club" => Some(TaskKind::Club),
        "Other" => Some(TaskKind::Other),
        _ => None,
    }
}

fn priority_to_db(priority: Priority) -> &'static str {
    match priority {
        Priority::Low => "Low",
        Priority::Medium => "Medium",
        Priority::High => "High",
    }
}

fn parse_priority(value: &str) -> Option<Priority> {
    match value {
        "Low" => Some(Priority::Low),
        "Medium" => Some(Priority::Medium),
        "High" => Some(Priority::High),
        _ => None,
    }
}

fn ensure_task_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 =
        conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, "tasks")? {
        return Err(RepoError::MissingRequiredTable("tasks"));
    }

    for column in ["uuid", "title", "type", "due_at", "estimated_mins", "priority"] {
        if !table_has_column(conn, "tasks", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "tasks",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
