/// Task model and database operations
///
/// This module provides the Task model: a unit of work owned by exactly one
/// user. Every query is scoped by owner, so a task owned by someone else is
/// indistinguishable from a task that does not exist.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE task_priority AS ENUM ('Low', 'Medium', 'High');
/// CREATE TYPE task_status AS ENUM ('To Do', 'In Progress', 'Done');
///
/// CREATE TABLE tasks (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     owner_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     title TEXT NOT NULL CHECK (btrim(title) <> ''),
///     description TEXT,
///     due_date DATE,
///     priority task_priority NOT NULL DEFAULT 'Medium',
///     status task_status NOT NULL DEFAULT 'To Do',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Validation
///
/// Request bodies arrive as loosely typed [`TaskInput`] and are turned into
/// [`NewTask`] or [`TaskChanges`] before touching the database. Anything
/// outside the priority/status enumerations, a blank title or a malformed
/// due date is rejected with a [`TaskValidationError`].
///
/// # Example
///
/// ```no_run
/// use taskboard_shared::models::task::{NewTask, Task, TaskChanges, TaskInput, TaskStatus};
/// use sqlx::PgPool;
/// use uuid::Uuid;
///
/// # async fn example(pool: PgPool, owner: Uuid) -> Result<(), Box<dyn std::error::Error>> {
/// let task = Task::create(&pool, owner, NewTask::from_input(TaskInput {
///     title: Some("Write report".to_string()),
///     priority: Some("High".to_string()),
///     ..Default::default()
/// })?).await?;
///
/// let changes = TaskChanges::status(TaskStatus::Done);
/// Task::update(&pool, task.id, owner, changes).await?;
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Urgency label of a task
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "task_priority")]
pub enum TaskPriority {
    Low,

    #[default]
    Medium,

    High,
}

impl TaskPriority {
    /// All priorities, lowest first
    pub const ALL: [TaskPriority; 3] = [TaskPriority::Low, TaskPriority::Medium, TaskPriority::High];

    /// Label used on the wire and in the database
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "Low",
            TaskPriority::Medium => "Medium",
            TaskPriority::High => "High",
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskPriority {
    type Err = TaskValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaskPriority::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| TaskValidationError::InvalidPriority(s.to_string()))
    }
}

/// Lifecycle stage of a task
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "task_status")]
pub enum TaskStatus {
    #[default]
    #[serde(rename = "To Do")]
    #[sqlx(rename = "To Do")]
    ToDo,

    #[serde(rename = "In Progress")]
    #[sqlx(rename = "In Progress")]
    InProgress,

    Done,
}

impl TaskStatus {
    /// All statuses in lifecycle order
    pub const ALL: [TaskStatus; 3] = [TaskStatus::ToDo, TaskStatus::InProgress, TaskStatus::Done];

    /// Label used on the wire and in the database
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::ToDo => "To Do",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Done => "Done",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = TaskValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaskStatus::ALL
            .into_iter()
            .find(|st| st.as_str() == s)
            .ok_or_else(|| TaskValidationError::InvalidStatus(s.to_string()))
    }
}

/// Rejected task write
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaskValidationError {
    /// Title missing or blank
    #[error("Title is required")]
    MissingTitle,

    /// Priority outside {Low, Medium, High}
    #[error("`{0}` is not a valid priority (expected Low, Medium or High)")]
    InvalidPriority(String),

    /// Status outside {To Do, In Progress, Done}
    #[error("`{0}` is not a valid status (expected To Do, In Progress or Done)")]
    InvalidStatus(String),

    /// Due date that is neither `YYYY-MM-DD` nor an RFC 3339 timestamp
    #[error("`{0}` is not a valid due date (expected YYYY-MM-DD)")]
    InvalidDueDate(String),
}

impl TaskValidationError {
    /// Name of the offending field as it appears in JSON bodies
    pub fn field(&self) -> &'static str {
        match self {
            TaskValidationError::MissingTitle => "title",
            TaskValidationError::InvalidPriority(_) => "priority",
            TaskValidationError::InvalidStatus(_) => "status",
            TaskValidationError::InvalidDueDate(_) => "dueDate",
        }
    }
}

/// Task model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique task ID
    pub id: Uuid,

    /// User who owns the task
    #[sqlx(rename = "owner_id")]
    pub owner: Uuid,

    pub title: String,

    pub description: Option<String>,

    pub due_date: Option<NaiveDate>,

    pub priority: TaskPriority,

    pub status: TaskStatus,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last written
    pub updated_at: DateTime<Utc>,
}

/// Loosely typed task body, as sent by clients
///
/// Used for both create and partial update requests. Every field is optional
/// here; [`NewTask::from_input`] and [`TaskChanges::from_input`] decide what
/// is required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// `YYYY-MM-DD`; an empty string means "no due date"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Validated input for creating a task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub priority: TaskPriority,
    pub status: TaskStatus,
}

impl NewTask {
    /// Validates a create request
    ///
    /// Missing priority/status fall back to `Medium` / `To Do`. An empty
    /// description or due date is stored as absent.
    pub fn from_input(input: TaskInput) -> Result<Self, TaskValidationError> {
        let title = parse_title(input.title.as_deref())?;

        let priority = match input.priority {
            Some(p) => p.parse()?,
            None => TaskPriority::default(),
        };

        let status = match input.status {
            Some(s) => s.parse()?,
            None => TaskStatus::default(),
        };

        Ok(Self {
            title,
            description: non_empty(input.description),
            due_date: parse_due_date(input.due_date.as_deref())?,
            priority,
            status,
        })
    }
}

/// Validated partial update
///
/// `None` leaves a field untouched. For the nullable fields, `Some(None)`
/// clears the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskChanges {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub due_date: Option<Option<NaiveDate>>,
    pub priority: Option<TaskPriority>,
    pub status: Option<TaskStatus>,
}

impl TaskChanges {
    /// Validates an update request
    pub fn from_input(input: TaskInput) -> Result<Self, TaskValidationError> {
        let title = match input.title {
            Some(t) => Some(parse_title(Some(&t))?),
            None => None,
        };

        let due_date = match input.due_date {
            Some(d) => Some(parse_due_date(Some(&d))?),
            None => None,
        };

        Ok(Self {
            title,
            description: input.description.map(|d| non_empty(Some(d))),
            due_date,
            priority: input.priority.map(|p| p.parse::<TaskPriority>()).transpose()?,
            status: input.status.map(|s| s.parse::<TaskStatus>()).transpose()?,
        })
    }

    /// Change that only moves the task to another status
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    /// Whether applying these changes would touch no field
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.due_date.is_none()
            && self.priority.is_none()
            && self.status.is_none()
    }
}

fn parse_title(title: Option<&str>) -> Result<String, TaskValidationError> {
    match title.map(str::trim) {
        Some(t) if !t.is_empty() => Ok(t.to_string()),
        _ => Err(TaskValidationError::MissingTitle),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Parses `YYYY-MM-DD`, falling back to the date part of an RFC 3339 timestamp
fn parse_due_date(value: Option<&str>) -> Result<Option<NaiveDate>, TaskValidationError> {
    let value = match value.map(str::trim) {
        None | Some("") => return Ok(None),
        Some(v) => v,
    };

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(Some(date));
    }

    DateTime::parse_from_rfc3339(value)
        .map(|dt| Some(dt.date_naive()))
        .map_err(|_| TaskValidationError::InvalidDueDate(value.to_string()))
}

impl Task {
    /// Creates a new task owned by `owner`
    ///
    /// # Errors
    ///
    /// Returns an error if the owner does not exist or the database operation fails
    pub async fn create(pool: &PgPool, owner: Uuid, data: NewTask) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (owner_id, title, description, due_date, priority, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, owner_id, title, description, due_date, priority, status,
                      created_at, updated_at
            "#,
        )
        .bind(owner)
        .bind(data.title)
        .bind(data.description)
        .bind(data.due_date)
        .bind(data.priority)
        .bind(data.status)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Lists all tasks of one owner, newest first
    pub async fn list_by_owner(pool: &PgPool, owner: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, owner_id, title, description, due_date, priority, status,
                   created_at, updated_at
            FROM tasks
            WHERE owner_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Finds a task by ID, only if it belongs to `owner`
    pub async fn find_by_id_and_owner(
        pool: &PgPool,
        id: Uuid,
        owner: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, owner_id, title, description, due_date, priority, status,
                   created_at, updated_at
            FROM tasks
            WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(id)
        .bind(owner)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Applies a partial update to a task owned by `owner`
    ///
    /// Returns `None` if no such task exists for this owner. An empty change
    /// set writes nothing and returns the stored task as is.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        owner: Uuid,
        changes: TaskChanges,
    ) -> Result<Option<Self>, sqlx::Error> {
        if changes.is_empty() {
            return Self::find_by_id_and_owner(pool, id, owner).await;
        }

        let mut query = String::from("UPDATE tasks SET updated_at = NOW()");
        let mut bind_count = 2;

        if changes.title.is_some() {
            bind_count += 1;
            query.push_str(&format!(", title = ${}", bind_count));
        }
        if changes.description.is_some() {
            bind_count += 1;
            query.push_str(&format!(", description = ${}", bind_count));
        }
        if changes.due_date.is_some() {
            bind_count += 1;
            query.push_str(&format!(", due_date = ${}", bind_count));
        }
        if changes.priority.is_some() {
            bind_count += 1;
            query.push_str(&format!(", priority = ${}", bind_count));
        }
        if changes.status.is_some() {
            bind_count += 1;
            query.push_str(&format!(", status = ${}", bind_count));
        }

        query.push_str(
            " WHERE id = $1 AND owner_id = $2 RETURNING id, owner_id, title, description, due_date, priority, status, created_at, updated_at",
        );

        let mut q = sqlx::query_as::<_, Task>(&query).bind(id).bind(owner);

        if let Some(title) = changes.title {
            q = q.bind(title);
        }
        if let Some(description) = changes.description {
            q = q.bind(description);
        }
        if let Some(due_date) = changes.due_date {
            q = q.bind(due_date);
        }
        if let Some(priority) = changes.priority {
            q = q.bind(priority);
        }
        if let Some(status) = changes.status {
            q = q.bind(status);
        }

        let task = q.fetch_optional(pool).await?;

        Ok(task)
    }

    /// Deletes a task owned by `owner`
    ///
    /// Returns `false` if nothing was deleted.
    pub async fn delete(pool: &PgPool, id: Uuid, owner: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Counts tasks of one owner
    pub async fn count_by_owner(pool: &PgPool, owner: Uuid) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tasks WHERE owner_id = $1")
            .bind(owner)
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}
