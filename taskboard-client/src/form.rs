/// Task creation form
///
/// Field state for a new task. Submitting sends every field, including the
/// empty ones; the server treats an empty description or due date as absent.

use taskboard_shared::models::task::{TaskInput, TaskPriority, TaskStatus};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskForm {
    pub title: String,
    pub description: String,

    /// `YYYY-MM-DD` or empty
    pub due_date: String,

    pub priority: TaskPriority,
    pub status: TaskStatus,
}

impl TaskForm {
    /// Create request body carrying all fields
    pub fn to_input(&self) -> TaskInput {
        TaskInput {
            title: Some(self.title.clone()),
            description: Some(self.description.clone()),
            due_date: Some(self.due_date.clone()),
            priority: Some(self.priority.to_string()),
            status: Some(self.status.to_string()),
        }
    }

    /// Back to an empty title, `Medium` and `To Do`
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
