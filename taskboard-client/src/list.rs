/// In-memory task list
///
/// Holds tasks in the order the server returned them, plus locally created
/// ones at the front. The list changes only after a request succeeded; there
/// is no optimistic update.

use std::io::{self, BufRead, Write};
use taskboard_shared::models::task::Task;
use uuid::Uuid;

/// Shown when the list has no entries
pub const EMPTY_LIST: &str = "No tasks yet. Start by creating one.";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole list with a fresh server listing
    pub fn replace_all(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
    }

    /// Adds a just-created task at the front
    pub fn prepend(&mut self, task: Task) {
        self.tasks.insert(0, task);
    }

    /// Swaps in the server representation of an existing entry
    ///
    /// Returns `false` if no entry has that id.
    pub fn replace(&mut self, task: Task) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == task.id) {
            Some(slot) => {
                *slot = task;
                true
            }
            None => false,
        }
    }

    /// Removes the entry with `id`, returning it
    pub fn remove(&mut self, id: Uuid) -> Option<Task> {
        let index = self.tasks.iter().position(|t| t.id == id)?;
        Some(self.tasks.remove(index))
    }

    pub fn get(&self, id: Uuid) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    /// Every entry rendered, separated by blank lines
    pub fn render(&self) -> String {
        if self.is_empty() {
            return EMPTY_LIST.to_string();
        }

        self.tasks
            .iter()
            .map(render_entry)
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Plain-text rendering of one task
pub fn render_entry(task: &Task) -> String {
    let mut lines = vec![format!("{}  [{}]", task.title, task.id)];

    if let Some(description) = task.description.as_deref().filter(|d| !d.is_empty()) {
        lines.push(format!("  {}", description));
    }

    let due = task
        .due_date
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "No due date".to_string());

    lines.push(format!("  Due: {}", due));
    lines.push(format!("  Priority: {}", task.priority));
    lines.push(format!("  Status: {}", task.status));

    lines.join("\n")
}

/// Asks the user to confirm a destructive action
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Confirms without asking (`--yes`)
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

/// Prompts on stdout and reads `y`/`yes` from stdin
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        print!("{} [y/N] ", prompt);
        if io::stdout().flush().is_err() {
            return false;
        }

        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }

        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}
