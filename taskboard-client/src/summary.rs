/// Status summary
///
/// Counts tasks per status for the chart. The three statuses always appear,
/// in lifecycle order, each with a fixed color.
///
/// # Example
///
/// ```
/// use taskboard_client::summary::{summarize, EMPTY_SUMMARY};
///
/// let summary = summarize(&[]);
/// assert_eq!(summary.total(), 0);
/// assert_eq!(summary.render(), EMPTY_SUMMARY);
/// ```

use taskboard_shared::models::task::{Task, TaskStatus};

/// Shown instead of a chart when there are no tasks
pub const EMPTY_SUMMARY: &str = "No tasks yet. Create your first task to see the chart.";

const BAR_WIDTH: usize = 30;

/// Chart color of a status
pub fn status_color(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::ToDo => "#8884d8",
        TaskStatus::InProgress => "#82ca9d",
        TaskStatus::Done => "#ffc658",
    }
}

/// One chart segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusSegment {
    pub status: TaskStatus,
    pub count: usize,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSummary {
    segments: [StatusSegment; 3],
}

/// Counts `tasks` per status
pub fn summarize(tasks: &[Task]) -> StatusSummary {
    let segments = TaskStatus::ALL.map(|status| StatusSegment {
        status,
        count: tasks.iter().filter(|t| t.status == status).count(),
        color: status_color(status),
    });

    StatusSummary { segments }
}

impl StatusSummary {
    /// Segments in To Do, In Progress, Done order
    pub fn segments(&self) -> &[StatusSegment] {
        &self.segments
    }

    pub fn count(&self, status: TaskStatus) -> usize {
        self.segments
            .iter()
            .find(|s| s.status == status)
            .map_or(0, |s| s.count)
    }

    pub fn total(&self) -> usize {
        self.segments.iter().map(|s| s.count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Share of the total for one status, `0.0` when there are no tasks
    pub fn proportion(&self, status: TaskStatus) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.count(status) as f64 / total as f64,
        }
    }

    /// Text chart, or [`EMPTY_SUMMARY`] when there is nothing to chart
    pub fn render(&self) -> String {
        if self.is_empty() {
            return EMPTY_SUMMARY.to_string();
        }

        let label_width = TaskStatus::ALL
            .iter()
            .map(|s| s.as_str().len())
            .max()
            .unwrap_or(0);

        self.segments
            .iter()
            .map(|segment| {
                let share = self.proportion(segment.status);
                let filled = (share * BAR_WIDTH as f64).round() as usize;
                format!(
                    "{:<width$}  {:<bar$}  {:>3} ({:>5.1}%)  {}",
                    segment.status.as_str(),
                    "#".repeat(filled),
                    segment.count,
                    share * 100.0,
                    segment.color,
                    width = label_width,
                    bar = BAR_WIDTH,
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
