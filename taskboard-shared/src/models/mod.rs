/// Database models for Taskboard
///
/// This module contains all database models and their CRUD operations.
///
/// # Models
///
/// - `user`: User accounts and authentication
/// - `task`: Tasks owned by a single user
///
/// # Example
///
/// ```no_run
/// use taskboard_shared::models::task::{NewTask, Task, TaskInput};
/// use taskboard_shared::db::pool::{create_pool, DatabaseConfig};
/// use uuid::Uuid;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let input = TaskInput {
///     title: Some("Write report".to_string()),
///     priority: Some("High".to_string()),
///     ..Default::default()
/// };
///
/// let task = Task::create(&pool, Uuid::new_v4(), NewTask::from_input(input)?).await?;
/// # Ok(())
/// # }
/// ```

pub mod task;
pub mod user;
