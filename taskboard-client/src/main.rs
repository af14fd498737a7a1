//! # Taskboard CLI
//!
//! Command-line front end over the Taskboard API.
//!
//! ## Usage
//!
//! ```bash
//! taskboard register --name Ada --email ada@example.com --password hunter22
//! taskboard add "Write report" --priority High --due 2025-03-01
//! taskboard status <id> "In Progress"
//! taskboard summary
//! ```

use clap::{Parser, Subcommand};
use taskboard_client::{
    api::HttpTaskApi,
    config::ClientConfig,
    dashboard::Dashboard,
    list::{render_entry, AssumeYes, Confirm, StdinConfirm},
    session::{AuthMode, Session},
    token_store::FileTokenStore,
};
use taskboard_shared::models::task::{TaskPriority, TaskStatus};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

#[derive(Debug, Parser)]
#[command(name = "taskboard", version, about = "Manage your Taskboard tasks")]
struct Cli {
    /// Server base URL
    #[arg(long, env = "TASKBOARD_API_BASE")]
    api_base: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create an account and log in
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "TASKBOARD_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Log in to an existing account
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "TASKBOARD_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the stored token
    Logout,

    /// List your tasks
    List,

    /// Create a task
    Add {
        title: String,
        #[arg(long, short)]
        description: Option<String>,
        /// Due date, YYYY-MM-DD
        #[arg(long)]
        due: Option<String>,
        #[arg(long, value_parser = parse_priority, default_value = "Medium")]
        priority: TaskPriority,
        #[arg(long, value_parser = parse_status, default_value = "To Do")]
        status: TaskStatus,
    },

    /// Move a task to another status
    Status {
        id: Uuid,
        #[arg(value_parser = parse_status)]
        status: TaskStatus,
    },

    /// Delete a task
    Delete {
        id: Uuid,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },

    /// Show task counts per status
    Summary,
}

/// Accepts the wire label in any case, with `-`/`_` for spaces (`in-progress`)
fn normalize_label(value: &str) -> String {
    value.trim().replace(['-', '_'], " ").to_ascii_lowercase()
}

fn parse_status(value: &str) -> Result<TaskStatus, String> {
    let wanted = normalize_label(value);
    TaskStatus::ALL
        .into_iter()
        .find(|s| s.as_str().to_ascii_lowercase() == wanted)
        .ok_or_else(|| format!("expected one of: To Do, In Progress, Done (got `{}`)", value))
}

fn parse_priority(value: &str) -> Result<TaskPriority, String> {
    let wanted = normalize_label(value);
    TaskPriority::ALL
        .into_iter()
        .find(|p| p.as_str().to_ascii_lowercase() == wanted)
        .ok_or_else(|| format!("expected one of: Low, Medium, High (got `{}`)", value))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taskboard_client=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let mut config = ClientConfig::from_env();
    if let Some(api_base) = cli.api_base {
        config.api_base = api_base.trim_end_matches('/').to_string();
    }

    let session = Session::hydrate(Box::new(FileTokenStore::new(&config.token_path)))?;
    let mut dashboard = Dashboard::new(HttpTaskApi::new(&config.api_base), session);

    match cli.command {
        Command::Register {
            name,
            email,
            password,
        } => {
            dashboard.auth_mode = AuthMode::Register;
            dashboard.auth_form.name = name;
            dashboard.auth_form.email = email;
            dashboard.auth_form.password = password;
            authenticate(&mut dashboard).await?;
        }
        Command::Login { email, password } => {
            dashboard.auth_mode = AuthMode::Login;
            dashboard.auth_form.email = email;
            dashboard.auth_form.password = password;
            authenticate(&mut dashboard).await?;
        }
        Command::Logout => {
            dashboard.logout()?;
            println!("Logged out");
        }
        Command::List => {
            require_session(&mut dashboard).await?;
            println!("{}", dashboard.tasks().render());
        }
        Command::Add {
            title,
            description,
            due,
            priority,
            status,
        } => {
            require_session(&mut dashboard).await?;
            dashboard.task_form.title = title;
            dashboard.task_form.description = description.unwrap_or_default();
            dashboard.task_form.due_date = due.unwrap_or_default();
            dashboard.task_form.priority = priority;
            dashboard.task_form.status = status;

            let task = dashboard.submit_task().await.map_err(anyhow::Error::msg)?;
            println!("{}", render_entry(&task));
        }
        Command::Status { id, status } => {
            require_session(&mut dashboard).await?;
            dashboard
                .change_status(id, status)
                .await
                .map_err(anyhow::Error::msg)?;

            if let Some(task) = dashboard.tasks().get(id) {
                println!("{}", render_entry(task));
            }
        }
        Command::Delete { id, yes } => {
            require_session(&mut dashboard).await?;
            let confirm: &dyn Confirm = if yes { &AssumeYes } else { &StdinConfirm };

            if dashboard
                .delete_task(id, confirm)
                .await
                .map_err(anyhow::Error::msg)?
            {
                println!("Task deleted");
            }
        }
        Command::Summary => {
            require_session(&mut dashboard).await?;
            println!("{}", dashboard.summary().render());
        }
    }

    Ok(())
}

async fn authenticate(dashboard: &mut Dashboard<HttpTaskApi>) -> anyhow::Result<()> {
    dashboard
        .submit_auth()
        .await
        .map_err(anyhow::Error::msg)?;

    println!("{}", dashboard.session().greeting());
    println!("{} task(s)", dashboard.tasks().len());
    Ok(())
}

/// Fetches the task list, failing when there is no session
async fn require_session(dashboard: &mut Dashboard<HttpTaskApi>) -> anyhow::Result<()> {
    if !dashboard.session().is_authenticated() {
        anyhow::bail!("Not logged in. Run `taskboard login` first.");
    }

    if !dashboard.refresh_tasks().await {
        anyhow::bail!("Could not load tasks. Your session may have expired; log in again.");
    }

    Ok(())
}
