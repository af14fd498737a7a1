/// Dashboard controller
///
/// Ties the session, the forms and the task list to a [`TaskApi`]. Each user
/// action issues at most one request and updates local state only after the
/// response arrived. A failed action leaves state as it was and yields a
/// [`Notice`] to show the user; nothing is retried.
///
/// # Example
///
/// ```no_run
/// use taskboard_client::{
///     api::HttpTaskApi,
///     dashboard::Dashboard,
///     session::Session,
///     token_store::FileTokenStore,
/// };
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let session = Session::hydrate(Box::new(FileTokenStore::new(".taskboard/token")))?;
/// let mut dashboard = Dashboard::new(HttpTaskApi::new("http://localhost:5000"), session);
/// dashboard.start().await;
///
/// dashboard.task_form.title = "Write report".to_string();
/// if let Err(notice) = dashboard.submit_task().await {
///     eprintln!("{}", notice);
/// }
/// println!("{}", dashboard.summary().render());
/// # Ok(())
/// # }
/// ```

use crate::{
    api::TaskApi,
    error::{ClientError, ClientResult},
    form::TaskForm,
    list::{Confirm, TaskList},
    session::{AuthForm, AuthMode, Session},
    summary::{summarize, StatusSummary},
};
use std::fmt;
use taskboard_shared::models::task::{Task, TaskInput, TaskStatus};
use uuid::Uuid;

const REGISTRATION_FAILED: &str = "Registration failed";
const LOGIN_FAILED: &str = "Login failed";
const CREATE_FAILED: &str = "Could not create task";
const UPDATE_FAILED: &str = "Could not update task";
const DELETE_FAILED: &str = "Could not delete task";

/// User-visible outcome of a failed action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice(String);

impl Notice {
    pub fn message(&self) -> &str {
        &self.0
    }

    /// Server message when one came back and `prefer_server` is set, else `fallback`
    fn from_error(err: &ClientError, fallback: &str, prefer_server: bool) -> Self {
        tracing::warn!(error = %err, "{}", fallback);

        let message = err
            .server_message()
            .filter(|_| prefer_server)
            .unwrap_or(fallback);

        Notice(message.to_string())
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub struct Dashboard<A> {
    api: A,
    session: Session,
    tasks: TaskList,

    pub auth_mode: AuthMode,
    pub auth_form: AuthForm,
    pub task_form: TaskForm,
}

impl<A: TaskApi> Dashboard<A> {
    pub fn new(api: A, session: Session) -> Self {
        Self {
            api,
            session,
            tasks: TaskList::new(),
            auth_mode: AuthMode::default(),
            auth_form: AuthForm::default(),
            task_form: TaskForm::default(),
        }
    }

    /// Loads tasks if the hydrated session is already authenticated
    pub async fn start(&mut self) {
        if self.session.is_authenticated() {
            self.refresh_tasks().await;
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    pub fn summary(&self) -> StatusSummary {
        summarize(self.tasks.tasks())
    }

    /// Submits the auth form in the current mode
    ///
    /// On success the session becomes authenticated, the form is cleared and
    /// the task list is fetched. On failure nothing changes.
    pub async fn submit_auth(&mut self) -> Result<(), Notice> {
        let credentials = self.auth_form.credentials(self.auth_mode);

        let result = match self.auth_mode {
            AuthMode::Register => self.api.register(&credentials).await,
            AuthMode::Login => self.api.login(&credentials).await,
        };

        let auth = result.map_err(|e| {
            let fallback = match self.auth_mode {
                AuthMode::Register => REGISTRATION_FAILED,
                AuthMode::Login => LOGIN_FAILED,
            };
            Notice::from_error(&e, fallback, true)
        })?;

        self.session.establish(auth);
        self.auth_form.reset();
        self.refresh_tasks().await;

        Ok(())
    }

    /// Ends the session and drops the local task list
    ///
    /// In-memory state is cleared even when the stored token cannot be removed.
    pub fn logout(&mut self) -> ClientResult<()> {
        self.tasks.clear();
        self.session.clear()
    }

    /// Replaces the list with the server's
    ///
    /// Failures are logged and leave the list untouched. Returns whether the
    /// fetch succeeded.
    pub async fn refresh_tasks(&mut self) -> bool {
        let Some(token) = self.session.token() else {
            return false;
        };

        match self.api.list_tasks(token).await {
            Ok(tasks) => {
                tracing::debug!(count = tasks.len(), "Fetched tasks");
                self.tasks.replace_all(tasks);
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "Could not fetch tasks");
                false
            }
        }
    }

    /// Sends the task form as a create request
    ///
    /// The created task goes to the front of the list and the form resets.
    pub async fn submit_task(&mut self) -> Result<Task, Notice> {
        let input = self.task_form.to_input();

        let task = self
            .with_token(|api, token| async move { api.create_task(token, &input).await })
            .await
            .map_err(|e| Notice::from_error(&e, CREATE_FAILED, true))?;

        self.tasks.prepend(task.clone());
        self.task_form.reset();

        Ok(task)
    }

    /// Moves one task to `status`, replacing the entry with the server's copy
    pub async fn change_status(&mut self, id: Uuid, status: TaskStatus) -> Result<(), Notice> {
        let changes = TaskInput {
            status: Some(status.to_string()),
            ..Default::default()
        };

        let task = self
            .with_token(|api, token| async move { api.update_task(token, id, &changes).await })
            .await
            .map_err(|e| Notice::from_error(&e, UPDATE_FAILED, false))?;

        if !self.tasks.replace(task) {
            tracing::debug!(task_id = %id, "Updated task was not in the local list");
        }

        Ok(())
    }

    /// Deletes one task after confirmation
    ///
    /// Returns `Ok(false)` when the user declined; no request is sent then.
    pub async fn delete_task(&mut self, id: Uuid, confirm: &dyn Confirm) -> Result<bool, Notice> {
        if !confirm.confirm("Delete this task?") {
            return Ok(false);
        }

        self.with_token(|api, token| async move { api.delete_task(token, id).await })
            .await
            .map_err(|e| Notice::from_error(&e, DELETE_FAILED, false))?;

        self.tasks.remove(id);
        Ok(true)
    }

    async fn with_token<'a, T, F, Fut>(&'a self, call: F) -> ClientResult<T>
    where
        F: FnOnce(&'a A, &'a str) -> Fut,
        Fut: std::future::Future<Output = ClientResult<T>> + 'a,
    {
        let token = self.session.token().ok_or(ClientError::NotAuthenticated)?;
        call(&self.api, token).await
    }
}
