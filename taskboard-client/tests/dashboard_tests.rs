/// Dashboard controller tests against an in-memory API
///
/// `FakeApi` mirrors the server's rules (owner token, validation, 404 for
/// unknown ids) without a network, so the controller's state transitions can
/// be checked step by step.

mod common;

use async_trait::async_trait;
use chrono::Utc;
use std::sync::{Arc, Mutex};
use taskboard_client::{
    api::{AuthResponse, Credentials, TaskApi},
    dashboard::Dashboard,
    error::{ClientError, ClientResult},
    list::{AssumeYes, Confirm},
    session::{AuthMode, Session, SessionState},
    summary::EMPTY_SUMMARY,
    token_store::{MemoryTokenStore, TokenStore},
};
use taskboard_shared::models::{
    task::{NewTask, Task, TaskChanges, TaskInput, TaskPriority, TaskStatus},
    user::PublicUser,
};
use uuid::Uuid;

const TOKEN: &str = "fake-token";
const PASSWORD: &str = "hunter22";

#[derive(Default)]
struct FakeState {
    user: Option<PublicUser>,
    tasks: Vec<Task>,
    requests: usize,
    /// Every call fails with a bare 500 while set
    broken: bool,
}

#[derive(Clone, Default)]
struct FakeApi {
    state: Arc<Mutex<FakeState>>,
}

impl FakeApi {
    fn with_user(user: PublicUser) -> Self {
        let api = Self::default();
        api.state.lock().unwrap().user = Some(user);
        api
    }

    fn seed(&self, task: Task) {
        self.state.lock().unwrap().tasks.push(task);
    }

    fn requests(&self) -> usize {
        self.state.lock().unwrap().requests
    }

    fn break_server(&self) {
        self.state.lock().unwrap().broken = true;
    }

    fn stored_tasks(&self) -> Vec<Task> {
        self.state.lock().unwrap().tasks.clone()
    }

    fn enter(&self, token: Option<&str>) -> ClientResult<std::sync::MutexGuard<'_, FakeState>> {
        let mut state = self.state.lock().unwrap();
        state.requests += 1;

        if state.broken {
            return Err(ClientError::Api {
                status: 500,
                message: None,
            });
        }

        if let Some(token) = token {
            if token != TOKEN {
                return Err(api_error(401, "Invalid token"));
            }
        }

        Ok(state)
    }
}

fn api_error(status: u16, message: &str) -> ClientError {
    ClientError::Api {
        status,
        message: Some(message.to_string()),
    }
}

#[async_trait]
impl TaskApi for FakeApi {
    async fn register(&self, credentials: &Credentials) -> ClientResult<AuthResponse> {
        let mut state = self.enter(None)?;

        if state.user.as_ref().is_some_and(|u| u.email == credentials.email) {
            return Err(api_error(409, "Email already registered"));
        }

        let user = PublicUser {
            id: Uuid::new_v4(),
            name: credentials.name.clone().unwrap_or_default(),
            email: credentials.email.clone(),
        };
        state.user = Some(user.clone());

        Ok(AuthResponse {
            user,
            token: TOKEN.to_string(),
        })
    }

    async fn login(&self, credentials: &Credentials) -> ClientResult<AuthResponse> {
        let state = self.enter(None)?;

        match &state.user {
            Some(user) if user.email == credentials.email && credentials.password == PASSWORD => {
                Ok(AuthResponse {
                    user: user.clone(),
                    token: TOKEN.to_string(),
                })
            }
            _ => Err(api_error(401, "Invalid email or password")),
        }
    }

    async fn list_tasks(&self, token: &str) -> ClientResult<Vec<Task>> {
        Ok(self.enter(Some(token))?.tasks.clone())
    }

    async fn create_task(&self, token: &str, input: &TaskInput) -> ClientResult<Task> {
        let mut state = self.enter(Some(token))?;
        let new_task =
            NewTask::from_input(input.clone()).map_err(|e| api_error(422, &e.to_string()))?;

        let now = Utc::now();
        let task = Task {
            id: Uuid::new_v4(),
            owner: state.user.as_ref().map(|u| u.id).unwrap_or_default(),
            title: new_task.title,
            description: new_task.description,
            due_date: new_task.due_date,
            priority: new_task.priority,
            status: new_task.status,
            created_at: now,
            updated_at: now,
        };
        state.tasks.insert(0, task.clone());

        Ok(task)
    }

    async fn update_task(&self, token: &str, id: Uuid, changes: &TaskInput) -> ClientResult<Task> {
        let mut state = self.enter(Some(token))?;
        let changes =
            TaskChanges::from_input(changes.clone()).map_err(|e| api_error(422, &e.to_string()))?;

        let task = state
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| api_error(404, "Task not found"))?;

        if let Some(title) = changes.title {
            task.title = title;
        }
        if let Some(description) = changes.description {
            task.description = description;
        }
        if let Some(due_date) = changes.due_date {
            task.due_date = due_date;
        }
        if let Some(priority) = changes.priority {
            task.priority = priority;
        }
        if let Some(status) = changes.status {
            task.status = status;
        }
        task.updated_at = Utc::now();

        Ok(task.clone())
    }

    async fn delete_task(&self, token: &str, id: Uuid) -> ClientResult<()> {
        let mut state = self.enter(Some(token))?;
        let before = state.tasks.len();
        state.tasks.retain(|t| t.id != id);

        if state.tasks.len() == before {
            return Err(api_error(404, "Task not found"));
        }
        Ok(())
    }
}

struct Decline;

impl Confirm for Decline {
    fn confirm(&self, _prompt: &str) -> bool {
        false
    }
}

fn dashboard(api: &FakeApi, store: &MemoryTokenStore) -> Dashboard<FakeApi> {
    let session = Session::hydrate(Box::new(store.clone())).unwrap();
    Dashboard::new(api.clone(), session)
}

/// Logged-in dashboard over an empty task store
async fn logged_in() -> (Dashboard<FakeApi>, FakeApi, MemoryTokenStore) {
    let api = FakeApi::with_user(common::user());
    let store = MemoryTokenStore::new();
    let mut dashboard = dashboard(&api, &store);

    dashboard.auth_form.email = "ada@example.com".to_string();
    dashboard.auth_form.password = PASSWORD.to_string();
    dashboard.submit_auth().await.unwrap();

    (dashboard, api, store)
}

fn counts(dashboard: &Dashboard<FakeApi>) -> [usize; 3] {
    let summary = dashboard.summary();
    TaskStatus::ALL.map(|s| summary.count(s))
}

#[tokio::test]
async fn test_create_update_delete_scenario() {
    let (mut dashboard, _api, _store) = logged_in().await;

    dashboard.task_form.title = "Write report".to_string();
    dashboard.task_form.priority = TaskPriority::High;
    dashboard.task_form.status = TaskStatus::ToDo;
    let created = dashboard.submit_task().await.unwrap();

    assert_eq!(dashboard.tasks().len(), 1);
    assert_eq!(created.priority, TaskPriority::High);
    assert_eq!(counts(&dashboard), [1, 0, 0]);
    assert_eq!(dashboard.task_form.title, "");
    assert_eq!(dashboard.task_form.priority, TaskPriority::Medium);

    dashboard
        .change_status(created.id, TaskStatus::Done)
        .await
        .unwrap();

    assert_eq!(dashboard.tasks().len(), 1);
    assert_eq!(dashboard.tasks().tasks()[0].status, TaskStatus::Done);
    assert_eq!(dashboard.tasks().tasks()[0].title, "Write report");
    assert_eq!(counts(&dashboard), [0, 0, 1]);

    assert!(dashboard.delete_task(created.id, &AssumeYes).await.unwrap());

    assert!(dashboard.tasks().is_empty());
    assert_eq!(dashboard.summary().render(), EMPTY_SUMMARY);
}

#[tokio::test]
async fn test_defaults_when_form_untouched() {
    let (mut dashboard, _api, _store) = logged_in().await;

    dashboard.task_form.title = "Plain".to_string();
    let created = dashboard.submit_task().await.unwrap();

    assert_eq!(created.priority, TaskPriority::Medium);
    assert_eq!(created.status, TaskStatus::ToDo);
    assert_eq!(created.description, None);
    assert_eq!(created.due_date, None);
}

#[tokio::test]
async fn test_new_tasks_are_prepended() {
    let (mut dashboard, _api, _store) = logged_in().await;

    for title in ["first", "second"] {
        dashboard.task_form.title = title.to_string();
        dashboard.submit_task().await.unwrap();
    }

    let titles: Vec<&str> = dashboard
        .tasks()
        .tasks()
        .iter()
        .map(|t| t.title.as_str())
        .collect();
    assert_eq!(titles, vec!["second", "first"]);
}

#[tokio::test]
async fn test_empty_title_keeps_form_and_list() {
    let (mut dashboard, api, _store) = logged_in().await;

    dashboard.task_form.title = "   ".to_string();
    dashboard.task_form.description = "details".to_string();

    let notice = dashboard.submit_task().await.unwrap_err();

    assert_eq!(notice.message(), "Title is required");
    assert!(dashboard.tasks().is_empty());
    assert!(api.stored_tasks().is_empty());
    assert_eq!(dashboard.task_form.description, "details");
}

#[tokio::test]
async fn test_create_failure_without_server_message() {
    let (mut dashboard, api, _store) = logged_in().await;
    api.break_server();

    dashboard.task_form.title = "Write report".to_string();
    let notice = dashboard.submit_task().await.unwrap_err();

    assert_eq!(notice.message(), "Could not create task");
    assert_eq!(dashboard.task_form.title, "Write report");
}

#[tokio::test]
async fn test_same_status_twice_is_stable() {
    let (mut dashboard, _api, _store) = logged_in().await;
    dashboard.task_form.title = "Repeat".to_string();
    let created = dashboard.submit_task().await.unwrap();

    for _ in 0..2 {
        dashboard
            .change_status(created.id, TaskStatus::InProgress)
            .await
            .unwrap();
    }

    assert_eq!(dashboard.tasks().len(), 1);
    assert_eq!(counts(&dashboard), [0, 1, 0]);
}

#[tokio::test]
async fn test_update_failure_uses_generic_message() {
    let (mut dashboard, _api, _store) = logged_in().await;
    dashboard.task_form.title = "Keep".to_string();
    dashboard.submit_task().await.unwrap();
    let before = dashboard.tasks().clone();

    let notice = dashboard
        .change_status(Uuid::new_v4(), TaskStatus::Done)
        .await
        .unwrap_err();

    // The server said "Task not found"; status changes always show the generic text
    assert_eq!(notice.message(), "Could not update task");
    assert_eq!(dashboard.tasks(), &before);
}

#[tokio::test]
async fn test_declined_delete_sends_nothing() {
    let (mut dashboard, api, _store) = logged_in().await;
    dashboard.task_form.title = "Keep".to_string();
    let created = dashboard.submit_task().await.unwrap();
    let requests = api.requests();

    assert!(!dashboard.delete_task(created.id, &Decline).await.unwrap());

    assert_eq!(api.requests(), requests);
    assert_eq!(dashboard.tasks().len(), 1);
}

#[tokio::test]
async fn test_delete_removes_only_that_entry() {
    let (mut dashboard, _api, _store) = logged_in().await;
    for title in ["a", "b", "c"] {
        dashboard.task_form.title = title.to_string();
        dashboard.submit_task().await.unwrap();
    }
    let target = dashboard.tasks().tasks()[1].clone();

    dashboard.delete_task(target.id, &AssumeYes).await.unwrap();

    let titles: Vec<&str> = dashboard
        .tasks()
        .tasks()
        .iter()
        .map(|t| t.title.as_str())
        .collect();
    assert_eq!(titles, vec!["c", "a"]);
}

#[tokio::test]
async fn test_delete_failure_keeps_list() {
    let (mut dashboard, api, _store) = logged_in().await;
    for title in ["first", "second"] {
        dashboard.task_form.title = title.to_string();
        dashboard.submit_task().await.unwrap();
    }
    let before = dashboard.tasks().clone();
    let target = before.tasks()[0].id;
    api.break_server();

    let notice = dashboard.delete_task(target, &AssumeYes).await.unwrap_err();

    assert_eq!(notice.message(), "Could not delete task");
    assert_eq!(dashboard.tasks(), &before);
    assert_eq!(api.stored_tasks().len(), 2);
}

#[tokio::test]
async fn test_delete_of_unknown_task_keeps_list() {
    let (mut dashboard, _api, _store) = logged_in().await;
    dashboard.task_form.title = "Keep".to_string();
    dashboard.submit_task().await.unwrap();
    let before = dashboard.tasks().clone();

    let notice = dashboard
        .delete_task(Uuid::new_v4(), &AssumeYes)
        .await
        .unwrap_err();

    assert_eq!(notice.message(), "Could not delete task");
    assert_eq!(dashboard.tasks(), &before);
}

#[tokio::test]
async fn test_wrong_password_stays_unauthenticated() {
    let api = FakeApi::with_user(common::user());
    let store = MemoryTokenStore::new();
    let mut dashboard = dashboard(&api, &store);

    dashboard.auth_form.email = "ada@example.com".to_string();
    dashboard.auth_form.password = "wrong".to_string();
    let notice = dashboard.submit_auth().await.unwrap_err();

    assert_eq!(notice.message(), "Invalid email or password");
    assert_eq!(dashboard.session().state(), SessionState::Unauthenticated);
    assert_eq!(store.load().unwrap(), None);
    assert_eq!(dashboard.auth_form.password, "wrong");
}

#[tokio::test]
async fn test_login_failure_without_server_message() {
    let api = FakeApi::with_user(common::user());
    api.break_server();
    let store = MemoryTokenStore::new();
    let mut dashboard = dashboard(&api, &store);

    let notice = dashboard.submit_auth().await.unwrap_err();
    assert_eq!(notice.message(), "Login failed");

    dashboard.auth_mode = AuthMode::Register;
    let notice = dashboard.submit_auth().await.unwrap_err();
    assert_eq!(notice.message(), "Registration failed");
}

#[tokio::test]
async fn test_register_fetches_tasks_and_persists_token() {
    let api = FakeApi::default();
    let store = MemoryTokenStore::new();
    let mut dashboard = dashboard(&api, &store);

    dashboard.auth_mode = AuthMode::Register;
    dashboard.auth_form.name = "Grace".to_string();
    dashboard.auth_form.email = "grace@example.com".to_string();
    dashboard.auth_form.password = PASSWORD.to_string();

    // Present server-side before the session starts
    api.seed(common::task(
        Uuid::nil(),
        "Existing",
        TaskPriority::Low,
        TaskStatus::InProgress,
    ));

    dashboard.submit_auth().await.unwrap();

    assert!(dashboard.session().is_authenticated());
    assert_eq!(dashboard.session().greeting(), "Welcome, Grace!");
    assert_eq!(store.load().unwrap().as_deref(), Some(TOKEN));
    assert_eq!(dashboard.tasks().len(), 1);
    assert_eq!(dashboard.auth_form.email, "");
}

#[tokio::test]
async fn test_duplicate_registration_shows_server_message() {
    let api = FakeApi::with_user(common::user());
    let store = MemoryTokenStore::new();
    let mut dashboard = dashboard(&api, &store);

    dashboard.auth_mode = AuthMode::Register;
    dashboard.auth_form.name = "Ada".to_string();
    dashboard.auth_form.email = "ada@example.com".to_string();
    dashboard.auth_form.password = PASSWORD.to_string();

    let notice = dashboard.submit_auth().await.unwrap_err();
    assert_eq!(notice.message(), "Email already registered");
}

#[tokio::test]
async fn test_hydrated_session_loads_tasks() {
    let api = FakeApi::with_user(common::user());
    api.seed(common::task(
        Uuid::nil(),
        "Stored",
        TaskPriority::High,
        TaskStatus::ToDo,
    ));
    let store = MemoryTokenStore::with_token(TOKEN);
    let mut dashboard = dashboard(&api, &store);

    dashboard.start().await;

    assert!(dashboard.session().is_authenticated());
    assert!(dashboard.session().user().is_none());
    assert_eq!(dashboard.tasks().len(), 1);
}

#[tokio::test]
async fn test_stale_token_only_fails_the_fetch() {
    let api = FakeApi::with_user(common::user());
    api.seed(common::task(
        Uuid::nil(),
        "Hidden",
        TaskPriority::High,
        TaskStatus::ToDo,
    ));
    let store = MemoryTokenStore::with_token("expired-token");
    let mut dashboard = dashboard(&api, &store);

    dashboard.start().await;

    assert!(dashboard.session().is_authenticated());
    assert!(dashboard.tasks().is_empty());
}

#[tokio::test]
async fn test_logout_clears_everything() {
    let (mut dashboard, _api, store) = logged_in().await;
    dashboard.task_form.title = "Gone soon".to_string();
    dashboard.submit_task().await.unwrap();

    dashboard.logout().unwrap();

    assert_eq!(dashboard.session().state(), SessionState::Unauthenticated);
    assert!(dashboard.tasks().is_empty());
    assert_eq!(store.load().unwrap(), None);
}

#[tokio::test]
async fn test_task_actions_need_a_session() {
    let api = FakeApi::default();
    let store = MemoryTokenStore::new();
    let mut dashboard = dashboard(&api, &store);

    dashboard.task_form.title = "Nope".to_string();
    let notice = dashboard.submit_task().await.unwrap_err();

    assert_eq!(notice.message(), "Could not create task");
    assert_eq!(api.requests(), 0);
    assert!(!dashboard.refresh_tasks().await);
}
