/// Task API client
///
/// [`TaskApi`] is the seam between the UI controllers and the network:
/// [`HttpTaskApi`] talks to a real server, tests plug in an in-memory fake.
///
/// # Example
///
/// ```no_run
/// use taskboard_client::api::{Credentials, HttpTaskApi, TaskApi};
///
/// # async fn example() -> Result<(), taskboard_client::error::ClientError> {
/// let api = HttpTaskApi::new("http://localhost:5000");
/// let auth = api
///     .login(&Credentials {
///         name: None,
///         email: "ada@example.com".to_string(),
///         password: "hunter22".to_string(),
///     })
///     .await?;
///
/// for task in api.list_tasks(&auth.token).await? {
///     println!("{} [{}]", task.title, task.status);
/// }
/// # Ok(())
/// # }
/// ```

use crate::error::{ClientError, ClientResult};
use async_trait::async_trait;
use reqwest::{RequestBuilder, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use taskboard_shared::models::{
    task::{Task, TaskInput},
    user::PublicUser,
};
use uuid::Uuid;

/// Body of register and login requests
///
/// `name` is only sent when registering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Credentials {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub email: String,
    pub password: String,
}

/// Successful register or login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: PublicUser,
    pub token: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

#[async_trait]
pub trait TaskApi: Send + Sync {
    async fn register(&self, credentials: &Credentials) -> ClientResult<AuthResponse>;

    async fn login(&self, credentials: &Credentials) -> ClientResult<AuthResponse>;

    /// The caller's tasks, in server order
    async fn list_tasks(&self, token: &str) -> ClientResult<Vec<Task>>;

    async fn create_task(&self, token: &str, input: &TaskInput) -> ClientResult<Task>;

    /// Sends only the fields present in `changes`
    async fn update_task(&self, token: &str, id: Uuid, changes: &TaskInput) -> ClientResult<Task>;

    async fn delete_task(&self, token: &str, id: Uuid) -> ClientResult<()>;
}

/// [`TaskApi`] over HTTP
#[derive(Debug, Clone)]
pub struct HttpTaskApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTaskApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn task_url(&self, id: Uuid) -> String {
        self.url(&format!("/api/tasks/{}", id))
    }

    async fn send(request: RequestBuilder) -> ClientResult<Response> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        // Error bodies are `{error, message, details?}`; anything else has no message
        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message);

        tracing::debug!(status = status.as_u16(), ?message, "API request failed");

        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> ClientResult<T> {
        Self::send(request).await?.json::<T>().await.map_err(|e| {
            if e.is_decode() {
                ClientError::Decode(e.to_string())
            } else {
                ClientError::Transport(e)
            }
        })
    }
}

#[async_trait]
impl TaskApi for HttpTaskApi {
    async fn register(&self, credentials: &Credentials) -> ClientResult<AuthResponse> {
        Self::send_json(
            self.client
                .post(self.url("/api/auth/register"))
                .json(credentials),
        )
        .await
    }

    async fn login(&self, credentials: &Credentials) -> ClientResult<AuthResponse> {
        let body = Credentials {
            name: None,
            ..credentials.clone()
        };

        Self::send_json(self.client.post(self.url("/api/auth/login")).json(&body)).await
    }

    async fn list_tasks(&self, token: &str) -> ClientResult<Vec<Task>> {
        Self::send_json(self.client.get(self.url("/api/tasks")).bearer_auth(token)).await
    }

    async fn create_task(&self, token: &str, input: &TaskInput) -> ClientResult<Task> {
        Self::send_json(
            self.client
                .post(self.url("/api/tasks"))
                .bearer_auth(token)
                .json(input),
        )
        .await
    }

    async fn update_task(&self, token: &str, id: Uuid, changes: &TaskInput) -> ClientResult<Task> {
        Self::send_json(
            self.client
                .put(self.task_url(id))
                .bearer_auth(token)
                .json(changes),
        )
        .await
    }

    async fn delete_task(&self, token: &str, id: Uuid) -> ClientResult<()> {
        Self::send(self.client.delete(self.task_url(id)).bearer_auth(token)).await?;
        Ok(())
    }
}
