/// Error type for the Taskboard client
///
/// Every failure a user action can hit ends up here. The UI layer turns a
/// `ClientError` into a one-line message; see [`ClientError::server_message`].

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered with a non-success status
    #[error("Server returned {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Api {
        status: u16,

        /// `message` field of the error body, when the body had one
        message: Option<String>,
    },

    /// The request never got a response
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Reading or writing the persisted token failed
    #[error("Token storage failed: {0}")]
    Storage(#[from] std::io::Error),

    /// The response body was not what the API promises
    #[error("Unexpected response: {0}")]
    Decode(String),

    /// An action that needs a token ran without one
    #[error("Not logged in")]
    NotAuthenticated,
}

impl ClientError {
    /// Message supplied by the server, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Api {
                message: Some(message),
                ..
            } => Some(message),
            _ => None,
        }
    }

    /// HTTP status of an API error
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
