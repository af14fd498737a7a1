/// Client configuration
///
/// # Environment Variables
///
/// - `TASKBOARD_API_BASE`: Server base URL (default: `http://localhost:5000`)
/// - `TASKBOARD_TOKEN_PATH`: File holding the bearer token (default: `.taskboard/token`)
///
/// A `.env` file in the working directory is read first, if present.

use std::{env, path::PathBuf};

pub const DEFAULT_API_BASE: &str = "http://localhost:5000";
pub const DEFAULT_TOKEN_PATH: &str = ".taskboard/token";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL without trailing slash
    pub api_base: String,

    pub token_path: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            token_path: PathBuf::from(DEFAULT_TOKEN_PATH),
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base = lookup("TASKBOARD_API_BASE")
            .map(|base| base.trim().trim_end_matches('/').to_string())
            .filter(|base| !base.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        let token_path = lookup("TASKBOARD_TOKEN_PATH")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TOKEN_PATH));

        Self {
            api_base,
            token_path,
        }
    }
}
