/// Client session state
///
/// A session is either unauthenticated (no token) or authenticated (token,
/// and usually the user it belongs to). The token is mirrored into a
/// [`TokenStore`] so a restarted client comes back authenticated; the user is
/// not persisted and stays unknown until the next login.
///
/// # Example
///
/// ```
/// use taskboard_client::session::{Session, SessionState};
/// use taskboard_client::token_store::MemoryTokenStore;
///
/// # fn example() -> Result<(), taskboard_client::error::ClientError> {
/// let session = Session::hydrate(Box::new(MemoryTokenStore::with_token("eyJ...")))?;
/// assert_eq!(session.state(), SessionState::Authenticated);
/// assert!(session.user().is_none());
/// # Ok(())
/// # }
/// ```

use crate::{
    api::{AuthResponse, Credentials},
    error::ClientResult,
    token_store::TokenStore,
};
use taskboard_shared::models::user::PublicUser;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unauthenticated,
    Authenticated,
}

pub struct Session {
    store: Box<dyn TokenStore>,
    token: Option<String>,
    user: Option<PublicUser>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.token.is_some())
            .field("user", &self.user)
            .finish()
    }
}

impl Session {
    /// Restores the session from durable storage
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Storage` if the store cannot be read
    pub fn hydrate(store: Box<dyn TokenStore>) -> ClientResult<Self> {
        let token = store.load()?;

        if token.is_some() {
            tracing::debug!("Restored session token from storage");
        }

        Ok(Self {
            store,
            token,
            user: None,
        })
    }

    pub fn state(&self) -> SessionState {
        match self.token {
            Some(_) => SessionState::Authenticated,
            None => SessionState::Unauthenticated,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.state() == SessionState::Authenticated
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// The logged-in user; `None` right after a hydrate
    pub fn user(&self) -> Option<&PublicUser> {
        self.user.as_ref()
    }

    /// Dashboard greeting
    pub fn greeting(&self) -> String {
        let name = self.user.as_ref().map(|u| u.name.as_str()).unwrap_or("User");
        format!("Welcome, {}!", name)
    }

    /// Moves to Authenticated and persists the token
    ///
    /// A token that cannot be persisted still authenticates this process;
    /// the failure is logged.
    pub fn establish(&mut self, auth: AuthResponse) {
        if let Err(e) = self.store.save(&auth.token) {
            tracing::warn!(error = %e, "Could not persist session token");
        }

        tracing::info!(user_id = %auth.user.id, "Session established");

        self.token = Some(auth.token);
        self.user = Some(auth.user);
    }

    /// Moves to Unauthenticated, forgetting the token in memory and on disk
    pub fn clear(&mut self) -> ClientResult<()> {
        self.token = None;
        self.user = None;
        self.store.clear()?;
        Ok(())
    }
}

/// Which auth request the form submits
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

/// Login / registration form fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthForm {
    /// Only sent in [`AuthMode::Register`]
    pub name: String,
    pub email: String,
    pub password: String,
}

impl AuthForm {
    pub fn credentials(&self, mode: AuthMode) -> Credentials {
        Credentials {
            name: match mode {
                AuthMode::Register => Some(self.name.clone()),
                AuthMode::Login => None,
            },
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
