use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthState {
    #[default]
    SignedOut,
    /// `user` is unknown when the session was restored from a stored
    /// credential rather than a fresh login.
    SignedIn { user: Option<AuthUser> },
}

/// Who is signed in, plus login form progress.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    pub auth: AuthState,
    pub pending: bool,
    pub error: Option<String>,
}

impl Session {
    /// Startup state: signed in exactly when a credential is stored.
    pub fn from_credential(token: Option<&str>) -> Self {
        let auth = match token.map(str::trim) {
            Some(token) if !token.is_empty() => AuthState::SignedIn { user: None },
            _ => AuthState::SignedOut,
        };
        Self {
            auth,
            ..Self::default()
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.auth, AuthState::SignedIn { .. })
    }

    pub fn user(&self) -> Option<&AuthUser> {
        match &self.auth {
            AuthState::SignedIn { user } => user.as_ref(),
            AuthState::SignedOut => None,
        }
    }

    pub fn begin_sign_in(&mut self) -> bool {
        if self.pending {
            return false;
        }
        self.pending = true;
        self.error = None;
        true
    }

    pub fn sign_in_succeeded(&mut self, user: AuthUser) {
        info!(username = %user.username, "Signed in");
        self.auth = AuthState::SignedIn { user: Some(user) };
        self.pending = false;
        self.error = None;
    }

    pub fn sign_in_failed(&mut self, message: impl Into<String>) {
        self.auth = AuthState::SignedOut;
        self.pending = false;
        self.error = Some(message.into());
    }

    pub fn sign_out(&mut self) {
        *self = Self::default();
    }

    /// The backend rejected the stored credential.
    pub fn expire(&mut self) {
        if self.is_authenticated() {
            info!("Session expired");
        }
        self.auth = AuthState::SignedOut;
        self.pending = false;
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }
}
