use std::collections::HashMap;
use std::fmt::Display;

use tokio::sync::RwLock;
use uuid::Uuid;

/// Opaque bearer token identifying one editor session.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SessionToken(String);

impl SessionToken {
    fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SessionToken {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl Display for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Proof that the caller passed the password gate.
///
/// Can only be obtained from [`PasswordGate::login`], so every operation that takes
/// `&EditorSession` is unreachable for anonymous callers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditorSession {
    token: SessionToken,
}

impl EditorSession {
    pub fn token(&self) -> &SessionToken {
        &self.token
    }
}

/// Single shared password protecting the editor.
#[derive(Clone)]
pub struct PasswordGate {
    password: String,
}

impl PasswordGate {
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
        }
    }

    pub fn login(&self, password: &str) -> Option<EditorSession> {
        if password != self.password {
            tracing::warn!("rejected login attempt");
            return None;
        }
        Some(EditorSession {
            token: SessionToken::generate(),
        })
    }
}

/// Live sessions, keyed by token.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<SessionToken, EditorSession>>,
}

impl SessionRegistry {
    pub async fn insert(&self, session: EditorSession) {
        self.sessions
            .write()
            .await
            .insert(session.token.clone(), session);
    }

    pub async fn resolve(&self, token: &SessionToken) -> Option<EditorSession> {
        self.sessions.read().await.get(token).cloned()
    }

    /// Returns false if the token was not registered
    pub async fn revoke(&self, token: &SessionToken) -> bool {
        self.sessions.write().await.remove(token).is_some()
    }
}
