use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::roles::Role;

/// The signed-in user. Absence of a session is the only way to be signed out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub name: String,
    pub username: String,
    pub role: Role,
}

impl Session {
    pub fn new(role: Role, username: impl Into<String>) -> Self {
        let username = username.into();
        Self {
            id: format!("{}_{}", role.as_str(), username),
            name: username.clone(),
            username,
            role,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "role", rename_all = "snake_case")]
pub enum SessionState {
    Loading,
    Unauthenticated,
    Authenticated(Role),
}

impl SessionState {
    pub fn role(&self) -> Option<Role> {
        match self {
            SessionState::Authenticated(role) => Some(*role),
            SessionState::Loading | SessionState::Unauthenticated => None,
        }
    }
}

/// Opaque bearer credential handed out at sign-in. It is the only key into a
/// `SessionStore`, so a caller without one is always signed out.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Reads an `Authorization` header value. Accepts `Bearer <token>` or the raw token;
    /// a blank value counts as no token.
    pub fn from_authorization(value: &str) -> Option<Self> {
        let token = value.strip_prefix("Bearer ").unwrap_or(value).trim();
        (!token.is_empty()).then(|| Self(token.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}

/// Holder of live sessions keyed by token. Only these three operations exist.
pub trait SessionStore: Send + Sync {
    fn current(&self, token: &SessionToken) -> Option<Session>;
    fn establish(&self, token: SessionToken, session: Session);
    /// Drops the session behind `token`, returning it when one was live.
    fn clear(&self, token: &SessionToken) -> Option<Session>;
}

/// Process-local session table; nothing survives a restart.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: Mutex<HashMap<SessionToken, Session>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn sessions(&self) -> MutexGuard<'_, HashMap<SessionToken, Session>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SessionStore for InMemorySessionStore {
    fn current(&self, token: &SessionToken) -> Option<Session> {
        self.sessions().get(token).cloned()
    }

    fn establish(&self, token: SessionToken, session: Session) {
        self.sessions().insert(token, session);
    }

    fn clear(&self, token: &SessionToken) -> Option<Session> {
        self.sessions().remove(token)
    }
}
