use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use super::auth::{authenticate, LoginError, LoginRequest};
use super::credentials::CredentialVerifier;
use super::navigation::{
    authorize, navigation_for, path_for_role, AccessDenied, RoleNavigation, Screen, LOGIN_ROUTE,
};
use super::session::{Session, SessionState, SessionStore, SessionToken};

/// Result of a successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginOutcome {
    pub token: SessionToken,
    pub session: Session,
    pub landing_route: &'static str,
}

/// Shared sign-in authority over an injected verifier and session store. Every query
/// is answered for the token the caller presents; no token means no session.
pub struct AccessService<V, S> {
    verifier: Arc<V>,
    store: Arc<S>,
}

impl<V, S> AccessService<V, S>
where
    V: CredentialVerifier + 'static,
    S: SessionStore + 'static,
{
    pub fn new(verifier: Arc<V>, store: Arc<S>) -> Self {
        Self { verifier, store }
    }

    /// State a caller presenting `token` is in. Unknown or absent tokens are signed out.
    pub fn restore(&self, token: Option<&SessionToken>) -> SessionState {
        match self.session(token) {
            Some(session) => SessionState::Authenticated(session.role),
            None => SessionState::Unauthenticated,
        }
    }

    pub fn login(&self, request: &LoginRequest) -> Result<LoginOutcome, LoginError> {
        match authenticate(self.verifier.as_ref(), request) {
            Ok(session) => {
                let landing_route = path_for_role(session.role);
                info!(
                    role = session.role.as_str(),
                    username = %session.username,
                    landing_route,
                    "login succeeded"
                );
                let token = SessionToken::generate();
                self.store.establish(token.clone(), session.clone());
                Ok(LoginOutcome {
                    token,
                    session,
                    landing_route,
                })
            }
            Err(err) => {
                warn!(
                    role = request.role.as_deref().unwrap_or_default(),
                    username = %request.username.trim(),
                    reason = %err,
                    "login rejected"
                );
                Err(err)
            }
        }
    }

    /// Ends the session behind `token`, if any. Always routes back to login.
    pub fn logout(&self, token: Option<&SessionToken>) -> &'static str {
        if let Some(session) = token.and_then(|token| self.store.clear(token)) {
            info!(role = session.role.as_str(), username = %session.username, "logout");
        }
        LOGIN_ROUTE
    }

    pub fn session(&self, token: Option<&SessionToken>) -> Option<Session> {
        token.and_then(|token| self.store.current(token))
    }

    pub fn landing_route(&self, token: Option<&SessionToken>) -> &'static str {
        self.session(token)
            .map_or(LOGIN_ROUTE, |session| path_for_role(session.role))
    }

    pub fn navigation(&self, token: Option<&SessionToken>) -> Option<RoleNavigation> {
        self.session(token)
            .map(|session| navigation_for(session.role))
    }

    pub fn authorize(
        &self,
        token: Option<&SessionToken>,
        path: &str,
    ) -> Result<&'static Screen, AccessDenied> {
        let session = self.session(token);
        let result = authorize(session.as_ref(), path);
        if let (Some(session), Err(AccessDenied::Forbidden { .. })) = (&session, &result) {
            warn!(role = session.role.as_str(), %path, "screen access denied");
        }
        result
    }
}
