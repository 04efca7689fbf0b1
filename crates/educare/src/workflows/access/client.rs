use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::auth::{LoginError, LoginRequest};
use super::credentials::CredentialVerifier;
use super::navigation::{AccessDenied, RoleNavigation, Screen};
use super::service::{AccessService, LoginOutcome};
use super::session::{Session, SessionState, SessionStore, SessionToken};

#[derive(Debug)]
struct Seat {
    token: Option<SessionToken>,
    state: SessionState,
}

/// A single dashboard seat over a shared `AccessService`. It keeps the seat's token and
/// walks the `Loading`, `Unauthenticated`, `Authenticated(role)` lifecycle.
pub struct AccessClient<V, S> {
    service: Arc<AccessService<V, S>>,
    seat: Mutex<Seat>,
}

impl<V, S> AccessClient<V, S>
where
    V: CredentialVerifier + 'static,
    S: SessionStore + 'static,
{
    pub fn new(service: Arc<AccessService<V, S>>) -> Self {
        Self::with_token(service, None)
    }

    /// Seat holding a token from an earlier sign-in; `restore` decides whether it is live.
    pub fn resume(service: Arc<AccessService<V, S>>, token: SessionToken) -> Self {
        Self::with_token(service, Some(token))
    }

    fn with_token(service: Arc<AccessService<V, S>>, token: Option<SessionToken>) -> Self {
        Self {
            service,
            seat: Mutex::new(Seat {
                token,
                state: SessionState::Loading,
            }),
        }
    }

    fn seat(&self) -> MutexGuard<'_, Seat> {
        self.seat.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn state(&self) -> SessionState {
        self.seat().state
    }

    pub fn token(&self) -> Option<SessionToken> {
        self.seat().token.clone()
    }

    /// Leaves `Loading`. A token the store no longer knows is dropped.
    pub fn restore(&self) -> SessionState {
        let mut seat = self.seat();
        let state = self.service.restore(seat.token.as_ref());
        if state == SessionState::Unauthenticated {
            seat.token = None;
        }
        seat.state = state;
        state
    }

    /// Signs in, replacing any session this seat already held. A failure leaves the
    /// seat untouched.
    pub fn login(&self, request: &LoginRequest) -> Result<LoginOutcome, LoginError> {
        let outcome = self.service.login(request)?;
        let mut seat = self.seat();
        if let Some(previous) = seat.token.replace(outcome.token.clone()) {
            self.service.logout(Some(&previous));
        }
        seat.state = SessionState::Authenticated(outcome.session.role);
        Ok(outcome)
    }

    pub fn logout(&self) -> &'static str {
        let token = {
            let mut seat = self.seat();
            seat.state = SessionState::Unauthenticated;
            seat.token.take()
        };
        self.service.logout(token.as_ref())
    }

    pub fn session(&self) -> Option<Session> {
        self.service.session(self.token().as_ref())
    }

    pub fn landing_route(&self) -> &'static str {
        self.service.landing_route(self.token().as_ref())
    }

    pub fn navigation(&self) -> Option<RoleNavigation> {
        self.service.navigation(self.token().as_ref())
    }

    pub fn authorize(&self, path: &str) -> Result<&'static Screen, AccessDenied> {
        self.service.authorize(self.token().as_ref(), path)
    }
}
