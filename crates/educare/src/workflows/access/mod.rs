//! Staff and parent sign-in: role-keyed credential lookup, token-keyed sessions with a
//! per-seat lifecycle, role landing routes, and the per-screen capability check.

pub mod auth;
pub mod client;
pub mod credentials;
pub mod navigation;
pub mod roles;
pub mod router;
pub mod service;
pub mod session;

#[cfg(test)]
mod tests;

pub use auth::{
    authenticate, validate_login, AuthFailure, LoginError, LoginFieldErrors, LoginRequest,
    AUTH_FAILURE_MESSAGE,
};
pub use client::AccessClient;
pub use credentials::{CredentialLoadError, CredentialTable, CredentialVerifier};
pub use navigation::{
    authorize, is_active_route, navigation_for, path_for_role, path_for_role_name, screens_for,
    AccessDenied, NavLink, Placement, RoleNavigation, Screen, LOGIN_ROUTE,
};
pub use roles::Role;
pub use router::{access_router, bearer_token};
pub use service::{AccessService, LoginOutcome};
pub use session::{InMemorySessionStore, Session, SessionState, SessionStore, SessionToken};
