use std::fmt;

use serde::{Deserialize, Serialize};

use super::credentials::CredentialVerifier;
use super::roles::Role;
use super::session::Session;

pub const AUTH_FAILURE_MESSAGE: &str =
    "Invalid username or password for the selected role. Please check your credentials and try again.";

/// Sign-in form as submitted. `role` is the raw picker value.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl LoginRequest {
    pub fn new(
        role: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            role: Some(role.into()),
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("role", &self.role)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Per-field guard messages, all collected in one pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoginFieldErrors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<&'static str>,
}

impl LoginFieldErrors {
    pub fn is_empty(&self) -> bool {
        self.role.is_none() && self.username.is_none() && self.password.is_none()
    }
}

impl fmt::Display for LoginFieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = [self.role, self.username, self.password]
            .into_iter()
            .flatten()
            .collect();
        f.write_str(&messages.join("; "))
    }
}

/// Deliberately uninformative: the caller never learns which part was wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{}", AUTH_FAILURE_MESSAGE)]
pub struct AuthFailure;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginError {
    #[error("{0}")]
    Validation(LoginFieldErrors),
    #[error(transparent)]
    Failed(#[from] AuthFailure),
}

pub fn validate_login(request: &LoginRequest) -> Result<(), LoginFieldErrors> {
    let role_selected = request
        .role
        .as_deref()
        .is_some_and(|role| !role.is_empty());

    let errors = LoginFieldErrors {
        role: (!role_selected).then_some("Please select your role"),
        username: request
            .username
            .trim()
            .is_empty()
            .then_some("Please enter your username"),
        password: request
            .password
            .trim()
            .is_empty()
            .then_some("Please enter your password"),
    };

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Guard clauses first, then a single lookup against the selected role's account.
pub fn authenticate<V>(verifier: &V, request: &LoginRequest) -> Result<Session, LoginError>
where
    V: CredentialVerifier + ?Sized,
{
    validate_login(request).map_err(LoginError::Validation)?;

    let role = request
        .role
        .as_deref()
        .and_then(Role::parse)
        .ok_or(AuthFailure)?;
    let username = request.username.trim();
    let password = request.password.trim();

    if verifier.verify(role, username, password) {
        Ok(Session::new(role, username))
    } else {
        Err(AuthFailure.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_redacts_the_password() {
        let request = LoginRequest::new("parent", "parentuser", "password123");
        let rendered = format!("{request:?}");
        assert!(rendered.contains("parentuser"));
        assert!(!rendered.contains("password123"));
    }

    #[test]
    fn field_errors_join_in_form_order() {
        let errors = validate_login(&LoginRequest::default()).expect_err("blank form");
        assert_eq!(
            errors.to_string(),
            "Please select your role; Please enter your username; Please enter your password"
        );
    }
}
