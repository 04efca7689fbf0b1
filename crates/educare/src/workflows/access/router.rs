use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::auth::{LoginError, LoginRequest};
use super::credentials::CredentialVerifier;
use super::navigation::{AccessDenied, LOGIN_ROUTE};
use super::service::AccessService;
use super::session::{SessionStore, SessionToken};

/// Router builder for sign-in, the session lifecycle, and screen capability checks.
pub fn access_router<V, S>(service: Arc<AccessService<V, S>>) -> Router
where
    V: CredentialVerifier + 'static,
    S: SessionStore + 'static,
{
    Router::new()
        .route("/api/v1/auth/login", post(login_handler::<V, S>))
        .route("/api/v1/auth/logout", post(logout_handler::<V, S>))
        .route("/api/v1/auth/session", get(session_handler::<V, S>))
        .route("/api/v1/navigation", get(navigation_handler::<V, S>))
        .route("/api/v1/screens/*path", get(screen_handler::<V, S>))
        .with_state(service)
}

/// Token from the `Authorization` header, if the caller sent one.
pub fn bearer_token(headers: &HeaderMap) -> Option<SessionToken> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(SessionToken::from_authorization)
}

pub(crate) async fn login_handler<V, S>(
    State(service): State<Arc<AccessService<V, S>>>,
    headers: HeaderMap,
    axum::Json(request): axum::Json<LoginRequest>,
) -> Response
where
    V: CredentialVerifier + 'static,
    S: SessionStore + 'static,
{
    match service.login(&request) {
        Ok(outcome) => {
            if let Some(previous) = bearer_token(&headers) {
                service.logout(Some(&previous));
            }
            (StatusCode::OK, axum::Json(outcome)).into_response()
        }
        Err(LoginError::Validation(errors)) => {
            let payload = json!({
                "error": errors.to_string(),
                "fields": errors,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(LoginError::Failed(failure)) => {
            let payload = json!({
                "error": failure.to_string(),
            });
            (StatusCode::UNAUTHORIZED, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn logout_handler<V, S>(
    State(service): State<Arc<AccessService<V, S>>>,
    headers: HeaderMap,
) -> Response
where
    V: CredentialVerifier + 'static,
    S: SessionStore + 'static,
{
    let landing_route = service.logout(bearer_token(&headers).as_ref());
    (
        StatusCode::OK,
        axum::Json(json!({ "landing_route": landing_route })),
    )
        .into_response()
}

pub(crate) async fn session_handler<V, S>(
    State(service): State<Arc<AccessService<V, S>>>,
    headers: HeaderMap,
) -> Response
where
    V: CredentialVerifier + 'static,
    S: SessionStore + 'static,
{
    let token = bearer_token(&headers);
    let session = service.session(token.as_ref());
    let state = service.restore(token.as_ref());
    let payload = json!({
        "state": state,
        "landing_route": service.landing_route(token.as_ref()),
        "session": session,
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn navigation_handler<V, S>(
    State(service): State<Arc<AccessService<V, S>>>,
    headers: HeaderMap,
) -> Response
where
    V: CredentialVerifier + 'static,
    S: SessionStore + 'static,
{
    match service.navigation(bearer_token(&headers).as_ref()) {
        Some(navigation) => (StatusCode::OK, axum::Json(navigation)).into_response(),
        None => denied_response(AccessDenied::LoginRequired),
    }
}

pub(crate) async fn screen_handler<V, S>(
    State(service): State<Arc<AccessService<V, S>>>,
    headers: HeaderMap,
    Path(path): Path<String>,
) -> Response
where
    V: CredentialVerifier + 'static,
    S: SessionStore + 'static,
{
    let path = format!("/{}", path.trim_start_matches('/'));
    match service.authorize(bearer_token(&headers).as_ref(), &path) {
        Ok(screen) => (StatusCode::OK, axum::Json(screen)).into_response(),
        Err(denied) => denied_response(denied),
    }
}

pub(crate) fn denied_response(denied: AccessDenied) -> Response {
    match denied {
        AccessDenied::LoginRequired => {
            let payload = json!({
                "error": denied.to_string(),
                "redirect": LOGIN_ROUTE,
            });
            (StatusCode::UNAUTHORIZED, axum::Json(payload)).into_response()
        }
        AccessDenied::Forbidden { home } => {
            let payload = json!({
                "error": denied.to_string(),
                "redirect": home,
            });
            (StatusCode::FORBIDDEN, axum::Json(payload)).into_response()
        }
        AccessDenied::UnknownScreen => {
            let payload = json!({
                "error": denied.to_string(),
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
    }
}
