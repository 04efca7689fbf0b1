use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request};
use axum::response::Response;
use serde_json::Value;

use crate::workflows::access::{
    AccessClient, AccessService, CredentialTable, InMemorySessionStore, LoginRequest, Role,
    SessionToken,
};

pub(super) type TestService = AccessService<CredentialTable, InMemorySessionStore>;
pub(super) type TestClient = AccessClient<CredentialTable, InMemorySessionStore>;

pub(super) fn build_service() -> (Arc<TestService>, Arc<InMemorySessionStore>) {
    let store = Arc::new(InMemorySessionStore::new());
    let service = Arc::new(AccessService::new(
        Arc::new(CredentialTable::standard()),
        store.clone(),
    ));
    (service, store)
}

pub(super) fn default_username(role: Role) -> &'static str {
    match role {
        Role::EccdOffice => "eccdadmin",
        Role::SeedTeacher => "seedteacher",
        Role::EducareTeacher => "educareteacher",
        Role::Parent => "parentuser",
    }
}

pub(super) fn valid_login(role: Role) -> LoginRequest {
    LoginRequest::new(role.as_str(), default_username(role), "password123")
}

/// A restored seat signed in with the role's default account.
pub(super) fn signed_in(role: Role) -> TestClient {
    let (service, _) = build_service();
    let client = AccessClient::new(service);
    client.restore();
    client
        .login(&valid_login(role))
        .expect("default account signs in");
    client
}

/// Service with one live session, plus the token that session was issued under.
pub(super) fn issued_token(role: Role) -> (Arc<TestService>, SessionToken) {
    let (service, _) = build_service();
    let outcome = service
        .login(&valid_login(role))
        .expect("default account signs in");
    (service, outcome.token)
}

pub(super) fn get(uri: &str, token: Option<&SessionToken>) -> Request<Body> {
    let builder = Request::get(uri);
    let builder = match token {
        Some(token) => builder.header(header::AUTHORIZATION, token.bearer()),
        None => builder,
    };
    builder.body(Body::empty()).expect("request builds")
}

pub(super) fn post_empty(uri: &str, token: Option<&SessionToken>) -> Request<Body> {
    let builder = Request::post(uri);
    let builder = match token {
        Some(token) => builder.header(header::AUTHORIZATION, token.bearer()),
        None => builder,
    };
    builder.body(Body::empty()).expect("request builds")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 8192)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
