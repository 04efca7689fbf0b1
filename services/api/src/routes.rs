use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::{Extension, Json, Router};
use educare::workflows::access::{access_router, AccessService, CredentialVerifier, SessionStore};
use educare::workflows::admission::{
    admission_router, AdmissionService, ContactGateway, EnrollmentGateway,
};
use educare::workflows::observation::{observation_router, ObservationBoard};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_service_routes<G, C, V, S>(
    admission: Arc<AdmissionService<G, C>>,
    access: Arc<AccessService<V, S>>,
    observations: Arc<ObservationBoard>,
) -> Router
where
    G: EnrollmentGateway + 'static,
    C: ContactGateway + 'static,
    V: CredentialVerifier + 'static,
    S: SessionStore + 'static,
{
    admission_router(admission)
        .merge(access_router(access.clone()))
        .merge(observation_router(observations, access))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
