use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::board::ObservationBoard;
use super::form::{ObservationError, ObservationForm, OverallRating};
use super::roster::{ObservationFilter, BARANGAYS, CENTERS, SCHOOL_YEARS};
use crate::workflows::access::router::{bearer_token, denied_response};
use crate::workflows::access::{AccessService, CredentialVerifier, SessionStore};

pub const CLASSROOM_SCREEN: &str = "/eccd_office/classroom";

pub struct ObservationState<V, S> {
    pub board: Arc<ObservationBoard>,
    pub access: Arc<AccessService<V, S>>,
}

impl<V, S> Clone for ObservationState<V, S> {
    fn clone(&self) -> Self {
        Self {
            board: self.board.clone(),
            access: self.access.clone(),
        }
    }
}

/// Router builder for the office's classroom observation screen.
pub fn observation_router<V, S>(
    board: Arc<ObservationBoard>,
    access: Arc<AccessService<V, S>>,
) -> Router
where
    V: CredentialVerifier + 'static,
    S: SessionStore + 'static,
{
    Router::new()
        .route("/api/v1/observations", get(list_handler::<V, S>))
        .route("/api/v1/observations/:entry_id", post(record_handler::<V, S>))
        .with_state(ObservationState { board, access })
}

pub(crate) async fn list_handler<V, S>(
    State(state): State<ObservationState<V, S>>,
    headers: HeaderMap,
    Query(filter): Query<ObservationFilter>,
) -> Response
where
    V: CredentialVerifier + 'static,
    S: SessionStore + 'static,
{
    let token = bearer_token(&headers);
    if let Err(denied) = state.access.authorize(token.as_ref(), CLASSROOM_SCREEN) {
        return denied_response(denied);
    }

    let entries = state.board.list(&filter);
    let ratings: Vec<&str> = OverallRating::ALL.iter().map(|rating| rating.label()).collect();
    let payload = json!({
        "entries": entries,
        "filters": {
            "barangays": BARANGAYS,
            "centers": CENTERS,
            "school_years": SCHOOL_YEARS,
            "ratings": ratings,
        },
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn record_handler<V, S>(
    State(state): State<ObservationState<V, S>>,
    headers: HeaderMap,
    Path(entry_id): Path<u32>,
    axum::Json(form): axum::Json<ObservationForm>,
) -> Response
where
    V: CredentialVerifier + 'static,
    S: SessionStore + 'static,
{
    let token = bearer_token(&headers);
    if let Err(denied) = state.access.authorize(token.as_ref(), CLASSROOM_SCREEN) {
        return denied_response(denied);
    }

    match state.board.record_observation(entry_id, &form) {
        Ok(entry) => (StatusCode::OK, axum::Json(entry)).into_response(),
        Err(err) => {
            let status = match &err {
                ObservationError::MissingFields(_) | ObservationError::InvalidDate(_) => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                ObservationError::UnknownEntry(_) => StatusCode::NOT_FOUND,
                ObservationError::AlreadyObserved(_) => StatusCode::CONFLICT,
            };
            let mut payload = json!({ "error": err.to_string() });
            if let ObservationError::MissingFields(fields) = &err {
                payload["fields"] = json!(fields);
            }
            (status, axum::Json(payload)).into_response()
        }
    }
}
