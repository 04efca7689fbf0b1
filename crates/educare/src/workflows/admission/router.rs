use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use chrono::{Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::contact::ContactMessage;
use super::eligibility::{EligibilityPolicy, EligibilityStatus};
use super::enrollment::EnrollmentRequest;
use super::service::{AdmissionService, AdmissionServiceError};
use super::submission::{ContactGateway, EnrollmentGateway};
use crate::error::AppError;

/// Router builder exposing the public admission and contact endpoints.
pub fn admission_router<G, C>(service: Arc<AdmissionService<G, C>>) -> Router
where
    G: EnrollmentGateway + 'static,
    C: ContactGateway + 'static,
{
    Router::new()
        .route(
            "/api/v1/admission/eligibility",
            post(eligibility_handler::<G, C>),
        )
        .route(
            "/api/v1/admission/enrollments",
            post(enrollment_handler::<G, C>),
        )
        .route("/api/v1/contact", post(contact_handler::<G, C>))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct EligibilityQuery {
    #[serde(default)]
    pub(crate) date_of_birth: String,
    #[serde(default)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub(crate) struct EligibilityView {
    pub(crate) date_of_birth: String,
    pub(crate) today: NaiveDate,
    pub(crate) age: Option<i32>,
    pub(crate) eligible: Option<bool>,
    pub(crate) error: Option<String>,
    pub(crate) status: EligibilityStatus,
    pub(crate) guidance: Option<String>,
    pub(crate) identity_section_visible: bool,
    pub(crate) policy: EligibilityPolicy,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EnrollmentPayload {
    #[serde(flatten)]
    pub(crate) request: EnrollmentRequest,
    #[serde(default)]
    pub(crate) today: Option<NaiveDate>,
}

fn today_or_local(today: Option<NaiveDate>) -> NaiveDate {
    today.unwrap_or_else(|| Local::now().date_naive())
}

pub(crate) async fn eligibility_handler<G, C>(
    State(service): State<Arc<AdmissionService<G, C>>>,
    axum::Json(query): axum::Json<EligibilityQuery>,
) -> Response
where
    G: EnrollmentGateway + 'static,
    C: ContactGateway + 'static,
{
    let today = today_or_local(query.today);
    let assessment = service.assess(&query.date_of_birth, today);
    let policy = *service.policy();

    let view = EligibilityView {
        status: assessment.status(&policy),
        guidance: assessment.guidance(&policy),
        identity_section_visible: assessment.is_eligible(),
        date_of_birth: query.date_of_birth,
        today,
        age: assessment.age,
        eligible: assessment.eligible,
        error: assessment.error,
        policy,
    };

    (StatusCode::OK, axum::Json(view)).into_response()
}

pub(crate) async fn enrollment_handler<G, C>(
    State(service): State<Arc<AdmissionService<G, C>>>,
    axum::Json(payload): axum::Json<EnrollmentPayload>,
) -> Response
where
    G: EnrollmentGateway + 'static,
    C: ContactGateway + 'static,
{
    let today = today_or_local(payload.today);
    match service.enroll(payload.request, today, Utc::now()).await {
        Ok(submission) => (StatusCode::ACCEPTED, axum::Json(submission)).into_response(),
        Err(err) => admission_error_response(err),
    }
}

pub(crate) async fn contact_handler<G, C>(
    State(service): State<Arc<AdmissionService<G, C>>>,
    axum::Json(message): axum::Json<ContactMessage>,
) -> Response
where
    G: EnrollmentGateway + 'static,
    C: ContactGateway + 'static,
{
    match service.contact(message).await {
        Ok(_) => (
            StatusCode::ACCEPTED,
            axum::Json(json!({
                "status": "sent",
                "message": "Thank you for contacting us. We will get back to you soon.",
            })),
        )
            .into_response(),
        Err(err) => admission_error_response(err),
    }
}

fn admission_error_response(err: AdmissionServiceError) -> Response {
    match err {
        AdmissionServiceError::Enrollment(error) => {
            let payload = json!({
                "error": error.to_string(),
                "field": error.field(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        AdmissionServiceError::Contact(error) => {
            let payload = json!({
                "error": error.to_string(),
                "fields": error.missing,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        AdmissionServiceError::Submission(error) => AppError::from(error).into_response(),
    }
}
