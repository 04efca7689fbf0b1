//! Integration specifications for the public admission flow.
//!
//! Scenarios drive the eligibility engine, the enrollment form it gates, and the HTTP router
//! through the crate's public surface only.

mod common {
    use std::sync::{Arc, Mutex};

    use chrono::NaiveDate;

    use educare::workflows::admission::{
        AdmissionService, ContactGateway, ContactMessage, EligibilityPolicy, EnrollmentGateway,
        EnrollmentSubmission, SubmissionError,
    };

    pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    /// Backend double that either records submissions or fails every call.
    #[derive(Default)]
    pub(super) struct IntakeBackend {
        pub(super) received: Mutex<Vec<EnrollmentSubmission>>,
        pub(super) offline: bool,
    }

    impl EnrollmentGateway for IntakeBackend {
        async fn submit(&self, submission: &EnrollmentSubmission) -> Result<(), SubmissionError> {
            if self.offline {
                return Err(SubmissionError::Transport("network unreachable".to_string()));
            }
            self.received
                .lock()
                .expect("backend mutex poisoned")
                .push(submission.clone());
            Ok(())
        }
    }

    impl ContactGateway for IntakeBackend {
        async fn deliver(&self, _message: &ContactMessage) -> Result<(), SubmissionError> {
            if self.offline {
                return Err(SubmissionError::Transport("network unreachable".to_string()));
            }
            Ok(())
        }
    }

    pub(super) fn service(
        policy: EligibilityPolicy,
        offline: bool,
    ) -> (
        Arc<AdmissionService<IntakeBackend, IntakeBackend>>,
        Arc<IntakeBackend>,
    ) {
        let backend = Arc::new(IntakeBackend {
            offline,
            ..IntakeBackend::default()
        });
        let service = Arc::new(AdmissionService::new(
            policy,
            backend.clone(),
            backend.clone(),
        ));
        (service, backend)
    }
}

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use chrono::{TimeZone, Utc};
use educare::workflows::admission::eligibility::civil_age;
use educare::workflows::admission::{
    admission_router, compute_eligibility, AdmissionServiceError, EligibilityPolicy,
    EnrollmentForm, EnrollmentRequest, EnrollmentValidationError, PreferredClass,
    SubmissionError,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use common::{date, service};

#[test]
fn age_matches_whole_years_around_each_anniversary() {
    let today = date(2025, 6, 15);
    for years in 0..8 {
        let birth = date(2025 - years, 6, 15);
        assert_eq!(civil_age(birth, today), years);

        let day_after = date(2025 - years, 6, 16);
        assert_eq!(civil_age(day_after, today), years - 1);
    }
}

#[test]
fn eligibility_is_inclusive_at_both_bounds() {
    let today = date(2025, 6, 15);
    let policy = EligibilityPolicy::ENROLLMENT;
    let verdict = |years: i32| {
        compute_eligibility(&format!("{}-06-15", 2025 - years), today, &policy).eligible
    };

    assert_eq!(verdict(2), Some(false));
    assert_eq!(verdict(3), Some(true));
    assert_eq!(verdict(4), Some(true));
    assert_eq!(verdict(5), Some(false));
}

#[test]
fn five_year_olds_depend_on_the_configured_window() {
    let today = date(2026, 6, 15);

    let enrollment = compute_eligibility("2021-06-15", today, &EligibilityPolicy::ENROLLMENT);
    assert_eq!((enrollment.age, enrollment.eligible), (Some(5), Some(false)));

    let pre_registration =
        compute_eligibility("2021-06-15", today, &EligibilityPolicy::PRE_REGISTRATION);
    assert_eq!(
        (pre_registration.age, pre_registration.eligible),
        (Some(5), Some(true))
    );
}

#[test]
fn malformed_dates_never_produce_a_verdict() {
    for text in ["2022/06/15", "", "abc", "2022-6-15", " 2022-06-15"] {
        let assessment = compute_eligibility(text, date(2025, 6, 15), &EligibilityPolicy::ENROLLMENT);
        assert_eq!(assessment.age, None, "{text:?}");
        assert_eq!(assessment.eligible, None, "{text:?}");
    }
}

#[test]
fn identity_section_follows_each_date_edit() {
    let today = date(2025, 6, 15);
    let mut form = EnrollmentForm::new(EligibilityPolicy::ENROLLMENT);
    assert!(!form.identity_section_visible());

    for (text, visible) in [
        ("2", false),
        ("2021-", false),
        ("2021-06-15", true),
        ("2019-06-15", false),
        ("2022-01-10", true),
        ("", false),
    ] {
        form.set_date_of_birth(text, today);
        assert_eq!(form.identity_section_visible(), visible, "{text:?}");
    }
}

fn complete_request() -> EnrollmentRequest {
    EnrollmentRequest {
        date_of_birth: "2021-09-30".to_string(),
        student_name: "Paolo Cruz".to_string(),
        parent_name: "Rina Cruz".to_string(),
        parent_contact: "0920 111 2233".to_string(),
        parent_email: String::new(),
        preferred_class: Some(PreferredClass::Afternoon),
    }
}

#[tokio::test]
async fn accepted_enrollment_reaches_the_backend() {
    let (service, backend) = service(EligibilityPolicy::ENROLLMENT, false);
    let submitted_at = Utc
        .with_ymd_and_hms(2025, 6, 15, 8, 0, 0)
        .single()
        .expect("valid timestamp");

    let submission = service
        .enroll(complete_request(), date(2025, 6, 15), submitted_at)
        .await
        .expect("enrollment accepted");

    assert_eq!(submission.student.age, 3);
    let received = backend.received.lock().expect("backend mutex poisoned");
    assert_eq!(received.as_slice(), &[submission]);
}

#[tokio::test]
async fn offline_backend_is_reported_as_a_failure() {
    let (service, _) = service(EligibilityPolicy::ENROLLMENT, true);

    let result = service
        .enroll(complete_request(), date(2025, 6, 15), Utc::now())
        .await;

    assert!(matches!(
        result,
        Err(AdmissionServiceError::Submission(SubmissionError::Transport(_)))
    ));
}

#[tokio::test]
async fn ineligible_children_cannot_be_enrolled() {
    let (service, backend) = service(EligibilityPolicy::ENROLLMENT, false);

    let result = service
        .enroll(complete_request(), date(2026, 10, 1), Utc::now())
        .await;

    assert!(matches!(
        result,
        Err(AdmissionServiceError::Enrollment(
            EnrollmentValidationError::NotEligible(_)
        ))
    ));
    assert!(backend
        .received
        .lock()
        .expect("backend mutex poisoned")
        .is_empty());
}

async fn post_json(router: axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .expect("request builds"),
        )
        .await
        .expect("route executes");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .expect("read body");
    (status, serde_json::from_slice(&bytes).expect("json body"))
}

#[tokio::test]
async fn router_reports_eligibility_and_guidance() {
    let (service, _) = service(EligibilityPolicy::PRE_REGISTRATION, false);

    let (status, payload) = post_json(
        admission_router(service),
        "/api/v1/admission/eligibility",
        json!({ "date_of_birth": "2023-01-01", "today": "2025-06-15" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(payload["age"], json!(2));
    assert_eq!(payload["status"], json!("too_young"));
    assert_eq!(
        payload["guidance"],
        json!("Sorry, your child is not eligible for our program. Our ECCD program is for children aged 3-5 years old. Your child is too young. Please apply when they turn 3.")
    );
}

#[tokio::test]
async fn router_rejects_incomplete_forms_with_the_field_name() {
    let (service, _) = service(EligibilityPolicy::ENROLLMENT, false);
    let mut request = serde_json::to_value(complete_request()).expect("serializes");
    request["parent_contact"] = json!("   ");
    request["today"] = json!("2025-06-15");

    let (status, payload) = post_json(
        admission_router(service),
        "/api/v1/admission/enrollments",
        request,
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(payload["field"], json!("parent_contact"));
}
