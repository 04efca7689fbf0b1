use super::common::*;
use chrono::{TimeZone, Utc};
use serde_json::json;

use crate::workflows::admission::{
    AdmissionServiceError, EligibilityPolicy, EnrollmentForm, EnrollmentValidationError,
    PreferredClass, SubmissionError,
};

#[test]
fn identity_section_follows_every_date_edit() {
    let mut form = EnrollmentForm::new(EligibilityPolicy::ENROLLMENT);
    assert!(!form.identity_section_visible());

    for (typed, visible) in [
        ("2", false),
        ("2021-06", false),
        ("2021-06-15", true),
        ("2021-06-1", false),
        ("2019-06-15", false),
        ("2022-01-01", true),
    ] {
        form.set_date_of_birth(typed, today());
        assert_eq!(form.identity_section_visible(), visible, "after typing {typed}");
    }
}

#[test]
fn ineligible_forms_cannot_be_submitted_even_when_complete() {
    let mut request = eligible_request();
    request.date_of_birth = "2019-06-15".to_string();
    let form = EnrollmentForm::from_request(request, EligibilityPolicy::ENROLLMENT, today());

    match form.validate() {
        Err(EnrollmentValidationError::NotEligible(reason)) => {
            assert_eq!(reason, "Child must be between 3 and 4 years old.");
        }
        other => panic!("expected eligibility rejection, got {other:?}"),
    }
}

#[test]
fn required_fields_are_checked_in_form_order() {
    let mut form =
        EnrollmentForm::from_request(eligible_request(), EligibilityPolicy::ENROLLMENT, today());
    form.student_name = " ".to_string();
    form.parent_name.clear();
    form.preferred_class = None;

    assert_eq!(
        form.validate(),
        Err(EnrollmentValidationError::MissingStudentName)
    );

    form.student_name = "Lia".to_string();
    assert_eq!(
        form.validate(),
        Err(EnrollmentValidationError::MissingParentName)
    );
    assert_eq!(
        EnrollmentValidationError::MissingParentName.field(),
        "parent_name"
    );

    form.parent_name = "Ana".to_string();
    assert_eq!(
        form.validate(),
        Err(EnrollmentValidationError::MissingPreferredClass)
    );

    form.parent_contact = "\t".to_string();
    assert_eq!(
        form.validate(),
        Err(EnrollmentValidationError::MissingContactNumber)
    );
}

#[test]
fn blank_date_is_reported_before_other_fields() {
    let form = EnrollmentForm::new(EligibilityPolicy::ENROLLMENT);
    assert_eq!(
        form.validate(),
        Err(EnrollmentValidationError::MissingDateOfBirth)
    );
}

#[test]
fn submission_document_matches_intake_contract() {
    let form =
        EnrollmentForm::from_request(eligible_request(), EligibilityPolicy::ENROLLMENT, today());
    let submitted_at = Utc
        .with_ymd_and_hms(2025, 6, 15, 1, 30, 0)
        .single()
        .expect("valid timestamp");

    let submission = form.to_submission(submitted_at).expect("form is complete");
    let document = serde_json::to_value(&submission).expect("serializes");

    assert_eq!(
        document,
        json!({
            "student": {
                "name": "Lia Santos",
                "dateOfBirth": "2021-06-15",
                "age": 4,
            },
            "parent": {
                "name": "Ana Santos",
                "contactNumber": "0917 555 0101",
                "email": "ana.santos@example.com",
            },
            "enrollment": {
                "preferredClass": "Morning Class",
                "submittedAt": "2025-06-15T01:30:00Z",
                "status": "pending",
            },
        })
    );
}

#[test]
fn reset_returns_to_unknown_state_under_same_policy() {
    let mut form = EnrollmentForm::from_request(
        eligible_request(),
        EligibilityPolicy::PRE_REGISTRATION,
        today(),
    );
    form.reset();

    assert_eq!(form.date_of_birth(), "");
    assert_eq!(form.assessment().eligible, None);
    assert!(form.student_name.is_empty());
    assert!(form.preferred_class.is_none());
    assert_eq!(*form.policy(), EligibilityPolicy::PRE_REGISTRATION);
}

#[test]
fn preferred_class_labels_round_trip() {
    assert_eq!(
        PreferredClass::from_label("afternoon class"),
        Some(PreferredClass::Afternoon)
    );
    assert_eq!(PreferredClass::from_label("Evening Class"), None);
}

#[tokio::test]
async fn enroll_hands_valid_forms_to_the_gateway() {
    let (service, gateway) = build_service(EligibilityPolicy::ENROLLMENT, RecordingGateway::default());

    let submission = service
        .enroll(eligible_request(), today(), Utc::now())
        .await
        .expect("enrollment accepted");

    assert_eq!(submission.student.age, 4);
    assert_eq!(gateway.enrollments(), vec![submission]);
}

#[tokio::test]
async fn enroll_does_not_call_gateway_for_invalid_forms() {
    let (service, gateway) = build_service(EligibilityPolicy::ENROLLMENT, RecordingGateway::default());
    let mut request = eligible_request();
    request.parent_contact.clear();

    match service.enroll(request, today(), Utc::now()).await {
        Err(AdmissionServiceError::Enrollment(EnrollmentValidationError::MissingContactNumber)) => {}
        other => panic!("expected missing contact, got {other:?}"),
    }
    assert!(gateway.enrollments().is_empty());
}

#[tokio::test]
async fn transport_failures_are_never_reported_as_success() {
    let (service, _) = build_service(
        EligibilityPolicy::ENROLLMENT,
        RecordingGateway::failing(Failure::Transport),
    );

    match service.enroll(eligible_request(), today(), Utc::now()).await {
        Err(AdmissionServiceError::Submission(SubmissionError::Transport(_))) => {}
        other => panic!("expected transport failure, got {other:?}"),
    }
}

#[tokio::test]
async fn contact_messages_are_sanitized_before_delivery() {
    let (service, gateway) = build_service(EligibilityPolicy::ENROLLMENT, RecordingGateway::default());
    let mut message = contact_message();
    message.name = "  Ana Santos  ".to_string();

    service.contact(message).await.expect("delivered");

    let delivered = gateway.contacts();
    assert_eq!(delivered.len(), 1);
    assert_eq!(delivered[0].name, "Ana Santos");
}

#[tokio::test]
async fn contact_requires_name_email_and_message() {
    let (service, gateway) = build_service(EligibilityPolicy::ENROLLMENT, RecordingGateway::default());
    let mut message = contact_message();
    message.email.clear();

    match service.contact(message).await {
        Err(AdmissionServiceError::Contact(err)) => assert_eq!(err.missing, vec!["email"]),
        other => panic!("expected contact validation error, got {other:?}"),
    }
    assert!(gateway.contacts().is_empty());
}
