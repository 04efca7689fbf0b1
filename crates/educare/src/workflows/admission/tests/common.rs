use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::workflows::admission::contact::ContactMessage;
use crate::workflows::admission::enrollment::{EnrollmentRequest, EnrollmentSubmission};
use crate::workflows::admission::submission::{
    ContactGateway, EnrollmentGateway, SubmissionError,
};
use crate::workflows::admission::{AdmissionService, EligibilityPolicy, PreferredClass};

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

/// Evaluation day used across scenarios: the candidate's fourth birthday.
pub(super) fn today() -> NaiveDate {
    date(2025, 6, 15)
}

pub(super) fn eligible_request() -> EnrollmentRequest {
    EnrollmentRequest {
        date_of_birth: "2021-06-15".to_string(),
        student_name: "  Lia Santos ".to_string(),
        parent_name: "Ana Santos".to_string(),
        parent_contact: " 0917 555 0101 ".to_string(),
        parent_email: "ana.santos@example.com".to_string(),
        preferred_class: Some(PreferredClass::Morning),
    }
}

pub(super) fn contact_message() -> ContactMessage {
    ContactMessage {
        name: "Ana Santos".to_string(),
        email: "ana.santos@example.com".to_string(),
        subject: "Enrollment".to_string(),
        message: "Is the afternoon class still open?".to_string(),
    }
}

#[derive(Debug, Clone)]
pub(super) enum Failure {
    NotConfigured,
    Rejected(u16, &'static str),
    Transport,
}

impl Failure {
    fn to_error(&self) -> SubmissionError {
        match self {
            Failure::NotConfigured => SubmissionError::NotConfigured,
            Failure::Rejected(status, message) => SubmissionError::Rejected {
                status: *status,
                message: message.to_string(),
            },
            Failure::Transport => SubmissionError::Transport("connection reset".to_string()),
        }
    }
}

#[derive(Default)]
pub(super) struct RecordingGateway {
    enrollments: Mutex<Vec<EnrollmentSubmission>>,
    contacts: Mutex<Vec<ContactMessage>>,
    failure: Option<Failure>,
}

impl RecordingGateway {
    pub(super) fn failing(failure: Failure) -> Self {
        Self {
            failure: Some(failure),
            ..Self::default()
        }
    }

    pub(super) fn enrollments(&self) -> Vec<EnrollmentSubmission> {
        self.enrollments
            .lock()
            .expect("gateway mutex poisoned")
            .clone()
    }

    pub(super) fn contacts(&self) -> Vec<ContactMessage> {
        self.contacts.lock().expect("gateway mutex poisoned").clone()
    }
}

impl EnrollmentGateway for RecordingGateway {
    async fn submit(&self, submission: &EnrollmentSubmission) -> Result<(), SubmissionError> {
        if let Some(failure) = &self.failure {
            return Err(failure.to_error());
        }
        self.enrollments
            .lock()
            .expect("gateway mutex poisoned")
            .push(submission.clone());
        Ok(())
    }
}

impl ContactGateway for RecordingGateway {
    async fn deliver(&self, message: &ContactMessage) -> Result<(), SubmissionError> {
        if let Some(failure) = &self.failure {
            return Err(failure.to_error());
        }
        self.contacts
            .lock()
            .expect("gateway mutex poisoned")
            .push(message.clone());
        Ok(())
    }
}

pub(super) type TestService = AdmissionService<RecordingGateway, RecordingGateway>;

pub(super) fn build_service(
    policy: EligibilityPolicy,
    gateway: RecordingGateway,
) -> (Arc<TestService>, Arc<RecordingGateway>) {
    let gateway = Arc::new(gateway);
    let service = Arc::new(AdmissionService::new(
        policy,
        gateway.clone(),
        gateway.clone(),
    ));
    (service, gateway)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 4096)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
