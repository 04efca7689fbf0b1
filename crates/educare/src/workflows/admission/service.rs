use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{info, warn};

use super::contact::{ContactMessage, ContactValidationError};
use super::eligibility::{EligibilityAssessment, EligibilityEngine, EligibilityPolicy};
use super::enrollment::{
    EnrollmentForm, EnrollmentRequest, EnrollmentSubmission, EnrollmentValidationError,
};
use super::submission::{ContactGateway, EnrollmentGateway, SubmissionError};

/// Service composing the eligibility policy with the outbound intake gateways.
pub struct AdmissionService<G, C> {
    engine: EligibilityEngine,
    enrollments: Arc<G>,
    contacts: Arc<C>,
}

impl<G, C> AdmissionService<G, C>
where
    G: EnrollmentGateway + 'static,
    C: ContactGateway + 'static,
{
    pub fn new(policy: EligibilityPolicy, enrollments: Arc<G>, contacts: Arc<C>) -> Self {
        if !policy.matches_published_rule() {
            warn!(
                min_age = policy.min_age,
                max_age = policy.max_age,
                published_min = EligibilityPolicy::ENROLLMENT.min_age,
                published_max = EligibilityPolicy::ENROLLMENT.max_age,
                "eligibility window differs from the published 3-4 year rule; confirm with the program office"
            );
        }

        Self {
            engine: EligibilityEngine::new(policy),
            enrollments,
            contacts,
        }
    }

    pub fn policy(&self) -> &EligibilityPolicy {
        self.engine.policy()
    }

    pub fn assess(&self, date_of_birth: &str, today: NaiveDate) -> EligibilityAssessment {
        self.engine.assess(date_of_birth, today)
    }

    /// Validate the form against `today`, then hand it to the intake backend.
    pub async fn enroll(
        &self,
        request: EnrollmentRequest,
        today: NaiveDate,
        submitted_at: DateTime<Utc>,
    ) -> Result<EnrollmentSubmission, AdmissionServiceError> {
        let form = EnrollmentForm::from_request(request, *self.policy(), today);
        let submission = form.to_submission(submitted_at)?;

        self.enrollments.submit(&submission).await?;

        info!(
            age = submission.student.age,
            preferred_class = submission.enrollment.preferred_class.label(),
            "enrollment submitted"
        );
        Ok(submission)
    }

    pub async fn contact(
        &self,
        message: ContactMessage,
    ) -> Result<ContactMessage, AdmissionServiceError> {
        let message = message.sanitized()?;
        self.contacts.deliver(&message).await?;
        info!(subject = %message.subject, "contact message delivered");
        Ok(message)
    }
}

/// Error raised by the admission service.
#[derive(Debug, thiserror::Error)]
pub enum AdmissionServiceError {
    #[error(transparent)]
    Enrollment(#[from] EnrollmentValidationError),
    #[error(transparent)]
    Contact(#[from] ContactValidationError),
    #[error(transparent)]
    Submission(#[from] SubmissionError),
}
