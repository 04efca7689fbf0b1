//! Public admission flow: age eligibility, the enrollment form it gates, and delivery of
//! enrollment and contact submissions to the external intake backend.

pub mod contact;
pub mod eligibility;
pub mod enrollment;
pub mod router;
pub mod service;
pub mod submission;

#[cfg(test)]
mod tests;

pub use contact::{ContactMessage, ContactValidationError};
pub use eligibility::{
    compute_eligibility, EligibilityAssessment, EligibilityEngine, EligibilityPolicy,
    EligibilityStatus,
};
pub use enrollment::{
    EnrollmentForm, EnrollmentRequest, EnrollmentStatus, EnrollmentSubmission,
    EnrollmentValidationError, PreferredClass,
};
pub use router::admission_router;
pub use service::{AdmissionService, AdmissionServiceError};
pub use submission::{ContactGateway, EnrollmentGateway, HttpSubmissionGateway, SubmissionError};
