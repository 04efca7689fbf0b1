use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::eligibility::{compute_eligibility, EligibilityAssessment, EligibilityPolicy};

/// Session the child will attend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PreferredClass {
    #[serde(rename = "Morning Class")]
    Morning,
    #[serde(rename = "Afternoon Class")]
    Afternoon,
}

impl PreferredClass {
    pub const ALL: [PreferredClass; 2] = [PreferredClass::Morning, PreferredClass::Afternoon];

    pub const fn label(self) -> &'static str {
        match self {
            PreferredClass::Morning => "Morning Class",
            PreferredClass::Afternoon => "Afternoon Class",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|class| class.label().eq_ignore_ascii_case(label.trim()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrollmentStatus {
    Pending,
}

/// Document posted to the intake backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentSubmission {
    pub student: StudentDetails,
    pub parent: ParentDetails,
    pub enrollment: EnrollmentDetails,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentDetails {
    pub name: String,
    pub date_of_birth: String,
    pub age: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentDetails {
    pub name: String,
    pub contact_number: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentDetails {
    pub preferred_class: PreferredClass,
    pub submitted_at: DateTime<Utc>,
    pub status: EnrollmentStatus,
}

/// Required-field failures, reported one at a time in form order.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnrollmentValidationError {
    #[error("Please enter the child's date of birth (YYYY-MM-DD)")]
    MissingDateOfBirth,
    #[error("{0}")]
    NotEligible(String),
    #[error("Please enter the student name")]
    MissingStudentName,
    #[error("Please enter the parent/guardian name")]
    MissingParentName,
    #[error("Please enter a contact number")]
    MissingContactNumber,
    #[error("Please select a preferred class")]
    MissingPreferredClass,
}

impl EnrollmentValidationError {
    pub const fn field(&self) -> &'static str {
        match self {
            EnrollmentValidationError::MissingDateOfBirth
            | EnrollmentValidationError::NotEligible(_) => "date_of_birth",
            EnrollmentValidationError::MissingStudentName => "student_name",
            EnrollmentValidationError::MissingParentName => "parent_name",
            EnrollmentValidationError::MissingContactNumber => "parent_contact",
            EnrollmentValidationError::MissingPreferredClass => "preferred_class",
        }
    }
}

/// Flat form payload as entered by a parent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentRequest {
    #[serde(default)]
    pub date_of_birth: String,
    #[serde(default)]
    pub student_name: String,
    #[serde(default)]
    pub parent_name: String,
    #[serde(default)]
    pub parent_contact: String,
    #[serde(default)]
    pub parent_email: String,
    #[serde(default, deserialize_with = "preferred_class_from_label")]
    pub preferred_class: Option<PreferredClass>,
}

/// Either class label in any case. Anything else reads as no selection, so the form
/// reports it against the `preferred_class` field.
fn preferred_class_from_label<'de, D>(deserializer: D) -> Result<Option<PreferredClass>, D::Error>
where
    D: Deserializer<'de>,
{
    let label = Option::<String>::deserialize(deserializer)?;
    Ok(label.as_deref().and_then(PreferredClass::from_label))
}

/// Form-local enrollment state. The eligibility assessment is recomputed on every edit of
/// the date field and decides whether the student/parent section exists at all.
#[derive(Debug, Clone, Default)]
pub struct EnrollmentForm {
    policy: EligibilityPolicy,
    date_of_birth: String,
    assessment: EligibilityAssessment,
    pub student_name: String,
    pub parent_name: String,
    pub parent_contact: String,
    pub parent_email: String,
    pub preferred_class: Option<PreferredClass>,
}

impl EnrollmentForm {
    pub fn new(policy: EligibilityPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn from_request(
        request: EnrollmentRequest,
        policy: EligibilityPolicy,
        today: NaiveDate,
    ) -> Self {
        let mut form = Self::new(policy);
        form.set_date_of_birth(request.date_of_birth, today);
        form.student_name = request.student_name;
        form.parent_name = request.parent_name;
        form.parent_contact = request.parent_contact;
        form.parent_email = request.parent_email;
        form.preferred_class = request.preferred_class;
        form
    }

    pub fn policy(&self) -> &EligibilityPolicy {
        &self.policy
    }

    pub fn date_of_birth(&self) -> &str {
        &self.date_of_birth
    }

    pub fn assessment(&self) -> &EligibilityAssessment {
        &self.assessment
    }

    pub fn set_date_of_birth(
        &mut self,
        date_of_birth: impl Into<String>,
        today: NaiveDate,
    ) -> &EligibilityAssessment {
        self.date_of_birth = date_of_birth.into();
        self.assessment = compute_eligibility(&self.date_of_birth, today, &self.policy);
        &self.assessment
    }

    pub fn identity_section_visible(&self) -> bool {
        self.assessment.is_eligible()
    }

    pub fn validate(&self) -> Result<PreferredClass, EnrollmentValidationError> {
        match self.assessment.eligible {
            None => return Err(EnrollmentValidationError::MissingDateOfBirth),
            Some(false) => {
                let reason = self
                    .assessment
                    .error
                    .clone()
                    .unwrap_or_else(|| self.policy.requirement());
                return Err(EnrollmentValidationError::NotEligible(reason));
            }
            Some(true) => {}
        }

        if self.student_name.trim().is_empty() {
            return Err(EnrollmentValidationError::MissingStudentName);
        }
        if self.parent_name.trim().is_empty() {
            return Err(EnrollmentValidationError::MissingParentName);
        }
        if self.parent_contact.trim().is_empty() {
            return Err(EnrollmentValidationError::MissingContactNumber);
        }
        self.preferred_class
            .ok_or(EnrollmentValidationError::MissingPreferredClass)
    }

    pub fn to_submission(
        &self,
        submitted_at: DateTime<Utc>,
    ) -> Result<EnrollmentSubmission, EnrollmentValidationError> {
        let preferred_class = self.validate()?;
        let age = self
            .assessment
            .age
            .ok_or(EnrollmentValidationError::MissingDateOfBirth)?;

        Ok(EnrollmentSubmission {
            student: StudentDetails {
                name: self.student_name.trim().to_string(),
                date_of_birth: self.date_of_birth.clone(),
                age,
            },
            parent: ParentDetails {
                name: self.parent_name.trim().to_string(),
                contact_number: self.parent_contact.trim().to_string(),
                email: self.parent_email.trim().to_string(),
            },
            enrollment: EnrollmentDetails {
                preferred_class,
                submitted_at,
                status: EnrollmentStatus::Pending,
            },
        })
    }

    /// Back to a blank form under the same policy.
    pub fn reset(&mut self) {
        *self = Self::new(self.policy);
    }
}
