mod age;
mod policy;

pub use age::civil_age;
pub use policy::EligibilityPolicy;

use age::{read_birth_date, BirthDateInput};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Result of evaluating a date-of-birth field. All three fields are `None` while the
/// field does not yet hold a `YYYY-MM-DD` value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityAssessment {
    pub age: Option<i32>,
    pub eligible: Option<bool>,
    pub error: Option<String>,
}

/// Coarse classification used to pick the guidance shown next to the date field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EligibilityStatus {
    Unknown,
    Eligible,
    TooYoung,
    TooOld,
}

impl EligibilityAssessment {
    pub fn is_eligible(&self) -> bool {
        self.eligible == Some(true)
    }

    pub fn status(&self, policy: &EligibilityPolicy) -> EligibilityStatus {
        match (self.age, self.eligible) {
            (Some(_), Some(true)) => EligibilityStatus::Eligible,
            (Some(age), Some(false)) if age < policy.min_age => EligibilityStatus::TooYoung,
            (Some(_), Some(false)) => EligibilityStatus::TooOld,
            _ => EligibilityStatus::Unknown,
        }
    }

    pub fn guidance(&self, policy: &EligibilityPolicy) -> Option<String> {
        let program = format!(
            "Our ECCD program is for children aged {}-{} years old.",
            policy.min_age, policy.max_age
        );
        match self.status(policy) {
            EligibilityStatus::Unknown => None,
            EligibilityStatus::Eligible => {
                Some("Great! Your child is eligible for enrollment.".to_string())
            }
            EligibilityStatus::TooYoung => Some(format!(
                "Sorry, your child is not eligible for our program. {program} Your child is too young. Please apply when they turn {}.",
                policy.min_age
            )),
            EligibilityStatus::TooOld => Some(format!(
                "Sorry, your child is not eligible for our program. {program} Your child may be eligible for other programs."
            )),
        }
    }
}

/// Evaluate a raw date-of-birth field against `today`. Never fails: malformed input is
/// reported as "not yet entered" and impossible dates through `error`.
pub fn compute_eligibility(
    date_of_birth: &str,
    today: NaiveDate,
    policy: &EligibilityPolicy,
) -> EligibilityAssessment {
    match read_birth_date(date_of_birth) {
        BirthDateInput::NotEntered => EligibilityAssessment::default(),
        BirthDateInput::Invalid => EligibilityAssessment {
            age: None,
            eligible: None,
            error: Some(format!("{date_of_birth} is not a valid calendar date")),
        },
        BirthDateInput::Date(birth) => {
            let age = civil_age(birth, today);
            let eligible = policy.admits(age);
            EligibilityAssessment {
                age: Some(age),
                eligible: Some(eligible),
                error: (!eligible).then(|| policy.requirement()),
            }
        }
    }
}

/// Stateless evaluator bound to one policy so call sites cannot mix age windows.
#[derive(Debug, Clone, Copy, Default)]
pub struct EligibilityEngine {
    policy: EligibilityPolicy,
}

impl EligibilityEngine {
    pub fn new(policy: EligibilityPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &EligibilityPolicy {
        &self.policy
    }

    pub fn assess(&self, date_of_birth: &str, today: NaiveDate) -> EligibilityAssessment {
        compute_eligibility(date_of_birth, today, &self.policy)
    }
}
