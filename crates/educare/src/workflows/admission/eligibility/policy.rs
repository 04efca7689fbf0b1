use serde::{Deserialize, Serialize};

/// Inclusive age window, in whole civil years, a child must fall within to be admitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityPolicy {
    pub min_age: i32,
    pub max_age: i32,
}

impl EligibilityPolicy {
    /// Program rule published to parents: children aged 3-4 years old.
    pub const ENROLLMENT: Self = Self::new(3, 4);

    /// Window used by the pre-registration date picker. Disagrees with
    /// [`EligibilityPolicy::ENROLLMENT`] on five-year-olds and is pending product clarification.
    pub const PRE_REGISTRATION: Self = Self::new(3, 5);

    pub const fn new(min_age: i32, max_age: i32) -> Self {
        Self { min_age, max_age }
    }

    pub fn admits(&self, age: i32) -> bool {
        age >= self.min_age && age <= self.max_age
    }

    pub fn matches_published_rule(&self) -> bool {
        *self == Self::ENROLLMENT
    }

    pub fn requirement(&self) -> String {
        format!(
            "Child must be between {} and {} years old.",
            self.min_age, self.max_age
        )
    }
}

impl Default for EligibilityPolicy {
    fn default() -> Self {
        Self::ENROLLMENT
    }
}
