use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverallRating {
    Excellent,
    Good,
    Satisfactory,
    #[serde(rename = "Needs Improvement")]
    NeedsImprovement,
}

impl OverallRating {
    pub const ALL: [OverallRating; 4] = [
        OverallRating::Excellent,
        OverallRating::Good,
        OverallRating::Satisfactory,
        OverallRating::NeedsImprovement,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            OverallRating::Excellent => "Excellent",
            OverallRating::Good => "Good",
            OverallRating::Satisfactory => "Satisfactory",
            OverallRating::NeedsImprovement => "Needs Improvement",
        }
    }
}

/// Classroom observation as typed by the ECCD office.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ObservationForm {
    #[serde(default)]
    pub observation_date: String,
    #[serde(default)]
    pub teaching_performance: String,
    #[serde(default)]
    pub classroom_management: String,
    #[serde(default)]
    pub student_engagement: String,
    #[serde(default)]
    pub additional_notes: String,
    #[serde(default)]
    pub overall_rating: Option<OverallRating>,
}

/// Validated observation kept against a center entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObservationReport {
    pub entry_id: u32,
    pub observation_date: NaiveDate,
    pub teaching_performance: String,
    pub classroom_management: String,
    pub student_engagement: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_notes: Option<String>,
    pub overall_rating: OverallRating,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ObservationError {
    #[error("missing required observation fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    #[error("observation date `{0}` must be a calendar date (YYYY-MM-DD)")]
    InvalidDate(String),
    #[error("no center entry with id {0}")]
    UnknownEntry(u32),
    #[error("center entry {0} has already been observed")]
    AlreadyObserved(u32),
}

impl ObservationForm {
    pub fn validate(&self, entry_id: u32) -> Result<ObservationReport, ObservationError> {
        let text_fields = [
            ("observation_date", &self.observation_date),
            ("teaching_performance", &self.teaching_performance),
            ("classroom_management", &self.classroom_management),
            ("student_engagement", &self.student_engagement),
        ];
        let mut missing: Vec<&'static str> = text_fields
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(field, _)| field)
            .collect();
        if self.overall_rating.is_none() {
            missing.push("overall_rating");
        }

        let overall_rating = match self.overall_rating {
            Some(rating) if missing.is_empty() => rating,
            _ => return Err(ObservationError::MissingFields(missing)),
        };

        let date_text = self.observation_date.trim();
        let observation_date = NaiveDate::parse_from_str(date_text, "%Y-%m-%d")
            .map_err(|_| ObservationError::InvalidDate(date_text.to_string()))?;

        let notes = self.additional_notes.trim();
        Ok(ObservationReport {
            entry_id,
            observation_date,
            teaching_performance: self.teaching_performance.trim().to_string(),
            classroom_management: self.classroom_management.trim().to_string(),
            student_engagement: self.student_engagement.trim().to_string(),
            additional_notes: (!notes.is_empty()).then(|| notes.to_string()),
            overall_rating,
        })
    }
}
