use std::sync::{Mutex, PoisonError};

use tracing::info;

use super::form::{ObservationError, ObservationForm, ObservationReport};
use super::roster::{seed_roster, CenterEntry, ObservationFilter, ObservationStatus};

/// In-memory observation roster for the current school year.
#[derive(Debug)]
pub struct ObservationBoard {
    entries: Mutex<Vec<CenterEntry>>,
    reports: Mutex<Vec<ObservationReport>>,
}

impl ObservationBoard {
    pub fn new(entries: Vec<CenterEntry>) -> Self {
        Self {
            entries: Mutex::new(entries),
            reports: Mutex::new(Vec::new()),
        }
    }

    pub fn seeded() -> Self {
        Self::new(seed_roster())
    }

    pub fn list(&self, filter: &ObservationFilter) -> Vec<CenterEntry> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|entry| filter.matches(entry))
            .cloned()
            .collect()
    }

    pub fn reports(&self) -> Vec<ObservationReport> {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Marks a pending entry as observed once the form validates.
    pub fn record_observation(
        &self,
        id: u32,
        form: &ObservationForm,
    ) -> Result<CenterEntry, ObservationError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let entry = entries
            .iter_mut()
            .find(|entry| entry.id == id)
            .ok_or(ObservationError::UnknownEntry(id))?;
        if entry.status == ObservationStatus::Observed {
            return Err(ObservationError::AlreadyObserved(id));
        }

        let report = form.validate(id)?;
        entry.status = ObservationStatus::Observed;
        info!(
            entry_id = id,
            teacher = %entry.teacher,
            rating = report.overall_rating.label(),
            "classroom observation recorded"
        );

        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(report);
        Ok(entry.clone())
    }
}

impl Default for ObservationBoard {
    fn default() -> Self {
        Self::seeded()
    }
}
