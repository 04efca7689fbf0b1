//! ECCD office classroom observation: the center roster, its filters, and recording a
//! completed observation against a pending entry.

pub mod board;
pub mod form;
pub mod roster;
pub mod router;


pub use board::ObservationBoard;
pub use form::{ObservationError, ObservationForm, ObservationReport, OverallRating};
pub use roster::{
    seed_roster, CenterEntry, ObservationFilter, ObservationStatus, BARANGAYS, CENTERS,
    SCHOOL_YEARS,
};
pub use router::{observation_router, CLASSROOM_SCREEN};
