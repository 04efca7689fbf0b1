//! Admission eligibility, role-based access, and enrollment intake for the Educare+
//! early-childhood program.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
