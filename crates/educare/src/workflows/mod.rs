pub mod access;
pub mod admission;
pub mod observation;
