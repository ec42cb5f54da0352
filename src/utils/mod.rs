//! Small helpers shared across the crate.

pub mod date;
pub mod plural;
