//! Child growth assessment against the WHO growth standards.
//!
//! - [`measurement`] -- measurement types and sex.
//! - [`standards`] -- reference entries, the in-memory table, bundled dataset.
//! - [`evaluator`] -- z-score band classification.
//! - [`age`] -- age-in-months derivation.
//! - [`chart`] -- chart points and reference curves.

pub mod age;
pub mod chart;
pub mod evaluator;
pub mod measurement;
pub mod standards;

pub use evaluator::{evaluate, evaluate_with_table, GrowthAssessment, GrowthStatus, MeasurementInput};
pub use measurement::{MeasurementType, Sex};
pub use standards::{AgePolicy, StandardEntry, StandardsTable};
