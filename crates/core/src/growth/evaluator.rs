//! Growth status evaluation against z-score reference values.
//!
//! Pure logic: the caller supplies the reference entries (from the database
//! or a [`StandardsTable`]) and gets back a categorical status.
//!
//! Band edges use the -3, -2, +2 and +3 reference values. A value equal to an
//! edge belongs to the band that edge opens:
//!
//! ```text
//!   value <  r(-3)           SeverelyBelow
//!   r(-3) <= value < r(-2)   Below
//!   r(-2) <= value < r(+2)   Normal
//!   r(+2) <= value < r(+3)   Above
//!   r(+3) <= value           SeverelyAbove
//! ```

use serde::{Deserialize, Serialize};

use super::measurement::{MeasurementType, Sex};
use super::standards::{AgePolicy, StandardEntry, StandardsTable};
use crate::error::CoreError;

/// Z-scores whose reference values delimit the status bands.
pub const BAND_EDGE_Z_SCORES: [i16; 4] = [-3, -2, 2, 3];

/// Categorical growth status derived from the z-score band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthStatus {
    SeverelyBelow,
    Below,
    Normal,
    Above,
    SeverelyAbove,
}

impl GrowthStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SeverelyBelow => "severely_below",
            Self::Below => "below",
            Self::Normal => "normal",
            Self::Above => "above",
            Self::SeverelyAbove => "severely_above",
        }
    }

    /// Display label in the height-for-age wording.
    pub fn label(&self) -> &'static str {
        self.label_for(MeasurementType::HeightForAge)
    }

    /// Display label worded for the measurement type. Weight and head
    /// circumference are "low" rather than "short".
    pub fn label_for(&self, measurement_type: MeasurementType) -> &'static str {
        let low = measurement_type != MeasurementType::HeightForAge;
        match self {
            Self::SeverelyBelow if low => "Sangat Rendah",
            Self::SeverelyBelow => "Sangat Pendek",
            Self::Below if low => "Rendah",
            Self::Below => "Pendek",
            Self::Normal => "Normal",
            Self::Above => "Tinggi",
            Self::SeverelyAbove => "Sangat Tinggi",
        }
    }

    /// Whether the status warrants follow-up (anything outside Normal).
    pub fn needs_attention(&self) -> bool {
        *self != Self::Normal
    }
}

/// A single measurement to classify.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeasurementInput {
    pub measurement_type: MeasurementType,
    pub age_months: i32,
    pub sex: Sex,
    pub value: f64,
}

/// Result of a successful evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrowthAssessment {
    pub measurement_type: MeasurementType,
    pub age_months: i32,
    pub sex: Sex,
    pub value: f64,
    pub status: GrowthStatus,
    pub label: &'static str,
    /// Matched reference entries ordered by z-score ascending.
    pub references: Vec<StandardEntry>,
}

/// Classify a value against band edges `[r(-3), r(-2), r(+2), r(+3)]`.
pub fn classify(value: f64, edges: [f64; 4]) -> GrowthStatus {
    let [severe_low, low, high, severe_high] = edges;
    if value < severe_low {
        GrowthStatus::SeverelyBelow
    } else if value < low {
        GrowthStatus::Below
    } else if value < high {
        GrowthStatus::Normal
    } else if value < severe_high {
        GrowthStatus::Above
    } else {
        GrowthStatus::SeverelyAbove
    }
}

/// Evaluate a measurement against candidate reference entries.
///
/// `entries` may contain rows for other keys; only those matching the
/// input's measurement type, sex and age are used. Returns
/// [`CoreError::NoStandardData`] when no rows match or a band edge is missing.
pub fn evaluate(
    input: &MeasurementInput,
    entries: &[StandardEntry],
) -> Result<GrowthAssessment, CoreError> {
    if !input.value.is_finite() {
        return Err(CoreError::Validation(
            "measurement value must be a finite number".to_string(),
        ));
    }

    let mut references: Vec<StandardEntry> = entries
        .iter()
        .filter(|e| {
            e.measurement_type == input.measurement_type
                && e.sex == input.sex
                && e.age_months == input.age_months
        })
        .copied()
        .collect();
    references.sort_by_key(|e| e.z_score);

    let edges = band_edges(&references).ok_or(CoreError::NoStandardData {
        measurement_type: input.measurement_type,
        sex: input.sex,
        age_months: input.age_months,
    })?;

    let status = classify(input.value, edges);
    Ok(GrowthAssessment {
        measurement_type: input.measurement_type,
        age_months: input.age_months,
        sex: input.sex,
        value: input.value,
        status,
        label: status.label_for(input.measurement_type),
        references,
    })
}

/// Evaluate a measurement using an in-memory standards table.
pub fn evaluate_with_table(
    input: &MeasurementInput,
    table: &StandardsTable,
    policy: AgePolicy,
) -> Result<GrowthAssessment, CoreError> {
    let references = table.lookup(input.measurement_type, input.sex, input.age_months, policy);
    evaluate(input, &references)
}

/// Pick the four band-edge reference values, if all are present.
fn band_edges(references: &[StandardEntry]) -> Option<[f64; 4]> {
    let value_at = |z: i16| {
        references
            .iter()
            .find(|e| e.z_score == z)
            .map(|e| e.reference_value)
    };
    Some([
        value_at(BAND_EDGE_Z_SCORES[0])?,
        value_at(BAND_EDGE_Z_SCORES[1])?,
        value_at(BAND_EDGE_Z_SCORES[2])?,
        value_at(BAND_EDGE_Z_SCORES[3])?,
    ])
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
