//! Growth standard reference row.

use serde::Serialize;
use sqlx::FromRow;
use tumbuh_core::error::CoreError;
use tumbuh_core::growth::StandardEntry;
use tumbuh_core::types::{DbId, Timestamp};

/// A row from the `growth_standards` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StandardReference {
    pub id: DbId,
    pub measurement_type: String,
    pub age_months: i32,
    pub sex: String,
    pub z_score: i16,
    pub reference_value: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl StandardReference {
    /// Convert to the domain entry used by the evaluator.
    pub fn to_entry(&self) -> Result<StandardEntry, CoreError> {
        Ok(StandardEntry {
            measurement_type: self.measurement_type.parse()?,
            age_months: self.age_months,
            sex: self.sex.parse()?,
            z_score: self.z_score,
            reference_value: self.reference_value,
        })
    }
}

/// Convert a batch of rows, failing on the first malformed one.
pub fn to_entries(rows: &[StandardReference]) -> Result<Vec<StandardEntry>, CoreError> {
    rows.iter().map(StandardReference::to_entry).collect()
}
