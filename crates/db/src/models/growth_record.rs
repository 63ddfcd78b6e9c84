//! Growth measurement record model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tumbuh_core::error::CoreError;
use tumbuh_core::growth::MeasurementType;
use tumbuh_core::types::{Date, DbId, Timestamp};

/// A row from the `growth_records` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GrowthRecord {
    pub id: DbId,
    pub child_id: DbId,
    pub measurement_type: String,
    /// Completed months between the child's birth date and `recorded_date`.
    pub age_months: i32,
    pub value: f64,
    pub recorded_date: Date,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl GrowthRecord {
    pub fn measurement_type(&self) -> Result<MeasurementType, CoreError> {
        self.measurement_type.parse()
    }
}

/// DTO for creating a record. The age is derived server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGrowthRecord {
    pub measurement_type: MeasurementType,
    pub value: f64,
    pub recorded_date: Date,
}

/// DTO for updating a record. All fields are optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateGrowthRecord {
    pub measurement_type: Option<MeasurementType>,
    pub value: Option<f64>,
    pub recorded_date: Option<Date>,
}

/// Fully resolved column values written on insert or update.
#[derive(Debug, Clone, Copy)]
pub struct GrowthRecordValues {
    pub measurement_type: MeasurementType,
    pub age_months: i32,
    pub value: f64,
    pub recorded_date: Date,
}
