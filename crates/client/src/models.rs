//! Response payloads as returned by the server.
//!
//! Request bodies reuse the DTOs from `tumbuh_db::models`; these types are
//! the deserializing side of the wire.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use tumbuh_core::growth::chart::{ChartPoint, GrowthChart};
use tumbuh_core::growth::standards::ReferenceCurve;
use tumbuh_core::growth::{GrowthStatus, MeasurementType, Sex, StandardEntry};
use tumbuh_core::nutrition::MealType;
use tumbuh_core::recipe::is_suitable_for_age;

/// The `{ "data": ... }` envelope wrapping resource responses.
#[derive(Debug, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserInfo {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Tokens and profile returned by register, login and refresh.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserInfo,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Child {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub birth_date: NaiveDate,
    pub sex: Sex,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A stored measurement with its assessment. `status` is `None` when the
/// server had no reference values for the record's age.
#[derive(Debug, Clone, Deserialize)]
pub struct GrowthRecord {
    pub id: i64,
    pub child_id: i64,
    pub measurement_type: MeasurementType,
    pub age_months: i32,
    pub value: f64,
    pub recorded_date: NaiveDate,
    pub status: Option<GrowthStatus>,
    pub status_label: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NutritionIntake {
    pub id: i64,
    pub user_id: i64,
    pub child_id: Option<i64>,
    pub intake_date: NaiveDate,
    pub meal_type: MealType,
    pub food_name: String,
    pub portion_grams: Option<f64>,
    pub energy_kcal: f64,
    pub protein_g: f64,
    pub fat_g: f64,
    pub carbohydrate_g: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Recipe {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub ingredients: Vec<String>,
    pub instructions: String,
    pub min_age_months: i32,
    pub max_age_months: Option<i32>,
    pub energy_kcal: f64,
    pub protein_g: f64,
    pub image_url: Option<String>,
}

impl Recipe {
    /// Whether this recipe's age range covers `age_months` (inclusive).
    pub fn is_suitable_for(&self, age_months: i32) -> bool {
        is_suitable_for_age(self.min_age_months, self.max_age_months, age_months)
    }
}

/// Result of `POST /growth/evaluate`.
#[derive(Debug, Clone, Deserialize)]
pub struct Assessment {
    pub measurement_type: MeasurementType,
    pub age_months: i32,
    pub sex: Sex,
    pub value: f64,
    pub status: GrowthStatus,
    pub label: String,
    /// Reference values used, ordered by z-score.
    pub references: Vec<StandardEntry>,
}

/// Chart data for one child and indicator.
#[derive(Debug, Clone, Deserialize)]
pub struct Chart {
    pub measurement_type: MeasurementType,
    pub sex: Sex,
    pub unit: String,
    pub points: Vec<ChartPoint>,
    pub curves: Vec<ReferenceCurve>,
}

impl Chart {
    /// Whether the server's unit agrees with the measurement type.
    pub fn matches_unit(&self) -> bool {
        self.unit == self.measurement_type.unit()
    }

    /// Convert into the core chart type.
    pub fn into_core(self) -> GrowthChart {
        GrowthChart {
            measurement_type: self.measurement_type,
            sex: self.sex,
            unit: self.measurement_type.unit(),
            points: self.points,
            curves: self.curves,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StandardsStatus {
    pub count: i64,
    pub bundled_count: usize,
    pub seeded: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedResult {
    pub written: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub db_healthy: bool,
    #[serde(default)]
    pub standards_entries: i64,
    #[serde(default)]
    pub standards_seeded: bool,
}
