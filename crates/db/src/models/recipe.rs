//! Recipe model.

use serde::Serialize;
use sqlx::FromRow;
use tumbuh_core::types::{DbId, Timestamp};

/// A row from the `recipes` table. Recipes are seeded by migration and are
/// read-only through the API.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Recipe {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub ingredients: Vec<String>,
    pub instructions: String,
    pub min_age_months: i32,
    /// `None` means suitable from `min_age_months` onwards.
    pub max_age_months: Option<i32>,
    pub energy_kcal: f64,
    pub protein_g: f64,
    pub image_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
