//! Nutrition intake entry model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tumbuh_core::nutrition::{MealType, Nutrients};
use tumbuh_core::types::{Date, DbId, Timestamp};
use validator::Validate;

/// A row from the `nutrition_intakes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct NutritionIntake {
    pub id: DbId,
    pub user_id: DbId,
    /// `None` for the parent's own (maternal) intake.
    pub child_id: Option<DbId>,
    pub intake_date: Date,
    pub meal_type: String,
    pub food_name: String,
    pub portion_grams: Option<f64>,
    pub energy_kcal: f64,
    pub protein_g: f64,
    pub fat_g: f64,
    pub carbohydrate_g: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl NutritionIntake {
    pub fn nutrients(&self) -> Nutrients {
        Nutrients {
            energy_kcal: self.energy_kcal,
            protein_g: self.protein_g,
            fat_g: self.fat_g,
            carbohydrate_g: self.carbohydrate_g,
        }
    }
}

/// DTO for creating an intake entry. Nutrients default to zero.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateNutritionIntake {
    pub child_id: Option<DbId>,
    pub intake_date: Date,
    pub meal_type: MealType,
    #[validate(length(min = 1, max = 200, message = "must be 1-200 characters"))]
    pub food_name: String,
    pub portion_grams: Option<f64>,
    #[serde(flatten)]
    pub nutrients: Nutrients,
}

/// DTO for updating an intake entry. All fields are optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateNutritionIntake {
    pub intake_date: Option<Date>,
    pub meal_type: Option<MealType>,
    #[validate(length(min = 1, max = 200, message = "must be 1-200 characters"))]
    pub food_name: Option<String>,
    pub portion_grams: Option<f64>,
    pub energy_kcal: Option<f64>,
    pub protein_g: Option<f64>,
    pub fat_g: Option<f64>,
    pub carbohydrate_g: Option<f64>,
}

/// Optional filters for listing intake entries. Also sent as a query
/// string by the client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NutritionIntakeFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub child_id: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<Date>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<Date>,
}
