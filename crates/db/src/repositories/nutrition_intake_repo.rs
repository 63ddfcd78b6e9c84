//! Repository for the `nutrition_intakes` table.
//!
//! Entries belong to a user; `child_id` is optional and, when set, must
//! reference one of that user's children (checked by the caller).

use sqlx::PgPool;
use tumbuh_core::types::DbId;

use crate::models::nutrition_intake::{
    CreateNutritionIntake, NutritionIntake, NutritionIntakeFilter, UpdateNutritionIntake,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, child_id, intake_date, meal_type, food_name, portion_grams, \
    energy_kcal, protein_g, fat_g, carbohydrate_g, created_at, updated_at";

/// Provides CRUD operations for nutrition intake entries.
pub struct NutritionIntakeRepo;

impl NutritionIntakeRepo {
    /// Insert a new entry for `user_id`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateNutritionIntake,
    ) -> Result<NutritionIntake, sqlx::Error> {
        let query = format!(
            "INSERT INTO nutrition_intakes
                (user_id, child_id, intake_date, meal_type, food_name, portion_grams,
                 energy_kcal, protein_g, fat_g, carbohydrate_g)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, NutritionIntake>(&query)
            .bind(user_id)
            .bind(input.child_id)
            .bind(input.intake_date)
            .bind(input.meal_type.as_str())
            .bind(input.food_name.trim())
            .bind(input.portion_grams)
            .bind(input.nutrients.energy_kcal)
            .bind(input.nutrients.protein_g)
            .bind(input.nutrients.fat_g)
            .bind(input.nutrients.carbohydrate_g)
            .fetch_one(pool)
            .await
    }

    /// Find an entry by ID, only if owned by `user_id`.
    pub async fn find_by_id(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<NutritionIntake>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM nutrition_intakes WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, NutritionIntake>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's entries, newest day first, with optional filters.
    ///
    /// `from` and `to` are inclusive.
    pub async fn list(
        pool: &PgPool,
        user_id: DbId,
        filter: &NutritionIntakeFilter,
    ) -> Result<Vec<NutritionIntake>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM nutrition_intakes
             WHERE user_id = $1
               AND ($2::BIGINT IS NULL OR child_id = $2)
               AND ($3::DATE IS NULL OR intake_date >= $3)
               AND ($4::DATE IS NULL OR intake_date <= $4)
             ORDER BY intake_date DESC, id DESC"
        );
        sqlx::query_as::<_, NutritionIntake>(&query)
            .bind(user_id)
            .bind(filter.child_id)
            .bind(filter.from)
            .bind(filter.to)
            .fetch_all(pool)
            .await
    }

    /// Update an entry. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        input: &UpdateNutritionIntake,
    ) -> Result<Option<NutritionIntake>, sqlx::Error> {
        let query = format!(
            "UPDATE nutrition_intakes SET
                intake_date = COALESCE($3, intake_date),
                meal_type = COALESCE($4, meal_type),
                food_name = COALESCE($5, food_name),
                portion_grams = COALESCE($6, portion_grams),
                energy_kcal = COALESCE($7, energy_kcal),
                protein_g = COALESCE($8, protein_g),
                fat_g = COALESCE($9, fat_g),
                carbohydrate_g = COALESCE($10, carbohydrate_g)
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, NutritionIntake>(&query)
            .bind(id)
            .bind(user_id)
            .bind(input.intake_date)
            .bind(input.meal_type.map(|m| m.as_str()))
            .bind(input.food_name.as_deref().map(str::trim))
            .bind(input.portion_grams)
            .bind(input.energy_kcal)
            .bind(input.protein_g)
            .bind(input.fat_g)
            .bind(input.carbohydrate_g)
            .fetch_optional(pool)
            .await
    }

    /// Delete an entry. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, user_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM nutrition_intakes WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
