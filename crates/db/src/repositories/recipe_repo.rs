//! Repository for the `recipes` table.

use sqlx::PgPool;
use tumbuh_core::types::DbId;

use crate::models::recipe::Recipe;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, ingredients, instructions, \
    min_age_months, max_age_months, energy_kcal, protein_g, image_url, created_at, updated_at";

/// Read-only access to the recipe catalogue.
pub struct RecipeRepo;

impl RecipeRepo {
    /// List every recipe, youngest target age first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Recipe>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM recipes ORDER BY min_age_months, title");
        sqlx::query_as::<_, Recipe>(&query).fetch_all(pool).await
    }

    /// List recipes suitable for a child of `age_months` (inclusive bounds).
    pub async fn list_for_age(pool: &PgPool, age_months: i32) -> Result<Vec<Recipe>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM recipes
             WHERE min_age_months <= $1
               AND (max_age_months IS NULL OR max_age_months >= $1)
             ORDER BY min_age_months, title"
        );
        sqlx::query_as::<_, Recipe>(&query)
            .bind(age_months)
            .fetch_all(pool)
            .await
    }

    /// Find a recipe by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Recipe>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM recipes WHERE id = $1");
        sqlx::query_as::<_, Recipe>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
