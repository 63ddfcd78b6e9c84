//! Repository for the `growth_standards` table.

use sqlx::PgPool;
use tumbuh_core::growth::{MeasurementType, Sex, StandardEntry};

use crate::models::standard::StandardReference;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, measurement_type, age_months, sex, z_score, reference_value, created_at, updated_at";

/// Provides seeding and lookup for growth standard reference values.
pub struct StandardRepo;

impl StandardRepo {
    /// Insert or replace many entries within a transaction.
    ///
    /// Rows are keyed on `(measurement_type, age_months, sex, z_score)`; an
    /// existing row takes the new `reference_value`. Returns the number of
    /// rows written. The whole batch rolls back on the first failure.
    pub async fn upsert_many(pool: &PgPool, entries: &[StandardEntry]) -> Result<u64, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let mut written = 0;

        for entry in entries {
            let result = sqlx::query(
                "INSERT INTO growth_standards
                    (measurement_type, age_months, sex, z_score, reference_value)
                 VALUES ($1, $2, $3, $4, $5)
                 ON CONFLICT ON CONSTRAINT uq_growth_standards_key
                 DO UPDATE SET reference_value = EXCLUDED.reference_value",
            )
            .bind(entry.measurement_type.as_str())
            .bind(entry.age_months)
            .bind(entry.sex.as_str())
            .bind(entry.z_score)
            .bind(entry.reference_value)
            .execute(&mut *tx)
            .await?;
            written += result.rows_affected();
        }

        tx.commit().await?;
        tracing::info!(entries = entries.len(), written, "Upserted growth standards");
        Ok(written)
    }

    /// List entries, optionally narrowed to a measurement type and/or sex.
    pub async fn list(
        pool: &PgPool,
        measurement_type: Option<MeasurementType>,
        sex: Option<Sex>,
    ) -> Result<Vec<StandardReference>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM growth_standards
             WHERE ($1::TEXT IS NULL OR measurement_type = $1)
               AND ($2::TEXT IS NULL OR sex = $2)
             ORDER BY measurement_type, sex, age_months, z_score"
        );
        sqlx::query_as::<_, StandardReference>(&query)
            .bind(measurement_type.map(|m| m.as_str()))
            .bind(sex.map(|s| s.as_str()))
            .fetch_all(pool)
            .await
    }

    /// All entries for one exact `(type, age, sex)`, ordered by z-score.
    pub async fn find_for(
        pool: &PgPool,
        measurement_type: MeasurementType,
        age_months: i32,
        sex: Sex,
    ) -> Result<Vec<StandardReference>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM growth_standards
             WHERE measurement_type = $1 AND age_months = $2 AND sex = $3
             ORDER BY z_score ASC"
        );
        sqlx::query_as::<_, StandardReference>(&query)
            .bind(measurement_type.as_str())
            .bind(age_months)
            .bind(sex.as_str())
            .fetch_all(pool)
            .await
    }

    /// Every entry for one `(type, sex)` across all ages. Used for charts
    /// and interpolated lookups.
    pub async fn list_for(
        pool: &PgPool,
        measurement_type: MeasurementType,
        sex: Sex,
    ) -> Result<Vec<StandardReference>, sqlx::Error> {
        Self::list(pool, Some(measurement_type), Some(sex)).await
    }

    /// Total number of stored entries.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM growth_standards")
            .fetch_one(pool)
            .await
    }
}
