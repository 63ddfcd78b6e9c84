//! Repository for the `growth_records` table.
//!
//! Callers resolve ownership through [`ChildRepo`](super::ChildRepo) first;
//! every query here is scoped by `child_id`.

use sqlx::PgPool;
use tumbuh_core::growth::MeasurementType;
use tumbuh_core::types::DbId;

use crate::models::growth_record::{GrowthRecord, GrowthRecordValues};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, child_id, measurement_type, age_months, value, recorded_date, created_at, updated_at";

/// Provides CRUD operations for growth records.
pub struct GrowthRecordRepo;

impl GrowthRecordRepo {
    /// Insert a new record for a child, returning the created row.
    pub async fn create(
        pool: &PgPool,
        child_id: DbId,
        values: &GrowthRecordValues,
    ) -> Result<GrowthRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO growth_records (child_id, measurement_type, age_months, value, recorded_date)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GrowthRecord>(&query)
            .bind(child_id)
            .bind(values.measurement_type.as_str())
            .bind(values.age_months)
            .bind(values.value)
            .bind(values.recorded_date)
            .fetch_one(pool)
            .await
    }

    /// Find a record by ID within a child.
    pub async fn find_by_id(
        pool: &PgPool,
        child_id: DbId,
        id: DbId,
    ) -> Result<Option<GrowthRecord>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM growth_records WHERE id = $1 AND child_id = $2");
        sqlx::query_as::<_, GrowthRecord>(&query)
            .bind(id)
            .bind(child_id)
            .fetch_optional(pool)
            .await
    }

    /// List a child's records, oldest first, optionally for one measurement type.
    pub async fn list_by_child(
        pool: &PgPool,
        child_id: DbId,
        measurement_type: Option<MeasurementType>,
    ) -> Result<Vec<GrowthRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM growth_records
             WHERE child_id = $1
               AND ($2::TEXT IS NULL OR measurement_type = $2)
             ORDER BY recorded_date ASC, id ASC"
        );
        sqlx::query_as::<_, GrowthRecord>(&query)
            .bind(child_id)
            .bind(measurement_type.map(|m| m.as_str()))
            .fetch_all(pool)
            .await
    }

    /// Overwrite every editable column of a record.
    ///
    /// Returns `None` if no row with the given `id` belongs to `child_id`.
    pub async fn update(
        pool: &PgPool,
        child_id: DbId,
        id: DbId,
        values: &GrowthRecordValues,
    ) -> Result<Option<GrowthRecord>, sqlx::Error> {
        let query = format!(
            "UPDATE growth_records SET
                measurement_type = $3,
                age_months = $4,
                value = $5,
                recorded_date = $6
             WHERE id = $1 AND child_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GrowthRecord>(&query)
            .bind(id)
            .bind(child_id)
            .bind(values.measurement_type.as_str())
            .bind(values.age_months)
            .bind(values.value)
            .bind(values.recorded_date)
            .fetch_optional(pool)
            .await
    }

    /// Rewrite `age_months` inside an existing transaction.
    ///
    /// Used by [`ChildRepo::update`](super::ChildRepo::update) after a birth
    /// date change.
    pub async fn update_ages(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        child_id: DbId,
        ages: &[(DbId, i32)],
    ) -> Result<u64, sqlx::Error> {
        let mut updated = 0;
        for (id, age_months) in ages {
            let result = sqlx::query(
                "UPDATE growth_records SET age_months = $3 WHERE id = $1 AND child_id = $2",
            )
            .bind(id)
            .bind(child_id)
            .bind(age_months)
            .execute(&mut **tx)
            .await?;
            updated += result.rows_affected();
        }
        Ok(updated)
    }

    /// Delete a record. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, child_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM growth_records WHERE id = $1 AND child_id = $2")
            .bind(id)
            .bind(child_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
