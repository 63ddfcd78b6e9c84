//! Repository for the `children` table.
//!
//! Every lookup is scoped to the owning user so one parent can never read or
//! modify another parent's children.

use sqlx::PgPool;
use tumbuh_core::growth::age::age_in_months;
use tumbuh_core::types::{Date, DbId};

use crate::models::child::{Child, ChildUpdate, CreateChild, UpdateChild};
use crate::repositories::GrowthRecordRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, name, birth_date, sex, created_at, updated_at";

/// Provides CRUD operations for child profiles.
pub struct ChildRepo;

impl ChildRepo {
    /// Insert a new child owned by `user_id`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateChild,
    ) -> Result<Child, sqlx::Error> {
        let query = format!(
            "INSERT INTO children (user_id, name, birth_date, sex)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Child>(&query)
            .bind(user_id)
            .bind(input.name.trim())
            .bind(input.birth_date)
            .bind(input.sex.as_str())
            .fetch_one(pool)
            .await
    }

    /// Find a child by ID, only if owned by `user_id`.
    pub async fn find_owned(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<Child>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM children WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Child>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's children, youngest first.
    pub async fn list_by_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Child>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM children
             WHERE user_id = $1
             ORDER BY birth_date DESC, id ASC"
        );
        sqlx::query_as::<_, Child>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Update a child. Only non-`None` fields in `input` are applied.
    ///
    /// A new birth date re-derives `age_months` on every growth record of
    /// the child. The update, the record read and the age rewrite share one
    /// transaction, so either all of them land or none do.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        input: &UpdateChild,
    ) -> Result<ChildUpdate, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE children SET
                name = COALESCE($3, name),
                birth_date = COALESCE($4, birth_date),
                sex = COALESCE($5, sex)
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        let Some(child) = sqlx::query_as::<_, Child>(&query)
            .bind(id)
            .bind(user_id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(input.birth_date)
            .bind(input.sex.map(|s| s.as_str()))
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(ChildUpdate::NotFound);
        };

        let mut ages_rewritten = 0;
        if input.birth_date.is_some() {
            let records = sqlx::query_as::<_, (DbId, Date, i32)>(
                "SELECT id, recorded_date, age_months FROM growth_records
                 WHERE child_id = $1
                 ORDER BY recorded_date ASC, id ASC
                 FOR UPDATE",
            )
            .bind(id)
            .fetch_all(&mut *tx)
            .await?;

            let mut ages = Vec::new();
            for (record_id, recorded_date, current) in records {
                // Dropping `tx` here rolls the child update back.
                let Ok(age) = age_in_months(child.birth_date, recorded_date) else {
                    return Ok(ChildUpdate::RecordBeforeBirth {
                        record_id,
                        recorded_date,
                    });
                };
                if age != current {
                    ages.push((record_id, age));
                }
            }

            ages_rewritten = GrowthRecordRepo::update_ages(&mut tx, id, &ages).await?;
        }

        tx.commit().await?;
        Ok(ChildUpdate::Updated {
            child,
            ages_rewritten,
        })
    }

    /// Delete a child. Growth records and nutrition entries cascade.
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, user_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM children WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
