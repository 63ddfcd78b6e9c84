//! Repository for the `user_sessions` table.
//!
//! Refresh tokens are single-use: [`SessionRepo::rotate`] spends the
//! presented token and stores its replacement in one transaction.

use sqlx::PgPool;
use tumbuh_core::types::DbId;

use crate::models::session::{CreateSession, SessionRotation, UserSession};

const COLUMNS: &str =
    "id, user_id, refresh_token_hash, expires_at, is_revoked, created_at, updated_at";

pub struct SessionRepo;

impl SessionRepo {
    /// Insert a new session, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateSession) -> Result<UserSession, sqlx::Error> {
        Self::insert(pool, input).await
    }

    /// Spend an active refresh token and issue its replacement for the same user.
    ///
    /// Returns `None` when the presented token is unknown, expired or already
    /// spent. Of two concurrent rotations with the same token only one gets a
    /// session: the second waits on the row lock and then finds it revoked.
    pub async fn rotate(
        pool: &PgPool,
        rotation: &SessionRotation<'_>,
    ) -> Result<Option<UserSession>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let user_id = sqlx::query_scalar::<_, DbId>(
            "UPDATE user_sessions SET is_revoked = true
             WHERE refresh_token_hash = $1
               AND is_revoked = false
               AND expires_at > NOW()
             RETURNING user_id",
        )
        .bind(rotation.presented_hash)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(user_id) = user_id else {
            return Ok(None);
        };

        let session = Self::insert(
            &mut *tx,
            &CreateSession {
                user_id,
                refresh_token_hash: rotation.replacement_hash.clone(),
                expires_at: rotation.expires_at,
            },
        )
        .await?;

        tx.commit().await?;
        Ok(Some(session))
    }

    /// Revoke all active sessions for a user. Returns the count of revoked sessions.
    pub async fn revoke_all_for_user(pool: &PgPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE user_sessions SET is_revoked = true
             WHERE user_id = $1 AND is_revoked = false",
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Delete expired or revoked sessions. Returns the count of deleted rows.
    pub async fn cleanup_expired(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM user_sessions WHERE expires_at < NOW() OR is_revoked = true")
                .execute(pool)
                .await?;
        Ok(result.rows_affected())
    }

    async fn insert<'e, E>(executor: E, input: &CreateSession) -> Result<UserSession, sqlx::Error>
    where
        E: sqlx::PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO user_sessions (user_id, refresh_token_hash, expires_at)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserSession>(&query)
            .bind(input.user_id)
            .bind(&input.refresh_token_hash)
            .bind(input.expires_at)
            .fetch_one(executor)
            .await
    }
}
