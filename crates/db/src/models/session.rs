//! Refresh-token sessions. Only SHA-256 hashes of refresh tokens are stored.

use sqlx::FromRow;
use tumbuh_core::types::{DbId, Timestamp};

/// A row from `user_sessions`. A session stays usable until it expires or
/// its token is spent by a refresh or a logout.
#[derive(Debug, Clone, FromRow)]
pub struct UserSession {
    pub id: DbId,
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
    pub is_revoked: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Session issued on register or login.
pub struct CreateSession {
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
}

/// Exchange of a presented refresh token for a freshly issued one.
///
/// The owner is taken from the spent session, so callers cannot mint a
/// session for a different user.
pub struct SessionRotation<'a> {
    pub presented_hash: &'a str,
    pub replacement_hash: String,
    pub expires_at: Timestamp,
}
