//! Integration tests for refresh-token sessions.

use chrono::{Duration, Utc};
use sqlx::PgPool;
use tumbuh_db::models::session::{CreateSession, SessionRotation};
use tumbuh_db::models::user::CreateUser;
use tumbuh_db::repositories::{SessionRepo, UserRepo};

async fn new_user(pool: &PgPool, username: &str) -> i64 {
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password_hash: "not-a-real-hash".to_string(),
            full_name: None,
        },
    )
    .await
    .unwrap()
    .id
}

async fn open_session(pool: &PgPool, user_id: i64, hash: &str, days: i64) {
    SessionRepo::create(
        pool,
        &CreateSession {
            user_id,
            refresh_token_hash: hash.to_string(),
            expires_at: Utc::now() + Duration::days(days),
        },
    )
    .await
    .unwrap();
}

fn rotation<'a>(presented: &'a str, replacement: &str) -> SessionRotation<'a> {
    SessionRotation {
        presented_hash: presented,
        replacement_hash: replacement.to_string(),
        expires_at: Utc::now() + Duration::days(7),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_rotate_spends_token_once(pool: PgPool) {
    let user_id = new_user(&pool, "ibu_ani").await;
    open_session(&pool, user_id, "hash-a", 7).await;

    let rotated = SessionRepo::rotate(&pool, &rotation("hash-a", "hash-b"))
        .await
        .unwrap()
        .expect("active token rotates");
    assert_eq!(rotated.user_id, user_id);
    assert_eq!(rotated.refresh_token_hash, "hash-b");
    assert!(!rotated.is_revoked);

    let replay = SessionRepo::rotate(&pool, &rotation("hash-a", "hash-c"))
        .await
        .unwrap();
    assert!(replay.is_none());

    // The replacement is itself spendable.
    let next = SessionRepo::rotate(&pool, &rotation("hash-b", "hash-d"))
        .await
        .unwrap();
    assert!(next.is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_rotate_rejects_expired_and_unknown_tokens(pool: PgPool) {
    let user_id = new_user(&pool, "ibu_ani").await;
    open_session(&pool, user_id, "hash-old", -1).await;

    let expired = SessionRepo::rotate(&pool, &rotation("hash-old", "hash-new"))
        .await
        .unwrap();
    assert!(expired.is_none());

    let unknown = SessionRepo::rotate(&pool, &rotation("hash-missing", "hash-new"))
        .await
        .unwrap();
    assert!(unknown.is_none());

    // A rejected rotation stores no replacement session.
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM user_sessions")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_revoked_sessions_are_cleaned_up(pool: PgPool) {
    let user_id = new_user(&pool, "ibu_ani").await;
    let other_id = new_user(&pool, "ibu_budi").await;
    open_session(&pool, user_id, "hash-a", 7).await;
    open_session(&pool, user_id, "hash-b", 7).await;
    open_session(&pool, other_id, "hash-c", 7).await;

    let revoked = SessionRepo::revoke_all_for_user(&pool, user_id).await.unwrap();
    assert_eq!(revoked, 2);

    let after_logout = SessionRepo::rotate(&pool, &rotation("hash-a", "hash-z"))
        .await
        .unwrap();
    assert!(after_logout.is_none());

    let deleted = SessionRepo::cleanup_expired(&pool).await.unwrap();
    assert_eq!(deleted, 2);

    let other = SessionRepo::rotate(&pool, &rotation("hash-c", "hash-y"))
        .await
        .unwrap();
    assert!(other.is_some());
}
