use sqlx::PgPool;

/// Full bootstrap test: connect, migrate, verify schema.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    tumbuh_db::health_check(&pool).await.unwrap();

    let tables = [
        "users",
        "user_sessions",
        "children",
        "growth_records",
        "growth_standards",
        "nutrition_intakes",
        "recipes",
    ];

    for table in tables {
        sqlx::query(&format!("SELECT COUNT(*) FROM {table}"))
            .execute(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
    }
}

/// The recipe catalogue ships with seed rows.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_recipes_are_seeded(pool: PgPool) {
    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM recipes")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert!(count.0 > 0, "recipes should have seed data, got 0 rows");
}
