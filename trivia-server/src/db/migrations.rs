//! Schema bootstrap and default category seed

use sqlx::PgPool;

use crate::store::StoreError;

/// Categories inserted by [`seed_categories`], in id order.
pub const DEFAULT_CATEGORIES: [&str; 6] = [
    "Science",
    "Art",
    "Geography",
    "History",
    "Entertainment",
    "Sports",
];

/// Create the `categories` and `questions` tables if they don't exist.
pub async fn run(pool: &PgPool) -> Result<(), StoreError> {
    tracing::info!("Running trivia migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS categories (
            id SERIAL PRIMARY KEY,
            type TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(|e| StoreError::Migration(format!("categories table: {}", e)))?;

    // category is TEXT and not a foreign key: questions may reference
    // categories that were never seeded.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS questions (
            id SERIAL PRIMARY KEY,
            question TEXT NOT NULL,
            answer TEXT NOT NULL,
            category TEXT NOT NULL,
            difficulty INTEGER NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(|e| StoreError::Migration(format!("questions table: {}", e)))?;

    sqlx::query("CREATE INDEX IF NOT EXISTS questions_category_idx ON questions (category)")
        .execute(pool)
        .await
        .map_err(|e| StoreError::Migration(format!("questions index: {}", e)))?;

    tracing::info!("Trivia migrations complete");
    Ok(())
}

/// Insert [`DEFAULT_CATEGORIES`] when the categories table is empty.
///
/// Returns the number of rows inserted.
pub async fn seed_categories(pool: &PgPool) -> Result<u64, StoreError> {
    let (existing,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM categories")
        .fetch_one(pool)
        .await?;

    if existing > 0 {
        tracing::info!(existing, "Categories already present, skipping seed");
        return Ok(0);
    }

    let names: Vec<String> = DEFAULT_CATEGORIES.iter().map(|s| s.to_string()).collect();
    let result = sqlx::query("INSERT INTO categories (type) SELECT * FROM UNNEST($1::text[])")
        .bind(names)
        .execute(pool)
        .await?;

    tracing::info!(inserted = result.rows_affected(), "Seeded default categories");
    Ok(result.rows_affected())
}
