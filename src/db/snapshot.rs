use crate::db::StoreError;
use chrono::Utc;
use sqlx::{Row, SqlitePool};

/// Fetch the raw snapshot blob, `None` if no record exists yet (first
/// boot).
pub async fn get_blob(pool: &SqlitePool, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
    let row = sqlx::query("SELECT value FROM snapshots WHERE key = ?")
        .bind(key)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|r| r.get("value")))
}

/// Overwrite the snapshot record wholesale.
pub async fn put_blob(pool: &SqlitePool, key: &str, value: &[u8]) -> Result<(), StoreError> {
    sqlx::query(
        r#"INSERT INTO snapshots (key, value, updated_at)
           VALUES (?, ?, ?)
           ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at"#,
    )
    .bind(key)
    .bind(value)
    .bind(Utc::now().timestamp())
    .execute(pool)
    .await?;

    Ok(())
}
