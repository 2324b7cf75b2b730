use sqlx::MySqlPool;

use crate::introspect::StatsRow;

/// `TABLE_ROWS` is an estimate for InnoDB and may be NULL for some engines.
pub async fn query_table_stats(
    pool: &MySqlPool,
    schema: &str,
    table_name: &str,
) -> Result<Option<StatsRow>, sqlx::Error> {
    sqlx::query_as::<_, StatsRow>(
        r#"
        SELECT CAST(TABLE_ROWS AS SIGNED) AS table_rows,
               CAST(ENGINE AS CHAR) AS engine,
               CAST(TABLE_COLLATION AS CHAR) AS table_collation
        FROM information_schema.TABLES
        WHERE TABLE_SCHEMA = ? AND TABLE_NAME = ?
        "#,
    )
    .bind(schema)
    .bind(table_name)
    .fetch_optional(pool)
    .await
}
