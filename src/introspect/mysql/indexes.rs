use sqlx::MySqlPool;

use crate::introspect::IndexRow;

pub async fn query_indexes(
    pool: &MySqlPool,
    schema: &str,
    table_name: &str,
) -> Result<Vec<IndexRow>, sqlx::Error> {
    sqlx::query_as::<_, IndexRow>(
        r#"
        SELECT CAST(INDEX_NAME AS CHAR) AS index_name,
               CAST(NON_UNIQUE AS SIGNED) AS non_unique,
               CAST(SEQ_IN_INDEX AS SIGNED) AS seq_in_index,
               CAST(COALESCE(COLUMN_NAME, '') AS CHAR) AS column_name
        FROM information_schema.STATISTICS
        WHERE TABLE_SCHEMA = ? AND TABLE_NAME = ?
        ORDER BY INDEX_NAME, SEQ_IN_INDEX
        "#,
    )
    .bind(schema)
    .bind(table_name)
    .fetch_all(pool)
    .await
}
