use sqlx::MySqlPool;

use crate::introspect::ColumnRow;

pub async fn query_columns(
    pool: &MySqlPool,
    schema: &str,
    table_name: &str,
) -> Result<Vec<ColumnRow>, sqlx::Error> {
    sqlx::query_as::<_, ColumnRow>(
        r#"
        SELECT CAST(COLUMN_NAME AS CHAR) AS column_name,
               CAST(COLUMN_TYPE AS CHAR) AS column_type,
               CAST(IS_NULLABLE AS CHAR) AS is_nullable,
               CAST(COLUMN_DEFAULT AS CHAR) AS column_default,
               CAST(EXTRA AS CHAR) AS extra,
               CAST(COLUMN_COMMENT AS CHAR) AS column_comment,
               CAST(ORDINAL_POSITION AS SIGNED) AS ordinal_position
        FROM information_schema.COLUMNS
        WHERE TABLE_SCHEMA = ? AND TABLE_NAME = ?
        ORDER BY ORDINAL_POSITION
        "#,
    )
    .bind(schema)
    .bind(table_name)
    .fetch_all(pool)
    .await
}
