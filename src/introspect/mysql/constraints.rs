use sqlx::MySqlPool;

use crate::introspect::ConstraintRow;

/// Primary key and unique constraint columns. Foreign keys have their own query.
pub async fn query_constraints(
    pool: &MySqlPool,
    schema: &str,
    table_name: &str,
) -> Result<Vec<ConstraintRow>, sqlx::Error> {
    sqlx::query_as::<_, ConstraintRow>(
        r#"
        SELECT CAST(tc.CONSTRAINT_NAME AS CHAR) AS constraint_name,
               CAST(tc.CONSTRAINT_TYPE AS CHAR) AS constraint_type,
               CAST(kcu.COLUMN_NAME AS CHAR) AS column_name,
               CAST(kcu.ORDINAL_POSITION AS SIGNED) AS ordinal_position
        FROM information_schema.TABLE_CONSTRAINTS tc
        JOIN information_schema.KEY_COLUMN_USAGE kcu
            ON kcu.CONSTRAINT_NAME = tc.CONSTRAINT_NAME
            AND kcu.CONSTRAINT_SCHEMA = tc.CONSTRAINT_SCHEMA
            AND kcu.TABLE_SCHEMA = tc.TABLE_SCHEMA
            AND kcu.TABLE_NAME = tc.TABLE_NAME
        WHERE tc.TABLE_SCHEMA = ? AND tc.TABLE_NAME = ?
          AND tc.CONSTRAINT_TYPE IN ('PRIMARY KEY', 'UNIQUE')
        ORDER BY tc.CONSTRAINT_NAME, kcu.ORDINAL_POSITION
        "#,
    )
    .bind(schema)
    .bind(table_name)
    .fetch_all(pool)
    .await
}
