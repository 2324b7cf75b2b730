use sqlx::MySqlPool;

use crate::introspect::ForeignKeyRow;

/// Foreign key columns paired with the columns they reference.
///
/// Ordered by position so that local and referenced columns line up for
/// multi-column keys without relying on the server's natural row order.
pub async fn query_foreign_keys(
    pool: &MySqlPool,
    schema: &str,
    table_name: &str,
) -> Result<Vec<ForeignKeyRow>, sqlx::Error> {
    sqlx::query_as::<_, ForeignKeyRow>(
        r#"
        SELECT CAST(kcu.CONSTRAINT_NAME AS CHAR) AS constraint_name,
               CAST(kcu.COLUMN_NAME AS CHAR) AS column_name,
               CAST(kcu.ORDINAL_POSITION AS SIGNED) AS ordinal_position,
               CAST(kcu.REFERENCED_TABLE_NAME AS CHAR) AS ref_table,
               CAST(kcu.REFERENCED_COLUMN_NAME AS CHAR) AS ref_column,
               CAST(rc.UPDATE_RULE AS CHAR) AS update_rule,
               CAST(rc.DELETE_RULE AS CHAR) AS delete_rule
        FROM information_schema.KEY_COLUMN_USAGE kcu
        JOIN information_schema.REFERENTIAL_CONSTRAINTS rc
            ON rc.CONSTRAINT_NAME = kcu.CONSTRAINT_NAME
            AND rc.CONSTRAINT_SCHEMA = kcu.TABLE_SCHEMA
            AND rc.TABLE_NAME = kcu.TABLE_NAME
        WHERE kcu.TABLE_SCHEMA = ? AND kcu.TABLE_NAME = ?
          AND kcu.REFERENCED_TABLE_NAME IS NOT NULL
        ORDER BY kcu.CONSTRAINT_NAME, kcu.ORDINAL_POSITION
        "#,
    )
    .bind(schema)
    .bind(table_name)
    .fetch_all(pool)
    .await
}
