use sqlx::MySqlPool;

/// Base tables only; views and system views are excluded by `TABLE_TYPE`.
pub async fn query_base_tables(
    pool: &MySqlPool,
    schema: &str,
) -> Result<Vec<String>, sqlx::Error> {
    let rows = sqlx::query_as::<_, TableRow>(
        r#"
        SELECT CAST(TABLE_NAME AS CHAR) AS table_name
        FROM information_schema.TABLES
        WHERE TABLE_SCHEMA = ? AND TABLE_TYPE = 'BASE TABLE'
        ORDER BY TABLE_NAME
        "#,
    )
    .bind(schema)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|row| row.table_name).collect())
}

#[derive(sqlx::FromRow)]
struct TableRow {
    table_name: String,
}
