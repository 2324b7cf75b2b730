use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};

/// Label of the DDL column in `SHOW CREATE TABLE` output.
const CREATE_TABLE_COLUMN: &str = "Create Table";

pub async fn query_create_table(
    pool: &MySqlPool,
    schema: &str,
    table_name: &str,
) -> Result<Option<String>, sqlx::Error> {
    let sql = format!(
        "SHOW CREATE TABLE {}.{}",
        quote_ident(schema),
        quote_ident(table_name)
    );
    let row = sqlx::query(&sql).fetch_optional(pool).await?;
    Ok(row.as_ref().and_then(ddl_text))
}

/// Drivers label the statement either by name or only by position (`Table`, `Create Table`).
fn ddl_text(row: &MySqlRow) -> Option<String> {
    row.try_get::<String, _>(CREATE_TABLE_COLUMN)
        .or_else(|_| row.try_get::<String, _>(1))
        .ok()
}

/// Backtick-quote an identifier, doubling embedded backticks.
fn quote_ident(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}
