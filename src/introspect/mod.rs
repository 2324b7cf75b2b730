pub mod mysql;

use async_trait::async_trait;

/// Read-only access to a database's catalog.
///
/// Every per-table query is scoped to one (schema, table) pair and returns flat
/// rows; reassembling composite structures is left to the caller. Row order is
/// part of each method's contract.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Base table names in `schema`, excluding views, in catalog order.
    async fn base_tables(&self, schema: &str) -> Result<Vec<String>, sqlx::Error>;

    /// Columns ordered by ordinal position.
    async fn columns(&self, schema: &str, table: &str) -> Result<Vec<ColumnRow>, sqlx::Error>;

    /// PRIMARY KEY and UNIQUE column usage, ordered by constraint name then position.
    async fn constraints(
        &self,
        schema: &str,
        table: &str,
    ) -> Result<Vec<ConstraintRow>, sqlx::Error>;

    /// Index column usage, ordered by index name then sequence in index.
    async fn indexes(&self, schema: &str, table: &str) -> Result<Vec<IndexRow>, sqlx::Error>;

    /// Foreign key column usage, ordered by constraint name then position.
    async fn foreign_keys(
        &self,
        schema: &str,
        table: &str,
    ) -> Result<Vec<ForeignKeyRow>, sqlx::Error>;

    /// At most one statistics row; `None` when the catalog has nothing for the table.
    async fn table_stats(
        &self,
        schema: &str,
        table: &str,
    ) -> Result<Option<StatsRow>, sqlx::Error>;

    /// The verbatim `CREATE TABLE` statement, or `None` when the server returned no usable text.
    async fn create_table_ddl(
        &self,
        schema: &str,
        table: &str,
    ) -> Result<Option<String>, sqlx::Error>;
}

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct ColumnRow {
    pub column_name: String,
    pub column_type: String,
    /// `YES` or `NO`, as information_schema reports it.
    pub is_nullable: String,
    pub column_default: Option<String>,
    pub extra: Option<String>,
    pub column_comment: Option<String>,
    pub ordinal_position: i64,
}

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct ConstraintRow {
    pub constraint_name: String,
    /// `PRIMARY KEY` or `UNIQUE`.
    pub constraint_type: String,
    pub column_name: String,
    pub ordinal_position: i64,
}

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct IndexRow {
    pub index_name: String,
    pub non_unique: i64,
    pub seq_in_index: i64,
    /// Empty for functional key parts, which have no column.
    pub column_name: String,
}

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct ForeignKeyRow {
    pub constraint_name: String,
    pub column_name: String,
    pub ordinal_position: i64,
    pub ref_table: String,
    pub ref_column: String,
    pub update_rule: String,
    pub delete_rule: String,
}

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct StatsRow {
    pub table_rows: Option<i64>,
    pub engine: Option<String>,
    pub table_collation: Option<String>,
}
