use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::error::Stage;
use crate::introspect::{Catalog, ColumnRow, ConstraintRow, ForeignKeyRow, IndexRow, StatsRow};

/// An in-memory catalog that counts every query made against it.
#[derive(Debug, Default)]
pub struct FakeCatalog {
    /// In catalog order.
    pub tables: Vec<FakeTable>,
    /// Make the given stage fail for the named table.
    pub fail: Option<(String, Stage)>,
    queries: AtomicUsize,
}

#[derive(Debug, Clone, Default)]
pub struct FakeTable {
    pub name: String,
    pub is_view: bool,
    pub columns: Vec<ColumnRow>,
    pub constraints: Vec<ConstraintRow>,
    pub indexes: Vec<IndexRow>,
    pub foreign_keys: Vec<ForeignKeyRow>,
    pub stats: Option<StatsRow>,
    pub ddl: Option<String>,
}

impl FakeCatalog {
    pub fn new(tables: Vec<FakeTable>) -> Self {
        Self {
            tables,
            ..Self::default()
        }
    }

    pub fn failing_at(mut self, table: &str, stage: Stage) -> Self {
        self.fail = Some((table.to_string(), stage));
        self
    }

    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    fn lookup(&self, table: &str, stage: Stage) -> Result<&FakeTable, sqlx::Error> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        if let Some((failing, failing_stage)) = &self.fail {
            if failing == table && *failing_stage == stage {
                return Err(sqlx::Error::Protocol(format!("{stage} query failed")));
            }
        }
        self.tables
            .iter()
            .find(|t| t.name == table)
            .ok_or(sqlx::Error::RowNotFound)
    }
}

#[async_trait]
impl Catalog for FakeCatalog {
    async fn base_tables(&self, _schema: &str) -> Result<Vec<String>, sqlx::Error> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .tables
            .iter()
            .filter(|t| !t.is_view)
            .map(|t| t.name.clone())
            .collect())
    }

    async fn columns(&self, _schema: &str, table: &str) -> Result<Vec<ColumnRow>, sqlx::Error> {
        Ok(self.lookup(table, Stage::Columns)?.columns.clone())
    }

    async fn constraints(
        &self,
        _schema: &str,
        table: &str,
    ) -> Result<Vec<ConstraintRow>, sqlx::Error> {
        Ok(self.lookup(table, Stage::Constraints)?.constraints.clone())
    }

    async fn indexes(&self, _schema: &str, table: &str) -> Result<Vec<IndexRow>, sqlx::Error> {
        Ok(self.lookup(table, Stage::Indexes)?.indexes.clone())
    }

    async fn foreign_keys(
        &self,
        _schema: &str,
        table: &str,
    ) -> Result<Vec<ForeignKeyRow>, sqlx::Error> {
        Ok(self.lookup(table, Stage::ForeignKeys)?.foreign_keys.clone())
    }

    async fn table_stats(
        &self,
        _schema: &str,
        table: &str,
    ) -> Result<Option<StatsRow>, sqlx::Error> {
        Ok(self.lookup(table, Stage::TableStats)?.stats.clone())
    }

    async fn create_table_ddl(
        &self,
        _schema: &str,
        table: &str,
    ) -> Result<Option<String>, sqlx::Error> {
        Ok(self.lookup(table, Stage::Ddl)?.ddl.clone())
    }
}

/// A table with a single `id` primary key column and nothing else.
pub fn simple_table(name: &str) -> FakeTable {
    FakeTable {
        name: name.to_string(),
        columns: vec![column_row("id", "int", false, 1)],
        constraints: vec![constraint_row("PRIMARY", "PRIMARY KEY", "id", 1)],
        indexes: vec![index_row("PRIMARY", true, 1, "id")],
        ddl: Some(format!("CREATE TABLE `{name}` (\n  `id` int NOT NULL\n)")),
        ..FakeTable::default()
    }
}

pub fn column_row(name: &str, column_type: &str, nullable: bool, position: i64) -> ColumnRow {
    ColumnRow {
        column_name: name.to_string(),
        column_type: column_type.to_string(),
        is_nullable: if nullable { "YES" } else { "NO" }.to_string(),
        column_default: None,
        extra: Some(String::new()),
        column_comment: Some(String::new()),
        ordinal_position: position,
    }
}

pub fn constraint_row(name: &str, kind: &str, column: &str, position: i64) -> ConstraintRow {
    ConstraintRow {
        constraint_name: name.to_string(),
        constraint_type: kind.to_string(),
        column_name: column.to_string(),
        ordinal_position: position,
    }
}

pub fn index_row(name: &str, unique: bool, seq: i64, column: &str) -> IndexRow {
    IndexRow {
        index_name: name.to_string(),
        non_unique: if unique { 0 } else { 1 },
        seq_in_index: seq,
        column_name: column.to_string(),
    }
}

pub fn foreign_key_row(
    name: &str,
    column: &str,
    position: i64,
    ref_table: &str,
    ref_column: &str,
) -> ForeignKeyRow {
    ForeignKeyRow {
        constraint_name: name.to_string(),
        column_name: column.to_string(),
        ordinal_position: position,
        ref_table: ref_table.to_string(),
        ref_column: ref_column.to_string(),
        update_rule: "NO ACTION".to_string(),
        delete_rule: "NO ACTION".to_string(),
    }
}

/// `orders(id INT PRIMARY KEY AUTO_INCREMENT, user_id INT, UNIQUE KEY uq_x (user_id),
/// FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE)`
pub fn orders_table() -> FakeTable {
    FakeTable {
        name: "orders".to_string(),
        columns: vec![
            ColumnRow {
                extra: Some("auto_increment".to_string()),
                ..column_row("id", "int", false, 1)
            },
            column_row("user_id", "int", true, 2),
        ],
        constraints: vec![
            constraint_row("PRIMARY", "PRIMARY KEY", "id", 1),
            constraint_row("uq_x", "UNIQUE", "user_id", 1),
        ],
        indexes: vec![
            index_row("PRIMARY", true, 1, "id"),
            index_row("uq_x", true, 1, "user_id"),
        ],
        foreign_keys: vec![ForeignKeyRow {
            delete_rule: "CASCADE".to_string(),
            ..foreign_key_row("orders_ibfk_1", "user_id", 1, "users", "id")
        }],
        stats: Some(StatsRow {
            table_rows: Some(0),
            engine: Some("InnoDB".to_string()),
            table_collation: Some("utf8mb4_0900_ai_ci".to_string()),
        }),
        ddl: Some("CREATE TABLE `orders` (`id` int NOT NULL AUTO_INCREMENT)".to_string()),
        ..FakeTable::default()
    }
}
