mod columns;
mod constraints;
mod ddl;
mod foreign_keys;
mod indexes;
mod stats;
mod tables;

use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};

use super::{Catalog, ColumnRow, ConstraintRow, ForeignKeyRow, IndexRow, StatsRow};
use crate::config::ExportConfig;
use crate::error::ExportError;

/// A MySQL or MariaDB catalog read over a single pooled connection.
pub struct MySqlCatalog {
    pool: MySqlPool,
}

impl MySqlCatalog {
    /// Open the one connection the export runs on.
    pub async fn connect(config: &ExportConfig) -> Result<Self, ExportError> {
        let options = MySqlConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.user)
            .password(&config.password)
            .database(&config.database)
            .charset("utf8mb4");

        let pool = MySqlPoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(ExportError::Connection)?;
        Ok(Self { pool })
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl Catalog for MySqlCatalog {
    async fn base_tables(&self, schema: &str) -> Result<Vec<String>, sqlx::Error> {
        tables::query_base_tables(&self.pool, schema).await
    }

    async fn columns(&self, schema: &str, table: &str) -> Result<Vec<ColumnRow>, sqlx::Error> {
        columns::query_columns(&self.pool, schema, table).await
    }

    async fn constraints(
        &self,
        schema: &str,
        table: &str,
    ) -> Result<Vec<ConstraintRow>, sqlx::Error> {
        constraints::query_constraints(&self.pool, schema, table).await
    }

    async fn indexes(&self, schema: &str, table: &str) -> Result<Vec<IndexRow>, sqlx::Error> {
        indexes::query_indexes(&self.pool, schema, table).await
    }

    async fn foreign_keys(
        &self,
        schema: &str,
        table: &str,
    ) -> Result<Vec<ForeignKeyRow>, sqlx::Error> {
        foreign_keys::query_foreign_keys(&self.pool, schema, table).await
    }

    async fn table_stats(
        &self,
        schema: &str,
        table: &str,
    ) -> Result<Option<StatsRow>, sqlx::Error> {
        stats::query_table_stats(&self.pool, schema, table).await
    }

    async fn create_table_ddl(
        &self,
        schema: &str,
        table: &str,
    ) -> Result<Option<String>, sqlx::Error> {
        ddl::query_create_table(&self.pool, schema, table).await
    }
}
