//! Builds one [`TableDescriptor`] from the flat rows of the per-table catalog queries.

use crate::error::{ExportError, Stage};
use crate::group::PositionalGroups;
use crate::introspect::{Catalog, ColumnRow, ConstraintRow, ForeignKeyRow, IndexRow, StatsRow};
use crate::schema::{
    ColumnDescriptor, ForeignKeyDescriptor, IndexDescriptor, ReferentialAction, TableDescriptor,
    TableStats, UniqueConstraint,
};

/// MySQL names the primary key's index `PRIMARY`. It duplicates `primary_key`,
/// so it is never listed among the indexes (matched case-insensitively).
pub const PRIMARY_INDEX_NAME: &str = "PRIMARY";

const PRIMARY_KEY: &str = "PRIMARY KEY";
const UNIQUE: &str = "UNIQUE";

/// Query everything known about `schema.table` and assemble it.
///
/// Any failed query aborts the table. A missing DDL statement does not: it is
/// recorded as an empty string.
pub async fn assemble_table<C: Catalog + ?Sized>(
    catalog: &C,
    schema: &str,
    table: &str,
) -> Result<TableDescriptor, ExportError> {
    let columns = catalog
        .columns(schema, table)
        .await
        .map_err(query_error(table, Stage::Columns))?;
    let constraints = catalog
        .constraints(schema, table)
        .await
        .map_err(query_error(table, Stage::Constraints))?;
    let indexes = catalog
        .indexes(schema, table)
        .await
        .map_err(query_error(table, Stage::Indexes))?;
    let foreign_keys = catalog
        .foreign_keys(schema, table)
        .await
        .map_err(query_error(table, Stage::ForeignKeys))?;
    let stats = catalog
        .table_stats(schema, table)
        .await
        .map_err(query_error(table, Stage::TableStats))?;
    let ddl = catalog
        .create_table_ddl(schema, table)
        .await
        .map_err(query_error(table, Stage::Ddl))?
        .unwrap_or_else(|| {
            tracing::warn!("No CREATE TABLE statement returned for `{table}`");
            String::new()
        });

    let (primary_key, unique) = build_keys(constraints);

    Ok(TableDescriptor {
        name: table.to_string(),
        columns: build_columns(columns),
        primary_key,
        unique,
        indexes: build_indexes(indexes),
        foreign_keys: build_foreign_keys(foreign_keys),
        table_info: build_stats(stats),
        ddl,
    })
}

fn query_error(table: &str, stage: Stage) -> impl FnOnce(sqlx::Error) -> ExportError + '_ {
    move |source| ExportError::Query {
        table: table.to_string(),
        stage,
        source,
    }
}

pub fn build_columns(rows: Vec<ColumnRow>) -> Vec<ColumnDescriptor> {
    let mut columns: Vec<ColumnDescriptor> = rows
        .into_iter()
        .map(|row| ColumnDescriptor {
            nullable: row.is_nullable.eq_ignore_ascii_case("YES"),
            name: row.column_name,
            column_type: row.column_type,
            default: row.column_default,
            extra: row.extra.unwrap_or_default(),
            comment: row.column_comment.unwrap_or_default(),
            position: row.ordinal_position,
        })
        .collect();
    columns.sort_by_key(|c| c.position);
    columns
}

/// Split constraint rows into the primary key column list and the unique constraints.
pub fn build_keys(rows: Vec<ConstraintRow>) -> (Vec<String>, Vec<UniqueConstraint>) {
    let mut primary: PositionalGroups<(), String> = PositionalGroups::new();
    let mut unique: PositionalGroups<(), String> = PositionalGroups::new();

    for row in rows {
        let target = match row.constraint_type.as_str() {
            PRIMARY_KEY => &mut primary,
            UNIQUE => &mut unique,
            other => {
                tracing::debug!("Ignoring {other} constraint `{}`", row.constraint_name);
                continue;
            }
        };
        target.insert(
            &row.constraint_name,
            row.ordinal_position,
            || (),
            row.column_name,
        );
    }

    let primary_key = primary
        .into_groups()
        .into_iter()
        .next()
        .map(|group| group.members)
        .unwrap_or_default();

    let unique = unique
        .into_groups()
        .into_iter()
        .map(|group| UniqueConstraint {
            name: group.name,
            columns: group.members,
        })
        .collect();

    (primary_key, unique)
}

/// Secondary indexes in query order, without the primary key's index.
pub fn build_indexes(rows: Vec<IndexRow>) -> Vec<IndexDescriptor> {
    let mut groups: PositionalGroups<bool, String> = PositionalGroups::new();
    for row in rows {
        if row.index_name.eq_ignore_ascii_case(PRIMARY_INDEX_NAME) {
            continue;
        }
        let unique = row.non_unique == 0;
        groups.insert(&row.index_name, row.seq_in_index, || unique, row.column_name);
    }

    groups
        .into_groups()
        .into_iter()
        .map(|group| IndexDescriptor {
            name: group.name,
            unique: group.header,
            columns: group.members,
        })
        .collect()
}

struct ForeignKeyHeader {
    ref_table: String,
    on_update: ReferentialAction,
    on_delete: ReferentialAction,
}

/// Local and referenced columns are paired per row, so they stay aligned by position.
pub fn build_foreign_keys(rows: Vec<ForeignKeyRow>) -> Vec<ForeignKeyDescriptor> {
    let mut groups: PositionalGroups<ForeignKeyHeader, (String, String)> =
        PositionalGroups::new();
    for row in rows {
        let ForeignKeyRow {
            constraint_name,
            column_name,
            ordinal_position,
            ref_table,
            ref_column,
            update_rule,
            delete_rule,
        } = row;
        groups.insert(
            &constraint_name,
            ordinal_position,
            || ForeignKeyHeader {
                ref_table,
                on_update: ReferentialAction::parse(&update_rule),
                on_delete: ReferentialAction::parse(&delete_rule),
            },
            (column_name, ref_column),
        );
    }

    groups
        .into_groups()
        .into_iter()
        .map(|group| {
            let (columns, ref_columns) = group.members.into_iter().unzip();
            ForeignKeyDescriptor {
                name: group.name,
                columns,
                ref_table: group.header.ref_table,
                ref_columns,
                on_update: group.header.on_update,
                on_delete: group.header.on_delete,
            }
        })
        .collect()
}

/// Missing statistics degrade to all-null rather than failing.
pub fn build_stats(row: Option<StatsRow>) -> TableStats {
    match row {
        Some(row) => TableStats {
            row_count_est: row.table_rows,
            engine: row.engine,
            collation: row.table_collation,
        },
        None => TableStats::default(),
    }
}
