use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset, Local};

use crate::assemble::assemble_table;
use crate::config::ExportConfig;
use crate::error::ExportError;
use crate::filter::TableFilter;
use crate::introspect::Catalog;
use crate::schema::SchemaDocument;

/// Where a document was written and how large it is.
#[derive(Debug, Clone, PartialEq)]
pub struct WrittenFile {
    pub path: PathBuf,
    pub bytes: u64,
    pub table_count: usize,
}

/// Run a complete export: compile the filter, read the catalog, write the document.
///
/// The filter is compiled before the catalog is touched, so a bad pattern
/// aborts without issuing a single query.
pub async fn run<C: Catalog + ?Sized>(
    catalog: &C,
    config: &ExportConfig,
) -> Result<WrittenFile, ExportError> {
    let filter = config.compile_filter()?;
    let generated_at = Local::now().fixed_offset();
    let schema_version = config
        .schema_version
        .clone()
        .unwrap_or_else(|| generated_at.format("%Y-%m-%d").to_string());

    let document =
        export_schema(catalog, &config.database, &filter, schema_version, generated_at).await?;
    write_document(&document, &config.output_path())
}

/// Enumerate base tables, keep those matching `filter`, and assemble each in catalog order.
pub async fn export_schema<C: Catalog + ?Sized>(
    catalog: &C,
    database: &str,
    filter: &TableFilter,
    schema_version: String,
    generated_at: DateTime<FixedOffset>,
) -> Result<SchemaDocument, ExportError> {
    let all_tables = catalog
        .base_tables(database)
        .await
        .map_err(|e| ExportError::TableList {
            schema: database.to_string(),
            source: e,
        })?;

    let selected: Vec<&String> = all_tables
        .iter()
        .filter(|name| {
            let keep = filter.matches(name);
            if !keep {
                tracing::debug!("Skipping table {name}: does not match filter");
            }
            keep
        })
        .collect();

    tracing::info!(
        "Processing {} of {} tables with filter: {}",
        selected.len(),
        all_tables.len(),
        filter.as_str()
    );

    let mut tables = Vec::with_capacity(selected.len());
    for (i, name) in selected.iter().enumerate() {
        tracing::info!("[{}/{}] Processing table: {name}", i + 1, selected.len());
        tables.push(assemble_table(catalog, database, name).await?);
    }

    Ok(SchemaDocument {
        database: database.to_string(),
        generated_at,
        schema_version,
        tables,
    })
}

/// Pretty-printed JSON with a trailing newline.
pub fn render(document: &SchemaDocument) -> Result<String, ExportError> {
    let mut json = serde_json::to_string_pretty(document)?;
    json.push('\n');
    Ok(json)
}

/// Write `document` to `path`, creating parent directories and replacing any existing file.
pub fn write_document(document: &SchemaDocument, path: &Path) -> Result<WrittenFile, ExportError> {
    let json = render(document)?;

    if let Some(dir) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|e| ExportError::CreateDir {
            path: dir.to_path_buf(),
            source: e,
        })?;
    }
    fs::write(path, &json).map_err(|e| ExportError::Write {
        path: path.to_path_buf(),
        source: e,
    })?;

    tracing::info!("Output written to {}", path.display());

    Ok(WrittenFile {
        path: path.to_path_buf(),
        bytes: json.len() as u64,
        table_count: document.tables.len(),
    })
}
