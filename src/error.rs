use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Missing required setting: {0} (use --{0} or the matching environment variable)")]
    MissingSetting(&'static str),

    #[error("Invalid regex pattern in table filter `{pattern}`: {source}")]
    InvalidFilter {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Could not read config file {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not parse config file {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Connection failed: {0}")]
    Connection(#[source] sqlx::Error),

    #[error("Failed to list base tables in `{schema}`: {source}")]
    TableList {
        schema: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("Failed to read {stage} of table `{table}`: {source}")]
    Query {
        table: String,
        stage: Stage,
        #[source]
        source: sqlx::Error,
    },

    #[error("JSON encoding failed: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to create output directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write output file {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The per-table metadata read that was in flight when a query failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Columns,
    Constraints,
    Indexes,
    ForeignKeys,
    TableStats,
    Ddl,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Stage::Columns => "columns",
            Stage::Constraints => "constraints",
            Stage::Indexes => "indexes",
            Stage::ForeignKeys => "foreign keys",
            Stage::TableStats => "table statistics",
            Stage::Ddl => "DDL",
        };
        f.write_str(label)
    }
}
