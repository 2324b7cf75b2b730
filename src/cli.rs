use std::path::{Path, PathBuf};

use clap::Parser;

use crate::config::{ConfigFile, DEFAULT_CONFIG_PATH};
use crate::error::ExportError;

/// Export a MySQL or MariaDB schema to JSON.
///
/// Writes columns, primary keys, unique constraints, indexes, foreign keys,
/// table statistics and CREATE TABLE statements for every base table to
/// `<output>/schema_<database>.json`.
///
/// Settings are taken from flags first, then environment variables, then the
/// config file, then built-in defaults.
#[derive(Parser, Debug, Default)]
#[command(
    name = "schema-export",
    version,
    about,
    after_help = "Examples:\n  schema-export --database mydb --user root\n  schema-export --db mydb --user root --filter '^user_'\n  DB_NAME=mydb DB_USER=root schema-export"
)]
pub struct Cli {
    /// Database host [default: localhost]
    #[arg(long, env = "DB_HOST")]
    pub host: Option<String>,

    /// Database name (required)
    #[arg(long, visible_alias = "db", env = "DB_NAME")]
    pub database: Option<String>,

    /// Database user (required)
    #[arg(long, env = "DB_USER")]
    pub user: Option<String>,

    /// Database password
    #[arg(long, env = "DB_PASS", hide_env_values = true)]
    pub password: Option<String>,

    /// Database port [default: 3306]
    #[arg(long, env = "DB_PORT")]
    pub port: Option<u16>,

    /// Output directory [default: ./export]
    #[arg(long, env = "OUTPUT_DIR")]
    pub output: Option<PathBuf>,

    /// Table name filter regex [default: .* for all tables]
    #[arg(long, env = "TABLE_NAME_REGEXP")]
    pub filter: Option<String>,

    /// Schema version recorded in the document [default: today's date]
    #[arg(long, env = "SCHEMA_VERSION")]
    pub schema_version: Option<String>,

    /// TOML config file [default: config.toml, if present]
    #[arg(long, env = "SCHEMA_EXPORT_CONFIG")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Load the config file layer.
    ///
    /// An explicitly named file must load; the default one is optional.
    pub fn config_file(&self) -> Result<ConfigFile, ExportError> {
        match self.config {
            Some(ref path) => ConfigFile::load(path),
            None => Ok(ConfigFile::load_or_default(Path::new(DEFAULT_CONFIG_PATH))),
        }
    }
}
