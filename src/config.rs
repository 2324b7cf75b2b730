use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::cli::Cli;
use crate::error::ExportError;
use crate::filter::{TableFilter, MATCH_ALL};

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";
pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 3306;
pub const DEFAULT_OUTPUT_DIR: &str = "./export";

/// The optional TOML config file layer.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub database: DatabaseSection,
    pub export: ExportSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    pub host: Option<String>,
    pub name: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ExportSection {
    pub output_dir: Option<PathBuf>,
    pub table_filter: Option<String>,
    pub schema_version: Option<String>,
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self, ExportError> {
        let content = std::fs::read_to_string(path).map_err(|e| ExportError::ConfigRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ExportError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Load `path` if it exists. A file that cannot be read or parsed is
    /// reported and ignored.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(file) => {
                tracing::debug!("Loaded config file {}", path.display());
                file
            }
            Err(e) => {
                tracing::warn!("{e}; ignoring it");
                Self::default()
            }
        }
    }
}

/// Fully resolved settings for one export run.
#[derive(Clone, PartialEq)]
pub struct ExportConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
    pub output_dir: PathBuf,
    pub table_filter: String,
    /// `None` means the export date is used.
    pub schema_version: Option<String>,
}

impl ExportConfig {
    /// Merge the layers: flags and environment (already folded together by clap),
    /// then the config file, then built-in defaults.
    pub fn resolve(cli: &Cli, file: ConfigFile) -> Self {
        let ConfigFile { database, export } = file;
        Self {
            host: cli
                .host
                .clone()
                .or(database.host)
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: cli.port.or(database.port).unwrap_or(DEFAULT_PORT),
            database: cli.database.clone().or(database.name).unwrap_or_default(),
            user: cli.user.clone().or(database.user).unwrap_or_default(),
            password: cli.password.clone().or(database.password).unwrap_or_default(),
            output_dir: cli
                .output
                .clone()
                .or(export.output_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            table_filter: cli
                .filter
                .clone()
                .or(export.table_filter)
                .unwrap_or_else(|| MATCH_ALL.to_string()),
            schema_version: cli.schema_version.clone().or(export.schema_version),
        }
    }

    /// Check everything that can be checked without touching the database.
    pub fn validate(&self) -> Result<(), ExportError> {
        if self.database.trim().is_empty() {
            return Err(ExportError::MissingSetting("database"));
        }
        if self.user.trim().is_empty() {
            return Err(ExportError::MissingSetting("user"));
        }
        self.compile_filter()?;
        Ok(())
    }

    pub fn compile_filter(&self) -> Result<TableFilter, ExportError> {
        TableFilter::new(&self.table_filter)
    }

    /// `<output_dir>/schema_<database>.json`
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(format!("schema_{}.json", self.database))
    }
}

impl fmt::Debug for ExportConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExportConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("output_dir", &self.output_dir)
            .field("table_filter", &self.table_filter)
            .field("schema_version", &self.schema_version)
            .finish()
    }
}
