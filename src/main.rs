mod assemble;
mod cli;
mod config;
mod error;
mod export;
mod filter;
mod group;
mod introspect;
mod schema;
#[cfg(test)]
mod testutil;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::config::ExportConfig;
use crate::introspect::mysql::MySqlCatalog;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = ExportConfig::resolve(&cli, cli.config_file()?);
    config.validate()?;

    tracing::debug!("Connecting to database...");
    let catalog = MySqlCatalog::connect(&config).await?;
    tracing::info!("Connected to database: {}@{}", config.database, config.host);

    let result = export::run(&catalog, &config).await;
    catalog.close().await;
    let written = result?;

    println!("Export complete: {}", written.path.display());
    println!(
        "Exported {} tables, {:.1} KB",
        written.table_count,
        written.bytes as f64 / 1024.0
    );

    Ok(())
}
