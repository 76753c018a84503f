use anyhow::Context;
use chrono::Datelike;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod config;
mod handler;
mod publish;
mod run;

use config::Config;
use handler::FileHandler;
use publish::{HttpPublisher, NullPublisher, RowPublisher};

#[derive(Parser, Debug)]
#[command(
    name = "bankstat",
    version,
    about = "Categorize monthly bank statements and publish them to a spreadsheet"
)]
struct Cli {
    /// Directory scanned for statement files
    #[arg(long, default_value = ".")]
    dir: PathBuf,

    /// Path to the JSON configuration
    #[arg(long, default_value = "config.json")]
    config: PathBuf,

    /// Path to the processed-file log
    #[arg(long, default_value = "processed_files.json")]
    log: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;

    let engine = bankstat_import::RuleEngine::new(config.categorization_rules.clone());
    if engine.is_empty() {
        tracing::warn!("no usable categorization rules; original categories will pass through");
    }

    let publisher: Box<dyn RowPublisher> = match &config.publish_url {
        Some(url) => Box::new(HttpPublisher::new(url.clone())),
        None => Box::new(NullPublisher),
    };
    let handler = FileHandler::new(engine, publisher, cli.dir.join(&config.archive_dir));
    let log = bankstat_store::JsonFileLog::new(&cli.log);

    let files = list_candidates(&cli.dir)?;
    if files.is_empty() {
        tracing::info!(dir = %cli.dir.display(), "no candidate files found in the directory");
    }

    let current_year = chrono::Local::now().year();
    let outcome = run::run_scan(&files, &config.ignore_files, &log, &handler, current_year)?;

    if !outcome.any_processed() {
        tracing::info!("no valid file was processed");
    }
    Ok(())
}

/// Regular files in the scan directory, in whatever order the filesystem
/// lists them. No ordering is guaranteed across runs.
fn list_candidates(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).with_context(|| format!("listing {}", dir.display()))? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            files.push(entry.path());
        }
    }
    Ok(files)
}
