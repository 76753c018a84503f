use anyhow::Context;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

use bankstat_import::CategoryRule;

/// Startup configuration, deserialized once from `config.json` and passed by
/// reference from there on. A missing or unparsable file is fatal.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(rename = "CATEGORIZATION_RULES", default)]
    pub categorization_rules: Vec<CategoryRule>,
    #[serde(rename = "IGNORE_FILES", default)]
    pub ignore_files: HashSet<String>,
    /// Endpoint the categorized rows are posted to. When unset, rows are only
    /// logged.
    #[serde(rename = "PUBLISH_URL", default)]
    pub publish_url: Option<String>,
    #[serde(rename = "ARCHIVE_DIR", default = "default_archive_dir")]
    pub archive_dir: String,
}

fn default_archive_dir() -> String {
    "Completed".to_string()
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Config> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config =
            serde_json::from_str(&data).with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }
}
