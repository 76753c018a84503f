use anyhow::Context;
use std::fs::File;
use std::path::Path;

use bankstat_core::{FiscalYear, StatementName};
use bankstat_import::{read_statement, RuleEngine};

use crate::publish::RowPublisher;
use crate::run::StatementHandler;

/// Production handler: parse the statement, categorize every row, publish,
/// then archive the file under `<archive_root>/<year>/Entered_<filename>`.
/// Any failure leaves the file where it was.
pub struct FileHandler {
    engine: RuleEngine,
    publisher: Box<dyn RowPublisher>,
    archive_root: std::path::PathBuf,
}

impl FileHandler {
    pub fn new(
        engine: RuleEngine,
        publisher: Box<dyn RowPublisher>,
        archive_root: impl Into<std::path::PathBuf>,
    ) -> Self {
        Self {
            engine,
            publisher,
            archive_root: archive_root.into(),
        }
    }
}

impl StatementHandler for FileHandler {
    fn handle(&self, path: &Path, name: &StatementName, year: FiscalYear) -> anyhow::Result<()> {
        let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
        let raw = read_statement(file).with_context(|| format!("reading {}", path.display()))?;
        let rows: Vec<_> = raw.iter().map(|r| self.engine.categorize_record(r)).collect();

        tracing::info!(
            month = %name.month,
            rows = rows.len(),
            "publishing categorized statement"
        );
        self.publisher.publish(name.month, year, &rows)?;

        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .context("statement path has no filename")?;
        let dest_dir = self.archive_root.join(year.year().to_string());
        std::fs::create_dir_all(&dest_dir)
            .with_context(|| format!("creating archive dir {}", dest_dir.display()))?;
        let dest = dest_dir.join(format!("Entered_{filename}"));
        std::fs::rename(path, &dest)
            .with_context(|| format!("archiving {} to {}", path.display(), dest.display()))?;
        Ok(())
    }
}
