use anyhow::{bail, Context};

use bankstat_core::{CategorizedRecord, FiscalYear, Month};

/// The spreadsheet boundary. The core only depends on this contract; the
/// storage technology behind it and any retry policy are the collaborator's
/// problem.
pub trait RowPublisher {
    fn publish(
        &self,
        month: Month,
        year: FiscalYear,
        rows: &[CategorizedRecord],
    ) -> anyhow::Result<()>;
}

/// Posts the categorized rows as one JSON document to the configured
/// endpoint. Blocking on purpose: files are handled strictly one at a time.
pub struct HttpPublisher {
    client: reqwest::blocking::Client,
    url: String,
}

impl HttpPublisher {
    pub fn new(url: String) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            url,
        }
    }
}

impl RowPublisher for HttpPublisher {
    fn publish(
        &self,
        month: Month,
        year: FiscalYear,
        rows: &[CategorizedRecord],
    ) -> anyhow::Result<()> {
        let body = serde_json::json!({
            "sheet": month.name(),
            "year": year.year(),
            "rows": rows,
        });
        let response = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .with_context(|| format!("posting {} rows to {}", rows.len(), self.url))?;
        if !response.status().is_success() {
            bail!("publish endpoint returned {}", response.status());
        }
        tracing::info!(month = %month, rows = rows.len(), "uploaded statement rows");
        Ok(())
    }
}

/// Used when no endpoint is configured: categorization and archiving still
/// run, the rows are only logged.
pub struct NullPublisher;

impl RowPublisher for NullPublisher {
    fn publish(
        &self,
        month: Month,
        year: FiscalYear,
        rows: &[CategorizedRecord],
    ) -> anyhow::Result<()> {
        tracing::info!(
            month = %month,
            year = year.year(),
            rows = rows.len(),
            "no publish endpoint configured; rows not uploaded"
        );
        Ok(())
    }
}
