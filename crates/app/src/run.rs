use std::collections::HashSet;
use std::path::{Path, PathBuf};

use bankstat_core::{FiscalYear, StatementName};
use bankstat_store::{ProcessedLog, StoreError};

/// Per-file handling routine the orchestrator delegates to once a candidate
/// has cleared every skip check.
pub trait StatementHandler {
    fn handle(&self, path: &Path, name: &StatementName, year: FiscalYear) -> anyhow::Result<()>;
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ScanOutcome {
    pub processed: usize,
    pub skipped: usize,
}

impl ScanOutcome {
    pub fn any_processed(&self) -> bool {
        self.processed > 0
    }
}

/// Walks the candidate files in listing order and decides, per file, whether
/// to process or skip. A failure while handling one file never aborts the
/// batch; only a broken processed log does.
pub fn run_scan(
    files: &[PathBuf],
    ignore: &HashSet<String>,
    log: &dyn ProcessedLog,
    handler: &dyn StatementHandler,
    current_year: i32,
) -> Result<ScanOutcome, StoreError> {
    let mut outcome = ScanOutcome::default();

    for path in files {
        let Some(filename) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };

        if ignore.contains(filename) {
            tracing::debug!(file = filename, "skipping: in ignore list");
            outcome.skipped += 1;
            continue;
        }

        let Some(name) = StatementName::parse(filename) else {
            tracing::warn!(file = filename, "skipping: invalid statement name");
            outcome.skipped += 1;
            continue;
        };

        // Reload with this file as the upcoming one so the january rollover
        // is evaluated per candidate, not once per run.
        let processed = log.load(Some(filename))?;
        if processed.contains(filename) {
            tracing::info!(file = filename, "skipping: already processed");
            outcome.skipped += 1;
            continue;
        }

        let year = FiscalYear::for_statement(name.month, current_year);
        match handler.handle(path, &name, year) {
            Ok(()) => {
                log.record(filename)?;
                outcome.processed += 1;
            }
            Err(err) => {
                tracing::error!(file = filename, error = %format!("{err:#}"), "error processing statement");
            }
        }
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bankstat_core::Month;
    use bankstat_store::MemoryLog;
    use std::sync::Mutex;

    /// Records what it was asked to handle; fails for filenames in `fail_on`.
    #[derive(Default)]
    struct FakeHandler {
        handled: Mutex<Vec<(String, Month, i32)>>,
        fail_on: HashSet<String>,
    }

    impl FakeHandler {
        fn failing_on(names: &[&str]) -> Self {
            Self {
                fail_on: names.iter().map(|s| s.to_string()).collect(),
                ..Self::default()
            }
        }

        fn handled_names(&self) -> Vec<String> {
            self.handled
                .lock()
                .unwrap()
                .iter()
                .map(|(n, _, _)| n.clone())
                .collect()
        }
    }

    impl StatementHandler for FakeHandler {
        fn handle(
            &self,
            path: &Path,
            name: &StatementName,
            year: FiscalYear,
        ) -> anyhow::Result<()> {
            let filename = path.file_name().unwrap().to_str().unwrap().to_string();
            if self.fail_on.contains(&filename) {
                anyhow::bail!("simulated handling failure");
            }
            self.handled
                .lock()
                .unwrap()
                .push((filename, name.month, year.year()));
            Ok(())
        }
    }

    fn paths(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(PathBuf::from).collect()
    }

    fn full_year() -> Vec<String> {
        Month::ALL
            .iter()
            .map(|m| format!("BP_{}.csv", m.name()))
            .collect()
    }

    #[test]
    fn processes_valid_files_and_records_them() {
        let log = MemoryLog::new();
        let handler = FakeHandler::default();
        let outcome = run_scan(
            &paths(&["BP_january.csv", "BP_february.csv"]),
            &HashSet::new(),
            &log,
            &handler,
            2024,
        )
        .unwrap();
        assert_eq!(outcome.processed, 2);
        assert!(outcome.any_processed());
        let recorded = log.load(None).unwrap();
        assert!(recorded.contains("BP_january.csv"));
        assert!(recorded.contains("BP_february.csv"));
    }

    #[test]
    fn ignore_list_is_checked_before_anything_else() {
        let log = MemoryLog::new();
        let handler = FakeHandler::default();
        let ignore: HashSet<String> = ["BP_january.csv".to_string()].into();
        let outcome = run_scan(&paths(&["BP_january.csv"]), &ignore, &log, &handler, 2024).unwrap();
        assert_eq!(outcome.processed, 0);
        assert_eq!(outcome.skipped, 1);
        assert!(handler.handled_names().is_empty());
    }

    #[test]
    fn invalid_names_are_skipped_not_fatal() {
        let log = MemoryLog::new();
        let handler = FakeHandler::default();
        let outcome = run_scan(
            &paths(&["report.csv", "BP_march.csv"]),
            &HashSet::new(),
            &log,
            &handler,
            2024,
        )
        .unwrap();
        assert_eq!(outcome.processed, 1);
        assert_eq!(outcome.skipped, 1);
        assert_eq!(handler.handled_names(), vec!["BP_march.csv"]);
    }

    #[test]
    fn already_processed_files_are_skipped() {
        let log = MemoryLog::with_entries(["BP_march.csv".to_string()]);
        let handler = FakeHandler::default();
        let outcome = run_scan(&paths(&["BP_march.csv"]), &HashSet::new(), &log, &handler, 2024)
            .unwrap();
        assert_eq!(outcome.processed, 0);
        assert!(!outcome.any_processed());
        assert!(handler.handled_names().is_empty());
    }

    #[test]
    fn one_failing_file_does_not_abort_the_batch() {
        let log = MemoryLog::new();
        let handler = FakeHandler::failing_on(&["BP_february.csv"]);
        let outcome = run_scan(
            &paths(&["BP_january.csv", "BP_february.csv", "BP_march.csv"]),
            &HashSet::new(),
            &log,
            &handler,
            2024,
        )
        .unwrap();
        assert_eq!(outcome.processed, 2);
        let recorded = log.load(None).unwrap();
        // The failed file stays unrecorded so the next run retries it.
        assert!(!recorded.contains("BP_february.csv"));
        assert!(recorded.contains("BP_march.csv"));
    }

    #[test]
    fn december_is_attributed_to_the_prior_year() {
        let log = MemoryLog::new();
        let handler = FakeHandler::default();
        run_scan(
            &paths(&["BP_december.csv", "BP_april.csv"]),
            &HashSet::new(),
            &log,
            &handler,
            2025,
        )
        .unwrap();
        let handled = handler.handled.lock().unwrap();
        assert_eq!(handled[0], ("BP_december.csv".to_string(), Month::December, 2024));
        assert_eq!(handled[1], ("BP_april.csv".to_string(), Month::April, 2025));
    }

    #[test]
    fn january_after_a_full_year_triggers_rollover_and_is_processed() {
        let log = MemoryLog::with_entries(full_year());
        let handler = FakeHandler::default();
        let outcome = run_scan(
            &paths(&["BP_january.csv"]),
            &HashSet::new(),
            &log,
            &handler,
            2025,
        )
        .unwrap();
        assert_eq!(outcome.processed, 1);
        let recorded = log.load(None).unwrap();
        assert_eq!(recorded.len(), 1);
        assert!(recorded.contains("BP_january.csv"));
    }

    #[test]
    fn rollover_is_sensitive_to_listing_order() {
        // A leftover march file from the prior year, listed after the new
        // january file, is re-processed because the rollover already cleared
        // it from the log. Listed before january, it is skipped. The per-file
        // rollover re-check makes directory order observable; both orders are
        // pinned here.
        let handler = FakeHandler::default();

        let log = MemoryLog::with_entries(full_year());
        run_scan(
            &paths(&["BP_january.csv", "BP_march.csv"]),
            &HashSet::new(),
            &log,
            &handler,
            2025,
        )
        .unwrap();
        assert_eq!(handler.handled_names(), vec!["BP_january.csv", "BP_march.csv"]);

        let handler = FakeHandler::default();
        let log = MemoryLog::with_entries(full_year());
        run_scan(
            &paths(&["BP_march.csv", "BP_january.csv"]),
            &HashSet::new(),
            &log,
            &handler,
            2025,
        )
        .unwrap();
        assert_eq!(handler.handled_names(), vec!["BP_january.csv"]);
    }
}
