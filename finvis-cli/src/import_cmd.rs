//! `finvis import`: read every statement concurrently, then merge the
//! successful ones into the ledger with a single replace.

use anyhow::{Context, Result};
use finvis_core::Ledger;
use finvis_ingest::{CsvParser, ParseReport};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinSet;

#[derive(Debug)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub result: Result<ParseReport>,
}

fn source_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

async fn read_one(parser: Arc<CsvParser>, path: PathBuf) -> FileOutcome {
    let result: Result<ParseReport> = async {
        let bytes = tokio::fs::read(&path)
            .await
            .with_context(|| format!("read {}", path.display()))?;
        let parser = parser.as_ref().clone().with_source(source_name(&path));
        parser.parse_bytes(&bytes)
    }
    .await;
    FileOutcome { path, result }
}

/// Read and parse all files concurrently. Outcomes come back in argument
/// order regardless of completion order.
pub async fn read_statements(parser: &CsvParser, paths: Vec<PathBuf>) -> Vec<FileOutcome> {
    let parser = Arc::new(parser.clone());
    let mut set = JoinSet::new();
    for (i, path) in paths.into_iter().enumerate() {
        let parser = Arc::clone(&parser);
        set.spawn(async move { (i, read_one(parser, path).await) });
    }

    let mut outcomes = Vec::new();
    while let Some(joined) = set.join_next().await {
        match joined {
            Ok(outcome) => outcomes.push(outcome),
            Err(e) => tracing::error!(error = %e, "import task failed"),
        }
    }
    outcomes.sort_by_key(|(i, _)| *i);
    outcomes.into_iter().map(|(_, o)| o).collect()
}

#[derive(Debug, Default, PartialEq)]
pub struct ImportSummary {
    pub files_ok: usize,
    pub files_failed: usize,
    pub imported: usize,
    pub skipped: usize,
    pub ambiguous_dates: usize,
}

impl ImportSummary {
    /// Nothing is saved, and the data mode is left alone, unless at least
    /// one row came in.
    pub fn changes_ledger(&self) -> bool {
        self.imported > 0
    }
}

/// Apply every successful outcome to `ledger` in one batch. Failed files are
/// reported and contribute nothing.
pub fn merge(ledger: &Ledger, outcomes: Vec<FileOutcome>) -> Result<(Ledger, ImportSummary)> {
    let mut summary = ImportSummary::default();
    let mut batch = Vec::new();

    for outcome in outcomes {
        match outcome.result {
            Ok(report) => {
                summary.files_ok += 1;
                summary.imported += report.transactions.len();
                summary.skipped += report.skipped.len();
                summary.ambiguous_dates += report.ambiguous_dates;
                println!(
                    "{}: {} imported, {} skipped",
                    outcome.path.display(),
                    report.transactions.len(),
                    report.skipped.len()
                );
                batch.extend(report.transactions);
            }
            Err(e) => {
                summary.files_failed += 1;
                tracing::warn!(file = %outcome.path.display(), error = %e, "import failed");
                eprintln!("{}: failed: {:#}", outcome.path.display(), e);
            }
        }
    }

    let merged = ledger.with_transactions(batch)?;
    Ok((merged, summary))
}
