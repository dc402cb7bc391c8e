//! Batch processing of discovered reports.
//!
//! Reports are handled strictly one after another. A report that cannot be
//! loaded or analyzed is logged and skipped; it never stops the batch. After
//! each successful report the caller's handler decides whether to go on.

use crate::analysis::{analyze, AnalysisSettings, ReportAnalysis};
use crate::enclosing_circle::CircleError;
use crate::report_data::{load_report, ReportError};
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{error, info};

/// Why a single report was skipped.
#[derive(Error, Debug)]
pub enum ProcessError {
    #[error(transparent)]
    Report(#[from] ReportError),

    #[error("{path}: {source}")]
    Fit {
        path: PathBuf,
        #[source]
        source: CircleError,
    },
}

/// Counts for a finished batch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Reports analyzed and handed to the handler
    pub processed: usize,
    /// Reports skipped because of an error
    pub failed: usize,
    /// The handler stopped the batch early
    pub cancelled: bool,
}

/// Load and analyze one report file.
pub fn process_report(
    path: &Path,
    settings: &AnalysisSettings,
) -> Result<ReportAnalysis, ProcessError> {
    let report = load_report(path)?;
    analyze(&report, settings).map_err(|source| ProcessError::Fit {
        path: path.to_path_buf(),
        source,
    })
}

/// Process `paths` in order, calling `handler` for each analyzed report.
///
/// The handler returns [`ControlFlow::Break`] to cancel the remaining reports.
pub fn run_batch<I, F>(paths: I, settings: &AnalysisSettings, mut handler: F) -> BatchSummary
where
    I: IntoIterator<Item = PathBuf>,
    F: FnMut(&Path, &ReportAnalysis) -> ControlFlow<()>,
{
    let mut summary = BatchSummary::default();

    for path in paths {
        info!("Processing {}", path.display());

        let analysis = match process_report(&path, settings) {
            Ok(analysis) => analysis,
            Err(e) => {
                error!("Skipping report: {}", e);
                summary.failed += 1;
                continue;
            }
        };
        summary.processed += 1;

        if handler(&path, &analysis).is_break() {
            info!("Batch cancelled after {}", path.display());
            summary.cancelled = true;
            break;
        }
    }

    info!(
        processed = summary.processed,
        failed = summary.failed,
        cancelled = summary.cancelled,
        "Batch finished"
    );
    summary
}
