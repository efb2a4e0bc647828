//! Result file loading and report output for LLM Leaderboard.
//!
//! This crate connects the pure pipeline in `llm-leaderboard-core` to the
//! filesystem: it loads result files into sources and writes the aggregate
//! views as CSV, JSON and markdown.
//!
//! # Quick Start
//!
//! ```no_run
//! use llm_leaderboard_report::{io, Report, ReportOptions};
//!
//! let source = io::load_source("results/gpt-4o.json")?;
//! let report = Report::build(&[source], ReportOptions::default());
//! io::write_all_outputs(&report, "leaderboard/output")?;
//! # Ok::<(), llm_leaderboard_report::Error>(())
//! ```
//!
//! # Modules
//!
//! - [`result`] - The [`Report`] struct and its options
//! - [`io`] - Reading result files and writing outputs
//! - [`export`] - CSV export of the pivot table
//! - [`markdown`] - Markdown report generation

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod error;
pub mod export;
pub mod io;
pub mod markdown;
pub mod result;

pub use error::{Error, Result};
pub use export::ScoreScale;
pub use result::{Report, ReportOptions};

use llm_leaderboard_core::DataSource;
use std::path::{Path, PathBuf};

/// Load every given result file as a source.
///
/// Fails on the first file that cannot be read or parsed.
pub fn load_sources<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<DataSource>> {
    paths.iter().map(io::load_source).collect()
}

/// Build a report and write all outputs into `dir`.
///
/// This writes:
/// - `pivot.csv` - Pivot table, scaled per the options
/// - `pivot.json` - Pivot table rows
/// - `rankings.json` - Per-benchmark leaderboards
/// - `runs.json` - Per-file run spread
/// - `summary.md` - Markdown summary
///
/// # Errors
///
/// Returns an error if writing any output file fails.
pub fn build_and_write_all(
    sources: &[DataSource],
    options: ReportOptions,
    dir: impl AsRef<Path>,
) -> Result<(Report, Vec<PathBuf>)> {
    let report = Report::build(sources, options);
    let written = io::write_all_outputs(&report, dir)?;
    Ok((report, written))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_load_sources_fails_on_missing_file() {
        let err = load_sources(&["/definitely/not/here.json"]).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_build_and_write_all() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(
            &path,
            json!({"dataset_results": {"mmlu": {"results": [{"file": "a.json", "accuracy_mean": 0.4}]}}})
                .to_string(),
        )
        .unwrap();

        let sources = load_sources(&[&path]).unwrap();
        let (report, written) =
            build_and_write_all(&sources, ReportOptions::default(), dir.path().join("out")).unwrap();
        assert_eq!(report.source_count, 1);
        assert_eq!(report.rankings[0].rows[0].model_name, "model");
        assert_eq!(written.len(), 5);
    }
}
