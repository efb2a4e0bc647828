//! I/O operations for result files and report outputs.
//!
//! This module loads `.json` and `.jsonl` result files into
//! [`DataSource`] values and writes the report outputs to disk.

use crate::error::{Error, Result};
use crate::export::write_pivot_csv;
use crate::markdown;
use crate::result::Report;
use chrono::Utc;
use llm_leaderboard_core::flatten::DATASET_RESULTS_KEY;
use llm_leaderboard_core::DataSource;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Pivot table CSV file name.
pub const PIVOT_CSV_FILE: &str = "pivot.csv";

/// Pivot table JSON file name.
pub const PIVOT_JSON_FILE: &str = "pivot.json";

/// Rankings JSON file name.
pub const RANKINGS_FILE: &str = "rankings.json";

/// Run statistics JSON file name.
pub const RUNS_FILE: &str = "runs.json";

/// Summary file name.
pub const SUMMARY_FILE: &str = "summary.md";

/// Provider used when a result file names none.
pub const UNKNOWN_PROVIDER: &str = "unknown";

/// Whether a path looks like a result file.
pub fn is_result_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("json") | Some("jsonl")
    )
}

/// Read and parse a result document.
///
/// `.jsonl` files are merged line by line with [`merge_jsonl`]; anything
/// else is parsed as a single JSON value.
pub fn read_document(path: impl AsRef<Path>) -> Result<Value> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;

    if path.extension().and_then(|e| e.to_str()) == Some("jsonl") {
        merge_jsonl(&content, path)
    } else {
        serde_json::from_str(&content).map_err(|source| Error::Json {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Merge line-delimited records into one document.
///
/// `dataset_results` entries accumulate across lines, concatenating the
/// `results` arrays of repeated dataset keys. Other top-level fields keep
/// the first value seen. Blank lines are ignored; non-object lines are
/// skipped.
pub fn merge_jsonl(content: &str, path: &Path) -> Result<Value> {
    let mut merged = Map::new();
    let mut datasets = Map::new();
    let mut has_datasets = false;

    for (index, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let value: Value = serde_json::from_str(line).map_err(|source| Error::JsonLine {
            path: path.to_path_buf(),
            line: index + 1,
            source,
        })?;
        let Value::Object(record) = value else {
            warn!(path = %path.display(), line = index + 1, "Skipping non-object JSONL record");
            continue;
        };

        for (key, value) in record {
            if key == DATASET_RESULTS_KEY {
                if let Value::Object(entries) = value {
                    has_datasets = true;
                    for (dataset, entry) in entries {
                        merge_dataset(&mut datasets, dataset, entry);
                    }
                }
            } else if !merged.contains_key(&key) {
                merged.insert(key, value);
            }
        }
    }

    if has_datasets {
        merged.insert(DATASET_RESULTS_KEY.to_string(), Value::Object(datasets));
    }
    Ok(Value::Object(merged))
}

fn merge_dataset(datasets: &mut Map<String, Value>, key: String, entry: Value) {
    let incoming = entry.get("results").and_then(Value::as_array).cloned();

    if let Some(existing) = datasets.get_mut(&key) {
        let Some(mut more) = incoming else {
            return;
        };
        match existing.get_mut("results").and_then(Value::as_array_mut) {
            Some(results) => results.append(&mut more),
            None => *existing = entry,
        }
    } else {
        datasets.insert(key, entry);
    }
}

/// Load a result file as a source, inferring metadata from its content.
///
/// The model name comes from `config.model.name`, then `model`, then the
/// file stem; the provider from `config.model.provider`, then `provider`;
/// the timestamp from `timestamp`, else the current time.
pub fn load_source(path: impl AsRef<Path>) -> Result<DataSource> {
    let path = path.as_ref();
    let doc = read_document(path)?;

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let model_name = string_at(&doc, &["/config/model/name", "/model"]).unwrap_or(stem);
    let provider = string_at(&doc, &["/config/model/provider", "/provider"])
        .unwrap_or_else(|| UNKNOWN_PROVIDER.to_string());
    let timestamp = string_at(&doc, &["/timestamp"]).unwrap_or_else(|| Utc::now().to_rfc3339());

    let source = DataSource::builder()
        .provider(provider)
        .model_name(model_name)
        .timestamp(timestamp)
        .raw_data(doc)
        .build()?;
    info!(path = %path.display(), model = %source.model_name, "Loaded result file");
    Ok(source)
}

/// First non-empty string found at any of the JSON pointers.
pub fn string_at(doc: &Value, pointers: &[&str]) -> Option<String> {
    pointers
        .iter()
        .filter_map(|p| doc.pointer(p).and_then(Value::as_str))
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

/// Write any serializable value as pretty JSON.
pub fn write_json<T: Serialize + ?Sized>(value: &T, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).map_err(|e| Error::io(path, e))
}

/// Write all report outputs (CSV, JSON and markdown summary) into `dir`.
///
/// Returns the paths written.
pub fn write_all_outputs(report: &Report, dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
    let mut written = Vec::new();

    let csv_path = dir.join(PIVOT_CSV_FILE);
    let file = fs::File::create(&csv_path).map_err(|e| Error::io(&csv_path, e))?;
    write_pivot_csv(&report.pivot, report.options.scale, file)?;
    written.push(csv_path);

    let pivot_path = dir.join(PIVOT_JSON_FILE);
    write_json(&report.pivot, &pivot_path)?;
    written.push(pivot_path);

    let rankings_path = dir.join(RANKINGS_FILE);
    write_json(&report.rankings, &rankings_path)?;
    written.push(rankings_path);

    let runs_path = dir.join(RUNS_FILE);
    write_json(&report.runs, &runs_path)?;
    written.push(runs_path);

    let summary_path = dir.join(SUMMARY_FILE);
    let summary = markdown::generate_summary(report);
    fs::write(&summary_path, summary).map_err(|e| Error::io(&summary_path, e))?;
    written.push(summary_path);

    for path in &written {
        debug!(path = %path.display(), "Wrote report output");
    }
    info!(dir = %dir.display(), files = written.len(), "Report outputs written");
    Ok(written)
}
