// Copyright 2025 LLM Leaderboard Contributors
// SPDX-License-Identifier: Apache-2.0

//! Per-file run statistics for chart error bars.

use crate::flatten::result_entries;
use crate::source::DataSource;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Spread of one test across repeated runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunStats {
    /// Original result file path.
    pub file: String,
    /// Reported mean accuracy.
    pub mean: f64,
    /// Reported standard deviation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub std: Option<f64>,
    /// Lowest run accuracy (the mean when no runs are listed).
    pub min: f64,
    /// Highest run accuracy (the mean when no runs are listed).
    pub max: f64,
    /// Number of individual runs found.
    pub runs: usize,
}

/// Run statistics of one source, keyed by result file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceRunStats {
    /// Source label as used by the pivot table.
    pub label: String,
    /// Statistics per result file, in document order.
    pub files: IndexMap<String, RunStats>,
}

/// Collect run statistics for each source, skipping sources with none.
pub fn collect_run_stats(sources: &[DataSource]) -> Vec<SourceRunStats> {
    sources
        .iter()
        .filter_map(|source| {
            let files = extract_run_stats(&source.raw_data);
            (!files.is_empty()).then(|| SourceRunStats {
                label: source.label(),
                files,
            })
        })
        .collect()
}

/// Collect run statistics for every well-formed result entry, keyed by the
/// entry's `file` exactly as written in the document.
pub fn extract_run_stats(doc: &Value) -> IndexMap<String, RunStats> {
    result_entries(doc)
        .into_iter()
        .map(|entry| {
            let accuracies: Vec<f64> = entry
                .raw
                .get("individual_runs")
                .and_then(|runs| runs.get("accuracies"))
                .and_then(Value::as_array)
                .map(|values| values.iter().filter_map(Value::as_f64).collect())
                .unwrap_or_default();

            let (min, max) = if accuracies.is_empty() {
                (entry.accuracy_mean, entry.accuracy_mean)
            } else {
                (
                    accuracies.iter().copied().fold(f64::INFINITY, f64::min),
                    accuracies.iter().copied().fold(f64::NEG_INFINITY, f64::max),
                )
            };

            let stats = RunStats {
                file: entry.file.to_string(),
                mean: entry.accuracy_mean,
                std: entry.raw.get("accuracy_std").and_then(Value::as_f64),
                min,
                max,
                runs: accuracies.len(),
            };
            (stats.file.clone(), stats)
        })
        .collect()
}
