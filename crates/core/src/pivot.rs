// Copyright 2025 LLM Leaderboard Contributors
// SPDX-License-Identifier: Apache-2.0

//! Category × source pivot table.

use crate::flatten::flatten_results;
use crate::source::DataSource;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One pivot row: a category path and a score per source label.
///
/// Absent cells mean "no data" and are never filled with zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PivotRow {
    /// Category path, e.g. `"mmlu/anatomy"`.
    pub category: String,
    /// Score per source label, in first-write order.
    #[serde(flatten)]
    pub cells: IndexMap<String, f64>,
}

impl PivotRow {
    /// Score for a source label, if present.
    pub fn get(&self, label: &str) -> Option<f64> {
        self.cells.get(label).copied()
    }
}

/// Build the pivot table over all sources.
///
/// Rows appear in first-seen order across sources. Two sources sharing a
/// label overwrite each other cell by cell; the later source wins.
pub fn build_pivot(sources: &[DataSource]) -> Vec<PivotRow> {
    let mut rows: IndexMap<String, IndexMap<String, f64>> = IndexMap::new();

    for source in sources {
        let label = source.label();
        let results = flatten_results(&source.raw_data);
        debug!(source = %source.id, label = %label, results = results.len(), "Adding source to pivot");

        for result in results {
            rows.entry(result.category)
                .or_default()
                .insert(label.clone(), result.accuracy_mean);
        }
    }

    rows.into_iter()
        .map(|(category, cells)| PivotRow { category, cells })
        .collect()
}

/// Distinct source labels across all rows, in first-seen order.
pub fn pivot_labels(rows: &[PivotRow]) -> Vec<String> {
    let mut labels: IndexMap<&str, ()> = IndexMap::new();
    for row in rows {
        for label in row.cells.keys() {
            labels.insert(label.as_str(), ());
        }
    }
    labels.into_keys().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn source(id: &str, model: &str, doc: serde_json::Value) -> DataSource {
        DataSource::builder()
            .id(id)
            .provider("test")
            .model_name(model)
            .timestamp("2025-01-01")
            .raw_data(doc)
            .build()
            .unwrap()
    }

    fn doc(entries: &[(&str, f64)]) -> serde_json::Value {
        let results: Vec<_> = entries
            .iter()
            .map(|(file, mean)| json!({"file": file, "accuracy_mean": mean}))
            .collect();
        json!({"dataset_results": {"mmlu": {"results": results}}})
    }

    #[test]
    fn test_pivot_sparse_rows() {
        let a = source("a", "alpha", doc(&[("x.json", 0.1), ("y.json", 0.2)]));
        let b = source("b", "beta", doc(&[("y.json", 0.3), ("z.json", 0.4)]));
        let rows = build_pivot(&[a, b]);

        let categories: Vec<_> = rows.iter().map(|r| r.category.as_str()).collect();
        assert_eq!(categories, vec!["mmlu/x", "mmlu/y", "mmlu/z"]);
        assert_eq!(rows[0].get("alpha @ 2025-01-01"), Some(0.1));
        assert_eq!(rows[0].get("beta @ 2025-01-01"), None);
        assert_eq!(rows[1].cells.len(), 2);
        assert_eq!(rows[1].get("beta @ 2025-01-01"), Some(0.3));
    }

    #[test]
    fn test_pivot_label_collision_last_write_wins() {
        let a = source("a", "same", doc(&[("x.json", 0.1)]));
        let b = source("b", "same", doc(&[("x.json", 0.9)]));
        let rows = build_pivot(&[a, b]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].cells.len(), 1);
        assert_eq!(rows[0].get("same @ 2025-01-01"), Some(0.9));
    }

    #[test]
    fn test_pivot_serializes_flat() {
        let a = source("a", "alpha", doc(&[("x.json", 0.5)]));
        let rows = build_pivot(&[a]);
        let json = serde_json::to_value(&rows[0]).unwrap();
        assert_eq!(json, json!({"category": "mmlu/x", "alpha @ 2025-01-01": 0.5}));
    }

    #[test]
    fn test_pivot_labels_first_seen() {
        let a = source("a", "alpha", doc(&[("x.json", 0.1)]));
        let b = source("b", "beta", doc(&[("x.json", 0.2), ("y.json", 0.3)]));
        let rows = build_pivot(&[a, b]);
        assert_eq!(
            pivot_labels(&rows),
            vec!["alpha @ 2025-01-01".to_string(), "beta @ 2025-01-01".to_string()]
        );
    }
}
