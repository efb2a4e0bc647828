// Copyright 2025 LLM Leaderboard Contributors
// SPDX-License-Identifier: Apache-2.0

//! Flattening of raw result documents into [`CategoryResult`] records.
//!
//! Documents follow this loose shape:
//!
//! ```text
//! {
//!   "dataset_results": {
//!     "<dataset key>": {
//!       "results": [
//!         { "file": "...", "accuracy_mean": 0.8, "accuracy_std": 0.01,
//!           "individual_runs": { "accuracies": [0.79, 0.81] } }
//!       ]
//!     }
//!   }
//! }
//! ```
//!
//! Anything that does not fit is skipped, never reported as an error.

use crate::normalize::{apply_legacy_override, extract_category, normalize_dataset_key};
use crate::source::CategoryResult;
use serde_json::{Map, Value};
use tracing::trace;

/// Key holding the dataset mapping at the document root.
pub const DATASET_RESULTS_KEY: &str = "dataset_results";

/// A well-formed result entry with its normalized dataset name.
pub(crate) struct ResultEntry<'a> {
    pub dataset: String,
    pub file: &'a str,
    pub accuracy_mean: f64,
    pub raw: &'a Map<String, Value>,
}

/// Walk every well-formed result entry in document order.
pub(crate) fn result_entries(doc: &Value) -> Vec<ResultEntry<'_>> {
    let Some(datasets) = doc.get(DATASET_RESULTS_KEY).and_then(Value::as_object) else {
        return Vec::new();
    };

    let mut entries = Vec::new();
    for (key, value) in datasets {
        let Some(results) = value.get("results").and_then(Value::as_array) else {
            trace!(dataset = %key, "Skipping dataset without a results array");
            continue;
        };
        let dataset = normalize_dataset_key(key);

        for (index, item) in results.iter().enumerate() {
            let Some(raw) = item.as_object() else {
                trace!(dataset = %key, index, "Skipping non-object result entry");
                continue;
            };
            let file = raw.get("file").and_then(Value::as_str);
            let mean = raw.get("accuracy_mean").and_then(Value::as_f64);
            match (file, mean) {
                (Some(file), Some(accuracy_mean)) => entries.push(ResultEntry {
                    dataset: dataset.clone(),
                    file,
                    accuracy_mean,
                    raw,
                }),
                _ => trace!(dataset = %key, index, "Skipping malformed result entry"),
            }
        }
    }
    entries
}

/// Flatten a raw result document into category-scored records.
///
/// Output order follows the document: dataset keys first, then each
/// dataset's `results` array.
pub fn flatten_results(doc: &Value) -> Vec<CategoryResult> {
    result_entries(doc)
        .into_iter()
        .map(|entry| {
            let category = apply_legacy_override(&entry.dataset, extract_category(entry.file));
            CategoryResult {
                category: format!("{}/{}", entry.dataset, category),
                file: entry.file.to_string(),
                accuracy_mean: entry.accuracy_mean,
                accuracy_std: entry.raw.get("accuracy_std").and_then(Value::as_f64),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_dataset_results_is_empty() {
        assert!(flatten_results(&json!({})).is_empty());
        assert!(flatten_results(&json!({"other": 1})).is_empty());
        assert!(flatten_results(&json!([1, 2])).is_empty());
        assert!(flatten_results(&json!(null)).is_empty());
        assert!(flatten_results(&json!({"dataset_results": []})).is_empty());
    }

    #[test]
    fn test_flatten_composite_category() {
        let doc = json!({
            "dataset_results": {
                "datasets/cais__mmlu/": {
                    "results": [
                        {"file": "abstract_algebra_test.jsonl", "accuracy_mean": 0.45, "accuracy_std": 0.02},
                        {"file": "anatomy_test.jsonl", "accuracy_mean": 1.5}
                    ]
                }
            }
        });
        let results = flatten_results(&doc);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].category, "mmlu/abstract_algebra");
        assert_eq!(results[0].file, "abstract_algebra_test.jsonl");
        assert_eq!(results[0].accuracy_mean, 0.45);
        assert_eq!(results[0].accuracy_std, Some(0.02));
        assert_eq!(results[1].category, "mmlu/anatomy");
        // not clamped
        assert_eq!(results[1].accuracy_mean, 1.5);
        assert_eq!(results[1].accuracy_std, None);
    }

    #[test]
    fn test_legacy_override_applies() {
        let doc = json!({
            "dataset_results": {
                "datasets/lianghsun__tw-legal-benchmark-v1": {
                    "results": [{"file": "default.jsonl", "accuracy_mean": 0.6}]
                }
            }
        });
        let results = flatten_results(&doc);
        assert_eq!(results[0].category, "tw-legal-benchmark-v1/benchmark");
    }

    #[test]
    fn test_malformed_entries_are_skipped() {
        let doc = json!({
            "dataset_results": {
                "a": {"results": [
                    {"file": "ok.json", "accuracy_mean": 0.5},
                    {"file": "no_mean.json"},
                    {"accuracy_mean": 0.1},
                    {"file": 3, "accuracy_mean": 0.2},
                    {"file": "str_mean.json", "accuracy_mean": "0.3"},
                    "junk"
                ]},
                "b": {"results": "not an array"},
                "c": 42,
                "d": {"results": [{"file": "d_test.csv", "accuracy_mean": 1}]}
            }
        });
        let categories: Vec<_> = flatten_results(&doc)
            .into_iter()
            .map(|r| (r.category, r.accuracy_mean))
            .collect();
        assert_eq!(
            categories,
            vec![("a/ok".to_string(), 0.5), ("d/d".to_string(), 1.0)]
        );
    }

    #[test]
    fn test_order_follows_document_and_is_stable() {
        let doc = json!({
            "dataset_results": {
                "zeta": {"results": [{"file": "b.json", "accuracy_mean": 0.2}, {"file": "a.json", "accuracy_mean": 0.1}]},
                "alpha": {"results": [{"file": "c.json", "accuracy_mean": 0.3}]}
            }
        });
        let first = flatten_results(&doc);
        let names: Vec<_> = first.iter().map(|r| r.category.as_str()).collect();
        assert_eq!(names, vec!["zeta/b", "zeta/a", "alpha/c"]);
        assert_eq!(first, flatten_results(&doc));
    }
}
