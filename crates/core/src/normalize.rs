// Copyright 2025 LLM Leaderboard Contributors
// SPDX-License-Identifier: Apache-2.0

//! Dataset key and test filename normalization.

use once_cell::sync::Lazy;
use regex::Regex;

static TEST_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"_test\.(jsonl|json|csv|parquet)$").expect("valid regex"));

static BARE_EXTENSION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.(jsonl|json|csv|parquet)$").expect("valid regex"));

/// Category renames for data sources whose test files are generically named.
///
/// Entries are `(dataset, category, replacement)`; both the dataset and the
/// category must match exactly.
pub const LEGACY_CATEGORY_OVERRIDES: &[(&str, &str, &str)] =
    &[("tw-legal-benchmark-v1", "default", "benchmark")];

/// Canonicalize a raw dataset key into a short dataset name.
///
/// Trailing slashes are dropped, then the last path segment is kept, then
/// any `author__` prefix is removed.
///
/// ```
/// use llm_leaderboard_core::normalize::normalize_dataset_key;
///
/// assert_eq!(normalize_dataset_key("datasets/cais__mmlu/"), "mmlu");
/// assert_eq!(normalize_dataset_key("mmlu"), "mmlu");
/// ```
pub fn normalize_dataset_key(key: &str) -> String {
    let trimmed = key.trim_end_matches('/');
    let segment = trimmed.rsplit('/').next().unwrap_or(trimmed);
    let name = segment.rsplit("__").next().unwrap_or(segment);
    name.to_string()
}

/// Derive the test category from a result filename.
///
/// ```
/// use llm_leaderboard_core::normalize::extract_category;
///
/// assert_eq!(extract_category("abstract_algebra_test.jsonl"), "abstract_algebra");
/// assert_eq!(extract_category("data/foo.csv"), "foo");
/// ```
pub fn extract_category(file: &str) -> String {
    let name = file.rsplit(['/', '\\']).next().unwrap_or(file);

    if let Some(m) = TEST_SUFFIX.find(name) {
        return name[..m.start()].to_string();
    }
    if let Some(m) = BARE_EXTENSION.find(name) {
        return name[..m.start()].to_string();
    }
    name.to_string()
}

/// Apply [`LEGACY_CATEGORY_OVERRIDES`] to an extracted category.
pub fn apply_legacy_override(dataset: &str, category: String) -> String {
    LEGACY_CATEGORY_OVERRIDES
        .iter()
        .find(|(ds, from, _)| *ds == dataset && *from == category)
        .map(|(_, _, to)| (*to).to_string())
        .unwrap_or(category)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_path_and_author() {
        assert_eq!(normalize_dataset_key("datasets/cais__mmlu/"), "mmlu");
        assert_eq!(normalize_dataset_key("ikala__tmmluplus"), "tmmluplus");
        assert_eq!(normalize_dataset_key("a/b/c//"), "c");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for key in ["datasets/cais__mmlu/", "org__x__y", "plain", ""] {
            let once = normalize_dataset_key(key);
            assert_eq!(normalize_dataset_key(&once), once);
        }
    }

    #[test]
    fn test_normalize_keeps_last_double_underscore_segment() {
        assert_eq!(normalize_dataset_key("org__x__y"), "y");
    }

    #[test]
    fn test_extract_category_test_suffix() {
        assert_eq!(extract_category("abstract_algebra_test.jsonl"), "abstract_algebra");
        assert_eq!(extract_category("x_test.parquet"), "x");
        assert_eq!(extract_category("x_test.json"), "x");
    }

    #[test]
    fn test_extract_category_bare_extension() {
        assert_eq!(extract_category("foo.csv"), "foo");
        assert_eq!(extract_category("foo_train.json"), "foo_train");
    }

    #[test]
    fn test_extract_category_strips_directories() {
        assert_eq!(extract_category("mmlu/data/anatomy_test.csv"), "anatomy");
        assert_eq!(extract_category(r"C:\results\law_test.jsonl"), "law");
    }

    #[test]
    fn test_extract_category_unknown_extension_kept() {
        assert_eq!(extract_category("notes.txt"), "notes.txt");
        assert_eq!(extract_category("foo_test.txt"), "foo_test.txt");
    }

    #[test]
    fn test_legacy_override() {
        assert_eq!(
            apply_legacy_override("tw-legal-benchmark-v1", "default".to_string()),
            "benchmark"
        );
        assert_eq!(
            apply_legacy_override("tw-legal-benchmark-v1", "civil".to_string()),
            "civil"
        );
        assert_eq!(apply_legacy_override("mmlu", "default".to_string()), "default");
    }
}
