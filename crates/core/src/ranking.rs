// Copyright 2025 LLM Leaderboard Contributors
// SPDX-License-Identifier: Apache-2.0

//! Per-benchmark leaderboard aggregation.
//!
//! A category path `"<benchmark>/<test>"` is split at its first `/`. Each
//! source contributing at least one test to a benchmark gets one row with
//! its scores and summary statistics over the tests it actually has.

use crate::flatten::flatten_results;
use crate::source::DataSource;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// One source's row within a benchmark table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkRankingRow {
    /// Model provider.
    pub provider: String,
    /// Model name.
    pub model_name: String,
    /// Provider-side model identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_id: Option<String>,
    /// Model name with variance suffix.
    pub display_name: String,
    /// Open-source flag.
    pub open_source: bool,
    /// Official reference flag.
    pub is_official: bool,
    /// Source timestamp.
    pub timestamp: String,
    /// Mean over the tests present for this source.
    pub average: f64,
    /// Lowest present test score.
    pub min: f64,
    /// Highest present test score.
    pub max: f64,
    /// Score per test name, in first-seen order.
    pub scores: IndexMap<String, f64>,
}

/// Leaderboard for one benchmark namespace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkRanking {
    /// Benchmark namespace, e.g. `"mmlu"`.
    pub benchmark: String,
    /// Every test name seen for this benchmark across all sources.
    pub tests: Vec<String>,
    /// One row per contributing source.
    pub rows: Vec<BenchmarkRankingRow>,
}

/// Row ordering for leaderboard consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankingSort {
    /// Display name ascending.
    Name,
    /// Average score descending.
    #[default]
    Average,
}

impl fmt::Display for RankingSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RankingSort::Name => f.write_str("name"),
            RankingSort::Average => f.write_str("average"),
        }
    }
}

impl FromStr for RankingSort {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_lowercase().as_str() {
            "name" => Ok(RankingSort::Name),
            "average" | "avg" => Ok(RankingSort::Average),
            _ => Err(crate::Error::invalid_input(format!("unknown sort order: {s}"))),
        }
    }
}

/// Split a category path into `(benchmark, test)` at the first `/`.
pub fn split_category(category: &str) -> (&str, &str) {
    category.split_once('/').unwrap_or((category, ""))
}

/// Build one leaderboard per benchmark namespace, sorted by benchmark name.
///
/// Rows keep the input order of `sources`; use [`sort_rows`] for display
/// ordering.
pub fn build_rankings(sources: &[DataSource]) -> Vec<BenchmarkRanking> {
    // benchmark -> source index -> test -> score
    let mut scores: BTreeMap<String, IndexMap<usize, IndexMap<String, f64>>> = BTreeMap::new();
    let mut test_names: BTreeMap<String, IndexMap<String, ()>> = BTreeMap::new();

    for (index, source) in sources.iter().enumerate() {
        for result in flatten_results(&source.raw_data) {
            let (benchmark, test) = split_category(&result.category);
            scores
                .entry(benchmark.to_string())
                .or_default()
                .entry(index)
                .or_default()
                .insert(test.to_string(), result.accuracy_mean);
            test_names
                .entry(benchmark.to_string())
                .or_default()
                .insert(test.to_string(), ());
        }
    }

    scores
        .into_iter()
        .map(|(benchmark, per_source)| {
            let mut contributors: Vec<_> = per_source.into_iter().collect();
            contributors.sort_by_key(|(index, _)| *index);

            let rows = contributors
                .into_iter()
                .map(|(index, tests)| ranking_row(&sources[index], tests))
                .collect::<Vec<_>>();
            debug!(benchmark = %benchmark, rows = rows.len(), "Built benchmark ranking");

            let tests = test_names
                .remove(&benchmark)
                .map(|t| t.into_keys().collect())
                .unwrap_or_default();
            BenchmarkRanking {
                benchmark,
                tests,
                rows,
            }
        })
        .collect()
}

fn ranking_row(source: &DataSource, scores: IndexMap<String, f64>) -> BenchmarkRankingRow {
    let count = scores.len() as f64;
    let average = scores.values().sum::<f64>() / count;
    let min = scores.values().copied().fold(f64::INFINITY, f64::min);
    let max = scores.values().copied().fold(f64::NEG_INFINITY, f64::max);

    BenchmarkRankingRow {
        provider: source.provider.clone(),
        model_name: source.model_name.clone(),
        model_id: source.model_id.clone(),
        display_name: source.display_name(),
        open_source: source.open_source,
        is_official: source.is_official,
        timestamp: source.timestamp.clone(),
        average,
        min,
        max,
        scores,
    }
}

/// Sort rows in place for display.
pub fn sort_rows(rows: &mut [BenchmarkRankingRow], sort: RankingSort) {
    match sort {
        RankingSort::Name => rows.sort_by(|a, b| a.display_name.cmp(&b.display_name)),
        RankingSort::Average => rows.sort_by(|a, b| {
            b.average.partial_cmp(&a.average).unwrap_or(Ordering::Equal)
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn source(model: &str, results: serde_json::Value) -> DataSource {
        DataSource::builder()
            .provider("test")
            .model_name(model)
            .timestamp("2025-01-01")
            .raw_data(json!({"dataset_results": results}))
            .build()
            .unwrap()
    }

    fn bench(entries: &[(&str, f64)]) -> serde_json::Value {
        let results: Vec<_> = entries
            .iter()
            .map(|(file, mean)| json!({"file": file, "accuracy_mean": mean}))
            .collect();
        json!({"results": results})
    }

    #[test]
    fn test_average_excludes_missing_tests() {
        let a = source("a", json!({"bench": bench(&[("t1.json", 0.8), ("t2.json", 0.6)])}));
        let b = source("b", json!({"bench": bench(&[("t1.json", 0.4)])}));
        let rankings = build_rankings(&[a, b]);

        assert_eq!(rankings.len(), 1);
        let ranking = &rankings[0];
        assert_eq!(ranking.benchmark, "bench");
        assert_eq!(ranking.tests, vec!["t1".to_string(), "t2".to_string()]);
        assert!((ranking.rows[0].average - 0.7).abs() < 1e-12);
        assert!((ranking.rows[1].average - 0.4).abs() < 1e-12);
        assert_eq!(ranking.rows[1].scores.get("t2"), None);
        assert_eq!(ranking.rows[0].min, 0.6);
        assert_eq!(ranking.rows[0].max, 0.8);
    }

    #[test]
    fn test_benchmarks_sorted_and_absent_sources_skipped() {
        let a = source(
            "a",
            json!({"zeta": bench(&[("t.json", 0.5)]), "alpha": bench(&[("t.json", 0.1)])}),
        );
        let b = source("b", json!({"zeta": bench(&[("t.json", 0.9)])}));
        let rankings = build_rankings(&[a, b]);

        let names: Vec<_> = rankings.iter().map(|r| r.benchmark.as_str()).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
        assert_eq!(rankings[0].rows.len(), 1);
        assert_eq!(rankings[0].rows[0].model_name, "a");
        assert_eq!(rankings[1].rows.len(), 2);
    }

    #[test]
    fn test_source_without_results_is_absent() {
        let a = source("a", json!({"bench": bench(&[("t.json", 0.5)])}));
        let empty = source("empty", json!({}));
        let rankings = build_rankings(&[empty, a]);
        assert_eq!(rankings[0].rows.len(), 1);
        assert_eq!(rankings[0].rows[0].model_name, "a");
    }

    #[test]
    fn test_sort_rows() {
        let a = source("alpha", json!({"bench": bench(&[("t.json", 0.2)])}));
        let b = source("beta", json!({"bench": bench(&[("t.json", 0.9)])}));
        let mut rows = build_rankings(&[a, b]).remove(0).rows;

        sort_rows(&mut rows, RankingSort::Average);
        assert_eq!(rows[0].model_name, "beta");
        sort_rows(&mut rows, RankingSort::Name);
        assert_eq!(rows[0].model_name, "alpha");
    }

    #[test]
    fn test_split_category() {
        assert_eq!(split_category("mmlu/anatomy"), ("mmlu", "anatomy"));
        assert_eq!(split_category("a/b/c"), ("a", "b/c"));
        assert_eq!(split_category("solo"), ("solo", ""));
    }

    #[test]
    fn test_parse_sort() {
        assert_eq!("Average".parse::<RankingSort>().unwrap(), RankingSort::Average);
        assert_eq!("name".parse::<RankingSort>().unwrap(), RankingSort::Name);
        assert!("rank".parse::<RankingSort>().is_err());
    }

    #[test]
    fn test_row_serializes_camel_case() {
        let a = source("alpha", json!({"bench": bench(&[("t.json", 0.2)])}));
        let rankings = build_rankings(&[a]);
        let value = serde_json::to_value(&rankings[0].rows[0]).unwrap();

        assert_eq!(value["modelName"], "alpha");
        assert_eq!(value["displayName"], "alpha");
        assert_eq!(value["openSource"], false);
        assert_eq!(value["isOfficial"], false);
        assert!(value.get("model_name").is_none());
        assert!(value.get("modelId").is_none());
    }
}
