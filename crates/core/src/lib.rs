// Copyright 2025 LLM Leaderboard Contributors
// SPDX-License-Identifier: Apache-2.0

//! Normalization and aggregation pipeline for LLM benchmark results.
//!
//! Result documents arrive with loosely structured, per-producer layouts.
//! This crate turns them into uniform records and the aggregate views the
//! leaderboard is built from.
//!
//! # Quick Start
//!
//! ```
//! use llm_leaderboard_core::{build_rankings, flatten_results, DataSource};
//! use serde_json::json;
//!
//! let doc = json!({
//!     "dataset_results": {
//!         "datasets/cais__mmlu/": {
//!             "results": [{"file": "anatomy_test.jsonl", "accuracy_mean": 0.8}]
//!         }
//!     }
//! });
//! assert_eq!(flatten_results(&doc)[0].category, "mmlu/anatomy");
//!
//! let source = DataSource::builder()
//!     .provider("openai")
//!     .model_name("gpt-4o")
//!     .timestamp("2025-01-01")
//!     .raw_data(doc)
//!     .build()?;
//! let rankings = build_rankings(&[source]);
//! assert_eq!(rankings[0].benchmark, "mmlu");
//! # Ok::<(), llm_leaderboard_core::Error>(())
//! ```
//!
//! # Modules
//!
//! - [`normalize`] - Dataset key and filename normalization
//! - [`classify`] - Subject-area classification
//! - [`flatten`] - Raw document flattening
//! - [`group`] - Grouping by subject area
//! - [`pivot`] - Category × source pivot table
//! - [`ranking`] - Per-benchmark leaderboards
//! - [`stats`] - Per-file run statistics
//! - [`subjects`] - Per-source subject profiles
//! - [`store`] - Session store with derived views

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod classify;
pub mod error;
pub mod flatten;
pub mod group;
pub mod normalize;
pub mod pivot;
pub mod ranking;
pub mod source;
pub mod stats;
pub mod store;
pub mod subjects;

pub use classify::{categorize_test, CategoryKey};
pub use error::{Error, Result};
pub use flatten::flatten_results;
pub use group::{group_by_category, CategoryGroups};
pub use normalize::{extract_category, normalize_dataset_key};
pub use pivot::{build_pivot, pivot_labels, PivotRow};
pub use ranking::{build_rankings, sort_rows, BenchmarkRanking, BenchmarkRankingRow, RankingSort};
pub use source::{CategoryResult, DataSource, DataSourceBuilder, SourceId};
pub use stats::{collect_run_stats, extract_run_stats, RunStats, SourceRunStats};
pub use store::{DerivedViews, Selection, SourceObserver, SourceSnapshot, SourceStore};
pub use subjects::{summarize_subjects, SubjectScore, SubjectSummary};
