// Copyright 2025 LLM Leaderboard Contributors
// SPDX-License-Identifier: Apache-2.0

//! Per-source averages by subject area.

use crate::classify::{categorize_test, CategoryKey};
use crate::flatten::flatten_results;
use crate::source::DataSource;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mean score of one subject area for one source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubjectScore {
    /// Mean of `accuracy_mean` over the tests in this subject.
    pub mean: f64,
    /// Number of tests averaged.
    pub count: usize,
}

/// Subject-area profile of one source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectSummary {
    /// Source label as used by the pivot table.
    pub label: String,
    /// Scores per subject area, in [`CategoryKey`] declaration order.
    pub subjects: IndexMap<CategoryKey, SubjectScore>,
}

/// Summarize every source by subject area.
pub fn summarize_subjects(sources: &[DataSource]) -> Vec<SubjectSummary> {
    sources
        .iter()
        .map(|source| {
            let mut totals: BTreeMap<CategoryKey, (f64, usize)> = BTreeMap::new();
            for result in flatten_results(&source.raw_data) {
                let slot = totals.entry(categorize_test(&result.category)).or_default();
                slot.0 += result.accuracy_mean;
                slot.1 += 1;
            }

            let subjects = totals
                .into_iter()
                .map(|(key, (sum, count))| {
                    (
                        key,
                        SubjectScore {
                            mean: sum / count as f64,
                            count,
                        },
                    )
                })
                .collect();
            SubjectSummary {
                label: source.label(),
                subjects,
            }
        })
        .collect()
}
