// Copyright 2025 LLM Leaderboard Contributors
// SPDX-License-Identifier: Apache-2.0

//! Grouping of flattened records by subject area.

use crate::classify::{categorize_test, CategoryKey};
use crate::source::CategoryResult;
use indexmap::IndexMap;

/// Records bucketed by subject area, in first-seen bucket order.
pub type CategoryGroups = IndexMap<CategoryKey, Vec<CategoryResult>>;

/// Bucket each record under the subject area of its category path.
///
/// Only non-empty buckets are present. Records keep their input order
/// within a bucket.
pub fn group_by_category(results: &[CategoryResult]) -> CategoryGroups {
    let mut groups = CategoryGroups::new();
    for result in results {
        groups
            .entry(categorize_test(&result.category))
            .or_default()
            .push(result.clone());
    }
    groups
}
