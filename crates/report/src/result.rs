//! Leaderboard report types.
//!
//! This module provides the [`Report`] struct bundling every aggregate view
//! written by the report outputs.

use crate::export::ScoreScale;
use chrono::{DateTime, Utc};
use llm_leaderboard_core::{
    build_pivot, build_rankings, collect_run_stats, sort_rows, summarize_subjects,
    BenchmarkRanking, DataSource, PivotRow, RankingSort, SourceRunStats, SubjectSummary,
};
use serde::{Deserialize, Serialize};

/// Display options for a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportOptions {
    /// How scores are rendered in text outputs.
    pub scale: ScoreScale,
    /// Row order within each benchmark.
    pub sort: RankingSort,
}

/// Aggregate views over a set of sources.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Category × source pivot table.
    pub pivot: Vec<PivotRow>,
    /// Per-benchmark leaderboards, rows sorted per the options.
    pub rankings: Vec<BenchmarkRanking>,
    /// Per-source subject profiles.
    pub subjects: Vec<SubjectSummary>,
    /// Per-file run spread of sources that report it.
    pub runs: Vec<SourceRunStats>,
    /// Number of sources aggregated.
    pub source_count: usize,
    /// Options the report was built with.
    pub options: ReportOptions,
    /// Timestamp when the report was generated.
    pub generated_at: DateTime<Utc>,
}

impl Report {
    /// Build a report over `sources`.
    pub fn build(sources: &[DataSource], options: ReportOptions) -> Self {
        let mut rankings = build_rankings(sources);
        for ranking in &mut rankings {
            sort_rows(&mut ranking.rows, options.sort);
        }

        Self {
            pivot: build_pivot(sources),
            rankings,
            subjects: summarize_subjects(sources),
            runs: collect_run_stats(sources),
            source_count: sources.len(),
            options,
            generated_at: Utc::now(),
        }
    }
}
