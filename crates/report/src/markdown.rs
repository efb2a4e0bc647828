//! Markdown output generation for leaderboard reports.
//!
//! This module renders the per-benchmark leaderboards and subject profiles
//! of a [`Report`] as markdown tables.

use crate::export::ScoreScale;
use crate::result::Report;
use llm_leaderboard_core::{BenchmarkRanking, CategoryGroups, CategoryKey, SubjectSummary};

/// Generate a markdown summary from a report.
pub fn generate_summary(report: &Report) -> String {
    let mut output = String::new();

    output.push_str("# Leaderboard Summary\n\n");
    output.push_str(&format!("Generated: {}\n\n", report.generated_at.to_rfc3339()));
    output.push_str(&format!(
        "Sources: {} | Benchmarks: {} | Sort: {} | Scale: {}\n\n",
        report.source_count,
        report.rankings.len(),
        report.options.sort,
        report.options.scale
    ));

    for ranking in &report.rankings {
        output.push_str(&generate_ranking_table(ranking, report.options.scale));
        output.push('\n');
    }

    if !report.subjects.is_empty() {
        output.push_str(&generate_subject_table(&report.subjects, report.options.scale));
        output.push('\n');
    }

    output.push_str("---\n");
    output.push_str(&format!("Total categories: {}\n", report.pivot.len()));

    output
}

/// Generate the leaderboard table of one benchmark.
pub fn generate_ranking_table(ranking: &BenchmarkRanking, scale: ScoreScale) -> String {
    let mut output = String::new();

    output.push_str(&format!("## {}\n\n", ranking.benchmark));

    let mut header = vec![
        "#".to_string(),
        "Model".to_string(),
        "Provider".to_string(),
        "Official".to_string(),
        "Average".to_string(),
        "Min".to_string(),
        "Max".to_string(),
    ];
    header.extend(ranking.tests.iter().map(|t| escape_cell(t)));
    output.push_str(&table_row(&header));
    output.push_str(&table_row(&vec!["---".to_string(); header.len()]));

    for (position, row) in ranking.rows.iter().enumerate() {
        let mut cells = vec![
            (position + 1).to_string(),
            escape_cell(&row.display_name),
            escape_cell(&row.provider),
            if row.is_official { "yes" } else { "" }.to_string(),
            scale.format(row.average),
            scale.format(row.min),
            scale.format(row.max),
        ];
        cells.extend(ranking.tests.iter().map(|test| {
            row.scores
                .get(test)
                .map(|v| scale.format(*v))
                .unwrap_or_else(|| "-".to_string())
        }));
        output.push_str(&table_row(&cells));
    }

    output
}

/// Generate a subject-area table with one row per source.
pub fn generate_subject_table(subjects: &[SubjectSummary], scale: ScoreScale) -> String {
    let mut output = String::new();
    output.push_str("## Subject Areas\n\n");

    let keys: Vec<CategoryKey> = CategoryKey::ALL
        .into_iter()
        .filter(|key| subjects.iter().any(|s| s.subjects.contains_key(key)))
        .collect();

    let mut header = vec!["Source".to_string()];
    header.extend(keys.iter().map(|k| k.to_string()));
    output.push_str(&table_row(&header));
    output.push_str(&table_row(&vec!["---".to_string(); header.len()]));

    for summary in subjects {
        let mut cells = vec![escape_cell(&summary.label)];
        cells.extend(keys.iter().map(|key| {
            summary
                .subjects
                .get(key)
                .map(|s| format!("{} ({})", scale.format(s.mean), s.count))
                .unwrap_or_else(|| "-".to_string())
        }));
        output.push_str(&table_row(&cells));
    }

    output
}

/// Generate the records of one source grouped by subject area.
pub fn generate_grouped_records(label: &str, groups: &CategoryGroups, scale: ScoreScale) -> String {
    let mut output = String::new();
    output.push_str(&format!("### {}\n\n", label));

    for (key, records) in groups {
        output.push_str(&format!("- **{}** ({})\n", key, records.len()));
        for record in records {
            output.push_str(&format!(
                "  - {}: {}\n",
                record.category,
                scale.format(record.accuracy_mean)
            ));
        }
    }
    output.push('\n');

    output
}

fn table_row(cells: &[String]) -> String {
    format!("| {} |\n", cells.join(" | "))
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}
