//! CSV export of the pivot table.

use crate::error::Result;
use llm_leaderboard_core::{pivot_labels, PivotRow};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use std::str::FromStr;

/// How scores are rendered as text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreScale {
    /// `0.8123` → `81.23`
    #[default]
    Percent,
    /// `0.8123` → `0.8123`
    Fraction,
}

impl ScoreScale {
    /// Render one score.
    pub fn format(&self, value: f64) -> String {
        match self {
            ScoreScale::Percent => format!("{:.2}", value * 100.0),
            ScoreScale::Fraction => format!("{:.4}", value),
        }
    }
}

impl fmt::Display for ScoreScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreScale::Percent => f.write_str("percent"),
            ScoreScale::Fraction => f.write_str("fraction"),
        }
    }
}

impl FromStr for ScoreScale {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "percent" | "percentage" | "%" => Ok(ScoreScale::Percent),
            "fraction" | "ratio" => Ok(ScoreScale::Fraction),
            other => Err(format!("unknown score scale: {other}")),
        }
    }
}

/// Write the pivot table as CSV.
///
/// The header is `category` followed by every source label in first-seen
/// order; absent cells are written empty.
pub fn write_pivot_csv<W: io::Write>(rows: &[PivotRow], scale: ScoreScale, writer: W) -> Result<()> {
    let labels = pivot_labels(rows);
    let mut out = csv::Writer::from_writer(writer);

    let mut header = Vec::with_capacity(labels.len() + 1);
    header.push("category".to_string());
    header.extend(labels.iter().cloned());
    out.write_record(&header)?;

    for row in rows {
        let mut record = Vec::with_capacity(labels.len() + 1);
        record.push(row.category.clone());
        for label in &labels {
            record.push(row.get(label).map(|v| scale.format(v)).unwrap_or_default());
        }
        out.write_record(&record)?;
    }

    out.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Render the pivot table as a CSV string.
pub fn pivot_to_csv(rows: &[PivotRow], scale: ScoreScale) -> Result<String> {
    let mut buffer = Vec::new();
    write_pivot_csv(rows, scale, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
