// Copyright 2025 LLM Leaderboard Contributors
// SPDX-License-Identifier: Apache-2.0

//! Advisory schema validation for result documents.
//!
//! The pipeline never depends on these checks: it skips whatever does not
//! fit. Validation exists so users can see why a file produced fewer rows
//! than expected.
//!
//! # Example
//!
//! ```
//! use llm_leaderboard_adapters::schema::SchemaValidator;
//!
//! let validator = SchemaValidator::new();
//! let result = validator.validate_document(&serde_json::json!({}));
//! assert!(!result.is_valid);
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Error codes reported by validation.
pub mod codes {
    /// A required field is absent.
    pub const REQUIRED_FIELD_MISSING: &str = "REQUIRED_FIELD_MISSING";
    /// A field has the wrong JSON type.
    pub const INVALID_TYPE: &str = "INVALID_TYPE";
}

/// Outcome of validating one document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Whether the document has no errors
    pub is_valid: bool,
    /// Validation errors
    pub errors: Vec<ValidationError>,
    /// Validation warnings
    pub warnings: Vec<String>,
    /// Datasets found under `dataset_results`
    pub datasets: usize,
    /// Result entries that the flattener will keep
    pub valid_results: usize,
}

/// A single validation error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationError {
    /// Error message
    pub message: String,
    /// Path to the invalid field
    pub field_path: Option<String>,
    /// Error code
    pub code: String,
}

/// Validates result documents against the expected layout.
#[derive(Debug, Clone)]
pub struct SchemaValidator {
    /// Accuracy range outside of which values are flagged
    accuracy_range: (f64, f64),
}

impl Default for SchemaValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaValidator {
    /// Create a validator expecting accuracies in `[0, 1]`.
    pub fn new() -> Self {
        Self {
            accuracy_range: (0.0, 1.0),
        }
    }

    /// Create a validator with a custom expected accuracy range.
    pub fn with_accuracy_range(min: f64, max: f64) -> Self {
        Self {
            accuracy_range: (min, max),
        }
    }

    /// Validate a parsed result document.
    pub fn validate_document(&self, doc: &Value) -> ValidationResult {
        let mut result = ValidationResult::default();

        if !doc.is_object() {
            push_error(&mut result, "Document root must be an object", "", codes::INVALID_TYPE);
            return finish(result);
        }

        let Some(datasets) = doc.get("dataset_results") else {
            push_error(
                &mut result,
                "Missing required field: dataset_results",
                "dataset_results",
                codes::REQUIRED_FIELD_MISSING,
            );
            return finish(result);
        };
        let Some(datasets) = datasets.as_object() else {
            push_error(
                &mut result,
                "dataset_results must be an object",
                "dataset_results",
                codes::INVALID_TYPE,
            );
            return finish(result);
        };

        result.datasets = datasets.len();
        for (key, dataset) in datasets {
            let path = format!("dataset_results.{key}");
            if !dataset.is_object() {
                push_error(&mut result, format!("{path} must be an object"), &path, codes::INVALID_TYPE);
                continue;
            }
            match dataset.get("results") {
                None => result
                    .warnings
                    .push(format!("{path} has no results array and will be ignored")),
                Some(Value::Array(entries)) => {
                    for (index, entry) in entries.iter().enumerate() {
                        self.validate_entry(&mut result, &format!("{path}.results[{index}]"), entry);
                    }
                }
                Some(_) => push_error(
                    &mut result,
                    format!("{path}.results must be an array"),
                    format!("{path}.results"),
                    codes::INVALID_TYPE,
                ),
            }
        }

        if result.valid_results == 0 {
            result.warnings.push("Document contains no usable results".to_string());
        }
        finish(result)
    }

    fn validate_entry(&self, result: &mut ValidationResult, path: &str, entry: &Value) {
        let Some(entry) = entry.as_object() else {
            push_error(result, format!("{path} must be an object"), path, codes::INVALID_TYPE);
            return;
        };
        let errors_before = result.errors.len();

        match entry.get("file") {
            None => push_error(
                result,
                format!("Missing required field: {path}.file"),
                format!("{path}.file"),
                codes::REQUIRED_FIELD_MISSING,
            ),
            Some(Value::String(_)) => {}
            Some(_) => push_error(
                result,
                format!("{path}.file must be a string"),
                format!("{path}.file"),
                codes::INVALID_TYPE,
            ),
        }

        match entry.get("accuracy_mean") {
            None => push_error(
                result,
                format!("Missing required field: {path}.accuracy_mean"),
                format!("{path}.accuracy_mean"),
                codes::REQUIRED_FIELD_MISSING,
            ),
            Some(value) => match value.as_f64() {
                Some(mean) => self.check_range(result, &format!("{path}.accuracy_mean"), mean),
                None => push_error(
                    result,
                    format!("{path}.accuracy_mean must be a number"),
                    format!("{path}.accuracy_mean"),
                    codes::INVALID_TYPE,
                ),
            },
        }
        let required_ok = result.errors.len() == errors_before;

        if let Some(std) = entry.get("accuracy_std") {
            if !std.is_number() {
                push_error(
                    result,
                    format!("{path}.accuracy_std must be a number"),
                    format!("{path}.accuracy_std"),
                    codes::INVALID_TYPE,
                );
            }
        }

        if let Some(runs) = entry.get("individual_runs").and_then(|r| r.get("accuracies")) {
            match runs.as_array() {
                Some(values) if values.iter().all(Value::is_number) => {}
                Some(_) => result
                    .warnings
                    .push(format!("{path}.individual_runs.accuracies has non-numeric values")),
                None => push_error(
                    result,
                    format!("{path}.individual_runs.accuracies must be an array"),
                    format!("{path}.individual_runs.accuracies"),
                    codes::INVALID_TYPE,
                ),
            }
        }

        if required_ok {
            result.valid_results += 1;
        }
    }

    fn check_range(&self, result: &mut ValidationResult, path: &str, value: f64) {
        let (min, max) = self.accuracy_range;
        if value < min || value > max {
            result
                .warnings
                .push(format!("{path} = {value} is outside [{min}, {max}]"));
        }
    }
}

fn push_error(
    result: &mut ValidationResult,
    message: impl Into<String>,
    field_path: impl Into<String>,
    code: &str,
) {
    let field_path = field_path.into();
    result.errors.push(ValidationError {
        message: message.into(),
        field_path: (!field_path.is_empty()).then_some(field_path),
        code: code.to_string(),
    });
}

fn finish(mut result: ValidationResult) -> ValidationResult {
    result.is_valid = result.errors.is_empty();
    debug!(
        valid = result.is_valid,
        errors = result.errors.len(),
        warnings = result.warnings.len(),
        "Validated result document"
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_document() {
        let validator = SchemaValidator::new();
        let result = validator.validate_document(&json!({
            "dataset_results": {
                "mmlu": {"results": [
                    {"file": "a.json", "accuracy_mean": 0.5, "accuracy_std": 0.1,
                     "individual_runs": {"accuracies": [0.4, 0.6]}}
                ]}
            }
        }));
        assert!(result.is_valid);
        assert!(result.errors.is_empty());
        assert!(result.warnings.is_empty());
        assert_eq!(result.datasets, 1);
        assert_eq!(result.valid_results, 1);
    }

    #[test]
    fn test_missing_dataset_results() {
        let result = SchemaValidator::new().validate_document(&json!({"foo": 1}));
        assert!(!result.is_valid);
        assert_eq!(result.errors[0].code, codes::REQUIRED_FIELD_MISSING);
        assert_eq!(result.errors[0].field_path.as_deref(), Some("dataset_results"));
    }

    #[test]
    fn test_non_object_root() {
        let result = SchemaValidator::new().validate_document(&json!([1]));
        assert!(!result.is_valid);
        assert_eq!(result.errors[0].field_path, None);
    }

    #[test]
    fn test_entry_errors_and_counts() {
        let result = SchemaValidator::new().validate_document(&json!({
            "dataset_results": {
                "mmlu": {"results": [
                    {"file": "ok.json", "accuracy_mean": 0.3},
                    {"file": 5, "accuracy_mean": 0.3},
                    {"file": "x.json"},
                    {"file": "y.json", "accuracy_mean": 0.3, "accuracy_std": "n/a"}
                ]},
                "bad": {"results": {}}
            }
        }));
        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 4);
        // the entry with a bad std is still flattened
        assert_eq!(result.valid_results, 2);
    }

    #[test]
    fn test_out_of_range_is_warning() {
        let result = SchemaValidator::new().validate_document(&json!({
            "dataset_results": {"mmlu": {"results": [{"file": "a.json", "accuracy_mean": 81.5}]}}
        }));
        assert!(result.is_valid);
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("outside"));

        let percent = SchemaValidator::with_accuracy_range(0.0, 100.0).validate_document(&json!({
            "dataset_results": {"mmlu": {"results": [{"file": "a.json", "accuracy_mean": 81.5}]}}
        }));
        assert!(percent.warnings.is_empty());
    }

    #[test]
    fn test_empty_results_warns() {
        let result = SchemaValidator::new().validate_document(&json!({
            "dataset_results": {"mmlu": {}}
        }));
        assert!(result.is_valid);
        assert_eq!(result.warnings.len(), 2);
    }
}
