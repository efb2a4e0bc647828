// Copyright 2025 LLM Leaderboard Contributors
// SPDX-License-Identifier: Apache-2.0

//! Loaded result sources and flattened test records.
//!
//! A [`DataSource`] is one result document together with the metadata the
//! discovery or upload layer declared for it. Sources are created once and
//! never mutated; the pipeline reads them and allocates fresh outputs.
//!
//! # Labels
//!
//! Two derived strings identify a source in aggregated views:
//!
//! ```text
//! display name:  <model>[ (<variance>)]
//! source label:  <model>[ (<variance>)] @ <timestamp>[ (Official)]
//! ```

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a loaded source (process lifetime).
pub type SourceId = String;

/// Variance value meaning "no variant suffix".
pub const DEFAULT_VARIANCE: &str = "default";

/// One flattened test outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryResult {
    /// Composite `"<dataset>/<category>"` path.
    pub category: String,
    /// Original file path, kept for matching against run statistics.
    pub file: String,
    /// Mean accuracy, copied verbatim from the document.
    pub accuracy_mean: f64,
    /// Standard deviation across runs, when reported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accuracy_std: Option<f64>,
}

/// One loaded result document plus its declared metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSource {
    /// Unique source identifier (generated as UUID v4 when not supplied).
    pub id: SourceId,
    /// Model provider, e.g. `"openai"`.
    pub provider: String,
    /// Human-readable model name.
    pub model_name: String,
    /// Provider-side model identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_id: Option<String>,
    /// Variant discriminator; [`DEFAULT_VARIANCE`] means no suffix.
    pub variance: String,
    /// Whether the model weights are openly available.
    pub open_source: bool,
    /// Whether this is an authoritative reference result.
    pub is_official: bool,
    /// Evaluation timestamp as declared by the source.
    pub timestamp: String,
    /// The parsed result document.
    pub raw_data: serde_json::Value,
}

impl DataSource {
    /// Create a new builder.
    pub fn builder() -> DataSourceBuilder {
        DataSourceBuilder::default()
    }

    /// Whether the variance contributes a suffix to labels.
    pub fn has_variance(&self) -> bool {
        !self.variance.is_empty() && self.variance != DEFAULT_VARIANCE
    }

    /// Model name with the variance suffix, if any.
    pub fn display_name(&self) -> String {
        if self.has_variance() {
            format!("{} ({})", self.model_name, self.variance)
        } else {
            self.model_name.clone()
        }
    }

    /// Column label used by the pivot table.
    pub fn label(&self) -> String {
        let mut label = format!("{} @ {}", self.display_name(), self.timestamp);
        if self.is_official {
            label.push_str(" (Official)");
        }
        label
    }
}

/// Builder for [`DataSource`] instances.
#[derive(Default)]
pub struct DataSourceBuilder {
    id: Option<SourceId>,
    provider: Option<String>,
    model_name: Option<String>,
    model_id: Option<String>,
    variance: Option<String>,
    open_source: bool,
    is_official: bool,
    timestamp: Option<String>,
    raw_data: serde_json::Value,
}

impl DataSourceBuilder {
    /// Set source ID. If not set, a UUID v4 will be generated.
    pub fn id(mut self, id: impl Into<SourceId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set provider (required).
    pub fn provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    /// Set model name (required).
    pub fn model_name(mut self, name: impl Into<String>) -> Self {
        self.model_name = Some(name.into());
        self
    }

    /// Set the provider-side model identifier.
    pub fn model_id(mut self, id: impl Into<String>) -> Self {
        self.model_id = Some(id.into());
        self
    }

    /// Set variance (default: `"default"`).
    pub fn variance(mut self, variance: impl Into<String>) -> Self {
        self.variance = Some(variance.into());
        self
    }

    /// Mark the model as open source.
    pub fn open_source(mut self, open_source: bool) -> Self {
        self.open_source = open_source;
        self
    }

    /// Mark the source as an official reference result.
    pub fn official(mut self, official: bool) -> Self {
        self.is_official = official;
        self
    }

    /// Set timestamp (required).
    pub fn timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    /// Set the parsed result document.
    pub fn raw_data(mut self, raw: serde_json::Value) -> Self {
        self.raw_data = raw;
        self
    }

    /// Build the [`DataSource`]. Returns `Err` if required fields are missing.
    pub fn build(self) -> crate::Result<DataSource> {
        let id = self.id.unwrap_or_else(|| Uuid::new_v4().to_string());
        let provider = self
            .provider
            .ok_or_else(|| crate::Error::invalid_input("provider is required"))?;
        let model_name = self
            .model_name
            .filter(|name| !name.is_empty())
            .ok_or_else(|| crate::Error::invalid_input("model_name is required"))?;
        let timestamp = self
            .timestamp
            .ok_or_else(|| crate::Error::invalid_input("timestamp is required"))?;

        Ok(DataSource {
            id,
            provider,
            model_name,
            model_id: self.model_id,
            variance: self
                .variance
                .unwrap_or_else(|| DEFAULT_VARIANCE.to_string()),
            open_source: self.open_source,
            is_official: self.is_official,
            timestamp,
            raw_data: self.raw_data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> DataSourceBuilder {
        DataSource::builder()
            .provider("openai")
            .model_name("gpt-4o")
            .timestamp("2025-01-01T00:00:00Z")
    }

    #[test]
    fn test_builder_generates_id_and_default_variance() {
        let source = base().build().unwrap();
        assert!(!source.id.is_empty());
        assert_eq!(source.variance, DEFAULT_VARIANCE);
        assert!(source.raw_data.is_null());
    }

    #[test]
    fn test_builder_requires_model_name() {
        let err = DataSource::builder()
            .provider("openai")
            .timestamp("t")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("model_name"));
    }

    #[test]
    fn test_label_plain() {
        let source = base().build().unwrap();
        assert_eq!(source.display_name(), "gpt-4o");
        assert_eq!(source.label(), "gpt-4o @ 2025-01-01T00:00:00Z");
    }

    #[test]
    fn test_label_with_variance_and_official() {
        let source = base().variance("shot-5").official(true).build().unwrap();
        assert_eq!(source.display_name(), "gpt-4o (shot-5)");
        assert_eq!(
            source.label(),
            "gpt-4o (shot-5) @ 2025-01-01T00:00:00Z (Official)"
        );
    }

    #[test]
    fn test_empty_variance_has_no_suffix() {
        let source = base().variance("").build().unwrap();
        assert_eq!(source.display_name(), "gpt-4o");
    }

    #[test]
    fn test_source_serializes_camel_case() {
        let source = base().id("s1").model_id("gpt-4o-2024").build().unwrap();
        let json = serde_json::to_value(&source).unwrap();
        assert_eq!(json["modelName"], "gpt-4o");
        assert_eq!(json["modelId"], "gpt-4o-2024");
        assert_eq!(json["isOfficial"], false);
    }
}
