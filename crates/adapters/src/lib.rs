// Copyright 2025 LLM Leaderboard Contributors
// SPDX-License-Identifier: Apache-2.0

//! Source discovery, schema checks and configuration.
//!
//! This crate provides the collaborators around the core pipeline:
//!
//! - **Providers**: the [`SourceProvider`] trait, explicit file lists and
//!   manifest-described results directories
//! - **Schema**: advisory validation of result documents
//! - **Settings**: layered configuration (defaults, TOML file, environment)
//!
//! # Example
//!
//! ```no_run
//! use llm_leaderboard_adapters::prelude::*;
//!
//! let providers: Vec<Box<dyn SourceProvider>> = vec![
//!     Box::new(DirectoryProvider::new("results")),
//!     Box::new(FileListProvider::new(["extra/run.jsonl"])),
//! ];
//! let sources = load_all(&providers)?;
//! # Ok::<(), ProviderError>(())
//! ```

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod manifest;
pub mod provider;
pub mod schema;
pub mod settings;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use super::manifest::{DirectoryProvider, Manifest, ManifestEntry};
    pub use super::provider::{load_all, FileListProvider, ProviderError, SourceProvider};
    pub use super::schema::{SchemaValidator, ValidationResult};
    pub use super::settings::{ConfigError, LeaderboardConfig};
}

pub use manifest::DirectoryProvider;
pub use provider::{load_all, FileListProvider, ProviderError, SourceProvider};
pub use schema::SchemaValidator;
pub use settings::LeaderboardConfig;
