// Copyright 2025 LLM Leaderboard Contributors
// SPDX-License-Identifier: Apache-2.0

//! Source provider trait and the plain file-list provider.

use llm_leaderboard_core::DataSource;
use llm_leaderboard_report::io;
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;

/// Errors that can occur while providing sources.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The manifest file could not be parsed.
    #[error("Invalid manifest {}: {source}", .path.display())]
    Manifest {
        /// Manifest path.
        path: PathBuf,
        /// Parser error.
        #[source]
        source: serde_json::Error,
    },

    /// A directory could not be listed.
    #[error("Cannot list {}: {source}", .path.display())]
    Listing {
        /// Directory path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A result file failed to load.
    #[error(transparent)]
    Load(#[from] llm_leaderboard_report::Error),

    /// Declared metadata was incomplete.
    #[error(transparent)]
    Source(#[from] llm_leaderboard_core::Error),
}

/// Result type for provider operations.
pub type Result<T> = std::result::Result<T, ProviderError>;

/// Anything that can yield loaded sources.
///
/// Implement this trait for each discovery mechanism (explicit files,
/// manifest directories, ...).
pub trait SourceProvider {
    /// Returns a human-readable identifier for this provider.
    fn id(&self) -> String;

    /// Load every source this provider knows about.
    fn load(&self) -> Result<Vec<DataSource>>;
}

/// Provides sources from an explicit list of files.
#[derive(Debug, Clone, Default)]
pub struct FileListProvider {
    paths: Vec<PathBuf>,
}

impl FileListProvider {
    /// Create a provider for the given files.
    pub fn new(paths: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }

    /// Files this provider loads.
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }
}

impl SourceProvider for FileListProvider {
    fn id(&self) -> String {
        format!("files({})", self.paths.len())
    }

    fn load(&self) -> Result<Vec<DataSource>> {
        let sources = self
            .paths
            .iter()
            .map(io::load_source)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        info!(provider = %self.id(), sources = sources.len(), "Loaded sources");
        Ok(sources)
    }
}

/// Load sources from every provider, in order.
pub fn load_all(providers: &[Box<dyn SourceProvider>]) -> Result<Vec<DataSource>> {
    let mut sources = Vec::new();
    for provider in providers {
        sources.extend(provider.load()?);
    }
    Ok(sources)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_file_list_provider() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.json");
        fs::write(&path, r#"{"model": "a-model", "dataset_results": {}}"#).unwrap();

        let provider = FileListProvider::new([&path]);
        assert_eq!(provider.id(), "files(1)");
        let sources = provider.load().unwrap();
        assert_eq!(sources[0].model_name, "a-model");
    }

    #[test]
    fn test_load_all_propagates_errors() {
        let providers: Vec<Box<dyn SourceProvider>> =
            vec![Box::new(FileListProvider::new(["/missing/file.json"]))];
        assert!(matches!(load_all(&providers), Err(ProviderError::Load(_))));
    }

    #[test]
    fn test_load_all_empty() {
        assert!(load_all(&[]).unwrap().is_empty());
    }
}
