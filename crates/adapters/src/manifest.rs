// Copyright 2025 LLM Leaderboard Contributors
// SPDX-License-Identifier: Apache-2.0

//! Manifest-based discovery of result files in a directory.
//!
//! A results directory may describe its files in `manifest.json`:
//!
//! ```json
//! {
//!   "files": [
//!     {
//!       "file": "gpt-4o/results.json",
//!       "provider": "openai",
//!       "model_name": "gpt-4o",
//!       "variance": "shot-5",
//!       "official": true,
//!       "timestamp": "2025-01-01T00:00:00Z"
//!     }
//!   ]
//! }
//! ```
//!
//! Without a manifest, every `.json`/`.jsonl` file in the directory is
//! loaded with inferred metadata.

use crate::provider::{ProviderError, Result, SourceProvider};
use llm_leaderboard_core::source::DEFAULT_VARIANCE;
use llm_leaderboard_core::DataSource;
use llm_leaderboard_report::io;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Manifest file name looked up in a results directory.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Listing of result files with their declared metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    /// Listed result files.
    #[serde(default)]
    pub files: Vec<ManifestEntry>,
}

/// One listed result file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Path relative to the results directory.
    pub file: String,
    /// Model provider.
    pub provider: String,
    /// Model name.
    pub model_name: String,
    /// Provider-side model identifier.
    #[serde(default)]
    pub model_id: Option<String>,
    /// Variant discriminator.
    #[serde(default)]
    pub variance: Option<String>,
    /// Open-source flag.
    #[serde(default)]
    pub open_source: bool,
    /// Official reference flag.
    #[serde(default)]
    pub official: bool,
    /// Evaluation timestamp; inferred from the file when absent.
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl Manifest {
    /// Read a manifest file.
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ProviderError::Listing {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ProviderError::Manifest {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Provides every source found in one results directory.
#[derive(Debug, Clone)]
pub struct DirectoryProvider {
    dir: PathBuf,
}

impl DirectoryProvider {
    /// Create a provider for `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The results directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Paths of the result files this provider loads: the files listed in
    /// the manifest when one exists, otherwise every result file in the
    /// directory.
    pub fn result_paths(&self) -> Result<Vec<PathBuf>> {
        match self.read_manifest()? {
            Some(manifest) => Ok(manifest
                .files
                .iter()
                .map(|entry| self.dir.join(&entry.file))
                .collect()),
            None => self.list_result_files(),
        }
    }

    fn read_manifest(&self) -> Result<Option<Manifest>> {
        let path = self.dir.join(MANIFEST_FILE);
        if !path.is_file() {
            return Ok(None);
        }
        let manifest = Manifest::read(&path)?;
        debug!(path = %path.display(), files = manifest.files.len(), "Read manifest");
        Ok(Some(manifest))
    }

    fn load_entry(&self, entry: &ManifestEntry) -> Result<DataSource> {
        let inferred = io::load_source(self.dir.join(&entry.file))?;

        let mut builder = DataSource::builder()
            .provider(entry.provider.clone())
            .model_name(entry.model_name.clone())
            .variance(
                entry
                    .variance
                    .clone()
                    .unwrap_or_else(|| DEFAULT_VARIANCE.to_string()),
            )
            .open_source(entry.open_source)
            .official(entry.official)
            .timestamp(entry.timestamp.clone().unwrap_or(inferred.timestamp))
            .raw_data(inferred.raw_data);
        if let Some(model_id) = &entry.model_id {
            builder = builder.model_id(model_id.clone());
        }
        Ok(builder.build()?)
    }

    fn list_result_files(&self) -> Result<Vec<PathBuf>> {
        let listing = fs::read_dir(&self.dir).map_err(|source| ProviderError::Listing {
            path: self.dir.clone(),
            source,
        })?;

        let mut files: Vec<PathBuf> = listing
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file() && io::is_result_file(path))
            .filter(|path| path.file_name().and_then(|n| n.to_str()) != Some(MANIFEST_FILE))
            .collect();
        files.sort();
        Ok(files)
    }
}

impl SourceProvider for DirectoryProvider {
    fn id(&self) -> String {
        format!("dir({})", self.dir.display())
    }

    fn load(&self) -> Result<Vec<DataSource>> {
        let sources = if let Some(manifest) = self.read_manifest()? {
            manifest
                .files
                .iter()
                .map(|entry| self.load_entry(entry))
                .collect::<Result<Vec<_>>>()?
        } else {
            debug!(dir = %self.dir.display(), "No manifest, listing result files");
            self.list_result_files()?
                .iter()
                .map(io::load_source)
                .collect::<std::result::Result<Vec<_>, _>>()?
        };

        info!(provider = %self.id(), sources = sources.len(), "Loaded sources");
        Ok(sources)
    }
}
