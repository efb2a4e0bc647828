// Copyright 2025 LLM Leaderboard Contributors
// SPDX-License-Identifier: Apache-2.0

//! Error types for the leaderboard core.
//!
//! The transformation pipeline itself never fails on malformed result data;
//! errors here only arise when callers construct domain values incorrectly.

use thiserror::Error;

/// Errors raised by core constructors.
#[derive(Debug, Error)]
pub enum Error {
    /// A required field was missing or had an invalid value.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Build an [`Error::InvalidInput`] from any message.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, Error>;
