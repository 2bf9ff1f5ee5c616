// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for spatial extraction.
//!
//! Extraction itself never fails: partial or empty captures fall back to
//! defaults. Only configuration checks and JSON (de)serialization can error.

/// Result type alias for spatial operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur around the extraction pipeline.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A configuration value is out of range.
    #[error("invalid spatial config: {0}")]
    InvalidConfig(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
