//! Error types for the search client.
//!
//! # Design
//! Configuration failures and request failures are kept apart: a
//! `ConfigError` happens before any request is attempted, while `ApiError`
//! covers the three ways a single search round-trip can fail. Nothing is
//! retried, so each variant carries the underlying message as-is.

use std::path::PathBuf;

use thiserror::Error;

use crate::template::TemplateError;

/// Errors returned while loading `Config`.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The env file could not be read or parsed.
    #[error("failed to load env file {}: {source}", path.display())]
    EnvFile {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },

    /// `TIMEOUT_SECS` is set but is not a whole number of seconds.
    #[error("invalid TIMEOUT_SECS value {0:?}")]
    InvalidTimeout(String),
}

/// Errors returned by `SearchClient`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The template, target URL or header could not form a valid request.
    #[error("invalid request: {0}")]
    RequestConstruction(String),

    /// The round-trip did not complete: refused, timed out, DNS, TLS or a
    /// failed body read.
    #[error("transport failed: {0}")]
    Transport(String),

    /// The response body is not JSON of the expected shape.
    #[error("decode failed: {0}")]
    Decode(String),
}

impl ApiError {
    /// True for construction and transport failures, the two kinds that
    /// happen before a body is ever seen.
    pub fn is_request_error(&self) -> bool {
        matches!(self, ApiError::RequestConstruction(_) | ApiError::Transport(_))
    }
}

impl From<TemplateError> for ApiError {
    fn from(err: TemplateError) -> Self {
        ApiError::RequestConstruction(err.to_string())
    }
}
