//! Error types for clustergate operations.
//!
//! This module defines [`GateError`], the error type used throughout the
//! crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Construction and configuration errors are returned to the caller
//! - Errors raised while probing a remote cluster never leave
//!   [`VersionGate::check`](crate::gate::VersionGate::check); they are logged
//!   and collapsed into a negative verdict
//! - The binary adds context with `anyhow` at its edge

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for clustergate operations.
#[derive(Debug, Error)]
pub enum GateError {
    /// A required argument was absent or unusable.
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// The request never produced a usable response (connection refused,
    /// timeout, unreadable body).
    #[error("Transport error: {message}")]
    Transport { message: String },

    /// The remote answered with a non-success status.
    #[error("Unexpected HTTP status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    /// The response body did not contain the expected document.
    #[error("Malformed response: {message}")]
    MalformedResponse { message: String },

    /// A version string did not follow the dotted-numeric grammar.
    #[error("Invalid version: '{input}'")]
    InvalidVersion { input: String },

    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GateError {
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Whether the error happened before the remote produced a response.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::UnexpectedStatus { .. })
    }
}

impl From<reqwest::Error> for GateError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport {
            message: err.to_string(),
        }
    }
}

/// Result type alias for clustergate operations.
pub type Result<T> = std::result::Result<T, GateError>;
