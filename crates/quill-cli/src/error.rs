//! Errors raised by the CLI.

use std::io;

use thiserror::Error;

use quill::QuillError;

use crate::config::ConfigError;

/// The error type of [`run`](crate::run).
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Quill(#[from] QuillError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid JSON argument `{input}`: {source}")]
    Json {
        input: String,
        source: serde_json::Error,
    },

    #[error("arguments file {0} must contain a JSON array")]
    ArgsNotArray(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
