//! Error types for Quill operations.
//!
//! This module provides the main error type [`QuillError`] which covers
//! compiling a template, resolving its arguments and converting them.

use thiserror::Error;

use quill_core::Span;
use quill_parser::error::{self as parser_error, ParseError};

use crate::extension::ExtensionError;

/// The category of a [`QuillError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed template or invalid specifier.
    Syntax,
    /// Named and positional placeholders in one template.
    UnsupportedCombination,
    /// A key path step that the argument does not have.
    MissingProperty,
    /// A numeric specifier applied to a non-numeric value.
    Type,
    /// A placeholder referring past the last argument.
    MissingArgument,
    /// A registered extension reported a failure.
    Extension,
    /// A value could not be serialized as JSON.
    Json,
}

/// The main error type for Quill operations.
///
/// # Diagnostic Variants
///
/// Every variant raised while compiling or rendering carries the template
/// source (`src`) and the span of the offending directive, so callers can
/// produce rich reports.
#[derive(Debug, Error)]
pub enum QuillError {
    #[error("{err}")]
    Syntax { err: ParseError, src: String },

    #[error("{err}")]
    UnsupportedCombination { err: ParseError, src: String },

    #[error("property \"{key}\" does not exist")]
    MissingProperty { key: String, span: Span, src: String },

    #[error("expecting number but found {found}")]
    Type {
        found: &'static str,
        span: Span,
        src: String,
    },

    #[error("missing argument {position}")]
    MissingArgument {
        position: usize,
        span: Span,
        src: String,
    },

    #[error("extension '{specifier}' failed: {source}")]
    Extension {
        specifier: char,
        source: ExtensionError,
        span: Span,
        src: String,
    },

    #[error("JSON serialization failed: {source}")]
    Json {
        source: serde_json::Error,
        span: Span,
        src: String,
    },

    #[error("invalid specifier `{0}`: expected a single ASCII letter")]
    InvalidSpecifier(String),
}

impl QuillError {
    /// Create a compile error with the associated template source.
    ///
    /// Mixed placeholder styles become `UnsupportedCombination`, everything
    /// else `Syntax`.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        let src = src.into();
        match err.kind() {
            parser_error::ErrorKind::Syntax => Self::Syntax { err, src },
            parser_error::ErrorKind::UnsupportedCombination => {
                Self::UnsupportedCombination { err, src }
            }
        }
    }

    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Syntax { .. } | Self::InvalidSpecifier(_) => ErrorKind::Syntax,
            Self::UnsupportedCombination { .. } => ErrorKind::UnsupportedCombination,
            Self::MissingProperty { .. } => ErrorKind::MissingProperty,
            Self::Type { .. } => ErrorKind::Type,
            Self::MissingArgument { .. } => ErrorKind::MissingArgument,
            Self::Extension { .. } => ErrorKind::Extension,
            Self::Json { .. } => ErrorKind::Json,
        }
    }

    /// The template source the error refers to, if any.
    pub fn source_code(&self) -> Option<&str> {
        match self {
            Self::Syntax { src, .. }
            | Self::UnsupportedCombination { src, .. }
            | Self::MissingProperty { src, .. }
            | Self::Type { src, .. }
            | Self::MissingArgument { src, .. }
            | Self::Extension { src, .. }
            | Self::Json { src, .. } => Some(src),
            Self::InvalidSpecifier(_) => None,
        }
    }

    /// The span of the directive that failed to render.
    ///
    /// Compile errors carry their spans in the parser diagnostic instead.
    pub fn span(&self) -> Option<Span> {
        match self {
            Self::MissingProperty { span, .. }
            | Self::Type { span, .. }
            | Self::MissingArgument { span, .. }
            | Self::Extension { span, .. }
            | Self::Json { span, .. } => Some(*span),
            Self::Syntax { .. } | Self::UnsupportedCombination { .. } | Self::InvalidSpecifier(_) => {
                None
            }
        }
    }

    /// The parse error of a compile failure.
    pub fn parse_error(&self) -> Option<&ParseError> {
        match self {
            Self::Syntax { err, .. } | Self::UnsupportedCombination { err, .. } => Some(err),
            _ => None,
        }
    }
}
