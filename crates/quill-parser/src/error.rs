//! Error and diagnostic system for the Quill template compiler.
//!
//! This module provides:
//! - Error codes for documentation and searchability
//! - Labeled spans pointing at the offending directive
//! - Help text suggesting a fix
//!
//! # Overview
//!
//! The error system is built around the [`Diagnostic`] type, which represents
//! a single error message with an error code, one or more source locations,
//! and optional help text. Compilation stops at the first error, which is
//! returned wrapped in a [`ParseError`].
//!
//! # Example
//!
//! ```
//! # use quill_parser::error::{Diagnostic, ErrorCode};
//! # use quill_parser::Span;
//!
//! let diag = Diagnostic::error("mixing positional and named placeholders is not supported")
//!     .with_code(ErrorCode::E200)
//!     .with_label(Span::new(10..16), "named placeholder")
//!     .with_secondary_label(Span::new(0..2), "positional placeholder here")
//!     .with_help("use either positional or named placeholders in one template");
//! ```

mod diagnostic;
mod error_code;
mod label;
mod parse_error;

pub use diagnostic::Diagnostic;
pub use error_code::{ErrorCode, ErrorKind};
pub use label::Label;
pub use parse_error::ParseError;
