//! The core diagnostic type for the Quill error system.

use std::fmt;

use crate::{
    Span,
    error::{error_code::ErrorCode, label::Label},
};

/// A rich diagnostic message with source location information.
///
/// Diagnostics carry:
/// - An optional error code for documentation and searchability
/// - A primary message describing the issue
/// - One or more labeled template spans
/// - Optional help text with suggestions
///
/// # Example
///
/// ```text
/// error[E102]: unknown type specifier 'k'
///   |
/// 1 | %2k
///   | ^^^ unknown type specifier
///   |
///   = help: use a built-in specifier or register an extension for 'k'
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    code: Option<ErrorCode>,
    message: String,
    labels: Vec<Label>,
    help: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    ///
    /// # Example
    ///
    /// ```
    /// # use quill_parser::error::{Diagnostic, ErrorCode};
    /// # use quill_parser::Span;
    ///
    /// let diag = Diagnostic::error("unknown type specifier 'k'")
    ///     .with_code(ErrorCode::E102)
    ///     .with_label(Span::new(0..3), "unknown type specifier")
    ///     .with_help("use a built-in specifier");
    /// ```
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
            labels: Vec::new(),
            help: None,
        }
    }

    /// Get the error code, if any.
    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    /// Get the primary message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get all labels attached to this diagnostic.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Get the first primary label, if any.
    pub fn primary_label(&self) -> Option<&Label> {
        self.labels.iter().find(|label| label.is_primary())
    }

    /// Get the help text, if any.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Set the error code.
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Add a primary label to this diagnostic.
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(span, message));
        self
    }

    /// Add a secondary label to this diagnostic.
    pub fn with_secondary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::secondary(span, message));
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: "error[E100]: message" or "error: message"
        f.write_str("error")?;
        if let Some(code) = self.code {
            write!(f, "[{}]", code)?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for Diagnostic {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_new() {
        let diag = Diagnostic::error("test error");

        assert_eq!(diag.message(), "test error");
        assert!(diag.code().is_none());
        assert!(diag.labels().is_empty());
        assert!(diag.primary_label().is_none());
        assert!(diag.help().is_none());
    }

    #[test]
    fn test_diagnostic_with_labels() {
        let diag = Diagnostic::error("mixed styles")
            .with_secondary_label(Span::new(0..2), "positional placeholder here")
            .with_label(Span::new(7..15), "named placeholder");

        assert_eq!(diag.labels().len(), 2);
        assert!(diag.labels()[0].is_secondary());
        let primary = diag.primary_label().unwrap();
        assert_eq!(primary.span(), Span::new(7..15));
        assert_eq!(primary.message(), "named placeholder");
    }

    #[test]
    fn test_diagnostic_display_with_code() {
        let diag = Diagnostic::error("unexpected placeholder").with_code(ErrorCode::E100);

        assert_eq!(diag.to_string(), "error[E100]: unexpected placeholder");
    }

    #[test]
    fn test_diagnostic_display_without_code() {
        let diag = Diagnostic::error("something went wrong");

        assert_eq!(diag.to_string(), "error: something went wrong");
    }

    #[test]
    fn test_diagnostic_builder_chain() {
        let diag = Diagnostic::error("unknown type specifier 'k'")
            .with_code(ErrorCode::E102)
            .with_label(Span::new(0..3), "unknown type specifier")
            .with_help("register an extension for 'k'");

        assert_eq!(diag.code(), Some(ErrorCode::E102));
        assert_eq!(diag.labels().len(), 1);
        assert_eq!(diag.help(), Some("register an extension for 'k'"));
    }
}
