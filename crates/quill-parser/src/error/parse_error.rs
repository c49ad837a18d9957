//! The ParseError type for wrapping compile diagnostics.

use std::fmt;

use crate::error::{Diagnostic, ErrorCode, ErrorKind};

/// Error type for template compilation.
///
/// Wraps the diagnostic that stopped compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    diagnostic: Diagnostic,
}

impl ParseError {
    /// Create a new parse error from a diagnostic.
    pub fn new(diagnostic: Diagnostic) -> Self {
        Self { diagnostic }
    }

    /// Get the diagnostic in this error.
    pub fn diagnostic(&self) -> &Diagnostic {
        &self.diagnostic
    }

    /// Get the error code of the diagnostic, if any.
    pub fn code(&self) -> Option<ErrorCode> {
        self.diagnostic.code()
    }

    /// Get the error category. Uncoded diagnostics count as syntax errors.
    pub fn kind(&self) -> ErrorKind {
        self.code().map_or(ErrorKind::Syntax, |code| code.kind())
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.diagnostic)
    }
}

impl std::error::Error for ParseError {}

impl From<Diagnostic> for ParseError {
    fn from(diagnostic: Diagnostic) -> Self {
        Self::new(diagnostic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_from_diagnostic() {
        let diag = Diagnostic::error("test error").with_code(ErrorCode::E101);
        let err: ParseError = diag.into();

        assert_eq!(err.diagnostic().message(), "test error");
        assert_eq!(err.code(), Some(ErrorCode::E101));
        assert_eq!(err.kind(), ErrorKind::Syntax);
    }

    #[test]
    fn test_parse_error_kind() {
        let err = ParseError::new(Diagnostic::error("mixed").with_code(ErrorCode::E200));
        assert_eq!(err.kind(), ErrorKind::UnsupportedCombination);

        let uncoded = ParseError::new(Diagnostic::error("plain"));
        assert_eq!(uncoded.kind(), ErrorKind::Syntax);
    }

    #[test]
    fn test_parse_error_display() {
        let err: ParseError = Diagnostic::error("unexpected placeholder")
            .with_code(ErrorCode::E100)
            .into();

        assert_eq!(err.to_string(), "error[E100]: unexpected placeholder");
    }
}
