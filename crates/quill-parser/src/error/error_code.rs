//! Error codes for the Quill diagnostic system.
//!
//! Error codes are organized by category:
//! - `E1xx` - Syntax errors
//! - `E2xx` - Unsupported combinations

use std::fmt;

/// Error codes for categorizing diagnostic errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Syntax Errors (E1xx)
    // =========================================================================
    /// Unexpected placeholder.
    ///
    /// A `%` starts a directive that does not match the directive grammar,
    /// e.g. `%(name` or a lone trailing `%`.
    E100,

    /// Malformed named argument key.
    ///
    /// The key expression of a named placeholder is not an identifier
    /// followed by `.identifier` or `[digits]` segments.
    E101,

    /// Unknown type specifier.
    ///
    /// The specifier letter is neither built in nor a registered extension.
    E102,

    /// Numeric field out of range.
    ///
    /// A width, precision, explicit index or index accessor does not fit in
    /// the platform's address width.
    E103,

    // =========================================================================
    // Unsupported Combinations (E2xx)
    // =========================================================================
    /// Mixed placeholder styles.
    ///
    /// Named placeholders and positional placeholders appear in the same
    /// template.
    E200,
}

/// Broad category of a compile error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The template text is malformed.
    Syntax,
    /// The template is well formed but combines features that cannot be used
    /// together.
    UnsupportedCombination,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E100").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E103 => "E103",
            ErrorCode::E200 => "E200",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "unexpected placeholder",
            ErrorCode::E101 => "malformed named argument key",
            ErrorCode::E102 => "unknown type specifier",
            ErrorCode::E103 => "numeric field out of range",
            ErrorCode::E200 => "mixed placeholder styles",
        }
    }

    /// Returns the category this code belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ErrorCode::E100 | ErrorCode::E101 | ErrorCode::E102 | ErrorCode::E103 => {
                ErrorKind::Syntax
            }
            ErrorCode::E200 => ErrorKind::UnsupportedCombination,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E100.to_string(), "E100");
        assert_eq!(ErrorCode::E200.to_string(), "E200");
    }

    #[test]
    fn test_error_code_as_str() {
        assert_eq!(ErrorCode::E101.as_str(), "E101");
        assert_eq!(ErrorCode::E103.as_str(), "E103");
    }

    #[test]
    fn test_error_code_description() {
        assert_eq!(ErrorCode::E100.description(), "unexpected placeholder");
        assert_eq!(ErrorCode::E102.description(), "unknown type specifier");
    }

    #[test]
    fn test_error_code_kind() {
        assert_eq!(ErrorCode::E101.kind(), ErrorKind::Syntax);
        assert_eq!(ErrorCode::E103.kind(), ErrorKind::Syntax);
        assert_eq!(ErrorCode::E200.kind(), ErrorKind::UnsupportedCombination);
    }
}
