//! Labeled source spans for diagnostic messages.

use crate::Span;

/// A labeled span in a template.
///
/// # Primary vs Secondary Labels
///
/// - **Primary labels** mark the directive that caused the error.
/// - **Secondary labels** provide additional context, such as the first
///   placeholder of a conflicting style.
///
/// # Example
///
/// ```text
/// error[E200]: mixing positional and named placeholders is not supported
///   |
/// 1 | %s and %(name)s
///   | --     ^^^^^^^^ named placeholder
///   | |
///   | positional placeholder here
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    span: Span,
    message: String,
    is_primary: bool,
}

impl Label {
    /// Create a new primary label.
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            is_primary: true,
        }
    }

    /// Create a new secondary label.
    pub fn secondary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            is_primary: false,
        }
    }

    /// Get the span this label applies to.
    pub fn span(&self) -> Span {
        self.span
    }

    /// Get the label message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Check if this is a primary label.
    pub fn is_primary(&self) -> bool {
        self.is_primary
    }

    /// Check if this is a secondary label.
    pub fn is_secondary(&self) -> bool {
        !self.is_primary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_label() {
        let label = Label::primary(Span::new(10..20), "error here");

        assert_eq!(label.span().start(), 10);
        assert_eq!(label.span().end(), 20);
        assert_eq!(label.message(), "error here");
        assert!(label.is_primary());
        assert!(!label.is_secondary());
    }

    #[test]
    fn test_secondary_label() {
        let label = Label::secondary(Span::new(5..15), "first used here");

        assert_eq!(label.message(), "first used here");
        assert!(!label.is_primary());
        assert!(label.is_secondary());
    }
}
