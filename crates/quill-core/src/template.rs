//! Compiled template model.
//!
//! A [`Template`] is the immutable result of compiling a template string: an
//! ordered list of [`Node`]s, each either literal text or a [`Placeholder`]
//! describing one `%` directive.

use std::fmt;

use crate::span::Span;

/// One step of a named argument's key path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Accessor {
    /// An identifier, as in `(name)` or `(user.name)`.
    Key(String),
    /// A bracketed index, as in `(items[0])`.
    Index(usize),
}

impl fmt::Display for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => f.write_str(key),
            Self::Index(index) => write!(f, "{index}"),
        }
    }
}

/// How a placeholder selects its argument.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ArgumentRef {
    /// The argument at the implicit cursor, which then advances.
    #[default]
    Next,
    /// A 1-based explicit position, as in `%2$s`.
    Index(usize),
    /// A key path into the keyed argument, as in `%(user.name)s`.
    Keys(Vec<Accessor>),
}

/// Padding requested by a placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadSpec {
    /// `0`: zeros, inserted between the sign and the body.
    Zero,
    /// `'c`: an arbitrary pad character.
    Char(char),
}

impl PadSpec {
    /// The character used to fill.
    pub fn pad_char(&self) -> char {
        match self {
            Self::Zero => '0',
            Self::Char(c) => *c,
        }
    }
}

/// A parsed `%` directive.
///
/// # Example
///
/// ```
/// use quill_core::{Span, template::{PadSpec, Placeholder}};
///
/// let placeholder = Placeholder::new("%05.2f", Span::new(0..6), 'f')
///     .with_pad(PadSpec::Zero)
///     .with_width(5)
///     .with_precision(2);
///
/// assert_eq!(placeholder.width(), Some(5));
/// assert_eq!(placeholder.pad(), Some(PadSpec::Zero));
/// assert!(!placeholder.is_named());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    raw: String,
    span: Span,
    argument: ArgumentRef,
    force_sign: bool,
    pad: Option<PadSpec>,
    left_align: bool,
    width: Option<usize>,
    precision: Option<usize>,
    modifier: Option<String>,
    specifier: char,
}

impl Placeholder {
    /// Create a placeholder with default flags consuming the next argument.
    pub fn new(raw: impl Into<String>, span: Span, specifier: char) -> Self {
        Self {
            raw: raw.into(),
            span,
            argument: ArgumentRef::Next,
            force_sign: false,
            pad: None,
            left_align: false,
            width: None,
            precision: None,
            modifier: None,
            specifier,
        }
    }

    pub fn with_argument(mut self, argument: ArgumentRef) -> Self {
        self.argument = argument;
        self
    }

    pub fn with_force_sign(mut self, force_sign: bool) -> Self {
        self.force_sign = force_sign;
        self
    }

    pub fn with_pad(mut self, pad: PadSpec) -> Self {
        self.pad = Some(pad);
        self
    }

    pub fn with_left_align(mut self, left_align: bool) -> Self {
        self.left_align = left_align;
        self
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = Some(precision);
        self
    }

    pub fn with_modifier(mut self, modifier: impl Into<String>) -> Self {
        self.modifier = Some(modifier.into());
        self
    }

    /// The directive exactly as written in the template.
    pub fn raw_text(&self) -> &str {
        &self.raw
    }

    /// Byte range of the directive in the template.
    pub fn span(&self) -> Span {
        self.span
    }

    pub fn argument(&self) -> &ArgumentRef {
        &self.argument
    }

    /// The 1-based explicit index, if the directive has one.
    pub fn explicit_index(&self) -> Option<usize> {
        match self.argument {
            ArgumentRef::Index(index) => Some(index),
            _ => None,
        }
    }

    /// The key path, if the directive is named.
    pub fn key_path(&self) -> Option<&[Accessor]> {
        match &self.argument {
            ArgumentRef::Keys(keys) => Some(keys),
            _ => None,
        }
    }

    /// Returns `true` if the directive selects its argument by key path.
    pub fn is_named(&self) -> bool {
        matches!(self.argument, ArgumentRef::Keys(_))
    }

    pub fn force_sign(&self) -> bool {
        self.force_sign
    }

    pub fn pad(&self) -> Option<PadSpec> {
        self.pad
    }

    pub fn left_align(&self) -> bool {
        self.left_align
    }

    pub fn width(&self) -> Option<usize> {
        self.width
    }

    pub fn precision(&self) -> Option<usize> {
        self.precision
    }

    /// The bracketed payload, `Some("")` for `[]`.
    pub fn modifier(&self) -> Option<&str> {
        self.modifier.as_deref()
    }

    pub fn specifier(&self) -> char {
        self.specifier
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// A compiled template element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Text emitted verbatim.
    Literal(String),
    /// A directive to substitute.
    Placeholder(Placeholder),
}

/// A compiled template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    nodes: Vec<Node>,
}

impl Template {
    pub fn new(source: impl Into<String>, nodes: Vec<Node>) -> Self {
        Self {
            source: source.into(),
            nodes,
        }
    }

    /// The template string this was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Iterate over the placeholders in template order.
    pub fn placeholders(&self) -> impl Iterator<Item = &Placeholder> {
        self.nodes.iter().filter_map(|node| match node {
            Node::Placeholder(placeholder) => Some(placeholder),
            Node::Literal(_) => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_defaults() {
        let placeholder = Placeholder::new("%s", Span::new(0..2), 's');

        assert_eq!(placeholder.argument(), &ArgumentRef::Next);
        assert!(placeholder.explicit_index().is_none());
        assert!(placeholder.key_path().is_none());
        assert!(!placeholder.force_sign());
        assert!(placeholder.pad().is_none());
        assert!(!placeholder.left_align());
        assert!(placeholder.width().is_none());
        assert!(placeholder.precision().is_none());
        assert!(placeholder.modifier().is_none());
        assert_eq!(placeholder.to_string(), "%s");
    }

    #[test]
    fn test_argument_accessors() {
        let indexed = Placeholder::new("%2$s", Span::new(0..4), 's')
            .with_argument(ArgumentRef::Index(2));
        assert_eq!(indexed.explicit_index(), Some(2));
        assert!(!indexed.is_named());

        let keys = vec![Accessor::Key("user".to_string()), Accessor::Index(0)];
        let named = Placeholder::new("%(user[0])s", Span::new(0..11), 's')
            .with_argument(ArgumentRef::Keys(keys.clone()));
        assert!(named.is_named());
        assert_eq!(named.key_path(), Some(keys.as_slice()));
    }

    #[test]
    fn test_pad_char() {
        assert_eq!(PadSpec::Zero.pad_char(), '0');
        assert_eq!(PadSpec::Char('*').pad_char(), '*');
    }

    #[test]
    fn test_empty_modifier_is_present() {
        let placeholder = Placeholder::new("%[]S", Span::new(0..4), 'S').with_modifier("");
        assert_eq!(placeholder.modifier(), Some(""));
    }

    #[test]
    fn test_template_placeholders() {
        let template = Template::new(
            "a %s b",
            vec![
                Node::Literal("a ".to_string()),
                Node::Placeholder(Placeholder::new("%s", Span::new(2..4), 's')),
                Node::Literal(" b".to_string()),
            ],
        );

        assert_eq!(template.source(), "a %s b");
        assert_eq!(template.nodes().len(), 3);
        let specifiers: Vec<char> = template.placeholders().map(|p| p.specifier()).collect();
        assert_eq!(specifiers, ['s']);
    }

    #[test]
    fn test_accessor_display() {
        assert_eq!(Accessor::Key("name".to_string()).to_string(), "name");
        assert_eq!(Accessor::Index(3).to_string(), "3");
    }
}
