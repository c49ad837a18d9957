//! Template compiler.
//!
//! Splits a template into literal text, escaped percent signs and `%`
//! directives with `winnow`, then validates each directive into a
//! [`Placeholder`]. Compilation stops at the first error.
//!
//! Directive grammar, in order, every part but the last optional:
//!
//! ```text
//! %  [index$ | (key)]  [+]  [0 | 'c]  [-]  [width]  [.precision]  [[modifier]]  letter
//! ```

use std::ops::Range;

use log::trace;
use winnow::{
    Parser as _,
    ascii::digit1,
    combinator::{alt, cut_err, delimited, opt, preceded, repeat},
    error::{ContextError, ErrMode, ModalResult},
    stream::{LocatingSlice, Location},
    token::{none_of, one_of, take_till, take_while},
};

use quill_core::{
    specifier::Builtin,
    template::{Accessor, ArgumentRef, Node, PadSpec, Placeholder, Template},
};

use crate::{
    Span,
    error::{Diagnostic, ErrorCode, ParseError},
};

/// Rich diagnostic information for directive syntax errors.
///
/// Attached to winnow errors via `.context()`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct DirectiveDiagnostic {
    code: ErrorCode,
    message: &'static str,
    help: Option<&'static str>,
    /// The error span covers from `start` to the error position.
    start: usize,
}

type Input<'a> = LocatingSlice<&'a str>;
type IResult<'a, O> = ModalResult<O, ContextError<DirectiveDiagnostic>>;

/// How a directive selects its argument, before validation.
#[derive(Debug, Clone)]
enum Selector<'a> {
    /// Digits of `n$`.
    Index(&'a str),
    /// The text between parentheses and its byte range.
    Keys(&'a str, Range<usize>),
}

/// A syntactically matched directive, before validation.
#[derive(Debug, Clone)]
struct Directive<'a> {
    selector: Option<Selector<'a>>,
    force_sign: bool,
    pad: Option<PadSpec>,
    left_align: bool,
    width: Option<&'a str>,
    precision: Option<&'a str>,
    modifier: Option<&'a str>,
    specifier: char,
}

#[derive(Debug, Clone)]
enum Segment<'a> {
    Text(&'a str),
    Percent,
    Directive(Directive<'a>, Span),
}

/// One step of a key path, before index digits are converted.
#[derive(Debug, Clone)]
enum KeySegment<'a> {
    Key(&'a str),
    Index(&'a str),
}

// =============================================================================
// Grammar
// =============================================================================

/// Parse a run of text up to the next `%`.
fn literal_text<'a>(input: &mut Input<'a>) -> IResult<'a, Segment<'a>> {
    take_till(1.., '%').map(Segment::Text).parse_next(input)
}

/// Parse `%%`.
fn escaped_percent<'a>(input: &mut Input<'a>) -> IResult<'a, Segment<'a>> {
    "%%".value(Segment::Percent).parse_next(input)
}

/// Parse `n$` (no leading zero) or `(key expression)`.
fn selector<'a>(input: &mut Input<'a>) -> IResult<'a, Selector<'a>> {
    alt((
        (digit1, '$')
            .map(|(digits, _)| digits)
            .verify(|digits: &str| !digits.starts_with('0'))
            .map(Selector::Index),
        delimited('(', take_till(1.., ')').with_span(), ')')
            .map(|(keys, range)| Selector::Keys(keys, range)),
    ))
    .parse_next(input)
}

/// Parse `0` or `'` followed by any character but `$`.
fn pad_spec<'a>(input: &mut Input<'a>) -> IResult<'a, PadSpec> {
    alt((
        '0'.value(PadSpec::Zero),
        preceded('\'', none_of('$')).map(PadSpec::Char),
    ))
    .parse_next(input)
}

/// Parse everything after the `%` of a directive.
fn directive_body<'a>(input: &mut Input<'a>) -> IResult<'a, Directive<'a>> {
    (
        opt(selector),
        opt('+'),
        opt(pad_spec),
        opt('-'),
        opt(digit1),
        opt(preceded('.', digit1)),
        opt(delimited('[', take_till(0.., ']'), ']')),
        one_of(|c: char| c.is_ascii_alphabetic()),
    )
        .map(
            |(selector, sign, pad, align, width, precision, modifier, specifier)| Directive {
                selector,
                force_sign: sign.is_some(),
                pad,
                left_align: align.is_some(),
                width,
                precision,
                modifier,
                specifier,
            },
        )
        .parse_next(input)
}

/// Parse a complete directive.
///
/// Commits after the `%`: anything that does not match the directive
/// grammar is an error rather than literal text.
fn directive<'a>(input: &mut Input<'a>) -> IResult<'a, Segment<'a>> {
    let start = input.current_token_start();

    preceded(
        '%',
        cut_err(directive_body).context(DirectiveDiagnostic {
            code: ErrorCode::E100,
            message: "unexpected placeholder",
            help: Some(
                "a placeholder is `%`, optional flags, width and precision, then a type letter; write `%%` for a literal `%`",
            ),
            start,
        }),
    )
    .with_span()
    .map(|(directive, range)| Segment::Directive(directive, Span::new(range)))
    .parse_next(input)
}

fn segment<'a>(input: &mut Input<'a>) -> IResult<'a, Segment<'a>> {
    alt((literal_text, escaped_percent, directive)).parse_next(input)
}

/// Parse an identifier: a letter or underscore, then letters, digits or
/// underscores.
fn identifier<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    (
        one_of(|c: char| c.is_ascii_alphabetic() || c == '_'),
        take_while(0.., |c: char| c.is_ascii_alphanumeric() || c == '_'),
    )
        .take()
        .parse_next(input)
}

/// Parse `ident` followed by any number of `.ident` and `[digits]`.
fn key_path<'a>(input: &mut &'a str) -> ModalResult<(&'a str, Vec<KeySegment<'a>>)> {
    (
        identifier,
        repeat(
            0..,
            alt((
                preceded('.', identifier).map(KeySegment::Key),
                delimited('[', digit1, ']').map(KeySegment::Index),
            )),
        ),
    )
        .parse_next(input)
}

// =============================================================================
// Compiler
// =============================================================================

/// Compiles one template, tracking placeholder styles across directives.
pub(crate) struct Compiler<'s, F> {
    source: &'s str,
    is_extension: F,
    first_named: Option<Span>,
    first_positional: Option<Span>,
}

impl<'s, F> Compiler<'s, F>
where
    F: Fn(char) -> bool,
{
    /// Create a compiler for `source`.
    ///
    /// `is_extension` reports whether a letter that is not a built-in
    /// specifier is a registered extension.
    pub(crate) fn new(source: &'s str, is_extension: F) -> Self {
        Self {
            source,
            is_extension,
            first_named: None,
            first_positional: None,
        }
    }

    /// Compile the whole template.
    pub(crate) fn compile(mut self) -> Result<Template, ParseError> {
        let mut input = LocatingSlice::new(self.source);
        let mut nodes = Vec::new();

        while !input.is_empty() {
            let segment = match segment(&mut input) {
                Ok(segment) => segment,
                Err(e) => {
                    let error_pos = input.current_token_start();
                    return Err(self.convert_err_mode(e, error_pos).into());
                }
            };

            let node = match segment {
                Segment::Text(text) => Node::Literal(text.to_string()),
                Segment::Percent => Node::Literal("%".to_string()),
                Segment::Directive(directive, span) => {
                    Node::Placeholder(self.placeholder(directive, span)?)
                }
            };
            nodes.push(node);
        }

        trace!(template = self.source, nodes = nodes.len(); "Compiled template");
        Ok(Template::new(self.source, nodes))
    }

    /// Validate a matched directive into a placeholder.
    fn placeholder(&mut self, directive: Directive<'_>, span: Span) -> Result<Placeholder, Diagnostic> {
        let argument = match directive.selector {
            None => ArgumentRef::Next,
            Some(Selector::Index(digits)) => {
                ArgumentRef::Index(parse_field(digits, span, "explicit index")?)
            }
            Some(Selector::Keys(keys, range)) => {
                ArgumentRef::Keys(parse_keys(keys, Span::new(range))?)
            }
        };

        let mut placeholder = Placeholder::new(&self.source[span.range()], span, directive.specifier)
            .with_force_sign(directive.force_sign)
            .with_left_align(directive.left_align);
        if let Some(pad) = directive.pad {
            placeholder = placeholder.with_pad(pad);
        }
        if let Some(width) = directive.width {
            placeholder = placeholder.with_width(parse_field(width, span, "width")?);
        }
        if let Some(precision) = directive.precision {
            placeholder = placeholder.with_precision(parse_field(precision, span, "precision")?);
        }
        if let Some(modifier) = directive.modifier {
            placeholder = placeholder.with_modifier(modifier);
        }

        self.check_style(matches!(argument, ArgumentRef::Keys(_)), span)?;
        self.check_specifier(directive.specifier, span)?;

        Ok(placeholder.with_argument(argument))
    }

    /// Reject a placeholder whose style conflicts with an earlier one.
    fn check_style(&mut self, is_named: bool, span: Span) -> Result<(), Diagnostic> {
        let (own, other) = if is_named {
            (&mut self.first_named, self.first_positional)
        } else {
            (&mut self.first_positional, self.first_named)
        };

        if let Some(other_span) = other {
            let (label, other_label) = if is_named {
                ("named placeholder", "positional placeholder used here")
            } else {
                ("positional placeholder", "named placeholder used here")
            };
            return Err(Diagnostic::error(
                "mixing positional and named placeholders is not supported",
            )
            .with_code(ErrorCode::E200)
            .with_label(span, label)
            .with_secondary_label(other_span, other_label)
            .with_help("use either positional or named placeholders within one template"));
        }

        own.get_or_insert(span);
        Ok(())
    }

    fn check_specifier(&self, specifier: char, span: Span) -> Result<(), Diagnostic> {
        if Builtin::from_char(specifier).is_some() || (self.is_extension)(specifier) {
            return Ok(());
        }

        // The specifier is the last character of the directive and is ASCII.
        let letter = Span::new(span.end() - 1..span.end());
        Err(
            Diagnostic::error(format!("unknown type specifier '{specifier}'"))
                .with_code(ErrorCode::E102)
                .with_label(letter, ErrorCode::E102.description())
                .with_help(
                    "built-in specifiers are b, c, d, e, f, g, i, j, o, s, t, T, u, v, x and X; other letters need a registered extension",
                ),
        )
    }

    /// Convert an ErrMode and error position to a Diagnostic.
    ///
    /// The span runs from the directive's `%` through the offending
    /// character. Falls back to E100 if no diagnostic context is found.
    fn convert_err_mode(
        &self,
        err: ErrMode<ContextError<DirectiveDiagnostic>>,
        error_pos: usize,
    ) -> Diagnostic {
        let context_error = match err {
            ErrMode::Backtrack(ctx) | ErrMode::Cut(ctx) => ctx,
            ErrMode::Incomplete(_) => ContextError::new(),
        };

        let end = self.source[error_pos..]
            .chars()
            .next()
            .map_or(error_pos, |c| error_pos + c.len_utf8());

        if let Some(DirectiveDiagnostic {
            code,
            message,
            help,
            start,
        }) = context_error.context().next()
        {
            let mut diag = Diagnostic::error(*message)
                .with_code(*code)
                .with_label(Span::new(*start..end), code.description());
            if let Some(h) = help {
                diag = diag.with_help(*h);
            }
            return diag;
        }

        Diagnostic::error("unexpected placeholder")
            .with_code(ErrorCode::E100)
            .with_label(Span::new(error_pos..end), ErrorCode::E100.description())
    }
}

/// Convert a run of ASCII digits, rejecting values that overflow `usize`.
fn parse_field(digits: &str, span: Span, field: &str) -> Result<usize, Diagnostic> {
    digits.parse().map_err(|_| {
        Diagnostic::error(format!("{field} `{digits}` is out of range"))
            .with_code(ErrorCode::E103)
            .with_label(span, ErrorCode::E103.description())
            .with_help(format!("the largest supported value is {}", usize::MAX))
    })
}

/// Parse a key expression into accessors.
fn parse_keys(text: &str, span: Span) -> Result<Vec<Accessor>, Diagnostic> {
    let (head, rest) = key_path.parse(text).map_err(|_| {
        Diagnostic::error("failed to parse named argument key")
            .with_code(ErrorCode::E101)
            .with_label(span, ErrorCode::E101.description())
            .with_help("keys look like `name`, `user.name` or `items[0].name`")
    })?;

    let mut accessors = Vec::with_capacity(rest.len() + 1);
    accessors.push(Accessor::Key(head.to_string()));
    for segment in rest {
        accessors.push(match segment {
            KeySegment::Key(key) => Accessor::Key(key.to_string()),
            KeySegment::Index(digits) => Accessor::Index(parse_field(digits, span, "index")?),
        });
    }
    Ok(accessors)
}
