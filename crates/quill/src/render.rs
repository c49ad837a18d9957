//! Directive formatter.
//!
//! Walks a compiled [`Template`], resolves each placeholder's argument,
//! converts it with an extension or a built-in specifier and pads the
//! result.

use std::{borrow::Cow, iter, sync::Arc};

use log::trace;
use serde::Serialize;

use quill_core::{
    Template, Value,
    number::{
        number_to_string, parse_float, parse_int, string_to_number, to_binary_string,
        to_exponential, to_fixed, to_precision, to_uint16, to_uint32,
    },
    specifier::Builtin,
    template::{ArgumentRef, Node, Placeholder},
};
use quill_parser::error::{Diagnostic, ErrorCode, ParseError};

use crate::{QuillError, extension::Extension, registry::ExtensionRegistry};

/// Largest indent of the `j` specifier.
const MAX_JSON_INDENT: usize = 10;

/// Largest precision honored by the `e`, `f` and `g` specifiers.
const MAX_NUMBER_PRECISION: usize = 100;

/// How a placeholder's argument becomes text.
enum Conversion {
    Builtin(Builtin),
    Extension(Arc<dyn Extension>),
}

/// Renders one template against one argument list.
pub(crate) struct Renderer<'a> {
    template: &'a Template,
    args: &'a [Value],
    registry: &'a ExtensionRegistry,
    cursor: usize,
}

impl<'a> Renderer<'a> {
    pub(crate) fn new(
        template: &'a Template,
        args: &'a [Value],
        registry: &'a ExtensionRegistry,
    ) -> Self {
        Self {
            template,
            args,
            registry,
            cursor: 0,
        }
    }

    /// Render every node, failing on the first error.
    pub(crate) fn render(mut self) -> Result<String, QuillError> {
        let mut output = String::new();
        for node in self.template.nodes() {
            match node {
                Node::Literal(text) => output.push_str(text),
                Node::Placeholder(placeholder) => {
                    let text = self.placeholder(placeholder)?;
                    output.push_str(&text);
                }
            }
        }

        trace!(template = self.template.source(), consumed = self.cursor; "Rendered template");
        Ok(output)
    }

    fn placeholder(&mut self, placeholder: &Placeholder) -> Result<String, QuillError> {
        let argument = self.resolve(placeholder)?;

        match self.conversion(placeholder)? {
            Conversion::Extension(extension) => {
                let text = extension
                    .convert(placeholder, &argument)
                    .map_err(|source| QuillError::Extension {
                        specifier: placeholder.specifier(),
                        source,
                        span: placeholder.span(),
                        src: self.src(),
                    })?;
                Ok(pad(placeholder, "", &truncate(text, placeholder.precision())))
            }
            Conversion::Builtin(builtin) => self.builtin(builtin, placeholder, &argument),
        }
    }

    /// Pick the conversion for a placeholder. Extensions win over built-ins.
    fn conversion(&self, placeholder: &Placeholder) -> Result<Conversion, QuillError> {
        let specifier = placeholder.specifier();
        if let Some(extension) = self.registry.get(specifier) {
            return Ok(Conversion::Extension(extension));
        }
        if let Some(builtin) = Builtin::from_char(specifier) {
            return Ok(Conversion::Builtin(builtin));
        }

        let diagnostic = Diagnostic::error(format!("unknown type specifier '{specifier}'"))
            .with_code(ErrorCode::E102)
            .with_label(placeholder.span(), ErrorCode::E102.description());
        Err(QuillError::new_parse_error(
            ParseError::new(diagnostic),
            self.src(),
        ))
    }

    // =========================================================================
    // Argument resolution
    // =========================================================================

    fn resolve(&mut self, placeholder: &Placeholder) -> Result<Cow<'a, Value>, QuillError> {
        match placeholder.argument() {
            ArgumentRef::Next => {
                let value = self.argument(self.cursor, placeholder)?;
                self.cursor += 1;
                Ok(Cow::Borrowed(value))
            }
            ArgumentRef::Index(position) => {
                let index = position.checked_sub(1).ok_or_else(|| QuillError::MissingArgument {
                    position: 0,
                    span: placeholder.span(),
                    src: self.src(),
                })?;
                self.argument(index, placeholder).map(Cow::Borrowed)
            }
            ArgumentRef::Keys(keys) => {
                let mut value = Cow::Borrowed(self.argument(self.cursor, placeholder)?);
                for key in keys {
                    let next = match value {
                        Cow::Borrowed(value) => value.get(key),
                        Cow::Owned(value) => {
                            value.get(key).map(|next| Cow::Owned(next.into_owned()))
                        }
                    };
                    value = next.ok_or_else(|| QuillError::MissingProperty {
                        key: key.to_string(),
                        span: placeholder.span(),
                        src: self.src(),
                    })?;
                }
                Ok(value)
            }
        }
    }

    fn argument(&self, index: usize, placeholder: &Placeholder) -> Result<&'a Value, QuillError> {
        self.args
            .get(index)
            .ok_or_else(|| QuillError::MissingArgument {
                position: index + 1,
                span: placeholder.span(),
                src: self.src(),
            })
    }

    fn src(&self) -> String {
        self.template.source().to_string()
    }

    // =========================================================================
    // Built-in conversions
    // =========================================================================

    fn builtin(
        &self,
        builtin: Builtin,
        placeholder: &Placeholder,
        argument: &Value,
    ) -> Result<String, QuillError> {
        let evaluated;
        let argument = if builtin.evaluates_lazy() && argument.is_lazy() {
            evaluated = argument.evaluated();
            &evaluated
        } else {
            argument
        };

        if builtin.takes_numeric_argument() && !argument.is_numeric() {
            return Err(QuillError::Type {
                found: argument.type_name(),
                span: placeholder.span(),
                src: self.src(),
            });
        }

        let precision = placeholder.precision();
        let number_precision = precision.map(|p| p.min(MAX_NUMBER_PRECISION));
        let text = match builtin {
            Builtin::Binary => to_binary_string(parse_int(&argument.to_text())),
            Builtin::Char => {
                let code = to_uint16(parse_int(&argument.to_text()));
                char::from_u32(u32::from(code))
                    .unwrap_or(char::REPLACEMENT_CHARACTER)
                    .to_string()
            }
            Builtin::Decimal | Builtin::Integer => number_to_string(parse_int(&argument.to_text())),
            Builtin::Exponential => {
                to_exponential(parse_float(&argument.to_text()), number_precision)
            }
            Builtin::Fixed => {
                let number = parse_float(&argument.to_text());
                match number_precision {
                    Some(digits) => to_fixed(number, digits),
                    None => number_to_string(number),
                }
            }
            Builtin::General => match number_precision {
                Some(digits) => {
                    number_to_string(string_to_number(&to_precision(argument.to_number(), digits)))
                }
                None => number_to_string(parse_float(&argument.to_text())),
            },
            Builtin::Octal => format!("{:o}", to_uint32(parse_int(&argument.to_text()))),
            Builtin::Unsigned => to_uint32(parse_int(&argument.to_text())).to_string(),
            Builtin::HexLower => format!("{:x}", to_uint32(parse_int(&argument.to_text()))),
            Builtin::HexUpper => format!("{:X}", to_uint32(parse_int(&argument.to_text()))),
            Builtin::String | Builtin::Primitive => truncate(argument.to_text(), precision),
            Builtin::Boolean => truncate(argument.is_truthy().to_string(), precision),
            Builtin::TypeName => truncate(argument.type_name().to_string(), precision),
            Builtin::Json => return self.json(placeholder, argument),
        };

        if builtin.is_signed_number() {
            let is_positive = argument.to_number() >= 0.0;
            if !is_positive || placeholder.force_sign() {
                let sign = if is_positive { "+" } else { "-" };
                let body = text.strip_prefix(['+', '-']).unwrap_or(&text);
                return Ok(pad(placeholder, sign, body));
            }
        }
        Ok(pad(placeholder, "", &text))
    }

    /// Serialize as JSON, indenting by the width (at most ten spaces).
    ///
    /// The result is neither signed nor padded.
    fn json(&self, placeholder: &Placeholder, argument: &Value) -> Result<String, QuillError> {
        let indent = placeholder.width().unwrap_or(0).min(MAX_JSON_INDENT);
        let to_error = |source| QuillError::Json {
            source,
            span: placeholder.span(),
            src: self.src(),
        };

        if indent == 0 {
            return serde_json::to_string(argument).map_err(to_error);
        }

        let indent = " ".repeat(indent);
        let mut out = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
        argument.serialize(&mut serializer).map_err(to_error)?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }
}

/// Keep the first `precision` characters.
fn truncate(text: String, precision: Option<usize>) -> String {
    match precision {
        Some(limit) if text.chars().count() > limit => text.chars().take(limit).collect(),
        _ => text,
    }
}

/// Pad `sign + body` to the placeholder's width.
///
/// Zero padding goes between the sign and the body, other padding before
/// the sign, and left alignment pads after the body.
fn pad(placeholder: &Placeholder, sign: &str, body: &str) -> String {
    let pad_char = placeholder.pad().map_or(' ', |pad| pad.pad_char());
    let len = sign.chars().count() + body.chars().count();
    let fill = placeholder
        .width()
        .map_or(0, |width| width.saturating_sub(len));
    let padding: String = iter::repeat_n(pad_char, fill).collect();

    if placeholder.left_align() {
        format!("{sign}{body}{padding}")
    } else if pad_char == '0' {
        format!("{sign}{padding}{body}")
    } else {
        format!("{padding}{sign}{body}")
    }
}

#[cfg(test)]
mod tests {
    use quill_core::{Span, template::PadSpec};

    use super::*;

    fn placeholder() -> Placeholder {
        Placeholder::new("%s", Span::new(0..2), 's')
    }

    #[test]
    fn test_pad_without_width() {
        assert_eq!(pad(&placeholder(), "-", "5"), "-5");
    }

    #[test]
    fn test_pad_right_aligned() {
        let p = placeholder().with_width(4);
        assert_eq!(pad(&p, "-", "5"), "  -5");
    }

    #[test]
    fn test_pad_zero_after_sign() {
        let p = placeholder().with_width(4).with_pad(PadSpec::Zero);
        assert_eq!(pad(&p, "-", "5"), "-005");
    }

    #[test]
    fn test_pad_custom_zero_char_after_sign() {
        let p = placeholder().with_width(4).with_pad(PadSpec::Char('0'));
        assert_eq!(pad(&p, "+", "5"), "+005");
    }

    #[test]
    fn test_pad_custom_char_before_sign() {
        let p = placeholder().with_width(4).with_pad(PadSpec::Char('*'));
        assert_eq!(pad(&p, "+", "5"), "**+5");
    }

    #[test]
    fn test_pad_left_aligned() {
        let p = placeholder()
            .with_width(4)
            .with_pad(PadSpec::Zero)
            .with_left_align(true);
        assert_eq!(pad(&p, "-", "5"), "-500");
    }

    #[test]
    fn test_pad_counts_chars() {
        let p = placeholder().with_width(3);
        assert_eq!(pad(&p, "", "é"), "  é");
    }

    #[test]
    fn test_pad_narrower_than_content() {
        let p = placeholder().with_width(1);
        assert_eq!(pad(&p, "", "abc"), "abc");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("héllo".to_string(), Some(2)), "hé");
        assert_eq!(truncate("abc".to_string(), Some(0)), "");
        assert_eq!(truncate("abc".to_string(), Some(5)), "abc");
        assert_eq!(truncate("abc".to_string(), None), "abc");
    }
}
