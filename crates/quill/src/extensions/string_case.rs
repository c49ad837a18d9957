//! Case conversion of string arguments.

use quill_core::{Value, template::Placeholder};

use crate::extension::{Extension, ExtensionError};

/// Renders the argument's text with a case transform chosen by the bracket
/// modifier.
///
/// | modifier      | result                                          |
/// |---------------|-------------------------------------------------|
/// | none or `[U]` | upper case                                      |
/// | `[]`          | unchanged                                       |
/// | `[l]`         | lower case                                      |
/// | `[F]` / `[f]` | first character upper / lower case              |
/// | `[Fl]`        | first character upper case, the rest lower case |
/// | `[fU]`        | first character lower case, the rest upper case |
/// | `[C]`         | first character of every word upper case        |
/// | `[Cl]`        | like `[C]`, the rest lower case                 |
///
/// # Example
///
/// ```
/// use quill::{Quill, Value, extensions::StringCase};
///
/// let quill = Quill::new();
/// quill.register_extension("S", StringCase).unwrap();
///
/// let name = [Value::from("dOLLY mOLLY")];
/// assert_eq!(quill.format("%S", &name).unwrap(), "DOLLY MOLLY");
/// assert_eq!(quill.format("%[Cl]S", &name).unwrap(), "Dolly Molly");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct StringCase;

/// Which part of the text a modifier changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Leading {
    Keep,
    Upper,
    Lower,
    EveryWord,
}

impl Extension for StringCase {
    fn convert(&self, placeholder: &Placeholder, argument: &Value) -> Result<String, ExtensionError> {
        let modifier = placeholder.modifier().unwrap_or("U");
        let (whole, leading) = match modifier {
            "" => (None, Leading::Keep),
            "U" => (Some(Case::Upper), Leading::Keep),
            "l" => (Some(Case::Lower), Leading::Keep),
            "F" => (None, Leading::Upper),
            "Fl" => (Some(Case::Lower), Leading::Upper),
            "f" => (None, Leading::Lower),
            "fU" => (Some(Case::Upper), Leading::Lower),
            "C" => (None, Leading::EveryWord),
            "Cl" => (Some(Case::Lower), Leading::EveryWord),
            other => return Err(ExtensionError::UnknownFormat(other.to_string())),
        };

        let mut text = argument.to_text();
        if let Some(case) = whole {
            text = case.apply(&text);
        }

        Ok(match leading {
            Leading::Keep => text,
            Leading::Upper => map_first(&text, Case::Upper),
            Leading::Lower => map_first(&text, Case::Lower),
            Leading::EveryWord => capitalize_words(&text),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Case {
    Upper,
    Lower,
}

impl Case {
    fn apply(self, text: &str) -> String {
        match self {
            Case::Upper => text.to_uppercase(),
            Case::Lower => text.to_lowercase(),
        }
    }
}

fn map_first(text: &str, case: Case) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => {
            let mut out = case.apply(first.encode_utf8(&mut [0; 4]));
            out.push_str(chars.as_str());
            out
        }
        None => String::new(),
    }
}

/// Upper-case every non-whitespace character that starts the text or
/// follows whitespace.
fn capitalize_words(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if at_word_start && !c.is_whitespace() {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = c.is_whitespace();
    }
    out
}

#[cfg(test)]
mod tests {
    use quill_core::Span;

    use super::*;

    fn convert(modifier: Option<&str>, text: &str) -> Result<String, ExtensionError> {
        let mut placeholder = Placeholder::new("%S", Span::new(0..2), 'S');
        if let Some(modifier) = modifier {
            placeholder = placeholder.with_modifier(modifier);
        }
        StringCase.convert(&placeholder, &Value::from(text))
    }

    #[test]
    fn test_default_is_upper() {
        assert_eq!(convert(None, "heLLo WORLD").unwrap(), "HELLO WORLD");
    }

    #[test]
    fn test_first_character() {
        assert_eq!(convert(Some("F"), "heLLo").unwrap(), "HeLLo");
        assert_eq!(convert(Some("fU"), "DoLly").unwrap(), "dOLLY");
        assert_eq!(convert(Some("f"), "").unwrap(), "");
    }

    #[test]
    fn test_every_word() {
        assert_eq!(convert(Some("C"), "l  u\tx").unwrap(), "L  U\tX");
        assert_eq!(convert(Some("Cl"), "DoLly mollY").unwrap(), "Dolly Molly");
    }

    #[test]
    fn test_non_letters_untouched() {
        assert_eq!(convert(Some("Cl"), "$%[]123").unwrap(), "$%[]123");
    }

    #[test]
    fn test_unknown_format() {
        let err = convert(Some("FU"), "x").unwrap_err();
        assert_eq!(err.to_string(), "unknown format 'FU'");
    }
}
