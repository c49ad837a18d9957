//! # Quill Parser
//!
//! Template compiler for the Quill formatting engine. Turns a template
//! string into a [`Template`]: literal text interleaved with validated
//! placeholders.
//!
//! ## Usage
//!
//! ```
//! # use quill_parser::{compile, error::ParseError};
//!
//! fn main() -> Result<(), ParseError> {
//!     let template = compile("%(name)s has %(count)05d items", |_| false)?;
//!     assert_eq!(template.placeholders().count(), 2);
//!     Ok(())
//! }
//! ```

pub mod error;
mod parser;

pub use quill_core::{Span, Template};

use parser::Compiler;

/// Compile a template string.
///
/// `is_extension` is consulted for specifier letters that are not built in;
/// returning `true` accepts the letter as a registered extension.
///
/// # Errors
///
/// Returns a [`ParseError`](error::ParseError) describing the first problem:
/// a malformed directive (E100), a malformed key (E101), an unknown
/// specifier (E102), an out-of-range number (E103) or mixed named and
/// positional placeholders (E200).
///
/// # Example
///
/// ```
/// # use quill_parser::{compile, error::ErrorCode};
///
/// let err = compile("%s and %(name)s", |_| false).unwrap_err();
/// assert_eq!(err.code(), Some(ErrorCode::E200));
///
/// assert!(compile("%S", |c| c == 'S').is_ok());
/// ```
pub fn compile<F>(source: &str, is_extension: F) -> Result<Template, error::ParseError>
where
    F: Fn(char) -> bool,
{
    Compiler::new(source, is_extension).compile()
}
