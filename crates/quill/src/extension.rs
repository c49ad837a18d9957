//! Custom type specifiers.
//!
//! An [`Extension`] converts the raw argument of a placeholder into text.
//! Registered extensions take precedence over built-in specifiers; their
//! output is truncated to the placeholder's precision and padded, but never
//! signed.

use std::fmt;

use thiserror::Error;

use quill_core::{Value, template::Placeholder};

/// Failure reported by an extension.
#[derive(Debug, Error)]
pub enum ExtensionError {
    /// The placeholder's bracket modifier is not understood.
    #[error("unknown format '{0}'")]
    UnknownFormat(String),

    /// Any other failure, described by a message.
    #[error("{0}")]
    Custom(String),
}

impl ExtensionError {
    /// Create an error from a message.
    pub fn custom(message: impl fmt::Display) -> Self {
        Self::Custom(message.to_string())
    }
}

/// A conversion handler for a custom type specifier.
///
/// Functions and closures with the signature of [`Extension::convert`]
/// implement this trait directly; [`from_fn`] helps closure type inference.
///
/// # Example
///
/// ```
/// use quill::{Quill, Value, extension};
///
/// let quill = Quill::new();
/// quill
///     .register_extension("S", extension::from_fn(|_, arg| Ok(arg.to_text().to_uppercase())))
///     .unwrap();
///
/// assert_eq!(quill.format("%S", &[Value::from("ab")]).unwrap(), "AB");
/// ```
pub trait Extension: Send + Sync {
    /// Convert `argument`, the unevaluated argument of `placeholder`.
    fn convert(&self, placeholder: &Placeholder, argument: &Value) -> Result<String, ExtensionError>;
}

impl<F> Extension for F
where
    F: Fn(&Placeholder, &Value) -> Result<String, ExtensionError> + Send + Sync,
{
    fn convert(&self, placeholder: &Placeholder, argument: &Value) -> Result<String, ExtensionError> {
        self(placeholder, argument)
    }
}

/// Wrap a closure as an [`Extension`].
pub fn from_fn<F>(convert: F) -> F
where
    F: Fn(&Placeholder, &Value) -> Result<String, ExtensionError> + Send + Sync,
{
    convert
}
