//! Quill - a sprintf-style runtime string formatting engine.
//!
//! Templates mix literal text with `%` directives. Each directive selects an
//! argument (the next one, an explicit `n$` position, or a `(key.path)` into
//! a keyed argument), converts it with a type specifier and pads it.
//!
//! ```
//! use quill::{Value, sprintf};
//!
//! assert_eq!(sprintf!("%2$s %3$s a %1$s", "cracker", "Polly", "wants").unwrap(), "Polly wants a cracker");
//! assert_eq!(sprintf!("%05.1f|%-4d|%x", 3.14159, 7, 255).unwrap(), "003.1|7   |ff");
//!
//! let who = Value::object([("who", "world")]);
//! assert_eq!(quill::format("Hello %(who)s!", &[who]).unwrap(), "Hello world!");
//! ```
//!
//! Compiled templates are cached by source text, and letters can be bound to
//! custom conversions with [`Quill::register_extension`].

pub mod config;
pub mod extension;
pub mod extensions;

mod cache;
mod error;
mod registry;
mod render;

pub use quill_core::{
    Span, Template, Value,
    template::{Accessor, ArgumentRef, Node, PadSpec, Placeholder},
    value::{Lazy, Map},
};

pub use error::{ErrorKind, QuillError};
pub use extension::{Extension, ExtensionError};

use std::sync::{Arc, LazyLock};

use log::{debug, info, trace};

use cache::TemplateCache;
use config::AppConfig;
use extensions::StringCase;
use registry::ExtensionRegistry;
use render::Renderer;

/// A formatting service: a template cache plus an extension registry.
///
/// `Quill` is `Send + Sync`; one instance can be shared by many threads.
///
/// # Examples
///
/// ```
/// use quill::{Quill, Value, extensions::StringCase};
///
/// let quill = Quill::new();
/// quill.register_extension("S", StringCase).unwrap();
///
/// let output = quill.format("%-6s|%5.1S|", &[Value::from("ab"), Value::from("xyz")]).unwrap();
/// assert_eq!(output, "ab    |    X|");
/// ```
#[derive(Debug, Default)]
pub struct Quill {
    cache: TemplateCache,
    registry: ExtensionRegistry,
}

impl Quill {
    /// Create a service with no extensions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a service with the bundled extensions named in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`QuillError::InvalidSpecifier`] if a configured letter is not
    /// a single ASCII letter.
    ///
    /// # Examples
    ///
    /// ```
    /// use quill::{Quill, Value, config::{AppConfig, ExtensionsConfig}};
    ///
    /// let config = AppConfig::new(ExtensionsConfig::default().with_string_case("S"));
    /// let quill = Quill::with_config(config).unwrap();
    /// assert_eq!(quill.format("%[Fl]S", &[Value::from("hELLO")]).unwrap(), "Hello");
    /// ```
    pub fn with_config(config: AppConfig) -> Result<Self, QuillError> {
        let quill = Self::new();
        if let Some(specifier) = config.extensions().string_case() {
            quill.register_extension(specifier, StringCase)?;
        }
        info!(extensions:? = quill.registry.specifiers(); "Formatting service configured");
        Ok(quill)
    }

    /// Format `template` with `args`.
    ///
    /// # Errors
    ///
    /// Returns [`QuillError`] if the template does not compile or an argument
    /// cannot be resolved or converted. No partial output is produced.
    pub fn format(&self, template: &str, args: &[Value]) -> Result<String, QuillError> {
        let compiled = self.compile(template)?;
        self.render(&compiled, args)
    }

    /// Format `template` with any arguments convertible to [`Value`].
    ///
    /// # Examples
    ///
    /// ```
    /// let quill = quill::Quill::new();
    /// assert_eq!(quill.format_with_args("%+d%%", [5]).unwrap(), "+5%");
    /// ```
    pub fn format_with_args<I, V>(&self, template: &str, args: I) -> Result<String, QuillError>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let args: Vec<Value> = args.into_iter().map(Into::into).collect();
        self.format(template, &args)
    }

    /// Bind `handler` to a specifier letter, replacing any earlier binding.
    ///
    /// The binding also overrides a built-in specifier with the same letter.
    /// Templates compiled before the call keep their cached form.
    ///
    /// # Errors
    ///
    /// Returns [`QuillError::InvalidSpecifier`] unless `specifier` is a single
    /// ASCII letter.
    pub fn register_extension<E>(&self, specifier: &str, handler: E) -> Result<(), QuillError>
    where
        E: Extension + 'static,
    {
        let mut chars = specifier.chars();
        let letter = match (chars.next(), chars.next()) {
            (Some(letter), None) if letter.is_ascii_alphabetic() => letter,
            _ => return Err(QuillError::InvalidSpecifier(specifier.to_string())),
        };

        let replaced = self.registry.register(letter, Arc::new(handler)).is_some();
        debug!(specifier:% = letter, replaced; "Registered extension");
        Ok(())
    }

    /// Compile `template`, or return the cached compilation.
    ///
    /// Only successful compilations are cached.
    pub fn compile(&self, template: &str) -> Result<Arc<Template>, QuillError> {
        if let Some(compiled) = self.cache.get(template) {
            debug!(template; "Template cache hit");
            return Ok(compiled);
        }

        debug!(template; "Template cache miss");
        let compiled = quill_parser::compile(template, |c| self.registry.contains(c))
            .map_err(|err| QuillError::new_parse_error(err, template))?;
        trace!(nodes:? = compiled.nodes(); "Compiled nodes");

        Ok(self.cache.insert(compiled))
    }

    /// Render a compiled template with `args`.
    pub fn render(&self, template: &Template, args: &[Value]) -> Result<String, QuillError> {
        Renderer::new(template, args, &self.registry).render()
    }

    /// Number of templates in the cache.
    pub fn cached_templates(&self) -> usize {
        self.cache.len()
    }
}

// =============================================================================
// Process-wide default instance
// =============================================================================

static DEFAULT: LazyLock<Quill> = LazyLock::new(Quill::new);

/// The process-wide instance behind the free functions and [`sprintf!`].
pub fn default_instance() -> &'static Quill {
    &DEFAULT
}

/// Format with the process-wide instance. See [`Quill::format`].
pub fn format(template: &str, args: &[Value]) -> Result<String, QuillError> {
    DEFAULT.format(template, args)
}

/// Format with the process-wide instance. See [`Quill::format_with_args`].
pub fn format_with_args<I, V>(template: &str, args: I) -> Result<String, QuillError>
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    DEFAULT.format_with_args(template, args)
}

/// Register an extension on the process-wide instance. See
/// [`Quill::register_extension`].
pub fn register_extension<E>(specifier: &str, handler: E) -> Result<(), QuillError>
where
    E: Extension + 'static,
{
    DEFAULT.register_extension(specifier, handler)
}

/// Format with the process-wide instance, converting each argument with
/// [`Value::from`].
///
/// ```
/// use quill::sprintf;
///
/// assert_eq!(sprintf!("%s=%j", "list", vec![1, 2]).unwrap(), "list=[1,2]");
/// assert_eq!(sprintf!("plain").unwrap(), "plain");
/// ```
#[macro_export]
macro_rules! sprintf {
    ($template:expr $(,)?) => {
        $crate::format($template, &[])
    };
    ($template:expr, $($arg:expr),+ $(,)?) => {
        $crate::format($template, &[$($crate::Value::from($arg)),+])
    };
}
