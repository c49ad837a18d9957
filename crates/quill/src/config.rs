//! Configuration types for the Quill formatting service.
//!
//! All types implement [`serde::Deserialize`] for loading from external
//! sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration.
//! - [`ExtensionsConfig`] - Letters bound to the bundled extensions.
//!
//! # Example
//!
//! ```
//! # use quill::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(config.extensions().string_case().is_none());
//! ```

use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Bundled extension section.
    #[serde(default)]
    extensions: ExtensionsConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the given extension settings.
    pub fn new(extensions: ExtensionsConfig) -> Self {
        Self { extensions }
    }

    /// Returns the extension configuration.
    pub fn extensions(&self) -> &ExtensionsConfig {
        &self.extensions
    }
}

/// Specifier letters bound to the bundled extensions.
///
/// An unset field leaves the extension unregistered.
///
/// ```toml
/// [extensions]
/// string_case = "S"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExtensionsConfig {
    /// Letter for [`StringCase`](crate::extensions::StringCase).
    #[serde(default)]
    string_case: Option<String>,
}

impl ExtensionsConfig {
    /// Bind [`StringCase`](crate::extensions::StringCase) to `specifier`.
    pub fn with_string_case(mut self, specifier: impl Into<String>) -> Self {
        self.string_case = Some(specifier.into());
        self
    }

    /// Returns the letter bound to the string case extension, if any.
    pub fn string_case(&self) -> Option<&str> {
        self.string_case.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_empty() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert!(config.extensions().string_case().is_none());
    }

    #[test]
    fn test_deserialize_string_case() {
        let config: AppConfig = toml::from_str("[extensions]\nstring_case = \"S\"\n").unwrap();
        assert_eq!(config.extensions().string_case(), Some("S"));
    }

    #[test]
    fn test_builder() {
        let config = AppConfig::new(ExtensionsConfig::default().with_string_case("K"));
        assert_eq!(config.extensions().string_case(), Some("K"));
    }
}
