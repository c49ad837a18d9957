//! Extensions shipped with Quill.
//!
//! None of these are registered by default; bind them to a letter with
//! [`Quill::register_extension`](crate::Quill::register_extension) or through
//! [`ExtensionsConfig`](crate::config::ExtensionsConfig).

mod string_case;

pub use string_case::StringCase;
