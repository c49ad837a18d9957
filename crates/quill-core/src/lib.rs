//! Quill Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Quill formatting
//! engine. It includes:
//!
//! - **Values**: Dynamic formatting arguments ([`value::Value`])
//! - **Numbers**: ECMAScript-compatible numeric coercion and rendering
//!   ([`number`] module)
//! - **Spans**: Byte ranges into template text ([`span::Span`])
//! - **Templates**: The compiled template model ([`template`] module)
//! - **Specifiers**: The built-in type specifier table ([`specifier::Builtin`])

pub mod number;
pub mod span;
pub mod specifier;
pub mod template;
pub mod value;

pub use span::Span;
pub use template::Template;
pub use value::Value;
