//! Quill CLI library
//!
//! This module contains the core CLI logic of the `quill` formatter.

pub mod error_adapter;

mod args;
mod config;
mod error;

pub use args::Args;
pub use config::ConfigError;
pub use error::CliError;

use std::{fs, io::Write};

use log::{debug, info};

use quill::{Quill, Value};

/// Run the Quill CLI application
///
/// Loads the configuration, collects the template arguments and writes the
/// formatted template to `out`.
///
/// # Errors
///
/// Returns `CliError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed JSON arguments
/// - Template compile and render errors
pub fn run(args: &Args, out: &mut impl Write) -> Result<(), CliError> {
    info!(template = args.template, json = args.json; "Formatting template");

    let app_config = config::load_config(args.config.as_ref())?;
    let quill = Quill::with_config(app_config)?;

    let values = collect_arguments(args)?;
    debug!(count = values.len(); "Collected arguments");

    let output = quill.format(&args.template, &values)?;
    out.write_all(output.as_bytes())?;
    if !args.no_newline {
        out.write_all(b"\n")?;
    }

    info!(length = output.len(); "Template formatted");
    Ok(())
}

/// Positional arguments first, then the contents of the arguments file.
fn collect_arguments(args: &Args) -> Result<Vec<Value>, CliError> {
    let mut values = args
        .args
        .iter()
        .map(|arg| {
            if args.json {
                parse_json(arg)
            } else {
                Ok(Value::from(arg))
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    if let Some(path) = &args.args_file {
        let content = fs::read_to_string(path)?;
        match parse_json(&content)? {
            Value::Array(items) => values.extend(items),
            _ => return Err(CliError::ArgsNotArray(path.clone())),
        }
    }

    Ok(values)
}

fn parse_json(input: &str) -> Result<Value, CliError> {
    serde_json::from_str::<serde_json::Value>(input)
        .map(Value::from)
        .map_err(|source| CliError::Json {
            input: input.to_string(),
            source,
        })
}
