//! Command-line argument definitions for the Quill CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments carry the template, its arguments, the
//! configuration file selection and logging verbosity.

use clap::Parser;

/// Command-line arguments for the Quill formatter
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Template to format, e.g. "%-10s|%5.2f"
    #[arg(help = "Template to format")]
    pub template: String,

    /// Arguments substituted into the template
    #[arg(help = "Template arguments")]
    pub args: Vec<String>,

    /// Parse each argument as JSON instead of taking it as a string
    #[arg(short, long)]
    pub json: bool,

    /// Path to a JSON array of further arguments
    #[arg(short, long)]
    pub args_file: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Do not print a trailing newline
    #[arg(short, long)]
    pub no_newline: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}
