//! Command-line interface implementation for stache.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, CommandFactory, Parser};
use std::path::PathBuf;

use crate::constants::DEFAULT_EXTENSION;

/// Command-line arguments structure for stache.
#[derive(Parser, Debug)]
#[command(author, version, about = "stache: logic-less mustache-style templating", long_about = None)]
pub struct Args {
    /// Path to the template, without its extension
    #[arg(value_name = "TEMPLATE")]
    pub template: PathBuf,

    /// JSON or YAML file holding the binding context
    #[arg(short, long, value_name = "FILE")]
    pub context: Option<PathBuf>,

    /// Read the binding context from stdin
    #[arg(short, long, conflicts_with = "context")]
    pub stdin: bool,

    /// Template file extension
    #[arg(short, long, default_value = DEFAULT_EXTENSION)]
    pub extension: String,

    /// Remove tags that were left unresolved after rendering
    #[arg(long)]
    pub strip: bool,

    /// Write the output to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if e.kind() == ErrorKind::MissingRequiredArgument {
                let _ = Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}
