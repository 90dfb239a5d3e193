//! Command-line interface implementation for blocksmith.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, CommandFactory, Parser};
use std::path::PathBuf;

/// Command-line arguments structure for blocksmith.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "blocksmith: resolve block descriptions into generation plans",
    long_about = None
)]
pub struct Args {
    /// Path to the block description (YAML or JSON, a single named block)
    #[arg(value_name = "DESCRIPTION")]
    pub description: PathBuf,

    /// Project root holding the blocksmith configuration and templates
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub project_dir: PathBuf,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Print the plan as single line JSON
    #[arg(long)]
    pub compact: bool,
}

/// Parses command line arguments and returns the Args structure.
///
/// # Returns
/// * `Args` - Parsed command line arguments
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
