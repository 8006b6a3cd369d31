//! shadowgen CLI - Shadow class generator for document-store value classes
//!
//! Commands:
//! - `shadowgen generate` - Generate shadow classes from a manifest
//! - `shadowgen check` - Validate a shadowgen.toml manifest

use clap::{Parser, Subcommand};
use shadowgen_cli::codegen::OutputFormat;
use shadowgen_cli::manifest::DEFAULT_MANIFEST;
use shadowgen_cli::{check, generate, logging};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "shadowgen")]
#[command(
    author,
    version,
    about = "Shadow class generator for Firebase value classes",
    long_about = None
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate shadow classes for every marked value class
    Generate {
        /// Path to shadowgen.toml manifest
        #[arg(short, long, default_value = DEFAULT_MANIFEST)]
        manifest: PathBuf,

        /// Output directory for generated code
        #[arg(short, long)]
        output: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Java)]
        format: OutputFormat,
    },

    /// Validate a shadowgen.toml manifest
    Check {
        /// Path to shadowgen.toml (default: ./shadowgen.toml)
        #[arg(short, long, default_value = DEFAULT_MANIFEST)]
        manifest: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init_logging(cli.verbose);

    match cli.command {
        Commands::Generate {
            manifest,
            output,
            format,
        } => {
            generate::run(&manifest, &output, format)?;
        }
        Commands::Check { manifest } => {
            check::run(&manifest)?;
        }
    }

    Ok(())
}
