//! Command-line interface definitions for jarclash.
//!
//! This module defines all CLI arguments, subcommands, and options using the clap derive API.
//!
//! # Example
//!
//! ```bash
//! # Check the packaged war of the project in the current directory
//! jarclash check
//!
//! # List every conflicting class, not only the jars
//! jarclash check ~/src/shop-web --details
//!
//! # Copy dependencies with Maven first, then check them
//! jarclash check --materialize
//!
//! # Check any directory of jars, JSON for CI
//! jarclash scan build/libs --output json
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Duplicate class detector for packaged jars.
///
/// jarclash scans the jars bundled into a deployable artifact and fails when
/// the same class file is packaged in more than one of them.
#[derive(Debug, Parser)]
#[command(name = "jarclash")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Configuration file (defaults to the platform config directory)
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Report errors as JSON on stderr
    #[arg(long, global = true)]
    pub json_errors: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands for jarclash.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check the packaged dependencies of a Maven web application
    Check(CheckArgs),
    /// Check every archive in a directory
    Scan(ScanArgs),
}

/// Arguments for the check subcommand.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Project directory containing pom.xml
    #[arg(value_name = "PROJECT_DIR", default_value = ".")]
    pub project_dir: PathBuf,

    /// Directory holding the packaged jars
    ///
    /// Defaults to <build dir>/<final name>/WEB-INF/lib.
    #[arg(long, value_name = "PATH", conflicts_with = "materialize")]
    pub lib_dir: Option<PathBuf>,

    /// Override the packaged artifact name
    #[arg(long, value_name = "NAME")]
    pub final_name: Option<String>,

    /// List every conflicting class, not only the jars involved
    #[arg(short, long)]
    pub details: bool,

    /// Skip the check
    #[arg(long)]
    pub skip: bool,

    /// Copy dependencies with Maven into <build dir>/dependency and check those
    #[arg(long)]
    pub materialize: bool,

    /// Check the project whatever its packaging kind
    #[arg(long)]
    pub allow_any_packaging: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,
}

/// Arguments for the scan subcommand.
#[derive(Debug, Args)]
pub struct ScanArgs {
    /// Directory containing the archives to check
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,

    /// List every conflicting class, not only the jars involved
    #[arg(short, long)]
    pub details: bool,

    /// Archive file extension
    #[arg(long, value_name = "EXT")]
    pub extension: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,
}

/// Output format for check results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Report through the log
    Text,
    /// JSON on stdout
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}
