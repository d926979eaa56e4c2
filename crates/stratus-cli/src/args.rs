//! Command-line argument definitions for the Stratus CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, compile targets, and logging verbosity.

use clap::Parser;

use stratus::CloudProvider;

/// Command-line arguments for the Stratus architecture compiler
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input diagram IR file (JSON)
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output plan file
    #[arg(short, long, default_value = "plan.json")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Target cloud provider (aws, azure, gcp); overrides the configuration
    #[arg(long)]
    pub provider: Option<CloudProvider>,

    /// Default region when the diagram names none; overrides the configuration
    #[arg(long)]
    pub region: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
