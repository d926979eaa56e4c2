//! CLI logic for the Stratus architecture compiler.
//!
//! This module contains the core CLI logic for the `stratus` binary.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::{info, warn};
use thiserror::Error;

use stratus::{CloudProvider, CompileError, CompileRequest, Compiler};

use config::ConfigError;

/// Provider used when neither the command line nor the configuration
/// names one.
const DEFAULT_PROVIDER: CloudProvider = CloudProvider::Aws;

/// Region used when neither the command line nor the configuration
/// names one.
const DEFAULT_REGION: &str = "us-east-1";

/// Errors surfaced by the CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Compilation failed; carries every finding for rendering.
    #[error(transparent)]
    Compile(#[from] CompileError),

    /// Reading the input or writing the plan failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Run the Stratus CLI application
///
/// This function compiles the input diagram file through the Stratus
/// pipeline and writes the resulting plan JSON to the output file.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `CliError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Compilation errors (parse, validation, mapping, rules, scheduling)
pub fn run(args: &Args) -> Result<(), CliError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Compiling diagram"
    );

    // Load configuration
    let cli_config = config::load_config(args.config.as_ref())?;

    // Compile targets: the command line wins over the configuration
    let provider = args
        .provider
        .or_else(|| cli_config.provider())
        .unwrap_or(DEFAULT_PROVIDER);
    let region = args
        .region
        .as_deref()
        .or_else(|| cli_config.region())
        .unwrap_or(DEFAULT_REGION);

    // Read input file
    let payload = fs::read(&args.input)?;

    // Compile using the Compiler API
    let compiler = Compiler::new(&cli_config.compiler_config());
    let request = CompileRequest::new(provider, region);
    let compilation = compiler.compile(&payload, &request)?;

    for warning in compilation.validation().warnings() {
        warn!("{warning}");
    }

    // Write the plan: the architecture plus its creation order
    let plan = serde_json::json!({
        "architecture": compilation.architecture(),
        "order": compilation.order(),
    });
    let rendered =
        serde_json::to_string_pretty(&plan).expect("JSON value serialization is infallible");
    fs::write(&args.output, rendered)?;

    info!(
        output_file = args.output,
        resources = compilation.architecture().resources().len();
        "Plan exported successfully"
    );

    Ok(())
}
