// trace2atlas - Jaeger/OTLP JSON trace normalizer
//
// Thin plumbing around trace2atlas-core: argument parsing, file I/O,
// logging setup, and exit-code policy. All conversion semantics live in
// the core crate.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::Value as JsonValue;
use tracing::{info, warn};

use trace2atlas_core::{convert, ConvertError, MappingOptions};

/// Convert a Jaeger or OTLP JSON trace export to the internal trace format.
#[derive(Debug, Parser)]
#[command(name = "trace2atlas", version, about)]
struct Cli {
    /// Input trace JSON path (Jaeger or OTLP JSON)
    input: PathBuf,

    /// Output internal trace path (*.trace.json)
    #[arg(short = 'o', long = "out")]
    out: PathBuf,

    /// Apply a built-in operation-name mapping
    #[arg(long = "map", value_parser = ["demo"], conflicts_with = "map_file")]
    map: Option<String>,

    /// Custom mapping JSON file: {"service METHOD /path": "operationId"}
    #[arg(long = "map-file")]
    map_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("ERROR: {err:#}");
            match err.downcast_ref::<ConvertError>() {
                // Unrecognized input shape is a distinct, documented outcome
                Some(ConvertError::UnrecognizedFormat) => ExitCode::from(2),
                None => ExitCode::FAILURE,
            }
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let raw = fs::read_to_string(&cli.input)
        .with_context(|| format!("Failed to read input file: {}", cli.input.display()))?;
    let doc: JsonValue = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse input JSON: {}", cli.input.display()))?;

    let mapping = MappingOptions {
        demo: cli.map.as_deref() == Some("demo"),
        custom: cli
            .map_file
            .as_deref()
            .map(load_mapping_file)
            .unwrap_or_default(),
    };

    let normalized = convert(&doc, &mapping)?;
    let span_count = normalized.spans.len();

    let rendered = serde_json::to_string_pretty(&normalized)
        .context("Failed to serialize normalized trace")?;
    fs::write(&cli.out, rendered)
        .with_context(|| format!("Failed to write output file: {}", cli.out.display()))?;

    info!(spans = span_count, "trace normalized");
    println!(
        "✅ Converted: {} -> {}",
        cli.input.display(),
        cli.out.display()
    );
    println!(
        "   Hint: choreoatlas validate --flow contracts/flows/order-flow.graph.flowspec.yaml --trace {}",
        cli.out.display()
    );

    Ok(())
}

/// Load a custom mapping table. A missing or unparsable file degrades to
/// an empty table with a warning; it never aborts the conversion.
fn load_mapping_file(path: &Path) -> HashMap<String, String> {
    match try_load_mapping(path) {
        Ok(mapping) => mapping,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "ignoring unusable mapping file");
            HashMap::new()
        }
    }
}

fn try_load_mapping(path: &Path) -> Result<HashMap<String, String>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read mapping file: {}", path.display()))?;
    let mapping = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse mapping file: {}", path.display()))?;
    Ok(mapping)
}

fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // Logs go to stderr so stdout stays clean for the confirmation lines
    let _ = tracing::subscriber::set_global_default(
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(std::io::stderr)),
    );
}
