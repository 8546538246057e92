/*!
vizspec Command Line Interface

Provides commands for checking, normalizing, and inspecting Vega
specification documents.
*/

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vizspec::spec::Transform;
use vizspec::writer::JsonWriter;
use vizspec::{reader, VERSION};

#[derive(Parser)]
#[command(name = "vizspec")]
#[command(about = "Typed validation and formatting for Vega specifications")]
#[command(version = VERSION)]
pub struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate a specification document
    Check {
        /// Path to the specification JSON file
        file: PathBuf,

        /// Treat warnings as failures
        #[arg(long)]
        strict: bool,
    },

    /// Parse a specification and re-emit normalized JSON
    Fmt {
        /// Path to the specification JSON file
        file: PathBuf,

        /// Output file path (stdout when omitted)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Emit single-line JSON
        #[arg(long)]
        compact: bool,
    },

    /// Summarize a specification's structure
    Inspect {
        /// Path to the specification JSON file
        file: PathBuf,

        /// Output format (pretty, json)
        #[arg(long, default_value = "pretty")]
        format: String,
    },
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "vizspec=debug" } else { "vizspec=warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Check { file, strict } => {
            let spec = reader::from_path(&file)?;
            let warnings = spec.validate()?;

            for warning in &warnings {
                eprintln!("warning: {}", warning);
            }
            if strict && !warnings.is_empty() {
                anyhow::bail!(
                    "{}: {} warning(s) in strict mode",
                    file.display(),
                    warnings.len()
                );
            }
            println!(
                "{}: ok ({} warning{})",
                file.display(),
                warnings.len(),
                if warnings.len() == 1 { "" } else { "s" }
            );
        }

        Commands::Fmt {
            file,
            output,
            compact,
        } => {
            let spec = reader::from_path(&file)?;
            let writer = if compact {
                JsonWriter::compact()
            } else {
                JsonWriter::new()
            };
            let rendered = spec.render(&writer)?;

            match output {
                Some(path) => {
                    fs::write(&path, rendered)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    tracing::info!(path = %path.display(), "wrote normalized specification");
                }
                None => println!("{}", rendered),
            }
        }

        Commands::Inspect { file, format } => {
            let spec = reader::from_path(&file)?;

            match format.as_str() {
                "json" => {
                    let summary = json!({
                        "schema": spec.schema,
                        "width": spec.width,
                        "height": spec.height,
                        "signals": spec.signal_names(),
                        "data": spec.data.iter().map(|d| json!({
                            "name": d.name,
                            "transforms": d.transform.iter().map(transform_kind).collect::<Vec<_>>(),
                        })).collect::<Vec<_>>(),
                        "scales": spec.scale_names(),
                        "axes": spec.axes.len(),
                        "legends": spec.legends.len(),
                        "marks": spec.marks.iter().map(|m| m.kind.to_string()).collect::<Vec<_>>(),
                    });
                    println!("{}", serde_json::to_string_pretty(&summary)?);
                }
                "pretty" => {
                    println!("Specification: {}", file.display());
                    if let Some(schema) = &spec.schema {
                        println!("  Schema: {}", schema);
                    }
                    println!("  Signals: {}", join_names(&spec.signal_names()));
                    for data in &spec.data {
                        let kinds: Vec<&str> = data.transform.iter().map(transform_kind).collect();
                        if kinds.is_empty() {
                            println!("  Data: {}", data.name);
                        } else {
                            println!("  Data: {} ({})", data.name, kinds.join(", "));
                        }
                    }
                    println!("  Scales: {}", join_names(&spec.scale_names()));
                    println!("  Axes: {}", spec.axes.len());
                    println!("  Legends: {}", spec.legends.len());
                    let marks: Vec<String> =
                        spec.marks.iter().map(|m| m.kind.to_string()).collect();
                    println!("  Marks: {}", marks.join(", "));
                }
                other => anyhow::bail!("Unknown format: {}", other),
            }
        }
    }

    Ok(())
}

fn transform_kind(transform: &Transform) -> &'static str {
    match transform {
        Transform::Aggregate { .. } => "aggregate",
        Transform::Density { .. } => "density",
        Transform::Filter { .. } => "filter",
        Transform::Formula { .. } => "formula",
    }
}

fn join_names(names: &[&str]) -> String {
    if names.is_empty() {
        "(none)".to_string()
    } else {
        names.join(", ")
    }
}
