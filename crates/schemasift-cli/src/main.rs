use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde_json::Value;

use schemasift_core::{simplify, validation_errors, Shape};
use schemasift_sql::{sql_shorthand, to_sql};

/// SchemaSift - JSON Schema normalization for relational sinks
#[derive(Parser)]
#[command(name = "schemasift")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a schema document against the Draft-4 rules
    Check {
        /// Path to the JSON Schema document
        schema: PathBuf,
    },

    /// Print the canonical (simplified) form of a schema
    Simplify {
        /// Path to the JSON Schema document
        schema: PathBuf,
    },

    /// Print the SQL column types for the schema's top-level properties
    Columns {
        /// Path to the JSON Schema document
        schema: PathBuf,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { schema } => check_command(&schema, cli.verbose),
        Commands::Simplify { schema } => simplify_command(&schema, cli.verbose),
        Commands::Columns { schema } => columns_command(&schema, cli.verbose),
    }
}

fn load_schema(path: &Path, verbose: bool) -> Result<Value> {
    if verbose {
        eprintln!("{} {}", "Reading".cyan(), path.display());
    }

    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("{} is not valid JSON", path.display()))
}

/// Check command - report every validation problem, exit non-zero on any
fn check_command(path: &Path, verbose: bool) -> Result<ExitCode> {
    let schema = load_schema(path, verbose)?;
    let errors = validation_errors(&schema);

    if errors.is_empty() {
        println!("{} {}", "OK".green().bold(), path.display());
        return Ok(ExitCode::SUCCESS);
    }

    for error in &errors {
        eprintln!("{} {}", "error:".red().bold(), error);
    }
    eprintln!(
        "{} problem(s) in {}",
        errors.len().to_string().red(),
        path.display()
    );
    Ok(ExitCode::FAILURE)
}

/// Simplify command - print the canonical form as pretty JSON
fn simplify_command(path: &Path, verbose: bool) -> Result<ExitCode> {
    let schema = load_schema(path, verbose)?;
    let canonical = simplify(&schema)?;

    println!("{}", serde_json::to_string_pretty(&canonical.to_value())?);
    Ok(ExitCode::SUCCESS)
}

/// Columns command - one line per top-level property: name, column type,
/// shorthand discriminator
fn columns_command(path: &Path, verbose: bool) -> Result<ExitCode> {
    let schema = load_schema(path, verbose)?;
    let canonical = simplify(&schema)?;

    let properties = match &canonical.shape {
        Shape::Object(properties) => properties,
        _ => anyhow::bail!("Schema root does not describe an object with properties"),
    };

    if verbose {
        eprintln!(
            "{} {} column(s)",
            "Deriving".cyan(),
            properties.len()
        );
    }

    for (name, field) in properties {
        let column = to_sql(field)
            .with_context(|| format!("Column `{name}` cannot be mapped"))?;
        // structural types carry no shorthand; show a dash instead
        let shorthand = sql_shorthand(field).unwrap_or_else(|_| "-".to_string());
        println!("{name}\t{column}\t{shorthand}");
    }
    Ok(ExitCode::SUCCESS)
}
