//! Command line front end for the Larch node schema.
//!
//! Provides the `larchc` command with the following subcommands:
//!
//! - `larchc check` - Validate the shipped grammar and report violations
//! - `larchc dump` - Print the closed registry as JSON
//!
//! Options:
//! - `--json` - Output violations as JSON (one object per line)

use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "larchc", version, about = "The Larch schema tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the shipped grammar and report violations
    Check {
        /// Output violations as JSON (one object per line) instead of human-readable format
        #[arg(long)]
        json: bool,
    },
    /// Print the closed registry as JSON
    Dump,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { json } => {
            if let Err(code) = check(json) {
                process::exit(code);
            }
        }
        Commands::Dump => {
            if let Err(e) = dump() {
                eprintln!("error: {}", e);
                process::exit(1);
            }
        }
    }
}

/// Build the registry, run both validation passes, and print the outcome.
///
/// Returns the process exit code on failure. A registry that fails to
/// close and a registry with violations both exit with status 1.
fn check(json: bool) -> Result<(), i32> {
    let registry = match larch_grammar::registry() {
        Ok(registry) => registry,
        Err(e) => {
            if json {
                let msg = serde_json::json!({
                    "error": e.to_string(),
                });
                eprintln!("{}", msg);
            } else {
                eprintln!("error: {}", e);
            }
            return Err(1);
        }
    };

    let report = larch_validate::validate(&registry);
    if report.is_valid() {
        if !json {
            println!("ok: {} kinds, no violations", registry.len());
        }
        return Ok(());
    }

    if json {
        for violation in report.violations() {
            match serde_json::to_string(violation) {
                Ok(line) => println!("{}", line),
                Err(e) => {
                    eprintln!("error: {}", e);
                    return Err(1);
                }
            }
        }
    } else {
        print!("{}", report);
        eprintln!("{} violation(s) found", report.violations().len());
    }
    Err(1)
}

/// Pretty-print every descriptor in the closed registry as one JSON array.
fn dump() -> Result<(), String> {
    let registry = larch_grammar::registry().map_err(|e| e.to_string())?;
    let rendered = serde_json::to_string_pretty(registry.descriptors())
        .map_err(|e| e.to_string())?;
    println!("{}", rendered);
    Ok(())
}
