use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "procgate")]
#[command(version, about = "Process API request classifier", long_about = None)]
struct Cli {
    /// Log level (overridden by RUST_LOG)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify one request into resource descriptors
    Classify {
        /// HTTP method (GET, POST, PUT, DELETE, ...)
        method: String,

        /// Request path, e.g. /api/v3/proc/myapp/123
        path: String,

        /// Rule table to use instead of the built-in one
        #[arg(short, long)]
        rules: Option<PathBuf>,

        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate a rule table (the built-in one when no file is given)
    Check {
        /// Path to the rule table TOML file
        file: Option<PathBuf>,
    },
    /// List every stage and rule in pipeline order
    Rules {
        /// Rule table to use instead of the built-in one
        #[arg(short, long)]
        rules: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    match cli.command {
        Commands::Classify {
            method,
            path,
            rules,
            json,
        } => {
            let classified = commands::classify::run(&method, &path, rules.as_deref(), json)?;
            if !classified {
                std::process::exit(1);
            }
        }
        Commands::Check { file } => commands::check::run(file.as_deref())?,
        Commands::Rules { rules } => commands::rules::run(rules.as_deref())?,
    }

    Ok(())
}

/// Initialize tracing subscriber for logging
fn init_logging(level: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(level))
        .context("Failed to create log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    Ok(())
}
