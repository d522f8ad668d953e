//! Error Scout main entry point
//!
//! This is the command-line interface for normalizing error messages and
//! searching Stack Overflow for answers.

use anyhow::Context;
use clap::{Parser, Subcommand};
use error_scout::config::{load_config_or_default, validate_result_limit, Config};
use error_scout::output::{render_aggregated, render_normalized, write_json};
use error_scout::stackoverflow::{Aggregator, ApiClient};
use error_scout::tools::{self, NormalizeErrorInput, SearchStackOverflowInput};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Error Scout: error normalization and Stack Overflow lookup
///
/// Error Scout cleans raw error messages and stack traces into a stable form,
/// and finds Stack Overflow questions with their best answers attached.
#[derive(Parser, Debug)]
#[command(name = "error-scout")]
#[command(version)]
#[command(about = "Normalize errors and find Stack Overflow answers", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Normalize an error message read from FILE or stdin
    Normalize {
        /// File containing the error text; stdin when omitted or "-"
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,

        /// Print a human-readable summary instead of JSON
        #[arg(long)]
        plain: bool,
    },

    /// Search Stack Overflow for an error message read from FILE or stdin
    Search {
        /// File containing the error text; stdin when omitted or "-"
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,

        /// Restrict results to questions with this tag (e.g., python)
        #[arg(short, long)]
        language: Option<String>,

        /// Use the detected language as tag when --language is not given
        #[arg(long, conflicts_with = "language")]
        auto_language: bool,

        /// Override the number of results (1-10)
        #[arg(long)]
        limit: Option<usize>,

        /// Fetch answer bodies concurrently
        #[arg(long)]
        concurrent: bool,

        /// Print a human-readable report instead of JSON
        #[arg(long)]
        plain: bool,
    },

    /// Print the effective configuration and exit
    ShowConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = load_config_or_default(cli.config.as_deref()).with_context(|| match &cli.config {
        Some(path) => format!("Failed to load configuration from {}", path.display()),
        None => "Invalid default configuration".to_string(),
    })?;

    match cli.command {
        Command::Normalize { input, plain } => handle_normalize(input.as_deref(), plain),
        Command::Search {
            input,
            language,
            auto_language,
            limit,
            concurrent,
            plain,
        } => {
            let options = SearchOptions {
                language,
                auto_language,
                limit,
                concurrent,
                plain,
            };
            handle_search(&config, input.as_deref(), options).await
        }
        Command::ShowConfig => handle_show_config(&config),
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr so stdout stays machine-readable.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("error_scout=info,warn"),
            1 => EnvFilter::new("error_scout=debug,info"),
            2 => EnvFilter::new("error_scout=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Reads the error text from a file, or from stdin for None and "-"
fn read_input(input: Option<&Path>) -> anyhow::Result<String> {
    match input {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read error text from stdin")?;
            Ok(text)
        }
    }
}

/// Handles the normalize command
fn handle_normalize(input: Option<&Path>, plain: bool) -> anyhow::Result<()> {
    let raw_error = read_input(input)?;
    let output = tools::normalize_error(NormalizeErrorInput { raw_error });

    if plain {
        print!("{}", render_normalized(&output));
    } else {
        write_json(&mut std::io::stdout().lock(), &output)?;
    }

    Ok(())
}

/// Command-line options for the search command
struct SearchOptions {
    language: Option<String>,
    auto_language: bool,
    limit: Option<usize>,
    concurrent: bool,
    plain: bool,
}

/// Handles the search command
async fn handle_search(
    config: &Config,
    input: Option<&Path>,
    options: SearchOptions,
) -> anyhow::Result<()> {
    let SearchOptions {
        language,
        auto_language,
        limit,
        concurrent,
        plain,
    } = options;

    if let Some(limit) = limit {
        validate_result_limit(limit).context("Invalid --limit")?;
    }

    let full_error = read_input(input)?;

    let language = if auto_language {
        let detected = error_scout::normalize(&full_error).language;
        tracing::info!("Using detected language as tag: {:?}", detected);
        detected.map(|language| language.as_str().to_string())
    } else {
        language
    };

    let client = ApiClient::new(&config.api).context("Failed to build API client")?;
    let mut aggregator = Aggregator::new(client, &config.search);
    if let Some(limit) = limit {
        aggregator = aggregator.with_limit(limit);
    }
    if concurrent {
        aggregator = aggregator.with_concurrent_fetches(true);
    }

    let result = tools::search_stackoverflow(
        &aggregator,
        SearchStackOverflowInput {
            full_error,
            language,
        },
    )
    .await;

    if plain {
        print!("{}", render_aggregated(&result));
    } else {
        write_json(&mut std::io::stdout().lock(), &result)?;
    }

    Ok(())
}

/// Handles the show-config command
fn handle_show_config(config: &Config) -> anyhow::Result<()> {
    println!("=== Error Scout Configuration ===\n");
    print!("{}", toml::to_string_pretty(config)?);
    println!("\n✓ Configuration is valid");
    Ok(())
}
