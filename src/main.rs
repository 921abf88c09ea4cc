//! Binary entry point for glas.
//!
//! A small CLI over the triage pipeline: classify an appeal text, score
//! its sentiment, or show the effective configuration.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print output in the CLI binary
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]
#![allow(clippy::multiple_crate_versions)]

use anyhow::Context;
use clap::{Parser, Subcommand};
use glas::config::GlasConfig;
use glas::models::Category;
use glas::triage::{RuleSentiment, SentimentAnalyzer, TriageEngine};
use glas::{observability, Enrichment};
use std::process::ExitCode;

/// Glas - citizen appeal intake and triage core.
#[derive(Parser)]
#[command(name = "glas")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file.
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Run the full triage pipeline on one appeal text.
    Triage {
        /// Appeal title.
        title: String,

        /// Appeal description.
        description: String,

        /// Explicit category override.
        #[arg(short = 'C', long)]
        category: Option<String>,
    },

    /// Score the sentiment of a text with the rule-based scorer.
    Sentiment {
        /// The text to score.
        text: String,
    },

    /// Show the effective configuration.
    Config,
}

fn main() -> ExitCode {
    // Load .env before anything reads the environment.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    observability::init(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        },
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => GlasConfig::load_from_file(std::path::Path::new(path))
            .context("failed to load config file")?
            .with_env_overrides(),
        None => GlasConfig::load_default(),
    };

    match cli.command {
        Commands::Triage {
            title,
            description,
            category,
        } => {
            let category_override = match category {
                Some(s) => Some(
                    Category::parse(&s)
                        .with_context(|| format!("unknown category: {s}"))?,
                ),
                None => None,
            };

            let engine = TriageEngine::from_config(&config);
            let enrichment: Enrichment =
                engine.enrich(&title, &description, category_override, &[]);
            println!("{}", serde_json::to_string_pretty(&enrichment)?);
        },
        Commands::Sentiment { text } => {
            let score = RuleSentiment::new().analyze(&text);
            println!("{}", serde_json::to_string_pretty(&score)?);
        },
        Commands::Config => {
            println!("llm configured: {}", config.llm.api_key.is_some());
            println!(
                "llm model: {}",
                config.llm.model.as_deref().unwrap_or("(default)")
            );
            println!(
                "llm endpoint: {}",
                config.llm.endpoint.as_deref().unwrap_or("(default)")
            );
            println!("recent window days: {}", config.triage.recent_window_days);
            println!("recent limit: {}", config.triage.recent_limit);
        },
    }

    Ok(())
}
