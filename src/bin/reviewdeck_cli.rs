//! ReviewDeck CLI - Bridge interface for the page build
//!
//! Commands: records, validate, arrange
//! Outputs JSON to stdout
//! Returns non-zero on validation failure

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use reviewdeck_core::{
    records::{FailureMode, ReviewCollection, ReviewRecord},
    validation::Validator,
    ReviewPresentationEngine,
};

#[derive(Parser)]
#[command(name = "reviewdeck-cli")]
#[command(about = "ReviewDeck CLI - Review Presentation Engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the review collection directory
    #[arg(short, long, default_value = "reviews")]
    collection_dir: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// List loaded review records
    Records,

    /// Validate a single review record
    Validate {
        /// JSON payload (ReviewRecord)
        #[arg(short, long)]
        payload: String,
    },

    /// Produce one presentation arrangement
    Arrange {
        /// Fixed seed for a reproducible arrangement
        #[arg(short, long)]
        seed: Option<u64>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Records => {
            let collection = match ReviewCollection::load_from_dir(&cli.collection_dir) {
                Ok(c) => c,
                Err(e) => {
                    eprintln!(r#"{{"error": "Failed to load collection: {}"}}"#, e);
                    return ExitCode::FAILURE;
                }
            };

            let default_color = collection.config().default_color.clone();
            let records: Vec<_> = collection
                .records()
                .iter()
                .map(|r| {
                    serde_json::json!({
                        "name": r.name,
                        "bio": r.bio,
                        "socialLink": r.social_link,
                        "color": r.color.as_deref().unwrap_or(&default_color),
                    })
                })
                .collect();

            println!("{}", serde_json::to_string_pretty(&records).unwrap());
            ExitCode::SUCCESS
        }

        Commands::Validate { payload } => {
            let record: ReviewRecord = match serde_json::from_str(&payload) {
                Ok(r) => r,
                Err(e) => {
                    println!(r#"{{"valid": false, "error": "Invalid payload: {}"}}"#, e);
                    return ExitCode::FAILURE;
                }
            };

            let result = Validator::new().validate(&record, FailureMode::Block);
            println!("{}", serde_json::to_string_pretty(&result).unwrap());
            if result.valid {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(2) // Validation failure
            }
        }

        Commands::Arrange { seed } => {
            let collection = match ReviewCollection::load_from_dir(&cli.collection_dir) {
                Ok(c) => c,
                Err(e) => {
                    eprintln!(r#"{{"error": "Failed to load collection: {}"}}"#, e);
                    return ExitCode::FAILURE;
                }
            };

            let engine = ReviewPresentationEngine::new();
            let arrangement = engine.arrange_session(collection.records(), seed);

            // Empty entries are valid output; the renderer owns the
            // empty-state messaging.
            println!("{}", serde_json::to_string_pretty(&arrangement).unwrap());
            ExitCode::SUCCESS
        }
    }
}
