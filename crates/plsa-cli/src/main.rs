//! plsa - PLSA topic model trainer
//!
//! Usage:
//!   plsa train corpus.svm -k 10 -n 100      # Fit 10 topics for 100 iterations
//!   plsa train corpus.svm --config cfg.json # Hyperparameters from JSON
//!   plsa train corpus.svm --json            # JSON lines per iteration + summary
//!   plsa inspect corpus.svm                 # Dataset statistics

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
mod error;
mod output;

use commands::train::TrainOptions;
use commands::{inspect, train};

/// plsa - Probabilistic Latent Semantic Analysis
///
/// Fit topic models to sparse `dim:weight` document files.
#[derive(Parser)]
#[command(name = "plsa")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode (errors and final summary only)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Fit a PLSA model with EM
    Train {
        /// Path to dataset file (one `dim:weight ...` document per line)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Number of topics
        #[arg(short = 'k', long)]
        topics: Option<usize>,

        /// Number of EM iterations
        #[arg(short = 'n', long)]
        iterations: Option<usize>,

        /// Random seed for initialization
        #[arg(long)]
        seed: Option<u64>,

        /// JSON file with n_topics / n_iterations / random_seed
        #[arg(long, value_name = "CONFIG")]
        config: Option<PathBuf>,

        /// Words to show per topic
        #[arg(long, default_value = "10")]
        top: usize,
    },

    /// Show dataset statistics
    Inspect {
        /// Path to dataset file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Train {
            file,
            topics,
            iterations,
            seed,
            config,
            top,
        } => train::run(
            &file,
            &TrainOptions {
                topics,
                iterations,
                seed,
                config,
                top,
                json: cli.json,
                quiet: cli.quiet,
            },
        ),

        Commands::Inspect { file } => inspect::run(&file, cli.json),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            e.exit_code()
        }
    }
}
