//! dilemma CLI - Q-learning agent for the iterated Prisoner's Dilemma
//!
//! - `train`: learn a Q-table against a fixed opponent strategy
//! - `evaluate`: replay the greedy policy and write a report

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "dilemma")]
#[command(version, about = "Q-learning agent for the iterated Prisoner's Dilemma", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a Q-table against an opponent strategy
    Train(dilemma::cli::commands::train::TrainArgs),

    /// Evaluate a trained Q-table against an opponent strategy
    Evaluate(dilemma::cli::commands::evaluate::EvaluateArgs),
}

fn main() -> Result<()> {
    dilemma::cli::init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Train(args) => dilemma::cli::commands::train::execute(args),
        Commands::Evaluate(args) => dilemma::cli::commands::evaluate::execute(args),
    }
}
