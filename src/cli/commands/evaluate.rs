//! Evaluate command - Replay a trained Q-table greedily against an opponent

use std::{fs::File, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use crate::{
    adapters::StorageFormat,
    cli::{load_saved_table, output::print_section},
    config::EvaluationConfig,
    evaluation::{EvaluationStatistics, Evaluator},
    opponent::{DEFAULT_COOPERATE_PROB, Strategy},
    q_learning::TrainingMetadata,
    report::{Recommendation, StrategyLabel, render_report},
};

#[derive(Parser, Debug)]
#[command(about = "Evaluate a trained Q-table")]
pub struct EvaluateArgs {
    /// Opponent strategy: random, titfortat, always_cooperate, always_defect, default
    #[arg(long = "strategy-type", alias = "strategy_type", short = 's')]
    pub strategy_type: String,

    /// Probability of cooperation for the random strategy
    #[arg(long, alias = "cooperate_prob", default_value_t = DEFAULT_COOPERATE_PROB)]
    pub cooperate_prob: f64,

    /// Path to the trained Q-table
    #[arg(long, alias = "q_table", default_value = "qtable.msgpack")]
    pub q_table: PathBuf,

    /// Storage format of the Q-table (defaults to its file extension)
    #[arg(long, value_enum)]
    pub format: Option<StorageFormat>,

    /// Output file for the text report
    #[arg(long, short = 'O', default_value = "evaluation_report.txt")]
    pub output: PathBuf,

    /// Number of evaluation rounds
    #[arg(long, short = 'r', default_value_t = EvaluationConfig::DEFAULT_ROUNDS)]
    pub rounds: usize,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Export raw statistics to a JSON file
    #[arg(long)]
    pub export: Option<PathBuf>,
}

pub fn execute(args: EvaluateArgs) -> Result<()> {
    let strategy = Strategy::from_tag(&args.strategy_type, args.cooperate_prob)
        .context("Invalid opponent strategy")?;
    let mut config = EvaluationConfig::default().with_rounds(args.rounds);
    config.seed = args.seed;

    println!("Loading Q-table from: {}", args.q_table.display());
    let saved = load_saved_table(&args.q_table, args.format)?;
    let metadata = saved.metadata.clone();
    let table = saved.into_table()?;

    if let Some(trained_against) = metadata.strategy {
        println!("Trained against: {trained_against}");
    }
    if let Some(episodes) = metadata.episodes {
        println!("Episodes trained: {episodes}");
    }

    let stats = Evaluator::new(&table, strategy, config)
        .context("Invalid evaluation configuration")?
        .evaluate();

    let report = render_report(&stats, &strategy);
    println!("{report}");

    std::fs::write(&args.output, &report)
        .with_context(|| format!("Failed to write report to {}", args.output.display()))?;
    log::info!("report written to {}", args.output.display());

    if let Some(export_path) = &args.export {
        export_results(&stats, &strategy, &metadata, &args, export_path)?;
        print_section("Export");
        println!("✓ Results exported to: {}", export_path.display());
    }

    Ok(())
}

/// Export evaluation results to JSON
fn export_results(
    stats: &EvaluationStatistics,
    strategy: &Strategy,
    metadata: &TrainingMetadata,
    args: &EvaluateArgs,
    path: &PathBuf,
) -> Result<()> {
    #[derive(Serialize)]
    struct EvaluationExport<'a> {
        evaluation: EvaluationSection<'a>,
        training: &'a TrainingMetadata,
    }

    #[derive(Serialize)]
    struct EvaluationSection<'a> {
        q_table: String,
        strategy: &'a Strategy,
        average_score: f64,
        agent_cooperation_rate: f64,
        opponent_cooperation_rate: f64,
        label: StrategyLabel,
        recommendation: Recommendation,
        statistics: &'a EvaluationStatistics,
    }

    let average_score = stats.average_score();
    let export = EvaluationExport {
        evaluation: EvaluationSection {
            q_table: args.q_table.display().to_string(),
            strategy,
            average_score,
            agent_cooperation_rate: stats.agent_cooperation_rate(),
            opponent_cooperation_rate: stats.opponent_cooperation_rate(),
            label: StrategyLabel::from_average_score(average_score),
            recommendation: Recommendation::from_average_score(average_score),
            statistics: stats,
        },
        training: metadata,
    };

    let file = File::create(path)
        .with_context(|| format!("Failed to create export file {}", path.display()))?;
    serde_json::to_writer_pretty(file, &export).context("Failed to write evaluation export")?;
    Ok(())
}
