//! Train command - Train a Q-learning agent against a fixed opponent

use std::{
    fs::File,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use serde::Serialize;
use serde_json::to_writer_pretty;

use crate::{
    adapters::StorageFormat,
    cli::{
        load_saved_table,
        output::{format_number, print_kv, print_q_table, print_section},
        save_table,
    },
    config::TrainingConfig,
    opponent::{DEFAULT_COOPERATE_PROB, Strategy},
    pipeline::{ProgressObserver, RewardObserver, RewardSummary},
    q_learning::{QTable, SavedQTable, Trainer, TrainingMetadata},
};

const REWARD_WINDOW: usize = 100;

#[derive(Debug, Serialize)]
struct TrainingSummaryFile {
    strategy: Strategy,
    config: TrainingConfig,
    states: usize,
    rewards: Option<RewardSummary>,
    output: String,
}

fn sanitize_summary_path(raw: &Path) -> PathBuf {
    let mut normalized = raw.to_path_buf();
    let raw_str = raw.as_os_str().to_string_lossy();

    // Treat trailing separators or missing filename as a directory target.
    if raw_str.ends_with(std::path::MAIN_SEPARATOR) || normalized.file_name().is_none() {
        normalized.push("training_summary.json");
        return normalized;
    }

    match normalized.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => normalized,
        _ => {
            normalized.set_extension("json");
            normalized
        }
    }
}

#[derive(Parser, Debug)]
#[command(about = "Train a Q-learning agent", allow_negative_numbers = true)]
pub struct TrainArgs {
    /// Opponent strategy: random, titfortat, always_cooperate, always_defect, default
    #[arg(long = "strategy-type", alias = "strategy_type", short = 's')]
    pub strategy_type: String,

    /// Probability of cooperation for the random strategy
    #[arg(long, alias = "cooperate_prob", default_value_t = DEFAULT_COOPERATE_PROB)]
    pub cooperate_prob: f64,

    /// Output file for the Q-table
    #[arg(long, short = 'O', default_value = "qtable.msgpack")]
    pub output: PathBuf,

    /// Storage format (defaults to the output file's extension)
    #[arg(long, value_enum)]
    pub format: Option<StorageFormat>,

    /// Continue training from an existing Q-table
    #[arg(long)]
    pub resume: Option<PathBuf>,

    /// Storage format of the resumed Q-table (defaults to its file extension)
    #[arg(long, value_enum, requires = "resume")]
    pub resume_format: Option<StorageFormat>,

    /// Number of training episodes
    #[arg(long, short = 'e', default_value_t = TrainingConfig::DEFAULT_EPISODES)]
    pub episodes: usize,

    /// Rounds per episode
    #[arg(long, default_value_t = TrainingConfig::DEFAULT_ROUNDS_PER_EPISODE)]
    pub rounds: usize,

    /// Learning rate (α)
    #[arg(long, default_value_t = TrainingConfig::DEFAULT_LEARNING_RATE)]
    pub alpha: f64,

    /// Discount factor (γ)
    #[arg(long, default_value_t = TrainingConfig::DEFAULT_DISCOUNT_FACTOR)]
    pub gamma: f64,

    /// Exploration rate (ε)
    #[arg(long, default_value_t = TrainingConfig::DEFAULT_EPSILON)]
    pub epsilon: f64,

    /// Clear the opponent's move history at the start of every episode
    #[arg(long, default_value_t = false)]
    pub reset_history_per_episode: bool,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Show progress bar
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub progress: bool,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,
}

impl TrainArgs {
    fn training_config(&self) -> TrainingConfig {
        let config = TrainingConfig::default()
            .with_episodes(self.episodes)
            .with_rounds_per_episode(self.rounds)
            .with_learning_rate(self.alpha)
            .with_discount_factor(self.gamma)
            .with_epsilon(self.epsilon)
            .with_reset_history_per_episode(self.reset_history_per_episode);
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let strategy = Strategy::from_tag(&args.strategy_type, args.cooperate_prob)
        .context("Invalid opponent strategy")?;
    let config = args.training_config();
    config.validate().context("Invalid training configuration")?;

    let (initial_table, previous) = match &args.resume {
        Some(path) => {
            println!("Resuming from: {}", path.display());
            let saved = load_saved_table(path, args.resume_format)?;
            let metadata = saved.metadata.clone();
            (saved.into_table()?, Some(metadata))
        }
        None => (QTable::new(), None),
    };

    print_section("Training Configuration");
    print_kv("Opponent", &strategy.to_string());
    print_kv("Episodes", &format_number(config.episodes));
    print_kv("Rounds per episode", &config.rounds_per_episode.to_string());
    print_kv("Learning rate", &config.learning_rate.to_string());
    print_kv("Discount factor", &config.discount_factor.to_string());
    print_kv("Epsilon", &config.epsilon.to_string());
    if let Some(seed) = config.seed {
        print_kv("Seed", &seed.to_string());
    }

    let reward_observer = RewardObserver::new();
    let reward_log = reward_observer.log();
    let mut trainer =
        Trainer::new(config.clone(), strategy)?.with_observer(Box::new(reward_observer));
    if args.progress {
        trainer = trainer.with_observer(Box::new(ProgressObserver::new()));
    }

    let table = trainer.train_from(initial_table)?;

    let rewards = reward_log
        .lock()
        .map_err(|_| anyhow::anyhow!("Reward log is unavailable after training"))
        .map(|rewards| RewardSummary::from_rewards(&rewards, REWARD_WINDOW))?;

    print_section("Training Results");
    print_kv("States learned", &table.len().to_string());
    if let Some(summary) = &rewards {
        print_kv(
            "Early reward",
            &format!("{:.2} (first {} episodes)", summary.early_mean, summary.window),
        );
        print_kv(
            "Late reward",
            &format!("{:.2} (last {} episodes)", summary.late_mean, summary.window),
        );
    }
    println!();
    print_q_table(&table);

    let metadata = TrainingMetadata::from_config(&config, strategy);
    let metadata = match &previous {
        Some(previous) => metadata.continued_from(previous),
        None => metadata,
    };
    let states = table.len();
    let saved = SavedQTable::new(table, metadata.stamped());
    save_table(&saved, &args.output, args.format)?;
    println!("\nTraining complete. Q-table saved to {}", args.output.display());

    if let Some(raw) = &args.summary {
        let path = sanitize_summary_path(raw);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        let file = File::create(&path)
            .with_context(|| format!("Failed to create summary file {}", path.display()))?;
        let summary = TrainingSummaryFile {
            strategy,
            config,
            states,
            rewards,
            output: args.output.display().to_string(),
        };
        to_writer_pretty(file, &summary).context("Failed to write training summary")?;
        println!("Summary written to {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_summary_path() {
        assert_eq!(
            sanitize_summary_path(Path::new("out/run")),
            PathBuf::from("out/run.json")
        );
        assert_eq!(
            sanitize_summary_path(Path::new("out/run.JSON")),
            PathBuf::from("out/run.JSON")
        );
    }

    #[test]
    fn test_cli_defaults_match_training_config() {
        let args = TrainArgs::parse_from(["train", "--strategy_type", "titfortat"]);
        let config = args.training_config();
        assert_eq!(config, TrainingConfig::default());
        assert_eq!(args.cooperate_prob, 0.5);
        assert_eq!(args.output, PathBuf::from("qtable.msgpack"));
    }
}
