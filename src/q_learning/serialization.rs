//! Versioned save format for trained Q-tables.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::{
    config::TrainingConfig,
    error::{Error, Result},
    opponent::Strategy,
    q_learning::q_table::QTable,
};

/// How a saved table was produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingMetadata {
    /// Opponent strategy trained against
    pub strategy: Option<Strategy>,
    /// Number of episodes trained
    pub episodes: Option<usize>,
    pub rounds_per_episode: Option<usize>,
    pub learning_rate: Option<f64>,
    pub discount_factor: Option<f64>,
    pub epsilon: Option<f64>,
    pub reset_history_per_episode: Option<bool>,
    /// Random seed used (if any)
    pub seed: Option<u64>,
    /// Unix timestamp (seconds) when saved
    pub saved_at: Option<String>,
}

impl TrainingMetadata {
    /// Metadata describing a finished training run.
    pub fn from_config(config: &TrainingConfig, strategy: Strategy) -> Self {
        Self {
            strategy: Some(strategy),
            episodes: Some(config.episodes),
            rounds_per_episode: Some(config.rounds_per_episode),
            learning_rate: Some(config.learning_rate),
            discount_factor: Some(config.discount_factor),
            epsilon: Some(config.epsilon),
            reset_history_per_episode: Some(config.reset_history_per_episode),
            seed: config.seed,
            saved_at: None,
        }
    }

    /// Stamp with the current time.
    pub fn stamped(mut self) -> Self {
        self.saved_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .ok()
            .map(|elapsed| elapsed.as_secs().to_string());
        self
    }

    /// Metadata for a run that continued training a previously saved table.
    ///
    /// Hyperparameters describe this run; the episode count is the total
    /// across both.
    pub fn continued_from(mut self, previous: &TrainingMetadata) -> Self {
        let earlier = previous.episodes.unwrap_or(0);
        self.episodes = Some(earlier + self.episodes.unwrap_or(0));
        self
    }
}

/// A Q-table together with its format version and training metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedQTable {
    pub version: u32,
    pub table: QTable,
    #[serde(default)]
    pub metadata: TrainingMetadata,
}

impl SavedQTable {
    /// Current save format version
    pub const VERSION: u32 = 1;

    pub fn new(table: QTable, metadata: TrainingMetadata) -> Self {
        Self {
            version: Self::VERSION,
            table,
            metadata,
        }
    }

    /// Reject files written by an incompatible format version.
    pub fn check_version(&self) -> Result<()> {
        if self.version != Self::VERSION {
            return Err(Error::UnsupportedVersion {
                found: self.version,
                expected: Self::VERSION,
            });
        }
        Ok(())
    }

    /// Unwrap the table after a version check.
    pub fn into_table(self) -> Result<QTable> {
        self.check_version()?;
        Ok(self.table)
    }
}
