//! Configuration types for training and evaluation runs.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result, ensure_probability};

/// Hyperparameters for a Q-learning training run.
///
/// # Examples
///
/// ```
/// use dilemma::config::TrainingConfig;
///
/// let config = TrainingConfig::default()
///     .with_episodes(1_000)
///     .with_epsilon(0.05)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Number of episodes
    pub episodes: usize,
    /// Rounds per episode
    pub rounds_per_episode: usize,
    /// Learning rate α
    pub learning_rate: f64,
    /// Discount factor γ
    pub discount_factor: f64,
    /// Exploration rate ε
    pub epsilon: f64,
    /// Clear the opponent's history at the start of every episode instead of
    /// once per training run
    pub reset_history_per_episode: bool,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl TrainingConfig {
    pub const DEFAULT_EPISODES: usize = 5000;
    pub const DEFAULT_ROUNDS_PER_EPISODE: usize = 20;
    pub const DEFAULT_LEARNING_RATE: f64 = 0.1;
    pub const DEFAULT_DISCOUNT_FACTOR: f64 = 0.95;
    pub const DEFAULT_EPSILON: f64 = 0.1;

    pub fn with_episodes(mut self, episodes: usize) -> Self {
        self.episodes = episodes;
        self
    }

    pub fn with_rounds_per_episode(mut self, rounds: usize) -> Self {
        self.rounds_per_episode = rounds;
        self
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_discount_factor(mut self, discount_factor: f64) -> Self {
        self.discount_factor = discount_factor;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_reset_history_per_episode(mut self, reset: bool) -> Self {
        self.reset_history_per_episode = reset;
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check that every parameter is in range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] for zero episode or round
    /// counts and for a learning rate outside `(0, 1]`, and
    /// [`Error::InvalidProbability`] for γ or ε outside `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        if self.episodes == 0 {
            return Err(Error::InvalidConfiguration {
                message: "episodes must be at least 1".to_string(),
            });
        }
        if self.rounds_per_episode == 0 {
            return Err(Error::InvalidConfiguration {
                message: "rounds per episode must be at least 1".to_string(),
            });
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0 && self.learning_rate <= 1.0)
        {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "learning rate must be in (0, 1], got {}",
                    self.learning_rate
                ),
            });
        }
        ensure_probability("discount factor", self.discount_factor)?;
        ensure_probability("epsilon", self.epsilon)?;
        Ok(())
    }
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            episodes: Self::DEFAULT_EPISODES,
            rounds_per_episode: Self::DEFAULT_ROUNDS_PER_EPISODE,
            learning_rate: Self::DEFAULT_LEARNING_RATE,
            discount_factor: Self::DEFAULT_DISCOUNT_FACTOR,
            epsilon: Self::DEFAULT_EPSILON,
            reset_history_per_episode: false,
            seed: None,
        }
    }
}

/// Settings for a greedy evaluation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationConfig {
    /// Number of rounds to play
    pub rounds: usize,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl EvaluationConfig {
    pub const DEFAULT_ROUNDS: usize = 1000;

    pub fn with_rounds(mut self, rounds: usize) -> Self {
        self.rounds = rounds;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.rounds == 0 {
            return Err(Error::InvalidConfiguration {
                message: "evaluation rounds must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            rounds: Self::DEFAULT_ROUNDS,
            seed: None,
        }
    }
}
