//! Observer port - abstraction for observing training runs
//!
//! This port lets callers watch a training run (progress bars, reward curves,
//! logs) without coupling the trainer to any output format.

use crate::{
    Result,
    game::{Outcome, State},
};

/// One round as seen by the trainer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundObservation {
    /// Episode index (0-based)
    pub episode: usize,
    /// Round index within the episode (0-based)
    pub round: usize,
    /// State before the round
    pub state: State,
    /// Actions played
    pub outcome: Outcome,
    /// Agent's immediate reward
    pub reward: f64,
    /// Whether the agent's action was an exploratory draw
    pub explored: bool,
}

/// Observer trait for monitoring training
///
/// # Event Sequence
///
/// 1. `on_training_start(total_episodes)` - Once at the beginning
/// 2. For each episode:
///    - `on_episode_start(episode)`
///    - `on_round(...)` - For each round, after the Q-value update
///    - `on_episode_end(episode, total_reward)`
/// 3. `on_training_end()` - Once at the end
///
/// All methods default to no-ops.
///
/// # Examples
///
/// ```no_run
/// use dilemma::ports::Observer;
///
/// struct EpisodeCounter {
///     episodes: usize,
/// }
///
/// impl Observer for EpisodeCounter {
///     fn on_episode_end(&mut self, _episode: usize, _total_reward: f64) -> dilemma::Result<()> {
///         self.episodes += 1;
///         Ok(())
///     }
/// }
/// ```
pub trait Observer: Send {
    /// Called when training starts.
    fn on_training_start(&mut self, _total_episodes: usize) -> Result<()> {
        Ok(())
    }

    /// Called when an episode starts, after the state has been reset.
    fn on_episode_start(&mut self, _episode: usize) -> Result<()> {
        Ok(())
    }

    /// Called for each round once its update has been applied.
    fn on_round(&mut self, _round: &RoundObservation) -> Result<()> {
        Ok(())
    }

    /// Called when an episode ends with the sum of the agent's rewards.
    fn on_episode_end(&mut self, _episode: usize, _total_reward: f64) -> Result<()> {
        Ok(())
    }

    /// Called when training completes.
    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}
