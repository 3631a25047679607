//! Observer implementations for training runs

use std::sync::{Arc, Mutex, MutexGuard};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::{Error, Result, ports::Observer};

/// Progress bar observer - Shows training progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    recent_reward: f64,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            recent_reward: 0.0,
        }
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        let pb = ProgressBar::new(total_episodes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} episodes ({msg})")
                .map_err(|e| Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_episode_end(&mut self, episode: usize, total_reward: f64) -> Result<()> {
        // Exponential moving average keeps the message stable
        self.recent_reward = if episode == 0 {
            total_reward
        } else {
            0.99 * self.recent_reward + 0.01 * total_reward
        };

        if let Some(pb) = &self.progress_bar {
            pb.set_position(episode as u64 + 1);
            pb.set_message(format!("reward ≈ {:.1}", self.recent_reward));
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(format!("reward ≈ {:.1}", self.recent_reward));
        }
        Ok(())
    }
}

/// Per-episode reward totals shared between an observer and its owner.
pub type RewardLog = Arc<Mutex<Vec<f64>>>;

/// Records the agent's total reward for every episode.
///
/// The trainer takes ownership of its observers, so the rewards are written
/// to a shared [`RewardLog`] that the caller keeps a handle to.
pub struct RewardObserver {
    rewards: RewardLog,
}

impl RewardObserver {
    pub fn new() -> Self {
        Self {
            rewards: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Handle to the recorded rewards.
    pub fn log(&self) -> RewardLog {
        Arc::clone(&self.rewards)
    }

    fn rewards(&self) -> Result<MutexGuard<'_, Vec<f64>>> {
        self.rewards.lock().map_err(|_| Error::PoisonedLock {
            resource: "reward log".to_string(),
        })
    }
}

impl Default for RewardObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for RewardObserver {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        let mut rewards = self.rewards()?;
        rewards.clear();
        rewards.reserve(total_episodes);
        Ok(())
    }

    fn on_episode_end(&mut self, _episode: usize, total_reward: f64) -> Result<()> {
        self.rewards()?.push(total_reward);
        Ok(())
    }
}

/// Summary of a learning curve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardSummary {
    pub episodes: usize,
    /// Mean reward over the first `window` episodes
    pub early_mean: f64,
    /// Mean reward over the last `window` episodes
    pub late_mean: f64,
    pub window: usize,
}

impl RewardSummary {
    /// Summarize a reward curve using windows of at most `window` episodes.
    pub fn from_rewards(rewards: &[f64], window: usize) -> Option<Self> {
        if rewards.is_empty() || window == 0 {
            return None;
        }
        let window = window.min(rewards.len());
        let mean = |slice: &[f64]| slice.iter().sum::<f64>() / slice.len() as f64;
        Some(Self {
            episodes: rewards.len(),
            early_mean: mean(&rewards[..window]),
            late_mean: mean(&rewards[rewards.len() - window..]),
            window,
        })
    }
}
