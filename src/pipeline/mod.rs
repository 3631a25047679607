//! Observers that plug into a training run
//!
//! These implement the [`crate::ports::Observer`] port for user feedback and
//! for collecting learning curves.

pub mod observers;

pub use observers::{ProgressObserver, RewardLog, RewardObserver, RewardSummary};
