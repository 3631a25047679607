//! Tabular Q-learning for the iterated Prisoner's Dilemma
//!
//! The agent's state is the previous round's pair of actions, so the table
//! holds at most five entries. Training uses ε-greedy exploration and the
//! one-step update
//!
//! Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)]
//!
//! ## Usage Example
//!
//! ```no_run
//! use dilemma::{config::TrainingConfig, opponent::Strategy, q_learning::Trainer};
//!
//! let config = TrainingConfig::default()
//!     .with_episodes(5000) // episodes
//!     .with_epsilon(0.1)   // exploration
//!     .with_seed(42);
//! let mut trainer = Trainer::new(config, Strategy::TitForTat)?;
//! let table = trainer.train()?;
//! # Ok::<(), dilemma::Error>(())
//! ```

pub mod q_table;
pub mod serialization;
pub mod trainer;

// Public re-exports
pub use q_table::{ActionValues, QTable};
pub use serialization::{SavedQTable, TrainingMetadata};
pub use trainer::Trainer;
