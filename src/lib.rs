//! Tabular Q-learning for the iterated Prisoner's Dilemma
//!
//! This crate provides:
//! - The game model: actions, payoff matrix, and the last-round state
//! - Fixed opponent strategies (random, tit-for-tat, unconditional)
//! - A Q-learning trainer with ε-greedy exploration
//! - A greedy evaluator producing pure-data statistics
//! - Persistence adapters and a text report for the CLI

pub mod adapters;
pub mod cli;
pub mod config;
pub mod error;
pub mod evaluation;
pub mod game;
pub mod opponent;
pub mod pipeline;
pub mod ports;
pub mod q_learning;
pub mod report;

pub use config::{EvaluationConfig, TrainingConfig};
pub use error::{Error, Result};
pub use evaluation::{EvaluationStatistics, Evaluator};
pub use game::{Action, Outcome, PayoffMatrix, State};
pub use opponent::{Opponent, Strategy};
pub use q_learning::{QTable, SavedQTable, Trainer};
