//! Greedy evaluation of a trained Q-table
//!
//! Evaluation never learns: the table is borrowed immutably and the agent
//! always plays the greedy action, falling back to Defect in states the
//! table has never seen.

pub mod evaluator;
pub mod statistics;

pub use evaluator::{Evaluator, FALLBACK_ACTION};
pub use statistics::{ActionCounts, EvaluationStatistics, OutcomeCounts};
