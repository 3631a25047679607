//! Iterated Prisoner's Dilemma game model
//!
//! The model is deliberately tiny: two actions, a fixed payoff matrix, and a
//! state that remembers only the previous round's pair of actions.

pub mod action;
pub mod payoff;
pub mod state;

pub use action::{Action, Outcome};
pub use payoff::PayoffMatrix;
pub use state::State;
