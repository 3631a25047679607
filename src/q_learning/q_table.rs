//! Q-table implementation for temporal difference learning

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::game::{Action, State};

/// Estimated values of both actions in one state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionValues {
    #[serde(rename = "C")]
    pub cooperate: f64,
    #[serde(rename = "D")]
    pub defect: f64,
}

impl ActionValues {
    pub fn new(cooperate: f64, defect: f64) -> Self {
        Self { cooperate, defect }
    }

    pub fn get(&self, action: Action) -> f64 {
        match action {
            Action::Cooperate => self.cooperate,
            Action::Defect => self.defect,
        }
    }

    pub fn get_mut(&mut self, action: Action) -> &mut f64 {
        match action {
            Action::Cooperate => &mut self.cooperate,
            Action::Defect => &mut self.defect,
        }
    }

    /// Action with the strictly highest value; the first action in
    /// [`Action::ALL`] wins ties.
    pub fn greedy(&self) -> Action {
        let mut best = Action::ALL[0];
        for action in Action::ALL.into_iter().skip(1) {
            if self.get(action) > self.get(best) {
                best = action;
            }
        }
        best
    }

    /// Maximum of the two action values.
    pub fn best(&self) -> f64 {
        self.cooperate.max(self.defect)
    }
}

/// Sparse Q-table mapping states to action values.
///
/// Entries are created lazily with zero values and never removed. Serializes
/// as a plain `state -> {C, D}` mapping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QTable {
    values: BTreeMap<State, ActionValues>,
}

impl QTable {
    /// Create an empty Q-table
    pub fn new() -> Self {
        Self::default()
    }

    /// Values for a state, inserting zeros on first access.
    pub fn entry(&mut self, state: State) -> &mut ActionValues {
        self.values.entry(state).or_default()
    }

    /// Values for a state without creating it.
    pub fn get(&self, state: &State) -> Option<&ActionValues> {
        self.values.get(state)
    }

    /// Overwrite a single Q-value, creating the entry if needed.
    pub fn set(&mut self, state: State, action: Action, value: f64) {
        *self.entry(state).get_mut(action) = value;
    }

    /// Greedy action for a stored state.
    pub fn greedy_action(&self, state: &State) -> Option<Action> {
        self.get(state).map(ActionValues::greedy)
    }

    /// Maximum action value for a stored state.
    pub fn best_value(&self, state: &State) -> Option<f64> {
        self.get(state).map(ActionValues::best)
    }

    /// Q-learning update: off-policy TD control
    ///
    /// Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)]
    ///
    /// Both `state` and `next_state` are created if absent. Returns the TD error.
    pub fn q_learning_update(
        &mut self,
        state: State,
        action: Action,
        reward: f64,
        next_state: State,
        learning_rate: f64,
        discount_factor: f64,
    ) -> f64 {
        let max_next_q = self.entry(next_state).best();
        let current_q = self.entry(state).get_mut(action);
        let td_error = reward + discount_factor * max_next_q - *current_q;
        *current_q += learning_rate * td_error;
        td_error
    }

    /// Number of states stored
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn contains(&self, state: &State) -> bool {
        self.values.contains_key(state)
    }

    /// Stored entries in state order.
    pub fn iter(&self) -> impl Iterator<Item = (&State, &ActionValues)> {
        self.values.iter()
    }
}
