//! Game state: the previous round's pair of actions

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    error::Error,
    game::{Action, Outcome},
};

/// State seen by the agent before choosing an action.
///
/// Serialized as a plain string (`"Start,Start"`, `"C,D"`, ...) so that a
/// table keyed by state stays a flat mapping in every format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum State {
    /// Sentinel used only as the first state of an episode.
    Start,
    /// The actions just played.
    Played(Outcome),
}

impl State {
    /// The sentinel followed by the four played states.
    pub const ALL: [State; 5] = [
        State::Start,
        State::Played(Outcome::ALL[0]),
        State::Played(Outcome::ALL[1]),
        State::Played(Outcome::ALL[2]),
        State::Played(Outcome::ALL[3]),
    ];

    /// Transition: the next state is the pair of actions just played.
    pub fn after(outcome: Outcome) -> Self {
        State::Played(outcome)
    }

    pub fn played(agent: Action, opponent: Action) -> Self {
        State::Played(Outcome::new(agent, opponent))
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            State::Start => write!(f, "Start,Start"),
            State::Played(outcome) => write!(f, "{},{}", outcome.agent, outcome.opponent),
        }
    }
}

impl FromStr for State {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidState {
            input: s.to_string(),
        };
        let (left, right) = s.split_once(',').ok_or_else(invalid)?;
        let (left, right) = (left.trim(), right.trim());
        if left.eq_ignore_ascii_case("start") && right.eq_ignore_ascii_case("start") {
            return Ok(State::Start);
        }
        let agent = left.parse::<Action>().map_err(|_| invalid())?;
        let opponent = right.parse::<Action>().map_err(|_| invalid())?;
        Ok(State::played(agent, opponent))
    }
}

impl From<State> for String {
    fn from(state: State) -> Self {
        state.to_string()
    }
}

impl TryFrom<String> for State {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
