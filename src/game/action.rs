//! Actions and per-round outcomes

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// One of the two moves available to each player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Action {
    #[serde(rename = "C")]
    Cooperate,
    #[serde(rename = "D")]
    Defect,
}

impl Action {
    /// Both actions in table iteration order. Ties resolve to the earlier entry.
    pub const ALL: [Action; 2] = [Action::Cooperate, Action::Defect];

    /// Single-letter code used in persisted tables and reports.
    pub fn code(self) -> char {
        match self {
            Action::Cooperate => 'C',
            Action::Defect => 'D',
        }
    }

    pub fn is_cooperate(self) -> bool {
        self == Action::Cooperate
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Action {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "c" | "cooperate" => Ok(Action::Cooperate),
            "d" | "defect" => Ok(Action::Defect),
            _ => Err(Error::InvalidAction {
                input: s.to_string(),
            }),
        }
    }
}

/// The pair of actions played in one round, agent first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Outcome {
    pub agent: Action,
    pub opponent: Action,
}

impl Outcome {
    /// All four outcomes in a fixed order: CC, CD, DC, DD.
    pub const ALL: [Outcome; 4] = [
        Outcome::new(Action::Cooperate, Action::Cooperate),
        Outcome::new(Action::Cooperate, Action::Defect),
        Outcome::new(Action::Defect, Action::Cooperate),
        Outcome::new(Action::Defect, Action::Defect),
    ];

    pub const fn new(agent: Action, opponent: Action) -> Self {
        Self { agent, opponent }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.agent, self.opponent)
    }
}
