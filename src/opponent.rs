//! Fixed opponent policies
//!
//! An [`Opponent`] couples a [`Strategy`] chosen at construction time with the
//! history of rounds it has observed. Only [`Strategy::TitForTat`] consults the
//! history; the random strategy draws from the caller's generator so that one
//! seeded generator drives a whole run.

use std::{fmt, str::FromStr};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result, ensure_probability},
    game::{Action, Outcome},
};

/// Default cooperation probability for [`Strategy::Random`].
pub const DEFAULT_COOPERATE_PROB: f64 = 0.5;

const EXPECTED_TAGS: &str = "random, titfortat, always_cooperate, always_defect, default";

/// Behaviour of the opponent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Cooperate with probability `cooperate_prob`, independently each round.
    Random { cooperate_prob: f64 },
    /// Repeat the agent's previous move; cooperate on an empty history.
    TitForTat,
    AlwaysCooperate,
    AlwaysDefect,
    /// Cooperates unconditionally. Kept as its own tag for compatibility with
    /// tables trained against the lenient fallback policy.
    CooperativeDefault,
}

impl Strategy {
    /// Random strategy with a validated cooperation probability.
    pub fn random(cooperate_prob: f64) -> Result<Self> {
        ensure_probability("cooperate_prob", cooperate_prob)?;
        Ok(Strategy::Random { cooperate_prob })
    }

    /// Build a strategy from its tag. `cooperate_prob` is only used by `random`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownStrategy`] for an unrecognized tag and
    /// [`Error::InvalidProbability`] for a probability outside `[0, 1]`.
    pub fn from_tag(tag: &str, cooperate_prob: f64) -> Result<Self> {
        let normalized = tag.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "random" => Strategy::random(cooperate_prob),
            "titfortat" | "tit_for_tat" | "tft" => Ok(Strategy::TitForTat),
            "always_cooperate" | "alwayscooperate" | "allc" => Ok(Strategy::AlwaysCooperate),
            "always_defect" | "alwaysdefect" | "alld" => Ok(Strategy::AlwaysDefect),
            "default" | "cooperative_default" => Ok(Strategy::CooperativeDefault),
            _ => Err(Error::UnknownStrategy {
                input: tag.to_string(),
                expected: EXPECTED_TAGS.to_string(),
            }),
        }
    }

    /// Canonical tag, as accepted by [`Strategy::from_tag`].
    pub fn tag(&self) -> &'static str {
        match self {
            Strategy::Random { .. } => "random",
            Strategy::TitForTat => "titfortat",
            Strategy::AlwaysCooperate => "always_cooperate",
            Strategy::AlwaysDefect => "always_defect",
            Strategy::CooperativeDefault => "default",
        }
    }

    /// Cooperation probability for the random strategy.
    pub fn cooperate_prob(&self) -> Option<f64> {
        match self {
            Strategy::Random { cooperate_prob } => Some(*cooperate_prob),
            _ => None,
        }
    }

    fn next_move(&self, history: &OpponentHistory, rng: &mut impl Rng) -> Action {
        match self {
            Strategy::Random { cooperate_prob } => {
                if rng.random::<f64>() < *cooperate_prob {
                    Action::Cooperate
                } else {
                    Action::Defect
                }
            }
            Strategy::TitForTat => history
                .last()
                .map(|outcome| outcome.agent)
                .unwrap_or(Action::Cooperate),
            Strategy::AlwaysCooperate | Strategy::CooperativeDefault => Action::Cooperate,
            Strategy::AlwaysDefect => Action::Defect,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Random { cooperate_prob } => write!(f, "random(p={cooperate_prob})"),
            other => write!(f, "{}", other.tag()),
        }
    }
}

impl FromStr for Strategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Strategy::from_tag(s, DEFAULT_COOPERATE_PROB)
    }
}

/// Append-only record of rounds observed by one opponent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpponentHistory(Vec<Outcome>);

impl OpponentHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, outcome: Outcome) {
        self.0.push(outcome);
    }

    pub fn last(&self) -> Option<&Outcome> {
        self.0.last()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn clear(&mut self) {
        self.0.clear();
    }
}

/// A strategy together with the history it has observed.
#[derive(Debug, Clone)]
pub struct Opponent {
    strategy: Strategy,
    history: OpponentHistory,
}

impl Opponent {
    /// Fresh opponent with an empty history.
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            history: OpponentHistory::new(),
        }
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn history(&self) -> &OpponentHistory {
        &self.history
    }

    /// Choose the opponent's move for the coming round.
    pub fn next_move(&self, rng: &mut impl Rng) -> Action {
        self.strategy.next_move(&self.history, rng)
    }

    /// Record a played round.
    pub fn observe(&mut self, outcome: Outcome) {
        self.history.push(outcome);
    }

    /// Forget all observed rounds.
    pub fn reset(&mut self) {
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::game::Action::{Cooperate as C, Defect as D};

    #[test]
    fn test_fixed_strategies() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(Opponent::new(Strategy::AlwaysCooperate).next_move(&mut rng), C);
        assert_eq!(Opponent::new(Strategy::AlwaysDefect).next_move(&mut rng), D);
        assert_eq!(
            Opponent::new(Strategy::CooperativeDefault).next_move(&mut rng),
            C
        );
    }

    #[test]
    fn test_tit_for_tat_mirrors_agent() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut opponent = Opponent::new(Strategy::TitForTat);
        assert_eq!(opponent.next_move(&mut rng), C);

        opponent.observe(Outcome::new(D, C));
        assert_eq!(opponent.next_move(&mut rng), D);

        opponent.observe(Outcome::new(C, D));
        assert_eq!(opponent.next_move(&mut rng), C);

        opponent.reset();
        assert!(opponent.history().is_empty());
        assert_eq!(opponent.next_move(&mut rng), C);
    }

    #[test]
    fn test_random_extremes() {
        let mut rng = StdRng::seed_from_u64(7);
        let always = Opponent::new(Strategy::random(1.0).unwrap());
        let never = Opponent::new(Strategy::random(0.0).unwrap());
        for _ in 0..100 {
            assert_eq!(always.next_move(&mut rng), C);
            assert_eq!(never.next_move(&mut rng), D);
        }
    }

    #[test]
    fn test_random_frequency() {
        let mut rng = StdRng::seed_from_u64(42);
        let opponent = Opponent::new(Strategy::random(0.3).unwrap());
        let cooperations = (0..10_000)
            .filter(|_| opponent.next_move(&mut rng).is_cooperate())
            .count();
        let rate = cooperations as f64 / 10_000.0;
        assert!((rate - 0.3).abs() < 0.03, "rate was {rate}");
    }

    #[test]
    fn test_tag_parsing() {
        assert_eq!(
            Strategy::from_tag("titfortat", 0.5).unwrap(),
            Strategy::TitForTat
        );
        assert_eq!(
            Strategy::from_tag("Always-Defect", 0.5).unwrap(),
            Strategy::AlwaysDefect
        );
        assert_eq!(
            Strategy::from_tag("random", 0.25).unwrap(),
            Strategy::Random {
                cooperate_prob: 0.25
            }
        );
        assert!(matches!(
            Strategy::from_tag("grudger", 0.5),
            Err(Error::UnknownStrategy { .. })
        ));
        assert!(matches!(
            Strategy::from_tag("random", 1.5),
            Err(Error::InvalidProbability { .. })
        ));
    }

    #[test]
    fn test_tags_round_trip() {
        for strategy in [
            Strategy::TitForTat,
            Strategy::AlwaysCooperate,
            Strategy::AlwaysDefect,
            Strategy::CooperativeDefault,
        ] {
            assert_eq!(strategy.tag().parse::<Strategy>().unwrap(), strategy);
        }
    }
}
