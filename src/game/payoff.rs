//! Payoff matrix for the Prisoner's Dilemma

use serde::{Deserialize, Serialize};

use crate::game::{Action, Outcome};

/// Symmetric payoff matrix described by its four classic parameters.
///
/// | agent \ opponent | C | D |
/// |------------------|---|---|
/// | C | (R, R) | (S, T) |
/// | D | (T, S) | (P, P) |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoffMatrix {
    /// T: defecting against a cooperator
    pub temptation: u32,
    /// R: mutual cooperation
    pub reward: u32,
    /// P: mutual defection
    pub punishment: u32,
    /// S: cooperating against a defector
    pub sucker: u32,
}

impl PayoffMatrix {
    /// T=5, R=3, P=1, S=0
    pub const STANDARD: PayoffMatrix = PayoffMatrix {
        temptation: 5,
        reward: 3,
        punishment: 1,
        sucker: 0,
    };

    /// Payoffs `(agent, opponent)` for one round.
    pub fn payoffs(&self, outcome: Outcome) -> (u32, u32) {
        match (outcome.agent, outcome.opponent) {
            (Action::Cooperate, Action::Cooperate) => (self.reward, self.reward),
            (Action::Cooperate, Action::Defect) => (self.sucker, self.temptation),
            (Action::Defect, Action::Cooperate) => (self.temptation, self.sucker),
            (Action::Defect, Action::Defect) => (self.punishment, self.punishment),
        }
    }

    /// The agent's payoff, used as the immediate reward.
    pub fn agent_payoff(&self, outcome: Outcome) -> u32 {
        self.payoffs(outcome).0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Action::{Cooperate as C, Defect as D};

    #[test]
    fn test_standard_payoffs() {
        let m = PayoffMatrix::STANDARD;
        assert_eq!(m.payoffs(Outcome::new(C, C)), (3, 3));
        assert_eq!(m.payoffs(Outcome::new(C, D)), (0, 5));
        assert_eq!(m.payoffs(Outcome::new(D, C)), (5, 0));
        assert_eq!(m.payoffs(Outcome::new(D, D)), (1, 1));
    }

    #[test]
    fn test_standard_matrix_is_a_dilemma() {
        let PayoffMatrix {
            temptation,
            reward,
            punishment,
            sucker,
        } = PayoffMatrix::STANDARD;
        assert!(temptation > reward && reward > punishment && punishment > sucker);
        // Alternating exploitation pays less than steady cooperation
        assert!(2 * reward > temptation + sucker);
    }
}
