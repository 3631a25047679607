//! Statistics gathered during an evaluation run

use serde::{Deserialize, Serialize};

use crate::game::{Action, Outcome};

/// Number of times each action was played.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionCounts {
    #[serde(rename = "C")]
    pub cooperate: usize,
    #[serde(rename = "D")]
    pub defect: usize,
}

impl ActionCounts {
    pub fn record(&mut self, action: Action) {
        match action {
            Action::Cooperate => self.cooperate += 1,
            Action::Defect => self.defect += 1,
        }
    }

    pub fn get(&self, action: Action) -> usize {
        match action {
            Action::Cooperate => self.cooperate,
            Action::Defect => self.defect,
        }
    }

    pub fn total(&self) -> usize {
        self.cooperate + self.defect
    }
}

/// Number of times each outcome occurred, keyed `agent/opponent`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeCounts {
    #[serde(rename = "C/C")]
    pub mutual_cooperation: usize,
    #[serde(rename = "C/D")]
    pub exploited: usize,
    #[serde(rename = "D/C")]
    pub exploiting: usize,
    #[serde(rename = "D/D")]
    pub mutual_defection: usize,
}

impl OutcomeCounts {
    pub fn record(&mut self, outcome: Outcome) {
        *self.slot(outcome) += 1;
    }

    pub fn get(&self, outcome: Outcome) -> usize {
        match (outcome.agent, outcome.opponent) {
            (Action::Cooperate, Action::Cooperate) => self.mutual_cooperation,
            (Action::Cooperate, Action::Defect) => self.exploited,
            (Action::Defect, Action::Cooperate) => self.exploiting,
            (Action::Defect, Action::Defect) => self.mutual_defection,
        }
    }

    pub fn total(&self) -> usize {
        Outcome::ALL.iter().map(|&outcome| self.get(outcome)).sum()
    }

    fn slot(&mut self, outcome: Outcome) -> &mut usize {
        match (outcome.agent, outcome.opponent) {
            (Action::Cooperate, Action::Cooperate) => &mut self.mutual_cooperation,
            (Action::Cooperate, Action::Defect) => &mut self.exploited,
            (Action::Defect, Action::Cooperate) => &mut self.exploiting,
            (Action::Defect, Action::Defect) => &mut self.mutual_defection,
        }
    }
}

/// Raw counts and per-round sequences from one evaluation run, plus the
/// derived rates. Read-only once returned by the evaluator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluationStatistics {
    /// Rounds played
    pub rounds: usize,
    pub outcomes: OutcomeCounts,
    pub agent_actions: ActionCounts,
    pub opponent_actions: ActionCounts,
    /// Agent payoff for each round, in order
    pub score_progression: Vec<u32>,
    /// Actions played in each round, in order
    pub round_outcomes: Vec<Outcome>,
    pub total_score: u64,
}

impl EvaluationStatistics {
    pub(crate) fn with_capacity(rounds: usize) -> Self {
        Self {
            score_progression: Vec::with_capacity(rounds),
            round_outcomes: Vec::with_capacity(rounds),
            ..Self::default()
        }
    }

    pub(crate) fn record(&mut self, outcome: Outcome, payoff: u32) {
        self.rounds += 1;
        self.outcomes.record(outcome);
        self.agent_actions.record(outcome.agent);
        self.opponent_actions.record(outcome.opponent);
        self.score_progression.push(payoff);
        self.round_outcomes.push(outcome);
        self.total_score += u64::from(payoff);
    }

    fn rate(&self, count: usize) -> f64 {
        if self.rounds == 0 {
            0.0
        } else {
            count as f64 / self.rounds as f64
        }
    }

    /// Average agent payoff per round
    pub fn average_score(&self) -> f64 {
        if self.rounds == 0 {
            0.0
        } else {
            self.total_score as f64 / self.rounds as f64
        }
    }

    pub fn agent_cooperation_rate(&self) -> f64 {
        self.rate(self.agent_actions.cooperate)
    }

    pub fn opponent_cooperation_rate(&self) -> f64 {
        self.rate(self.opponent_actions.cooperate)
    }

    /// Fraction of rounds that ended in `outcome`
    pub fn outcome_rate(&self, outcome: Outcome) -> f64 {
        self.rate(self.outcomes.get(outcome))
    }

    /// Rates of the outcomes that occurred, in order of first occurrence.
    pub fn outcome_distribution(&self) -> Vec<(Outcome, f64)> {
        let mut seen: Vec<Outcome> = Vec::with_capacity(Outcome::ALL.len());
        for &outcome in &self.round_outcomes {
            if !seen.contains(&outcome) {
                seen.push(outcome);
                if seen.len() == Outcome::ALL.len() {
                    break;
                }
            }
        }
        seen.into_iter()
            .map(|outcome| (outcome, self.outcome_rate(outcome)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Action::{Cooperate as C, Defect as D};

    #[test]
    fn test_record_and_rates() {
        let mut stats = EvaluationStatistics::with_capacity(4);
        stats.record(Outcome::new(C, C), 3);
        stats.record(Outcome::new(D, C), 5);
        stats.record(Outcome::new(D, D), 1);
        stats.record(Outcome::new(D, D), 1);

        assert_eq!(stats.rounds, 4);
        assert_eq!(stats.total_score, 10);
        assert_eq!(stats.average_score(), 2.5);
        assert_eq!(stats.agent_cooperation_rate(), 0.25);
        assert_eq!(stats.opponent_cooperation_rate(), 0.5);
        assert_eq!(stats.outcome_rate(Outcome::new(D, D)), 0.5);
        assert_eq!(stats.outcomes.total(), 4);
        assert_eq!(
            stats.outcome_distribution(),
            vec![
                (Outcome::new(C, C), 0.25),
                (Outcome::new(D, C), 0.25),
                (Outcome::new(D, D), 0.5),
            ]
        );
    }

    #[test]
    fn test_distribution_follows_first_occurrence() {
        let mut stats = EvaluationStatistics::default();
        stats.record(Outcome::new(D, D), 1);
        stats.record(Outcome::new(C, D), 0);
        stats.record(Outcome::new(D, D), 1);
        stats.record(Outcome::new(C, C), 3);

        let order: Vec<Outcome> = stats
            .outcome_distribution()
            .into_iter()
            .map(|(outcome, _)| outcome)
            .collect();
        assert_eq!(
            order,
            vec![Outcome::new(D, D), Outcome::new(C, D), Outcome::new(C, C)]
        );
        assert_eq!(stats.outcome_distribution()[0].1, 0.5);
    }

    #[test]
    fn test_empty_statistics_have_zero_rates() {
        let stats = EvaluationStatistics::default();
        assert_eq!(stats.average_score(), 0.0);
        assert_eq!(stats.agent_cooperation_rate(), 0.0);
        assert!(stats.outcome_distribution().is_empty());
    }

    #[test]
    fn test_json_export_shape() {
        let mut stats = EvaluationStatistics::default();
        stats.record(Outcome::new(D, C), 5);
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["outcomes"]["D/C"], 1);
        assert_eq!(json["agent_actions"]["D"], 1);
        assert_eq!(json["score_progression"][0], 5);
    }
}
