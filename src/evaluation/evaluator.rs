//! Greedy replay of a frozen Q-table policy

use rand::rngs::StdRng;

use crate::{
    config::EvaluationConfig,
    error::{Result, ensure_probability},
    evaluation::statistics::EvaluationStatistics,
    game::{Action, Outcome, PayoffMatrix, State},
    opponent::{Opponent, Strategy},
    q_learning::{QTable, trainer::build_rng},
};

/// Action played in states absent from the table.
pub const FALLBACK_ACTION: Action = Action::Defect;

/// Plays the greedy policy of a borrowed Q-table against one opponent.
///
/// # Examples
///
/// ```
/// use dilemma::{config::EvaluationConfig, evaluation::Evaluator, opponent::Strategy, q_learning::QTable};
///
/// let table = QTable::new();
/// let config = EvaluationConfig::default().with_rounds(100);
/// let stats = Evaluator::new(&table, Strategy::AlwaysCooperate, config)?.evaluate();
/// assert_eq!(stats.average_score(), 5.0);
/// # Ok::<(), dilemma::Error>(())
/// ```
pub struct Evaluator<'a> {
    table: &'a QTable,
    strategy: Strategy,
    config: EvaluationConfig,
    rng: StdRng,
}

impl<'a> Evaluator<'a> {
    pub fn new(table: &'a QTable, strategy: Strategy, config: EvaluationConfig) -> Result<Self> {
        config.validate()?;
        if let Some(p) = strategy.cooperate_prob() {
            ensure_probability("cooperate_prob", p)?;
        }
        let rng = build_rng(config.seed);
        Ok(Self {
            table,
            strategy,
            config,
            rng,
        })
    }

    /// Greedy action for `state`, or [`FALLBACK_ACTION`] if the table has no entry.
    pub fn policy_action(&self, state: &State) -> Action {
        self.table.greedy_action(state).unwrap_or(FALLBACK_ACTION)
    }

    /// Play the configured number of rounds against a fresh opponent.
    pub fn evaluate(&mut self) -> EvaluationStatistics {
        let rounds = self.config.rounds;
        log::info!(
            "evaluating greedy policy against {} for {rounds} rounds",
            self.strategy
        );

        let mut opponent = Opponent::new(self.strategy);
        let mut stats = EvaluationStatistics::with_capacity(rounds);
        let mut state = State::Start;

        for _ in 0..rounds {
            let agent = self.policy_action(&state);
            let outcome = Outcome::new(agent, opponent.next_move(&mut self.rng));
            stats.record(outcome, PayoffMatrix::STANDARD.agent_payoff(outcome));

            state = State::after(outcome);
            opponent.observe(outcome);
        }

        log::info!(
            "evaluation finished: average score {:.2}",
            stats.average_score()
        );
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Action::{Cooperate as C, Defect as D};

    fn evaluate(table: &QTable, strategy: Strategy, rounds: usize) -> EvaluationStatistics {
        let config = EvaluationConfig::default().with_rounds(rounds).with_seed(11);
        Evaluator::new(table, strategy, config).unwrap().evaluate()
    }

    #[test]
    fn test_empty_table_defects_against_cooperator() {
        let stats = evaluate(&QTable::new(), Strategy::AlwaysCooperate, 100);
        assert_eq!(stats.outcomes.get(Outcome::new(D, C)), 100);
        assert_eq!(stats.average_score(), 5.0);
        assert_eq!(stats.agent_cooperation_rate(), 0.0);
        assert_eq!(stats.opponent_cooperation_rate(), 1.0);
    }

    #[test]
    fn test_empty_table_against_defector() {
        let stats = evaluate(&QTable::new(), Strategy::AlwaysDefect, 100);
        assert_eq!(stats.outcomes.get(Outcome::new(D, D)), 100);
        assert_eq!(stats.average_score(), 1.0);
    }

    #[test]
    fn test_table_is_not_mutated() {
        let mut table = QTable::new();
        table.set(State::Start, C, 1.0);
        let before = table.clone();
        evaluate(&table, Strategy::TitForTat, 50);
        assert_eq!(table, before);
    }

    #[test]
    fn test_greedy_policy_followed_with_fallback() {
        // Cooperate at Start, then C/C is unknown so the agent falls back to Defect
        let mut table = QTable::new();
        table.set(State::Start, C, 1.0);

        let stats = evaluate(&table, Strategy::AlwaysCooperate, 3);
        assert_eq!(
            stats.round_outcomes,
            vec![Outcome::new(C, C), Outcome::new(D, C), Outcome::new(D, C)]
        );
        assert_eq!(stats.score_progression, vec![3, 5, 5]);
    }

    #[test]
    fn test_tit_for_tat_retaliates() {
        let stats = evaluate(&QTable::new(), Strategy::TitForTat, 10);
        assert_eq!(stats.round_outcomes[0], Outcome::new(D, C));
        assert!(stats.round_outcomes[1..].iter().all(|&o| o == Outcome::new(D, D)));
        assert_eq!(stats.total_score, 5 + 9);
    }

    #[test]
    fn test_rejects_zero_rounds() {
        let config = EvaluationConfig::default().with_rounds(0);
        assert!(Evaluator::new(&QTable::new(), Strategy::AlwaysDefect, config).is_err());
    }

    #[test]
    fn test_statistics_are_consistent() {
        let mut table = QTable::new();
        table.set(State::Start, C, 1.0);
        table.set(State::played(C, D), D, 1.0);
        table.entry(State::played(C, C));

        let rounds = 500;
        let stats = evaluate(&table, Strategy::random(0.5).unwrap(), rounds);
        assert_eq!(stats.outcomes.total(), rounds);
        assert_eq!(stats.agent_actions.total(), rounds);
        assert_eq!(stats.opponent_actions.total(), rounds);
        for (outcome, payoff) in stats.round_outcomes.iter().zip(&stats.score_progression) {
            assert_eq!(*payoff, PayoffMatrix::STANDARD.payoffs(*outcome).0);
        }
    }
}
