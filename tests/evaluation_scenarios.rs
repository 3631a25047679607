//! Evaluation scenarios and statistics consistency

use dilemma::{
    Action::{Cooperate as C, Defect as D},
    EvaluationConfig, Evaluator, Outcome, PayoffMatrix, QTable, State, Strategy, Trainer,
    TrainingConfig,
};

fn evaluate(table: &QTable, strategy: Strategy, rounds: usize) -> dilemma::EvaluationStatistics {
    let config = EvaluationConfig::default().with_rounds(rounds).with_seed(17);
    Evaluator::new(table, strategy, config).unwrap().evaluate()
}

#[test]
fn test_empty_table_against_always_cooperate() {
    let stats = evaluate(&QTable::new(), Strategy::AlwaysCooperate, 100);

    assert_eq!(stats.outcomes.get(Outcome::new(D, C)), 100);
    assert_eq!(format!("{:.2}", stats.average_score()), "5.00");
    assert_eq!(stats.agent_cooperation_rate(), 0.0);
}

#[test]
fn test_empty_table_against_always_defect() {
    let stats = evaluate(&QTable::new(), Strategy::AlwaysDefect, 100);

    assert_eq!(stats.outcomes.get(Outcome::new(D, D)), 100);
    assert_eq!(format!("{:.2}", stats.average_score()), "1.00");
}

#[test]
fn test_statistics_are_consistent_for_every_strategy() {
    let config = TrainingConfig::default().with_episodes(500).with_seed(8);
    let table = Trainer::new(config, Strategy::random(0.6).unwrap())
        .unwrap()
        .train()
        .unwrap();

    let strategies = [
        Strategy::random(0.6).unwrap(),
        Strategy::TitForTat,
        Strategy::AlwaysCooperate,
        Strategy::AlwaysDefect,
        Strategy::CooperativeDefault,
    ];
    let rounds = 1000;
    for strategy in strategies {
        let stats = evaluate(&table, strategy, rounds);

        assert_eq!(stats.rounds, rounds);
        assert_eq!(stats.outcomes.total(), rounds, "{strategy}");
        assert_eq!(stats.agent_actions.total(), rounds);
        assert_eq!(stats.opponent_actions.total(), rounds);
        assert_eq!(stats.score_progression.len(), rounds);
        assert_eq!(
            stats.total_score,
            stats.score_progression.iter().map(|&p| u64::from(p)).sum::<u64>()
        );
        for (outcome, payoff) in stats.round_outcomes.iter().zip(&stats.score_progression) {
            assert_eq!(*payoff, PayoffMatrix::STANDARD.payoffs(*outcome).0);
        }
        let distribution_total: f64 = stats.outcome_distribution().iter().map(|(_, r)| r).sum();
        assert!((distribution_total - 1.0).abs() < 1e-9);
    }
}

#[test]
fn test_state_follows_previous_round() {
    // Greedy C at Start and after C/C, Defect fallback elsewhere
    let mut table = QTable::new();
    table.set(State::Start, C, 1.0);
    table.set(State::played(C, C), C, 1.0);

    let stats = evaluate(&table, Strategy::TitForTat, 5);
    assert!(stats.round_outcomes.iter().all(|&o| o == Outcome::new(C, C)));
    assert_eq!(stats.average_score(), 3.0);
}

#[test]
fn test_seeded_random_evaluation_is_reproducible() {
    let table = QTable::new();
    let strategy = Strategy::random(0.5).unwrap();
    let first = evaluate(&table, strategy, 300);
    let second = evaluate(&table, strategy, 300);
    assert_eq!(first, second);
}
