//! Q-learning trainer
//!
//! Runs fixed-length episodes against a single opponent, choosing actions
//! ε-greedily and applying the one-step Q-learning update after every round.

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    config::TrainingConfig,
    error::Result,
    game::{Action, Outcome, PayoffMatrix, State},
    opponent::{Opponent, Strategy},
    ports::{Observer, RoundObservation},
    q_learning::q_table::QTable,
};

pub(crate) fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Tabular Q-learning trainer.
///
/// The trainer owns the opponent and the single random generator used for
/// both exploration and the opponent's draws, so a seeded run is reproducible.
///
/// # Examples
///
/// ```
/// use dilemma::{config::TrainingConfig, opponent::Strategy, q_learning::Trainer};
///
/// let config = TrainingConfig::default().with_episodes(100).with_seed(7);
/// let mut trainer = Trainer::new(config, Strategy::AlwaysDefect)?;
/// let table = trainer.train()?;
/// assert!(!table.is_empty());
/// # Ok::<(), dilemma::Error>(())
/// ```
pub struct Trainer {
    config: TrainingConfig,
    opponent: Opponent,
    rng: StdRng,
    observers: Vec<Box<dyn Observer>>,
}

impl Trainer {
    /// Create a trainer after validating the configuration.
    pub fn new(config: TrainingConfig, strategy: Strategy) -> Result<Self> {
        config.validate()?;
        if let Some(p) = strategy.cooperate_prob() {
            crate::error::ensure_probability("cooperate_prob", p)?;
        }
        let rng = build_rng(config.seed);
        Ok(Self {
            config,
            opponent: Opponent::new(strategy),
            rng,
            observers: Vec::new(),
        })
    }

    /// Add an observer to the trainer
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    /// The opponent, including the history it accumulated while training.
    pub fn opponent(&self) -> &Opponent {
        &self.opponent
    }

    /// Train a fresh table.
    pub fn train(&mut self) -> Result<QTable> {
        self.train_from(QTable::new())
    }

    /// Continue training an existing table.
    ///
    /// The opponent's history is cleared once at the start of the call. Between
    /// episodes it is only cleared when `reset_history_per_episode` is set.
    pub fn train_from(&mut self, mut table: QTable) -> Result<QTable> {
        let episodes = self.config.episodes;
        log::info!(
            "training against {} for {} episodes of {} rounds (α={}, γ={}, ε={})",
            self.opponent.strategy(),
            episodes,
            self.config.rounds_per_episode,
            self.config.learning_rate,
            self.config.discount_factor,
            self.config.epsilon,
        );

        self.opponent.reset();
        for observer in &mut self.observers {
            observer.on_training_start(episodes)?;
        }

        for episode in 0..episodes {
            let total_reward = self.run_episode(&mut table, episode)?;
            log::debug!("episode {episode}: total reward {total_reward}");
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }
        log::info!("training finished with {} states in the table", table.len());
        Ok(table)
    }

    fn run_episode(&mut self, table: &mut QTable, episode: usize) -> Result<f64> {
        if self.config.reset_history_per_episode {
            self.opponent.reset();
        }
        for observer in &mut self.observers {
            observer.on_episode_start(episode)?;
        }

        let mut state = State::Start;
        let mut total_reward = 0.0;

        for round in 0..self.config.rounds_per_episode {
            table.entry(state);
            let (agent, explored) = self.select_action(table, state);
            let opponent = self.opponent.next_move(&mut self.rng);
            let outcome = Outcome::new(agent, opponent);
            let reward = f64::from(PayoffMatrix::STANDARD.agent_payoff(outcome));

            let next_state = State::after(outcome);
            table.q_learning_update(
                state,
                agent,
                reward,
                next_state,
                self.config.learning_rate,
                self.config.discount_factor,
            );

            let observation = RoundObservation {
                episode,
                round,
                state,
                outcome,
                reward,
                explored,
            };
            for observer in &mut self.observers {
                observer.on_round(&observation)?;
            }

            total_reward += reward;
            self.opponent.observe(outcome);
            state = next_state;
        }

        for observer in &mut self.observers {
            observer.on_episode_end(episode, total_reward)?;
        }
        Ok(total_reward)
    }

    /// ε-greedy action selection. Returns the action and whether it was explored.
    fn select_action(&mut self, table: &mut QTable, state: State) -> (Action, bool) {
        if self.rng.random::<f64>() < self.config.epsilon {
            // Explore: uniform over both actions
            let index = self.rng.random_range(0..Action::ALL.len());
            (Action::ALL[index], true)
        } else {
            (table.entry(state).greedy(), false)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::game::Action::{Cooperate as C, Defect as D};

    fn config(episodes: usize) -> TrainingConfig {
        TrainingConfig::default()
            .with_episodes(episodes)
            .with_seed(42)
    }

    #[test]
    fn test_rejects_invalid_configuration() {
        assert!(Trainer::new(config(0), Strategy::AlwaysDefect).is_err());
        assert!(
            Trainer::new(
                config(10),
                Strategy::Random {
                    cooperate_prob: -0.5
                }
            )
            .is_err()
        );
    }

    #[test]
    fn test_first_round_update_from_empty_table() {
        // With ε = 0 the tie at Start resolves to Cooperate; against an
        // unconditional cooperator that earns R = 3.
        let config = config(1).with_rounds_per_episode(1).with_epsilon(0.0);
        let mut trainer = Trainer::new(config, Strategy::AlwaysCooperate).unwrap();
        let table = trainer.train().unwrap();

        let start = table.get(&State::Start).unwrap();
        assert!((start.get(C) - 0.3).abs() < 1e-12);
        assert_eq!(start.get(D), 0.0);
        assert_eq!(table.get(&State::played(C, C)).copied(), Some(Default::default()));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_only_visited_states_are_stored() {
        let config = config(200).with_epsilon(0.0);
        let mut trainer = Trainer::new(config, Strategy::AlwaysCooperate).unwrap();
        let table = trainer.train().unwrap();

        assert!(table.contains(&State::Start));
        assert!(!table.contains(&State::played(C, D)));
        assert!(!table.contains(&State::played(D, D)));
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let strategy = Strategy::random(0.5).unwrap();
        let first = Trainer::new(config(300), strategy).unwrap().train().unwrap();
        let second = Trainer::new(config(300), strategy).unwrap().train().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_history_spans_episodes_by_default() {
        let mut trainer = Trainer::new(config(3), Strategy::TitForTat).unwrap();
        trainer.train().unwrap();
        assert_eq!(trainer.opponent().history().len(), 3 * 20);
    }

    #[test]
    fn test_history_reset_per_episode() {
        let config = config(3).with_reset_history_per_episode(true);
        let mut trainer = Trainer::new(config, Strategy::TitForTat).unwrap();
        trainer.train().unwrap();
        assert_eq!(trainer.opponent().history().len(), 20);
    }

    #[test]
    fn test_train_from_keeps_existing_entries() {
        let mut seeded = QTable::new();
        seeded.set(State::played(D, C), C, 7.0);

        let config = config(10).with_epsilon(0.0);
        let mut trainer = Trainer::new(config, Strategy::AlwaysDefect).unwrap();
        let table = trainer.train_from(seeded).unwrap();

        // The opponent never cooperates, so D/C is never visited or updated
        assert_eq!(table.get(&State::played(D, C)).map(|v| v.get(C)), Some(7.0));
    }

    struct Recorder {
        events: Arc<Mutex<Vec<String>>>,
    }

    impl Observer for Recorder {
        fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
            self.events
                .lock()
                .unwrap()
                .push(format!("start {total_episodes}"));
            Ok(())
        }

        fn on_round(&mut self, round: &RoundObservation) -> Result<()> {
            if round.round == 0 {
                assert_eq!(round.state, State::Start);
            }
            Ok(())
        }

        fn on_episode_end(&mut self, episode: usize, total_reward: f64) -> Result<()> {
            self.events
                .lock()
                .unwrap()
                .push(format!("episode {episode} {total_reward}"));
            Ok(())
        }

        fn on_training_end(&mut self) -> Result<()> {
            self.events.lock().unwrap().push("end".to_string());
            Ok(())
        }
    }

    #[test]
    fn test_observer_event_sequence() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let recorder = Recorder {
            events: Arc::clone(&events),
        };
        let config = config(2).with_epsilon(0.0);
        let mut trainer = Trainer::new(config, Strategy::AlwaysDefect)
            .unwrap()
            .with_observer(Box::new(recorder));
        trainer.train().unwrap();

        let events = events.lock().unwrap();
        assert_eq!(events.first().map(String::as_str), Some("start 2"));
        assert_eq!(events.last().map(String::as_str), Some("end"));
        assert_eq!(events.len(), 4);
    }
}
