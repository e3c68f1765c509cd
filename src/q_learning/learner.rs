//! Q-learning control loop

use std::path::Path;

use log::info;
use rand::rngs::StdRng;

use super::{TemporalDifferenceConfig, q_learning_target, q_learning_update};
use crate::{
    Result,
    exploration::EpsilonGreedy,
    persistence::Method,
    ports::{PolicyStore, TrainingObserver},
    tables::{QTable, RoleTables},
    tictactoe::{GameOutcome, Player},
    training::{
        Environment, LearnedPolicy, OpponentPolicy, RoleReport, TrainingReport, build_rng,
        role_split,
    },
};

/// Temporal-difference learner against a fixed opponent.
///
/// Each role gets its own Q-table and its own ε schedule.
pub struct TemporalDifferenceLearner {
    config: TemporalDifferenceConfig,
    opponent: OpponentPolicy,
    rng: StdRng,
    observers: Vec<Box<dyn TrainingObserver>>,
}

impl TemporalDifferenceLearner {
    pub fn new(config: TemporalDifferenceConfig, opponent: OpponentPolicy) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            opponent,
            rng: build_rng(config.seed),
            observers: Vec::new(),
        })
    }

    /// Build a learner whose opponent is loaded from `store`.
    ///
    /// Fails with [`crate::Error::MissingOpponentPolicy`] when `path` holds nothing.
    pub fn from_store<S: PolicyStore + ?Sized>(
        config: TemporalDifferenceConfig,
        store: &S,
        path: &Path,
    ) -> Result<Self> {
        let opponent = OpponentPolicy::load(store, path)?;
        Self::new(config, opponent)
    }

    pub fn with_observer(mut self, observer: Box<dyn TrainingObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn config(&self) -> &TemporalDifferenceConfig {
        &self.config
    }

    pub fn opponent(&self) -> &OpponentPolicy {
        &self.opponent
    }

    /// Play one episode for `role`, updating `q` after every learner move.
    fn run_episode(
        &mut self,
        role: Player,
        q: &mut QTable,
        behavior: &EpsilonGreedy,
    ) -> Result<GameOutcome> {
        let TemporalDifferenceConfig { alpha, gamma, .. } = self.config;
        let env = Environment::new(role, &self.opponent);
        let mut state = env.reset(&mut self.rng)?;

        while !state.is_terminal() {
            let actions = state.legal_actions();
            let Some((action, _)) = behavior.sample(q, &state, &actions, &mut self.rng) else {
                break;
            };
            let transition = env.step(&state, action, &mut self.rng)?;
            let target = q_learning_target(
                q,
                transition.reward,
                &transition.next,
                transition.done,
                gamma,
            );
            q_learning_update(q, state, action, target, alpha);
            state = transition.next;
        }

        Ok(GameOutcome::of(&state).unwrap_or(GameOutcome::Draw))
    }

    /// Train both roles and derive the greedy policy.
    pub fn train(&mut self) -> Result<LearnedPolicy> {
        let TemporalDifferenceConfig {
            episodes,
            x_share,
            exploration,
            seed,
            ..
        } = self.config;

        info!("Q-learning: {episodes} episodes against {}", self.opponent.source());

        let mut tables = RoleTables::new();
        let mut roles = Vec::with_capacity(2);

        for (role, role_episodes) in role_split(episodes, x_share) {
            let mut behavior = EpsilonGreedy::new(exploration);
            let mut q = QTable::new();
            let mut report = RoleReport::new(role);

            let phase = format!("q-learning ({role})");
            for observer in &mut self.observers {
                observer.on_training_start(&phase, role_episodes)?;
            }

            for episode in 1..=role_episodes {
                let outcome = self.run_episode(role, &mut q, &behavior)?;
                behavior.decay();
                report.record(outcome);

                for observer in &mut self.observers {
                    observer.on_episode_end(episode, outcome)?;
                }
            }

            for observer in &mut self.observers {
                observer.on_training_end()?;
            }
            report.final_epsilon = behavior.epsilon();
            info!(
                "learner as {role}: {} episodes, W/D/L {}/{}/{}, {} states visited",
                report.episodes,
                report.wins,
                report.draws,
                report.losses,
                q.size()
            );

            *tables.get_mut(role) = q;
            roles.push(report);
        }

        let policy = tables.greedy_policy();
        info!("Q-learning finished; policy covers {} states", policy.len());

        Ok(LearnedPolicy {
            report: TrainingReport {
                method: Method::TemporalDifference,
                roles,
                states_covered: policy.len(),
                seed,
            },
            policy,
            tables,
        })
    }
}
