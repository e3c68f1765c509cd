//! Monte Carlo control loop

use std::path::Path;

use log::info;
use rand::rngs::StdRng;

use super::{MonteCarloConfig, Step, apply_weighted_returns};
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

/// Off-policy Monte Carlo controller.
///
/// Owns its tables for the duration of [`train`](Self::train); each call
/// starts from empty tables, so a controller can be re-run.
///
/// # Examples
///
/// ```no_run
/// use noughts::{
///     adapters::MsgPackPolicyStore,
///     monte_carlo::{MonteCarloConfig, MonteCarloController},
/// };
/// use std::path::Path;
///
/// let config = MonteCarloConfig::default().with_episodes(10_000).with_seed(7);
/// let mut controller =
///     MonteCarloController::from_store(config, &MsgPackPolicyStore, Path::new("policies/dp.msgpack"))?;
/// let learned = controller.train()?;
/// println!("{} states covered", learned.policy.len());
/// # Ok::<(), noughts::Error>(())
/// ```
pub struct MonteCarloController {
    config: MonteCarloConfig,
    opponent: OpponentPolicy,
    rng: StdRng,
    observers: Vec<Box<dyn TrainingObserver>>,
}

impl MonteCarloController {
    pub fn new(config: MonteCarloConfig, opponent: OpponentPolicy) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            opponent,
            rng: build_rng(config.seed),
            observers: Vec::new(),
        })
    }

    /// Build a controller whose opponent is loaded from `store`.
    ///
    /// Fails with [`crate::Error::MissingOpponentPolicy`] when `path` holds nothing.
    pub fn from_store<S: PolicyStore + ?Sized>(
        config: MonteCarloConfig,
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

    pub fn config(&self) -> &MonteCarloConfig {
        &self.config
    }

    pub fn opponent(&self) -> &OpponentPolicy {
        &self.opponent
    }

    /// Sample one episode for `role` with the current behavior policy.
    fn generate_episode(
        &mut self,
        role: Player,
        q: &QTable,
        behavior: &EpsilonGreedy,
    ) -> Result<(Vec<Step>, GameOutcome)> {
        let env = Environment::new(role, &self.opponent);
        let mut state = env.reset(&mut self.rng)?;
        let mut steps = Vec::with_capacity(5);

        while !state.is_terminal() {
            let actions = state.legal_actions();
            let Some((action, probability)) = behavior.sample(q, &state, &actions, &mut self.rng)
            else {
                break;
            };
            let transition = env.step(&state, action, &mut self.rng)?;
            steps.push(Step {
                state,
                action,
                reward: transition.reward,
                behavior_probability: probability,
            });
            state = transition.next;
        }

        let outcome = GameOutcome::of(&state).unwrap_or(GameOutcome::Draw);
        Ok((steps, outcome))
    }

    /// Train both roles and derive the greedy policy.
    pub fn train(&mut self) -> Result<LearnedPolicy> {
        let MonteCarloConfig {
            episodes,
            x_share,
            gamma,
            exploration,
            seed,
        } = self.config;

        info!("Monte Carlo control: {episodes} episodes against {}", self.opponent.source());

        let mut tables = RoleTables::new();
        let mut roles = Vec::with_capacity(2);

        for (role, role_episodes) in role_split(episodes, x_share) {
            let mut behavior = EpsilonGreedy::new(exploration);
            let mut weights = QTable::new();
            let mut q = QTable::new();
            let mut report = RoleReport::new(role);

            let phase = format!("monte carlo ({role})");
            for observer in &mut self.observers {
                observer.on_training_start(&phase, role_episodes)?;
            }

            for episode in 1..=role_episodes {
                let (steps, outcome) = self.generate_episode(role, &q, &behavior)?;
                apply_weighted_returns(&steps, gamma, &mut q, &mut weights);
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
        info!("Monte Carlo control finished; policy covers {} states", policy.len());

        Ok(LearnedPolicy {
            report: TrainingReport {
                method: Method::MonteCarlo,
                roles,
                states_covered: policy.len(),
                seed,
            },
            policy,
            tables,
        })
    }
}
