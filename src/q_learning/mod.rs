//! Q-learning (off-policy temporal-difference control)
//!
//! The learner updates `Q` immediately after each of its moves instead of
//! waiting for the game to end:
//!
//! ```text
//! Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)]
//! ```
//!
//! `s'` is the learner's next decision state (after the opponent's reply) and
//! the maximum reads the learner's own table. Actions are chosen ε-greedily,
//! but the target always bootstraps off the greedy value.
//!
//! ## Usage Example
//!
//! ```no_run
//! use noughts::{
//!     q_learning::{TemporalDifferenceConfig, TemporalDifferenceLearner},
//!     tables::Policy,
//!     training::OpponentPolicy,
//! };
//!
//! let opponent = OpponentPolicy::new(Policy::new(), "random");
//! let config = TemporalDifferenceConfig::default()
//!     .with_episodes(20_000)
//!     .with_alpha(0.2)
//!     .with_seed(3);
//!
//! let learned = TemporalDifferenceLearner::new(config, opponent)?.train()?;
//! # Ok::<(), noughts::Error>(())
//! ```

pub mod config;
pub mod learner;
pub mod update;

pub use config::TemporalDifferenceConfig;
pub use learner::TemporalDifferenceLearner;
pub use update::{q_learning_target, q_learning_update};
