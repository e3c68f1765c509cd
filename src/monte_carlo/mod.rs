//! Off-policy Monte Carlo control with weighted importance sampling
//!
//! The learner samples complete games against a fixed opponent with an
//! ε-greedy behavior policy, then walks its own decisions backwards,
//! reweighting returns so that `Q` estimates the greedy target policy.

pub mod config;
pub mod controller;
pub mod episode;

pub use config::MonteCarloConfig;
pub use controller::MonteCarloController;
pub use episode::{Step, apply_weighted_returns};
