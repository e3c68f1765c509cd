//! Policy learning for Tic-Tac-Toe
//!
//! This crate provides:
//! - A complete Tic-Tac-Toe game model with legality checks, termination and rewards
//! - Exact dynamic programming (value iteration and policy iteration) over every valid board
//! - Off-policy Monte Carlo control with weighted importance sampling
//! - Q-learning (temporal-difference control) against a fixed opponent
//! - Versioned policy persistence and a `best_action` query for players and UIs

pub mod adapters;
pub mod arena;
pub mod cli;
pub mod error;
pub mod exploration;
pub mod monte_carlo;
pub mod observers;
pub mod persistence;
pub mod ports;
pub mod q_learning;
pub mod tables;
pub mod tictactoe;
pub mod training;
pub mod value_iteration;

pub use error::{Error, Result};
