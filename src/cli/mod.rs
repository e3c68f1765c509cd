//! CLI infrastructure for the noughts policy toolkit
//!
//! This module provides the command-line interface for solving, training,
//! evaluating and querying tic-tac-toe policies.

pub mod commands;
pub mod config;
pub mod output;

/// Where `solve` writes and the learners look for their opponent by default
pub const DEFAULT_DP_POLICY: &str = "policies/value_iteration.msgpack";
