//! Per-role Q-tables

use serde::{Deserialize, Serialize};

use super::{Policy, QTable};
use crate::tictactoe::Player;

/// Independent Q-tables for the learner playing X and playing O.
///
/// The two roles decide in disjoint sets of states (X only moves on boards
/// with equal piece counts), so their greedy policies merge without conflict.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoleTables {
    pub x: QTable,
    pub o: QTable,
}

impl RoleTables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, role: Player) -> &QTable {
        match role {
            Player::X => &self.x,
            Player::O => &self.o,
        }
    }

    pub fn get_mut(&mut self, role: Player) -> &mut QTable {
        match role {
            Player::X => &mut self.x,
            Player::O => &mut self.o,
        }
    }

    /// Greedy policy covering every state either role visited
    pub fn greedy_policy(&self) -> Policy {
        let mut policy = Policy::greedy(&self.x);
        policy.extend(Policy::greedy(&self.o));
        policy
    }
}
