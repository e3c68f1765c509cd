//! Adapters implementing domain ports.
//!
//! This module contains infrastructure implementations of the traits defined
//! in the ports module. Following hexagonal architecture, adapters depend on
//! domain ports, not the other way around.

pub mod agents;
pub mod in_memory_store;
pub mod msgpack_store;

pub use agents::{PolicyAgent, RandomAgent};
pub use in_memory_store::InMemoryPolicyStore;
pub use msgpack_store::MsgPackPolicyStore;
