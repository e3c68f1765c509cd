//! Ports (trait boundaries) for external collaborators.
//!
//! The solvers own the game model and their tables; everything that talks to
//! the outside world (players querying a policy, storage, progress display)
//! goes through one of these traits and is implemented in `adapters` or
//! `observers`.

pub mod observer;
pub mod store;
pub mod strategy;

pub use observer::TrainingObserver;
pub use store::PolicyStore;
pub use strategy::Strategy;
