//! Save/load round trips through both policy stores

use std::path::Path;

use noughts::{
    Error,
    adapters::{InMemoryPolicyStore, MsgPackPolicyStore},
    monte_carlo::{MonteCarloConfig, MonteCarloController},
    persistence::{Method, SavedPolicy},
    ports::PolicyStore,
    tables::Policy,
    training::OpponentPolicy,
    value_iteration::{PolicyIterationSolver, ValueIterationConfig, ValueIterationSolver},
};
use tempfile::TempDir;

fn assert_same_policy(original: &Policy, loaded: &Policy) {
    assert_eq!(original.len(), loaded.len());
    for (state, action) in original.iter() {
        assert_eq!(loaded.get(state), Some(*action), "{state:?}");
    }
}

#[test]
fn test_value_iteration_policy_roundtrip_on_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("policies").join("value_iteration.msgpack");
    let saved = ValueIterationSolver::new(ValueIterationConfig::default())
        .unwrap()
        .solve()
        .unwrap()
        .into_saved(Method::ValueIteration);

    let store = MsgPackPolicyStore::new();
    store.save(&saved, &path).unwrap();
    let loaded = store.load(&path).unwrap();

    assert_same_policy(&saved.policy, &loaded.policy);
    assert_eq!(loaded.values, saved.values);
    assert_eq!(loaded.method, Method::ValueIteration);
    assert_eq!(loaded.metadata.converged, Some(true));
}

#[test]
fn test_policy_iteration_roundtrip_in_memory() {
    let saved = PolicyIterationSolver::new(ValueIterationConfig::default())
        .unwrap()
        .solve()
        .unwrap()
        .into_saved(Method::PolicyIteration);

    let store = InMemoryPolicyStore::new();
    store.save(&saved, Path::new("pi")).unwrap();
    assert_eq!(store.load(Path::new("pi")).unwrap(), saved);
}

#[test]
fn test_monte_carlo_roundtrip_keeps_q_tables() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("mc.msgpack");
    let config = MonteCarloConfig::default().with_episodes(200).with_seed(1);
    let learned = MonteCarloController::new(config, OpponentPolicy::new(Policy::new(), "random"))
        .unwrap()
        .train()
        .unwrap();
    let saved = learned.into_saved(Some("random".to_string()));

    let store = MsgPackPolicyStore::new();
    store.save(&saved, &path).unwrap();
    let loaded = store.load(&path).unwrap();

    assert_same_policy(&saved.policy, &loaded.policy);
    assert_eq!(loaded.q_values, saved.q_values);
    assert_eq!(loaded.metadata.episodes, Some(200));
    assert_eq!(loaded.metadata.seed, Some(1));
    assert_eq!(loaded.metadata.opponent.as_deref(), Some("random"));
}

#[test]
fn test_saved_policy_can_be_an_opponent() {
    let store = InMemoryPolicyStore::new();
    let saved = SavedPolicy::new(Method::ValueIteration, Policy::new());
    store.save(&saved, Path::new("empty")).unwrap();

    let opponent = OpponentPolicy::load(&store, Path::new("empty")).unwrap();
    assert!(opponent.policy().is_empty());
}

#[test]
fn test_corrupt_file_is_a_serialization_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("corrupt.msgpack");
    std::fs::write(&path, b"definitely not msgpack").unwrap();

    let err = MsgPackPolicyStore::new().load(&path).unwrap_err();
    assert!(matches!(err, Error::SerializationContext { .. }));
}
