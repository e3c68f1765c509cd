//! Value iteration and policy iteration against known game-theoretic facts

use noughts::{
    adapters::{PolicyAgent, RandomAgent},
    arena::{evaluate, play_match},
    observers::MetricsObserver,
    ports::Strategy,
    tictactoe::{Action, BoardState, GameOutcome, Player, RewardShaping},
    value_iteration::{
        DpSolution, PolicyIterationSolver, ValueIterationConfig, ValueIterationSolver,
    },
};

fn value_iteration(config: ValueIterationConfig) -> DpSolution {
    ValueIterationSolver::new(config)
        .expect("valid config")
        .solve()
        .expect("solve")
}

#[test]
fn test_value_iteration_is_deterministic() {
    let first = value_iteration(ValueIterationConfig::default());
    let second = value_iteration(ValueIterationConfig::default());
    assert_eq!(first.values, second.values);
    assert_eq!(first.policy, second.policy);
    assert_eq!(first.sweeps, second.sweeps);
}

#[test]
fn test_self_play_from_empty_board_is_a_draw() {
    let solution = value_iteration(ValueIterationConfig::default());
    let mut x = PolicyAgent::new("dp-x", solution.policy.clone()).with_seed(1);
    let mut o = PolicyAgent::new("dp-o", solution.policy).with_seed(2);

    let game = play_match(&mut x, &mut o).unwrap();
    assert_eq!(game.outcome, Some(GameOutcome::Draw));
    assert_eq!(game.moves.len(), 9);
}

#[test]
fn test_discounted_self_play_is_a_draw() {
    let solution = value_iteration(ValueIterationConfig::default().with_gamma(0.9));
    let mut state = BoardState::new();
    while !state.is_terminal() {
        let action = solution.policy.get(&state).expect("policy covers play");
        state = state.successor(action).unwrap();
    }
    assert_eq!(state.winner(), None);
}

#[test]
fn test_optimal_policy_never_loses_to_random() {
    let solution = value_iteration(ValueIterationConfig::default());
    let mut candidate = PolicyAgent::new("dp", solution.policy).with_seed(5);
    let mut opponent = RandomAgent::new(Some(6));

    for role in [Player::X, Player::O] {
        let result = evaluate(&mut candidate, &mut opponent, role, 200).unwrap();
        assert_eq!(result.losses, 0, "lost as {role}");
    }
}

#[test]
fn test_policy_covers_every_decision_state() {
    let solution = value_iteration(ValueIterationConfig::default());
    for (state, &action) in solution.policy.iter() {
        assert!(!state.is_terminal());
        assert!(state.is_empty(action));
    }
    let decision_states = noughts::tictactoe::enumerate_valid_states()
        .filter(|s| !s.is_terminal())
        .count();
    assert_eq!(solution.policy.len(), decision_states);
}

#[test]
fn test_policy_iteration_agrees_with_value_iteration() {
    let config = ValueIterationConfig::default();
    let vi = value_iteration(config);
    let pi = PolicyIterationSolver::new(config).unwrap().solve().unwrap();

    assert!(pi.converged);
    assert_eq!(pi.values.len(), vi.values.len());
    for (state, &value) in vi.values.iter() {
        assert!(
            (pi.values.get(state) - value).abs() < 1e-9,
            "{state:?}: vi {value} pi {}",
            pi.values.get(state)
        );
    }
}

#[test]
fn test_blocks_immediate_threat() {
    let solution = value_iteration(ValueIterationConfig::default());
    // O must block X's top row
    let state = BoardState::from_string("XX..O....").unwrap();
    assert_eq!(solution.policy.get(&state), Some(Action::new(0, 2).unwrap()));
}

#[test]
fn test_sweep_cap_is_not_fatal() {
    let solution = value_iteration(ValueIterationConfig::default().with_max_sweeps(3));
    assert!(!solution.converged);
    assert_eq!(solution.sweeps, 3);

    let mut agent = PolicyAgent::new("partial", solution.policy).with_seed(9);
    let state = BoardState::new();
    let action = agent.best_action(&state).unwrap();
    assert!(state.is_empty(action));
}

#[test]
fn test_observer_sees_every_sweep() {
    let solution = ValueIterationSolver::new(
        ValueIterationConfig::default().with_shaping(RewardShaping::threat_bonus()),
    )
    .unwrap()
    .with_observer(Box::new(MetricsObserver::new()))
    .solve()
    .unwrap();
    assert!(solution.converged);
    assert!(solution.final_delta < 1e-9);
}

#[test]
fn test_invalid_config_is_rejected() {
    let err = ValueIterationSolver::new(ValueIterationConfig::default().with_gamma(0.0))
        .err()
        .unwrap();
    assert!(matches!(err, noughts::Error::InvalidConfiguration { .. }));
}
