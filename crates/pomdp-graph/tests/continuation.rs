use pomdp_core::{Belief, PolicyError, SplitMix64};
use pomdp_graph::{ContinuationId, GraphPolicy, Node, PolicyCursor, PolicyGraph};

const LISTEN: usize = 2;

fn tiger() -> GraphPolicy {
    let levels = vec![
        vec![Node::terminal(vec![0.0, 0.0], LISTEN)],
        vec![
            Node::new(vec![10.0, -100.0], 0, vec![0, 0]),
            Node::new(vec![-100.0, 10.0], 1, vec![0, 0]),
            Node::new(vec![-1.0, -1.0], LISTEN, vec![0, 0]),
        ],
        vec![
            Node::new(vec![5.0, -5.0], LISTEN, vec![0, 2]),
            Node::new(vec![-5.0, 5.0], LISTEN, vec![2, 1]),
            Node::new(vec![8.0, -50.0], 0, vec![0, 0]),
        ],
    ];
    GraphPolicy::new(PolicyGraph::from_levels(2, 3, 2, levels).expect("graph"))
}

/// `top + 1` levels of two nodes each; observation `o` always continues to node `o`.
fn chain(top: usize) -> GraphPolicy {
    let mut levels = vec![vec![
        Node::terminal(vec![1.0, 0.0], 0),
        Node::terminal(vec![0.0, 1.0], 1),
    ]];
    for _ in 0..top {
        levels.push(vec![
            Node::new(vec![1.0, 0.0], 0, vec![0, 1]),
            Node::new(vec![0.0, 1.0], 1, vec![0, 1]),
        ]);
    }
    GraphPolicy::new(PolicyGraph::from_levels(2, 2, 2, levels).expect("graph"))
}

#[test]
fn continuation_follows_the_stored_table() {
    let policy = tiger();
    let b = Belief::new(vec![0.6, 0.4]).expect("belief");
    let mut rng = SplitMix64::new(3);

    let first = policy.sample_action_at(&b, 2, &mut rng).expect("sample");
    assert_eq!(first.action, LISTEN);
    assert_eq!(first.continuation, ContinuationId::new(2, 0));

    for (observation, expected) in [(0, 0usize), (1, 2usize)] {
        let next = policy
            .sample_continuation(first.continuation, observation, 1, &mut rng)
            .expect("continuation");
        let stored = policy.graph().node(1, expected).expect("node");
        assert_eq!(next.continuation, ContinuationId::new(1, expected));
        assert_eq!(
            pomdp_graph::NodeAction::Act(next.action),
            stored.action,
            "observation {observation}"
        );
    }
}

#[test]
fn continuation_reaches_level_zero() {
    let policy = tiger();
    let mut rng = SplitMix64::new(0);

    let next = policy
        .sample_continuation(ContinuationId::new(1, 1), 0, 0, &mut rng)
        .expect("continuation");
    assert_eq!(next.action, LISTEN);
    assert_eq!(next.continuation, ContinuationId::new(0, 0));
}

#[test]
fn non_adjacent_horizon_is_an_invalid_continuation() {
    let policy = chain(6);
    let b = Belief::new(vec![0.0, 1.0]).expect("belief");
    let mut rng = SplitMix64::new(8);

    let first = policy.sample_action_at(&b, 5, &mut rng).expect("sample");
    assert_eq!(first.continuation, ContinuationId::new(5, 1));

    assert_eq!(
        policy.sample_continuation(first.continuation, 0, 1, &mut rng),
        Err(PolicyError::InvalidContinuation {
            level: 5,
            node: 1,
            horizon: 1
        })
    );
    // Reusing a handle at its own horizon is just as wrong.
    assert!(matches!(
        policy.sample_continuation(first.continuation, 0, 5, &mut rng),
        Err(PolicyError::InvalidContinuation { .. })
    ));
    assert!(policy
        .sample_continuation(first.continuation, 0, 4, &mut rng)
        .is_ok());
}

#[test]
fn out_of_range_node_is_an_invalid_continuation() {
    let policy = chain(2);
    let mut rng = SplitMix64::new(8);

    assert_eq!(
        policy.sample_continuation(ContinuationId::new(2, 7), 0, 1, &mut rng),
        Err(PolicyError::InvalidContinuation {
            level: 2,
            node: 7,
            horizon: 1
        })
    );
    assert!(matches!(
        policy.sample_continuation(ContinuationId::new(9, 0), 0, 8, &mut rng),
        Err(PolicyError::InvalidContinuation { .. })
    ));
    assert!(matches!(
        policy.sample_continuation(ContinuationId::new(0, 0), 0, usize::MAX, &mut rng),
        Err(PolicyError::InvalidContinuation { .. })
    ));
}

#[test]
fn out_of_range_observation_is_reported() {
    let policy = chain(2);
    let mut rng = SplitMix64::new(8);

    assert_eq!(
        policy.sample_continuation(ContinuationId::new(2, 0), 2, 1, &mut rng),
        Err(PolicyError::ObservationOutOfRange {
            observation: 2,
            observations: 2
        })
    );
}

#[test]
fn cursor_walks_an_episode_down_to_level_zero() {
    let policy = chain(3);
    let b = Belief::new(vec![1.0, 0.0]).expect("belief");
    let mut rng = SplitMix64::new(21);

    let mut cursor = PolicyCursor::start(&policy, &b, 3, &mut rng).expect("start");
    assert_eq!(cursor.action(), 0);
    assert!(cursor.can_continue());

    // Observation o selects node o, whose action is o.
    for (observation, horizon) in [(1, 2), (0, 1), (1, 0)] {
        let action = cursor.step(observation, &mut rng).expect("step");
        assert_eq!(action, observation);
        assert_eq!(cursor.horizon(), horizon);
        assert_eq!(cursor.current().continuation.level(), horizon);
    }

    assert!(!cursor.can_continue());
    assert!(matches!(
        cursor.step(0, &mut rng),
        Err(PolicyError::InvalidContinuation { .. })
    ));
}

#[test]
fn cursor_started_past_the_top_needs_a_rescore() {
    let policy = chain(2);
    let b = Belief::new(vec![0.0, 1.0]).expect("belief");
    let mut rng = SplitMix64::new(4);

    let mut cursor = PolicyCursor::start(&policy, &b, 4, &mut rng).expect("start");
    assert_eq!(cursor.current().continuation.level(), 2);
    assert!(!cursor.can_continue());
    assert!(cursor.step(0, &mut rng).is_err());
    // A failed step leaves the cursor untouched.
    assert_eq!(cursor.horizon(), 4);

    let a = Belief::new(vec![1.0, 0.0]).expect("belief");
    assert_eq!(cursor.rescore(&a, &mut rng), Ok(0));
}
