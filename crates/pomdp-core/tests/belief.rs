use pomdp_core::{Belief, BeliefError};

#[test]
fn belief_accepts_normalized_vector() {
    let b = Belief::new(vec![0.25, 0.75]).expect("valid belief");
    assert_eq!(b.len(), 2);
    assert_eq!(b.get(1), Some(0.75));
    assert_eq!(b.dot(&[4.0, 8.0]), 7.0);
}

#[test]
fn belief_tolerates_small_rounding_error() {
    let third = 1.0 / 3.0;
    assert!(Belief::new(vec![third, third, third]).is_ok());
    assert!(Belief::new(vec![0.5 + 1e-9, 0.5]).is_ok());
}

#[test]
fn belief_rejects_bad_vectors_without_renormalizing() {
    assert_eq!(Belief::new(vec![]), Err(BeliefError::Empty));
    assert_eq!(
        Belief::new(vec![0.5, 0.75]),
        Err(BeliefError::NotNormalized { sum: 1.25 })
    );
    assert_eq!(
        Belief::new(vec![1.5, -0.5]),
        Err(BeliefError::Negative {
            state: 1,
            value: -0.5
        })
    );
    assert_eq!(
        Belief::new(vec![f64::NAN, 1.0]),
        Err(BeliefError::NonFinite { state: 0 })
    );
}

#[test]
fn belief_custom_tolerance_is_respected() {
    assert!(Belief::new(vec![0.5, 0.49]).is_err());
    assert!(Belief::with_tolerance(vec![0.5, 0.49], 0.05).is_ok());
}

#[test]
fn belief_rejects_unusable_tolerance() {
    for tolerance in [f64::NAN, -0.1, f64::INFINITY] {
        let result = Belief::with_tolerance(vec![5.0, 7.0], tolerance);
        assert!(
            matches!(result, Err(BeliefError::InvalidTolerance { .. })),
            "tolerance {tolerance} gave {result:?}"
        );
    }
    assert_eq!(
        Belief::with_tolerance(vec![0.5, 0.5], -0.1),
        Err(BeliefError::InvalidTolerance { tolerance: -0.1 })
    );
    assert!(Belief::with_tolerance(vec![0.5, 0.5], 0.0).is_ok());
}

#[test]
fn belief_helpers_build_valid_distributions() {
    let u = Belief::uniform(4).expect("uniform");
    assert!(u.as_slice().iter().all(|&p| p == 0.25));

    let p = Belief::point(3, 2).expect("point");
    assert_eq!(p.as_slice(), &[0.0, 0.0, 1.0]);

    assert_eq!(Belief::uniform(0), Err(BeliefError::Empty));
    assert_eq!(
        Belief::point(3, 3),
        Err(BeliefError::StateOutOfRange {
            state: 3,
            states: 3
        })
    );
}
