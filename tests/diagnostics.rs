// tests/diagnostics.rs
use lambda_game::systems::diagnostics::{cauchy_schwarz, diagnose};
use lambda_game::{GameConfig, GameEngine};
use proptest::prelude::*;

#[test]
fn empty_sequence_is_all_zeros() {
    let d = diagnose(&[]);
    assert_eq!(d.n, 0);
    assert_eq!(d.sum, 0.0);
    assert_eq!(d.mean, 0.0);
    assert_eq!(d.std_dev, 0.0);
    assert_eq!((d.min, d.max), (0.0, 0.0));
    assert!(d.cauchy_schwarz.satisfied);
}

#[test]
fn known_sequence_moments() {
    let d = diagnose(&[1.0, 2.0, 3.0, 4.0]);
    assert_eq!(d.n, 4);
    assert_eq!(d.sum, 10.0);
    assert_eq!(d.sum_sq, 30.0);
    assert_eq!(d.mean, 2.5);
    assert!((d.std_dev - 1.25f64.sqrt()).abs() < 1e-12, "population std = {}", d.std_dev);
    assert_eq!((d.min, d.max), (1.0, 4.0));
    assert_eq!(d.cauchy_schwarz.lhs, 100.0);
    assert_eq!(d.cauchy_schwarz.rhs, 120.0);
}

#[test]
fn constant_sequence_is_the_equality_case() {
    let cs = cauchy_schwarz(&[0.3; 12]);
    assert!(cs.satisfied);
    assert!((cs.ratio - 1.0).abs() < 1e-9, "ratio = {}", cs.ratio);
}

#[test]
fn long_constant_sequences_stay_satisfied() {
    // Rounding can leave lhs a hair above rhs in the equality case.
    for x in [0.3, 1.7, 0.7071] {
        let cs = cauchy_schwarz(&[x; 999]);
        assert!(cs.satisfied, "x={x}: lhs={} rhs={}", cs.lhs, cs.rhs);
        assert!((cs.ratio - 1.0).abs() < 1e-9);
    }
}

#[test]
fn game_sequences_satisfy_cauchy_schwarz() {
    for lambda in [0.5, 0.65, 0.75, 0.9, 1.2] {
        let r = GameEngine::for_lambda(lambda, GameConfig::default()).run();
        let d = diagnose(&r.moves);
        assert!(d.cauchy_schwarz.satisfied, "λ={lambda}: {:?}", d.cauchy_schwarz);
        assert!(d.cauchy_schwarz.ratio <= 1.0 + 1e-9);
        assert_eq!(d.n, r.moves.len());
    }
}

proptest! {
    #[test]
    fn cauchy_schwarz_holds(xs in prop::collection::vec(0.0f64..10.0, 1..1000)) {
        let cs = cauchy_schwarz(&xs);
        prop_assert!(cs.satisfied, "lhs={} rhs={}", cs.lhs, cs.rhs);
        prop_assert!(cs.ratio <= 1.0 + 1e-9);
    }

    #[test]
    fn cauchy_schwarz_holds_near_equality(
        x in 0.0f64..10.0,
        len in 1usize..1000,
        jitter in prop::collection::vec(-1e-9f64..1e-9, 1000),
    ) {
        let xs: Vec<f64> = (0..len).map(|i| (x + jitter[i]).max(0.0)).collect();
        let cs = cauchy_schwarz(&xs);
        prop_assert!(cs.satisfied, "lhs={} rhs={}", cs.lhs, cs.rhs);
    }

    #[test]
    fn std_dev_is_never_negative(xs in prop::collection::vec(0.0f64..2.0, 0..200)) {
        let d = diagnose(&xs);
        prop_assert!(d.std_dev >= 0.0);
        prop_assert!(d.min <= d.max);
    }
}
