// tests/params.rs
use lambda_game::{LAMBDA_CRITICAL, ParameterConfig, Prediction, Status, Winner};
use proptest::prelude::*;

/* ──────────────────────────────────────────────────────────────────────────
1) Regime classification
────────────────────────────────────────────────────────────────────────── */

#[test]
fn critical_value_is_near_with_strike_fifty() {
    let c = ParameterConfig::new(LAMBDA_CRITICAL);
    assert!(c.near_critical());
    assert!(!c.above_critical() && !c.below_critical());
    assert_eq!(c.strike_round(), Some(50));
    assert_eq!(c.alice_aggression(), 0.7);
    assert_eq!(c.bazza_aggression(), 0.7);
    assert_eq!(c.status(), Status::Balance);
    assert_eq!(c.predicted_winner(), Prediction::Balance);
}

#[test]
fn below_critical_has_no_strike_phase() {
    let c = ParameterConfig::new(0.65);
    assert!(c.below_critical());
    assert!(c.delta() < 0.0);
    assert_eq!(c.strike_round(), None);
    assert_eq!(c.status().as_str(), "bazza");
    assert_eq!(c.predicted_winner().to_string(), "Bazza");
}

#[test]
fn above_critical_strike_round_is_clamped() {
    // δ ≈ 0.043 → 1/(2δ²) ≈ 272 → 50
    assert_eq!(ParameterConfig::new(0.75).strike_round(), Some(50));
    // δ ≈ 0.79 → < 1 → 10
    assert_eq!(ParameterConfig::new(1.5).strike_round(), Some(10));
    // δ ≈ 0.193 → 13.4 → 14
    assert_eq!(ParameterConfig::new(0.9).strike_round(), Some(14));
    assert_eq!(ParameterConfig::new(0.9).status().as_str(), "alice");
}

/* ──────────────────────────────────────────────────────────────────────────
2) Derived parameters
────────────────────────────────────────────────────────────────────────── */

#[test]
fn aggression_moves_linearly_then_saturates() {
    let a = ParameterConfig::new(0.75);
    let b = ParameterConfig::new(0.76);
    assert!(b.alice_aggression() > a.alice_aggression());
    assert!(b.bazza_aggression() < a.bazza_aggression());
    let slope = (b.alice_aggression() - a.alice_aggression()) / (b.lambda() - a.lambda());
    assert!((slope - 5.0).abs() < 1e-9, "slope = {slope}");

    let far_above = ParameterConfig::new(1.5);
    assert_eq!(far_above.alice_aggression(), 0.99);
    assert_eq!(far_above.bazza_aggression(), 0.2);
    let far_below = ParameterConfig::new(0.3);
    assert_eq!(far_below.alice_aggression(), 0.2);
    assert_eq!(far_below.bazza_aggression(), 0.99);
}

#[test]
fn reserve_threshold_floors_at_a_tenth() {
    let near = ParameterConfig::new(LAMBDA_CRITICAL + 0.001);
    assert!((near.reserve_threshold() - 0.499).abs() < 1e-9);
    assert_eq!(ParameterConfig::new(1.5).reserve_threshold(), 0.1);
    assert_eq!(ParameterConfig::new(0.8).linear_multiplier(), 0.8);
}

#[test]
fn prediction_matches_draw_only_when_balanced() {
    assert!(Prediction::Balance.matches(Winner::Draw));
    assert!(!Prediction::Balance.matches(Winner::Alice));
    assert!(Prediction::Alice.matches(Winner::Alice));
    assert!(!Prediction::Alice.matches(Winner::Draw));
    assert!(!Prediction::Bazza.matches(Winner::Alice));
}

proptest! {
    #[test]
    fn regimes_are_exclusive_and_exhaustive(lambda in -5.0f64..5.0) {
        let c = ParameterConfig::new(lambda);
        let flags = [c.above_critical(), c.below_critical(), c.near_critical()];
        prop_assert_eq!(flags.iter().filter(|&&f| f).count(), 1, "λ={}", lambda);
        if c.above_critical() {
            prop_assert!(c.delta() > 0.0);
        }
        if c.below_critical() {
            prop_assert!(c.delta() < 0.0);
        }
    }

    #[test]
    fn strike_round_stays_in_band(lambda in 0.3f64..1.5) {
        let c = ParameterConfig::new(lambda);
        match c.strike_round() {
            None => prop_assert!(c.below_critical()),
            Some(s) => prop_assert!((10..=50).contains(&s), "s={}", s),
        }
        prop_assert!((0.2..=0.99).contains(&c.alice_aggression()));
        prop_assert!((0.2..=0.99).contains(&c.bazza_aggression()));
    }
}
