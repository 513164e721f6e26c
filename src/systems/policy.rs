//! Move-selection policies.
//!
//! A policy sees the full history, the round and the acting player's
//! capacity, and returns a proposed move with a short rationale. The engine
//! validates the proposal; policies never check constraints themselves.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "export")]
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::mechanics::{aggregate, stats};
use crate::systems::params::ParameterConfig;
use crate::systems::sdk::Player;
use crate::{EPSILON, LAMBDA_CRITICAL};

/// Rounds the adaptive Alice spends watching before she plays.
pub const ADAPTIVE_OBSERVE_ROUNDS: u32 = 10;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "export", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "export", serde(rename_all = "lowercase"))]
pub enum Style {
    Conservative,
    Aggressive,
    Balanced,
    Adaptive,
    #[default]
    Optimal,
}

impl Style {
    pub const ALL: [Style; 5] = [
        Style::Conservative,
        Style::Aggressive,
        Style::Balanced,
        Style::Adaptive,
        Style::Optimal,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Style::Conservative => "conservative",
            Style::Aggressive => "aggressive",
            Style::Balanced => "balanced",
            Style::Adaptive => "adaptive",
            Style::Optimal => "optimal",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Style {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_ascii_lowercase();
        Style::ALL
            .into_iter()
            .find(|st| st.as_str() == tag)
            .ok_or_else(|| ConfigError::UnknownStyle(s.to_string()))
    }
}

/// A proposed move and why.
#[derive(Clone, Debug, PartialEq)]
pub struct Decision {
    pub value: f64,
    pub reason: String,
}

impl Decision {
    fn new(value: f64, reason: impl Into<String>) -> Self {
        Self { value: value.max(0.0), reason: reason.into() }
    }
}

/// What a policy may look at.
#[derive(Clone, Copy, Debug)]
pub struct PolicyContext<'a> {
    /// 1-based round being played.
    pub round: u32,
    /// Acting player's capacity before the move.
    pub capacity: f64,
    /// Shared committed sequence.
    pub moves: &'a [f64],
    pub alice_moves: &'a [f64],
    pub bazza_moves: &'a [f64],
    /// Σx² over `moves`.
    pub square_sum: f64,
    pub config: &'a ParameterConfig,
}

impl PolicyContext<'_> {
    /// √max(0, 2 − a²) for Alice's most recent move `a` (√2 before she has moved).
    #[inline]
    fn reply_max(&self) -> f64 {
        aggregate::quadratic_reply_max(self.alice_moves.last().copied().unwrap_or(0.0))
    }
}

/// Entry point: exhausted capacity forces 0, otherwise dispatch on style.
pub fn decide(player: Player, style: Style, ctx: &PolicyContext<'_>) -> Decision {
    if ctx.capacity <= EPSILON {
        return Decision::new(0.0, "capacity exhausted");
    }
    match player {
        Player::Alice => alice(style, ctx),
        Player::Bazza => bazza(style, ctx),
    }
}

fn alice(style: Style, ctx: &PolicyContext<'_>) -> Decision {
    let cap = ctx.capacity;
    match style {
        Style::Conservative => Decision::new(0.0, "conservative: hold at zero"),
        Style::Aggressive => Decision::new(
            (0.95 * cap).min(0.9 * std::f64::consts::SQRT_2),
            "aggressive: push toward the quadratic ceiling",
        ),
        Style::Balanced => Decision::new((0.3 * cap).min(0.7), "balanced: spend 30% of capacity"),
        Style::Adaptive => {
            if ctx.round <= ADAPTIVE_OBSERVE_ROUNDS {
                Decision::new(0.0, "adaptive: observing")
            } else {
                let avg = stats::mean(ctx.bazza_moves);
                Decision::new((0.6 * cap).min(avg + 0.1), format!("adaptive: track Bazza average {avg:.4}"))
            }
        }
        Style::Optimal => alice_optimal(ctx),
    }
}

fn alice_optimal(ctx: &PolicyContext<'_>) -> Decision {
    let c = ctx.config;
    let cap = ctx.capacity;

    if c.near_critical() {
        return Decision::new((cap * c.alice_aggression()).min(LAMBDA_CRITICAL), "balance: mirror λ*");
    }
    let Some(strike) = c.strike_round().filter(|_| c.above_critical()) else {
        return Decision::new(0.0, "below critical: conserve");
    };

    let n = ctx.round;
    if 2 * n + 1 < strike {
        return Decision::new(0.0, "reserve phase");
    }

    let remaining = (n + 1) as f64 - ctx.square_sum;
    if remaining <= 0.0 {
        return Decision::new(0.0, "Bazza budget already spent");
    }

    let target = (remaining + 0.5).sqrt();
    let x = (target * c.alice_aggression()).min(cap * c.alice_aggression());
    if x > c.reserve_threshold() {
        Decision::new(x, format!("strike: target {target:.4} vs Bazza headroom {remaining:.4}"))
    } else {
        Decision::new(0.0, "continue waiting")
    }
}

fn bazza(style: Style, ctx: &PolicyContext<'_>) -> Decision {
    let cap = ctx.capacity;
    let reply = ctx.reply_max();
    match style {
        Style::Conservative => Decision::new(0.0, "conservative: hold at zero"),
        Style::Aggressive => Decision::new((0.9 * cap).min(0.9 * reply), "aggressive: near-full reply"),
        Style::Balanced => Decision::new(0.7 * cap, "balanced: spend 70% of capacity"),
        Style::Adaptive => {
            if ctx.alice_moves.iter().any(|&x| x > 0.1) {
                Decision::new((0.9 * cap).min(0.9 * reply), "adaptive: Alice is active, press")
            } else {
                Decision::new((0.6 * cap).min(0.6 * reply), "adaptive: Alice is passive, pace")
            }
        }
        Style::Optimal => {
            let b = ctx.config.bazza_aggression();
            Decision::new((cap * b).min(reply * b), "maximize")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::SQRT_2;

    struct History<'a> {
        moves: &'a [f64],
        alice: &'a [f64],
        bazza: &'a [f64],
    }

    const EMPTY: History<'static> = History { moves: &[], alice: &[], bazza: &[] };

    fn propose(player: Player, style: Style, lambda: f64, round: u32, capacity: f64, h: &History<'_>) -> Decision {
        let config = ParameterConfig::new(lambda);
        let ctx = PolicyContext {
            round,
            capacity,
            moves: h.moves,
            alice_moves: h.alice,
            bazza_moves: h.bazza,
            square_sum: aggregate::power_sum(h.moves, 2),
            config: &config,
        };
        decide(player, style, &ctx)
    }

    fn assert_value(d: &Decision, expected: f64) {
        assert!((d.value - expected).abs() < 1e-12, "expected {expected}, got {d:?}");
    }

    #[test]
    fn exhausted_capacity_forces_zero_for_every_style() {
        for st in Style::ALL {
            for p in [Player::Alice, Player::Bazza] {
                let d = propose(p, st, 0.9, 3, 1e-12, &EMPTY);
                assert_eq!(d.value, 0.0);
                assert_eq!(d.reason, "capacity exhausted");
            }
        }
    }

    /* ── Alice ─────────────────────────────────────────────────────────── */

    #[test]
    fn alice_fixed_styles() {
        assert_value(&propose(Player::Alice, Style::Conservative, 0.9, 1, 1.0, &EMPTY), 0.0);
        assert_value(&propose(Player::Alice, Style::Aggressive, 0.9, 1, 1.0, &EMPTY), 0.95);
        assert_value(&propose(Player::Alice, Style::Aggressive, 0.9, 1, 2.0, &EMPTY), 0.9 * SQRT_2);
        assert_value(&propose(Player::Alice, Style::Balanced, 0.9, 1, 1.0, &EMPTY), 0.3);
        assert_value(&propose(Player::Alice, Style::Balanced, 0.9, 1, 5.0, &EMPTY), 0.7);
        assert_eq!(
            propose(Player::Alice, Style::Balanced, 0.9, 1, 1.0, &EMPTY).reason,
            "balanced: spend 30% of capacity"
        );
    }

    #[test]
    fn adaptive_alice_observes_ten_rounds() {
        let h = History { moves: &[], alice: &[], bazza: &[0.2, 0.4] };
        let d = propose(Player::Alice, Style::Adaptive, 0.9, 10, 1.0, &h);
        assert_value(&d, 0.0);
        assert_eq!(d.reason, "adaptive: observing");
        // Bazza averages 0.3, so the cap is 0.4 unless 0.6·capacity is lower.
        assert_value(&propose(Player::Alice, Style::Adaptive, 0.9, 11, 1.0, &h), 0.4);
        assert_value(&propose(Player::Alice, Style::Adaptive, 0.9, 11, 0.5, &h), 0.3);
    }

    #[test]
    fn optimal_alice_mirrors_critical_value_when_balanced() {
        let d = propose(Player::Alice, Style::Optimal, LAMBDA_CRITICAL, 1, 2.0, &EMPTY);
        assert_value(&d, LAMBDA_CRITICAL);
        assert_value(&propose(Player::Alice, Style::Optimal, LAMBDA_CRITICAL, 1, 0.5, &EMPTY), 0.35);
    }

    #[test]
    fn optimal_alice_conserves_below_critical() {
        let d = propose(Player::Alice, Style::Optimal, 0.65, 31, 10.0, &EMPTY);
        assert_value(&d, 0.0);
        assert_eq!(d.reason, "below critical: conserve");
    }

    #[test]
    fn optimal_alice_reserves_before_strike() {
        // λ = 0.75: strike round 50, so Alice holds while 2n+1 < 50.
        let d = propose(Player::Alice, Style::Optimal, 0.75, 23, 10.0, &EMPTY);
        assert_eq!(d.reason, "reserve phase");
        let d = propose(Player::Alice, Style::Optimal, 0.75, 25, 10.0, &EMPTY);
        assert!(d.value > 0.0, "expected a strike at round 25, got {d:?}");
    }

    #[test]
    fn optimal_alice_strike_branches() {
        // λ = 1.5: strike round 10, aggression 0.99, reserve threshold 0.1.
        let d = propose(Player::Alice, Style::Optimal, 1.5, 5, 10.0, &EMPTY);
        assert_value(&d, 6.5f64.sqrt() * 0.99);
        assert!(d.reason.starts_with("strike"), "{d:?}");

        let d = propose(Player::Alice, Style::Optimal, 1.5, 5, 0.05, &EMPTY);
        assert_value(&d, 0.0);
        assert_eq!(d.reason, "continue waiting");

        let spent = History { moves: &[3.0], alice: &[3.0], bazza: &[] };
        let d = propose(Player::Alice, Style::Optimal, 1.5, 5, 10.0, &spent);
        assert_value(&d, 0.0);
        assert_eq!(d.reason, "Bazza budget already spent");
    }

    /* ── Bazza ─────────────────────────────────────────────────────────── */

    #[test]
    fn bazza_fixed_styles() {
        let h = History { moves: &[1.0], alice: &[1.0], bazza: &[] };
        assert_value(&propose(Player::Bazza, Style::Conservative, 0.9, 2, 1.0, &h), 0.0);
        // reply ceiling √(2 − 1) = 1
        assert_value(&propose(Player::Bazza, Style::Aggressive, 0.9, 2, 2.0, &h), 0.9);
        assert_value(&propose(Player::Bazza, Style::Aggressive, 0.9, 2, 0.5, &h), 0.45);
        assert_value(&propose(Player::Bazza, Style::Balanced, 0.9, 2, 1.2, &h), 0.7 * 1.2);
    }

    #[test]
    fn adaptive_bazza_presses_once_alice_is_active() {
        let passive = History { moves: &[0.05, 0.0, 0.0], alice: &[0.05, 0.0], bazza: &[0.0] };
        let d = propose(Player::Bazza, Style::Adaptive, 0.9, 4, 1.0, &passive);
        assert_value(&d, 0.6);
        assert_value(&propose(Player::Bazza, Style::Adaptive, 0.9, 4, 5.0, &passive), 0.6 * SQRT_2);

        let active = History { moves: &[0.2, 0.0, 0.0], alice: &[0.2, 0.0], bazza: &[0.0] };
        assert_value(&propose(Player::Bazza, Style::Adaptive, 0.9, 4, 1.0, &active), 0.9);
        assert_value(&propose(Player::Bazza, Style::Adaptive, 0.9, 4, 5.0, &active), 0.9 * SQRT_2);
    }

    #[test]
    fn optimal_bazza_maximizes_with_aggression() {
        let d = propose(Player::Bazza, Style::Optimal, LAMBDA_CRITICAL, 2, 1.0, &EMPTY);
        assert_value(&d, 0.7);
        assert_eq!(d.reason, "maximize");
        assert_value(&propose(Player::Bazza, Style::Optimal, LAMBDA_CRITICAL, 2, 5.0, &EMPTY), 0.7 * SQRT_2);
    }

    #[test]
    fn style_tags_parse() {
        assert_eq!("Adaptive".parse::<Style>(), Ok(Style::Adaptive));
        assert!(matches!("timid".parse::<Style>(), Err(ConfigError::UnknownStyle(_))));
    }
}
