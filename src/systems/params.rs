//! Per-λ strategy parameters.
//!
//! Everything here is derived from λ alone, once, and never changes after.

use std::fmt;

#[cfg(feature = "export")]
use serde::{Deserialize, Serialize};

use crate::LAMBDA_CRITICAL;
use crate::systems::sdk::Winner;

/// Half-width of the band around λ* treated as "near critical".
pub const NEAR_BAND: f64 = 0.005;
/// Aggression response per unit of δ = λ − λ*.
pub const AGGRESSION_SLOPE: f64 = 5.0;
pub const AGGRESSION_NEUTRAL: f64 = 0.7;
pub const AGGRESSION_MIN: f64 = 0.2;
pub const AGGRESSION_MAX: f64 = 0.99;
pub const STRIKE_MIN: u32 = 10;
pub const STRIKE_MAX: u32 = 50;

/// Which side of λ* a configuration sits on (lower-case tags).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "export", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "export", serde(rename_all = "lowercase"))]
pub enum Status {
    Alice,
    Bazza,
    Balance,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Alice => "alice",
            Status::Bazza => "bazza",
            Status::Balance => "balance",
        }
    }
}

/// The winner theory predicts for a λ.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "export", derive(Serialize, Deserialize))]
pub enum Prediction {
    Alice,
    Bazza,
    Balance,
}

impl Prediction {
    /// True when `winner` agrees with the prediction; a balanced prediction
    /// is matched by a draw.
    pub fn matches(self, winner: Winner) -> bool {
        matches!(
            (self, winner),
            (Prediction::Alice, Winner::Alice)
                | (Prediction::Bazza, Winner::Bazza)
                | (Prediction::Balance, Winner::Draw)
        )
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Prediction::Alice => "Alice",
            Prediction::Bazza => "Bazza",
            Prediction::Balance => "Balance",
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "export", derive(Serialize))]
pub struct ParameterConfig {
    lambda_value: f64,
    delta_from_critical: f64,
    above_critical: bool,
    below_critical: bool,
    near_critical: bool,
    strike_round: Option<u32>,
    alice_aggression: f64,
    bazza_aggression: f64,
    reserve_threshold: f64,
    linear_multiplier: f64,
}

impl ParameterConfig {
    /// Any finite λ is accepted; nothing is clamped.
    pub fn new(lambda_value: f64) -> Self {
        let delta = lambda_value - LAMBDA_CRITICAL;
        let near_critical = delta.abs() < NEAR_BAND;
        let above_critical = !near_critical && delta > 0.0;
        let below_critical = !near_critical && !above_critical;

        let strike_round = if below_critical {
            None
        } else if near_critical {
            Some(STRIKE_MAX)
        } else {
            let raw = (1.0 / (2.0 * delta * delta)).ceil();
            Some(raw.clamp(STRIKE_MIN as f64, STRIKE_MAX as f64) as u32)
        };

        let (alice_aggression, bazza_aggression) = if near_critical {
            (AGGRESSION_NEUTRAL, AGGRESSION_NEUTRAL)
        } else {
            (
                (AGGRESSION_NEUTRAL + AGGRESSION_SLOPE * delta).clamp(AGGRESSION_MIN, AGGRESSION_MAX),
                (AGGRESSION_NEUTRAL - AGGRESSION_SLOPE * delta).clamp(AGGRESSION_MIN, AGGRESSION_MAX),
            )
        };

        Self {
            lambda_value,
            delta_from_critical: delta,
            above_critical,
            below_critical,
            near_critical,
            strike_round,
            alice_aggression,
            bazza_aggression,
            reserve_threshold: (0.5 - delta.abs()).max(0.1),
            linear_multiplier: lambda_value,
        }
    }

    #[inline]
    pub fn lambda(&self) -> f64 {
        self.lambda_value
    }
    #[inline]
    pub fn delta(&self) -> f64 {
        self.delta_from_critical
    }
    #[inline]
    pub fn above_critical(&self) -> bool {
        self.above_critical
    }
    #[inline]
    pub fn below_critical(&self) -> bool {
        self.below_critical
    }
    #[inline]
    pub fn near_critical(&self) -> bool {
        self.near_critical
    }
    /// `None` below critical: there is no strike phase.
    #[inline]
    pub fn strike_round(&self) -> Option<u32> {
        self.strike_round
    }
    #[inline]
    pub fn alice_aggression(&self) -> f64 {
        self.alice_aggression
    }
    #[inline]
    pub fn bazza_aggression(&self) -> f64 {
        self.bazza_aggression
    }
    #[inline]
    pub fn reserve_threshold(&self) -> f64 {
        self.reserve_threshold
    }
    #[inline]
    pub fn linear_multiplier(&self) -> f64 {
        self.linear_multiplier
    }

    pub fn status(&self) -> Status {
        if self.above_critical {
            Status::Alice
        } else if self.below_critical {
            Status::Bazza
        } else {
            Status::Balance
        }
    }

    pub fn predicted_winner(&self) -> Prediction {
        match self.status() {
            Status::Alice => Prediction::Alice,
            Status::Bazza => Prediction::Bazza,
            Status::Balance => Prediction::Balance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strike_round_tracks_inverse_square_distance() {
        // δ = 0.25 → 1/(2·0.0625) = 8 → clamped up to 10.
        let c = ParameterConfig::new(LAMBDA_CRITICAL + 0.25);
        assert_eq!(c.strike_round(), Some(10));
        // δ = 0.2 → 12.5 → 13.
        let c = ParameterConfig::new(LAMBDA_CRITICAL + 0.2);
        assert_eq!(c.strike_round(), Some(13));
        // δ = 0.1 → 50 exactly.
        let c = ParameterConfig::new(LAMBDA_CRITICAL + 0.1);
        assert_eq!(c.strike_round(), Some(50));
    }

    #[test]
    fn band_edges() {
        let inside = ParameterConfig::new(LAMBDA_CRITICAL + 0.004);
        assert!(inside.near_critical());
        let outside = ParameterConfig::new(LAMBDA_CRITICAL - 0.006);
        assert!(outside.below_critical() && outside.strike_round().is_none());
    }
}
