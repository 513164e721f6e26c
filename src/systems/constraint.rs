//! Constraint variants, limits, capacities and validity checks.
//!
//! Alice answers to a linear-family constraint, Bazza to a quadratic-family
//! one. Each aggregate runs over the full shared move sequence; see
//! [`crate::mechanics::aggregate`] for the weighting convention.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "export")]
use serde::{Deserialize, Serialize};

use crate::EPSILON;
use crate::error::ConfigError;
use crate::mechanics::aggregate;
use crate::systems::params::ParameterConfig;
use crate::systems::sdk::Player;

const ALICE_WEIGHT: f64 = 0.1;
const BAZZA_WEIGHT: f64 = 0.05;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "export", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "export", serde(rename_all = "lowercase"))]
pub enum AliceConstraint {
    /// Σx ≤ λn
    #[default]
    Standard,
    /// Σx³ ≤ λn
    Cubic,
    /// Σ(1 + 0.1·i)x ≤ 1.5·λn
    Weighted,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "export", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "export", serde(rename_all = "lowercase"))]
pub enum BazzaConstraint {
    /// Σx² ≤ n
    #[default]
    Standard,
    /// Σx⁴ ≤ n²
    Quartic,
    /// Σ(1 + 0.05·i)x² ≤ 1.2·n
    Weighted,
}

impl AliceConstraint {
    pub const ALL: [AliceConstraint; 3] =
        [AliceConstraint::Standard, AliceConstraint::Cubic, AliceConstraint::Weighted];

    pub fn as_str(self) -> &'static str {
        match self {
            AliceConstraint::Standard => "standard",
            AliceConstraint::Cubic => "cubic",
            AliceConstraint::Weighted => "weighted",
        }
    }
}

impl BazzaConstraint {
    pub const ALL: [BazzaConstraint; 3] =
        [BazzaConstraint::Standard, BazzaConstraint::Quartic, BazzaConstraint::Weighted];

    pub fn as_str(self) -> &'static str {
        match self {
            BazzaConstraint::Standard => "standard",
            BazzaConstraint::Quartic => "quartic",
            BazzaConstraint::Weighted => "weighted",
        }
    }
}

impl fmt::Display for AliceConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl fmt::Display for BazzaConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for AliceConstraint {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(AliceConstraint::Standard),
            "cubic" => Ok(AliceConstraint::Cubic),
            "weighted" => Ok(AliceConstraint::Weighted),
            "quartic" => Err(ConfigError::VariantNotAllowed { player: Player::Alice, tag: s.to_string() }),
            _ => Err(ConfigError::UnknownConstraint { player: Player::Alice, tag: s.to_string() }),
        }
    }
}

impl FromStr for BazzaConstraint {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(BazzaConstraint::Standard),
            "quartic" => Ok(BazzaConstraint::Quartic),
            "weighted" => Ok(BazzaConstraint::Weighted),
            "cubic" => Err(ConfigError::VariantNotAllowed { player: Player::Bazza, tag: s.to_string() }),
            _ => Err(ConfigError::UnknownConstraint { player: Player::Bazza, tag: s.to_string() }),
        }
    }
}

/// Running totals of every constraint aggregate over the shared sequence.
///
/// `push` extends the totals by one move in O(1); the fold order matches the
/// slice aggregates in [`crate::mechanics::aggregate`], so both agree exactly.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "export", derive(Serialize, Deserialize))]
pub struct Aggregates {
    pub len: usize,
    pub linear: f64,
    pub square: f64,
    pub cube: f64,
    pub quartic: f64,
    pub alice_weighted: f64,
    pub bazza_weighted: f64,
}

impl Aggregates {
    pub fn from_moves(moves: &[f64]) -> Self {
        moves.iter().fold(Self::default(), |acc, &x| acc.push(x))
    }

    /// Totals after appending `x` at global index `self.len`.
    #[inline]
    pub fn push(self, x: f64) -> Self {
        let turn = aggregate::own_turn(self.len) as f64;
        Self {
            len: self.len + 1,
            linear: self.linear + x,
            square: self.square + x.powi(2),
            cube: self.cube + x.powi(3),
            quartic: self.quartic + x.powi(4),
            alice_weighted: self.alice_weighted + (1.0 + ALICE_WEIGHT * turn) * x,
            bazza_weighted: self.bazza_weighted + (1.0 + BAZZA_WEIGHT * turn) * x.powi(2),
        }
    }
}

/// Result of validating a sequence against one player's constraint.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "export", derive(Serialize, Deserialize))]
pub struct Check {
    pub valid: bool,
    /// `limit − value`; negative when invalid.
    pub margin: f64,
}

#[derive(Clone, Copy, Debug)]
pub struct ConstraintModel {
    pub alice: AliceConstraint,
    pub bazza: BazzaConstraint,
    config: ParameterConfig,
}

impl ConstraintModel {
    pub fn new(config: ParameterConfig, alice: AliceConstraint, bazza: BazzaConstraint) -> Self {
        Self { alice, bazza, config }
    }

    pub fn standard(config: ParameterConfig) -> Self {
        Self::new(config, AliceConstraint::Standard, BazzaConstraint::Standard)
    }

    #[inline]
    pub fn config(&self) -> &ParameterConfig {
        &self.config
    }

    /// Accumulated constraint value for `player` over the shared sequence.
    pub fn value(&self, player: Player, moves: &[f64]) -> f64 {
        self.value_of(player, &Aggregates::from_moves(moves))
    }

    /// Same as [`value`](Self::value), read off running totals.
    pub fn value_of(&self, player: Player, sums: &Aggregates) -> f64 {
        match player {
            Player::Alice => match self.alice {
                AliceConstraint::Standard => sums.linear,
                AliceConstraint::Cubic => sums.cube,
                AliceConstraint::Weighted => sums.alice_weighted,
            },
            Player::Bazza => match self.bazza {
                BazzaConstraint::Standard => sums.square,
                BazzaConstraint::Quartic => sums.quartic,
                BazzaConstraint::Weighted => sums.bazza_weighted,
            },
        }
    }

    /// Limit for `player` once `n` rounds have been played.
    pub fn limit(&self, player: Player, n: u32) -> f64 {
        let n = n as f64;
        let lambda = self.config.linear_multiplier();
        match player {
            Player::Alice => match self.alice {
                AliceConstraint::Standard | AliceConstraint::Cubic => lambda * n,
                AliceConstraint::Weighted => 1.5 * lambda * n,
            },
            Player::Bazza => match self.bazza {
                BazzaConstraint::Standard => n,
                BazzaConstraint::Quartic => n * n,
                BazzaConstraint::Weighted => 1.2 * n,
            },
        }
    }

    /// Remaining headroom in move units. Alice's is taken as-is; Bazza's is
    /// brought back through the root matching his constraint's power.
    pub fn capacity(&self, player: Player, moves: &[f64], n: u32) -> f64 {
        self.capacity_of(player, &Aggregates::from_moves(moves), n)
    }

    pub fn capacity_of(&self, player: Player, sums: &Aggregates, n: u32) -> f64 {
        let limit = self.limit(player, n);
        let value = self.value_of(player, sums);
        match player {
            Player::Alice => aggregate::headroom(limit, value),
            Player::Bazza => match self.bazza {
                BazzaConstraint::Standard | BazzaConstraint::Weighted => {
                    aggregate::headroom_root(limit, value, 2)
                }
                BazzaConstraint::Quartic => aggregate::headroom_root(limit, value, 4),
            },
        }
    }

    /// Valid iff `value ≤ limit + ε`.
    pub fn check(&self, player: Player, moves: &[f64], n: u32) -> Check {
        self.check_of(player, &Aggregates::from_moves(moves), n)
    }

    pub fn check_of(&self, player: Player, sums: &Aggregates, n: u32) -> Check {
        let limit = self.limit(player, n);
        let value = self.value_of(player, sums);
        Check { valid: value <= limit + EPSILON, margin: limit - value }
    }
}
