//! Configuration-boundary errors.
//!
//! The game and the fitter never fail: a violation is a terminal game state
//! and missing data is `None`. Only parsing and validating caller-supplied
//! configuration can go wrong.

use thiserror::Error;

use crate::systems::sdk::Player;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("unknown strategy style `{0}`")]
    UnknownStyle(String),
    #[error("unknown constraint variant `{tag}` for {player}")]
    UnknownConstraint { player: Player, tag: String },
    #[error("`{tag}` is not a valid constraint variant for {player}")]
    VariantNotAllowed { player: Player, tag: String },
    #[error("sweep bounds must be finite (start={start}, end={end})")]
    NonFiniteBounds { start: f64, end: f64 },
    #[error("sweep start {start} exceeds end {end}")]
    InvertedRange { start: f64, end: f64 },
    #[error("sweep step must be positive and finite, got {0}")]
    InvalidStep(f64),
    #[error("max_rounds must be at least 1")]
    ZeroRounds,
}
