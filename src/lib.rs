/*!
`lambda_game`: a deterministic simulator for the two-constraint λ game.

What it does
- Alice (odd rounds) picks `x ≥ 0` subject to a linear-family budget that
  grows like `λn`; Bazza (even rounds) picks `x ≥ 0` subject to a
  quadratic-family budget that grows like `n`. A player whose move breaks
  their own budget loses; surviving `max_rounds` is a draw.
- Theory puts the switch between "Alice wins" and "Bazza wins" at
  `λ* = 1/√2`. This crate corroborates that numerically: it turns λ into
  strategy parameters, plays the game with pluggable policies and
  constraint variants, and fits `rounds ≈ a·|λ − λ*|^b + d` on each side.

How to use (call surface only)
- One game:
  * `GameEngine::for_lambda(λ, GameConfig::default()).run() -> GameResult`
- Diagnostics over the moves:
  * `systems::diagnostics::diagnose(&result.moves)`
- A batch and its fit:
  * `studies::threshold_study(&LambdaSweepConfig::new(start, end, step, game)?)`
  * or `systems::curve_fit::fit_power_law(&results) -> FitPair`

What it does NOT do
- No I/O, no persistence, no rendering. Export shapes (feature `export`)
  are strings and serde values; writing them is up to the caller.
- No symbolic proof. The fit is numeric evidence only.
*/

/// λ* = 1/√2.
pub const LAMBDA_CRITICAL: f64 = std::f64::consts::FRAC_1_SQRT_2;

/// Slack absorbing floating-point drift in constraint checks and ratios.
pub const EPSILON: f64 = 1e-10;

pub mod error;
pub mod mechanics;
pub mod systems;
pub mod studies;

pub use error::ConfigError;
pub use systems::constraint::{Aggregates, AliceConstraint, BazzaConstraint, Check, ConstraintModel};
pub use systems::curve_fit::{FitModel, FitPair};
pub use systems::engine::{GameConfig, GameEngine, GameResult, MoveDetail};
pub use systems::params::{ParameterConfig, Prediction, Status};
pub use systems::policy::Style;
pub use systems::sdk::{GameHook, Player, Winner};
pub use studies::{LambdaSweepConfig, SweepRange};
