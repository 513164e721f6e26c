//! Post-hoc statistics over a finished move sequence.

#[cfg(feature = "export")]
use serde::{Deserialize, Serialize};

use crate::EPSILON;
use crate::mechanics::{aggregate, stats};

/// (Σx)² against n·Σx².
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "export", derive(Serialize, Deserialize))]
pub struct CauchySchwarz {
    pub lhs: f64,
    pub rhs: f64,
    pub ratio: f64,
    pub satisfied: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "export", derive(Serialize, Deserialize))]
pub struct Diagnostics {
    pub n: usize,
    pub sum: f64,
    pub sum_sq: f64,
    pub mean: f64,
    pub std_dev: f64,
    pub max: f64,
    pub min: f64,
    pub cauchy_schwarz: CauchySchwarz,
}

/// The slack is ε for small `rhs` and ε·rhs beyond 1, so rounding in long
/// near-constant sequences (the equality case) stays inside it.
pub fn cauchy_schwarz(moves: &[f64]) -> CauchySchwarz {
    let sum = aggregate::linear_sum(moves);
    let lhs = sum * sum;
    let rhs = moves.len() as f64 * aggregate::power_sum(moves, 2);
    let slack = EPSILON * rhs.max(1.0);
    CauchySchwarz { lhs, rhs, ratio: lhs / (rhs + EPSILON), satisfied: lhs <= rhs + slack }
}

pub fn diagnose(moves: &[f64]) -> Diagnostics {
    let n = moves.len();
    let sum = aggregate::linear_sum(moves);
    let sum_sq = aggregate::power_sum(moves, 2);
    let (min, max) = stats::min_max(moves);
    Diagnostics {
        n,
        sum,
        sum_sq,
        mean: stats::mean(moves),
        std_dev: stats::pop_std_from_moments(n, sum, sum_sq),
        max,
        min,
        cauchy_schwarz: cauchy_schwarz(moves),
    }
}
