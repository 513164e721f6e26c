//! Bootstrap spread of the fitted exponent.
//!
//! Resamples one side's transformed points with replacement, refits each
//! resample and summarises the exponents that came back. Seeded, so the
//! same inputs always give the same spread.

#[cfg(feature = "export")]
use serde::{Deserialize, Serialize};

use crate::mechanics::{stats, stoch};
use crate::systems::curve_fit::{FitSchedule, fit_points_with};

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "export", derive(Serialize, Deserialize))]
pub struct ExponentSpread {
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    /// Resamples that produced a fit.
    pub fitted: usize,
    pub requested: usize,
}

/// `None` unless at least two resamples fit.
pub fn bootstrap_exponent(
    points: &[(f64, f64)],
    resamples: usize,
    schedule: FitSchedule,
    seed: u64,
) -> Option<ExponentSpread> {
    if points.len() < 2 {
        return None;
    }
    let rng = stoch::seeded(seed);
    let mut exponents = Vec::with_capacity(resamples);
    let mut sample = Vec::with_capacity(points.len());

    for _ in 0..resamples {
        sample.clear();
        sample.extend((0..points.len()).map(|_| points[stoch::index(&rng, points.len())]));
        if let Some(m) = fit_points_with(&sample, schedule) {
            exponents.push(m.b);
        }
    }

    if exponents.len() < 2 {
        return None;
    }
    let (min, max) = stats::min_max(&exponents);
    Some(ExponentSpread {
        mean: stats::mean(&exponents),
        std_dev: stats::sample_std(&exponents),
        min,
        max,
        fitted: exponents.len(),
        requested: resamples,
    })
}
