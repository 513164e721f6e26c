// src/studies/lambda_sweep.rs

//! λ sweeps and the threshold study.
//!
//! Coordinates:
//! - `engine`     → one game per λ on the grid
//! - `curve_fit`  → power-law fit per side of λ*
//! - sampled curves over each side of the swept window
//!
//! The study's headline numbers are the fitted exponents, the share of runs
//! that matched theory, and an empirical boundary: the midpoint between the
//! largest λ Bazza won and the smallest λ Alice won.

#[cfg(feature = "export")]
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::LAMBDA_CRITICAL;
use crate::error::ConfigError;
use crate::studies::sdk::{SweepRange, WinCounts, matched_fraction, run_batch};
use crate::systems::curve_fit::{CurvePoint, CurveSpec, FitPair, fit_power_law_at, generate_curve};
use crate::systems::engine::{GameConfig, GameEngine, GameResult};
use crate::systems::sdk::Winner;

/// Half-width and step of the default critical-neighbourhood window.
pub const NEIGHBORHOOD_HALF_WIDTH: f64 = 0.1;
pub const NEIGHBORHOOD_STEP: f64 = 0.005;

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "export", derive(Serialize, Deserialize))]
pub struct LambdaSweepConfig {
    pub range: SweepRange,
    pub game: GameConfig,
}

impl LambdaSweepConfig {
    pub fn new(start: f64, end: f64, step: f64, game: GameConfig) -> Result<Self, ConfigError> {
        Ok(Self { range: SweepRange::new(start, end, step)?, game: game.validated()? })
    }

    /// λ* ± 0.1 in steps of 0.005.
    pub fn critical_neighborhood(game: GameConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            range: SweepRange::around(LAMBDA_CRITICAL, NEIGHBORHOOD_HALF_WIDTH, NEIGHBORHOOD_STEP)?,
            game: game.validated()?,
        })
    }
}

/// One game per λ on the grid, in grid order.
pub fn sweep_lambda(cfg: &LambdaSweepConfig) -> Vec<GameResult> {
    let lambdas = cfg.range.values();
    let game = cfg.game;
    run_batch(&lambdas, move |&lambda| GameEngine::for_lambda(lambda, game).run())
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "export", derive(Serialize))]
pub struct ThresholdStudy {
    pub results: Vec<GameResult>,
    pub fits: FitPair,
    pub alice_curve: Vec<CurvePoint>,
    pub bazza_curve: Vec<CurvePoint>,
    pub counts: WinCounts,
    pub matched_fraction: f64,
    /// Midpoint between the largest Bazza-won λ and the smallest Alice-won λ.
    pub boundary: Option<f64>,
}

pub fn threshold_study(cfg: &LambdaSweepConfig) -> ThresholdStudy {
    let results = sweep_lambda(cfg);
    let fits = fit_power_law_at(&results, LAMBDA_CRITICAL);

    let (lo, hi) = (cfg.range.start(), cfg.range.end());
    let alice_curve = fits
        .alice
        .map(|m| generate_curve(&m, fits.ref_point, CurveSpec::new(lo.max(fits.ref_point), hi)))
        .unwrap_or_default();
    let bazza_curve = fits
        .bazza
        .map(|m| generate_curve(&m, fits.ref_point, CurveSpec::new(lo, hi.min(fits.ref_point))))
        .unwrap_or_default();

    if fits.alice.is_none() {
        warn!("threshold study: not enough Alice wins above λ* to fit");
    }
    if fits.bazza.is_none() {
        warn!("threshold study: not enough Bazza wins below λ* to fit");
    }

    let counts = WinCounts::tally(&results);
    let matched = matched_fraction(&results);
    let boundary = empirical_boundary(&results);
    info!(
        runs = results.len(),
        alice = counts.alice,
        bazza = counts.bazza,
        draw = counts.draw,
        matched,
        boundary = ?boundary,
        "threshold study complete"
    );

    ThresholdStudy {
        results,
        fits,
        alice_curve,
        bazza_curve,
        counts,
        matched_fraction: matched,
        boundary,
    }
}

/// `None` unless both players won somewhere on the grid.
pub fn empirical_boundary(results: &[GameResult]) -> Option<f64> {
    let last_bazza = results
        .iter()
        .filter(|r| r.winner == Winner::Bazza)
        .map(|r| r.lambda)
        .fold(None, |acc: Option<f64>, l| Some(acc.map_or(l, |a| a.max(l))));
    let first_alice = results
        .iter()
        .filter(|r| r.winner == Winner::Alice)
        .map(|r| r.lambda)
        .fold(None, |acc: Option<f64>, l| Some(acc.map_or(l, |a| a.min(l))));
    Some(0.5 * (last_bazza? + first_alice?))
}
