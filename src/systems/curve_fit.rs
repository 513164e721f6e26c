//! Power-law fit of game length against distance from the threshold.
//!
//! Each side of the reference point is fitted on its own:
//! Alice wins with λ > ref, Bazza wins with λ < ref, each mapped to points
//! `(x = |λ − ref|, y = total_rounds)`. The model `y ≈ a·x^b + d` is found by
//! a coarse `(b, d)` grid, then coordinate descent with shrinking radii,
//! then a fixed-radius fine pass. Wherever `b` or `d` moves, `a` is re-solved
//! in closed form; a candidate is kept only if it lowers RMSE and `a > 0`.

#[cfg(feature = "export")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::LAMBDA_CRITICAL;
use crate::mechanics::powerlaw;
use crate::systems::engine::GameResult;
use crate::systems::sdk::{Player, Winner};

/// Points this close to the reference are singular and dropped.
pub const MIN_DISTANCE: f64 = 1e-8;
pub const DEFAULT_CURVE_STEPS: usize = 80;

const COARSE_B_START: f64 = -3.0;
const COARSE_B_STEP: f64 = 0.2;
const COARSE_B_COUNT: usize = 18; // -3.0 ..= 0.4
const COARSE_D_FRACTIONS: [f64; 4] = [0.0, 0.2, 0.5, 0.8];

/// Round counts and resolutions of the refinement passes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "export", derive(Serialize, Deserialize))]
pub struct FitSchedule {
    pub refine_rounds: u32,
    pub refine_steps: usize,
    pub fine_rounds: u32,
    pub fine_steps: usize,
}

impl Default for FitSchedule {
    fn default() -> Self {
        Self { refine_rounds: 5, refine_steps: 30, fine_rounds: 3, fine_steps: 50 }
    }
}

/// Search state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitParams {
    pub a: f64,
    pub b: f64,
    pub d: f64,
    pub error: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "export", derive(Serialize, Deserialize))]
pub struct FitModel {
    pub a: f64,
    pub b: f64,
    pub d: f64,
    /// RMSE over the fitted points.
    pub error: f64,
    pub r2: f64,
    pub n: usize,
}

impl FitModel {
    #[inline]
    pub fn predict(&self, x: f64) -> f64 {
        powerlaw::eval(self.a, self.b, self.d, x)
    }

    /// Display form: `a`, `b` to 6 decimals, `d` to 4.
    pub fn formula(&self) -> String {
        format!(
            "rounds ≈ {:.6}·|λ − λ*|^{:.6} + {:.4}  (R² = {:.4}, RMSE = {:.4}, n = {})",
            self.a, self.b, self.d, self.r2, self.error, self.n
        )
    }
}

/// Both sides of one batch.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "export", derive(Serialize, Deserialize))]
pub struct FitPair {
    pub alice: Option<FitModel>,
    pub bazza: Option<FitModel>,
    pub ref_point: f64,
}

impl FitPair {
    pub fn side(&self, player: Player) -> Option<&FitModel> {
        match player {
            Player::Alice => self.alice.as_ref(),
            Player::Bazza => self.bazza.as_ref(),
        }
    }
}

/// Transformed points for one side: Alice wins above `ref_point`, Bazza wins
/// below it.
pub fn transformed_points(results: &[GameResult], side: Player, ref_point: f64) -> Vec<(f64, f64)> {
    results
        .iter()
        .filter(|r| match side {
            Player::Alice => r.winner == Winner::Alice && r.lambda > ref_point,
            Player::Bazza => r.winner == Winner::Bazza && r.lambda < ref_point,
        })
        .map(|r| ((r.lambda - ref_point).abs(), r.total_rounds as f64))
        .filter(|&(x, _)| x > MIN_DISTANCE)
        .collect()
}

/// Fit both sides around λ*.
pub fn fit_power_law(results: &[GameResult]) -> FitPair {
    fit_power_law_at(results, LAMBDA_CRITICAL)
}

pub fn fit_power_law_at(results: &[GameResult], ref_point: f64) -> FitPair {
    let fit_side = |side: Player| {
        let pts = transformed_points(results, side, ref_point);
        let fit = fit_points(&pts);
        match &fit {
            Some(m) => debug!(%side, a = m.a, b = m.b, d = m.d, rmse = m.error, r2 = m.r2, n = m.n, "power-law fit"),
            None => debug!(%side, points = pts.len(), "no power-law fit"),
        }
        fit
    };
    FitPair { alice: fit_side(Player::Alice), bazza: fit_side(Player::Bazza), ref_point }
}

pub fn fit_points(points: &[(f64, f64)]) -> Option<FitModel> {
    fit_points_with(points, FitSchedule::default())
}

/// `None` below two points or when no grid candidate has `a > 0`.
pub fn fit_points_with(points: &[(f64, f64)], schedule: FitSchedule) -> Option<FitModel> {
    if points.len() < 2 {
        return None;
    }
    let (min_y, max_y) = points
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| (lo.min(p.1), hi.max(p.1)));

    let mut s = Search { points, best: coarse_grid(points, min_y)? };

    for round in 0..schedule.refine_rounds {
        let scale = 0.5_f64.powi(round as i32);
        s.sweep_b(0.5 * scale, schedule.refine_steps);
        s.sweep_d(0.3 * scale * (max_y - min_y), schedule.refine_steps);
        s.sweep_a(0.3 * scale * s.best.a, schedule.refine_steps);
    }
    for _ in 0..schedule.fine_rounds {
        s.sweep_b(0.02, schedule.fine_steps);
        s.sweep_d((0.05 * min_y).max(0.5), schedule.fine_steps);
        s.sweep_a(0.02 * s.best.a, schedule.fine_steps);
    }

    let FitParams { a, b, d, error } = s.best;
    Some(FitModel { a, b, d, error, r2: powerlaw::r_squared(points, a, b, d), n: points.len() })
}

fn coarse_grid(points: &[(f64, f64)], min_y: f64) -> Option<FitParams> {
    let mut best: Option<FitParams> = None;
    for frac in COARSE_D_FRACTIONS {
        let d = frac * min_y;
        for j in 0..COARSE_B_COUNT {
            let b = COARSE_B_START + COARSE_B_STEP * j as f64;
            let a = powerlaw::coefficient(points, b, d);
            if a.is_nan() || a <= 0.0 {
                continue;
            }
            let error = powerlaw::rmse(points, a, b, d);
            if best.is_none_or(|cur| error < cur.error) {
                best = Some(FitParams { a, b, d, error });
            }
        }
    }
    best
}

struct Search<'a> {
    points: &'a [(f64, f64)],
    best: FitParams,
}

impl Search<'_> {
    fn offer(&mut self, a: f64, b: f64, d: f64) {
        if a.is_nan() || a <= 0.0 {
            return;
        }
        let error = powerlaw::rmse(self.points, a, b, d);
        if error < self.best.error {
            self.best = FitParams { a, b, d, error };
        }
    }

    fn sweep_b(&mut self, half: f64, steps: usize) {
        let center = self.best.b;
        for b in powerlaw::span(center, half, steps) {
            let d = self.best.d;
            self.offer(powerlaw::coefficient(self.points, b, d), b, d);
        }
    }

    fn sweep_d(&mut self, half: f64, steps: usize) {
        let center = self.best.d;
        for d in powerlaw::span(center, half, steps) {
            let b = self.best.b;
            self.offer(powerlaw::coefficient(self.points, b, d), b, d);
        }
    }

    fn sweep_a(&mut self, half: f64, steps: usize) {
        let center = self.best.a;
        for a in powerlaw::span(center, half, steps) {
            self.offer(a, self.best.b, self.best.d);
        }
    }
}

/// Sampling window for [`generate_curve`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "export", derive(Serialize, Deserialize))]
pub struct CurveSpec {
    pub lo: f64,
    pub hi: f64,
    pub steps: usize,
}

impl CurveSpec {
    pub fn new(lo: f64, hi: f64) -> Self {
        Self { lo, hi, steps: DEFAULT_CURVE_STEPS }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "export", derive(Serialize, Deserialize))]
pub struct CurvePoint {
    pub lambda: f64,
    pub rounds: f64,
}

/// Sample a fitted model over `[lo, hi]`, skipping the singular point and
/// any non-finite or non-positive prediction.
pub fn generate_curve(model: &FitModel, ref_point: f64, spec: CurveSpec) -> Vec<CurvePoint> {
    let steps = spec.steps.max(2);
    (0..steps)
        .filter_map(|i| {
            let lambda = spec.lo + (spec.hi - spec.lo) * i as f64 / (steps - 1) as f64;
            let x = (lambda - ref_point).abs();
            if x <= MIN_DISTANCE {
                return None;
            }
            let rounds = model.predict(x);
            (rounds.is_finite() && rounds > 0.0).then_some(CurvePoint { lambda, rounds })
        })
        .collect()
}
