//! Power-law model `y = a·x^b + d` and its least-squares pieces.
//! Points are `(x, y)` pairs with `x > 0`.

use crate::EPSILON;

/// Model value at `x`.
#[inline]
pub fn eval(a: f64, b: f64, d: f64, x: f64) -> f64 {
    a * x.powf(b) + d
}

/// Closed-form least-squares `a` for fixed `(b, d)`:
/// `a = Σ(y − d)·x^b / Σ(x^b)²`, skipping non-finite `x^b`.
/// Returns 0 when no finite term contributes.
#[inline]
pub fn coefficient(points: &[(f64, f64)], b: f64, d: f64) -> f64 {
    let (mut num, mut den) = (0.0, 0.0);
    for &(x, y) in points {
        let p = x.powf(b);
        if !p.is_finite() {
            continue;
        }
        num += (y - d) * p;
        den += p * p;
    }
    if den > 0.0 && den.is_finite() { num / den } else { 0.0 }
}

/// Root-mean-square error; `+∞` if anything goes non-finite.
#[inline]
pub fn rmse(points: &[(f64, f64)], a: f64, b: f64, d: f64) -> f64 {
    if points.is_empty() {
        return f64::INFINITY;
    }
    let ss: f64 = points
        .iter()
        .map(|&(x, y)| (eval(a, b, d, x) - y).powi(2))
        .sum();
    let r = (ss / points.len() as f64).sqrt();
    if r.is_finite() { r } else { f64::INFINITY }
}

/// Coefficient of determination, floored at 0: `max(0, 1 − ssRes/(ssTot + ε))`.
#[inline]
pub fn r_squared(points: &[(f64, f64)], a: f64, b: f64, d: f64) -> f64 {
    if points.is_empty() {
        return 0.0;
    }
    let my = points.iter().map(|p| p.1).sum::<f64>() / points.len() as f64;
    let mut ss_res = 0.0;
    let mut ss_tot = 0.0;
    for &(x, y) in points {
        ss_res += (y - eval(a, b, d, x)).powi(2);
        ss_tot += (y - my).powi(2);
    }
    let r2 = 1.0 - ss_res / (ss_tot + EPSILON);
    if r2.is_finite() { r2.max(0.0) } else { 0.0 }
}

/// `steps + 1` evenly spaced values over `[center − half, center + half]`.
#[inline]
pub fn span(center: f64, half: f64, steps: usize) -> impl Iterator<Item = f64> {
    let steps = steps.max(1);
    (0..=steps).map(move |i| center - half + 2.0 * half * (i as f64) / (steps as f64))
}
