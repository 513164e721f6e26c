//! Summary statistics over plain `f64` slices.

/// Arithmetic mean; 0 for an empty slice.
#[inline]
pub fn mean(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        0.0
    } else {
        xs.iter().sum::<f64>() / xs.len() as f64
    }
}

/// Population standard deviation from raw moments: √(E[x²] − E[x]²).
/// Negative drift from cancellation is clamped to 0.
#[inline]
pub fn pop_std_from_moments(n: usize, sum: f64, sum_sq: f64) -> f64 {
    if n == 0 {
        return 0.0;
    }
    let nf = n as f64;
    let m = sum / nf;
    (sum_sq / nf - m * m).max(0.0).sqrt()
}

/// Sample standard deviation (n − 1); 0 below two samples.
#[inline]
pub fn sample_std(xs: &[f64]) -> f64 {
    if xs.len() < 2 {
        return 0.0;
    }
    let m = mean(xs);
    let var = xs.iter().map(|x| (x - m).powi(2)).sum::<f64>() / (xs.len() - 1) as f64;
    var.sqrt()
}

/// (min, max) of a slice; (0, 0) when empty.
#[inline]
pub fn min_max(xs: &[f64]) -> (f64, f64) {
    if xs.is_empty() {
        return (0.0, 0.0);
    }
    xs.iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| (lo.min(x), hi.max(x)))
}
