//! Stochastic mechanics: seeded uniform/index/Gaussian draws.
//! Note: uses `bevy_prng::WyRand` behind a `RefCell` so resampling closures
//! can stay `Fn` while advancing RNG state.
use bevy_prng::WyRand;
use rand_core::{RngCore, SeedableRng};
use std::cell::RefCell;

/// Fresh generator from a `u64` seed.
#[inline]
pub fn seeded(seed: u64) -> RefCell<WyRand> {
    RefCell::new(WyRand::from_seed(seed.to_le_bytes()))
}

/// Uniform in [0, 1) with 53 bits of precision.
#[inline]
pub fn uniform01(rng: &RefCell<WyRand>) -> f64 {
    let u = rng.borrow_mut().next_u64();
    ((u >> 11) as f64) / ((1u64 << 53) as f64)
}

/// Uniform index in `0..len` (`len > 0`).
#[inline]
pub fn index(rng: &RefCell<WyRand>, len: usize) -> usize {
    let i = (uniform01(rng) * len as f64) as usize;
    i.min(len.saturating_sub(1))
}

/// Gaussian(0,1) via Box–Muller.
#[inline]
pub fn gaussian01(rng: &RefCell<WyRand>) -> f64 {
    // 1 − u keeps the log argument in (0, 1].
    let u1 = 1.0 - uniform01(rng);
    let u2 = uniform01(rng);
    let r = (-2.0 * u1.ln()).sqrt();
    let t = 2.0 * std::f64::consts::PI * u2;
    r * t.cos()
}
