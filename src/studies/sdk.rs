// src/studies/sdk.rs

//! # Studies SDK
//!
//! Glue for batch analyses built out of many independent game runs.
//!
//! A **study** sweeps some input (λ, style pair, …), runs one game per
//! value and reduces the results (fits, tallies, boundary estimates). Runs
//! never share mutable state, so a study is just "map then reduce":
//!
//! - [`SweepRange`] describes an inclusive, evenly spaced grid and validates
//!   it once, at construction.
//! - [`run_batch`] maps a job over its inputs. With the `parallel` feature it
//!   fans out over rayon's pool; without it, it walks the inputs in order.
//!   Output order always follows input order, so both modes agree.
//! - [`WinCounts`] is the common tally.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
#[cfg(feature = "export")]
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::systems::engine::GameResult;
use crate::systems::sdk::Winner;

/// Inclusive grid `start, start + step, …, ≤ end`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "export", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "export", serde(try_from = "RawRange"))]
pub struct SweepRange {
    start: f64,
    end: f64,
    step: f64,
}

/// Unvalidated wire form; deserialising goes through [`SweepRange::new`].
#[cfg(feature = "export")]
#[derive(Deserialize)]
struct RawRange {
    start: f64,
    end: f64,
    step: f64,
}

#[cfg(feature = "export")]
impl TryFrom<RawRange> for SweepRange {
    type Error = ConfigError;

    fn try_from(r: RawRange) -> Result<Self, Self::Error> {
        SweepRange::new(r.start, r.end, r.step)
    }
}

impl SweepRange {
    pub fn new(start: f64, end: f64, step: f64) -> Result<Self, ConfigError> {
        if !start.is_finite() || !end.is_finite() {
            return Err(ConfigError::NonFiniteBounds { start, end });
        }
        if start > end {
            return Err(ConfigError::InvertedRange { start, end });
        }
        if !step.is_finite() || step <= 0.0 {
            return Err(ConfigError::InvalidStep(step));
        }
        Ok(Self { start, end, step })
    }

    /// Symmetric window `center ± half_width`.
    pub fn around(center: f64, half_width: f64, step: f64) -> Result<Self, ConfigError> {
        Self::new(center - half_width, center + half_width, step)
    }

    #[inline]
    pub fn start(&self) -> f64 {
        self.start
    }
    #[inline]
    pub fn end(&self) -> f64 {
        self.end
    }
    #[inline]
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Number of grid points. A small slack keeps `end` when the division
    /// lands a hair under an integer.
    pub fn count(&self) -> usize {
        ((self.end - self.start) / self.step + 1e-9).floor() as usize + 1
    }

    /// Values computed as `start + i·step` so error does not accumulate.
    pub fn values(&self) -> Vec<f64> {
        (0..self.count()).map(|i| self.start + self.step * i as f64).collect()
    }
}

/// Map `job` over `inputs`, preserving order.
#[cfg(feature = "parallel")]
pub fn run_batch<I, T, F>(inputs: &[I], job: F) -> Vec<T>
where
    I: Sync,
    T: Send,
    F: Fn(&I) -> T + Sync + Send,
{
    inputs.par_iter().map(job).collect()
}

/// Map `job` over `inputs`, preserving order.
#[cfg(not(feature = "parallel"))]
pub fn run_batch<I, T, F>(inputs: &[I], job: F) -> Vec<T>
where
    F: Fn(&I) -> T,
{
    inputs.iter().map(job).collect()
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "export", derive(Serialize, Deserialize))]
pub struct WinCounts {
    pub alice: usize,
    pub bazza: usize,
    pub draw: usize,
}

impl WinCounts {
    pub fn tally(results: &[GameResult]) -> Self {
        results.iter().fold(Self::default(), |mut c, r| {
            match r.winner {
                Winner::Alice => c.alice += 1,
                Winner::Bazza => c.bazza += 1,
                Winner::Draw => c.draw += 1,
            }
            c
        })
    }

    pub fn total(&self) -> usize {
        self.alice + self.bazza + self.draw
    }
}

/// Fraction of runs whose outcome matched the theoretical prediction.
pub fn matched_fraction(results: &[GameResult]) -> f64 {
    if results.is_empty() {
        return 0.0;
    }
    results.iter().filter(|r| r.match_theory).count() as f64 / results.len() as f64
}
