//! Constraint aggregates over a move sequence, plus headroom transforms.
//!
//! Every aggregate walks the full shared sequence. The weighted forms index
//! each move by its mover's own turn (`global / 2`), never by the global round.

/// Σ xᵢ.
#[inline]
pub fn linear_sum(moves: &[f64]) -> f64 {
    moves.iter().sum()
}

/// Σ xᵢᵏ for a small integer power.
#[inline]
pub fn power_sum(moves: &[f64], k: i32) -> f64 {
    moves.iter().map(|x| x.powi(k)).sum()
}

/// Zero-based turn index of a move within its own player's list.
#[inline]
pub fn own_turn(global_index: usize) -> usize {
    global_index / 2
}

/// Σ (1 + w·i)·xᵢᵏ where `i` is the mover's own turn index.
#[inline]
pub fn weighted_power_sum(moves: &[f64], w: f64, k: i32) -> f64 {
    moves
        .iter()
        .enumerate()
        .map(|(g, x)| (1.0 + w * own_turn(g) as f64) * x.powi(k))
        .sum()
}

/// Non-negative remainder `limit - value`.
#[inline]
pub fn headroom(limit: f64, value: f64) -> f64 {
    (limit - value).max(0.0)
}

/// Remainder mapped back to move units through a `1/k` root; zero if none left.
#[inline]
pub fn headroom_root(limit: f64, value: f64, k: i32) -> f64 {
    let rem = limit - value;
    if rem > 0.0 {
        match k {
            1 => rem,
            2 => rem.sqrt(),
            _ => rem.powf(1.0 / k as f64),
        }
    } else {
        0.0
    }
}

/// Largest move Bazza could make after Alice's last move without exceeding
/// the two-round quadratic budget: √max(0, 2 − x²).
#[inline]
pub fn quadratic_reply_max(last_alice: f64) -> f64 {
    (2.0 - last_alice * last_alice).max(0.0).sqrt()
}
