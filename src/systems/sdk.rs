// src/systems/sdk.rs

//! # Systems SDK
//!
//! Shared vocabulary for the game systems plus a small **hook** protocol.
//!
//! ## Players and rounds
//! Round `n` is 1-based. Odd rounds belong to Alice, even rounds to Bazza, so
//! the shared move sequence alternates starting with Alice at index 0.
//!
//! ## Hooks (optional observers / modulators)
//! Implement [`GameHook`] to watch a game or bend its moves without touching
//! the engine:
//!
//! - `move_multiplier(player, proposed, capacity) -> f64`
//!   Scale a policy's proposed move before validation. Default 1.0. The
//!   engine clamps the scaled move at 0; it does *not* clamp to capacity,
//!   so a hook can deliberately push a player into violation.
//!
//! - `on_move(&MoveDetail)`
//!   Observe every recorded round, including a rejected terminal one.
//!
//! - `on_finish(&GameResult)`
//!   Observe the terminal record.
//!
//! Hooks compose in order: multipliers multiply, observers all see the same
//! snapshot. With no hooks the engine is exactly the pure policy game.
//!
//! ## Determinism
//! Every system here is a pure function of its configuration. If a hook adds
//! randomness, inject the seed explicitly.

use std::fmt;

#[cfg(feature = "export")]
use serde::{Deserialize, Serialize};

use crate::systems::engine::{GameResult, MoveDetail};

/// The two players.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "export", derive(Serialize, Deserialize))]
pub enum Player {
    Alice,
    Bazza,
}

impl Player {
    /// Acting player for 1-based round `n`.
    #[inline]
    pub fn for_round(n: u32) -> Self {
        if n % 2 == 1 { Player::Alice } else { Player::Bazza }
    }

    #[inline]
    pub fn opponent(self) -> Self {
        match self {
            Player::Alice => Player::Bazza,
            Player::Bazza => Player::Alice,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Player::Alice => "Alice",
            Player::Bazza => "Bazza",
        })
    }
}

/// Terminal outcome of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "export", derive(Serialize, Deserialize))]
pub enum Winner {
    Alice,
    Bazza,
    Draw,
}

impl From<Player> for Winner {
    fn from(p: Player) -> Self {
        match p {
            Player::Alice => Winner::Alice,
            Player::Bazza => Winner::Bazza,
        }
    }
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Winner::Alice => "Alice",
            Winner::Bazza => "Bazza",
            Winner::Draw => "Draw",
        })
    }
}

/// Observer / modulator attached to a single game run.
pub trait GameHook {
    /// (Optional) scale the proposed move (default: 1.0).
    fn move_multiplier(&mut self, _player: Player, _proposed: f64, _capacity: f64) -> f64 {
        1.0
    }
    /// (Optional) see each recorded round.
    fn on_move(&mut self, _detail: &MoveDetail) {}
    /// (Optional) see the terminal record.
    fn on_finish(&mut self, _result: &GameResult) {}
}
