//! Turn-by-turn game engine.
//!
//! State is `(round, shared sequence, per-player lists, critical round)`.
//! Each round the acting player's policy proposes a move, the move is
//! appended tentatively and checked against that player's constraint. A
//! failed check ends the game for the opponent; reaching `max_rounds`
//! without one is a draw.

#[cfg(feature = "export")]
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::ConfigError;
use crate::systems::constraint::{Aggregates, AliceConstraint, BazzaConstraint, ConstraintModel};
use crate::systems::params::{ParameterConfig, Prediction};
use crate::systems::policy::{self, PolicyContext, Style};
use crate::systems::sdk::{GameHook, Player, Winner};

/// Moves above this are flagged as critical.
pub const CRITICAL_MOVE: f64 = 0.5;

/// Upper bound on rounds reserved up front; longer games grow on demand.
const PREALLOC_ROUNDS: u32 = 1024;

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "export", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "export", serde(try_from = "RawGameConfig"))]
pub struct GameConfig {
    pub max_rounds: u32,
    pub alice_style: Style,
    pub bazza_style: Style,
    pub alice_constraint: AliceConstraint,
    pub bazza_constraint: BazzaConstraint,
}

/// Unvalidated wire form; deserialising goes through [`GameConfig::validated`].
#[cfg(feature = "export")]
#[derive(Deserialize)]
struct RawGameConfig {
    max_rounds: u32,
    alice_style: Style,
    bazza_style: Style,
    alice_constraint: AliceConstraint,
    bazza_constraint: BazzaConstraint,
}

#[cfg(feature = "export")]
impl TryFrom<RawGameConfig> for GameConfig {
    type Error = ConfigError;

    fn try_from(r: RawGameConfig) -> Result<Self, Self::Error> {
        GameConfig {
            max_rounds: r.max_rounds,
            alice_style: r.alice_style,
            bazza_style: r.bazza_style,
            alice_constraint: r.alice_constraint,
            bazza_constraint: r.bazza_constraint,
        }
        .validated()
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_rounds: 100,
            alice_style: Style::Optimal,
            bazza_style: Style::Optimal,
            alice_constraint: AliceConstraint::Standard,
            bazza_constraint: BazzaConstraint::Standard,
        }
    }
}

impl GameConfig {
    pub fn validated(self) -> Result<Self, ConfigError> {
        if self.max_rounds == 0 {
            return Err(ConfigError::ZeroRounds);
        }
        Ok(self)
    }

    pub fn with_rounds(mut self, max_rounds: u32) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    pub fn with_styles(mut self, alice: Style, bazza: Style) -> Self {
        self.alice_style = alice;
        self.bazza_style = bazza;
        self
    }

    pub fn with_constraints(mut self, alice: AliceConstraint, bazza: BazzaConstraint) -> Self {
        self.alice_constraint = alice;
        self.bazza_constraint = bazza;
        self
    }

    #[inline]
    pub fn style_of(&self, player: Player) -> Style {
        match player {
            Player::Alice => self.alice_style,
            Player::Bazza => self.bazza_style,
        }
    }
}

/// Snapshot of one round.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "export", derive(Serialize, Deserialize))]
pub struct MoveDetail {
    pub round: u32,
    pub player: Player,
    pub value: f64,
    pub linear_sum: f64,
    pub square_sum: f64,
    pub cube_sum: f64,
    pub quartic_sum: f64,
    pub alice_capacity: f64,
    pub bazza_capacity: f64,
    pub alice_limit: f64,
    pub bazza_limit: f64,
    pub reason: String,
    pub critical: bool,
}

/// Terminal record of a game.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "export", derive(Serialize, Deserialize))]
pub struct GameResult {
    pub winner: Winner,
    pub total_rounds: u32,
    /// Committed moves only; a rejected final move is in `details` but not here.
    pub moves: Vec<f64>,
    pub details: Vec<MoveDetail>,
    pub reason: String,
    pub theoretical_prediction: Prediction,
    pub match_theory: bool,
    /// First round whose committed move exceeded [`CRITICAL_MOVE`].
    pub critical_round: Option<u32>,
    pub lambda: f64,
    pub alice_style: Style,
    pub bazza_style: Style,
    pub alice_constraint: AliceConstraint,
    pub bazza_constraint: BazzaConstraint,
}

#[derive(Clone, Copy, Debug)]
pub struct GameEngine {
    params: ParameterConfig,
    model: ConstraintModel,
    game: GameConfig,
}

impl GameEngine {
    pub fn new(params: ParameterConfig, game: GameConfig) -> Self {
        let model = ConstraintModel::new(params, game.alice_constraint, game.bazza_constraint);
        Self { params, model, game }
    }

    pub fn for_lambda(lambda: f64, game: GameConfig) -> Self {
        Self::new(ParameterConfig::new(lambda), game)
    }

    #[inline]
    pub fn params(&self) -> &ParameterConfig {
        &self.params
    }

    #[inline]
    pub fn model(&self) -> &ConstraintModel {
        &self.model
    }

    pub fn run(&self) -> GameResult {
        self.run_with_hooks(&mut [])
    }

    pub fn run_with_hooks(&self, hooks: &mut [Box<dyn GameHook>]) -> GameResult {
        let max = self.game.max_rounds;
        let reserve = max.min(PREALLOC_ROUNDS);
        let mut moves: Vec<f64> = Vec::with_capacity(reserve as usize);
        let mut alice_moves: Vec<f64> = Vec::with_capacity(reserve.div_ceil(2) as usize);
        let mut bazza_moves: Vec<f64> = Vec::with_capacity((reserve / 2) as usize);
        let mut details: Vec<MoveDetail> = Vec::with_capacity(reserve as usize);
        let mut sums = Aggregates::default();
        let mut critical_round: Option<u32> = None;

        for n in 1..=max {
            let player = Player::for_round(n);
            let capacity = self.model.capacity_of(player, &sums, n);
            let ctx = PolicyContext {
                round: n,
                capacity,
                moves: &moves,
                alice_moves: &alice_moves,
                bazza_moves: &bazza_moves,
                square_sum: sums.square,
                config: &self.params,
            };
            let decision = policy::decide(player, self.game.style_of(player), &ctx);

            let mult: f64 = hooks
                .iter_mut()
                .map(|h| h.move_multiplier(player, decision.value, capacity).max(0.0))
                .product();
            let value = (decision.value * mult).max(0.0);

            let tentative = sums.push(value);
            let check = self.model.check_of(player, &tentative, n);

            if !check.valid {
                let reason = format!("{}; rejected (margin {:.6})", decision.reason, check.margin);
                let detail = self.snapshot(n, player, &tentative, value, reason, true);
                for h in hooks.iter_mut() {
                    h.on_move(&detail);
                }
                details.push(detail);

                let variant = match player {
                    Player::Alice => self.game.alice_constraint.as_str(),
                    Player::Bazza => self.game.bazza_constraint.as_str(),
                };
                let why = format!(
                    "{player} violated the {variant} constraint at round {n} (margin {:.6})",
                    check.margin
                );
                debug!(lambda = self.params.lambda(), round = n, %player, margin = check.margin, "constraint violated");
                return self.finish(player.opponent().into(), n, moves, details, why, critical_round, hooks);
            }

            sums = tentative;
            moves.push(value);
            if critical_round.is_none() && value > CRITICAL_MOVE {
                critical_round = Some(n);
            }
            match player {
                Player::Alice => alice_moves.push(value),
                Player::Bazza => bazza_moves.push(value),
            }
            trace!(round = n, %player, value, reason = %decision.reason, "move committed");

            let detail = self.snapshot(n, player, &sums, value, decision.reason, value > CRITICAL_MOVE);
            for h in hooks.iter_mut() {
                h.on_move(&detail);
            }
            details.push(detail);
        }

        debug!(lambda = self.params.lambda(), rounds = max, "round limit reached");
        let why = format!("reached round limit {max} without a violation");
        self.finish(Winner::Draw, max, moves, details, why, critical_round, hooks)
    }

    fn snapshot(
        &self,
        round: u32,
        player: Player,
        sums: &Aggregates,
        value: f64,
        reason: String,
        critical: bool,
    ) -> MoveDetail {
        MoveDetail {
            round,
            player,
            value,
            linear_sum: sums.linear,
            square_sum: sums.square,
            cube_sum: sums.cube,
            quartic_sum: sums.quartic,
            alice_capacity: self.model.capacity_of(Player::Alice, sums, round),
            bazza_capacity: self.model.capacity_of(Player::Bazza, sums, round),
            alice_limit: self.model.limit(Player::Alice, round),
            bazza_limit: self.model.limit(Player::Bazza, round),
            reason,
            critical,
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn finish(
        &self,
        winner: Winner,
        total_rounds: u32,
        moves: Vec<f64>,
        details: Vec<MoveDetail>,
        reason: String,
        critical_round: Option<u32>,
        hooks: &mut [Box<dyn GameHook>],
    ) -> GameResult {
        let prediction = self.params.predicted_winner();
        let result = GameResult {
            winner,
            total_rounds,
            moves,
            details,
            reason,
            theoretical_prediction: prediction,
            match_theory: prediction.matches(winner),
            critical_round,
            lambda: self.params.lambda(),
            alice_style: self.game.alice_style,
            bazza_style: self.game.bazza_style,
            alice_constraint: self.game.alice_constraint,
            bazza_constraint: self.game.bazza_constraint,
        };
        for h in hooks.iter_mut() {
            h.on_finish(&result);
        }
        result
    }
}
