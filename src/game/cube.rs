//! Doubling cube offers and responses.
//!
//! Offering doubles the cube immediately; ownership only changes when the
//! opponent accepts. Declining concedes the game at the pre-double value.
//! The asymmetric variant replaces the ownership check with the fixed
//! doubling role where one is assigned.

use tracing::debug;

use crate::core::{EngineError, Player, Result};

use super::state::{GameState, GameVariant, Phase, MAX_CUBE_VALUE};

impl GameState {
    fn validate_double_offer(&self, player: Player) -> Result<()> {
        self.ensure_not_over("offer_double")?;
        if self.pending_double.is_some() {
            return Err(EngineError::rule("a double offer is already pending"));
        }
        if self.cube.value >= MAX_CUBE_VALUE {
            return Err(EngineError::rule("the cube is already at 64"));
        }

        match self.variant {
            GameVariant::Standard => {
                if self.phase != Phase::Rolling {
                    return Err(EngineError::phase("offer_double", self.phase));
                }
                self.validate_cube_ownership(player)?;
            }
            GameVariant::Asymmetric => {
                if !matches!(self.phase, Phase::Rolling | Phase::Moving) {
                    return Err(EngineError::phase("offer_double", self.phase));
                }
                let roles = self.expect_roles()?;
                match roles.doubling_holder() {
                    Some(holder) => {
                        if player != holder {
                            return Err(EngineError::rule(
                                "only the doubling-role holder may offer a double",
                            ));
                        }
                        if self.double_offered_this_turn {
                            return Err(EngineError::rule(
                                "a double was already offered this turn",
                            ));
                        }
                    }
                    None => self.validate_cube_ownership(player)?,
                }
            }
        }
        Ok(())
    }

    fn validate_cube_ownership(&self, player: Player) -> Result<()> {
        if player != self.current_player {
            return Err(EngineError::rule("only the player to move may offer a double"));
        }
        if !(self.cube.is_centered() || self.cube.owner == Some(player)) {
            return Err(EngineError::rule("the cube is owned by the opponent"));
        }
        Ok(())
    }

    /// Whether `player` could legally offer a double right now.
    ///
    /// Game-level legality only; match-level gates (the Crawford game,
    /// dead cubes) live on `MatchState::can_offer_double_now`.
    #[must_use]
    pub fn can_offer_double(&self, player: Player) -> bool {
        self.validate_double_offer(player).is_ok()
    }

    /// Offer a double: the cube value doubles at once, ownership is
    /// untouched, and the opponent owes a response before play continues.
    pub fn offer_double(&self, player: Player) -> Result<GameState> {
        self.validate_double_offer(player)?;

        let mut next = self.clone();
        next.cube.value *= 2;
        next.pending_double = Some(player);
        next.double_offered_this_turn = true;
        debug!(%player, value = next.cube.value, "double offered");
        Ok(next)
    }

    /// Accept or decline the pending double.
    ///
    /// Declining ends the game immediately: the offerer wins the cube
    /// value from before this double (halved, floored, minimum 1).
    /// Accepting raises the stakes to the new value and passes cube
    /// ownership to the responder, except under a fixed doubling role,
    /// where ownership never moves.
    pub fn respond_to_double(&self, accept: bool) -> Result<GameState> {
        self.ensure_not_over("respond_to_double")?;
        let Some(offerer) = self.pending_double else {
            return Err(EngineError::rule("no double offer to respond to"));
        };

        let responder = offerer.opponent();
        let mut next = self.clone();
        next.pending_double = None;

        if accept {
            next.stakes = next.cube.value;
            let fixed_owner = next.roles.and_then(|roles| roles.doubling_holder());
            next.cube.owner = Some(fixed_owner.unwrap_or(responder));
            debug!(%responder, stakes = next.stakes, "double accepted");
        } else {
            let points = (next.cube.value / 2).max(1);
            next.winner = Some(offerer);
            next.points_awarded = Some(points);
            next.phase = Phase::GameOver;
            debug!(winner = %offerer, points, "double declined");
        }
        Ok(next)
    }
}
