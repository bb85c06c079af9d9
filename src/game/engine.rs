//! Turn and phase transitions: first roll, turn rolls, move application,
//! winner detection.
//!
//! Every operation takes the prior state by `&self` and returns a new
//! state; dice come from an injected [`DiceRng`] so whole games replay
//! deterministically from a seed.

use tracing::debug;

use crate::core::{DiceRng, EngineError, Player, Result, Role};
use crate::moves::{self, Move, MoveSequence};

use super::state::{GameState, GameVariant, Phase, Turn, WinType};

impl GameState {
    /// Decide who moves first and enter the rolling phase.
    ///
    /// Standard: each player rolls one die, ties re-roll, the higher die
    /// moves first. Asymmetric: the lone foresight holder moves first, or
    /// a coin flip when both hold foresight; the cube owner is
    /// reconfirmed from the role assignment.
    pub fn roll_for_first(&self, rng: &mut DiceRng) -> Result<GameState> {
        if self.phase != Phase::Setup {
            return Err(EngineError::phase("roll_for_first", self.phase));
        }

        let mut next = self.clone();
        let first = match self.variant {
            GameVariant::Standard => loop {
                let white = rng.roll_die();
                let black = rng.roll_die();
                if white != black {
                    break if white > black {
                        Player::White
                    } else {
                        Player::Black
                    };
                }
            },
            GameVariant::Asymmetric => {
                let roles = self.expect_roles()?;
                next.cube.owner = roles.doubling_holder();
                match roles.lone_foresight_holder() {
                    Some(player) => player,
                    None => rng.coin_flip(),
                }
            }
        };

        next.current_player = first;
        next.phase = Phase::Rolling;
        debug!(player = %first, "first mover decided");
        Ok(next)
    }

    /// Roll the mover's dice and enter the moving phase.
    ///
    /// The opening turn of a game never starts on a double (re-rolled
    /// until unequal). A foresight-role mover also rolls the opponent's
    /// upcoming dice, so both sides' next dice are visible; pre-rolled
    /// dice are reused rather than rolled again.
    pub fn roll_turn(&self, rng: &mut DiceRng) -> Result<GameState> {
        if self.phase != Phase::Rolling {
            return Err(EngineError::phase("roll_turn", self.phase));
        }
        if self.pending_double.is_some() {
            return Err(EngineError::rule("a double offer is awaiting a response"));
        }

        let mut next = self.clone();
        let mover = self.current_player;
        let opening = self.move_history.is_empty();

        let own = match next.pending_dice[mover.index()] {
            Some(dice) => dice,
            None => {
                let dice = if opening {
                    rng.roll_non_double()
                } else {
                    rng.roll_dice()
                };
                next.pending_dice[mover.index()] = Some(dice);
                dice
            }
        };

        if next.variant == GameVariant::Asymmetric {
            let roles = next.expect_roles()?;
            if roles.role_of(mover) == Role::Foresight {
                let opponent = mover.opponent();
                if next.pending_dice[opponent.index()].is_none() {
                    next.pending_dice[opponent.index()] = Some(rng.roll_dice());
                }
            }
        }

        next.unused_dice = own.values();
        next.phase = Phase::Moving;
        debug!(player = %mover, dice = %own, "turn dice rolled");
        Ok(next)
    }

    /// Every maximal legal move sequence for the current mover, or an
    /// empty list outside the moving phase.
    ///
    /// This is the same oracle `make_move` validates against.
    #[must_use]
    pub fn legal_moves(&self) -> Vec<MoveSequence> {
        if self.phase != Phase::Moving || self.unused_dice.is_empty() {
            return Vec::new();
        }
        moves::legal_sequences(&self.board, self.current_player, &self.unused_dice)
    }

    /// Play a move sequence (empty = pass, legal only when no move is
    /// possible) and advance the state machine.
    ///
    /// A non-empty sequence must be set-equal, ignoring order, to one of
    /// the sequences `legal_moves` returns. The moves are applied in the
    /// oracle's order, so a valid set submitted in an unplayable order
    /// still applies cleanly. The `rng` feeds the asymmetric variant's
    /// pre-rolling on turn handover; the standard variant draws nothing
    /// from it here.
    pub fn make_move(&self, sequence: &[Move], rng: &mut DiceRng) -> Result<GameState> {
        if self.phase != Phase::Moving {
            return Err(EngineError::phase("make_move", self.phase));
        }
        if self.unused_dice.is_empty() {
            return Err(EngineError::phase("make_move without unused dice", self.phase));
        }
        if self.pending_double.is_some() {
            return Err(EngineError::rule("a double offer is awaiting a response"));
        }

        let legal = self.legal_moves();
        let player = self.current_player;
        let mut next = self.clone();

        let played: MoveSequence = if sequence.is_empty() {
            if !legal.is_empty() {
                return Err(EngineError::rule("must play a legal move"));
            }
            MoveSequence::new()
        } else {
            let Some(matched) = legal
                .iter()
                .find(|candidate| moves::sequences_match(candidate.as_slice(), sequence))
            else {
                return Err(EngineError::rule("move sequence is not a legal play"));
            };
            let matched = matched.clone();
            for mv in &matched {
                next.board.apply_move(player, mv.from, mv.to);
                let Some(consumed) = next.unused_dice.iter().position(|&die| die == mv.die)
                else {
                    return Err(EngineError::state_consistency(format!(
                        "die {} reported as consumed was not present",
                        mv.die
                    )));
                };
                next.unused_dice.remove(consumed);
            }
            matched
        };

        // Dice left and still a play to make: the turn continues.
        if !played.is_empty()
            && !next.unused_dice.is_empty()
            && !moves::legal_sequences(&next.board, player, &next.unused_dice).is_empty()
        {
            return Ok(next);
        }

        next.finalize_turn(player, played, rng)?;
        Ok(next)
    }

    fn finalize_turn(
        &mut self,
        player: Player,
        moves_played: MoveSequence,
        rng: &mut DiceRng,
    ) -> Result<()> {
        let dice = self.pending_dice[player.index()]
            .take()
            .ok_or_else(|| EngineError::state_consistency("finishing a turn with no rolled dice"))?;
        self.unused_dice.clear();
        self.move_history.push_back(Turn {
            player,
            dice,
            moves: moves_played,
        });

        if self.board.has_borne_off_all(player) {
            let win_type = self.classify_win(player);
            let points = self.cube.value * win_type.multiplier();
            self.winner = Some(player);
            self.win_type = Some(win_type);
            self.points_awarded = Some(points);
            self.phase = Phase::GameOver;
            debug!(winner = %player, ?win_type, points, "game over");
            return Ok(());
        }

        let opponent = player.opponent();
        self.current_player = opponent;
        self.double_offered_this_turn = false;

        match self.variant {
            GameVariant::Standard => {
                self.phase = Phase::Rolling;
            }
            GameVariant::Asymmetric => {
                let roles = self.expect_roles()?;
                if roles.is_double_foresight() && self.pending_dice[player.index()].is_none() {
                    // Both sides stay permanently pre-rolled.
                    self.pending_dice[player.index()] = Some(rng.roll_dice());
                }
                match self.pending_dice[opponent.index()] {
                    Some(dice) => {
                        self.unused_dice = dice.values();
                        self.phase = Phase::Moving;
                    }
                    None => {
                        self.phase = Phase::Rolling;
                    }
                }
            }
        }
        Ok(())
    }

    /// Backgammon if the loser has borne off nothing and still has a
    /// checker on the bar or in the winner's home board; gammon if the
    /// loser has merely borne off nothing; otherwise a normal win.
    fn classify_win(&self, winner: Player) -> WinType {
        let loser = winner.opponent();
        if self.board.off_count(loser) > 0 {
            return WinType::Normal;
        }
        if self.board.bar_count(loser) > 0 || self.board.opponent_checkers_in_home_of(winner) > 0 {
            WinType::Backgammon
        } else {
            WinType::Gammon
        }
    }

    pub(crate) fn expect_roles(&self) -> Result<crate::core::AsymmetricRoles> {
        self.roles
            .ok_or_else(|| EngineError::state_consistency("asymmetric game without roles"))
    }
}
