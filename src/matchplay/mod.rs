//! Match state: score tracking, the Crawford rule, doubling gates.
//!
//! A `MatchState` is created once per match and updated exactly once per
//! completed game with the winner and points the game awarded. It owns
//! the match-level doubling gates; game-level cube legality stays on
//! `GameState`.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{AsymmetricRoles, EngineError, Player, Result};
use crate::game::{GameState, GameVariant};

/// Whether the match plays to a target score or indefinitely.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchType {
    /// Money session: no target, no Crawford rule.
    Unlimited,
    /// First to the target score wins the match.
    Limited,
}

/// Fixed configuration of a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    pub match_type: MatchType,
    /// Required for limited matches, absent for unlimited ones.
    pub target_score: Option<u32>,
    pub variant: GameVariant,
    /// Required for the asymmetric variant, absent otherwise.
    pub roles: Option<AsymmetricRoles>,
}

impl MatchConfig {
    /// An unlimited standard-variant match.
    #[must_use]
    pub fn unlimited() -> Self {
        Self {
            match_type: MatchType::Unlimited,
            target_score: None,
            variant: GameVariant::Standard,
            roles: None,
        }
    }

    /// A standard-variant match to the given target score.
    #[must_use]
    pub fn to_target(target: u32) -> Self {
        Self {
            match_type: MatchType::Limited,
            target_score: Some(target),
            variant: GameVariant::Standard,
            roles: None,
        }
    }

    /// Switch the match to the asymmetric variant with the given roles.
    #[must_use]
    pub fn with_roles(mut self, roles: AsymmetricRoles) -> Self {
        self.variant = GameVariant::Asymmetric;
        self.roles = Some(roles);
        self
    }

    fn validate(&self) -> Result<()> {
        match (self.match_type, self.target_score) {
            (MatchType::Limited, None) => {
                return Err(EngineError::rule("a limited match requires a target score"));
            }
            (MatchType::Limited, Some(0)) => {
                return Err(EngineError::rule("the target score must be positive"));
            }
            (MatchType::Unlimited, Some(_)) => {
                return Err(EngineError::rule(
                    "an unlimited match cannot have a target score",
                ));
            }
            _ => {}
        }
        match (self.variant, &self.roles) {
            (GameVariant::Asymmetric, Some(roles)) => roles.validate()?,
            (GameVariant::Asymmetric, None) => {
                return Err(EngineError::rule(
                    "the asymmetric variant requires a role assignment",
                ));
            }
            (GameVariant::Standard, Some(_)) => {
                return Err(EngineError::rule(
                    "role assignments are only valid in the asymmetric variant",
                ));
            }
            (GameVariant::Standard, None) => {}
        }
        Ok(())
    }
}

/// Running state of a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    config: MatchConfig,
    score: [u32; 2],
    current_game: u32,
    match_winner: Option<Player>,
    crawford_game: bool,
    post_crawford: bool,
}

impl MatchState {
    /// Create a fresh match at 0-0, validating the configuration.
    pub fn new(config: MatchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            score: [0, 0],
            current_game: 1,
            match_winner: None,
            crawford_game: false,
            post_crawford: false,
        })
    }

    /// The fixed match configuration.
    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// A player's score.
    #[must_use]
    pub fn score(&self, player: Player) -> u32 {
        self.score[player.index()]
    }

    /// Index of the game about to be (or being) played, starting at 1.
    #[must_use]
    pub fn current_game(&self) -> u32 {
        self.current_game
    }

    /// The match winner, once decided.
    #[must_use]
    pub fn match_winner(&self) -> Option<Player> {
        self.match_winner
    }

    /// Whether the upcoming game is the Crawford game (doubling barred).
    #[must_use]
    pub fn is_crawford_game(&self) -> bool {
        self.crawford_game
    }

    /// Whether the Crawford game has already been played.
    #[must_use]
    pub fn is_post_crawford(&self) -> bool {
        self.post_crawford
    }

    /// Whether the match has ended.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.match_winner.is_some()
    }

    /// Start a game under this match's configuration.
    pub fn create_game(&self) -> Result<GameState> {
        if self.is_over() {
            return Err(EngineError::state_consistency(
                "cannot start a game in a finished match",
            ));
        }
        GameState::new(self.config.variant, self.config.roles)
    }

    /// Record a completed game: add the points, detect a match winner,
    /// and maintain the Crawford flags.
    ///
    /// The game immediately following either player's first arrival at
    /// `target - 1` is the Crawford game; the game after that sets
    /// `post_crawford` permanently.
    pub fn update_match_score(&self, winner: Player, points: u32) -> Result<MatchState> {
        if self.is_over() {
            return Err(EngineError::state_consistency(
                "the match already has a winner",
            ));
        }
        if points == 0 {
            return Err(EngineError::rule("a game awards at least one point"));
        }

        let mut next = self.clone();
        next.score[winner.index()] += points;
        next.current_game += 1;

        if let Some(target) = self.config.target_score {
            if next.score[winner.index()] >= target {
                next.match_winner = Some(winner);
                next.crawford_game = false;
                debug!(winner = %winner, "match over");
                return Ok(next);
            }
            if next.crawford_game {
                // The Crawford game was just played.
                next.crawford_game = false;
                next.post_crawford = true;
            } else if !next.post_crawford && next.score[winner.index()] == target - 1 {
                next.crawford_game = true;
                debug!(game = next.current_game, "crawford game ahead");
            }
        }
        Ok(next)
    }

    /// Match-level doubling gate for a cube currently showing
    /// `cube_value`: barred during the Crawford game, always open in
    /// unlimited matches, and barred in limited matches once winning at
    /// the current value already clinches the match (a dead cube).
    #[must_use]
    pub fn can_double_in_match(&self, player: Player, cube_value: u32) -> bool {
        if self.is_over() || self.crawford_game {
            return false;
        }
        match self.config.target_score {
            None => true,
            Some(target) => self.score(player) + cube_value < target,
        }
    }

    /// Whether `player` may offer a double right now, combining the
    /// match-level gate with the game-level cube rules. In limited
    /// matches a double additionally may not be offered before any move
    /// has been played in the current game.
    #[must_use]
    pub fn can_offer_double_now(&self, game: &GameState, player: Player) -> bool {
        if !self.can_double_in_match(player, game.cube().value) {
            return false;
        }
        if self.config.target_score.is_some() && game.move_history().is_empty() {
            return false;
        }
        game.can_offer_double(player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Role;

    #[test]
    fn test_new_match() {
        let state = MatchState::new(MatchConfig::to_target(5)).unwrap();

        assert_eq!(state.score(Player::White), 0);
        assert_eq!(state.score(Player::Black), 0);
        assert_eq!(state.current_game(), 1);
        assert!(!state.is_crawford_game());
        assert!(!state.is_over());
    }

    #[test]
    fn test_config_validation() {
        let mut config = MatchConfig::to_target(5);
        config.target_score = None;
        assert!(MatchState::new(config).is_err());

        let mut config = MatchConfig::unlimited();
        config.target_score = Some(7);
        assert!(MatchState::new(config).is_err());

        assert!(MatchState::new(MatchConfig::to_target(0)).is_err());
    }

    #[test]
    fn test_invalid_roles_rejected_at_creation() {
        let mut config = MatchConfig::unlimited();
        config.variant = GameVariant::Asymmetric;
        config.roles = Some(AsymmetricRoles {
            white: Role::Doubling,
            black: Role::Doubling,
        });
        assert!(matches!(
            MatchState::new(config),
            Err(EngineError::Rule { .. })
        ));
    }

    #[test]
    fn test_score_accumulates_and_game_advances() {
        let state = MatchState::new(MatchConfig::to_target(7))
            .unwrap()
            .update_match_score(Player::White, 2)
            .unwrap()
            .update_match_score(Player::Black, 1)
            .unwrap();

        assert_eq!(state.score(Player::White), 2);
        assert_eq!(state.score(Player::Black), 1);
        assert_eq!(state.current_game(), 3);
    }

    #[test]
    fn test_match_winner_at_target() {
        let state = MatchState::new(MatchConfig::to_target(3))
            .unwrap()
            .update_match_score(Player::Black, 2)
            .unwrap()
            .update_match_score(Player::Black, 2)
            .unwrap();

        assert_eq!(state.match_winner(), Some(Player::Black));
        assert!(state.is_over());
        assert!(state.update_match_score(Player::White, 1).is_err());
        assert!(state.create_game().is_err());
    }

    #[test]
    fn test_crawford_flag_raised_at_target_minus_one() {
        let state = MatchState::new(MatchConfig::to_target(5))
            .unwrap()
            .update_match_score(Player::White, 4)
            .unwrap();

        assert!(state.is_crawford_game());
        assert!(!state.is_post_crawford());
    }

    #[test]
    fn test_crawford_game_then_post_crawford() {
        let state = MatchState::new(MatchConfig::to_target(5))
            .unwrap()
            .update_match_score(Player::White, 4)
            .unwrap()
            // Black wins the Crawford game.
            .update_match_score(Player::Black, 1)
            .unwrap();

        assert!(!state.is_crawford_game());
        assert!(state.is_post_crawford());

        // No second Crawford game, even when black later reaches 4.
        let state = state
            .update_match_score(Player::Black, 2)
            .unwrap()
            .update_match_score(Player::Black, 1)
            .unwrap();
        assert_eq!(state.score(Player::Black), 4);
        assert!(!state.is_crawford_game());
    }

    #[test]
    fn test_doubling_barred_in_crawford_game() {
        let state = MatchState::new(MatchConfig::to_target(5))
            .unwrap()
            .update_match_score(Player::White, 4)
            .unwrap();

        for player in Player::both() {
            assert!(!state.can_double_in_match(player, 1));
            assert!(!state.can_double_in_match(player, 64));
        }
    }

    #[test]
    fn test_dead_cube_in_limited_match() {
        let state = MatchState::new(MatchConfig::to_target(7))
            .unwrap()
            .update_match_score(Player::White, 4)
            .unwrap();

        // White at 4 of 7: winning at cube value 4 already clinches the
        // match, so white may not double at 4, but black may.
        assert!(state.can_double_in_match(Player::White, 2));
        assert!(!state.can_double_in_match(Player::White, 4));
        assert!(state.can_double_in_match(Player::Black, 4));
    }

    #[test]
    fn test_unlimited_match_never_gates() {
        let state = MatchState::new(MatchConfig::unlimited())
            .unwrap()
            .update_match_score(Player::White, 32)
            .unwrap();

        assert!(state.can_double_in_match(Player::White, 32));
        assert!(state.match_winner().is_none());
        assert!(!state.is_crawford_game());
    }

    #[test]
    fn test_no_double_before_first_move_in_limited_match() {
        let matchstate = MatchState::new(MatchConfig::to_target(7)).unwrap();
        let game = matchstate
            .create_game()
            .unwrap()
            .roll_for_first(&mut crate::core::DiceRng::new(4))
            .unwrap();

        // Empty history: no double yet in a limited match.
        assert!(!matchstate.can_offer_double_now(&game, game.current_player()));
    }

    #[test]
    fn test_asymmetric_match_creates_role_games() {
        let roles = AsymmetricRoles::new(Role::Doubling, Role::Foresight).unwrap();
        let matchstate = MatchState::new(MatchConfig::unlimited().with_roles(roles)).unwrap();
        let game = matchstate.create_game().unwrap();

        assert_eq!(game.variant(), GameVariant::Asymmetric);
        assert_eq!(game.cube().owner, Some(Player::White));
    }

    #[test]
    fn test_serialization_round_trip() {
        let state = MatchState::new(MatchConfig::to_target(11))
            .unwrap()
            .update_match_score(Player::Black, 2)
            .unwrap();

        let json = serde_json::to_string(&state).unwrap();
        let back: MatchState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
