//! Game state: phases, the doubling cube, turn records.
//!
//! ## GameState
//!
//! One value per game, advanced only through the operations in the
//! sibling `engine` and `cube` modules. Every operation takes `&self` and
//! returns a brand-new state (or an error); once `winner` is set the
//! state is terminal and read-only.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::core::{AsymmetricRoles, Dice, DiceValues, EngineError, Player, Result};
use crate::moves::MoveSequence;

/// The phases of a single game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Setup,
    Rolling,
    Moving,
    GameOver,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Setup => write!(f, "setup"),
            Phase::Rolling => write!(f, "rolling"),
            Phase::Moving => write!(f, "moving"),
            Phase::GameOver => write!(f, "game over"),
        }
    }
}

/// Which rule set the game is played under.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameVariant {
    /// Ordinary backgammon.
    Standard,
    /// The asymmetric house variant: fixed foresight/doubling roles.
    Asymmetric,
}

/// Classification of a completed game's win.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WinType {
    Normal,
    Gammon,
    Backgammon,
}

impl WinType {
    /// Stake multiplier: 1 for a normal win, 2 for a gammon, 3 for a
    /// backgammon.
    #[must_use]
    pub const fn multiplier(self) -> u32 {
        match self {
            WinType::Normal => 1,
            WinType::Gammon => 2,
            WinType::Backgammon => 3,
        }
    }
}

/// The doubling cube never passes 64.
pub const MAX_CUBE_VALUE: u32 = 64;

/// The doubling cube: face value and current owner (`None` = centered).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoublingCube {
    pub value: u32,
    pub owner: Option<Player>,
}

impl DoublingCube {
    /// A fresh centered cube at 1.
    #[must_use]
    pub const fn centered() -> Self {
        Self {
            value: 1,
            owner: None,
        }
    }

    /// Whether the cube is centered (either side may double).
    #[must_use]
    pub const fn is_centered(self) -> bool {
        self.owner.is_none()
    }
}

/// Immutable record of one completed turn.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub player: Player,
    pub dice: Dice,
    pub moves: MoveSequence,
}

/// Complete state of a single game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub(crate) variant: GameVariant,
    pub(crate) roles: Option<AsymmetricRoles>,
    pub(crate) board: Board,
    pub(crate) current_player: Player,
    pub(crate) phase: Phase,
    /// Each side's rolled-but-unplayed dice. In the asymmetric variant the
    /// opponent's entry is the foresight window; in the standard variant
    /// only the mover's entry is ever populated.
    pub(crate) pending_dice: [Option<Dice>; 2],
    /// Multiset of die values still unplayed this turn.
    pub(crate) unused_dice: DiceValues,
    pub(crate) cube: DoublingCube,
    pub(crate) stakes: u32,
    pub(crate) double_offered_this_turn: bool,
    /// The player whose double offer awaits a response, if any.
    pub(crate) pending_double: Option<Player>,
    pub(crate) move_history: Vector<Turn>,
    pub(crate) winner: Option<Player>,
    pub(crate) win_type: Option<WinType>,
    pub(crate) points_awarded: Option<u32>,
}

impl GameState {
    /// Create a fresh game in the setup phase.
    ///
    /// The asymmetric variant requires a role assignment and rejects
    /// doubling-vs-doubling at creation; the cube starts owned by the
    /// doubling-role holder, or centered when neither side holds it.
    pub fn new(variant: GameVariant, roles: Option<AsymmetricRoles>) -> Result<Self> {
        let cube_owner = match (variant, &roles) {
            (GameVariant::Standard, None) => None,
            (GameVariant::Standard, Some(_)) => {
                return Err(EngineError::rule(
                    "role assignments are only valid in the asymmetric variant",
                ));
            }
            (GameVariant::Asymmetric, Some(roles)) => {
                roles.validate()?;
                roles.doubling_holder()
            }
            (GameVariant::Asymmetric, None) => {
                return Err(EngineError::rule(
                    "the asymmetric variant requires a role assignment",
                ));
            }
        };

        Ok(Self {
            variant,
            roles,
            board: Board::standard(),
            current_player: Player::White,
            phase: Phase::Setup,
            pending_dice: [None, None],
            unused_dice: DiceValues::new(),
            cube: DoublingCube {
                value: 1,
                owner: cube_owner,
            },
            stakes: 1,
            double_offered_this_turn: false,
            pending_double: None,
            move_history: Vector::new(),
            winner: None,
            win_type: None,
            points_awarded: None,
        })
    }

    /// Create a mid-game state from an arbitrary position, entering the
    /// moving phase with the given dice. Used to set up analysis and test
    /// positions; the board must satisfy the structural invariants.
    pub fn from_position(
        variant: GameVariant,
        roles: Option<AsymmetricRoles>,
        board: Board,
        current_player: Player,
        dice: Dice,
    ) -> Result<Self> {
        board.check_invariants()?;
        let mut state = Self::new(variant, roles)?;
        state.board = board;
        state.current_player = current_player;
        state.phase = Phase::Moving;
        state.pending_dice[current_player.index()] = Some(dice);
        state.unused_dice = dice.values();
        Ok(state)
    }

    /// Create a mid-game state from an arbitrary position with the given
    /// player about to roll. Like [`GameState::from_position`] but enters
    /// the rolling phase with no dice.
    pub fn from_rolling_position(
        variant: GameVariant,
        roles: Option<AsymmetricRoles>,
        board: Board,
        current_player: Player,
    ) -> Result<Self> {
        board.check_invariants()?;
        let mut state = Self::new(variant, roles)?;
        state.board = board;
        state.current_player = current_player;
        state.phase = Phase::Rolling;
        Ok(state)
    }

    /// Replace the doubling cube. Position-setup helper for resuming a
    /// game mid-match.
    #[must_use]
    pub fn with_cube(mut self, cube: DoublingCube) -> Self {
        self.cube = cube;
        self
    }

    // === Queries ===

    /// The rule set this game is played under.
    #[must_use]
    pub fn variant(&self) -> GameVariant {
        self.variant
    }

    /// The asymmetric role assignment, if any.
    #[must_use]
    pub fn roles(&self) -> Option<AsymmetricRoles> {
        self.roles
    }

    /// The playing surface.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The player to act.
    #[must_use]
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// The current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// A side's rolled-but-unplayed dice, if visible.
    #[must_use]
    pub fn dice_of(&self, player: Player) -> Option<Dice> {
        self.pending_dice[player.index()]
    }

    /// Die values still unplayed this turn.
    #[must_use]
    pub fn unused_dice(&self) -> &[u8] {
        &self.unused_dice
    }

    /// The doubling cube.
    #[must_use]
    pub fn cube(&self) -> DoublingCube {
        self.cube
    }

    /// The stakes agreed so far (updated when a double is accepted).
    #[must_use]
    pub fn stakes(&self) -> u32 {
        self.stakes
    }

    /// Whether a double has already been offered this turn.
    #[must_use]
    pub fn double_offered_this_turn(&self) -> bool {
        self.double_offered_this_turn
    }

    /// The offerer of the double awaiting a response, if any.
    #[must_use]
    pub fn pending_double(&self) -> Option<Player> {
        self.pending_double
    }

    /// Completed turns, oldest first.
    #[must_use]
    pub fn move_history(&self) -> &Vector<Turn> {
        &self.move_history
    }

    /// The winner, once the game is over.
    #[must_use]
    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    /// How the game was won. `None` while in play, and `None` for a win
    /// by declined double.
    #[must_use]
    pub fn win_type(&self) -> Option<WinType> {
        self.win_type
    }

    /// Points the winner earned, once the game is over.
    #[must_use]
    pub fn points_awarded(&self) -> Option<u32> {
        self.points_awarded
    }

    /// Whether the game has ended.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Verify the structural invariants of the state.
    pub fn check_invariants(&self) -> Result<()> {
        self.board.check_invariants()?;
        if self.winner.is_some() != (self.phase == Phase::GameOver) {
            return Err(EngineError::state_consistency(
                "winner and game-over phase disagree",
            ));
        }
        if self.unused_dice.len() > 4 {
            return Err(EngineError::state_consistency(
                "more than four unused dice",
            ));
        }
        Ok(())
    }

    /// Guard shared by every mutating operation.
    pub(crate) fn ensure_not_over(&self, operation: &'static str) -> Result<()> {
        if self.phase == Phase::GameOver {
            return Err(EngineError::phase(operation, self.phase));
        }
        Ok(())
    }
}
