//! # gammon-core
//!
//! An authoritative backgammon rules engine and match state machine.
//!
//! ## Design Principles
//!
//! 1. **Pure transitions**: every operation takes an immutable prior
//!    state and returns a brand-new state or an explicit error. No
//!    interior mutability, no I/O, no locking: concurrent games never
//!    interact, and serializing mutating calls per game is the caller's
//!    job.
//!
//! 2. **One legality oracle**: `GameState::legal_moves` backs both
//!    authoritative validation and move previews. Bots and transports
//!    submit only sequences drawn from its output.
//!
//! 3. **No ambient randomness**: dice come from an injected, seedable
//!    [`DiceRng`], so whole games and matches replay deterministically.
//!
//! ## Architecture
//!
//! - **Board Model**: 26 checker slots plus off accounting, with a
//!    fixed-frame/own-perspective coordinate mapping between the players.
//! - **Move Generator**: exhaustive depth-first search producing every
//!    maximal legal move sequence, with the higher-die tie-break.
//! - **Game State Machine**: setup → rolling → moving → game over, with
//!    win classification (normal/gammon/backgammon) and the asymmetric
//!    foresight/doubling role variant.
//! - **Doubling Cube**: offer/accept/decline under three ownership
//!    regimes.
//! - **Match State**: score tracking, the Crawford rule, and the
//!    match-level doubling gates.
//!
//! ## Modules
//!
//! - `core`: players, dice, deterministic RNG, roles, errors
//! - `board`: checker-stack storage and board predicates
//! - `moves`: move representation and legal-move generation
//! - `game`: the per-game state machine and cube operations
//! - `matchplay`: match configuration, scoring, Crawford handling

pub mod board;
pub mod core;
pub mod game;
pub mod matchplay;
pub mod moves;

// Re-export commonly used types
pub use crate::core::{
    AsymmetricRoles, Dice, DiceRng, DiceRngState, DiceValues, EngineError, Player, Result, Role,
};

pub use crate::board::{Board, CheckerStack, BEAR_OFF, CHECKERS_PER_PLAYER, OPPONENT_BAR, OWN_BAR};

pub use crate::moves::{legal_sequences, sequences_match, Move, MoveSequence};

pub use crate::game::{
    DoublingCube, GameState, GameVariant, Phase, Turn, WinType, MAX_CUBE_VALUE,
};

pub use crate::matchplay::{MatchConfig, MatchState, MatchType};
