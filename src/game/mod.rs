//! The single-game state machine: phases, turns, moves, the cube.
//!
//! `state` holds the value types, `engine` the roll/move transitions, and
//! `cube` the doubling operations. Everything mutating is expressed as
//! `&self -> Result<GameState>`.

pub mod cube;
pub mod engine;
pub mod state;

pub use state::{
    DoublingCube, GameState, GameVariant, Phase, Turn, WinType, MAX_CUBE_VALUE,
};
