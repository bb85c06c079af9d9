//! Core value types: players, dice, RNG, roles, errors.
//!
//! Everything here is a plain serializable value; the game and match state
//! machines are built on top of these in the sibling modules.

pub mod dice;
pub mod error;
pub mod player;
pub mod rng;
pub mod roles;

pub use dice::{Dice, DiceValues};
pub use error::{EngineError, Result};
pub use player::Player;
pub use rng::{DiceRng, DiceRngState};
pub use roles::{AsymmetricRoles, Role};
