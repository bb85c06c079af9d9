//! Roles for the asymmetric variant.
//!
//! The asymmetric house rule splits two powers into fixed player roles:
//! a `Foresight` player sees both sides' upcoming dice, and a `Doubling`
//! player holds the cube permanently. The roles are mutually exclusive per
//! player and at most one side may hold `Doubling`; both holding
//! `Foresight` is the symmetric "open dice" pairing.

use serde::{Deserialize, Serialize};

use super::error::{EngineError, Result};
use super::player::Player;

/// A single player's role in the asymmetric variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Sees the opponent's upcoming dice.
    Foresight,
    /// Holds the doubling cube for the whole game.
    Doubling,
}

/// Per-player role assignment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AsymmetricRoles {
    pub white: Role,
    pub black: Role,
}

impl AsymmetricRoles {
    /// Create a role assignment, rejecting doubling-vs-doubling.
    pub fn new(white: Role, black: Role) -> Result<Self> {
        let roles = Self { white, black };
        roles.validate()?;
        Ok(roles)
    }

    /// The single validity predicate: not both players may hold `Doubling`.
    pub fn validate(&self) -> Result<()> {
        if self.white == Role::Doubling && self.black == Role::Doubling {
            return Err(EngineError::rule(
                "both players cannot hold the doubling role",
            ));
        }
        Ok(())
    }

    /// The role held by a player.
    #[must_use]
    pub fn role_of(&self, player: Player) -> Role {
        match player {
            Player::White => self.white,
            Player::Black => self.black,
        }
    }

    /// The player holding `Doubling`, if any.
    #[must_use]
    pub fn doubling_holder(&self) -> Option<Player> {
        Player::both().find(|&p| self.role_of(p) == Role::Doubling)
    }

    /// The player holding `Foresight`, if exactly one does.
    #[must_use]
    pub fn lone_foresight_holder(&self) -> Option<Player> {
        match (self.white, self.black) {
            (Role::Foresight, Role::Doubling) => Some(Player::White),
            (Role::Doubling, Role::Foresight) => Some(Player::Black),
            _ => None,
        }
    }

    /// Whether both players hold `Foresight`.
    #[must_use]
    pub fn is_double_foresight(&self) -> bool {
        self.white == Role::Foresight && self.black == Role::Foresight
    }
}
