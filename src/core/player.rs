//! The two sides of a backgammon game.
//!
//! Backgammon is strictly two-sided, so `Player` is a plain enum rather
//! than a numeric identifier. `White`'s own point numbering coincides with
//! the fixed board frame; `Black`'s is mirrored (see the board module).

use serde::{Deserialize, Serialize};

/// One of the two players.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    White,
    Black,
}

impl Player {
    /// The opposing player.
    #[must_use]
    pub const fn opponent(self) -> Player {
        match self {
            Player::White => Player::Black,
            Player::Black => Player::White,
        }
    }

    /// Index for per-player arrays: White = 0, Black = 1.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Player::White => 0,
            Player::Black => 1,
        }
    }

    /// Both players, White first.
    pub fn both() -> impl Iterator<Item = Player> {
        [Player::White, Player::Black].into_iter()
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Player::White => write!(f, "white"),
            Player::Black => write!(f, "black"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent() {
        assert_eq!(Player::White.opponent(), Player::Black);
        assert_eq!(Player::Black.opponent(), Player::White);
        assert_eq!(Player::White.opponent().opponent(), Player::White);
    }

    #[test]
    fn test_index() {
        assert_eq!(Player::White.index(), 0);
        assert_eq!(Player::Black.index(), 1);
    }

    #[test]
    fn test_both() {
        let players: Vec<_> = Player::both().collect();
        assert_eq!(players, vec![Player::White, Player::Black]);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Player::White), "white");
        assert_eq!(format!("{}", Player::Black), "black");
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&Player::Black).unwrap();
        let back: Player = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Player::Black);
    }
}
