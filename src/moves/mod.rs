//! Moves and legal-move generation.
//!
//! A [`Move`] is a single checker relocation in the mover's own
//! perspective; a turn plays a [`MoveSequence`] of up to four of them.
//! [`generator::legal_sequences`] is the single legality oracle: both
//! authoritative validation and any move preview go through it.

pub mod generator;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::BEAR_OFF;

pub use generator::legal_sequences;

/// A single checker move in the mover's own perspective.
///
/// `from == 0` is a bar entry; `to == -1` ([`BEAR_OFF`]) bears the checker
/// off. `hit` records whether the destination held an opposing blot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: u8,
    pub to: i8,
    pub die: u8,
    pub hit: bool,
}

impl Move {
    /// Create a move.
    #[must_use]
    pub const fn new(from: u8, to: i8, die: u8, hit: bool) -> Self {
        Self { from, to, die, hit }
    }

    /// Whether this move bears a checker off.
    #[must_use]
    pub const fn is_bear_off(self) -> bool {
        self.to == BEAR_OFF
    }

    /// Whether this move enters a checker from the bar.
    #[must_use]
    pub const fn is_bar_entry(self) -> bool {
        self.from == 0
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_bar_entry() {
            write!(f, "bar/{}", self.to)?;
        } else if self.is_bear_off() {
            write!(f, "{}/off", self.from)?;
        } else {
            write!(f, "{}/{}", self.from, self.to)?;
        }
        if self.hit {
            write!(f, "*")?;
        }
        Ok(())
    }
}

/// An ordered run of moves played with one roll: at most four (a double).
pub type MoveSequence = SmallVec<[Move; 4]>;

/// Order-insensitive equality of two move runs.
///
/// Each move of `a` must pair off with a distinct equal move of `b`;
/// duplicates (a double moving two checkers the same way) are respected.
#[must_use]
pub fn sequences_match(a: &[Move], b: &[Move]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut used: SmallVec<[bool; 4]> = SmallVec::from_elem(false, b.len());
    'outer: for mv in a {
        for (i, other) in b.iter().enumerate() {
            if !used[i] && mv == other {
                used[i] = true;
                continue 'outer;
            }
        }
        return false;
    }
    true
}
