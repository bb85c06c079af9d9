//! Board model: checker stacks, bars, and borne-off accounting.
//!
//! ## Coordinates
//!
//! The board stores 26 slots in the **fixed frame**, which coincides with
//! White's own numbering: slot 0 is White's bar, slots 1..=24 the points,
//! slot 25 Black's bar. Every public accessor takes points in the given
//! player's **own perspective** (0 = own bar, 1..=24 descending toward the
//! home board 1..=6, 25 = opponent's bar) and translates via
//! [`Board::fixed_point`]: Black's own point `p` is fixed `25 - p`, a
//! mapping that also swaps the two bars.
//!
//! Borne-off checkers leave the slots entirely and are counted per player,
//! so for each player `on_board + on_bar + off == 15` at all times
//! ([`Board::check_invariants`]).

use serde::{Deserialize, Serialize};

use crate::core::{EngineError, Player, Result};

/// Own-perspective point of the mover's bar.
pub const OWN_BAR: u8 = 0;

/// Own-perspective point of the opponent's bar.
pub const OPPONENT_BAR: u8 = 25;

/// Sentinel destination encoding a borne-off checker inside a move.
pub const BEAR_OFF: i8 = -1;

/// Checkers each player starts (and always has) in play.
pub const CHECKERS_PER_PLAYER: u8 = 15;

/// A stack of same-owner checkers on a single slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckerStack {
    pub owner: Player,
    pub count: u8,
}

impl CheckerStack {
    /// Create a stack. `count` must be at least 1.
    #[must_use]
    pub const fn new(owner: Player, count: u8) -> Self {
        Self { owner, count }
    }
}

/// The playing surface: 26 slots plus per-player borne-off counts.
///
/// `Board` is `Copy`: transitions clone it outright rather than sharing it
/// between two live states.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    slots: [Option<CheckerStack>; 26],
    off: [u8; 2],
}

impl Board {
    /// An empty board with no checkers anywhere.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            slots: [None; 26],
            off: [0; 2],
        }
    }

    /// The standard starting position: per player, from their own
    /// perspective, 2 on the 24-point, 5 on the 13-point, 3 on the
    /// 8-point and 5 on the 6-point.
    #[must_use]
    pub fn standard() -> Self {
        let mut board = Self::empty();
        for player in Player::both() {
            for (point, count) in [(24, 2), (13, 5), (8, 3), (6, 5)] {
                board.place(player, point, count);
            }
        }
        board
    }

    /// Translate a player's own-perspective point to a fixed-frame slot.
    ///
    /// White's frame is the fixed frame; Black's is mirrored (`25 - p`),
    /// which maps each side's bar onto the other's slot.
    #[must_use]
    pub fn fixed_point(player: Player, own_point: u8) -> usize {
        debug_assert!(own_point <= 25);
        match player {
            Player::White => own_point as usize,
            Player::Black => 25 - own_point as usize,
        }
    }

    /// The stack on a fixed-frame slot.
    #[must_use]
    pub fn stack_at(&self, fixed: usize) -> Option<CheckerStack> {
        self.slots[fixed]
    }

    /// The player's own checkers on one of their own-perspective points.
    #[must_use]
    pub fn checkers_at(&self, player: Player, own_point: u8) -> u8 {
        match self.slots[Self::fixed_point(player, own_point)] {
            Some(stack) if stack.owner == player => stack.count,
            _ => 0,
        }
    }

    /// Opposing checkers on one of the player's own-perspective points.
    #[must_use]
    pub fn opponent_checkers_at(&self, player: Player, own_point: u8) -> u8 {
        match self.slots[Self::fixed_point(player, own_point)] {
            Some(stack) if stack.owner != player => stack.count,
            _ => 0,
        }
    }

    /// Whether a destination is guarded by two or more opposing checkers.
    #[must_use]
    pub fn is_blocked(&self, player: Player, own_point: u8) -> bool {
        self.opponent_checkers_at(player, own_point) >= 2
    }

    /// Checkers the player has on their bar.
    #[must_use]
    pub fn bar_count(&self, player: Player) -> u8 {
        self.checkers_at(player, OWN_BAR)
    }

    /// Checkers the player has borne off.
    #[must_use]
    pub fn off_count(&self, player: Player) -> u8 {
        self.off[player.index()]
    }

    /// Whether the player has borne off all fifteen checkers.
    #[must_use]
    pub fn has_borne_off_all(&self, player: Player) -> bool {
        self.off[player.index()] == CHECKERS_PER_PLAYER
    }

    /// Put `count` checkers on a player's own-perspective point, replacing
    /// whatever the slot held. Position-setup helper; `count == 0` clears
    /// the slot.
    pub fn place(&mut self, player: Player, own_point: u8, count: u8) {
        let fixed = Self::fixed_point(player, own_point);
        self.slots[fixed] = if count == 0 {
            None
        } else {
            Some(CheckerStack::new(player, count))
        };
    }

    /// Set a player's borne-off count. Position-setup helper.
    pub fn set_off(&mut self, player: Player, count: u8) {
        self.off[player.index()] = count;
    }

    fn add_to_slot(&mut self, player: Player, fixed: usize) {
        self.slots[fixed] = match self.slots[fixed] {
            None => Some(CheckerStack::new(player, 1)),
            Some(stack) => {
                debug_assert_eq!(stack.owner, player);
                Some(CheckerStack::new(player, stack.count + 1))
            }
        };
    }

    fn remove_from_slot(&mut self, player: Player, fixed: usize) {
        let stack = self.slots[fixed].unwrap_or_else(|| {
            panic!("no checker to remove from slot {fixed}");
        });
        debug_assert_eq!(stack.owner, player);
        self.slots[fixed] = if stack.count > 1 {
            Some(CheckerStack::new(player, stack.count - 1))
        } else {
            None
        };
    }

    /// Move one of the player's checkers from `from` (own perspective,
    /// 0 = bar) to `to` (own perspective, [`BEAR_OFF`] = off the board).
    ///
    /// A destination holding a single opposing checker is a hit: that blot
    /// moves to its owner's bar. A destination guarded by two or more
    /// opposing checkers must be excluded by the caller.
    pub fn apply_move(&mut self, player: Player, from: u8, to: i8) {
        debug_assert!(from <= 24, "moves never originate from the opponent's bar");
        self.remove_from_slot(player, Self::fixed_point(player, from));

        if to == BEAR_OFF {
            self.off[player.index()] += 1;
            return;
        }

        debug_assert!((1..=24).contains(&to));
        let fixed = Self::fixed_point(player, to as u8);
        if let Some(stack) = self.slots[fixed] {
            if stack.owner != player {
                debug_assert_eq!(stack.count, 1, "cannot land on a guarded point");
                let opponent = player.opponent();
                self.slots[fixed] = None;
                self.add_to_slot(opponent, Self::fixed_point(opponent, OWN_BAR));
            }
        }
        self.add_to_slot(player, fixed);
    }

    /// Whether all the player's checkers are in their home board (own
    /// points 1..=6) with none on the bar: the bear-off eligibility test.
    #[must_use]
    pub fn all_home(&self, player: Player) -> bool {
        if self.bar_count(player) > 0 {
            return false;
        }
        (7..=24).all(|point| self.checkers_at(player, point) == 0)
    }

    /// The player's pip count: the total dice pips needed to bear every
    /// checker off. A checker on the bar counts 25.
    #[must_use]
    pub fn pip_count(&self, player: Player) -> u32 {
        let on_points: u32 = (1..=24)
            .map(|point| u32::from(self.checkers_at(player, point)) * u32::from(point))
            .sum();
        on_points + u32::from(self.bar_count(player)) * 25
    }

    /// Checkers the player has in play anywhere: points, bar, and off.
    #[must_use]
    pub fn total_checkers(&self, player: Player) -> u8 {
        let on_board: u8 = (0..=25)
            .map(|point| self.checkers_at(player, point))
            .sum();
        on_board + self.off[player.index()]
    }

    /// Opposing checkers sitting inside the given player's home board
    /// (their own points 1..=6). Used for backgammon classification.
    #[must_use]
    pub fn opponent_checkers_in_home_of(&self, player: Player) -> u8 {
        (1..=6)
            .map(|point| self.opponent_checkers_at(player, point))
            .sum()
    }

    /// Verify the structural invariants: 15 checkers per player across
    /// board, bar and off, and each bar slot owned by its own side.
    pub fn check_invariants(&self) -> Result<()> {
        for player in Player::both() {
            let total = self.total_checkers(player);
            if total != CHECKERS_PER_PLAYER {
                return Err(EngineError::state_consistency(format!(
                    "{player} has {total} checkers in play, expected {CHECKERS_PER_PLAYER}"
                )));
            }
        }
        for (slot, owner) in [(0, Player::White), (25, Player::Black)] {
            if let Some(stack) = self.slots[slot] {
                if stack.owner != owner {
                    return Err(EngineError::state_consistency(format!(
                        "bar slot {slot} holds {} checkers",
                        stack.owner
                    )));
                }
            }
        }
        if self.slots.iter().flatten().any(|stack| stack.count == 0) {
            return Err(EngineError::state_consistency("empty stack in a slot"));
        }
        Ok(())
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for fixed in (1..=24).rev() {
            if let Some(stack) = self.slots[fixed] {
                if !first {
                    write!(f, " ")?;
                }
                let tag = match stack.owner {
                    Player::White => 'W',
                    Player::Black => 'B',
                };
                write!(f, "{fixed}:{tag}{}", stack.count)?;
                first = false;
            }
        }
        for player in Player::both() {
            if self.bar_count(player) > 0 {
                write!(f, " bar({player}):{}", self.bar_count(player))?;
            }
            if self.off_count(player) > 0 {
                write!(f, " off({player}):{}", self.off_count(player))?;
            }
        }
        Ok(())
    }
}
