//! A rolled pair of dice.
//!
//! A double logically expands to four usable die values; [`Dice::values`]
//! produces the multiset a turn starts from. Construction validates the
//! 1..=6 range so a `Dice` value is always well-formed.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::error::{EngineError, Result};

/// The usable die values remaining in a turn: at most four (a double).
pub type DiceValues = SmallVec<[u8; 4]>;

/// A rolled pair of dice, each in 1..=6.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dice {
    first: u8,
    second: u8,
}

impl Dice {
    /// Create a dice pair, validating both values.
    pub fn new(first: u8, second: u8) -> Result<Self> {
        for value in [first, second] {
            if !(1..=6).contains(&value) {
                return Err(EngineError::state_consistency(format!(
                    "die value {value} outside 1..=6"
                )));
            }
        }
        Ok(Self { first, second })
    }

    /// First die value.
    #[must_use]
    pub const fn first(self) -> u8 {
        self.first
    }

    /// Second die value.
    #[must_use]
    pub const fn second(self) -> u8 {
        self.second
    }

    /// Whether both dice show the same value.
    #[must_use]
    pub const fn is_double(self) -> bool {
        self.first == self.second
    }

    /// The higher of the two values.
    #[must_use]
    pub fn higher(self) -> u8 {
        self.first.max(self.second)
    }

    /// The usable die values this roll grants: two for an ordinary roll,
    /// four identical values for a double.
    #[must_use]
    pub fn values(self) -> DiceValues {
        if self.is_double() {
            SmallVec::from_slice(&[self.first; 4])
        } else {
            SmallVec::from_slice(&[self.first, self.second])
        }
    }
}

impl std::fmt::Display for Dice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.first, self.second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_validates_range() {
        assert!(Dice::new(1, 6).is_ok());
        assert!(Dice::new(0, 3).is_err());
        assert!(Dice::new(3, 7).is_err());
    }

    #[test]
    fn test_double_detection() {
        assert!(Dice::new(4, 4).unwrap().is_double());
        assert!(!Dice::new(4, 2).unwrap().is_double());
    }

    #[test]
    fn test_values_ordinary() {
        let dice = Dice::new(6, 2).unwrap();
        assert_eq!(dice.values().as_slice(), &[6, 2]);
    }

    #[test]
    fn test_values_double_quadruple() {
        let dice = Dice::new(3, 3).unwrap();
        assert_eq!(dice.values().as_slice(), &[3, 3, 3, 3]);
    }

    #[test]
    fn test_higher() {
        assert_eq!(Dice::new(2, 5).unwrap().higher(), 5);
        assert_eq!(Dice::new(5, 2).unwrap().higher(), 5);
    }

    #[test]
    fn test_serialization() {
        let dice = Dice::new(6, 1).unwrap();
        let json = serde_json::to_string(&dice).unwrap();
        let back: Dice = serde_json::from_str(&json).unwrap();
        assert_eq!(back, dice);
    }
}
