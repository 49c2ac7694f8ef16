//! Cell values and 3-cell neighbourhood keys.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::DuelError;

/// One cell or rule output: 0 or 1.
///
/// Serialises as the integer `0` or `1`; any other integer is rejected on
/// the way in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Bit(bool);

impl Bit {
    pub const ZERO: Bit = Bit(false);
    pub const ONE: Bit = Bit(true);

    #[must_use]
    pub const fn is_set(self) -> bool {
        self.0
    }

    #[must_use]
    pub const fn flipped(self) -> Bit {
        Bit(!self.0)
    }

    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self.0 as u8
    }
}

impl From<bool> for Bit {
    fn from(value: bool) -> Self {
        Bit(value)
    }
}

impl From<Bit> for u8 {
    fn from(bit: Bit) -> Self {
        bit.as_u8()
    }
}

impl TryFrom<u8> for Bit {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Bit::ZERO),
            1 => Ok(Bit::ONE),
            other => Err(format!("cell value must be 0 or 1, got {other}")),
        }
    }
}

impl fmt::Display for Bit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

/// A `(left, center, right)` neighbourhood packed into 3 bits.
///
/// The packed value is the rule table index: `left*4 + center*2 + right`,
/// so `"000"` is 0 and `"111"` is 7.
///
/// ```
/// use cell_duel::automaton::{Bit, RulePattern};
///
/// let p: RulePattern = "011".parse().unwrap();
/// assert_eq!(p.index(), 3);
/// assert_eq!(p, RulePattern::from_bits(Bit::ZERO, Bit::ONE, Bit::ONE));
/// assert_eq!(p.to_string(), "011");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RulePattern(u8);

impl RulePattern {
    /// All eight patterns in table order.
    pub const ALL: [RulePattern; 8] = [
        RulePattern(0),
        RulePattern(1),
        RulePattern(2),
        RulePattern(3),
        RulePattern(4),
        RulePattern(5),
        RulePattern(6),
        RulePattern(7),
    ];

    #[must_use]
    pub const fn from_bits(left: Bit, center: Bit, right: Bit) -> Self {
        RulePattern(((left.0 as u8) << 2) | ((center.0 as u8) << 1) | right.0 as u8)
    }

    /// Pattern for a table index, `None` past 7.
    #[must_use]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 8 {
            Some(RulePattern(index))
        } else {
            None
        }
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[must_use]
    pub const fn left(self) -> Bit {
        Bit(self.0 & 0b100 != 0)
    }

    #[must_use]
    pub const fn center(self) -> Bit {
        Bit(self.0 & 0b010 != 0)
    }

    #[must_use]
    pub const fn right(self) -> Bit {
        Bit(self.0 & 0b001 != 0)
    }
}

impl FromStr for RulePattern {
    type Err = DuelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 3 {
            return Err(DuelError::InvalidPattern(s.to_string()));
        }

        let mut packed = 0u8;
        for &b in bytes {
            let bit = match b {
                b'0' => 0,
                b'1' => 1,
                _ => return Err(DuelError::InvalidPattern(s.to_string())),
            };
            packed = (packed << 1) | bit;
        }

        Ok(RulePattern(packed))
    }
}

impl TryFrom<String> for RulePattern {
    type Error = DuelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RulePattern> for String {
    fn from(pattern: RulePattern) -> Self {
        pattern.to_string()
    }
}

impl fmt::Display for RulePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.left(), self.center(), self.right())
    }
}
