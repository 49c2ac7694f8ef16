//! The eight-entry rule table players edit each turn.

use serde::{Deserialize, Serialize};

use super::pattern::{Bit, RulePattern};
use crate::core::GameRng;

/// Next-state bit for every 3-cell neighbourhood.
///
/// Indexed by [`RulePattern::index`], so all eight entries always exist.
/// Serialises as an array of eight `0`/`1` values in `"000"`..`"111"` order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleTable {
    outputs: [Bit; 8],
}

impl RuleTable {
    /// The table printed on the game board: Wolfram rule 90.
    pub const SAMPLE: RuleTable = RuleTable::from_code(90);

    /// Build from a Wolfram rule code, where bit `i` is the output for the
    /// pattern with index `i`.
    ///
    /// ```
    /// use cell_duel::automaton::RuleTable;
    ///
    /// let table = RuleTable::from_code(90);
    /// assert_eq!(table.lookup("001".parse().unwrap()).as_u8(), 1);
    /// assert_eq!(table.lookup("010".parse().unwrap()).as_u8(), 0);
    /// assert_eq!(table.code(), 90);
    /// ```
    #[must_use]
    pub const fn from_code(code: u8) -> Self {
        let mut outputs = [Bit::ZERO; 8];
        let mut i = 0;
        while i < 8 {
            if code & (1 << i) != 0 {
                outputs[i] = Bit::ONE;
            }
            i += 1;
        }
        Self { outputs }
    }

    /// Wolfram rule code of this table.
    #[must_use]
    pub fn code(&self) -> u8 {
        self.outputs
            .iter()
            .enumerate()
            .fold(0u8, |acc, (i, bit)| acc | (bit.as_u8() << i))
    }

    /// Each entry an unbiased coin flip, drawn in table order.
    pub fn random(rng: &mut GameRng) -> Self {
        let mut outputs = [Bit::ZERO; 8];
        for out in &mut outputs {
            *out = Bit::from(rng.gen_bit());
        }
        Self { outputs }
    }

    #[must_use]
    pub fn lookup(&self, pattern: RulePattern) -> Bit {
        self.outputs[pattern.index()]
    }

    pub fn set(&mut self, pattern: RulePattern, value: Bit) {
        self.outputs[pattern.index()] = value;
    }

    /// Flip one entry and return its new value.
    pub fn flip(&mut self, pattern: RulePattern) -> Bit {
        let slot = &mut self.outputs[pattern.index()];
        *slot = slot.flipped();
        *slot
    }

    /// `(pattern, output)` pairs in `"000"`..`"111"` order.
    pub fn iter(&self) -> impl Iterator<Item = (RulePattern, Bit)> + '_ {
        RulePattern::ALL.iter().map(move |&p| (p, self.lookup(p)))
    }
}
