//! Row-by-row propagation of a rule table down the board.
//!
//! Pure functions: the same table, boundary row and edge policy always give
//! the same grid. Cost is one table lookup per cell.

use serde::{Deserialize, Serialize};

use super::grid::{Grid, Row};
use super::pattern::{Bit, RulePattern};
use super::rule_table::RuleTable;

/// Values assumed for the neighbours that fall off either end of a row.
///
/// The two shipped variants disagree on the right edge, and the difference
/// is visible in play, so the policy is chosen per rule set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgePolicy {
    pub left: Bit,
    pub right: Bit,
}

impl EdgePolicy {
    /// Variable-size board: dead left edge, live right edge.
    pub const SIZED: EdgePolicy = EdgePolicy {
        left: Bit::ZERO,
        right: Bit::ONE,
    };

    /// Fixed 5x5 board: both edges dead.
    pub const CLASSIC: EdgePolicy = EdgePolicy {
        left: Bit::ZERO,
        right: Bit::ZERO,
    };
}

impl Default for EdgePolicy {
    fn default() -> Self {
        Self::SIZED
    }
}

/// Apply the rule table once to `prev`, producing a row of the same width.
///
/// ```
/// use cell_duel::automaton::{next_row, EdgePolicy, Row, RuleTable};
///
/// let row = next_row(&RuleTable::SAMPLE, &Row::from_bits([1, 0, 0, 0, 0]), EdgePolicy::SIZED);
/// assert_eq!(row, Row::from_bits([0, 1, 0, 0, 1]));
/// ```
#[must_use]
pub fn next_row(table: &RuleTable, prev: &Row, edges: EdgePolicy) -> Row {
    let bits = prev.bits();
    let width = bits.len();

    (0..width)
        .map(|j| {
            let left = if j > 0 { bits[j - 1] } else { edges.left };
            let right = if j + 1 < width { bits[j + 1] } else { edges.right };
            table.lookup(RulePattern::from_bits(left, bits[j], right))
        })
        .collect()
}

/// Fill `height` rows below `boundary`.
///
/// Row 0 is derived from the boundary row and row `i` from row `i - 1`.
/// The result is as wide as `boundary`.
#[must_use]
pub fn compute_next_grid(table: &RuleTable, height: usize, boundary: &Row, edges: EdgePolicy) -> Grid {
    let mut rows = Vec::with_capacity(height);
    let mut prev = boundary.clone();

    for _ in 0..height {
        let row = next_row(table, &prev, edges);
        rows.push(row.clone());
        prev = row;
    }

    Grid::from_rows(rows).unwrap_or_else(|| Grid::zeroed(boundary.width(), 0))
}
