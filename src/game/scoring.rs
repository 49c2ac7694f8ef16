//! Turning finished grids into points.
//!
//! Seats chase opposite objectives on the same board: the first player
//! wants set cells, everyone else wants unset ones. So on any grid the
//! first player's tally plus another seat's tally is exactly the cell count.

use crate::automaton::Grid;
use crate::core::{PlayerId, PlayerMap, ScoringMode};

/// Points `player` earns from `grid`.
///
/// ```
/// use cell_duel::automaton::{Grid, Row};
/// use cell_duel::core::{PlayerId, ScoringMode};
/// use cell_duel::game::scoring::tally;
///
/// let grid = Grid::from_rows(vec![Row::from_bits([1, 1, 0])]).unwrap();
/// let first = PlayerId::FIRST;
///
/// assert_eq!(tally(&grid, first, first, ScoringMode::Complementary), 2);
/// assert_eq!(tally(&grid, PlayerId::new(1), first, ScoringMode::Complementary), 1);
/// ```
#[must_use]
pub fn tally(grid: &Grid, player: PlayerId, first_player: PlayerId, mode: ScoringMode) -> u64 {
    match mode {
        ScoringMode::Disabled => 0,
        ScoringMode::Complementary => {
            let earned = if player == first_player {
                grid.count_set()
            } else {
                grid.count_unset()
            };
            earned as u64
        }
    }
}

/// Add `delta` to a seat's running total. Totals only ever grow.
pub fn apply_delta(score: &mut PlayerMap<u64>, player: PlayerId, delta: u64) {
    if let Some(total) = score.get_mut(player) {
        *total = total.saturating_add(delta);
    }
}

/// Seats ordered by score, best first; ties keep seat order.
#[must_use]
pub fn standings(score: &PlayerMap<u64>) -> Vec<(PlayerId, u64)> {
    let mut table: Vec<_> = score.iter().map(|(p, &s)| (p, s)).collect();
    table.sort_by(|a, b| b.1.cmp(&a.1));
    table
}
