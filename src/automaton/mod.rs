//! Elementary cellular automaton: cells, rule table, board, propagation.
//!
//! Nothing here knows about turns or players. The game layer owns one
//! [`RuleTable`], one boundary [`Row`] and one [`Grid`] and calls
//! [`compute_next_grid`] when the active player submits their rules.

pub mod grid;
pub mod pattern;
pub mod propagate;
pub mod rule_table;

pub use grid::{Grid, Row};
pub use pattern::{Bit, RulePattern};
pub use propagate::{compute_next_grid, next_row, EdgePolicy};
pub use rule_table::RuleTable;
