//! # cell-duel
//!
//! Game-state engine for a turn-based duel over an elementary cellular
//! automaton.
//!
//! Each turn the active player flips entries of a shared 8-entry rule
//! table, then the table is propagated row by row down the board from the
//! last row of the previous generation. The first player scores the set
//! cells of the grid they produce; everyone else scores the unset ones.
//!
//! ## Design Principles
//!
//! 1. **Host-Agnostic**: No UI, transport or dispatch loop. The host owns
//!    a [`DuelState`] and passes it to every action.
//!
//! 2. **All-or-Nothing Actions**: An action either applies fully or returns
//!    a [`DuelError`] and leaves the state untouched.
//!
//! 3. **Deterministic**: Randomness only enters through a borrowed
//!    [`GameRng`]; same seed plus same actions gives the same match.
//!
//! 4. **Variants by Configuration**: Edge policy, edit quota, scoring and
//!    board sizing are chosen in a [`RuleSet`], not hardcoded.
//!
//! ## Modules
//!
//! - `core`: players, RNG, configuration, actions, state, errors
//! - `automaton`: cells, rule table, grid, propagation
//! - `rules`: `RulesEngine` trait
//! - `game`: the duel turn controller and scoring
//!
//! ## Example
//!
//! ```
//! use cell_duel::{DuelBuilder, GameRng, PlayerId, TurnPhase};
//!
//! let mut rng = GameRng::new(42);
//! let (duel, mut state) = DuelBuilder::new().build(&mut rng).unwrap();
//!
//! let p0 = PlayerId::new(0);
//! duel.start_game(&mut state, p0, 7, 4, &mut rng).unwrap();
//! duel.toggle_rule(&mut state, p0, "010").unwrap();
//! duel.submit_rules(&mut state, p0).unwrap();
//! assert_eq!(state.phase, TurnPhase::ViewingChanges);
//!
//! duel.end_turn(&mut state, p0).unwrap();
//! assert_eq!(state.active_player, PlayerId::new(1));
//! assert!(state.cells.is_blank());
//! ```

pub mod automaton;
pub mod core;
pub mod game;
pub mod rules;

// Re-export commonly used types
pub use crate::automaton::{compute_next_grid, next_row, Bit, EdgePolicy, Grid, Row, RulePattern, RuleTable};

pub use crate::core::{
    Action, ActionRecord, BoardSize, BoardSizing, DuelError, DuelResult, DuelState, EditBudget, GameRng,
    GameRngState, PlayerId, PlayerMap, RuleSet, ScoringMode, TurnPhase,
};

pub use crate::game::{CellDuel, DuelBuilder};

pub use crate::rules::{GameResult, RulesEngine};
