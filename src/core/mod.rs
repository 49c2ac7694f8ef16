//! Core engine types: players, RNG, configuration, actions, state, errors.
//!
//! Everything the turn controller needs that is not cellular-automaton
//! specific lives here.

pub mod action;
pub mod config;
pub mod error;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{Action, ActionRecord};
pub use config::{BoardSize, BoardSizing, RuleSet, ScoringMode};
pub use error::{DuelError, DuelResult};
pub use player::{PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState};
pub use state::{DuelState, EditBudget, TurnPhase};
