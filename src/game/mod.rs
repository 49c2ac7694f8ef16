//! Cell duel: players take turns editing a shared rule table and scoring
//! the generation it produces.
//!
//! - [`duel`]: the turn controller (`CellDuel`) and its builder
//! - [`scoring`]: complementary tallies and running totals
//!
//! Supports 2+ seats; seat 0 always chases set cells and every other seat
//! chases unset ones.

pub mod duel;
pub mod scoring;

pub use duel::{CellDuel, DuelBuilder};
