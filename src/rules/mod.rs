//! Rules engine trait for the turn controller.
//!
//! [`CellDuel`](crate::game::CellDuel) implements `RulesEngine`; hosts can
//! drive any match through the trait without knowing the variant.

pub mod engine;

pub use engine::{GameResult, RulesEngine};
