//! Player moves and the history records kept for them.
//!
//! The orchestration layer turns UI input into an [`Action`] and hands it to
//! [`RulesEngine::apply_action`](crate::rules::RulesEngine::apply_action)
//! together with the acting seat.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use crate::automaton::RulePattern;

/// A move a player can submit.
///
/// ```
/// use cell_duel::core::Action;
///
/// let flip = Action::toggle("101").unwrap();
/// assert_eq!(flip.name(), "ToggleRule");
/// assert!(Action::toggle("2").is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Leave setup on a board of the given size (configurable boards only).
    StartGame { width: usize, height: usize },
    /// Flip one rule-table entry.
    ToggleRule(RulePattern),
    /// Revert the last flip made in this editing stage.
    UndoToggle,
    /// Lock in the rules and propagate the grid.
    SubmitRules,
    /// Score the grid and hand the board to the next seat.
    EndTurn,
}

impl Action {
    /// `ToggleRule` from a pattern string such as `"010"`.
    pub fn toggle(pattern: &str) -> super::DuelResult<Self> {
        Ok(Action::ToggleRule(pattern.parse()?))
    }

    /// Variant name, used in rejection messages.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Action::StartGame { .. } => "StartGame",
            Action::ToggleRule(_) => "ToggleRule",
            Action::UndoToggle => "UndoToggle",
            Action::SubmitRules => "SubmitRules",
            Action::EndTurn => "EndTurn",
        }
    }
}

/// An applied action with the turn it happened on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub player: PlayerId,
    pub action: Action,
    pub turn: u32,
    /// Position within the turn, from 0.
    pub sequence: u32,
}

impl ActionRecord {
    #[must_use]
    pub fn new(player: PlayerId, action: Action, turn: u32, sequence: u32) -> Self {
        Self {
            player,
            action,
            turn,
            sequence,
        }
    }
}
