//! Match state: the single aggregate every action reads and mutates.
//!
//! ## DuelState
//!
//! Plain data, observable by every seat:
//! - Phase, turn number, active player
//! - Rule table, boundary row, grid
//! - Scores and the active player's remaining rule edits
//! - Action history
//!
//! The state never owns a random generator. Setup and start-game borrow
//! one from the host, so the state itself stays `Serialize + PartialEq`
//! and can be snapshotted, compared and replayed freely.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::action::ActionRecord;
use super::config::BoardSize;
use super::error::{DuelError, DuelResult};
use super::player::{PlayerId, PlayerMap};
use crate::automaton::{Grid, Row, RulePattern, RuleTable};

/// Where the match is in its turn cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnPhase {
    /// Waiting for a board size (configurable boards only).
    Setup,
    /// Active player may flip rule entries.
    EditingRules,
    /// Grid has been propagated; active player reviews it and ends the turn.
    ViewingChanges,
}

impl std::fmt::Display for TurnPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TurnPhase::Setup => "Setup",
            TurnPhase::EditingRules => "EditingRules",
            TurnPhase::ViewingChanges => "ViewingChanges",
        };
        f.write_str(name)
    }
}

/// Rule flips left in the current editing stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EditBudget {
    Limited(u32),
    Unlimited,
}

impl EditBudget {
    /// Fresh budget for a quota; `None` means unlimited.
    #[must_use]
    pub fn from_quota(quota: Option<u32>) -> Self {
        quota.map_or(EditBudget::Unlimited, EditBudget::Limited)
    }

    #[must_use]
    pub fn is_exhausted(self) -> bool {
        self == EditBudget::Limited(0)
    }

    /// Use up one edit.
    pub fn spend(&mut self) -> DuelResult<()> {
        match self {
            EditBudget::Limited(0) => Err(DuelError::BudgetExhausted),
            EditBudget::Limited(n) => {
                *n -= 1;
                Ok(())
            }
            EditBudget::Unlimited => Ok(()),
        }
    }

    /// Give back one edit (undo).
    pub fn refund(&mut self) {
        if let EditBudget::Limited(n) = self {
            *n = n.saturating_add(1);
        }
    }

    /// Remaining edits, `None` if unlimited.
    #[must_use]
    pub fn remaining(self) -> Option<u32> {
        match self {
            EditBudget::Limited(n) => Some(n),
            EditBudget::Unlimited => None,
        }
    }
}

/// Full match state.
///
/// Fields are public for rendering; mutate only through
/// [`RulesEngine::apply_action`](crate::rules::RulesEngine::apply_action)
/// so the turn invariants hold.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuelState {
    pub board: BoardSize,

    pub phase: TurnPhase,

    /// Turn number, from 1. Bumped when a turn ends.
    pub turn_number: u32,

    /// Actions applied so far this turn.
    pub action_sequence: u32,

    pub active_player: PlayerId,

    pub rules: RuleTable,

    /// Last row of the previous generation; seeds row 0 of the next.
    pub last_row: Row,

    /// Generation in progress. All zero while rules are being edited.
    pub cells: Grid,

    pub score: PlayerMap<u64>,

    pub edit_budget: EditBudget,

    /// Flips made in the current editing stage, oldest first.
    pub toggles: SmallVec<[RulePattern; 4]>,

    pub action_history: Vector<ActionRecord>,
}

impl DuelState {
    /// Fresh match state on `board` with the given table and boundary row.
    ///
    /// Starts in `Setup` with player 0 active and no edits available.
    #[must_use]
    pub fn new(player_count: usize, board: BoardSize, rules: RuleTable, last_row: Row) -> Self {
        Self {
            board,
            phase: TurnPhase::Setup,
            turn_number: 1,
            action_sequence: 0,
            active_player: PlayerId::FIRST,
            rules,
            last_row,
            cells: Grid::zeroed(board.width, board.height),
            score: PlayerMap::with_value(player_count, 0),
            edit_budget: EditBudget::Limited(0),
            toggles: SmallVec::new(),
            action_history: Vector::new(),
        }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.score.player_count()
    }

    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        PlayerId::all(self.player_count())
    }

    #[must_use]
    pub fn score_of(&self, player: PlayerId) -> Option<u64> {
        self.score.get(player).copied()
    }

    /// Whether `player` may act in the current phase.
    ///
    /// Anyone seated may act during setup; afterwards only the active
    /// player.
    #[must_use]
    pub fn can_act(&self, player: PlayerId) -> bool {
        match self.phase {
            TurnPhase::Setup => self.score.contains(player),
            TurnPhase::EditingRules | TurnPhase::ViewingChanges => player == self.active_player,
        }
    }

    /// Enter the editing stage with a fresh budget.
    pub fn begin_editing(&mut self, quota: Option<u32>) {
        self.phase = TurnPhase::EditingRules;
        self.edit_budget = EditBudget::from_quota(quota);
        self.toggles.clear();
    }

    /// Hand the board to the next seat and bump the turn counter.
    pub fn advance_turn(&mut self) {
        self.active_player = self.active_player.next(self.player_count());
        self.turn_number += 1;
        self.action_sequence = 0;
    }

    /// Number of turns that have been ended.
    #[must_use]
    pub fn completed_turns(&self) -> u32 {
        self.turn_number.saturating_sub(1)
    }

    pub fn record_action(&mut self, record: ActionRecord) {
        self.action_history.push_back(record);
    }

    /// Next sequence number within the turn.
    pub fn next_sequence(&mut self) -> u32 {
        let seq = self.action_sequence;
        self.action_sequence += 1;
        seq
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Action;

    fn fresh() -> DuelState {
        DuelState::new(2, BoardSize::DEFAULT, RuleTable::SAMPLE, Row::zeroed(5))
    }

    #[test]
    fn test_new_state() {
        let state = fresh();

        assert_eq!(state.phase, TurnPhase::Setup);
        assert_eq!(state.turn_number, 1);
        assert_eq!(state.active_player, PlayerId::FIRST);
        assert_eq!(state.player_count(), 2);
        assert_eq!(state.cells, Grid::zeroed(5, 5));
        assert_eq!(state.score_of(PlayerId::new(1)), Some(0));
        assert_eq!(state.score_of(PlayerId::new(2)), None);
        assert!(state.edit_budget.is_exhausted());
    }

    #[test]
    fn test_budget_spend_and_refund() {
        let mut budget = EditBudget::from_quota(Some(2));

        assert!(budget.spend().is_ok());
        assert!(budget.spend().is_ok());
        assert_eq!(budget.spend(), Err(DuelError::BudgetExhausted));
        assert_eq!(budget.remaining(), Some(0));

        budget.refund();
        assert_eq!(budget.remaining(), Some(1));
    }

    #[test]
    fn test_unlimited_budget_never_runs_out() {
        let mut budget = EditBudget::from_quota(None);

        for _ in 0..100 {
            assert!(budget.spend().is_ok());
        }
        assert!(!budget.is_exhausted());
        assert_eq!(budget.remaining(), None);
    }

    #[test]
    fn test_can_act() {
        let mut state = fresh();

        assert!(state.can_act(PlayerId::new(1)));
        assert!(!state.can_act(PlayerId::new(5)));

        state.begin_editing(Some(1));
        assert!(state.can_act(PlayerId::FIRST));
        assert!(!state.can_act(PlayerId::new(1)));
    }

    #[test]
    fn test_begin_editing_resets_budget_and_toggles() {
        let mut state = fresh();
        state.toggles.push("000".parse().unwrap());

        state.begin_editing(Some(3));

        assert_eq!(state.phase, TurnPhase::EditingRules);
        assert_eq!(state.edit_budget, EditBudget::Limited(3));
        assert!(state.toggles.is_empty());
    }

    #[test]
    fn test_advance_turn_wraps_seats() {
        let mut state = fresh();
        state.next_sequence();

        state.advance_turn();
        assert_eq!(state.active_player, PlayerId::new(1));
        assert_eq!(state.turn_number, 2);
        assert_eq!(state.action_sequence, 0);

        state.advance_turn();
        assert_eq!(state.active_player, PlayerId::FIRST);
        assert_eq!(state.completed_turns(), 2);
    }

    #[test]
    fn test_history() {
        let mut state = fresh();
        let seq = state.next_sequence();
        state.record_action(ActionRecord::new(PlayerId::FIRST, Action::SubmitRules, 1, seq));

        assert_eq!(state.action_history.len(), 1);
        assert_eq!(state.next_sequence(), 1);
    }

    #[test]
    fn test_state_is_plain_data() {
        let mut state = fresh();
        state.begin_editing(Some(1));
        state.record_action(ActionRecord::new(PlayerId::FIRST, Action::toggle("010").unwrap(), 1, 0));

        let json = serde_json::to_string(&state).unwrap();
        let back: DuelState = serde_json::from_str(&json).unwrap();

        assert_eq!(state, back);
    }
}
