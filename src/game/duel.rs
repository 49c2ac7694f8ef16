//! Turn controller for a cell duel.

use crate::automaton::{compute_next_grid, Row, RulePattern, RuleTable};
use crate::core::{
    Action, ActionRecord, BoardSize, BoardSizing, DuelError, DuelResult, DuelState, GameRng, PlayerId, RuleSet,
    ScoringMode, TurnPhase,
};
use crate::rules::{GameResult, RulesEngine};

use super::scoring;

/// A configured duel. Holds the rule set; the match itself is a
/// [`DuelState`] the host passes in with every action.
#[derive(Clone, Debug)]
pub struct CellDuel {
    rules: RuleSet,
}

/// Builder for a duel and its opening state.
pub struct DuelBuilder {
    rules: RuleSet,
}

impl Default for DuelBuilder {
    fn default() -> Self {
        Self { rules: RuleSet::sized() }
    }
}

impl DuelBuilder {
    /// Start from the variable-size variant.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from the fixed 5x5 variant.
    pub fn classic() -> Self {
        Self {
            rules: RuleSet::classic(),
        }
    }

    /// Replace the whole rule set.
    pub fn rule_set(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }

    /// Number of seats, 2 to 255.
    pub fn players(mut self, count: usize) -> Self {
        self.rules.player_count = count;
        self
    }

    /// Opening board. Checked in [`build`](Self::build).
    pub fn board(mut self, width: usize, height: usize) -> Self {
        self.rules.board = BoardSize { width, height };
        self
    }

    /// Rule flips per turn; `None` for unlimited.
    pub fn edit_quota(mut self, quota: Option<u32>) -> Self {
        self.rules.edit_quota = quota;
        self
    }

    /// End the match after `turns` completed turns.
    pub fn turn_limit(mut self, turns: u32) -> Self {
        self.rules.turn_limit = Some(turns);
        self
    }

    /// Validate the rule set and deal the opening state from `rng`.
    pub fn build(self, rng: &mut GameRng) -> DuelResult<(CellDuel, DuelState)> {
        let duel = CellDuel::new(self.rules)?;
        let state = duel.setup(rng);
        Ok((duel, state))
    }
}

impl CellDuel {
    /// Duel for a validated rule set.
    pub fn new(rules: RuleSet) -> DuelResult<Self> {
        rules.validate()?;
        Ok(Self { rules })
    }

    /// Opening state on the rule set's board.
    ///
    /// Configurable boards open in `Setup`; fixed boards go straight to the
    /// first player's editing stage.
    pub fn setup(&self, rng: &mut GameRng) -> DuelState {
        let mut state = self.deal(self.rules.board, rng);
        if self.rules.sizing == BoardSizing::Fixed {
            state.begin_editing(self.rules.edit_quota);
        }
        state
    }

    /// Fresh random table and boundary row, blank grid, zero scores.
    fn deal(&self, board: BoardSize, rng: &mut GameRng) -> DuelState {
        let last_row = Row::random(board.width, rng);
        let rules = RuleTable::random(rng);
        DuelState::new(self.rules.player_count, board, rules, last_row)
    }

    // === Actions ===

    /// Leave setup on a `width` x `height` board dealt from `rng`.
    pub fn start_game(
        &self,
        state: &mut DuelState,
        player: PlayerId,
        width: usize,
        height: usize,
        rng: &mut GameRng,
    ) -> DuelResult<()> {
        self.apply(state, player, Action::StartGame { width, height }, Some(rng))
    }

    /// Flip the rule entry named by `pattern` (`"000"`..`"111"`).
    pub fn toggle_rule(&self, state: &mut DuelState, player: PlayerId, pattern: &str) -> DuelResult<()> {
        self.apply(state, player, Action::toggle(pattern)?, None)
    }

    /// Revert the last flip of this editing stage and refund its budget.
    pub fn undo_toggle(&self, state: &mut DuelState, player: PlayerId) -> DuelResult<()> {
        self.apply(state, player, Action::UndoToggle, None)
    }

    /// Lock the table and propagate it down the board.
    pub fn submit_rules(&self, state: &mut DuelState, player: PlayerId) -> DuelResult<()> {
        self.apply(state, player, Action::SubmitRules, None)
    }

    /// Score the grid, carry its last row over and hand over to the next seat.
    pub fn end_turn(&self, state: &mut DuelState, player: PlayerId) -> DuelResult<()> {
        self.apply(state, player, Action::EndTurn, None)
    }

    /// Seats by score, best first.
    pub fn standings(&self, state: &DuelState) -> Vec<(PlayerId, u64)> {
        scoring::standings(&state.score)
    }

    fn reject(state: &DuelState, player: PlayerId, action: Action) -> DuelError {
        DuelError::InvalidActionForStage {
            action: action.name(),
            phase: state.phase,
            player,
        }
    }

    fn check_stage(&self, state: &DuelState, player: PlayerId, action: Action) -> DuelResult<()> {
        let phase_ok = match action {
            Action::StartGame { .. } => {
                state.phase == TurnPhase::Setup && self.rules.sizing == BoardSizing::Configurable
            }
            Action::ToggleRule(_) | Action::UndoToggle | Action::SubmitRules => state.phase == TurnPhase::EditingRules,
            Action::EndTurn => state.phase == TurnPhase::ViewingChanges,
        };

        if phase_ok && state.can_act(player) {
            Ok(())
        } else {
            Err(Self::reject(state, player, action))
        }
    }

    /// Validate, apply and record one action.
    ///
    /// Every failure is detected before the first write to `state`.
    fn apply(
        &self,
        state: &mut DuelState,
        player: PlayerId,
        action: Action,
        rng: Option<&mut GameRng>,
    ) -> DuelResult<()> {
        if self.is_terminal(state).is_some() {
            return Err(DuelError::GameOver);
        }
        self.check_stage(state, player, action)?;

        let turn = state.turn_number;
        let sequence = state.action_sequence;

        match action {
            Action::StartGame { width, height } => {
                let board = BoardSize::new(width, height)?;
                let rng = rng.ok_or_else(|| Self::reject(state, player, action))?;
                let history = std::mem::take(&mut state.action_history);
                *state = self.deal(board, rng);
                state.action_history = history;
                state.begin_editing(self.rules.edit_quota);
            }
            Action::ToggleRule(pattern) => {
                state.edit_budget.spend()?;
                state.rules.flip(pattern);
                state.toggles.push(pattern);
            }
            Action::UndoToggle => {
                if state.edit_budget.is_exhausted() {
                    return Err(DuelError::BudgetExhausted);
                }
                let pattern = state.toggles.pop().ok_or(DuelError::NothingToUndo)?;
                state.rules.flip(pattern);
                state.edit_budget.refund();
            }
            Action::SubmitRules => {
                state.cells = compute_next_grid(&state.rules, state.board.height, &state.last_row, self.rules.edges);
                state.toggles.clear();
                state.phase = TurnPhase::ViewingChanges;
            }
            Action::EndTurn => {
                let delta = scoring::tally(&state.cells, player, PlayerId::FIRST, self.rules.scoring);
                scoring::apply_delta(&mut state.score, player, delta);

                if let Some(last) = state.cells.last_row() {
                    state.last_row = last.clone();
                }
                state.cells.clear();
                state.advance_turn();
                state.begin_editing(self.rules.edit_quota);
            }
        }

        if state.turn_number == turn {
            state.next_sequence();
        }
        state.record_action(ActionRecord::new(player, action, turn, sequence));
        Ok(())
    }
}

impl RulesEngine for CellDuel {
    fn rule_set(&self) -> &RuleSet {
        &self.rules
    }

    fn legal_actions(&self, state: &DuelState, player: PlayerId) -> Vec<Action> {
        if !state.can_act(player) || self.is_terminal(state).is_some() {
            return vec![];
        }

        match state.phase {
            TurnPhase::Setup => match self.rules.sizing {
                BoardSizing::Configurable => vec![Action::StartGame {
                    width: state.board.width,
                    height: state.board.height,
                }],
                BoardSizing::Fixed => vec![],
            },
            TurnPhase::EditingRules => {
                let mut actions = Vec::with_capacity(10);
                if !state.edit_budget.is_exhausted() {
                    actions.extend(RulePattern::ALL.iter().map(|&p| Action::ToggleRule(p)));
                    if !state.toggles.is_empty() {
                        actions.push(Action::UndoToggle);
                    }
                }
                actions.push(Action::SubmitRules);
                actions
            }
            TurnPhase::ViewingChanges => vec![Action::EndTurn],
        }
    }

    fn apply_action(
        &self,
        state: &mut DuelState,
        player: PlayerId,
        action: Action,
        rng: &mut GameRng,
    ) -> DuelResult<()> {
        self.apply(state, player, action, Some(rng))
    }

    fn is_terminal(&self, state: &DuelState) -> Option<GameResult> {
        let limit = self.rules.turn_limit?;
        if state.completed_turns() < limit {
            return None;
        }

        if self.rules.scoring == ScoringMode::Disabled {
            return Some(GameResult::Draw);
        }

        let standings = scoring::standings(&state.score);
        let top = standings.first().map_or(0, |&(_, s)| s);
        let leaders: Vec<PlayerId> = standings.iter().filter(|&&(_, s)| s == top).map(|&(p, _)| p).collect();

        Some(match leaders.len() {
            1 => GameResult::Winner(leaders[0]),
            n if n == standings.len() => GameResult::Draw,
            _ => GameResult::Winners(leaders),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::{Bit, Grid};
    use crate::core::EditBudget;

    const P0: PlayerId = PlayerId::FIRST;
    const P1: PlayerId = PlayerId::new(1);

    fn sized_game() -> (CellDuel, DuelState, GameRng) {
        let mut rng = GameRng::new(42);
        let (duel, mut state) = DuelBuilder::new().build(&mut rng).unwrap();
        duel.start_game(&mut state, P0, 5, 5, &mut rng).unwrap();
        (duel, state, rng)
    }

    fn pat(s: &str) -> RulePattern {
        s.parse().unwrap()
    }

    #[test]
    fn test_sized_variant_opens_in_setup() {
        let mut rng = GameRng::new(1);
        let (duel, state) = DuelBuilder::new().build(&mut rng).unwrap();

        assert_eq!(state.phase, TurnPhase::Setup);
        assert_eq!(state.board, BoardSize::DEFAULT);
        assert_eq!(state.last_row.width(), 5);
        assert!(state.cells.is_blank());
        assert!(state.edit_budget.is_exhausted());
        assert_eq!(
            duel.legal_actions(&state, P1),
            vec![Action::StartGame { width: 5, height: 5 }]
        );
    }

    #[test]
    fn test_classic_variant_skips_setup() {
        let mut rng = GameRng::new(1);
        let (duel, state) = DuelBuilder::classic().build(&mut rng).unwrap();

        assert_eq!(state.phase, TurnPhase::EditingRules);
        assert_eq!(state.edit_budget, EditBudget::Unlimited);
        assert_eq!(duel.rule_set().edges.right, Bit::ZERO);
    }

    #[test]
    fn test_start_game_by_second_seat() {
        let mut rng = GameRng::new(5);
        let (duel, mut state) = DuelBuilder::new().build(&mut rng).unwrap();

        duel.start_game(&mut state, P1, 8, 3, &mut rng).unwrap();

        assert_eq!(state.phase, TurnPhase::EditingRules);
        assert_eq!(state.active_player, P0);
        assert_eq!(state.board, BoardSize { width: 8, height: 3 });
        assert_eq!(state.cells, Grid::zeroed(8, 3));
        assert_eq!(state.last_row.width(), 8);
        assert_eq!(state.edit_budget, EditBudget::Limited(1));
        assert_eq!(state.action_history.len(), 1);
    }

    #[test]
    fn test_start_game_rejects_bad_dimensions_without_change() {
        let mut rng = GameRng::new(5);
        let (duel, mut state) = DuelBuilder::new().build(&mut rng).unwrap();
        let before = state.clone();

        assert_eq!(
            duel.start_game(&mut state, P0, 0, 4, &mut rng),
            Err(DuelError::InvalidDimensions { width: 0, height: 4 })
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_start_game_rejects_oversized_board_without_change() {
        let mut rng = GameRng::new(5);
        let (duel, mut state) = DuelBuilder::new().build(&mut rng).unwrap();
        let before = state.clone();
        let rng_before = rng.state();

        for (width, height) in [(usize::MAX, 1), (1, usize::MAX), (BoardSize::MAX_SIDE + 1, 3)] {
            assert_eq!(
                duel.apply_action(&mut state, P1, Action::StartGame { width, height }, &mut rng),
                Err(DuelError::InvalidDimensions { width, height })
            );
        }
        assert_eq!(state, before);
        assert_eq!(rng.state(), rng_before);

        let max = BoardSize::MAX_SIDE;
        duel.start_game(&mut state, P1, max, 1, &mut rng).unwrap();
        assert_eq!(state.last_row.width(), max);
    }

    #[test]
    fn test_start_game_rejected_on_fixed_board() {
        let mut rng = GameRng::new(5);
        let (duel, mut state) = DuelBuilder::classic().build(&mut rng).unwrap();

        let err = duel.start_game(&mut state, P0, 6, 6, &mut rng).unwrap_err();
        assert!(matches!(err, DuelError::InvalidActionForStage { action: "StartGame", .. }));
    }

    #[test]
    fn test_toggle_spends_budget() {
        let (duel, mut state, _) = sized_game();
        state.rules.set(pat("000"), Bit::ZERO);

        duel.toggle_rule(&mut state, P0, "000").unwrap();

        assert_eq!(state.rules.lookup(pat("000")), Bit::ONE);
        assert_eq!(state.edit_budget, EditBudget::Limited(0));

        let before = state.clone();
        assert_eq!(duel.toggle_rule(&mut state, P0, "000"), Err(DuelError::BudgetExhausted));
        assert_eq!(state, before);
    }

    #[test]
    fn test_toggle_invalid_pattern() {
        let (duel, mut state, _) = sized_game();
        let before = state.clone();

        assert_eq!(
            duel.toggle_rule(&mut state, P0, "1010"),
            Err(DuelError::InvalidPattern("1010".into()))
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_undo_restores_bit_and_budget() {
        let mut rng = GameRng::new(8);
        let (duel, mut state) = DuelBuilder::new().edit_quota(Some(2)).build(&mut rng).unwrap();
        duel.start_game(&mut state, P0, 5, 5, &mut rng).unwrap();
        let opening = state.rules;

        duel.toggle_rule(&mut state, P0, "101").unwrap();
        assert_ne!(state.rules, opening);

        duel.undo_toggle(&mut state, P0).unwrap();
        assert_eq!(state.rules, opening);
        assert_eq!(state.edit_budget, EditBudget::Limited(2));

        assert_eq!(duel.undo_toggle(&mut state, P0), Err(DuelError::NothingToUndo));
    }

    #[test]
    fn test_undo_unavailable_once_budget_spent() {
        let (duel, mut state, _) = sized_game();
        duel.toggle_rule(&mut state, P0, "111").unwrap();

        let before = state.clone();
        assert_eq!(duel.undo_toggle(&mut state, P0), Err(DuelError::BudgetExhausted));
        assert_eq!(state, before);
    }

    #[test]
    fn test_submit_propagates_and_locks_rules() {
        let (duel, mut state, _) = sized_game();
        state.rules = RuleTable::SAMPLE;
        state.last_row = Row::from_bits([1, 0, 0, 0, 0]);

        duel.submit_rules(&mut state, P0).unwrap();

        assert_eq!(state.phase, TurnPhase::ViewingChanges);
        assert_eq!(state.cells.row(0), Some(&Row::from_bits([0, 1, 0, 0, 1])));

        let err = duel.toggle_rule(&mut state, P0, "000").unwrap_err();
        assert!(matches!(err, DuelError::InvalidActionForStage { phase: TurnPhase::ViewingChanges, .. }));
        assert!(duel.submit_rules(&mut state, P0).is_err());
    }

    #[test]
    fn test_end_turn_scores_rotates_and_hands_over() {
        let (duel, mut state, _) = sized_game();
        duel.submit_rules(&mut state, P0).unwrap();

        let grid = state.cells.clone();
        let expected_row = grid.last_row().unwrap().clone();

        duel.end_turn(&mut state, P0).unwrap();

        assert_eq!(state.score[P0], grid.count_set() as u64);
        assert_eq!(state.score[P1], 0);
        assert_eq!(state.last_row, expected_row);
        assert!(state.cells.is_blank());
        assert_eq!(state.active_player, P1);
        assert_eq!(state.turn_number, 2);
        assert_eq!(state.phase, TurnPhase::EditingRules);
        assert_eq!(state.edit_budget, EditBudget::Limited(1));
    }

    #[test]
    fn test_second_player_scores_unset_cells() {
        let (duel, mut state, _) = sized_game();
        duel.submit_rules(&mut state, P0).unwrap();
        duel.end_turn(&mut state, P0).unwrap();

        duel.submit_rules(&mut state, P1).unwrap();
        let unset = (state.cells.cell_count() - state.cells.count_set()) as u64;
        duel.end_turn(&mut state, P1).unwrap();

        assert_eq!(state.score[P1], unset);
        assert_eq!(state.active_player, P0);
    }

    #[test]
    fn test_non_active_player_rejected() {
        let (duel, mut state, _) = sized_game();
        let before = state.clone();

        let err = duel.submit_rules(&mut state, P1).unwrap_err();
        assert_eq!(
            err,
            DuelError::InvalidActionForStage {
                action: "SubmitRules",
                phase: TurnPhase::EditingRules,
                player: P1,
            }
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_end_turn_before_submit_rejected() {
        let (duel, mut state, _) = sized_game();

        assert!(matches!(
            duel.end_turn(&mut state, P0),
            Err(DuelError::InvalidActionForStage { action: "EndTurn", .. })
        ));
    }

    #[test]
    fn test_legal_actions_by_stage() {
        let (duel, mut state, _) = sized_game();

        let editing = duel.legal_actions(&state, P0);
        assert_eq!(editing.len(), 9);
        assert!(editing.contains(&Action::SubmitRules));
        assert!(duel.legal_actions(&state, P1).is_empty());

        duel.toggle_rule(&mut state, P0, "010").unwrap();
        assert_eq!(duel.legal_actions(&state, P0), vec![Action::SubmitRules]);

        duel.submit_rules(&mut state, P0).unwrap();
        assert_eq!(duel.legal_actions(&state, P0), vec![Action::EndTurn]);
    }

    #[test]
    fn test_legal_actions_offer_undo() {
        let mut rng = GameRng::new(3);
        let (duel, mut state) = DuelBuilder::classic().build(&mut rng).unwrap();

        duel.toggle_rule(&mut state, P0, "010").unwrap();
        let actions = duel.legal_actions(&state, P0);

        assert!(actions.contains(&Action::UndoToggle));
        assert_eq!(actions.len(), 10);
        for action in actions {
            assert!(duel.is_legal(&state, P0, action), "{action:?}");
        }
    }

    #[test]
    fn test_history_records_turn_and_sequence() {
        let (duel, mut state, _) = sized_game();
        duel.toggle_rule(&mut state, P0, "001").unwrap();
        duel.submit_rules(&mut state, P0).unwrap();
        duel.end_turn(&mut state, P0).unwrap();
        duel.submit_rules(&mut state, P1).unwrap();

        let log: Vec<_> = state.action_history.iter().map(|r| (r.player, r.action.name(), r.turn, r.sequence)).collect();
        assert_eq!(
            log,
            vec![
                (P0, "StartGame", 1, 0),
                (P0, "ToggleRule", 1, 1),
                (P0, "SubmitRules", 1, 2),
                (P0, "EndTurn", 1, 3),
                (P1, "SubmitRules", 2, 0),
            ]
        );
    }

    #[test]
    fn test_turn_limit_ends_game() {
        let mut rng = GameRng::new(11);
        let (duel, mut state) = DuelBuilder::new().turn_limit(2).build(&mut rng).unwrap();
        duel.start_game(&mut state, P0, 4, 4, &mut rng).unwrap();

        for player in [P0, P1] {
            assert!(duel.is_terminal(&state).is_none());
            duel.submit_rules(&mut state, player).unwrap();
            duel.end_turn(&mut state, player).unwrap();
        }

        let result = duel.is_terminal(&state).unwrap();
        let (s0, s1) = (state.score[P0], state.score[P1]);
        match s0.cmp(&s1) {
            std::cmp::Ordering::Greater => assert_eq!(result, GameResult::Winner(P0)),
            std::cmp::Ordering::Less => assert_eq!(result, GameResult::Winner(P1)),
            std::cmp::Ordering::Equal => assert_eq!(result, GameResult::Draw),
        }

        assert!(duel.legal_actions(&state, P0).is_empty());
        assert_eq!(duel.submit_rules(&mut state, P0), Err(DuelError::GameOver));
    }

    #[test]
    fn test_three_way_tie_and_shared_lead() {
        let duel = CellDuel::new(RuleSet::sized().with_players(3).with_turn_limit(0)).unwrap();
        let mut state = DuelState::new(3, BoardSize::DEFAULT, RuleTable::SAMPLE, Row::zeroed(5));

        assert_eq!(duel.is_terminal(&state), Some(GameResult::Draw));

        state.score[P0] = 4;
        state.score[PlayerId::new(2)] = 4;
        assert_eq!(
            duel.is_terminal(&state),
            Some(GameResult::Winners(vec![P0, PlayerId::new(2)]))
        );
    }

    #[test]
    fn test_builder_validates() {
        let mut rng = GameRng::new(0);

        assert_eq!(
            DuelBuilder::new().players(1).build(&mut rng).err(),
            Some(DuelError::InvalidPlayerCount(1))
        );
        assert_eq!(
            DuelBuilder::new().board(5, 0).build(&mut rng).err(),
            Some(DuelError::InvalidDimensions { width: 5, height: 0 })
        );
    }
}
