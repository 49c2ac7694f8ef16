//! Rules engine trait for the turn controller.
//!
//! The orchestration layer only needs this trait:
//! - What actions a seat may submit right now
//! - How an action changes the state (or why it is rejected)
//! - Whether the match is over

use crate::core::{Action, DuelResult, DuelState, GameRng, PlayerId, RuleSet};

/// Result of a finished match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Several seats tied on the top score.
    Winners(Vec<PlayerId>),
    /// Nobody scored (scoring disabled, or every seat on 0).
    Draw,
}

impl GameResult {
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
            GameResult::Winners(ps) => ps.contains(&player),
            GameResult::Draw => false,
        }
    }
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `legal_actions`: empty if the seat cannot act
/// - `apply_action`: all-or-nothing; on `Err` the state is untouched
/// - `apply_action`: deterministic given the state, action and RNG position
/// - `is_terminal`: `None` while the match continues
pub trait RulesEngine {
    fn rule_set(&self) -> &RuleSet;

    /// Actions `player` could submit now.
    ///
    /// `StartGame` is parameterised by the board size; it is listed with
    /// the current board.
    fn legal_actions(&self, state: &DuelState, player: PlayerId) -> Vec<Action>;

    /// Apply `action` for `player`.
    ///
    /// `rng` is only drawn from by actions that deal a fresh board.
    fn apply_action(
        &self,
        state: &mut DuelState,
        player: PlayerId,
        action: Action,
        rng: &mut GameRng,
    ) -> DuelResult<()>;

    fn is_terminal(&self, state: &DuelState) -> Option<GameResult>;

    /// Whether `action` would be accepted, without applying it.
    fn is_legal(&self, state: &DuelState, player: PlayerId, action: Action) -> bool {
        let mut probe = state.clone();
        let mut rng = GameRng::new(0);
        self.apply_action(&mut probe, player, action, &mut rng).is_ok()
    }
}
