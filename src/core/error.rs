//! Rejection reasons for engine actions.
//!
//! Every error is recoverable: an action that returns `Err` has left the
//! [`DuelState`](super::DuelState) exactly as it found it.

use thiserror::Error;

use super::config::BoardSize;
use super::player::PlayerId;
use super::state::TurnPhase;

/// Why an action or setup request was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DuelError {
    #[error("`{0}` is not a 3-cell pattern (expected one of \"000\"..\"111\")")]
    InvalidPattern(String),

    #[error("{action} is not allowed for {player} during {phase}")]
    InvalidActionForStage {
        action: &'static str,
        phase: TurnPhase,
        player: PlayerId,
    },

    #[error("no rule edits left this turn")]
    BudgetExhausted,

    #[error("no rule edit to undo this stage")]
    NothingToUndo,

    #[error("board sides must be between 1 and {}, got {width}x{height}", BoardSize::MAX_SIDE)]
    InvalidDimensions { width: usize, height: usize },

    #[error("the match is over")]
    GameOver,

    #[error("a duel needs between 2 and 255 players, got {0}")]
    InvalidPlayerCount(usize),
}

pub type DuelResult<T> = Result<T, DuelError>;
