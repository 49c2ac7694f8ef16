//! Rule-set configuration.
//!
//! The two observed variants of the game disagree on several rules, so
//! nothing is hardcoded. A [`RuleSet`] picks:
//! - `BoardSizing`: fixed board, or a setup phase where players choose it
//! - `EdgePolicy`: values assumed beyond the left and right edge
//! - `edit_quota`: rule flips allowed per turn (`None` = unlimited)
//! - `ScoringMode`: complementary scoring, or none at all
//!
//! Use [`RuleSet::sized`] or [`RuleSet::classic`] for the two stock
//! variants and the `with_*` methods to adjust.

use serde::{Deserialize, Serialize};

use super::error::{DuelError, DuelResult};
use crate::automaton::EdgePolicy;

/// Board width (cells per row) and height (rows per generation).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardSize {
    pub width: usize,
    pub height: usize,
}

impl BoardSize {
    /// Board used until someone picks another.
    pub const DEFAULT: BoardSize = BoardSize { width: 5, height: 5 };

    /// Longest side a board may have.
    pub const MAX_SIDE: usize = 1024;

    /// Validated board size; each side must be between 1 and
    /// [`MAX_SIDE`](Self::MAX_SIDE).
    pub fn new(width: usize, height: usize) -> DuelResult<Self> {
        let in_range = |side: usize| (1..=Self::MAX_SIDE).contains(&side);
        if !in_range(width) || !in_range(height) || width.checked_mul(height).is_none() {
            return Err(DuelError::InvalidDimensions { width, height });
        }
        Ok(Self { width, height })
    }

    #[must_use]
    pub fn cell_count(self) -> usize {
        self.width.saturating_mul(self.height)
    }
}

impl Default for BoardSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl std::fmt::Display for BoardSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Whether the board is fixed or chosen in a setup phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardSizing {
    /// Play starts immediately on the configured board.
    Fixed,
    /// The match opens in `Setup`; any seated player may start it with a
    /// board size of their choice.
    Configurable,
}

/// How finished grids turn into points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoringMode {
    /// The first player scores one per set cell, everyone else one per
    /// unset cell, each on the grid they produced.
    Complementary,
    /// No score is kept.
    Disabled,
}

/// Complete rule set for one match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    /// Seats at the table (2-255).
    pub player_count: usize,

    /// Initial board; in a `Configurable` game `StartGame` replaces it.
    pub board: BoardSize,

    pub sizing: BoardSizing,

    pub edges: EdgePolicy,

    /// Rule flips per editing stage. `None` lets the active player flip
    /// as many entries as they like.
    pub edit_quota: Option<u32>,

    pub scoring: ScoringMode,

    /// End the match after this many completed turns. `None` plays forever.
    pub turn_limit: Option<u32>,
}

impl RuleSet {
    /// Variable-size variant: setup phase, live right edge, one flip per
    /// turn, complementary scoring.
    #[must_use]
    pub fn sized() -> Self {
        Self {
            player_count: 2,
            board: BoardSize::DEFAULT,
            sizing: BoardSizing::Configurable,
            edges: EdgePolicy::SIZED,
            edit_quota: Some(1),
            scoring: ScoringMode::Complementary,
            turn_limit: None,
        }
    }

    /// Fixed 5x5 variant: no setup phase, dead edges, free editing, no
    /// score.
    #[must_use]
    pub fn classic() -> Self {
        Self {
            player_count: 2,
            board: BoardSize::DEFAULT,
            sizing: BoardSizing::Fixed,
            edges: EdgePolicy::CLASSIC,
            edit_quota: None,
            scoring: ScoringMode::Disabled,
            turn_limit: None,
        }
    }

    #[must_use]
    pub fn with_players(mut self, player_count: usize) -> Self {
        self.player_count = player_count;
        self
    }

    #[must_use]
    pub fn with_board(mut self, board: BoardSize) -> Self {
        self.board = board;
        self
    }

    #[must_use]
    pub fn with_edges(mut self, edges: EdgePolicy) -> Self {
        self.edges = edges;
        self
    }

    #[must_use]
    pub fn with_edit_quota(mut self, quota: Option<u32>) -> Self {
        self.edit_quota = quota;
        self
    }

    #[must_use]
    pub fn with_scoring(mut self, scoring: ScoringMode) -> Self {
        self.scoring = scoring;
        self
    }

    #[must_use]
    pub fn with_turn_limit(mut self, turns: u32) -> Self {
        self.turn_limit = Some(turns);
        self
    }

    /// Check seat count and board size before any state is built.
    pub fn validate(&self) -> DuelResult<()> {
        if !(2..=255).contains(&self.player_count) {
            return Err(DuelError::InvalidPlayerCount(self.player_count));
        }
        BoardSize::new(self.board.width, self.board.height)?;
        Ok(())
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::sized()
    }
}
