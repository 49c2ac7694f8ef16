//! Rows and the fixed-size board they stack into.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;

use super::pattern::Bit;
use crate::core::GameRng;

/// One generation of cells, left to right.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(Vec<Bit>);

impl Row {
    #[must_use]
    pub fn zeroed(width: usize) -> Self {
        Row(vec![Bit::ZERO; width])
    }

    pub fn random(width: usize, rng: &mut GameRng) -> Self {
        Row((0..width).map(|_| Bit::from(rng.gen_bit())).collect())
    }

    /// Build from `0`/`1` values; anything non-zero counts as set.
    ///
    /// ```
    /// use cell_duel::automaton::Row;
    ///
    /// let row = Row::from_bits([1, 0, 0, 0, 0]);
    /// assert_eq!(row.width(), 5);
    /// assert_eq!(row.count_set(), 1);
    /// ```
    pub fn from_bits(bits: impl IntoIterator<Item = u8>) -> Self {
        Row(bits.into_iter().map(|b| Bit::from(b != 0)).collect())
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn get(&self, column: usize) -> Option<Bit> {
        self.0.get(column).copied()
    }

    #[must_use]
    pub fn bits(&self) -> &[Bit] {
        &self.0
    }

    #[must_use]
    pub fn count_set(&self) -> usize {
        self.0.iter().filter(|b| b.is_set()).count()
    }

    pub fn clear(&mut self) {
        self.0.fill(Bit::ZERO);
    }

    pub fn iter(&self) -> impl Iterator<Item = Bit> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Bit> for Row {
    fn from_iter<I: IntoIterator<Item = Bit>>(iter: I) -> Self {
        Row(iter.into_iter().collect())
    }
}

impl Index<usize> for Row {
    type Output = Bit;

    fn index(&self, column: usize) -> &Bit {
        &self.0[column]
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in &self.0 {
            f.write_str(if bit.is_set() { "#" } else { "." })?;
        }
        Ok(())
    }
}

/// `height` rows of `width` cells.
///
/// Every row is exactly `width` cells wide. [`Grid::from_rows`] rejects
/// ragged input, and deserialising checks the same thing.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "GridRepr")]
pub struct Grid {
    width: usize,
    rows: Vec<Row>,
}

/// Unchecked wire form of a [`Grid`].
#[derive(Deserialize)]
struct GridRepr {
    width: usize,
    rows: Vec<Row>,
}

impl TryFrom<GridRepr> for Grid {
    type Error = String;

    fn try_from(repr: GridRepr) -> Result<Self, Self::Error> {
        if repr.rows.is_empty() {
            return Ok(Grid::zeroed(repr.width, 0));
        }
        match Grid::from_rows(repr.rows) {
            Some(grid) if grid.width == repr.width => Ok(grid),
            Some(grid) => Err(format!("grid width is {} but its rows are {} wide", repr.width, grid.width)),
            None => Err("grid rows differ in width".to_string()),
        }
    }
}

impl Grid {
    #[must_use]
    pub fn zeroed(width: usize, height: usize) -> Self {
        Self {
            width,
            rows: vec![Row::zeroed(width); height],
        }
    }

    /// Stack rows into a grid, or `None` if the rows are ragged or empty.
    #[must_use]
    pub fn from_rows(rows: Vec<Row>) -> Option<Self> {
        let width = rows.first()?.width();
        if rows.iter().any(|r| r.width() != width) {
            return None;
        }
        Some(Self { width, rows })
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.width * self.rows.len()
    }

    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    #[must_use]
    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// Bottom row; becomes the next turn's boundary row.
    #[must_use]
    pub fn last_row(&self) -> Option<&Row> {
        self.rows.last()
    }

    #[must_use]
    pub fn get(&self, row: usize, column: usize) -> Option<Bit> {
        self.rows.get(row)?.get(column)
    }

    #[must_use]
    pub fn count_set(&self) -> usize {
        self.rows.iter().map(Row::count_set).sum()
    }

    #[must_use]
    pub fn count_unset(&self) -> usize {
        self.cells().filter(|bit| !bit.is_set()).count()
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.count_set() == 0
    }

    /// Reset every cell to 0, keeping the dimensions.
    pub fn clear(&mut self) {
        for row in &mut self.rows {
            row.clear();
        }
    }

    /// Every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Bit> + '_ {
        self.rows.iter().flat_map(Row::iter)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}
