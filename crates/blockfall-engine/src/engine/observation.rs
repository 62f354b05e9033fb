use crate::core::{Board, FallingPiece};

use super::game_stats::GameStats;

/// Number of occupancy layers in an [`Observation`].
pub const OBSERVATION_LAYERS: usize = 2;

/// Numeric encoding of the playfield for a learning agent.
///
/// Laid out as `[layer][row][col]`: layer 0 is frozen occupancy and layer 1 is
/// the falling piece, with `1.0` for occupied cells and `0.0` otherwise. The
/// shape depends only on the board dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    rows: usize,
    cols: usize,
    data: Vec<f32>,
}

impl Observation {
    /// Encodes `board` and the falling piece.
    ///
    /// # Panics
    ///
    /// Panics if a falling cell lies outside the board.
    #[must_use]
    pub fn new(board: &Board, falling: Option<FallingPiece>) -> Self {
        let rows = board.row_count();
        let cols = board.col_count();
        let mut data = vec![0.0; OBSERVATION_LAYERS * rows * cols];
        let (frozen, falling_layer) = data.split_at_mut(rows * cols);
        for (cell, block) in frozen.iter_mut().zip(board.rows().flatten()) {
            if block.is_frozen() {
                *cell = 1.0;
            }
        }
        for (row, col) in falling.into_iter().flat_map(FallingPiece::cells) {
            let Some((row, col)) = board.index_of(row, col) else {
                panic!("falling cell ({row}, {col}) outside the board");
            };
            falling_layer[row * cols + col] = 1.0;
        }
        Self { rows, cols, data }
    }

    /// `[layers, rows, cols]`.
    #[must_use]
    pub fn shape(&self) -> [usize; 3] {
        [OBSERVATION_LAYERS, self.rows, self.cols]
    }

    /// `1.0` where a frozen block sits, else `0.0`.
    #[must_use]
    pub fn frozen(&self, row: usize, col: usize) -> f32 {
        self.value(0, row, col)
    }

    /// `1.0` where the falling piece sits, else `0.0`.
    #[must_use]
    pub fn falling(&self, row: usize, col: usize) -> f32 {
        self.value(1, row, col)
    }

    fn value(&self, layer: usize, row: usize, col: usize) -> f32 {
        assert!(row < self.rows && col < self.cols, "({row}, {col}) outside observation");
        self.data[(layer * self.rows + row) * self.cols + col]
    }

    /// Flat layer-major data.
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }
}

/// Score gained between two snapshots of the same game.
///
/// Negative only if `after` does not follow `before`.
#[must_use]
pub fn reward(before: &GameStats, after: &GameStats) -> i64 {
    to_i64(after.score()) - to_i64(before.score())
}

fn to_i64(score: usize) -> i64 {
    i64::try_from(score).unwrap_or(i64::MAX)
}
