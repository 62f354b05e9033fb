use serde::{Deserialize, Serialize};

use super::game_state::MoveDirection;

/// Points for a landing, indexed by the number of rows it cleared (single,
/// double, triple, tetris).
const SCORE_TABLE: [usize; 5] = [0, 100, 300, 500, 800];

/// Points per row of a soft drop.
pub const SOFT_DROP_SCORE: usize = 1;
/// Points per row of a hard drop.
pub const HARD_DROP_SCORE: usize = 2;

/// Score and counters of one game.
///
/// Every field only ever grows.
///
/// # Example
///
/// ```
/// use blockfall_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.complete_piece_drop(4);
///
/// assert_eq!(stats.score(), 800);
/// assert_eq!(stats.tetrises(), 1);
/// assert_eq!(stats.total_cleared_lines(), 4);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    score: usize,
    left_moves: usize,
    right_moves: usize,
    rotations: usize,
    soft_drops: usize,
    soft_drop_distance: usize,
    hard_drops: usize,
    hard_drop_distance: usize,
    completed_pieces: usize,
    total_cleared_lines: usize,
    line_cleared_counter: [usize; 5],
}

impl GameStats {
    /// Creates a new tracker with all counters at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            left_moves: 0,
            right_moves: 0,
            rotations: 0,
            soft_drops: 0,
            soft_drop_distance: 0,
            hard_drops: 0,
            hard_drop_distance: 0,
            completed_pieces: 0,
            total_cleared_lines: 0,
            line_cleared_counter: [0; 5],
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub const fn left_moves(&self) -> usize {
        self.left_moves
    }

    #[must_use]
    pub const fn right_moves(&self) -> usize {
        self.right_moves
    }

    #[must_use]
    pub const fn rotations(&self) -> usize {
        self.rotations
    }

    #[must_use]
    pub const fn soft_drops(&self) -> usize {
        self.soft_drops
    }

    #[must_use]
    pub const fn soft_drop_distance(&self) -> usize {
        self.soft_drop_distance
    }

    #[must_use]
    pub const fn hard_drops(&self) -> usize {
        self.hard_drops
    }

    #[must_use]
    pub const fn hard_drop_distance(&self) -> usize {
        self.hard_drop_distance
    }

    /// Returns the total number of pieces that have frozen into the board.
    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Returns a histogram of landings by number of lines cleared.
    ///
    /// `[0]` counts landings that cleared nothing, `[4]` counts tetrises.
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    #[must_use]
    pub const fn singles(&self) -> usize {
        self.line_cleared_counter[1]
    }

    #[must_use]
    pub const fn doubles(&self) -> usize {
        self.line_cleared_counter[2]
    }

    #[must_use]
    pub const fn triples(&self) -> usize {
        self.line_cleared_counter[3]
    }

    #[must_use]
    pub const fn tetrises(&self) -> usize {
        self.line_cleared_counter[4]
    }

    pub fn record_move(&mut self, direction: MoveDirection) {
        match direction {
            MoveDirection::Left => self.left_moves += 1,
            MoveDirection::Right => self.right_moves += 1,
            MoveDirection::Down => {
                self.soft_drops += 1;
                self.soft_drop_distance += 1;
                self.score += SOFT_DROP_SCORE;
            }
        }
    }

    pub fn record_rotation(&mut self) {
        self.rotations += 1;
    }

    /// Records a hard drop of `distance` rows. A zero-distance drop is not an
    /// event and leaves the counters untouched.
    pub fn record_hard_drop(&mut self, distance: usize) {
        if distance == 0 {
            return;
        }
        self.hard_drops += 1;
        self.hard_drop_distance += distance;
        self.score += distance * HARD_DROP_SCORE;
    }

    /// Updates statistics after a piece freezes and returns the points the
    /// line clear earned.
    ///
    /// # Panics
    ///
    /// Panics if `cleared_lines > 4`; a single piece spans at most four rows,
    /// so a larger count means the board state is corrupt.
    pub fn complete_piece_drop(&mut self, cleared_lines: usize) -> usize {
        assert!(
            cleared_lines < SCORE_TABLE.len(),
            "one landing cleared {cleared_lines} lines"
        );
        let points = SCORE_TABLE[cleared_lines];
        self.completed_pieces += 1;
        self.total_cleared_lines += cleared_lines;
        self.line_cleared_counter[cleared_lines] += 1;
        self.score += points;
        points
    }
}
