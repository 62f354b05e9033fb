use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{
    ConfigError,
    core::{Board, BoardView, FallingPiece, Piece, collision},
};

use super::{
    game_config::GameConfig,
    game_stats::GameStats,
    observation::Observation,
    piece_seed::PieceSeed,
    spawner::{self, Spawner},
};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::IsVariant,
)]
pub enum GameStatus {
    Running,
    /// Terminal; every operation is a no-op from here on.
    Terminated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveDirection {
    Left,
    Right,
    /// Soft drop.
    Down,
}

/// One game: the frozen board, the falling piece, the queued piece and the
/// statistics.
///
/// The game is running exactly while a falling piece exists. Staging failure
/// clears the falling piece, and nothing stages a new one afterwards, so the
/// transition to [`GameStatus::Terminated`] happens once and is final.
///
/// All operations are synchronous and mutate the state in place. Actions
/// return whether they changed anything; a rejected action is a silent no-op.
#[derive(Debug, Clone)]
pub struct GameState<R = Pcg32> {
    config: GameConfig,
    board: Board,
    falling: Option<FallingPiece>,
    next_piece: Piece,
    spawner: Spawner<R>,
    stats: GameStats,
}

impl GameState<Pcg32> {
    /// Like [`Self::new_game`], with a [`Pcg32`] generator seeded from `seed`.
    pub fn with_seed(config: GameConfig, seed: PieceSeed) -> Result<Self, ConfigError> {
        Self::new_game(config, seed.rng())
    }
}

impl<R> GameState<R>
where
    R: Rng,
{
    /// Starts a game on an empty board.
    ///
    /// A piece is drawn and staged, then the next piece is drawn into the
    /// queue.
    pub fn new_game(config: GameConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut spawner = Spawner::new(rng, config.spawn_rotation);
        let next_piece = spawner.draw_random_piece();
        let mut state = Self {
            config,
            board: Board::new(config.rows, config.cols),
            falling: None,
            next_piece,
            spawner,
            stats: GameStats::new(),
        };
        state.stage_next_piece();
        debug!(
            rows = config.rows,
            cols = config.cols,
            spawn_rotation = %config.spawn_rotation,
            "new game"
        );
        Ok(state)
    }

    /// Returns the configuration the game was started with.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Returns the number of board rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.board.row_count()
    }

    /// Returns the number of board columns.
    #[must_use]
    pub fn col_count(&self) -> usize {
        self.board.col_count()
    }

    /// Returns [`GameStatus::Running`] while a falling piece exists.
    #[must_use]
    pub fn status(&self) -> GameStatus {
        if self.falling.is_some() {
            GameStatus::Running
        } else {
            GameStatus::Terminated
        }
    }

    /// Returns the current score.
    #[must_use]
    pub fn score(&self) -> usize {
        self.stats.score()
    }

    /// Returns the score and every counter.
    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    /// The frozen cells only.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The active piece, or `None` once the game has terminated.
    #[must_use]
    pub fn falling_piece(&self) -> Option<FallingPiece> {
        self.falling
    }

    /// The queued piece, for a "next piece" preview.
    #[must_use]
    pub fn next_piece(&self) -> Piece {
        self.next_piece
    }

    /// Frozen cells combined with the falling piece.
    #[must_use]
    pub fn view(&self) -> BoardView {
        BoardView::new(&self.board, self.falling)
    }

    /// Returns the two-layer numeric encoding of the playfield.
    #[must_use]
    pub fn observation(&self) -> Observation {
        Observation::new(&self.board, self.falling)
    }

    /// Advances gravity by one step.
    ///
    /// A resting piece is frozen into the board, full rows are cleared and
    /// scored, and the queued piece is staged. Otherwise the piece moves one
    /// row down.
    pub fn tick(&mut self) {
        let Some(falling) = self.falling else {
            return;
        };
        let (piece, anchor) = (falling.piece(), falling.anchor());
        if !collision::is_resting(&self.board, piece, anchor) {
            self.falling = Some(falling.with_anchor(anchor.down()));
            return;
        }

        self.board.freeze(piece, anchor);
        let cleared = self.board.clear_completed_rows();
        let points = self.stats.complete_piece_drop(cleared);
        debug!(
            kind = %piece.kind(),
            row = anchor.row,
            col = anchor.col,
            cleared,
            points,
            score = self.stats.score(),
            "piece frozen"
        );
        self.stage_next_piece();
    }

    /// Shifts the piece one cell; `Down` is a soft drop worth one point.
    pub fn apply_move(&mut self, direction: MoveDirection) -> bool {
        let Some(falling) = self.falling else {
            return false;
        };
        let anchor = match direction {
            MoveDirection::Left => falling.anchor().left(),
            MoveDirection::Right => falling.anchor().right(),
            MoveDirection::Down => falling.anchor().down(),
        };
        if collision::is_illegal(&self.board, falling.piece(), anchor) {
            trace!(?direction, "move rejected");
            return false;
        }
        self.falling = Some(falling.with_anchor(anchor));
        self.stats.record_move(direction);
        true
    }

    /// Advances the rotation index in place. No kick is attempted: a rotation
    /// that would collide is refused.
    pub fn apply_rotate(&mut self) -> bool {
        let Some(falling) = self.falling else {
            return false;
        };
        let rotated = falling.rotated();
        if collision::is_illegal(&self.board, rotated.piece(), rotated.anchor()) {
            trace!(kind = %falling.piece().kind(), "rotation rejected");
            return false;
        }
        self.falling = Some(rotated);
        self.stats.record_rotation();
        true
    }

    /// Moves the piece straight down until it rests and returns the distance.
    ///
    /// The piece is left resting, not frozen; the next [`Self::tick`] freezes
    /// it. A zero-distance drop changes nothing.
    pub fn apply_hard_drop(&mut self) -> usize {
        let Some(mut falling) = self.falling else {
            return 0;
        };
        let mut distance = 0;
        while !collision::is_resting(&self.board, falling.piece(), falling.anchor()) {
            falling = falling.with_anchor(falling.anchor().down());
            distance += 1;
        }
        if distance == 0 {
            trace!("hard drop on resting piece ignored");
            return 0;
        }
        self.falling = Some(falling);
        self.stats.record_hard_drop(distance);
        distance
    }

    fn stage_next_piece(&mut self) {
        let queued = self.next_piece;
        let staged = spawner::stage(&self.board, queued);
        self.next_piece = self.spawner.draw_random_piece();
        match staged {
            Ok(anchor) => self.falling = Some(FallingPiece::new(queued, anchor)),
            Err(err) => {
                self.falling = None;
                debug!(
                    %err,
                    score = self.stats.score(),
                    completed_pieces = self.stats.completed_pieces(),
                    "game terminated"
                );
            }
        }
    }
}
