use rand::Rng;
use rand_pcg::Pcg32;
use tracing::trace;

use crate::{
    SpawnFailure,
    core::{Anchor, Board, Piece, PieceKind, SHAPE_BOX_SIZE, collision},
};

use super::game_config::SpawnRotation;

/// Number of anchor rows tried when staging: `0, -1, -2, -3`.
pub const SPAWN_ATTEMPTS: i32 = 4;

/// Draws random pieces from an injected generator.
///
/// Kinds are picked uniformly from the catalog. With
/// [`SpawnRotation::Random`] the initial rotation is also uniform among the
/// kind's rotation states.
///
/// ```
/// use blockfall_engine::{PieceSeed, SpawnRotation, Spawner};
///
/// let seed = PieceSeed::from_bytes([1; 16]);
/// let mut spawner = Spawner::new(seed.rng(), SpawnRotation::Zero);
/// assert_eq!(spawner.draw_random_piece().rotation(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct Spawner<R = Pcg32> {
    rng: R,
    spawn_rotation: SpawnRotation,
}

impl<R> Spawner<R>
where
    R: Rng,
{
    pub fn new(rng: R, spawn_rotation: SpawnRotation) -> Self {
        Self {
            rng,
            spawn_rotation,
        }
    }

    #[must_use]
    pub fn spawn_rotation(&self) -> SpawnRotation {
        self.spawn_rotation
    }

    pub fn draw_random_piece(&mut self) -> Piece {
        let kind: PieceKind = self.rng.random();
        let rotation = match self.spawn_rotation {
            SpawnRotation::Random => self.rng.random_range(0..kind.shape().rotation_count()),
            SpawnRotation::Zero => 0,
        };
        Piece::with_rotation(kind, rotation)
    }
}

/// Column of the anchor for newly staged pieces: the box centered, rounded
/// toward the left.
#[must_use]
pub fn spawn_column(cols: usize) -> i32 {
    let col = cols.saturating_sub(SHAPE_BOX_SIZE) / 2;
    i32::try_from(col).unwrap_or(i32::MAX)
}

/// Finds the anchor for a queued piece entering the board.
///
/// Tries rows `0, -1, -2, -3` at the spawn column against the frozen cells
/// only and returns the first legal anchor.
pub fn stage(board: &Board, piece: Piece) -> Result<Anchor, SpawnFailure> {
    let col = spawn_column(board.col_count());
    for attempt in 0..SPAWN_ATTEMPTS {
        let anchor = Anchor::new(-attempt, col);
        if !collision::is_illegal(board, piece, anchor) {
            return Ok(anchor);
        }
        trace!(kind = %piece.kind(), row = anchor.row, "spawn attempt collided");
    }
    Err(SpawnFailure { piece })
}
