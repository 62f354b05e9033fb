use rand::Rng;

use super::game_state::{GameState, MoveDirection};

/// Rotation counts covered by the action space.
pub const ROTATION_SLOTS: usize = 4;

/// A "rotate, shift, drop" macro action.
///
/// Action codes enumerate every `(rotations, column)` pair as
/// `rotations * cols + column`, giving a discrete action space of
/// `4 * cols` entries.
///
/// ```
/// use blockfall_engine::Placement;
///
/// let placement = Placement::from_action_code(23, 10).unwrap();
/// assert_eq!(placement, Placement { rotations: 2, column: 3 });
/// assert_eq!(placement.action_code(10), 23);
/// assert_eq!(Placement::from_action_code(40, 10), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placement {
    /// Number of rotation attempts, `0..4`.
    pub rotations: usize,
    /// Target column, `0..cols`.
    pub column: usize,
}

impl Placement {
    #[must_use]
    pub const fn action_count(cols: usize) -> usize {
        ROTATION_SLOTS * cols
    }

    #[must_use]
    pub const fn from_action_code(code: usize, cols: usize) -> Option<Self> {
        if code >= Self::action_count(cols) {
            return None;
        }
        Some(Self {
            rotations: code / cols,
            column: code % cols,
        })
    }

    #[must_use]
    pub const fn action_code(self, cols: usize) -> usize {
        self.rotations * cols + self.column
    }

    /// Anchor column the shift phase aims for. Most boxes leave their first
    /// column empty, so the box sits one column left of the target.
    fn anchor_target(self) -> i32 {
        i32::try_from(self.column).map_or(i32::MAX, |column| column - 1)
    }
}

impl<R> GameState<R>
where
    R: Rng,
{
    /// Rotates the active piece `placement.rotations` times, shifts it toward
    /// the target column until it arrives or a move is refused, then hard
    /// drops it. Returns the hard-drop distance.
    ///
    /// The piece is not frozen; the driver ticks afterwards. Refused rotations
    /// and moves are skipped silently, like any other rejected action.
    pub fn apply_placement(&mut self, placement: Placement) -> usize {
        for _ in 0..placement.rotations {
            self.apply_rotate();
        }
        let target = placement.anchor_target();
        while let Some(falling) = self.falling_piece() {
            let col = falling.anchor().col;
            let direction = match col.cmp(&target) {
                std::cmp::Ordering::Less => MoveDirection::Right,
                std::cmp::Ordering::Greater => MoveDirection::Left,
                std::cmp::Ordering::Equal => break,
            };
            if !self.apply_move(direction) {
                break;
            }
        }
        self.apply_hard_drop()
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        GameConfig, PieceSeed, SpawnRotation,
        core::{Block, PieceKind},
    };

    use super::*;

    fn zero_rotation_game(seed: u8) -> GameState {
        let config = GameConfig {
            spawn_rotation: SpawnRotation::Zero,
            ..GameConfig::default()
        };
        GameState::with_seed(config, PieceSeed::from_bytes([seed; 16])).unwrap()
    }

    #[test]
    fn test_action_codes_cover_every_pair() {
        let cols = 6;
        let decoded: Vec<_> = (0..Placement::action_count(cols))
            .map(|code| Placement::from_action_code(code, cols).unwrap())
            .collect();
        assert_eq!(decoded.len(), 24);
        assert_eq!(decoded[0], Placement { rotations: 0, column: 0 });
        assert_eq!(decoded[7], Placement { rotations: 1, column: 1 });
        assert_eq!(decoded[23], Placement { rotations: 3, column: 5 });
        for (code, placement) in decoded.iter().enumerate() {
            assert_eq!(placement.action_code(cols), code);
        }
        assert_eq!(Placement::from_action_code(24, cols), None);
    }

    #[test]
    fn test_placement_lands_at_target_column() {
        let mut state = zero_rotation_game(3);
        let piece = state.falling_piece().unwrap().piece();
        let rows = state.row_count();
        let distance = state.apply_placement(Placement {
            rotations: 0,
            column: 0,
        });
        assert!(distance > 0);
        let falling = state.falling_piece().unwrap();
        assert_eq!(falling.piece(), piece);
        // The leftmost occupied cell is against the wall or at the target.
        let min_col = falling.cells().map(|(_, c)| c).min().unwrap();
        assert!(min_col <= 1, "{piece:?} stopped at column {min_col}");
        let max_row = falling.cells().map(|(r, _)| r).max().unwrap();
        assert_eq!(max_row, i32::try_from(rows).unwrap() - 1);
    }

    #[test]
    fn test_placement_shift_stops_at_wall() {
        let mut state = zero_rotation_game(11);
        let cols = state.col_count();
        state.apply_placement(Placement {
            rotations: 1,
            column: cols - 1,
        });
        let falling = state.falling_piece().unwrap();
        let max_col = falling.cells().map(|(_, c)| c).max().unwrap();
        assert_eq!(max_col, i32::try_from(cols).unwrap() - 1);
        assert_eq!(state.stats().hard_drops(), 1);
    }

    #[test]
    fn test_placement_then_tick_freezes_piece() {
        let mut state = zero_rotation_game(5);
        let kind = state.falling_piece().unwrap().piece().kind();
        state.apply_placement(Placement {
            rotations: 2,
            column: 4,
        });
        state.tick();
        let color = kind.shape().color();
        let frozen: Vec<_> = state
            .board()
            .rows()
            .flatten()
            .filter(|b| **b == Block::Frozen(color))
            .collect();
        assert_eq!(frozen.len(), 4);
        assert_eq!(state.stats().completed_pieces(), 1);
    }

    #[test]
    fn test_o_piece_placement_counts_rotations() {
        let mut state = (0..=u8::MAX)
            .map(zero_rotation_game)
            .find(|state| state.falling_piece().unwrap().piece().kind() == PieceKind::O)
            .unwrap();
        let before = state.stats().rotations();
        state.apply_placement(Placement {
            rotations: 3,
            column: 5,
        });
        assert_eq!(state.stats().rotations(), before + 3);
    }

    #[test]
    fn test_placement_on_terminated_game_is_a_no_op() {
        let mut state = zero_rotation_game(9);
        while state.status().is_running() {
            state.apply_hard_drop();
            state.tick();
        }
        let stats = state.stats().clone();
        assert_eq!(
            state.apply_placement(Placement {
                rotations: 1,
                column: 0
            }),
            0
        );
        assert_eq!(state.stats(), &stats);
    }
}
