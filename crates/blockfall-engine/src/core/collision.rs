//! Legality checks shared by staging, movement, rotation and gravity.

use super::{
    board::Board,
    piece::{Anchor, Piece},
};

/// Returns `true` if placing `piece` with its box at `anchor` leaves the grid
/// or overlaps a frozen cell.
///
/// Only the frozen board is consulted, so the same check serves a piece being
/// staged and one that is already falling.
#[must_use]
pub fn is_illegal(board: &Board, piece: Piece, anchor: Anchor) -> bool {
    piece.shape_box().cells().any(|(row, col)| {
        let (row, col) = anchor.offset(row, col);
        board
            .index_of(row, col)
            .is_none_or(|(row, col)| board.is_occupied(row, col))
    })
}

/// Returns `true` if the piece could not move one row further down.
#[must_use]
pub fn is_resting(board: &Board, piece: Piece, anchor: Anchor) -> bool {
    is_illegal(board, piece, anchor.down())
}
