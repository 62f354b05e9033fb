use std::fmt;

use super::{board::Board, piece::FallingPiece, shape::Color};

/// A cell of the combined view: frozen and falling layers never share a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, derive_more::IsVariant)]
pub enum ViewCell {
    #[default]
    Empty,
    Frozen(Color),
    Falling(Color),
}

impl ViewCell {
    #[must_use]
    pub fn is_occupied(self) -> bool {
        !self.is_empty()
    }

    #[must_use]
    pub fn color(self) -> Option<Color> {
        match self {
            ViewCell::Empty => None,
            ViewCell::Frozen(color) | ViewCell::Falling(color) => Some(color),
        }
    }
}

/// Read-only snapshot of the frozen board with the falling piece overlaid.
///
/// Built on demand for renderers and debugging; the engine itself never
/// stores the overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView {
    rows: usize,
    cols: usize,
    cells: Vec<ViewCell>,
}

impl BoardView {
    /// Overlays `falling` onto `board`.
    ///
    /// # Panics
    ///
    /// Panics if a falling cell lies outside the board or on a frozen cell.
    #[must_use]
    pub fn new(board: &Board, falling: Option<FallingPiece>) -> Self {
        let rows = board.row_count();
        let cols = board.col_count();
        let mut cells: Vec<ViewCell> = board
            .rows()
            .flatten()
            .map(|block| block.color().map_or(ViewCell::Empty, ViewCell::Frozen))
            .collect();
        if let Some(falling) = falling {
            let color = falling.color();
            for (row, col) in falling.cells() {
                let Some((row, col)) = board.index_of(row, col) else {
                    panic!("falling cell ({row}, {col}) outside the board");
                };
                let cell = &mut cells[row * cols + col];
                assert!(
                    cell.is_empty(),
                    "falling cell ({row}, {col}) overlaps {cell:?}"
                );
                *cell = ViewCell::Falling(color);
            }
        }
        Self { rows, cols, cells }
    }

    /// Number of rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub fn col_count(&self) -> usize {
        self.cols
    }

    /// Returns the cell at (`row`, `col`).
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the view.
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> ViewCell {
        assert!(row < self.rows && col < self.cols, "({row}, {col}) outside view");
        self.cells[row * self.cols + col]
    }

    /// Combined occupancy: frozen OR falling.
    #[must_use]
    pub fn occupancy(&self, row: usize, col: usize) -> bool {
        self.cell(row, col).is_occupied()
    }

    /// Frozen color where frozen, falling color where falling, else `None`.
    #[must_use]
    pub fn color(&self, row: usize, col: usize) -> Option<Color> {
        self.cell(row, col).color()
    }

    /// Iterates over the rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[ViewCell]> {
        self.cells.chunks(self.cols)
    }
}

impl fmt::Display for BoardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for cell in row {
                let ch = match cell {
                    ViewCell::Empty => '.',
                    ViewCell::Frozen(_) => '#',
                    ViewCell::Falling(_) => '@',
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::core::{
        piece::{Anchor, Piece},
        shape::PieceKind,
    };

    use super::*;

    #[test]
    fn test_view_overlays_falling_piece() {
        let board = Board::from_ascii(
            "
            ....
            ....
            ....
            Z..#
            ",
        );
        let falling = FallingPiece::new(Piece::new(PieceKind::O), Anchor::new(1, 0));
        let view = BoardView::new(&board, Some(falling));
        assert_eq!(view.to_string(), "....\n.@@.\n.@@.\n#..#\n");
        assert_eq!(view.color(1, 1), Some(Color::Yellow));
        assert_eq!(view.color(3, 0), Some(Color::Red));
        assert_eq!(view.color(0, 0), None);
        assert!(view.occupancy(3, 3));
        assert!(!view.occupancy(3, 1));
        assert_eq!(view.row_count(), 4);
    }

    #[test]
    fn test_view_without_falling_piece() {
        let board = Board::from_ascii(
            "
            .#
            ..
            ",
        );
        let view = BoardView::new(&board, None);
        assert_eq!(view.to_string(), ".#\n..\n");
        assert_eq!(view.cell(0, 1), ViewCell::Frozen(Color::Grey));
    }

    #[test]
    #[should_panic(expected = "overlaps")]
    fn test_overlap_is_an_invariant_violation() {
        let board = Board::from_ascii(
            "
            ..#.
            ....
            ",
        );
        let falling = FallingPiece::new(Piece::new(PieceKind::O), Anchor::new(0, 0));
        let _ = BoardView::new(&board, Some(falling));
    }
}
