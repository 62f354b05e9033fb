use super::{
    piece::{Anchor, Piece},
    shape::{Color, PieceKind},
};

/// A single frozen-grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, derive_more::IsVariant)]
pub enum Block {
    #[default]
    Empty,
    /// Left behind by a piece that has landed.
    Frozen(Color),
}

impl Block {
    #[must_use]
    pub fn color(self) -> Option<Color> {
        match self {
            Block::Empty => None,
            Block::Frozen(color) => Some(color),
        }
    }
}

/// The grid of frozen cells, independent of any falling piece.
///
/// Occupancy and color are stored together in one [`Block`] per cell, so a
/// color exists exactly where a cell is occupied. Only [`Board::freeze`] and
/// [`Board::clear_completed_rows`] mutate it during play.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Anchor, Board, Piece, PieceKind};
///
/// let mut board = Board::new(4, 4);
/// board.freeze(Piece::with_rotation(PieceKind::I, 1), Anchor::new(2, 0));
/// assert_eq!(board.clear_completed_rows(), 1);
/// assert!(board.rows().all(|row| row.iter().all(|b| b.is_empty())));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Block>,
}

impl Board {
    /// Creates an empty board.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        assert!(
            rows > 0 && cols > 0,
            "board needs at least one row and one column, got {rows} x {cols}"
        );
        Self {
            rows,
            cols,
            cells: vec![Block::Empty; rows * cols],
        }
    }

    /// Number of rows, counted from the top.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub fn col_count(&self) -> usize {
        self.cols
    }

    /// Converts a signed coordinate to a grid index, or `None` if it lies
    /// outside `[0, rows) × [0, cols)`.
    #[must_use]
    pub fn index_of(&self, row: i32, col: i32) -> Option<(usize, usize)> {
        let row = usize::try_from(row).ok().filter(|&r| r < self.rows)?;
        let col = usize::try_from(col).ok().filter(|&c| c < self.cols)?;
        Some((row, col))
    }

    /// Whether a signed coordinate lies inside the grid.
    #[must_use]
    pub fn contains(&self, row: i32, col: i32) -> bool {
        self.index_of(row, col).is_some()
    }

    /// Returns the block at (`row`, `col`).
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the grid.
    #[must_use]
    pub fn block(&self, row: usize, col: usize) -> Block {
        assert!(row < self.rows && col < self.cols, "({row}, {col}) outside board");
        self.cells[row * self.cols + col]
    }

    /// Whether the cell holds a frozen block.
    #[must_use]
    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        self.block(row, col).is_frozen()
    }

    /// The blocks of one row, left to right.
    ///
    /// # Panics
    ///
    /// Panics if `row` is outside the grid.
    #[must_use]
    pub fn row(&self, row: usize) -> &[Block] {
        &self.cells[row * self.cols..][..self.cols]
    }

    /// Iterates over the rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Block]> {
        self.cells.chunks(self.cols)
    }

    /// Whether every cell of `row` is frozen.
    #[must_use]
    pub fn is_row_full(&self, row: usize) -> bool {
        self.row(row).iter().all(|b| b.is_frozen())
    }

    /// Overwrites a single cell, keeping occupancy and color together.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the grid.
    pub fn fill_block_at(&mut self, row: usize, col: usize, block: Block) {
        assert!(row < self.rows && col < self.cols, "({row}, {col}) outside board");
        self.cells[row * self.cols + col] = block;
    }

    /// Unions the piece's cells into the grid with the piece's color.
    ///
    /// # Panics
    ///
    /// Panics if any cell of the piece is out of bounds or already frozen.
    pub fn freeze(&mut self, piece: Piece, anchor: Anchor) {
        let color = piece.color();
        for (row, col) in piece.shape_box().cells() {
            let (row, col) = anchor.offset(row, col);
            let Some((row, col)) = self.index_of(row, col) else {
                panic!("freezing {} outside the board at ({row}, {col})", piece.kind());
            };
            assert!(
                !self.is_occupied(row, col),
                "freezing {} onto frozen cell ({row}, {col})",
                piece.kind()
            );
            self.fill_block_at(row, col, Block::Frozen(color));
        }
    }

    /// Removes every fully occupied row and compacts the rows above it down.
    ///
    /// Rows are scanned bottom-up. A full row is removed by shifting every row
    /// above it down by one and emptying row 0; the same index is then tested
    /// again before moving up, since the shifted material may be full as well.
    ///
    /// Returns the number of rows removed.
    pub fn clear_completed_rows(&mut self) -> usize {
        let cols = self.cols;
        let mut removed = 0;
        let mut row = self.rows;
        while row > 0 {
            row -= 1;
            while self.is_row_full(row) {
                self.cells.copy_within(..row * cols, cols);
                self.cells[..cols].fill(Block::Empty);
                removed += 1;
            }
        }
        removed
    }

    /// Builds a board from ASCII art, one line per row from top to bottom.
    ///
    /// `.` is empty, a piece letter (`I`, `O`, `L`, `J`, `T`, `S`, `Z`) is a
    /// frozen cell in that kind's color and `#` is a frozen [`Color::Grey`]
    /// cell. Blank lines and surrounding whitespace are ignored.
    ///
    /// # Panics
    ///
    /// Panics if the art has no rows, if rows have different widths or if they
    /// contain other characters.
    #[must_use]
    pub fn from_ascii(art: &str) -> Self {
        let lines: Vec<&str> = art
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let cols = lines.first().map_or(0, |line| line.chars().count());
        let mut board = Self::new(lines.len(), cols);
        for (row, line) in lines.iter().enumerate() {
            assert_eq!(
                line.chars().count(),
                cols,
                "each row must have exactly {cols} cells, got {line:?} at row {row}"
            );
            for (col, ch) in line.chars().enumerate() {
                let block = match ch {
                    '.' => Block::Empty,
                    '#' => Block::Frozen(Color::Grey),
                    _ => {
                        let kind = PieceKind::from_char(ch)
                            .unwrap_or_else(|| panic!("invalid board character {ch:?}"));
                        Block::Frozen(kind.shape().color())
                    }
                };
                board.fill_block_at(row, col, block);
            }
        }
        board
    }
}
