use serde::Serialize;

use super::shape::{Color, PieceKind, Shape, ShapeBox};

/// A piece kind together with its current rotation index.
///
/// The shape data itself lives in the static catalog; a `Piece` is two bytes
/// and rotating it only advances the index. Movement and rotation never mutate
/// a live piece: they return candidates that the caller validates first.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Piece, PieceKind};
///
/// let piece = Piece::new(PieceKind::T);
/// let rotated = piece.rotated();
/// assert_eq!(rotated.rotation(), 1);
/// assert_eq!(piece.rotation(), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Piece {
    kind: PieceKind,
    rotation: u8,
}

impl Piece {
    #[must_use]
    pub fn new(kind: PieceKind) -> Self {
        Self { kind, rotation: 0 }
    }

    /// Creates a piece in the given rotation state.
    ///
    /// # Panics
    ///
    /// Panics if `rotation` is not a valid rotation index for `kind`.
    #[must_use]
    pub fn with_rotation(kind: PieceKind, rotation: usize) -> Self {
        let count = kind.shape().rotation_count();
        assert!(
            rotation < count,
            "rotation {rotation} out of range for {kind} ({count} rotations)"
        );
        Self {
            kind,
            rotation: u8::try_from(rotation).expect("rotation count fits in u8"),
        }
    }

    #[must_use]
    pub fn kind(self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub fn rotation(self) -> usize {
        usize::from(self.rotation)
    }

    #[must_use]
    pub fn shape(self) -> &'static Shape {
        self.kind.shape()
    }

    /// The box of the current rotation state.
    #[must_use]
    pub fn shape_box(self) -> ShapeBox {
        self.shape().rotation(self.rotation())
    }

    #[must_use]
    pub fn color(self) -> Color {
        self.shape().color()
    }

    /// Returns the piece advanced to the next rotation, wrapping around.
    #[must_use]
    pub fn rotated(self) -> Self {
        let count = self.shape().rotation_count();
        Self::with_rotation(self.kind, (self.rotation() + 1) % count)
    }
}

/// Board coordinate of the top-left corner of a piece's box.
///
/// Rows grow downward. The row may be negative while a piece is being staged
/// above the visible grid.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Anchor {
    pub row: i32,
    pub col: i32,
}

impl Anchor {
    #[must_use]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    #[must_use]
    pub const fn left(self) -> Self {
        Self::new(self.row, self.col - 1)
    }

    #[must_use]
    pub const fn right(self) -> Self {
        Self::new(self.row, self.col + 1)
    }

    #[must_use]
    pub const fn down(self) -> Self {
        Self::new(self.row + 1, self.col)
    }

    /// Absolute coordinate of the box cell at (`row`, `col`).
    #[must_use]
    pub fn offset(self, row: usize, col: usize) -> (i32, i32) {
        (self.row + box_offset(row), self.col + box_offset(col))
    }
}

fn box_offset(value: usize) -> i32 {
    i32::try_from(value).expect("box offsets are below 4")
}

/// The currently controlled piece and where its box sits on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FallingPiece {
    piece: Piece,
    anchor: Anchor,
}

impl FallingPiece {
    #[must_use]
    pub const fn new(piece: Piece, anchor: Anchor) -> Self {
        Self { piece, anchor }
    }

    #[must_use]
    pub const fn piece(&self) -> Piece {
        self.piece
    }

    #[must_use]
    pub const fn anchor(&self) -> Anchor {
        self.anchor
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.piece.color()
    }

    /// Absolute `(row, col)` of every occupied cell.
    pub fn cells(self) -> impl Iterator<Item = (i32, i32)> {
        let anchor = self.anchor;
        self.piece
            .shape_box()
            .cells()
            .map(move |(row, col)| anchor.offset(row, col))
    }

    #[must_use]
    pub const fn with_anchor(self, anchor: Anchor) -> Self {
        Self::new(self.piece, anchor)
    }

    #[must_use]
    pub fn rotated(self) -> Self {
        Self::new(self.piece.rotated(), self.anchor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_wraps_to_start() {
        for kind in PieceKind::ALL {
            let start = Piece::new(kind);
            let mut piece = start;
            for _ in 0..kind.shape().rotation_count() {
                piece = piece.rotated();
            }
            assert_eq!(piece, start, "{kind}");
        }
    }

    #[test]
    fn test_rotated_returns_new_value() {
        let piece = Piece::with_rotation(PieceKind::L, 3);
        let rotated = piece.rotated();
        assert_eq!(piece.rotation(), 3);
        assert_eq!(rotated.rotation(), 0);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_with_rotation_rejects_invalid_index() {
        let _ = Piece::with_rotation(PieceKind::O, 1);
    }

    #[test]
    fn test_anchor_moves() {
        let anchor = Anchor::new(-1, 3);
        assert_eq!(anchor.left(), Anchor::new(-1, 2));
        assert_eq!(anchor.right(), Anchor::new(-1, 4));
        assert_eq!(anchor.down(), Anchor::new(0, 3));
        assert_eq!(anchor.offset(2, 1), (1, 4));
    }

    #[test]
    fn test_falling_piece_cells_are_absolute() {
        let falling = FallingPiece::new(Piece::new(PieceKind::O), Anchor::new(5, 3));
        let cells: Vec<_> = falling.cells().collect();
        assert_eq!(cells, vec![(5, 4), (5, 5), (6, 4), (6, 5)]);
        assert_eq!(falling.color(), Color::Yellow);
    }

    #[test]
    fn test_falling_piece_rotation_keeps_anchor() {
        let falling = FallingPiece::new(Piece::new(PieceKind::I), Anchor::new(2, 2));
        let rotated = falling.rotated();
        assert_eq!(rotated.anchor(), falling.anchor());
        let cells: Vec<_> = rotated.cells().collect();
        assert_eq!(cells, vec![(3, 2), (3, 3), (3, 4), (3, 5)]);
    }
}
