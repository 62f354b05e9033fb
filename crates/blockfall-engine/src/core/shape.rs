use rand::{
    Rng,
    distr::{Distribution, StandardUniform},
};
use serde::{Deserialize, Serialize};

/// Side length of the square box every rotation state is drawn in.
pub const SHAPE_BOX_SIZE: usize = 4;

/// Display color tag attached to a piece kind and to the cells it freezes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
pub enum Color {
    LightBlue,
    Blue,
    Orange,
    Yellow,
    Green,
    Purple,
    Red,
    /// Not used by any piece kind; marks fixture or garbage cells.
    Grey,
}

/// One rotation state of a piece kind, packed as a 4×4 bitmask.
///
/// Bit `row * 4 + col` is set when the cell at (`row`, `col`) of the box is
/// occupied. Row 0 is the top of the box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeBox(u16);

impl ShapeBox {
    const fn from_rows(rows: [[bool; SHAPE_BOX_SIZE]; SHAPE_BOX_SIZE]) -> Self {
        let mut bits = 0;
        let mut row = 0;
        while row < SHAPE_BOX_SIZE {
            let mut col = 0;
            while col < SHAPE_BOX_SIZE {
                if rows[row][col] {
                    bits |= 1 << (row * SHAPE_BOX_SIZE + col);
                }
                col += 1;
            }
            row += 1;
        }
        Self(bits)
    }

    #[must_use]
    pub const fn is_occupied(self, row: usize, col: usize) -> bool {
        row < SHAPE_BOX_SIZE
            && col < SHAPE_BOX_SIZE
            && self.0 & (1 << (row * SHAPE_BOX_SIZE + col)) != 0
    }

    /// Number of occupied cells in the box.
    #[must_use]
    pub const fn cell_count(self) -> u32 {
        self.0.count_ones()
    }

    /// Iterates over the occupied `(row, col)` offsets, top-left first.
    pub fn cells(self) -> impl Iterator<Item = (usize, usize)> {
        (0..SHAPE_BOX_SIZE * SHAPE_BOX_SIZE)
            .filter(move |i| self.0 & (1 << i) != 0)
            .map(|i| (i / SHAPE_BOX_SIZE, i % SHAPE_BOX_SIZE))
    }
}

/// Immutable catalog entry: the ordered rotation boxes of a kind and its color.
#[derive(Debug)]
pub struct Shape {
    rotations: &'static [ShapeBox],
    color: Color,
}

impl Shape {
    #[must_use]
    pub fn rotation_count(&self) -> usize {
        self.rotations.len()
    }

    /// Returns the box for `rotation`.
    ///
    /// # Panics
    ///
    /// Panics if `rotation >= self.rotation_count()`.
    #[must_use]
    pub fn rotation(&self, rotation: usize) -> ShapeBox {
        self.rotations[rotation]
    }

    #[must_use]
    pub fn rotations(&self) -> &'static [ShapeBox] {
        self.rotations
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }
}

/// The seven standard piece kinds.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[repr(u8)]
pub enum PieceKind {
    I = 0,
    O = 1,
    L = 2,
    J = 3,
    T = 4,
    S = 5,
    Z = 6,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

impl PieceKind {
    /// Number of piece kinds (7).
    pub const LEN: usize = 7;

    pub const ALL: [Self; Self::LEN] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::L,
        PieceKind::J,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
    ];

    /// Looks up the catalog entry for this kind.
    ///
    /// ```
    /// use blockfall_engine::{Color, PieceKind};
    ///
    /// let shape = PieceKind::O.shape();
    /// assert_eq!(shape.rotation_count(), 1);
    /// assert_eq!(shape.color(), Color::Yellow);
    /// ```
    #[must_use]
    pub fn shape(self) -> &'static Shape {
        &CATALOG[self as usize]
    }

    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::L => 'L',
            PieceKind::J => 'J',
            PieceKind::T => 'T',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
        }
    }

    /// Parses a piece kind from its letter.
    ///
    /// ```
    /// use blockfall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_char('T'), Some(PieceKind::T));
    /// assert_eq!(PieceKind::from_char('x'), None);
    /// ```
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(PieceKind::I),
            'O' => Some(PieceKind::O),
            'L' => Some(PieceKind::L),
            'J' => Some(PieceKind::J),
            'T' => Some(PieceKind::T),
            'S' => Some(PieceKind::S),
            'Z' => Some(PieceKind::Z),
            _ => None,
        }
    }
}

static CATALOG: [Shape; PieceKind::LEN] = {
    const X: bool = true;
    const E: bool = false;
    const EEEE: [bool; 4] = [E; 4];
    const fn b(rows: [[bool; 4]; 4]) -> ShapeBox {
        ShapeBox::from_rows(rows)
    }

    const I: &[ShapeBox] = &[
        b([[E, X, E, E], [E, X, E, E], [E, X, E, E], [E, X, E, E]]),
        b([EEEE, [X, X, X, X], EEEE, EEEE]),
    ];
    const O: &[ShapeBox] = &[b([[E, X, X, E], [E, X, X, E], EEEE, EEEE])];
    const L: &[ShapeBox] = &[
        b([[E, X, E, E], [E, X, E, E], [E, X, X, E], EEEE]),
        b([EEEE, [E, X, X, X], [E, X, E, E], EEEE]),
        b([[E, X, X, E], [E, E, X, E], [E, E, X, E], EEEE]),
        b([EEEE, [E, E, X, E], [X, X, X, E], EEEE]),
    ];
    const J: &[ShapeBox] = &[
        b([[E, E, X, E], [E, E, X, E], [E, X, X, E], EEEE]),
        b([EEEE, [E, X, E, E], [E, X, X, X], EEEE]),
        b([EEEE, [E, X, X, E], [E, X, E, E], [E, X, E, E]]),
        b([EEEE, [X, X, X, E], [E, E, X, E], EEEE]),
    ];
    const T: &[ShapeBox] = &[
        b([EEEE, [E, X, E, E], [X, X, X, E], EEEE]),
        b([[E, X, E, E], [E, X, X, E], [E, X, E, E], EEEE]),
        b([EEEE, [E, X, X, X], [E, E, X, E], EEEE]),
        b([EEEE, [E, E, X, E], [E, X, X, E], [E, E, X, E]]),
    ];
    const S: &[ShapeBox] = &[
        b([EEEE, [E, X, X, E], [X, X, E, E], EEEE]),
        b([[E, X, E, E], [E, X, X, E], [E, E, X, E], EEEE]),
        b([EEEE, [E, E, X, X], [E, X, X, E], EEEE]),
        b([EEEE, [E, X, E, E], [E, X, X, E], [E, E, X, E]]),
    ];
    const Z: &[ShapeBox] = &[
        b([EEEE, [X, X, E, E], [E, X, X, E], EEEE]),
        b([[E, E, X, E], [E, X, X, E], [E, X, E, E], EEEE]),
        b([EEEE, [E, X, X, E], [E, E, X, X], EEEE]),
        b([EEEE, [E, E, X, E], [E, X, X, E], [E, X, E, E]]),
    ];

    // Indexed by `PieceKind as usize`.
    [
        Shape {
            rotations: I,
            color: Color::LightBlue,
        },
        Shape {
            rotations: O,
            color: Color::Yellow,
        },
        Shape {
            rotations: L,
            color: Color::Orange,
        },
        Shape {
            rotations: J,
            color: Color::Blue,
        },
        Shape {
            rotations: T,
            color: Color::Purple,
        },
        Shape {
            rotations: S,
            color: Color::Green,
        },
        Shape {
            rotations: Z,
            color: Color::Red,
        },
    ]
};
