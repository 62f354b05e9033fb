pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// None of the staging anchors was legal for the queued piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("no legal spawn position for {} piece", piece.kind())]
pub struct SpawnFailure {
    pub piece: Piece,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("board needs at least 4 rows, got {rows}")]
    TooFewRows { rows: usize },
    #[display("board needs at least 4 columns, got {cols}")]
    TooFewCols { cols: usize },
    #[display("board of {rows} x {cols} cells is too large")]
    TooLarge { rows: usize, cols: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid piece seed {input:?}: expected 32 hex characters")]
pub struct ParseSeedError {
    pub input: String,
}
