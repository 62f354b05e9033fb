pub use self::{board::*, board_view::*, collision::*, piece::*, shape::*};

pub(crate) mod board;
pub(crate) mod board_view;
pub mod collision;
pub(crate) mod piece;
pub(crate) mod shape;
