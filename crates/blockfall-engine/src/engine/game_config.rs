use serde::{Deserialize, Serialize};

use crate::{ConfigError, core::SHAPE_BOX_SIZE};

use super::observation::OBSERVATION_LAYERS;

/// Initial rotation given to a freshly drawn piece.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::FromStr,
)]
#[serde(rename_all = "lowercase")]
pub enum SpawnRotation {
    /// Uniformly random among the kind's rotation states.
    #[default]
    Random,
    /// Always rotation 0.
    Zero,
}

/// Board dimensions and spawn behavior of one game.
///
/// Deserializes from partial JSON; missing fields take their defaults.
///
/// ```
/// use blockfall_engine::{GameConfig, SpawnRotation};
///
/// let config: GameConfig = serde_json::from_str(r#"{ "cols": 6 }"#).unwrap();
/// assert_eq!(config.rows, 20);
/// assert_eq!(config.cols, 6);
/// assert_eq!(config.spawn_rotation, SpawnRotation::Random);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub rows: usize,
    pub cols: usize,
    pub spawn_rotation: SpawnRotation,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: Self::DEFAULT_ROWS,
            cols: Self::DEFAULT_COLS,
            spawn_rotation: SpawnRotation::default(),
        }
    }
}

impl GameConfig {
    pub const DEFAULT_ROWS: usize = 20;
    pub const DEFAULT_COLS: usize = 10;
    /// A shape box must fit on the board at the spawn column.
    pub const MIN_ROWS: usize = SHAPE_BOX_SIZE;
    pub const MIN_COLS: usize = SHAPE_BOX_SIZE;
    /// Anchors are `i32`, so every coordinate must fit one.
    pub const MAX_DIMENSION: usize = i32::MAX as usize;

    /// Checks that the board fits a shape box and that its cells, including
    /// every observation layer, can be addressed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (rows, cols) = (self.rows, self.cols);
        if rows < Self::MIN_ROWS {
            return Err(ConfigError::TooFewRows { rows });
        }
        if cols < Self::MIN_COLS {
            return Err(ConfigError::TooFewCols { cols });
        }
        let addressable = rows <= Self::MAX_DIMENSION
            && cols <= Self::MAX_DIMENSION
            && rows
                .checked_mul(cols)
                .and_then(|cells| cells.checked_mul(OBSERVATION_LAYERS))
                .is_some();
        if !addressable {
            return Err(ConfigError::TooLarge { rows, cols });
        }
        Ok(())
    }
}
