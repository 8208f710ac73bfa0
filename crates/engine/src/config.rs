//! Game configuration presets.

use gridfall_core::{Grid, GridError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One row per second, the classic pace.
pub const TICK_PERIOD_MS_DEFAULT: u32 = 1000;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Error)]
pub enum ConfigError {
    #[error("tick period must be nonzero")]
    ZeroTickPeriod,
    #[error(transparent)]
    Grid(#[from] GridError),
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct GameConfig {
    pub grid: Grid,
    pub tick_period_ms: u32,
}

impl GameConfig {
    /// 10x20 playfield ticking at 1000 ms.
    pub fn standard() -> Self {
        Self {
            grid: Grid::standard(),
            tick_period_ms: TICK_PERIOD_MS_DEFAULT,
        }
    }

    /// Standard pace on a custom playfield.
    pub fn with_grid(width: i32, height: i32) -> Result<Self, ConfigError> {
        Ok(Self {
            grid: Grid::new(width, height)?,
            ..Self::standard()
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_period_ms == 0 {
            return Err(ConfigError::ZeroTickPeriod);
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::standard()
    }
}
