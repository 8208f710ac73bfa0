//! Bounded grid geometry and cell coordinates.
//! x grows rightward, y grows downward; row 0 is the top row.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One unit square of the grid, identified by its coordinates.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Error)]
pub enum GridError {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },
}

/// Bounded coordinate space. No mutable state.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Grid {
    width: i32,
    height: i32,
}

impl Grid {
    pub fn new(width: i32, height: i32) -> Result<Self, GridError> {
        if width <= 0 || height <= 0 {
            return Err(GridError::InvalidDimensions { width, height });
        }
        Ok(Self { width, height })
    }

    /// 10x20 playfield.
    pub const fn standard() -> Self {
        Self {
            width: 10,
            height: 20,
        }
    }

    #[inline(always)]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    #[inline(always)]
    pub fn contains_cell(&self, cell: Cell) -> bool {
        self.contains(cell.x, cell.y)
    }

    /// Default spawn anchor: centered horizontally on the top row.
    pub fn spawn_anchor(&self) -> Cell {
        Cell::new(self.width / 2, 0)
    }

    #[inline(always)]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline(always)]
    pub fn height(&self) -> i32 {
        self.height
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::standard()
    }
}
