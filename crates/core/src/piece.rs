//! The live falling piece: an anchor plus a shape prototype.

use crate::{Cell, Shape};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Absolute cells of one piece - inline storage, no heap for any prototype.
pub type CellList = SmallVec<[Cell; 4]>;

/// A piece that has not yet been frozen into the field. Deliberately not
/// `Copy`: merging takes the piece by value, so a merged piece cannot be
/// moved or queried again.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct ActivePiece {
    shape: Shape,
    x: i32,
    y: i32,
}

impl ActivePiece {
    pub fn new(shape: Shape, x: i32, y: i32) -> Self {
        Self { shape, x, y }
    }

    #[inline(always)]
    pub fn shape(&self) -> Shape {
        self.shape
    }

    #[inline(always)]
    pub fn anchor(&self) -> Cell {
        Cell::new(self.x, self.y)
    }

    /// Absolute cells at the current anchor.
    pub fn cells(&self) -> CellList {
        self.cells_at(self.x, self.y)
    }

    /// Absolute cells under a proposed anchor.
    pub fn cells_at(&self, x: i32, y: i32) -> CellList {
        self.shape
            .offsets()
            .iter()
            .map(|&(dx, dy)| Cell::new(x + dx as i32, y + dy as i32))
            .collect()
    }

    /// Commit a new anchor. Does not validate - callers go through
    /// `gridfall_engine::movement::try_move` for checked movement.
    #[inline]
    pub fn set_anchor(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }
}
