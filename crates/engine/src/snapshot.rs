//! Serializable view of a running game, for save/inspect and for a
//! renderer's initial sync.

use gridfall_core::{Cell, Grid, Shape};
use serde::{Deserialize, Serialize};

use crate::controller::Phase;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub grid: Grid,
    /// Occupancy cells in row-major order.
    pub landed_cells: Vec<Cell>,
    pub piece_shape: Option<Shape>,
    pub piece_cells: Vec<Cell>,
    pub landed_pieces: u32,
    pub phase: Phase,
}
