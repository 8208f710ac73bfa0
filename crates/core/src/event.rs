//! Coordinate-level change events. A renderer subscribes to these; the
//! core never does pixel math.

use crate::Cell;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum CellEvent {
    Added(Cell),
    Removed(Cell),
    Moved { from: Cell, to: Cell },
}
