//! Shape prototypes and their cell offsets.

use serde::{Deserialize, Serialize};

/// A fixed falling-block prototype. Each variant carries its own offset
/// list; selection is a lookup over the enumeration.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum Shape {
    /// 2x2 block.
    Square,
    /// 1x4 horizontal bar.
    Line,
    /// Single cell.
    Dot,
}

impl Shape {
    pub const ALL: [Shape; 3] = [Shape::Square, Shape::Line, Shape::Dot];

    /// Cell offsets relative to the anchor.
    pub fn offsets(self) -> &'static [(i8, i8)] {
        match self {
            Shape::Square => &[(0, 0), (1, 0), (0, 1), (1, 1)],
            Shape::Line => &[(-1, 0), (0, 0), (1, 0), (2, 0)],
            Shape::Dot => &[(0, 0)],
        }
    }

}
