//! Occupancy-checked piece movement. Check-then-commit: a failed move
//! leaves the piece exactly where it was.

use gridfall_core::{ActivePiece, Field, Shape};

/// Can every cell of the piece sit at the proposed anchor?
/// False on the first cell that leaves the grid or collides.
pub fn can_move_to(field: &Field, piece: &ActivePiece, x: i32, y: i32) -> bool {
    piece
        .cells_at(x, y)
        .iter()
        .all(|&cell| field.grid().contains_cell(cell) && !field.has_cell(cell))
}

/// Translate the piece by (dx, dy) iff the full check passes.
/// Atomic: on false, no cell has moved.
pub fn try_move(field: &Field, piece: &mut ActivePiece, dx: i32, dy: i32) -> bool {
    let anchor = piece.anchor();
    let (nx, ny) = (anchor.x + dx, anchor.y + dy);
    if can_move_to(field, piece, nx, ny) {
        piece.set_anchor(nx, ny);
        true
    } else {
        false
    }
}

/// One row down.
pub fn try_drop(field: &Field, piece: &mut ActivePiece) -> bool {
    try_move(field, piece, 0, 1)
}

/// Rotation attempt. Part of the contract surface, but currently always
/// succeeds without changing geometry.
/// TODO: real rotation states for the Line prototype.
pub fn try_rotate(_field: &Field, _piece: &mut ActivePiece) -> bool {
    true
}

/// Place a fresh piece with its anchor at (x, y), occupancy-checked.
/// None means no room for the piece there.
pub fn try_spawn_at(field: &Field, shape: Shape, x: i32, y: i32) -> Option<ActivePiece> {
    let piece = ActivePiece::new(shape, x, y);
    if can_move_to(field, &piece, x, y) {
        Some(piece)
    } else {
        None
    }
}

/// Place a fresh piece at the grid's default spawn anchor.
/// None means no room - the board-full signal.
pub fn try_spawn(field: &Field, shape: Shape) -> Option<ActivePiece> {
    let anchor = field.grid().spawn_anchor();
    try_spawn_at(field, shape, anchor.x, anchor.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridfall_core::{Cell, Grid};

    fn empty_field() -> Field {
        Field::new(Grid::standard())
    }

    #[test]
    fn test_move_on_empty_field() {
        let field = empty_field();
        let mut piece = ActivePiece::new(Shape::Square, 4, 0);
        assert!(try_move(&field, &mut piece, -1, 0));
        assert_eq!(piece.anchor(), Cell::new(3, 0));
    }

    #[test]
    fn test_move_off_grid_is_rejected_and_atomic() {
        let field = empty_field();
        let mut piece = ActivePiece::new(Shape::Dot, 2, 2);
        // anchor (2,2) -> (-1,2) is off-grid
        assert!(!can_move_to(&field, &piece, -1, 2));
        assert!(!try_move(&field, &mut piece, -3, 0));
        assert_eq!(piece.anchor(), Cell::new(2, 2));
    }

    #[test]
    fn test_move_partially_off_grid_is_atomic() {
        let field = empty_field();
        // Line at x=1 covers 0..=3; one step left pushes only its leftmost
        // cell off-grid, and nothing may commit
        let mut piece = ActivePiece::new(Shape::Line, 1, 5);
        assert!(!try_move(&field, &mut piece, -1, 0));
        assert_eq!(piece.anchor(), Cell::new(1, 5));
        assert!(piece.cells().contains(&Cell::new(0, 5)));
    }

    #[test]
    fn test_move_blocked_by_occupancy() {
        let mut field = empty_field();
        field.add(4, 6);
        let mut piece = ActivePiece::new(Shape::Dot, 4, 5);
        assert!(!try_drop(&field, &mut piece));
        assert_eq!(piece.anchor(), Cell::new(4, 5));
        // sideways is still open
        assert!(try_move(&field, &mut piece, 1, 0));
    }

    #[test]
    fn test_drop_to_floor() {
        let field = empty_field();
        let mut piece = ActivePiece::new(Shape::Square, 4, 0);
        let mut drops = 0;
        while try_drop(&field, &mut piece) {
            drops += 1;
        }
        // Square spans two rows: anchor rests at height - 2
        assert_eq!(piece.anchor(), Cell::new(4, 18));
        assert_eq!(drops, 18);
    }

    #[test]
    fn test_rotate_is_identity() {
        let field = empty_field();
        let mut piece = ActivePiece::new(Shape::Line, 5, 3);
        let before = piece.cells();
        assert!(try_rotate(&field, &mut piece));
        assert_eq!(piece.cells(), before);
    }

    #[test]
    fn test_spawn_on_empty_field() {
        let field = empty_field();
        let piece = try_spawn(&field, Shape::Square).unwrap();
        assert_eq!(piece.anchor(), Cell::new(5, 0));
    }

    #[test]
    fn test_spawn_at_explicit_anchor() {
        let mut field = empty_field();
        field.add(0, 10);
        let piece = try_spawn_at(&field, Shape::Dot, 0, 9).unwrap();
        assert_eq!(piece.anchor(), Cell::new(0, 9));
        assert!(try_spawn_at(&field, Shape::Dot, 0, 10).is_none());
        assert!(try_spawn_at(&field, Shape::Line, 0, 5).is_none());
    }

    #[test]
    fn test_spawn_blocked_by_occupancy() {
        let mut field = empty_field();
        field.add(5, 0);
        // both prototypes cover the spawn anchor itself
        assert!(try_spawn(&field, Shape::Square).is_none());
        assert!(try_spawn(&field, Shape::Line).is_none());
        // a shape that misses the blocked cell still spawns
        field = Field::new(Grid::standard());
        field.add(6, 1);
        assert!(try_spawn(&field, Shape::Line).is_some());
        assert!(try_spawn(&field, Shape::Square).is_none());
    }
}
