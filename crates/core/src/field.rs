//! Occupancy field - the accumulated set of permanently filled cells.
//! Hash-set membership keeps lookups O(1) without an encoded integer key.

use crate::{Cell, CellEvent, Grid};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Rows affected by one merge - at most the height of a piece.
pub type RowList = SmallVec<[i32; 4]>;

/// Result of a `drop_full_rows` pass: which rows collapsed, and the
/// cell-level changes a renderer needs to mirror them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClearOutcome {
    pub cleared_rows: RowList,
    pub events: Vec<CellEvent>,
}

/// The set of cells filled by previously frozen pieces. A cell is present
/// iff some merged piece occupied it and its row has not since collapsed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Field {
    grid: Grid,
    cells: FxHashSet<Cell>,
}

impl Field {
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            cells: FxHashSet::default(),
        }
    }

    #[inline(always)]
    pub fn grid(&self) -> Grid {
        self.grid
    }

    #[inline(always)]
    pub fn has(&self, x: i32, y: i32) -> bool {
        self.cells.contains(&Cell::new(x, y))
    }

    #[inline(always)]
    pub fn has_cell(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    /// Idempotent insertion. Returns whether the cell was newly added.
    pub fn add(&mut self, x: i32, y: i32) -> bool {
        debug_assert!(self.grid.contains(x, y), "cell ({x}, {y}) out of bounds");
        self.cells.insert(Cell::new(x, y))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// All cells in deterministic row-major order.
    pub fn sorted_cells(&self) -> Vec<Cell> {
        let mut cells: Vec<Cell> = self.cells.iter().copied().collect();
        cells.sort_unstable_by_key(|cell| (cell.y, cell.x));
        cells
    }

    pub fn is_row_full(&self, y: i32) -> bool {
        (0..self.grid.width()).all(|x| self.has(x, y))
    }

    /// Collapse every full row among `candidates`, in ascending y order.
    ///
    /// A collapse removes all cells of the full row and shifts every cell
    /// above it (y < row) down by one; cells below (y > row) are untouched.
    /// Ascending order matters when two candidate rows fill in the same
    /// merge: collapsing row r only moves cells with y < r, so candidates
    /// below r keep their original indices and are evaluated against the
    /// already-shifted rows above them.
    ///
    /// Only the rows touched by the just-frozen piece need to be passed in,
    /// so a merge costs O(piece size) candidate checks, not a grid scan.
    pub fn drop_full_rows(&mut self, candidates: &[i32]) -> ClearOutcome {
        let mut rows: RowList = candidates.iter().copied().collect();
        rows.sort_unstable();
        rows.dedup();

        let mut outcome = ClearOutcome::default();
        for &row in &rows {
            if !self.is_row_full(row) {
                continue;
            }
            self.collapse_row(row, &mut outcome.events);
            outcome.cleared_rows.push(row);
        }
        outcome
    }

    fn collapse_row(&mut self, row: i32, events: &mut Vec<CellEvent>) {
        for x in 0..self.grid.width() {
            let cell = Cell::new(x, row);
            self.cells.remove(&cell);
            events.push(CellEvent::Removed(cell));
        }

        // Two-phase shift: take out every cell above the row, then re-insert
        // one row lower. Bottom-most cells move first so that replaying the
        // Moved events one at a time never lands on a cell that has not
        // vacated yet.
        let mut shifted: Vec<Cell> = self
            .cells
            .iter()
            .copied()
            .filter(|cell| cell.y < row)
            .collect();
        shifted.sort_unstable_by_key(|cell| (std::cmp::Reverse(cell.y), cell.x));

        for cell in &shifted {
            self.cells.remove(cell);
        }
        for from in shifted {
            let to = Cell::new(from.x, from.y + 1);
            self.cells.insert(to);
            events.push(CellEvent::Moved { from, to });
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.grid.height() {
            for x in 0..self.grid.width() {
                write!(f, "{}", if self.has(x, y) { "[]" } else { "  " })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(width: i32, height: i32) -> Field {
        Field::new(Grid::new(width, height).unwrap())
    }

    fn fill_row(field: &mut Field, y: i32) {
        for x in 0..field.grid().width() {
            field.add(x, y);
        }
    }

    #[test]
    fn test_add_has() {
        let mut f = field(4, 8);
        assert!(!f.has(1, 2));
        assert!(f.add(1, 2));
        assert!(f.has(1, 2));
        assert!(!f.has(2, 1));
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut f = field(4, 8);
        assert!(f.add(3, 3));
        assert!(!f.add(3, 3));
        assert_eq!(f.len(), 1);
    }

    #[test]
    fn test_row_full() {
        let mut f = field(4, 8);
        fill_row(&mut f, 5);
        assert!(f.is_row_full(5));
        assert!(!f.is_row_full(4));
    }

    #[test]
    fn test_drop_full_rows_skips_partial_row() {
        let mut f = field(4, 8);
        f.add(0, 5);
        f.add(1, 5);
        let outcome = f.drop_full_rows(&[5]);
        assert!(outcome.cleared_rows.is_empty());
        assert_eq!(f.len(), 2);
    }

    #[test]
    fn test_collapse_removes_row_and_shifts_above() {
        // width 4: occupy all of row 5 plus two cells above and one below
        let mut f = field(4, 8);
        fill_row(&mut f, 5);
        f.add(0, 3);
        f.add(2, 4);
        f.add(1, 6);

        let outcome = f.drop_full_rows(&[5]);
        assert_eq!(outcome.cleared_rows.as_slice(), &[5]);

        // cells above shifted down by one, into the vacated row if adjacent
        assert!(!f.has(0, 3) && f.has(0, 4));
        assert!(!f.has(2, 4) && f.has(2, 5));
        // cell below the cleared row is untouched
        assert!(f.has(1, 6));
        assert!(!f.is_row_full(5));
        assert_eq!(f.len(), 3);
    }

    #[test]
    fn test_collapse_events() {
        let mut f = field(2, 4);
        fill_row(&mut f, 3);
        f.add(0, 1);

        let outcome = f.drop_full_rows(&[3]);
        assert_eq!(
            outcome.events,
            vec![
                CellEvent::Removed(Cell::new(0, 3)),
                CellEvent::Removed(Cell::new(1, 3)),
                CellEvent::Moved {
                    from: Cell::new(0, 1),
                    to: Cell::new(0, 2)
                },
            ]
        );
    }

    #[test]
    fn test_collapse_events_replay_in_order() {
        // two stacked cells above the cleared row: replaying the events one
        // at a time must not lose either of them
        let mut f = field(2, 5);
        fill_row(&mut f, 4);
        f.add(0, 2);
        f.add(0, 3);

        let before: Vec<Cell> = f.cells().copied().collect();
        let outcome = f.drop_full_rows(&[4]);

        let mut visual: std::collections::HashSet<Cell> = before.into_iter().collect();
        for event in &outcome.events {
            match *event {
                CellEvent::Added(cell) => {
                    visual.insert(cell);
                }
                CellEvent::Removed(cell) => {
                    visual.remove(&cell);
                }
                CellEvent::Moved { from, to } => {
                    visual.remove(&from);
                    visual.insert(to);
                }
            }
        }
        let expected: std::collections::HashSet<Cell> = f.cells().copied().collect();
        assert_eq!(visual, expected);
        assert!(f.has(0, 3) && f.has(0, 4));
    }

    #[test]
    fn test_two_full_rows_in_one_pass() {
        let mut f = field(3, 6);
        fill_row(&mut f, 4);
        fill_row(&mut f, 5);
        f.add(1, 3);

        let outcome = f.drop_full_rows(&[4, 5]);
        assert_eq!(outcome.cleared_rows.as_slice(), &[4, 5]);
        // both rows collapse; the lone cell falls two rows
        assert_eq!(f.len(), 1);
        assert!(f.has(1, 5));
    }

    #[test]
    fn test_candidate_order_is_normalized() {
        let mut f = field(3, 6);
        fill_row(&mut f, 2);
        fill_row(&mut f, 4);

        // descending, duplicated candidates still collapse correctly
        let outcome = f.drop_full_rows(&[4, 2, 4]);
        assert_eq!(outcome.cleared_rows.as_slice(), &[2, 4]);
        assert!(f.is_empty());
    }

    #[test]
    fn test_untouched_rows_are_not_candidates() {
        let mut f = field(2, 6);
        fill_row(&mut f, 5);
        // row 5 is full but not in the candidate set, so it survives
        let outcome = f.drop_full_rows(&[3]);
        assert!(outcome.cleared_rows.is_empty());
        assert!(f.is_row_full(5));
    }

    #[test]
    fn test_display_dump() {
        let mut f = field(2, 2);
        f.add(0, 0);
        f.add(1, 1);
        assert_eq!(f.to_string(), "[]  \n  []\n");
    }
}
