//! Freezing a piece into the field and collapsing the rows it completed.

use gridfall_core::{ActivePiece, CellEvent, Field, RowList};

/// Result of merging one piece.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MergeOutcome {
    pub cleared_rows: RowList,
    pub events: Vec<CellEvent>,
}

/// Merge the piece into the field, then collapse any full row among the
/// rows the piece touched. Consumes the piece: a merged piece cannot be
/// moved or queried again.
pub fn merge_piece(field: &mut Field, piece: ActivePiece) -> MergeOutcome {
    let mut touched: RowList = RowList::new();
    for &cell in &piece.cells() {
        debug_assert!(field.grid().contains_cell(cell), "piece cell out of bounds");
        field.add(cell.x, cell.y);
        if !touched.contains(&cell.y) {
            touched.push(cell.y);
        }
    }

    let outcome = field.drop_full_rows(&touched);
    MergeOutcome {
        cleared_rows: outcome.cleared_rows,
        events: outcome.events,
    }
}
