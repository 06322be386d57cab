use crate::pos::CellPos;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// Grid creation or resize asked for a zero-sized dimension.
    #[error("grid dimensions must be at least 1x1, got {rows}x{cols}")]
    InvalidDimension { rows: usize, cols: usize },

    /// A toggle addressed a cell outside the grid. Reported, never a panic,
    /// since the coordinate comes from untrusted pointer translation.
    #[error("cell {pos} is outside the {rows}x{cols} grid")]
    OutOfRange {
        pos: CellPos,
        rows: usize,
        cols: usize,
    },
}
