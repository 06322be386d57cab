use itertools::Itertools;

use super::error::EngineError;
use super::pos::CellPos;

/// A rectangular field of binary cells, stored row-major as a flat buffer
/// indexed by `row * cols + col`. The buffer length is always `rows * cols`
/// and both dimensions are at least 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<CellState>,
}

impl Grid {
    /// Allocates an all-dead grid, rejecting zero-sized dimensions and
    /// dimension products that overflow before any buffer is created.
    pub fn new(rows: usize, cols: usize) -> Result<Self, EngineError> {
        if rows == 0 || cols == 0 {
            return Err(EngineError::InvalidDimension { rows, cols });
        }

        // Resize requests carry arbitrary external numbers; an overflowing
        // product is rejected here, not left to panic in the allocator.
        let len = rows
            .checked_mul(cols)
            .ok_or(EngineError::InvalidDimension { rows, cols })?;

        Ok(Self {
            rows,
            cols,
            cells: vec![CellState::default(); len],
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cell<P>(&self, pos: P) -> Option<&CellState>
    where
        P: Into<CellPos>,
    {
        let index = self.pos_to_index(pos)?;
        self.cells.get(index)
    }

    pub(crate) fn cell_mut<P>(&mut self, pos: P) -> Option<&mut CellState>
    where
        P: Into<CellPos>,
    {
        let index = self.pos_to_index(pos)?;
        self.cells.get_mut(index)
    }

    /// Walks every cell in row-major order: ascending row, then ascending
    /// column within a row.
    pub fn enumerate_cells(&self) -> impl Iterator<Item = (CellPos, &CellState)> {
        self.cells
            .iter()
            .enumerate()
            .map(|(index, cell)| (self.index_to_pos(index), cell))
    }

    pub(crate) fn cells_mut(&mut self) -> impl Iterator<Item = &mut CellState> {
        self.cells.iter_mut()
    }

    /// Counts live cells in the Moore neighborhood of `pos`: the 3x3 block
    /// around it minus the center, clamped to the grid. Cells past an edge
    /// do not exist and contribute zero.
    pub fn live_neighbors<P>(&self, pos: P) -> usize
    where
        P: Into<CellPos>,
    {
        let CellPos { row, col } = pos.into();

        (-1isize..=1)
            .cartesian_product(-1isize..=1)
            .filter(|offsets| *offsets != (0, 0))
            .filter_map(|(row_offset, col_offset)| {
                let pos = CellPos {
                    row: row.checked_add_signed(row_offset)?,
                    col: col.checked_add_signed(col_offset)?,
                };

                self.cell(pos)
            })
            .filter(|cell| cell.is_alive())
            .count()
    }

    fn pos_to_index<P>(&self, pos: P) -> Option<usize>
    where
        P: Into<CellPos>,
    {
        let CellPos { row, col } = pos.into();

        if row >= self.rows {
            return None;
        }

        if col >= self.cols {
            return None;
        }

        Some(row * self.cols + col)
    }

    fn index_to_pos(&self, index: usize) -> CellPos {
        let row = index / self.cols;
        let col = index % self.cols;
        CellPos { row, col }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellState {
    Alive,

    #[default]
    Dead,
}

impl CellState {
    pub fn is_alive(self) -> bool {
        self == CellState::Alive
    }

    pub fn toggled(self) -> Self {
        match self {
            CellState::Alive => CellState::Dead,
            CellState::Dead => CellState::Alive,
        }
    }
}
