use std::time::{Duration, Instant};

use grid::{CellState, Grid};
use pos::CellPos;

pub mod error;
pub mod grid;
pub mod pos;

pub use error::EngineError;

/// The simulation engine: owns the current generation's grid and advances
/// it on request. Purely request/response. It knows nothing about drawing
/// or scheduling, holds no timers, and has no notion of "running".
///
/// Not internally synchronized; callers sharing an engine across threads
/// wrap it in a lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Engine {
    grid: Grid,
    last_step_time: Option<Duration>,
}

/// The outcome of one generation step: every cell that flipped, in
/// row-major order, plus how long the computation took. The elapsed time is
/// diagnostic only. An empty change list means the automaton has reached a
/// fixed point and further steps are pointless.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    pub changes: Vec<CellPos>,
    pub elapsed: Duration,
}

impl Engine {
    pub fn new(rows: usize, cols: usize) -> Result<Self, EngineError> {
        Ok(Self {
            grid: Grid::new(rows, cols)?,
            last_step_time: None,
        })
    }

    /// Read-only view of the current generation, for renderers.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Wall-clock duration of the most recent step. `None` until the first
    /// step and after any resize or randomize.
    pub fn last_step_time(&self) -> Option<Duration> {
        self.last_step_time
    }

    /// Computes the next generation and reports exactly which cells changed.
    ///
    /// The next generation starts as a copy of the current one; every rule
    /// evaluation reads states and neighbor counts from the current grid
    /// only, so a partially written generation never feeds back into the
    /// computation. The grids are swapped in one assignment at the end;
    /// intermediate states are never observable from outside.
    pub fn step(&mut self) -> StepReport {
        let started = Instant::now();

        let mut next = self.grid.clone();
        let mut changes = Vec::new();

        for (pos, cell) in self.grid.enumerate_cells() {
            let next_cell = next_state(*cell, self.grid.live_neighbors(pos));

            if next_cell != *cell {
                // SAFETY: enumerate_cells only yields in-range positions,
                // and next has the same dimensions, so unwrap is fine.
                *next.cell_mut(pos).unwrap() = next_cell;
                changes.push(pos);
            }
        }

        self.grid = next;

        let elapsed = started.elapsed();
        self.last_step_time = Some(elapsed);

        StepReport { changes, elapsed }
    }

    /// Reinitializes every cell with an independent Bernoulli trial: alive
    /// with probability `probability_percent / 100`. Overwrites the whole
    /// buffer in place; prior contents are gone. Callers clamp the input to
    /// 0..=100; anything above 100 behaves like 100.
    pub fn randomize(&mut self, probability_percent: u8) {
        for cell in self.grid.cells_mut() {
            *cell = if rand::random_range(0..100u32) < u32::from(probability_percent) {
                CellState::Alive
            } else {
                CellState::Dead
            };
        }

        self.last_step_time = None;
    }

    /// Flips one cell in place and returns its new state. The coordinate
    /// comes from untrusted input (pointer translation), so this is the one
    /// mutator with a mandatory bounds check: out of range is a reported
    /// no-op, never a panic.
    pub fn toggle<P>(&mut self, pos: P) -> Result<CellState, EngineError>
    where
        P: Into<CellPos>,
    {
        let pos = pos.into();
        let (rows, cols) = (self.grid.rows(), self.grid.cols());

        let cell = self
            .grid
            .cell_mut(pos)
            .ok_or(EngineError::OutOfRange { pos, rows, cols })?;

        *cell = cell.toggled();
        Ok(*cell)
    }

    /// Replaces the grid with a fresh all-dead grid of the new size,
    /// regardless of prior contents.
    pub fn resize(&mut self, rows: usize, cols: usize) -> Result<(), EngineError> {
        self.grid = Grid::new(rows, cols)?;
        self.last_step_time = None;
        Ok(())
    }
}

/// B3/S23: a live cell survives with 2 or 3 live neighbors; a dead cell is
/// born with exactly 3. Everything else is dead next generation.
fn next_state(current: CellState, live_neighbors: usize) -> CellState {
    let alive = match current {
        CellState::Alive => matches!(live_neighbors, 2 | 3),
        CellState::Dead => live_neighbors == 3,
    };

    if alive {
        CellState::Alive
    } else {
        CellState::Dead
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine_with_live_cells(rows: usize, cols: usize, live: &[[usize; 2]]) -> Engine {
        let mut engine = Engine::new(rows, cols).unwrap();
        for pos in live {
            assert_eq!(engine.toggle(*pos), Ok(CellState::Alive));
        }
        engine
    }

    fn positions(cells: &[[usize; 2]]) -> Vec<CellPos> {
        cells.iter().map(|pos| CellPos::from(*pos)).collect()
    }

    #[test]
    fn step_is_deterministic() {
        let mut a = engine_with_live_cells(
            6,
            6,
            &[[0, 1], [1, 2], [2, 0], [2, 1], [2, 2], [4, 4], [4, 5]],
        );
        let mut b = a.clone();

        let report_a = a.step();
        let report_b = b.step();

        assert_eq!(a.grid(), b.grid());
        assert_eq!(report_a.changes, report_b.changes);
    }

    #[test]
    fn block_is_a_still_life() {
        let mut engine = engine_with_live_cells(5, 5, &[[1, 1], [1, 2], [2, 1], [2, 2]]);
        let before = engine.grid().clone();

        let report = engine.step();

        assert!(report.changes.is_empty());
        assert_eq!(engine.grid(), &before);
    }

    #[test]
    fn blinker_oscillates_with_period_two() {
        let mut engine = engine_with_live_cells(5, 5, &[[2, 1], [2, 2], [2, 3]]);
        let horizontal = engine.grid().clone();

        // Horizontal to vertical: the ends die, the cells above and below
        // the center are born. Exactly four flips, row-major order.
        let report = engine.step();
        assert_eq!(
            report.changes,
            positions(&[[1, 2], [2, 1], [2, 3], [3, 2]])
        );
        for pos in [[1, 2], [2, 2], [3, 2]] {
            assert_eq!(engine.grid().cell(pos), Some(&CellState::Alive));
        }
        for pos in [[2, 1], [2, 3]] {
            assert_eq!(engine.grid().cell(pos), Some(&CellState::Dead));
        }

        // And back again: the same four cells flip the other way.
        let report = engine.step();
        assert_eq!(
            report.changes,
            positions(&[[1, 2], [2, 1], [2, 3], [3, 2]])
        );
        assert_eq!(engine.grid(), &horizontal);
    }

    #[test]
    fn lone_corner_cell_dies() {
        let mut engine = engine_with_live_cells(3, 3, &[[0, 0]]);

        let report = engine.step();

        assert_eq!(report.changes, positions(&[[0, 0]]));
        assert!(engine.grid().enumerate_cells().all(|(_, cell)| !cell.is_alive()));
    }

    #[test]
    fn randomize_at_zero_percent_kills_everything() {
        let mut engine = Engine::new(8, 8).unwrap();
        engine.step();

        engine.randomize(0);

        assert!(engine.grid().enumerate_cells().all(|(_, cell)| !cell.is_alive()));
        // A randomized board is a new starting point; the step diagnostic
        // no longer describes it.
        assert_eq!(engine.last_step_time(), None);
    }

    #[test]
    fn randomize_at_hundred_percent_fills_everything() {
        let mut engine = Engine::new(8, 8).unwrap();
        engine.step();

        engine.randomize(100);

        assert!(engine.grid().enumerate_cells().all(|(_, cell)| cell.is_alive()));
        assert_eq!(engine.last_step_time(), None);
    }

    #[test]
    fn double_toggle_restores_the_cell() {
        let mut engine = Engine::new(4, 4).unwrap();

        assert_eq!(engine.toggle([1, 3]), Ok(CellState::Alive));
        assert_eq!(engine.toggle([1, 3]), Ok(CellState::Dead));
        assert_eq!(engine.grid().cell([1, 3]), Some(&CellState::Dead));
    }

    #[test]
    fn out_of_range_toggle_is_a_reported_noop() {
        let mut engine = Engine::new(4, 4).unwrap();
        let before = engine.grid().clone();

        assert_eq!(
            engine.toggle([4, 0]),
            Err(EngineError::OutOfRange {
                pos: CellPos { row: 4, col: 0 },
                rows: 4,
                cols: 4,
            })
        );
        assert_eq!(engine.grid(), &before);
    }

    #[test]
    fn resize_yields_a_dead_grid_of_the_new_size() {
        let mut engine = Engine::new(4, 4).unwrap();
        engine.randomize(100);
        engine.step();

        engine.resize(3, 7).unwrap();

        assert_eq!(engine.grid().rows(), 3);
        assert_eq!(engine.grid().cols(), 7);
        assert!(engine.grid().enumerate_cells().all(|(_, cell)| !cell.is_alive()));
        assert_eq!(engine.last_step_time(), None);
    }

    #[test]
    fn invalid_resize_is_rejected() {
        let mut engine = Engine::new(4, 4).unwrap();

        assert_eq!(
            engine.resize(0, 7),
            Err(EngineError::InvalidDimension { rows: 0, cols: 7 })
        );
        assert_eq!(
            Engine::new(1, 0).unwrap_err(),
            EngineError::InvalidDimension { rows: 1, cols: 0 }
        );
        assert_eq!(
            engine.resize(usize::MAX, 2),
            Err(EngineError::InvalidDimension {
                rows: usize::MAX,
                cols: 2,
            })
        );
    }

    #[test]
    fn step_records_its_elapsed_time() {
        let mut engine = engine_with_live_cells(5, 5, &[[2, 1], [2, 2], [2, 3]]);
        assert_eq!(engine.last_step_time(), None);

        let report = engine.step();

        assert_eq!(engine.last_step_time(), Some(report.elapsed));
    }
}
