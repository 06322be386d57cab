//! Property tests for the stepping contract: determinism, exactness of the
//! change list, and agreement between the reported changes and the B3/S23
//! rule applied to the previous generation's neighbor counts.

use itertools::Itertools;
use liblife::Engine;
use liblife::grid::{CellState, Grid};
use proptest::prelude::*;

fn arb_engine() -> impl Strategy<Value = Engine> {
    (1..16usize, 1..16usize).prop_flat_map(|(rows, cols)| {
        proptest::collection::vec(any::<bool>(), rows * cols).prop_map(move |cells| {
            let mut engine = Engine::new(rows, cols).unwrap();

            for (index, alive) in cells.iter().enumerate() {
                if *alive {
                    engine.toggle([index / cols, index % cols]).unwrap();
                }
            }

            engine
        })
    })
}

fn alive(grid: &Grid, pos: liblife::pos::CellPos) -> bool {
    grid.cell(pos).is_some_and(|cell| cell.is_alive())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn step_is_deterministic(engine in arb_engine()) {
        let mut a = engine.clone();
        let mut b = engine;

        let report_a = a.step();
        let report_b = b.step();

        prop_assert_eq!(a.grid(), b.grid());
        prop_assert_eq!(report_a.changes, report_b.changes);
    }

    #[test]
    fn change_list_is_the_exact_diff(engine in arb_engine()) {
        let before = engine.grid().clone();
        let mut engine = engine;

        let report = engine.step();

        let expected = before
            .enumerate_cells()
            .filter(|(pos, cell)| engine.grid().cell(*pos) != Some(*cell))
            .map(|(pos, _)| pos)
            .collect_vec();

        // enumerate_cells is row-major, so this also pins the ordering and
        // rules out duplicates.
        prop_assert_eq!(report.changes, expected);
    }

    #[test]
    fn next_generation_follows_the_rule(engine in arb_engine()) {
        let before = engine.grid().clone();
        let mut engine = engine;

        engine.step();

        for (pos, cell) in engine.grid().enumerate_cells() {
            let neighbors = before.live_neighbors(pos);

            let expected = if alive(&before, pos) {
                matches!(neighbors, 2 | 3)
            } else {
                neighbors == 3
            };

            prop_assert_eq!(cell.is_alive(), expected, "at {}", pos);
        }
    }

    #[test]
    fn toggle_twice_is_identity(engine in arb_engine(), row in 0..16usize, col in 0..16usize) {
        let mut engine = engine;
        let before = engine.grid().clone();

        match engine.toggle([row, col]) {
            Ok(first) => {
                let second = engine.toggle([row, col]).unwrap();
                prop_assert_eq!(second, first.toggled());
                prop_assert_eq!(engine.grid(), &before);
            }
            Err(_) => {
                // Out of range must leave the grid untouched.
                prop_assert_eq!(engine.grid(), &before);
            }
        }
    }

    #[test]
    fn randomize_only_writes_binary_states(engine in arb_engine(), chance in 0..=100u8) {
        let mut engine = engine;
        engine.randomize(chance);

        let live = engine
            .grid()
            .enumerate_cells()
            .filter(|(_, cell)| cell.is_alive())
            .count();

        let total = engine.grid().rows() * engine.grid().cols();
        prop_assert!(live <= total);

        if chance == 0 {
            prop_assert_eq!(live, 0);
        }
        if chance == 100 {
            prop_assert_eq!(live, total);
        }

        // Dead cells account for the rest; there is no third state.
        let dead = engine
            .grid()
            .enumerate_cells()
            .filter(|(_, cell)| *cell == &CellState::Dead)
            .count();
        prop_assert_eq!(live + dead, total);
    }
}
