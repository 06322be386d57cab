mod frame;
mod limiter;
mod window;

use std::sync::{Arc, Mutex, RwLock};

use anyhow::Context;
use liblife::{grid::CellState, pos::CellPos};
use winit::{
    event::{MouseButton, WindowEvent},
    event_loop::EventLoop,
};

use crate::State;
use frame::Frame;
use window::{LifeWindow, LifeWindowConfig};

pub fn run(state_arc: Arc<RwLock<State>>) -> anyhow::Result<()> {
    let view = ViewState {
        shared: state_arc,
        pointer_cell: None,
        pointer_pressed: false,
        frame_width: 0,
        frame_height: 0,
    };

    let view_arc = Arc::new(Mutex::new(view));
    let draw_view_arc = view_arc.clone();
    let event_view_arc = view_arc.clone();

    let mut window = LifeWindow::new(LifeWindowConfig {
        title: "life".to_owned(),
        width: 960,
        height: 640,
        target_fps: 30,
        draw_callback: Box::new(move |frame| {
            let mut view = draw_view_arc.lock().unwrap();
            draw(&mut view, frame);
        }),
        event_callback: Box::new(move |event| {
            let mut view = event_view_arc.lock().unwrap();
            on_event(&mut view, event);
        }),
    });

    let event_loop = EventLoop::new().context("Creating event loop")?;
    event_loop.run_app(&mut window)?;

    Ok(())
}

fn draw(view: &mut ViewState, mut frame: Frame) {
    view.frame_width = frame.width;
    view.frame_height = frame.height;

    let shared = view.shared.read().unwrap();
    let grid = shared.engine.grid();

    let cell_width = frame.width / grid.cols() as u32;
    let cell_height = frame.height / grid.rows() as u32;

    const CELL_MARGIN: u32 = 1;

    frame.fill([10, 10, 10, 255]);

    for (pos, cell) in grid.enumerate_cells() {
        let screen_x = pos.col as u32 * cell_width;
        let screen_y = pos.row as u32 * cell_height;

        let color = match cell {
            CellState::Alive => [220, 60, 40, 255],
            CellState::Dead => [0, 0, 0, 255],
        };

        frame.fill_rect(
            screen_x + CELL_MARGIN,
            screen_y + CELL_MARGIN,
            cell_width.saturating_sub(CELL_MARGIN * 2),
            cell_height.saturating_sub(CELL_MARGIN * 2),
            color,
        );
    }
}

fn on_event(view: &mut ViewState, event: &WindowEvent) {
    let click = match event {
        WindowEvent::MouseInput {
            state: button_state,
            button,
            ..
        } => {
            if *button == MouseButton::Left {
                view.pointer_pressed = button_state.is_pressed();
                view.pointer_pressed
            } else {
                false
            }
        }
        WindowEvent::CursorMoved { position, .. } => {
            let pointer = position.cast::<u32>();

            let shared = view.shared.read().unwrap();
            let grid = shared.engine.grid();
            let (rows, cols) = (grid.rows(), grid.cols());
            drop(shared);

            let cell_pos = pointer_to_cell(
                pointer.x,
                pointer.y,
                view.frame_width,
                view.frame_height,
                rows,
                cols,
            );

            let prev_cell = view.pointer_cell;
            view.pointer_cell = cell_pos;

            // Dragging across cells paints; hovering inside one cell does not
            // re-toggle it.
            view.pointer_pressed && cell_pos.is_some() && prev_cell != cell_pos
        }
        _ => false,
    };

    if click && let Some(cell_pos) = view.pointer_cell {
        let mut shared = view.shared.write().unwrap();

        // The grid can be resized between mapping and the click; the engine
        // reports that as out of range and we simply drop it.
        let _ = shared.engine.toggle(cell_pos);
    }
}

/// Cells are drawn `frame_width / cols` pixels wide from the frame origin,
/// so the same truncated size maps a pointer back to the cell under it.
/// Positions in the leftover margin past the last cell belong to no cell.
fn pointer_to_cell(
    pointer_x: u32,
    pointer_y: u32,
    frame_width: u32,
    frame_height: u32,
    rows: usize,
    cols: usize,
) -> Option<CellPos> {
    let cell_width = frame_width / cols as u32;
    let cell_height = frame_height / rows as u32;

    if cell_width == 0 || cell_height == 0 {
        return None;
    }

    let pos = CellPos {
        row: (pointer_y / cell_height) as usize,
        col: (pointer_x / cell_width) as usize,
    };

    (pos.row < rows && pos.col < cols).then_some(pos)
}

struct ViewState {
    shared: Arc<RwLock<State>>,
    pointer_cell: Option<CellPos>,
    pointer_pressed: bool,
    frame_width: u32,
    frame_height: u32,
}
