use std::{
    sync::{Arc, RwLock},
    thread,
};

use liblife::Engine;
use runner::RunnerHost;

mod cli;
mod renderer;
mod runner;

pub struct State {
    engine: Engine,
    runner: Option<RunnerHost>,
}

fn main() -> anyhow::Result<()> {
    let engine = Engine::new(64, 96)?;

    let state_arc = Arc::new(RwLock::new(State {
        engine,
        runner: None,
    }));

    let cli_state_arc = state_arc.clone();
    thread::spawn(move || cli::run_cli(cli_state_arc));

    renderer::run(state_arc)
}
