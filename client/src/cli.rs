use std::{
    io,
    process::exit,
    sync::{Arc, RwLock},
    time::Duration,
};

use anyhow::{Context, bail};
use colored::Colorize;

use crate::{State, runner::RunnerHost};

pub fn run_cli(state_arc: Arc<RwLock<State>>) {
    for line_res in io::stdin().lines() {
        let line = line_res.unwrap();
        let args = line.split_whitespace();

        if let Err(e) = handle_cmd(&state_arc, args) {
            eprintln!("{} {e:#}", "!".red());
        }
    }
}

fn handle_cmd<'a, I>(state_arc: &Arc<RwLock<State>>, mut args: I) -> anyhow::Result<()>
where
    I: Iterator<Item = &'a str>,
{
    match args.next().context("No command")? {
        "step" => {
            let times = args.next().unwrap_or("1").parse::<usize>()?;

            let mut state = state_arc.write().unwrap();

            let mut last_report = None;
            for _ in 0..times {
                last_report = Some(state.engine.step());
            }

            if let Some(report) = last_report {
                println!(
                    "{} cells changed in {:.2?}",
                    report.changes.len(),
                    report.elapsed
                );
            }
        }

        "run" => {
            let millis = args.next().unwrap_or("50").parse::<u64>()?;

            let mut state = state_arc.write().unwrap();
            if state.runner.is_some() {
                bail!("Already running");
            }

            state.runner = Some(RunnerHost::start(
                state_arc.clone(),
                Duration::from_millis(millis),
            ));
        }

        "rate" => {
            let millis = args
                .next()
                .context("missing interval millis")?
                .parse::<u64>()?;

            let state = state_arc.read().unwrap();
            state
                .runner
                .as_ref()
                .context("Not running")?
                .set_rate(millis);
        }

        "stop" => {
            stop_runner(&mut state_arc.write().unwrap());
        }

        "random" => {
            let chance = args.next().unwrap_or("50").parse::<i64>()?;

            // Fill probability is a percentage; anything outside 0..=100
            // clamps at the boundary before it reaches the engine.
            let chance = chance.clamp(0, 100) as u8;

            let mut state = state_arc.write().unwrap();
            stop_runner(&mut state);
            state.engine.randomize(chance);
        }

        "resize" => {
            let width = args.next().context("missing width")?.parse::<usize>()?;
            let height = args.next().context("missing height")?.parse::<usize>()?;

            let mut state = state_arc.write().unwrap();
            stop_runner(&mut state);
            state.engine.resize(height.max(1), width.max(1))?;
        }

        "reset" => {
            let mut state = state_arc.write().unwrap();
            stop_runner(&mut state);

            let (rows, cols) = (state.engine.grid().rows(), state.engine.grid().cols());
            state.engine.resize(rows, cols)?;
        }

        "toggle" => {
            let row = args.next().context("missing row")?.parse::<usize>()?;
            let col = args.next().context("missing col")?.parse::<usize>()?;

            let mut state = state_arc.write().unwrap();
            let new_state = state.engine.toggle([row, col])?;

            println!("({row}, {col}) is now {new_state:?}");
        }

        "time" => {
            let state = state_arc.read().unwrap();

            match state.engine.last_step_time() {
                Some(elapsed) => println!("last step took {elapsed:.2?}"),
                None => println!("no step computed yet"),
            }
        }

        "exit" => {
            exit(0);
        }

        _ => bail!("Unknown command"),
    }

    println!("{}", "OK".green());
    Ok(())
}

fn stop_runner(state: &mut State) {
    if let Some(runner) = state.runner.take() {
        runner.stop();
    }
}
