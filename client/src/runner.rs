use std::{
    sync::{
        Arc, RwLock,
        atomic::{AtomicU64, Ordering},
        mpsc::{self, Receiver, Sender, TryRecvError},
    },
    thread,
    time::Duration,
};

use colored::Colorize;

use crate::State;

static NEXT_RUNNER_ID: AtomicU64 = AtomicU64::new(0);

/// Handle to the background stepping thread. The thread advances the shared
/// engine at a fixed interval and terminates on its own once a step reports
/// no changes, since a fixed point never changes again.
pub struct RunnerHost {
    id: u64,
    stop_sender: Sender<()>,
    rate_sender: Sender<u64>,
}

impl RunnerHost {
    pub fn start(state_arc: Arc<RwLock<State>>, mut interval: Duration) -> Self {
        let id = NEXT_RUNNER_ID.fetch_add(1, Ordering::Relaxed);
        let (stop_sender, stop_receiver) = mpsc::channel();
        let (rate_sender, rate_receiver) = mpsc::channel();

        thread::spawn(move || {
            let mut generations = 0usize;

            while keep_running(&stop_receiver) {
                let mut state = state_arc.write().unwrap();
                let report = state.engine.step();
                drop(state);

                generations += 1;

                if report.changes.is_empty() {
                    println!(
                        "{} settled after {generations} generations",
                        "*".green()
                    );

                    // The CLI may have stopped this runner and started a new
                    // one between the step above and this lock; a settling
                    // thread may only release its own handle.
                    clear_own_handle(&mut state_arc.write().unwrap(), id);
                    break;
                }

                if let Ok(rate) = rate_receiver.try_recv() {
                    interval = Duration::from_millis(rate);
                }

                thread::sleep(interval);
            }
        });

        Self {
            id,
            stop_sender,
            rate_sender,
        }
    }

    pub fn stop(self) {
        // The thread may already have settled and exited on its own.
        let _ = self.stop_sender.send(());
    }

    pub fn set_rate(&self, rate_millis: u64) {
        let _ = self.rate_sender.send(rate_millis);
    }
}

/// A runner steps until it is told to stop or its handle is gone. A
/// disconnected channel means the handle was dropped without `stop`, and
/// nothing could ever signal this thread again.
fn keep_running(stop_receiver: &Receiver<()>) -> bool {
    matches!(stop_receiver.try_recv(), Err(TryRecvError::Empty))
}

fn clear_own_handle(state: &mut State, id: u64) {
    if state.runner.as_ref().is_some_and(|runner| runner.id == id) {
        state.runner = None;
    }
}
