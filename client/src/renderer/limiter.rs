use std::time::{Duration, Instant};

/// Throttles the redraw loop to a target frame time. spin_sleep keeps the
/// wakeup accurate where a plain thread::sleep overshoots.
pub struct FrameLimiter {
    target_delta: Duration,
    last_frame: Option<Instant>,
}

impl FrameLimiter {
    pub fn new(target_delta: Duration) -> Self {
        Self {
            target_delta,
            last_frame: None,
        }
    }

    /// Sleeps off whatever remains of the current frame's time slot. The
    /// first call returns immediately.
    pub fn wait(&mut self) {
        if let Some(last_frame) = self.last_frame {
            let elapsed = last_frame.elapsed();

            if elapsed < self.target_delta {
                spin_sleep::sleep(self.target_delta - elapsed);
            }
        }

        self.last_frame = Some(Instant::now());
    }
}
