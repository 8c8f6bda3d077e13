use std::time::Instant;

use crate::env::env_flag;

/// Environment variable which enables timing logs for analysis stages.
pub const TIMING_ENV_VAR: &str = "SPRITE_TIMING";

/// Return true if stage timings should be logged.
pub fn timing_enabled() -> bool {
    env_flag(TIMING_ENV_VAR, false)
}

/// Accumulates the time spent in a named analysis stage.
pub struct Timer {
    name: &'static str,
    start: Option<Instant>,
    elapsed: u64,
}

impl Timer {
    /// Create a stopped timer.
    pub fn new(name: &'static str) -> Timer {
        Timer {
            name,
            start: None,
            elapsed: 0,
        }
    }

    /// Create a timer and start it.
    pub fn start_new(name: &'static str) -> Timer {
        let mut timer = Timer::new(name);
        timer.start();
        timer
    }

    /// Start the timer. Restarts the current interval if already running.
    pub fn start(&mut self) {
        self.start = Some(Instant::now());
    }

    /// Stop the timer and add the current interval to the total.
    pub fn end(&mut self) {
        if let Some(start) = self.start.take() {
            self.elapsed += start.elapsed().as_micros() as u64;
        }
    }

    /// Total time recorded so far, in milliseconds.
    pub fn elapsed_ms(&self) -> f32 {
        (self.elapsed as f32) / 1000.0
    }

    /// Log the elapsed time, if timing is enabled with `SPRITE_TIMING`.
    pub fn report(&self) {
        if timing_enabled() {
            log::info!("{} took {:.3}ms", self.name, self.elapsed_ms());
        }
    }
}
