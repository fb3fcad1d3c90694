/// Pausable simulation clock.
///
/// Elapsed time only advances while running; a paused clock keeps returning
/// the value it had at the pause instant.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SimulationClock {
    elapsed: f64,
    paused: bool,
}

impl SimulationClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by a real frame delta and return the current elapsed seconds.
    /// Negative or non-finite deltas count as zero.
    pub fn tick(&mut self, real_dt: f64) -> f64 {
        if self.paused {
            return self.elapsed;
        }
        if real_dt.is_finite() && real_dt > 0.0 {
            self.elapsed += real_dt;
        }
        self.elapsed
    }

    /// Flip the paused flag, returning the new state
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }
}
