//! Frame clock with fixed-timestep accumulator

/// Hands out simulated time in fixed steps.
///
/// Replays call [`FrameClock::advance`] with a known delta so runs are
/// reproducible. Deltas are taken as given; a frame longer than the fixed
/// timestep yields several steps.
pub struct FrameClock {
    /// Total elapsed time in seconds
    pub total_time: f64,
    /// Time since last frame in seconds
    pub delta_time: f64,
    /// Fixed timestep interval (default: 1/60 second)
    pub fixed_timestep: f64,
    /// Frames advanced so far
    pub frame_count: u64,
    accumulator: f64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self {
            total_time: 0.0,
            delta_time: 0.0,
            fixed_timestep: 1.0 / 60.0,
            frame_count: 0,
            accumulator: 0.0,
        }
    }
}

impl FrameClock {
    /// Create a new clock with default 60Hz fixed timestep
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clock with a custom fixed timestep
    pub fn with_fixed_timestep(hz: f64) -> Self {
        Self {
            fixed_timestep: 1.0 / hz,
            ..Self::default()
        }
    }

    /// Advance by an explicit delta. Negative deltas count as zero.
    pub fn advance(&mut self, dt: f64) {
        self.delta_time = dt.max(0.0);
        self.total_time += self.delta_time;
        self.accumulator += self.delta_time;
        self.frame_count += 1;
    }

    /// Returns true if there's enough accumulated time for a fixed update step
    pub fn should_fixed_update(&self) -> bool {
        // Tolerate float drift so N steps of 1/N accumulate to N updates
        self.accumulator + 1e-9 >= self.fixed_timestep
    }

    /// Consume one fixed timestep from the accumulator
    pub fn consume_fixed_step(&mut self) {
        self.accumulator = (self.accumulator - self.fixed_timestep).max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_defaults() {
        let clock = FrameClock::new();
        assert!((clock.fixed_timestep - 1.0 / 60.0).abs() < 1e-10);
        assert_eq!(clock.total_time, 0.0);
        assert_eq!(clock.delta_time, 0.0);
        assert_eq!(clock.frame_count, 0);
    }

    #[test]
    fn test_custom_timestep() {
        let clock = FrameClock::with_fixed_timestep(30.0);
        assert!((clock.fixed_timestep - 1.0 / 30.0).abs() < 1e-10);
    }

    #[test]
    fn test_advance_accumulates() {
        let mut clock = FrameClock::with_fixed_timestep(60.0);
        clock.advance(1.0 / 30.0);

        assert!(clock.should_fixed_update());
        clock.consume_fixed_step();
        assert!(clock.should_fixed_update());
        clock.consume_fixed_step();
        assert!(!clock.should_fixed_update());
        assert!((clock.total_time - 1.0 / 30.0).abs() < 1e-10);
    }

    #[test]
    fn test_long_step_is_one_update() {
        // 2 Hz: each frame is half a second and must yield exactly one step
        let mut clock = FrameClock::with_fixed_timestep(2.0);
        clock.advance(clock.fixed_timestep);
        assert!((clock.delta_time - 0.5).abs() < 1e-10);
        assert!(clock.should_fixed_update());
        clock.consume_fixed_step();
        assert!(!clock.should_fixed_update());
    }

    #[test]
    fn test_negative_delta_is_ignored() {
        let mut clock = FrameClock::new();
        clock.advance(-1.0);
        assert_eq!(clock.delta_time, 0.0);
        assert_eq!(clock.total_time, 0.0);
        assert!(!clock.should_fixed_update());
    }
}
