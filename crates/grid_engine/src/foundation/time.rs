//! Time management utilities

use std::time::Instant;

/// High-precision timer for frame timing
pub struct Timer {
    last_frame: Instant,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create a new timer
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Update the timer (should be called once per frame)
    pub fn update(&mut self) {
        let now = Instant::now();
        self.delta_time = now.duration_since(self.last_frame).as_secs_f32();
        self.total_time += self.delta_time;
        self.last_frame = now;
        self.frame_count += 1;
    }

    /// Get the time since the last frame in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Get the total elapsed time since timer creation
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the average FPS since timer creation
    pub fn average_fps(&self) -> f32 {
        if self.total_time > 0.0 {
            self.frame_count as f32 / self.total_time
        } else {
            0.0
        }
    }
}

/// Fixed-timestep accumulator
///
/// Converts variable frame time into a whole number of fixed-duration
/// simulation ticks. The collision grid expects exactly one `update` call
/// per tick, so the owning loop feeds real delta time in and steps the grid
/// once per tick produced.
pub struct FixedStep {
    step: f32,
    accumulator: f32,
}

impl FixedStep {
    /// Maximum ticks consumed from a single frame; keeps a long stall from
    /// spiraling into an unbounded catch-up burst.
    const MAX_TICKS_PER_FRAME: u32 = 8;

    /// Create an accumulator producing ticks of `step` seconds
    pub fn new(step: f32) -> Self {
        Self {
            step,
            accumulator: 0.0,
        }
    }

    /// The fixed tick duration in seconds
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Feed a frame's delta time, returning how many fixed ticks to run
    pub fn accumulate(&mut self, delta_time: f32) -> u32 {
        self.accumulator += delta_time;
        let mut ticks = 0;
        while self.accumulator >= self.step && ticks < Self::MAX_TICKS_PER_FRAME {
            self.accumulator -= self.step;
            ticks += 1;
        }
        if ticks == Self::MAX_TICKS_PER_FRAME {
            // Drop the remainder rather than letting it snowball
            self.accumulator = 0.0;
        }
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_step_accumulation() {
        let mut step = FixedStep::new(0.1);

        assert_eq!(step.accumulate(0.05), 0);
        assert_eq!(step.accumulate(0.05), 1);
        assert_eq!(step.accumulate(0.25), 2);
    }

    #[test]
    fn test_fixed_step_clamps_catch_up() {
        let mut step = FixedStep::new(0.01);

        // A two-second stall must not produce 200 ticks
        assert_eq!(step.accumulate(2.0), FixedStep::MAX_TICKS_PER_FRAME);
        // And the backlog is discarded afterwards
        assert_eq!(step.accumulate(0.0), 0);
    }

    #[test]
    fn test_timer_frame_count() {
        let mut timer = Timer::new();
        timer.update();
        timer.update();
        assert_eq!(timer.frame_count(), 2);
    }
}
