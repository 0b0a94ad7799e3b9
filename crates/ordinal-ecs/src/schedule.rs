use std::time::Duration;

use ordinal_core::FrameClock;

use crate::config::ScheduleConfig;
use crate::world::World;

/// Drives a world one frame at a time: advances the clock, then runs each
/// configured stage in order.
pub struct Schedule {
    stages: Vec<i32>,
    clock: FrameClock,
}

impl Schedule {
    pub fn new(config: ScheduleConfig) -> Self {
        Self {
            stages: config.stages,
            clock: FrameClock::new(config.time),
        }
    }

    /// Run one frame and return the delta handed to the systems.
    ///
    /// While the clock is paused the frame is counted but no stage runs.
    pub fn run_frame(&mut self, world: &mut World, raw_delta: Duration) -> Duration {
        let delta = self.clock.update(raw_delta);
        if self.clock.is_paused() {
            return Duration::ZERO;
        }
        for &stage in &self.stages {
            world.update(stage, delta);
        }
        delta
    }

    /// Stage ids run each frame, in order.
    pub fn stages(&self) -> &[i32] {
        &self.stages
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut FrameClock {
        &mut self.clock
    }
}

impl Default for Schedule {
    fn default() -> Self {
        Self::new(ScheduleConfig::default())
    }
}
