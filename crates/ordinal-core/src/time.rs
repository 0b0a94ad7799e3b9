//! Frame timing
//!
//! Turns the raw wall-clock delta of each frame into the elapsed time handed
//! to the scheduler.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for frame time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeConfig {
    /// How many simulated seconds pass per real second
    pub time_scale: f32,
    /// Maximum raw delta in seconds, to prevent spiral of death
    pub max_delta_time: f32,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            max_delta_time: 0.25,
        }
    }
}

/// Frame time tracking
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    /// Configuration
    pub config: TimeConfig,
    total: Duration,
    delta: Duration,
    frame_count: u64,
    paused: bool,
}

impl FrameClock {
    /// Create a new clock with custom config
    pub fn new(config: TimeConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Advance by the raw delta of the previous frame and return the scaled delta.
    ///
    /// The raw delta is clamped to `max_delta_time` first. A scaled delta too
    /// large for a `Duration` saturates at `Duration::MAX`. While paused the
    /// frame is still counted but no time elapses.
    pub fn update(&mut self, raw_delta: Duration) -> Duration {
        self.frame_count += 1;

        if self.paused {
            self.delta = Duration::ZERO;
            return self.delta;
        }

        let max = Duration::try_from_secs_f32(self.config.max_delta_time.max(0.0))
            .unwrap_or(Duration::MAX);
        let clamped = raw_delta.min(max);
        let scale = f64::from(self.config.time_scale.max(0.0));
        self.delta =
            Duration::try_from_secs_f64(clamped.as_secs_f64() * scale).unwrap_or(Duration::MAX);
        self.total = self.total.saturating_add(self.delta);
        self.delta
    }

    /// Scaled delta of the last frame
    pub fn delta(&self) -> Duration {
        self.delta
    }

    /// Scaled time since the clock started
    pub fn total(&self) -> Duration {
        self.total
    }

    /// Frames counted so far, paused ones included
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Set the time scale (0.0 = frozen, 1.0 = normal, 2.0 = double speed)
    pub fn set_time_scale(&mut self, scale: f32) {
        self.config.time_scale = scale.max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    #[test]
    fn test_frame_clock() {
        let mut clock = FrameClock::default();
        let delta = clock.update(FRAME);

        assert_eq!(delta, FRAME);
        assert_eq!(clock.frame_count(), 1);
        assert_eq!(clock.total(), FRAME);

        clock.pause();
        assert_eq!(clock.update(FRAME), Duration::ZERO);
        assert_eq!(clock.frame_count(), 2);
        assert_eq!(clock.total(), FRAME);
    }

    #[test]
    fn test_delta_clamped() {
        let mut clock = FrameClock::default();
        let delta = clock.update(Duration::from_secs(5));
        assert_eq!(delta, Duration::from_secs_f32(0.25));
    }

    #[test]
    fn test_time_scale() {
        let mut clock = FrameClock::default();
        clock.set_time_scale(2.0);
        assert_eq!(clock.update(Duration::from_millis(100)), Duration::from_millis(200));

        clock.set_time_scale(-1.0);
        assert_eq!(clock.config.time_scale, 0.0);
        assert_eq!(clock.update(FRAME), Duration::ZERO);
    }

    #[test]
    fn test_oversized_scale_saturates() {
        let mut clock = FrameClock::new(TimeConfig {
            time_scale: 1e30,
            max_delta_time: 0.25,
        });
        assert_eq!(clock.update(FRAME), Duration::MAX);
        assert_eq!(clock.update(FRAME), Duration::MAX);
        assert_eq!(clock.total(), Duration::MAX);
    }

    #[test]
    fn test_infinite_scale_saturates() {
        let mut clock = FrameClock::default();
        clock.set_time_scale(f32::INFINITY);
        assert_eq!(clock.update(FRAME), Duration::MAX);

        clock.set_time_scale(f32::NAN);
        assert_eq!(clock.update(FRAME), Duration::ZERO);
    }

    #[test]
    fn test_toggle_pause() {
        let mut clock = FrameClock::default();
        clock.toggle_pause();
        assert!(clock.is_paused());
        clock.toggle_pause();
        assert!(!clock.is_paused());
    }
}
