//! Time system for the Sentinel simulation
//!
//! Handles game time, delta time, and the fixed simulation tick.

use serde::{Deserialize, Serialize};

/// Configuration for game time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeConfig {
    /// How many in-game seconds pass per real second. Negative values freeze time.
    pub time_scale: f32,
    /// Fixed timestep for the simulation tick (in seconds)
    pub fixed_timestep: f32,
    /// Maximum delta time to prevent spiral of death
    pub max_delta_time: f32,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            fixed_timestep: 1.0 / 60.0,
            max_delta_time: 0.25,
        }
    }
}

/// Timing handed to a single agent tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameTime {
    /// Seconds since the previous tick
    pub delta: f32,
    /// Seconds since the simulation started
    pub elapsed: f64,
}

impl FrameTime {
    pub fn new(delta: f32, elapsed: f64) -> Self {
        Self { delta, elapsed }
    }
}

/// Game time tracking
#[derive(Debug, Clone)]
pub struct GameTime {
    /// Configuration
    pub config: TimeConfig,
    /// Time since game start in seconds
    pub total_time: f64,
    /// Delta time for this frame (clamped and scaled)
    pub delta_time: f32,
    /// Unscaled delta time
    pub unscaled_delta_time: f32,
    /// Frame counter
    pub frame_count: u64,
    /// Accumulated time for fixed timestep
    fixed_accumulator: f32,
    /// Simulated time consumed by fixed steps
    fixed_time: f64,
}

impl Default for GameTime {
    fn default() -> Self {
        Self::new(TimeConfig::default())
    }
}

impl GameTime {
    /// Create a new game time with custom config
    pub fn new(config: TimeConfig) -> Self {
        Self {
            config,
            total_time: 0.0,
            delta_time: 0.0,
            unscaled_delta_time: 0.0,
            frame_count: 0,
            fixed_accumulator: 0.0,
            fixed_time: 0.0,
        }
    }

    /// Update the game time with the raw delta from the previous frame
    pub fn update(&mut self, raw_delta: f32) {
        self.unscaled_delta_time = raw_delta.max(0.0).min(self.config.max_delta_time.max(0.0));
        self.frame_count += 1;

        self.delta_time = self.unscaled_delta_time * self.config.time_scale.max(0.0);
        self.total_time += self.delta_time as f64;
        self.fixed_accumulator += self.delta_time;
    }

    /// Get the number of fixed timesteps to process this frame
    pub fn fixed_steps(&mut self) -> u32 {
        if self.config.fixed_timestep.is_nan() || self.config.fixed_timestep <= 0.0 {
            return 0;
        }
        let mut steps = 0;
        while self.fixed_accumulator >= self.config.fixed_timestep {
            self.fixed_accumulator -= self.config.fixed_timestep;
            steps += 1;
        }
        steps
    }

    /// Advance the fixed clock by one step and return its timing
    pub fn next_fixed_frame(&mut self) -> FrameTime {
        let delta = self.config.fixed_timestep;
        self.fixed_time += delta as f64;
        FrameTime::new(delta, self.fixed_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_time() {
        let mut time = GameTime::default();
        time.update(0.016);

        assert!(time.delta_time > 0.0);
        assert_eq!(time.frame_count, 1);
        assert_eq!(time.total_time, time.delta_time as f64);
    }

    #[test]
    fn test_delta_is_clamped() {
        let mut time = GameTime::default();
        time.update(5.0);
        assert_eq!(time.delta_time, 0.25);

        time.update(-1.0);
        assert_eq!(time.delta_time, 0.0);
    }

    #[test]
    fn test_fixed_steps() {
        let mut time = GameTime::default();
        time.update(0.06);
        assert_eq!(time.fixed_steps(), 3);

        let first = time.next_fixed_frame();
        let second = time.next_fixed_frame();
        assert_eq!(first.delta, 1.0 / 60.0);
        assert!(second.elapsed > first.elapsed);
    }

    #[test]
    fn test_time_scale() {
        let mut time = GameTime::new(TimeConfig {
            time_scale: 2.0,
            ..Default::default()
        });
        time.update(0.1);
        assert!((time.delta_time - 0.2).abs() < 1e-6);
        assert_eq!(time.unscaled_delta_time, 0.1);
        assert!(time.fixed_steps() >= 11);

        time.config.time_scale = -3.0;
        time.update(0.1);
        assert_eq!(time.delta_time, 0.0);
        assert_eq!(time.fixed_steps(), 0);
    }
}
