//! Simulation tunables
//!
//! Every gameplay number lives in one immutable struct injected at session
//! construction, so tests can run the core on a different grid or with a
//! shorter idle budget without touching process-wide state.

use serde::{Deserialize, Serialize};

use crate::consts::{GRID_HEIGHT, GRID_WIDTH};

/// Immutable simulation parameters, fixed for the life of a session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Horizontal cell count; player X is confined to `[0, grid_width)`
    pub grid_width: i32,
    /// Visible rows; also the camera window height
    pub grid_height: i32,

    /// Base vehicle speed in cells per tick (before jitter and difficulty)
    pub vehicle_base_speed: f32,
    /// Base log speed in cells per tick
    pub log_base_speed: f32,

    /// Train speed in cells per tick (not affected by difficulty)
    pub train_speed: f32,
    /// Train length in cells
    pub train_length: i32,
    /// Warning countdown before a train becomes active, in ticks
    pub train_warning_ticks: u32,
    /// Per-tick chance that a dormant train starts its warning
    pub train_trigger_chance: f64,

    /// Move interpolation step per tick (0.2 = 5 ticks per cell)
    pub move_step: f32,
    /// Consecutive non-moving ticks before the eagle attacks
    pub idle_limit_ticks: u32,

    /// Exponential camera smoothing factor per tick
    pub camera_smoothing: f32,
    /// Constant forward camera pressure per tick, applied once started
    pub camera_pressure: f32,

    /// Rows of lanes kept generated beyond the camera window
    pub gen_lookahead: i32,
    /// Chance of forcing grass right after a river or rail lane
    pub hazard_break_chance: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            grid_width: GRID_WIDTH,
            grid_height: GRID_HEIGHT,
            vehicle_base_speed: 0.08,
            log_base_speed: 0.06,
            train_speed: 0.5,
            train_length: 5,
            train_warning_ticks: 120,
            train_trigger_chance: 0.01,
            move_step: 0.2,
            idle_limit_ticks: 300,
            camera_smoothing: 0.2,
            camera_pressure: 0.008,
            gen_lookahead: 10,
            hazard_break_chance: 0.6,
        }
    }
}

impl SimConfig {
    /// Difficulty multiplier applied to newly generated lane speeds.
    /// Recomputed at generation time, monotonic in score.
    pub fn difficulty_multiplier(&self, score: u64) -> f32 {
        1.0 + (score as f32 / 200.0) * 0.2
    }
}
