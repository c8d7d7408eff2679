//! Lane Hopper - An endless lane-crossing arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (lanes, entities, collisions, game state)
//! - `renderer`: WebGPU rendering pipeline

pub mod renderer;
pub mod sim;

pub use sim::{GamePhase, GameState, SimConfig, TickInput, tick};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz; all speeds are tuned in per-tick units)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// World grid dimensions in cells
    pub const GRID_WIDTH: i32 = 20;
    pub const GRID_HEIGHT: i32 = 15;
    /// Cell edge length in pixels
    pub const TILE_SIZE: f32 = 40.0;

    /// Canvas dimensions in pixels
    pub const SCREEN_WIDTH: f32 = GRID_WIDTH as f32 * TILE_SIZE;
    pub const SCREEN_HEIGHT: f32 = GRID_HEIGHT as f32 * TILE_SIZE;
}

/// Linear interpolation between two scalars
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// World row to screen row. Higher rows sit higher on screen, so the
/// vertical axis flips around the camera window.
#[inline]
pub fn screen_row(camera: f32, view_height: i32, y: f32) -> f32 {
    camera + view_height as f32 - 1.0 - y
}
