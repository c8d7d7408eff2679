//! Game state and core simulation types
//!
//! All state needed for deterministic replay lives here.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::config::SimConfig;
use super::lane::Lane;
use super::tick::generate_initial_lanes;
use crate::lerp;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Run ended; only Restart is accepted
    GameOver,
}

/// Weak reference to the log currently carrying the player.
///
/// The log's identity is owned by its lane, so the player never holds a real
/// reference; the pair is re-resolved against the lane every landed tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRef {
    pub lane_y: i32,
    pub log_index: usize,
}

/// The player: a grid actor with smooth interpolated hops.
///
/// `grid_x` is fractional because log drift carries the player continuously;
/// `grid_y` is integral and non-decreasing for the life of a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub grid_x: f32,
    pub grid_y: i32,
    /// Interpolated position used for drawing
    pub render_x: f32,
    pub render_y: f32,
    pub target_x: f32,
    pub target_y: i32,
    pub moving: bool,
    /// Hop interpolation, in [0, 1) while moving
    pub move_progress: f32,
    pub alive: bool,
    pub riding: Option<LogRef>,
    /// Consecutive non-moving ticks since the last accepted move
    pub idle_ticks: u32,
}

impl Player {
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            grid_x: x as f32,
            grid_y: y,
            render_x: x as f32,
            render_y: y as f32,
            target_x: x as f32,
            target_y: y,
            moving: false,
            move_progress: 0.0,
            alive: true,
            riding: None,
            idle_ticks: 0,
        }
    }

    /// Submit a move intent. Silently rejected while mid-hop, for backward
    /// motion, out of horizontal bounds, or into a grass obstacle.
    pub fn try_move(&mut self, dx: i32, dy: i32, lanes: &[Lane], cfg: &SimConfig) {
        if self.moving {
            return;
        }

        // Backward movement is permanently disallowed
        if dy < 0 {
            return;
        }

        let new_x = self.grid_x + dx as f32;
        let new_y = self.grid_y + dy;

        if new_x < 0.0 || new_x >= cfg.grid_width as f32 {
            return;
        }

        if (dx != 0 || dy != 0)
            && let Some(lane) = lanes.get(new_y as usize)
            && lane.has_obstacle_at(new_x.round() as i32)
        {
            return;
        }

        // Hopping forward always steps off the log
        if dy > 0 {
            self.riding = None;
        }

        self.idle_ticks = 0;
        self.target_x = new_x;
        self.target_y = new_y;
        self.moving = true;
        self.move_progress = 0.0;
    }

    /// Progress the current hop by one tick
    pub fn advance(&mut self, move_step: f32) {
        if !self.moving {
            return;
        }

        self.move_progress += move_step;
        if self.move_progress >= 1.0 {
            self.grid_x = self.target_x;
            self.grid_y = self.target_y;
            self.render_x = self.grid_x;
            self.render_y = self.grid_y as f32;
            self.moving = false;
            self.move_progress = 0.0;
        } else {
            self.render_x = lerp(self.grid_x, self.target_x, self.move_progress);
            self.render_y = lerp(self.grid_y as f32, self.target_y as f32, self.move_progress);
        }
    }
}

fn detached_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Immutable tunables for this session
    pub config: SimConfig,
    /// Current phase
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Camera row, smoothed toward `camera_target`
    pub camera: f32,
    pub camera_target: f32,
    /// One point per newly reached row
    pub score: u64,
    /// Highest row ever landed on
    pub max_progress: i32,
    /// Set on the first scored forward move; gates camera pressure,
    /// catch-up death and the idle countdown
    pub started: bool,
    pub player: Player,
    /// Lanes indexed by row; append-only, never reordered
    pub lanes: Vec<Lane>,
    /// Session RNG; reseeded from `seed`, not serialized
    #[serde(skip, default = "detached_rng")]
    pub rng: Pcg32,
}

impl GameState {
    /// Create a fresh session with the given seed
    pub fn new(seed: u64, config: SimConfig) -> Self {
        let mut state = Self {
            seed,
            config,
            phase: GamePhase::Playing,
            time_ticks: 0,
            camera: 0.0,
            camera_target: 0.0,
            score: 0,
            max_progress: 0,
            started: false,
            player: Player::new(config.grid_width / 2, 0),
            lanes: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        };

        generate_initial_lanes(&mut state);
        state
    }

    /// Replace this session with a fresh one on a derived seed
    pub fn restart(&mut self) {
        *self = Self::new(self.seed.wrapping_add(1), self.config);
    }

    /// Lethal event: end the run. Ordinary state, not an error path.
    pub(crate) fn kill(&mut self, cause: &str) {
        self.player.alive = false;
        self.phase = GamePhase::GameOver;
        log::info!("game over: {cause} (score {})", self.score);
    }

    /// Ticks remaining until the eagle attacks; `None` before the first move
    /// or while hopping
    pub fn eagle_ticks_left(&self) -> Option<u32> {
        if self.started && !self.player.moving {
            Some(
                self.config
                    .idle_limit_ticks
                    .saturating_sub(self.player.idle_ticks),
            )
        } else {
            None
        }
    }
}
