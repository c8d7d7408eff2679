//! Lanes: one horizontal strip of the world per row
//!
//! Each lane owns a homogeneous terrain/hazard payload. The payload is a sum
//! type so every per-kind branch in update, collision and rendering is
//! exhaustiveness-checked instead of comparing type strings.

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::config::SimConfig;
use super::entity::{Log, Train, Vehicle, VehicleKind};

/// Terrain/hazard payload of a lane
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LaneKind {
    /// Safe terrain with point obstacles (trees) at integer X positions.
    /// Duplicates are allowed; membership is all that matters.
    Grass { obstacles: Vec<i32> },
    /// Wrapping vehicle traffic
    Road { vehicles: Vec<Vehicle> },
    /// Wrapping log flow over lethal water
    River { logs: Vec<Log> },
    /// A single train actor, dormant until triggered
    Rail { train: Train },
}

/// One row of the world. Identity (`y`) and kind are fixed at construction;
/// entities within mutate every tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lane {
    pub y: i32,
    /// +1 rightward, -1 leftward flow for the contained entities
    pub direction: f32,
    /// Per-tick entity speed chosen by the generation policy
    pub speed: f32,
    pub kind: LaneKind,
}

impl Lane {
    pub fn grass(y: i32, cfg: &SimConfig, rng: &mut Pcg32) -> Self {
        let count = rng.random_range(0..=3);
        let obstacles = (0..count)
            .map(|_| rng.random_range(0..cfg.grid_width))
            .collect();

        Self {
            y,
            direction: 1.0,
            speed: 0.0,
            kind: LaneKind::Grass { obstacles },
        }
    }

    pub fn road(y: i32, direction: f32, speed: f32, cfg: &SimConfig, rng: &mut Pcg32) -> Self {
        let count = rng.random_range(2..=4);
        let spacing = cfg.grid_width as f32 / count as f32;

        let vehicles = (0..count)
            .map(|i| {
                let jitter = rng.random_range(-spacing * 0.3..spacing * 0.3);
                let x = i as f32 * spacing + jitter;
                // Cars twice as likely as trucks
                let kind = match rng.random_range(0..3) {
                    0 | 1 => VehicleKind::Car,
                    _ => VehicleKind::Truck,
                };
                Vehicle::new(x, y, speed, direction, kind)
            })
            .collect();

        Self {
            y,
            direction,
            speed,
            kind: LaneKind::Road { vehicles },
        }
    }

    pub fn river(y: i32, direction: f32, speed: f32, cfg: &SimConfig, rng: &mut Pcg32) -> Self {
        let count = rng.random_range(2..=3);
        let spacing = cfg.grid_width as f32 / count as f32;

        let logs = (0..count)
            .map(|i| {
                let jitter = rng.random_range(-spacing * 0.3..spacing * 0.3);
                let x = i as f32 * spacing + jitter;
                let length = rng.random_range(2..=3);
                Log::new(x, y, speed, direction, length)
            })
            .collect();

        Self {
            y,
            direction,
            speed,
            kind: LaneKind::River { logs },
        }
    }

    pub fn rail(y: i32, direction: f32, speed: f32, cfg: &SimConfig) -> Self {
        Self {
            y,
            direction,
            speed,
            kind: LaneKind::Rail {
                train: Train::new(
                    y,
                    direction,
                    cfg.train_speed,
                    cfg.train_length,
                    cfg.grid_width as f32,
                ),
            },
        }
    }

    /// Whether a grass obstacle blocks cell `x`. Non-grass lanes never block.
    pub fn has_obstacle_at(&self, x: i32) -> bool {
        match &self.kind {
            LaneKind::Grass { obstacles } => obstacles.contains(&x),
            _ => false,
        }
    }

    /// River and rail lanes should not cluster back to back
    pub fn is_hazard(&self) -> bool {
        matches!(
            self.kind,
            LaneKind::River { .. } | LaneKind::Rail { .. }
        )
    }

    /// Advance all contained entities one tick
    pub fn update(&mut self, cfg: &SimConfig) {
        let width = cfg.grid_width as f32;
        match &mut self.kind {
            LaneKind::Grass { .. } => {}
            LaneKind::Road { vehicles } => {
                for vehicle in vehicles {
                    vehicle.advance(width);
                }
            }
            LaneKind::River { logs } => {
                for log in logs {
                    log.advance(width);
                }
            }
            LaneKind::Rail { train } => train.advance(width),
        }
    }

    /// Any vehicle overlapping a landed player at `(px, py)`
    pub fn vehicle_hit(&self, px: f32, py: i32) -> bool {
        match &self.kind {
            LaneKind::Road { vehicles } => vehicles.iter().any(|v| v.hits(px, py)),
            _ => false,
        }
    }

    /// Index of the first log supporting the player, if any
    pub fn supporting_log(&self, px: f32, py: i32) -> Option<usize> {
        match &self.kind {
            LaneKind::River { logs } => logs.iter().position(|l| l.supports(px, py)),
            _ => None,
        }
    }

    /// The log at `index`, when this is a river lane
    pub fn log(&self, index: usize) -> Option<&Log> {
        match &self.kind {
            LaneKind::River { logs } => logs.get(index),
            _ => None,
        }
    }

    /// An active train overlapping a landed player at `(px, py)`
    pub fn train_hit(&self, px: f32, py: i32) -> bool {
        match &self.kind {
            LaneKind::Rail { train } => train.hits(px, py),
            _ => false,
        }
    }
}
