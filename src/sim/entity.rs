//! Entity motion models
//!
//! Vehicles and logs are simple kinematic actors that wrap around the lane
//! horizontally and are never despawned. Trains run a small state machine:
//! Dormant -> Warning -> Active -> Dormant.
//!
//! Hit tests are deliberately asymmetric: vehicles use an inclusive interval
//! `x <= px <= x + width` while logs and trains use a half-open
//! `x <= px < x + length`. Both behaviors are load-bearing; do not unify them.

use serde::{Deserialize, Serialize};

/// Vehicle body shape; trucks are wider and therefore harder to dodge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VehicleKind {
    Car,
    Truck,
}

impl VehicleKind {
    /// Body width in cells
    pub fn width(&self) -> f32 {
        match self {
            VehicleKind::Car => 1.5,
            VehicleKind::Truck => 2.0,
        }
    }
}

/// Horizontal wraparound margin for vehicles, in cells
const VEHICLE_WRAP_MARGIN: f32 = 2.0;

/// A car or truck on a road lane
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    pub x: f32,
    pub lane_y: i32,
    pub speed: f32,
    /// +1 rightward, -1 leftward
    pub direction: f32,
    pub kind: VehicleKind,
}

impl Vehicle {
    pub fn new(x: f32, lane_y: i32, speed: f32, direction: f32, kind: VehicleKind) -> Self {
        Self {
            x,
            lane_y,
            speed,
            direction,
            kind,
        }
    }

    /// Advance one tick, wrapping around the lane circumference
    pub fn advance(&mut self, grid_width: f32) {
        self.x += self.speed * self.direction;

        if self.direction > 0.0 && self.x > grid_width + VEHICLE_WRAP_MARGIN {
            self.x = -VEHICLE_WRAP_MARGIN;
        } else if self.direction < 0.0 && self.x < -VEHICLE_WRAP_MARGIN {
            self.x = grid_width + VEHICLE_WRAP_MARGIN;
        }
    }

    /// Lethal overlap with a landed player at `(px, py)`.
    /// Inclusive on both interval ends.
    pub fn hits(&self, px: f32, py: i32) -> bool {
        (py as f32 - self.lane_y as f32).abs() < 0.5
            && self.x <= px
            && px <= self.x + self.kind.width()
    }
}

/// A floating log on a river lane
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Log {
    pub x: f32,
    pub lane_y: i32,
    pub speed: f32,
    pub direction: f32,
    /// Length in cells, always >= 2
    pub length: i32,
}

impl Log {
    pub fn new(x: f32, lane_y: i32, speed: f32, direction: f32, length: i32) -> Self {
        Self {
            x,
            lane_y,
            speed,
            direction,
            length,
        }
    }

    /// Advance one tick; the wrap margin equals the log length so the log is
    /// fully off-screen before it reappears on the other side
    pub fn advance(&mut self, grid_width: f32) {
        self.x += self.speed * self.direction;

        let margin = self.length as f32;
        if self.direction > 0.0 && self.x > grid_width + margin {
            self.x = -margin;
        } else if self.direction < 0.0 && self.x < -margin {
            self.x = grid_width + margin;
        }
    }

    /// True if this log supports a player standing at `(px, py)`.
    /// Half-open interval: the trailing edge does not count.
    pub fn supports(&self, px: f32, py: i32) -> bool {
        (py as f32 - self.lane_y as f32).abs() < 0.5
            && self.x <= px
            && px < self.x + self.length as f32
    }

    /// Horizontal displacement applied to a riding player each tick
    pub fn drift(&self) -> f32 {
        self.speed * self.direction
    }
}

/// A train on a rail lane: Dormant -> Warning -> Active -> Dormant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Train {
    pub lane_y: i32,
    pub direction: f32,
    pub active: bool,
    /// Warning countdown in ticks; nonzero means the crossing is flashing
    pub warning_ticks: u32,
    pub x: f32,
    pub speed: f32,
    pub length: i32,
}

impl Train {
    pub fn new(lane_y: i32, direction: f32, speed: f32, length: i32, grid_width: f32) -> Self {
        Self {
            lane_y,
            direction,
            active: false,
            warning_ticks: 0,
            // Parked well off-screen on the entry side until triggered
            x: if direction > 0.0 {
                -10.0
            } else {
                grid_width + 10.0
            },
            speed,
            length,
        }
    }

    /// True while neither warning nor running
    pub fn dormant(&self) -> bool {
        !self.active && self.warning_ticks == 0
    }

    /// Start the warning countdown. Only effective from Dormant.
    pub fn trigger_warning(&mut self, warning_ticks: u32) {
        if self.dormant() {
            self.warning_ticks = warning_ticks;
        }
    }

    /// Advance one tick of the state machine
    pub fn advance(&mut self, grid_width: f32) {
        if self.warning_ticks > 0 {
            self.warning_ticks -= 1;
            if self.warning_ticks == 0 {
                // Warning elapsed: enter just off-screen on the entry side
                self.active = true;
                self.x = if self.direction > 0.0 {
                    -(self.length as f32)
                } else {
                    grid_width + self.length as f32
                };
            }
        }

        if self.active {
            self.x += self.speed * self.direction;

            // Fully past the far side: back to dormant
            if (self.direction > 0.0 && self.x > grid_width + 5.0)
                || (self.direction < 0.0 && self.x < -5.0)
            {
                self.active = false;
            }
        }
    }

    /// Lethal overlap with a landed player; only an active train collides.
    /// Half-open interval like logs.
    pub fn hits(&self, px: f32, py: i32) -> bool {
        self.active
            && (py as f32 - self.lane_y as f32).abs() < 0.5
            && self.x <= px
            && px < self.x + self.length as f32
    }
}
