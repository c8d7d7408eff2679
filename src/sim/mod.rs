//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (lanes indexed by row)
//! - No rendering or platform dependencies

pub mod collision;
pub mod config;
pub mod entity;
pub mod lane;
pub mod state;
pub mod tick;

pub use config::SimConfig;
pub use entity::{Log, Train, Vehicle, VehicleKind};
pub use lane::{Lane, LaneKind};
pub use state::{GamePhase, GameState, LogRef, Player};
pub use tick::{TickInput, tick};
