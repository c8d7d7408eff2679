//! Per-tick collision resolution
//!
//! Runs after all entity motion, and only when the player has landed on a
//! cell; hops in flight pass over hazards untouched. Resolution order matches
//! gameplay intent: vehicles, then water/log support, then log drift, then
//! trains.

use super::state::{GameState, LogRef};
use crate::sim::lane::LaneKind;

/// Resolve hazards for the landed player, possibly ending the run
pub(crate) fn resolve(state: &mut GameState) {
    if !state.player.alive || state.player.moving {
        return;
    }

    let px = state.player.grid_x;
    let py = state.player.grid_y;
    let Ok(idx) = usize::try_from(py) else {
        return;
    };
    if idx >= state.lanes.len() {
        return;
    }

    // Road: any vehicle overlap is lethal
    if state.lanes[idx].vehicle_hit(px, py) {
        state.kill("run over");
        return;
    }

    // River: standing on water needs a supporting log
    if matches!(state.lanes[idx].kind, LaneKind::River { .. }) {
        let support = state.lanes[idx].supporting_log(px, py);
        match support {
            Some(log_index) => {
                state.player.riding = Some(LogRef {
                    lane_y: py,
                    log_index,
                });
            }
            None => {
                state.kill("drowned");
                return;
            }
        }
    }

    // Log drift: continuous translation, independent of the hop cooldown.
    // The ref is weak; a stale one is simply dropped.
    if let Some(log_ref) = state.player.riding {
        let drift = state
            .lanes
            .get(log_ref.lane_y as usize)
            .and_then(|lane| lane.log(log_ref.log_index))
            .map(|log| log.drift());

        match drift {
            Some(dx) => {
                let player = &mut state.player;
                player.grid_x += dx;
                player.render_x = player.grid_x;
                player.target_x = player.grid_x;

                let width = state.config.grid_width as f32;
                if player.grid_x < -0.5 || player.grid_x >= width + 0.5 {
                    state.kill("carried off-screen");
                    return;
                }
            }
            None => state.player.riding = None,
        }
    }

    // Rail: only an active train collides; use the post-drift position
    let px = state.player.grid_x;
    if state.lanes[idx].train_hit(px, py) {
        state.kill("hit by a train");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::{Log, Train, Vehicle, VehicleKind};
    use crate::sim::lane::Lane;
    use crate::sim::{GamePhase, SimConfig};

    fn state_with_lane(kind: LaneKind) -> GameState {
        let cfg = SimConfig::default();
        let mut state = GameState::new(11, cfg);
        for lane in &mut state.lanes {
            lane.kind = LaneKind::Grass {
                obstacles: Vec::new(),
            };
        }
        state.lanes[3] = Lane {
            y: 3,
            direction: 1.0,
            speed: 0.05,
            kind,
        };
        state.player.grid_x = 6.0;
        state.player.render_x = 6.0;
        state.player.target_x = 6.0;
        state.player.grid_y = 3;
        state.player.render_y = 3.0;
        state.player.target_y = 3;
        state
    }

    #[test]
    fn test_vehicle_hit_is_lethal() {
        let mut state = state_with_lane(LaneKind::Road {
            vehicles: vec![Vehicle::new(5.0, 3, 0.08, 1.0, VehicleKind::Car)],
        });
        resolve(&mut state);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(!state.player.alive);
    }

    #[test]
    fn test_vehicle_miss_is_safe() {
        let mut state = state_with_lane(LaneKind::Road {
            vehicles: vec![Vehicle::new(10.0, 3, 0.08, 1.0, VehicleKind::Truck)],
        });
        resolve(&mut state);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_river_without_log_drowns() {
        let mut state = state_with_lane(LaneKind::River {
            logs: vec![Log::new(0.0, 3, 0.05, 1.0, 2)],
        });
        resolve(&mut state);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_log_support_marks_riding_and_drifts() {
        let mut state = state_with_lane(LaneKind::River {
            logs: vec![Log::new(5.0, 3, 0.05, 1.0, 3)],
        });
        resolve(&mut state);

        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(
            state.player.riding,
            Some(LogRef {
                lane_y: 3,
                log_index: 0
            })
        );
        // One tick of drift was applied to both grid and target positions
        assert!((state.player.grid_x - 6.05).abs() < 1e-6);
        assert_eq!(state.player.target_x, state.player.grid_x);
    }

    #[test]
    fn test_log_trailing_edge_does_not_support() {
        // Log spans [5, 8); the player at 8 is in the water
        let mut state = state_with_lane(LaneKind::River {
            logs: vec![Log::new(5.0, 3, 0.05, 1.0, 3)],
        });
        state.player.grid_x = 8.0;
        resolve(&mut state);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_drift_off_edge_is_lethal() {
        let width = SimConfig::default().grid_width as f32;
        let mut state = state_with_lane(LaneKind::River {
            logs: vec![Log::new(width - 2.0, 3, 0.6, 1.0, 3)],
        });
        state.player.grid_x = width - 0.1;
        state.player.target_x = state.player.grid_x;

        resolve(&mut state);
        assert_eq!(state.phase, GamePhase::GameOver, "swept past the edge");
    }

    #[test]
    fn test_active_train_is_lethal() {
        let mut train = Train::new(3, 1.0, 0.5, 5, 20.0);
        train.trigger_warning(1);
        train.advance(20.0);
        train.x = 4.0;
        assert!(train.active);

        let mut state = state_with_lane(LaneKind::Rail { train });
        resolve(&mut state);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_warning_train_is_not_collidable() {
        let mut train = Train::new(3, 1.0, 0.5, 5, 20.0);
        train.trigger_warning(120);
        train.x = 4.0;

        let mut state = state_with_lane(LaneKind::Rail { train });
        resolve(&mut state);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_no_resolution_while_hopping() {
        let mut state = state_with_lane(LaneKind::Road {
            vehicles: vec![Vehicle::new(5.0, 3, 0.08, 1.0, VehicleKind::Car)],
        });
        state.player.moving = true;
        state.player.move_progress = 0.4;

        resolve(&mut state);
        assert_eq!(state.phase, GamePhase::Playing, "hazards wait for landing");
    }
}
