//! Shape generation for 2D primitives
//!
//! Builds one frame's triangle list in pixel coordinates (top-left origin)
//! from an immutable snapshot of the simulation. No simulation side effects.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::{Vertex, colors};
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH, TILE_SIZE};
use crate::screen_row;
use crate::sim::{GameState, LaneKind};

/// Ticks of idle budget left at which the eagle overlay starts ramping in
const EAGLE_OVERLAY_TICKS: u32 = 120;

/// Push a filled axis-aligned rectangle (two triangles)
pub fn push_rect(out: &mut Vec<Vertex>, pos: Vec2, size: Vec2, color: [f32; 4]) {
    let (x0, y0) = (pos.x, pos.y);
    let (x1, y1) = (pos.x + size.x, pos.y + size.y);

    out.push(Vertex::new(x0, y0, color));
    out.push(Vertex::new(x1, y0, color));
    out.push(Vertex::new(x0, y1, color));

    out.push(Vertex::new(x0, y1, color));
    out.push(Vertex::new(x1, y0, color));
    out.push(Vertex::new(x1, y1, color));
}

/// Push a filled circle as a triangle fan
pub fn push_circle(out: &mut Vec<Vertex>, center: Vec2, radius: f32, color: [f32; 4], segments: u32) {
    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        out.push(Vertex::new(center.x, center.y, color));
        out.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        out.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }
}

fn push_lane(out: &mut Vec<Vertex>, state: &GameState, lane_index: usize, sy: f32) {
    let lane = &state.lanes[lane_index];
    let bg = match &lane.kind {
        LaneKind::Grass { .. } => colors::GRASS,
        LaneKind::Road { .. } => colors::ROAD,
        LaneKind::River { .. } => colors::RIVER,
        LaneKind::Rail { .. } => colors::RAIL_BED,
    };
    push_rect(out, Vec2::new(0.0, sy), Vec2::new(SCREEN_WIDTH, TILE_SIZE), bg);

    match &lane.kind {
        LaneKind::Grass { obstacles } => {
            for &ox in obstacles {
                let center = Vec2::new(
                    ox as f32 * TILE_SIZE + TILE_SIZE / 2.0,
                    sy + TILE_SIZE / 2.0,
                );
                push_circle(out, center, TILE_SIZE / 3.0, colors::TREE, 12);
            }
        }
        LaneKind::Road { vehicles } => {
            // Dashed center line
            let mut x = 0.0;
            while x < SCREEN_WIDTH {
                push_rect(
                    out,
                    Vec2::new(x, sy + TILE_SIZE / 2.0 - 2.0),
                    Vec2::new(20.0, 4.0),
                    colors::ROAD_DASH,
                );
                x += 60.0;
            }

            for v in vehicles {
                let w = v.kind.width() * TILE_SIZE;
                let body = Vec2::new(v.x * TILE_SIZE, sy + TILE_SIZE * 0.15);
                let color = match v.kind {
                    crate::sim::VehicleKind::Car => colors::CAR,
                    crate::sim::VehicleKind::Truck => colors::TRUCK,
                };
                push_rect(out, body, Vec2::new(w, TILE_SIZE * 0.7), color);
                push_rect(
                    out,
                    Vec2::new(body.x + w * 0.2, sy + TILE_SIZE * 0.25),
                    Vec2::new(w * 0.3, TILE_SIZE * 0.28),
                    colors::WINDOW,
                );
            }
        }
        LaneKind::River { logs } => {
            for log in logs {
                let w = log.length as f32 * TILE_SIZE;
                push_rect(
                    out,
                    Vec2::new(log.x * TILE_SIZE, sy + TILE_SIZE * 0.2),
                    Vec2::new(w, TILE_SIZE * 0.6),
                    colors::LOG,
                );
                // Grain lines, one per cell
                for i in 0..log.length {
                    let line_x = log.x * TILE_SIZE + i as f32 * TILE_SIZE + TILE_SIZE / 2.0;
                    push_rect(
                        out,
                        Vec2::new(line_x, sy + TILE_SIZE * 0.2),
                        Vec2::new(2.0, TILE_SIZE * 0.6),
                        colors::LOG_GRAIN,
                    );
                }
            }
        }
        LaneKind::Rail { train } => {
            // Flash the whole lane while the crossing warning counts down
            if train.warning_ticks > 0 && train.warning_ticks % 20 < 10 {
                push_rect(
                    out,
                    Vec2::new(0.0, sy),
                    Vec2::new(SCREEN_WIDTH, TILE_SIZE),
                    colors::WARNING,
                );
            }

            if train.active {
                let w = train.length as f32 * TILE_SIZE;
                push_rect(
                    out,
                    Vec2::new(train.x * TILE_SIZE, sy + TILE_SIZE * 0.1),
                    Vec2::new(w, TILE_SIZE * 0.8),
                    colors::TRAIN,
                );
                for i in 0..train.length {
                    push_rect(
                        out,
                        Vec2::new(
                            train.x * TILE_SIZE + i as f32 * TILE_SIZE + 10.0,
                            sy + TILE_SIZE * 0.3,
                        ),
                        Vec2::new(20.0, 15.0),
                        colors::TRAIN_WINDOW,
                    );
                }
            }
        }
    }
}

fn push_player(out: &mut Vec<Vertex>, state: &GameState) {
    let p = &state.player;
    let sy = screen_row(state.camera, state.config.grid_height, p.render_y) * TILE_SIZE;
    let center = Vec2::new(
        p.render_x * TILE_SIZE + TILE_SIZE / 2.0,
        sy + TILE_SIZE / 2.0,
    );

    push_circle(out, center, TILE_SIZE / 3.0, colors::PLAYER, 16);

    // Beak points in the walking direction (always rightward, like the
    // original sprite)
    out.push(Vertex::new(center.x + TILE_SIZE / 4.0, center.y, colors::BEAK));
    out.push(Vertex::new(
        center.x + TILE_SIZE / 3.0 + 5.0,
        center.y - 3.0,
        colors::BEAK,
    ));
    out.push(Vertex::new(
        center.x + TILE_SIZE / 3.0 + 5.0,
        center.y + 3.0,
        colors::BEAK,
    ));

    push_circle(out, center + Vec2::new(-5.0, -5.0), 2.0, colors::EYE, 8);
    push_circle(out, center + Vec2::new(5.0, -5.0), 2.0, colors::EYE, 8);
}

/// Build the full frame for one resolved simulation state
pub fn build_frame(state: &GameState) -> Vec<Vertex> {
    let mut out = Vec::with_capacity(2048);
    let view_h = state.config.grid_height;

    for (i, lane) in state.lanes.iter().enumerate() {
        let row = screen_row(state.camera, view_h, lane.y as f32);
        // Small margin above and below the viewport
        if (-2.0..=view_h as f32 + 2.0).contains(&row) {
            push_lane(&mut out, state, i, row * TILE_SIZE);
        }
    }

    push_player(&mut out, state);

    // Darkening overlay as the idle budget runs out
    if let Some(left) = state.eagle_ticks_left()
        && left < EAGLE_OVERLAY_TICKS
    {
        let alpha = ((EAGLE_OVERLAY_TICKS - left) as f32 / EAGLE_OVERLAY_TICKS as f32) * 0.33;
        push_rect(
            &mut out,
            Vec2::ZERO,
            Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT),
            [0.0, 0.0, 0.0, alpha],
        );
    }

    out
}
