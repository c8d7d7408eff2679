//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically, plus the
//! procedural lane generator that keeps the world ahead of the camera.

use rand::Rng;

use super::collision;
use super::lane::{Lane, LaneKind};
use super::state::{GamePhase, GameState};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Hop one row forward
    pub move_forward: bool,
    /// Step one cell left
    pub move_left: bool,
    /// Step one cell right
    pub move_right: bool,
    /// Backward intent; recognized but always rejected
    pub move_back: bool,
    /// Start a fresh run (GameOver only)
    pub restart: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.phase == GamePhase::GameOver {
        if input.restart {
            state.restart();
            log::info!("restarted with seed {}", state.seed);
        }
        return;
    }

    // Move intents. Backward goes through the same validation path and is
    // rejected there, so the caller never needs to special-case it.
    if input.move_forward {
        state.player.try_move(0, 1, &state.lanes, &state.config);
    }
    if input.move_left {
        state.player.try_move(-1, 0, &state.lanes, &state.config);
    }
    if input.move_right {
        state.player.try_move(1, 0, &state.lanes, &state.config);
    }
    if input.move_back {
        state.player.try_move(0, -1, &state.lanes, &state.config);
    }

    state.time_ticks += 1;

    let cfg = state.config;
    state.player.advance(cfg.move_step);

    // Camera follows two rows behind the player; once the run has started it
    // also creeps forward every tick, pressuring the player onward.
    state.camera_target = (state.player.grid_y as f32 - 2.0).max(0.0);
    if state.started {
        state.camera_target += cfg.camera_pressure;
    }
    state.camera += (state.camera_target - state.camera) * cfg.camera_smoothing;

    // Catch-up death: the bottom edge of the view reached the player's row
    if state.started {
        let screen_y = crate::screen_row(state.camera, cfg.grid_height, state.player.grid_y as f32);
        if screen_y >= cfg.grid_height as f32 - 0.5 {
            state.kill("caught by the screen edge");
            return;
        }
    }

    // Scoring: one point per newly reached row. The first point also marks
    // the run as started.
    if state.player.grid_y > state.max_progress {
        state.score += (state.player.grid_y - state.max_progress) as u64;
        state.max_progress = state.player.grid_y;
        if !state.started {
            state.started = true;
            log::info!("run started");
        }
    }

    // Eagle attack: too long without an accepted move
    if state.started && !state.player.moving {
        state.player.idle_ticks += 1;
        if state.player.idle_ticks >= cfg.idle_limit_ticks {
            state.kill("eagle attack");
            return;
        }
    }

    // Keep generated lanes ahead of the camera
    while (state.lanes.len() as f32) < state.camera + (cfg.grid_height + cfg.gen_lookahead) as f32 {
        push_next_lane(state);
    }

    for lane in &mut state.lanes {
        lane.update(&cfg);
    }

    // Each dormant train has a small independent chance of starting its
    // warning countdown this tick
    for lane in &mut state.lanes {
        if let LaneKind::Rail { train } = &mut lane.kind
            && train.dormant()
            && state.rng.random_bool(cfg.train_trigger_chance)
        {
            train.trigger_warning(cfg.train_warning_ticks);
        }
    }

    collision::resolve(state);
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Archetype {
    Grass,
    Road,
    River,
    Rail,
}

/// Grass is weighted double
const ARCHETYPE_CHOICES: [Archetype; 5] = [
    Archetype::Grass,
    Archetype::Road,
    Archetype::River,
    Archetype::Rail,
    Archetype::Grass,
];

/// Append one procedurally generated lane at the far end of the world
pub(crate) fn push_next_lane(state: &mut GameState) {
    let cfg = state.config;
    let y = state.lanes.len() as i32;
    debug_assert!(
        state.lanes.last().map_or(y == 0, |l| l.y + 1 == y),
        "lane rows must stay dense and monotonic"
    );

    let after_hazard = state.lanes.last().is_some_and(Lane::is_hazard);

    let mut archetype = ARCHETYPE_CHOICES[state.rng.random_range(0..ARCHETYPE_CHOICES.len())];
    // Avoid stacking rivers/rails back to back too often
    if after_hazard && state.rng.random_bool(cfg.hazard_break_chance) {
        archetype = Archetype::Grass;
    }

    let direction = if state.rng.random_bool(0.5) { 1.0 } else { -1.0 };
    let base_speed = if archetype == Archetype::Road {
        cfg.vehicle_base_speed
    } else {
        cfg.log_base_speed
    };
    let speed = base_speed
        * state.rng.random_range(0.7f32..1.3)
        * cfg.difficulty_multiplier(state.score);

    let lane = match archetype {
        Archetype::Grass => Lane::grass(y, &cfg, &mut state.rng),
        Archetype::Road => Lane::road(y, direction, speed, &cfg, &mut state.rng),
        Archetype::River => Lane::river(y, direction, speed, &cfg, &mut state.rng),
        Archetype::Rail => Lane::rail(y, direction, speed, &cfg),
    };
    state.lanes.push(lane);
}

/// Fill the world at session start: a full view plus headroom, with the two
/// bottom rows forced to grass so the spawn cell is safe
pub(crate) fn generate_initial_lanes(state: &mut GameState) {
    let total = state.config.grid_height + 20;
    for y in 0..total {
        if y < 2 {
            let cfg = state.config;
            let lane = Lane::grass(y, &cfg, &mut state.rng);
            state.lanes.push(lane);
        } else {
            push_next_lane(state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SimConfig;
    use proptest::prelude::*;

    /// A session whose pre-generated lanes are all obstacle-free grass, so
    /// movement outcomes only depend on what the test sets up explicitly
    fn grass_world(seed: u64) -> GameState {
        let mut state = GameState::new(seed, SimConfig::default());
        for lane in &mut state.lanes {
            lane.kind = LaneKind::Grass {
                obstacles: Vec::new(),
            };
        }
        state
    }

    /// Run one accepted forward hop to completion (five ticks at the default
    /// move step)
    fn hop_forward(state: &mut GameState) {
        let go = TickInput {
            move_forward: true,
            ..Default::default()
        };
        tick(state, &go);
        while state.player.moving {
            tick(state, &TickInput::default());
        }
    }

    #[test]
    fn test_scoring_marks_started() {
        let mut state = grass_world(1);
        assert!(!state.started);

        hop_forward(&mut state);
        assert!(state.started);
        assert_eq!(state.score, 1);
        assert_eq!(state.max_progress, 1);
        assert_eq!(state.player.grid_y, 1);
    }

    #[test]
    fn test_sideways_moves_do_not_score() {
        let mut state = grass_world(2);
        hop_forward(&mut state);
        let score = state.score;

        let left = TickInput {
            move_left: true,
            ..Default::default()
        };
        tick(&mut state, &left);
        while state.player.moving {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.score, score);
    }

    #[test]
    fn test_idle_death_after_limit() {
        let mut state = grass_world(3);
        for _ in 0..5 {
            hop_forward(&mut state);
        }
        assert_eq!(state.player.grid_y, 5);

        let mut deaths = 0;
        for _ in 0..state.config.idle_limit_ticks + 10 {
            let was_playing = state.phase == GamePhase::Playing;
            tick(&mut state, &TickInput::default());
            if was_playing && state.phase == GamePhase::GameOver {
                deaths += 1;
            }
        }

        assert_eq!(deaths, 1, "idle death fires exactly once");
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(!state.player.alive);
        assert_eq!(state.player.idle_ticks, state.config.idle_limit_ticks);
    }

    #[test]
    fn test_camera_overtaking_player_is_lethal() {
        let mut state = grass_world(4);
        hop_forward(&mut state);

        // The smoothed camera trails the player in normal play; force it
        // past the player's row to exercise the catch-up check directly.
        // Two rows ahead keeps it over the threshold even after the
        // smoothing step pulls it back toward its usual trailing position.
        state.camera = state.player.grid_y as f32 + 2.0;

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(!state.player.alive);
    }

    #[test]
    fn test_camera_trails_two_rows_behind() {
        let mut state = grass_world(10);
        for _ in 0..8 {
            hop_forward(&mut state);
        }
        for _ in 0..200 {
            if state.phase == GamePhase::GameOver {
                break;
            }
            tick(&mut state, &TickInput::default());
        }

        // Camera converges on (grid_y - 2) plus the constant forward bias
        let floor = (state.player.grid_y - 2) as f32;
        assert!(state.camera > floor - 0.1);
        assert!(state.camera < floor + 0.1);
    }

    #[test]
    fn test_no_idle_or_camera_death_before_start() {
        let mut state = grass_world(5);
        for _ in 0..1000 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player.idle_ticks, 0);
    }

    #[test]
    fn test_obstacle_blocks_forward_hop() {
        let mut state = grass_world(6);
        state.player.grid_x = 3.0;
        state.player.render_x = 3.0;
        state.player.target_x = 3.0;
        state.player.grid_y = 4;
        state.player.render_y = 4.0;
        state.player.target_y = 4;
        state.lanes[5].kind = LaneKind::Grass { obstacles: vec![3] };

        let go = TickInput {
            move_forward: true,
            ..Default::default()
        };
        tick(&mut state, &go);

        assert!(!state.player.moving);
        assert_eq!(state.player.grid_y, 4);
        assert_eq!(state.player.grid_x, 3.0);
    }

    #[test]
    fn test_backward_intent_rejected_through_tick() {
        let mut state = grass_world(7);
        hop_forward(&mut state);

        let back = TickInput {
            move_back: true,
            ..Default::default()
        };
        tick(&mut state, &back);
        assert!(!state.player.moving);
        assert_eq!(state.player.grid_y, 1);
    }

    #[test]
    fn test_restart_only_accepted_in_game_over() {
        let mut state = grass_world(8);
        hop_forward(&mut state);
        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut state, &restart);
        assert!(state.started, "restart ignored while playing");

        state.kill("test");
        tick(&mut state, &restart);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert!(!state.started);
        assert_eq!(state.player.grid_y, 0);
    }

    #[test]
    fn test_generation_keeps_lookahead() {
        let mut state = grass_world(9);
        for _ in 0..30 {
            hop_forward(&mut state);
            if state.phase == GamePhase::GameOver {
                break;
            }
            let needed = state.camera
                + (state.config.grid_height + state.config.gen_lookahead) as f32;
            assert!(state.lanes.len() as f32 >= needed);
        }
    }

    #[test]
    fn test_anti_clustering_rate() {
        let mut state = GameState::new(1234, SimConfig::default());
        for _ in 0..5000 {
            push_next_lane(&mut state);
        }

        let mut post_hazard = 0u32;
        let mut post_hazard_grass = 0u32;
        for pair in state.lanes.windows(2) {
            if pair[0].is_hazard() {
                post_hazard += 1;
                if matches!(pair[1].kind, LaneKind::Grass { .. }) {
                    post_hazard_grass += 1;
                }
            }
        }

        // 60% forced grass plus 40% * (2/5) organic grass = 76% expected
        let rate = post_hazard_grass as f64 / post_hazard as f64;
        assert!(post_hazard > 500);
        assert!(
            (0.70..0.82).contains(&rate),
            "post-hazard grass rate {rate} outside expected band"
        );
    }

    #[test]
    fn test_difficulty_monotonic() {
        let cfg = SimConfig::default();
        assert!((cfg.difficulty_multiplier(0) - 1.0).abs() < 1e-6);
        assert!((cfg.difficulty_multiplier(200) - 1.2).abs() < 1e-6);

        let mut last = 0.0f32;
        for score in 0..500u64 {
            let m = cfg.difficulty_multiplier(score);
            assert!(m >= last);
            last = m;
        }
    }

    #[test]
    fn test_determinism() {
        // Two sessions with the same seed and input stream stay identical
        let mut a = GameState::new(99999, SimConfig::default());
        let mut b = GameState::new(99999, SimConfig::default());

        let script = [
            TickInput {
                move_forward: true,
                ..Default::default()
            },
            TickInput::default(),
            TickInput {
                move_left: true,
                ..Default::default()
            },
            TickInput::default(),
            TickInput {
                move_forward: true,
                ..Default::default()
            },
        ];

        for _ in 0..100 {
            for input in &script {
                tick(&mut a, input);
                tick(&mut b, input);
            }
        }

        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    fn input_from_code(code: u8) -> TickInput {
        TickInput {
            move_forward: code == 1,
            move_left: code == 2,
            move_right: code == 3,
            move_back: code == 4,
            restart: false,
        }
    }

    proptest! {
        /// Forward-only, interpolation-bound and wraparound invariants hold
        /// for arbitrary seeds and input scripts
        #[test]
        fn prop_sim_invariants(
            seed in 0u64..500,
            script in proptest::collection::vec(0u8..5, 1..150),
        ) {
            let mut state = GameState::new(seed, SimConfig::default());
            let mut prev_y = state.player.grid_y;

            for code in script {
                tick(&mut state, &input_from_code(code));

                // Forward-only
                prop_assert!(state.player.grid_y >= prev_y);
                prev_y = state.player.grid_y;

                // Interpolation bound
                prop_assert!((0.0..=1.0).contains(&state.player.move_progress));
                if state.player.moving {
                    let lo = state.player.grid_y.min(state.player.target_y) as f32;
                    let hi = state.player.grid_y.max(state.player.target_y) as f32;
                    prop_assert!(state.player.render_y >= lo && state.player.render_y <= hi);

                    let lo = state.player.grid_x.min(state.player.target_x);
                    let hi = state.player.grid_x.max(state.player.target_x);
                    prop_assert!(state.player.render_x >= lo && state.player.render_x <= hi);
                }

                // Wraparound closure
                let width = state.config.grid_width as f32;
                for lane in &state.lanes {
                    match &lane.kind {
                        LaneKind::Road { vehicles } => {
                            for v in vehicles {
                                prop_assert!(v.x >= -2.0 - v.speed && v.x <= width + 2.0 + v.speed);
                            }
                        }
                        LaneKind::River { logs } => {
                            for l in logs {
                                let m = l.length as f32;
                                prop_assert!(l.x >= -m - l.speed && l.x <= width + m + l.speed);
                            }
                        }
                        _ => {}
                    }
                }
            }
        }
    }
}
