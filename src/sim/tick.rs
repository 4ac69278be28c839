//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. Order within a
//! tick: input, then scene actions (and the cues they fire), then physics and
//! contact resolution.

use super::action::Cue;
use super::category::Category;
use super::collision::{ContactOutcome, resolve_contact};
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Autopilot flaps once the shrimp sinks this far below the gap center
const AUTOPILOT_MARGIN: f32 = 50.0;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Tap/click/key press this tick
    pub tap: bool,
    /// Idle/demo mode - autopilot plays the game
    pub idle_mode: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();

    let tap = input.tap || (input.idle_mode && autopilot_wants_tap(state));
    if tap {
        handle_tap(state, &mut events);
    }

    for event in state.scene.advance(dt) {
        match event.cue {
            Cue::SpawnObstacle => {
                let obstacle = state.spawn_obstacle();
                events.push(GameEvent::ObstacleSpawned {
                    gap_center: obstacle.gap_center,
                });
            }
            Cue::RollFinished => {
                state.stop_player();
                events.push(GameEvent::RollFinished);
                log::info!("roll finished, tap to restart");
            }
        }
    }

    let contacts = state.physics.step(&mut state.scene, dt);
    for contact in contacts {
        match resolve_contact(state, contact) {
            ContactOutcome::Scored { .. } => events.push(GameEvent::Scored {
                score: state.score.value,
            }),
            ContactOutcome::GameOver => events.push(GameEvent::GameOver {
                score: state.score.value,
            }),
            ContactOutcome::Ignored | ContactOutcome::AlreadyConsumed => {}
        }
    }

    state.time_ticks += 1;
    events
}

fn handle_tap(state: &mut GameState, events: &mut Vec<GameEvent>) {
    match state.phase() {
        GamePhase::Stopped => {
            state.start(state.initial_touch_force);
            events.push(GameEvent::Restarted);
        }
        GamePhase::Running => {
            state.player.flap(&mut state.scene, state.touch_force);
            events.push(GameEvent::Flap);
        }
        // Still rolling
        GamePhase::GameOver => {}
    }
}

/// Height the autopilot steers toward: the middle of the nearest gap it has
/// not yet scored, or mid-screen when nothing is coming
fn autopilot_target(state: &GameState) -> f32 {
    let scene = &state.scene;
    let half_lower = state.spawner.lower.height() / 2.0;

    let mut best: Option<(f32, f32)> = None;
    for &pair in scene.children(state.obstacles) {
        let mut trigger_x = None;
        let mut lower_y: Option<f32> = None;
        for &piece in scene.children(pair) {
            let (Some(body), Some(pos)) = (scene.body(piece), scene.world_position(piece)) else {
                continue;
            };
            match body.category {
                Category::ScoreTrigger => trigger_x = Some(pos.x),
                Category::Obstacle => {
                    lower_y = Some(lower_y.map_or(pos.y, |y| y.min(pos.y)));
                }
                _ => {}
            }
        }
        if let (Some(x), Some(y)) = (trigger_x, lower_y)
            && best.is_none_or(|(bx, _)| x < bx)
        {
            best = Some((x, y + half_lower + CORAL_GAP / 2.0));
        }
    }

    best.map_or(state.viewport.y / 2.0, |(_, y)| y)
}

fn autopilot_wants_tap(state: &GameState) -> bool {
    match state.phase() {
        GamePhase::Stopped => true,
        GamePhase::GameOver => false,
        GamePhase::Running => {
            let position = state.player.position(&state.scene);
            let velocity = state.player.velocity(&state.scene);
            position.y < autopilot_target(state) - AUTOPILOT_MARGIN && velocity.y <= 0.0
        }
    }
}
