//! Game state and lifecycle
//!
//! The running/game-over distinction is not stored separately: the base
//! container's speed scalar *is* the flag. Zero means game over (all
//! scrolling, spawning and coral travel frozen); the player's own speed
//! reaching zero means the death roll has finished and a tap may restart.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::physics::PhysicsWorld;
use super::player::Player;
use super::scene::{NodeId, NodeKind, Scene};
use super::score::ScoreBoard;
use super::scroll;
use super::spawner::{Obstacle, Spawner};
use super::texture;
use crate::Settings;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Frozen world, death roll in progress
    GameOver,
    /// Roll finished, waiting for a restart tap
    Stopped,
}

/// Something that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Flap,
    ObstacleSpawned { gap_center: f32 },
    Scored { score: u32 },
    GameOver { score: u32 },
    RollFinished,
    Restarted,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub viewport: Vec2,
    pub scene: Scene,
    pub physics: PhysicsWorld,
    /// Parent of everything that stops on game over
    pub base: NodeId,
    /// Parent of coral pairs (and the game-over marker), cleared on restart
    pub obstacles: NodeId,
    pub player: Player,
    pub score: ScoreBoard,
    pub spawner: Spawner,
    /// Upward impulse per tap (difficulty)
    pub touch_force: f32,
    /// Touch force a restart tap uses
    pub initial_touch_force: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl GameState {
    /// Set up the scene and start playing
    pub fn new(seed: u64, settings: &Settings) -> Self {
        let mut state = Self::setup(seed, settings);
        state.start(settings.touch_force);
        state
    }

    /// One-time construction. The world is live but the touch force is 0
    /// until `start`.
    pub fn setup(seed: u64, settings: &Settings) -> Self {
        let viewport = settings.viewport();
        let mut scene = Scene::new();

        let base = scene.add(scene.root(), NodeKind::Container, Vec2::ZERO);
        let obstacles = scene.add(base, NodeKind::Container, Vec2::ZERO);

        for layer in scroll::default_layers(viewport) {
            layer.build(&mut scene, base, viewport.x);
        }

        let player = Player::spawn(&mut scene, viewport);
        scene.run(base, Spawner::schedule());

        let mut score = ScoreBoard::spawn(&mut scene, viewport);
        score.pulse = !settings.reduced_motion;

        log::info!(
            "setup: seed={} viewport={}x{} nodes={}",
            seed,
            viewport.x,
            viewport.y,
            scene.len()
        );

        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            viewport,
            scene,
            physics: PhysicsWorld::new(GRAVITY),
            base,
            obstacles,
            player,
            score,
            spawner: Spawner::new(viewport),
            touch_force: 0.0,
            initial_touch_force: settings.touch_force,
            time_ticks: 0,
        }
    }

    /// (Re)start play with the given touch force
    pub fn start(&mut self, force_y: f32) {
        self.touch_force = force_y;
        self.score.reset(&mut self.scene);
        self.scene.remove_all_children(self.obstacles);
        self.player.reset(&mut self.scene, self.viewport);
        self.physics.reset_contacts();
        self.scene.set_speed(self.player.node, 1.0);
        self.scene.set_speed(self.base, 1.0);
        log::info!("start: touch_force={}", force_y);
    }

    /// Freeze the world and roll the player
    pub fn game_over(&mut self) {
        self.scene.set_speed(self.base, 0.0);
        self.player.begin_death_roll(&mut self.scene);

        let center = self.viewport / 2.0;
        let marker = self
            .scene
            .add(self.obstacles, NodeKind::sprite(texture::GAME_OVER), center);
        if let Some(node) = self.scene.get_mut(marker) {
            node.z = SCORE_Z;
        }
        log::info!("game over: score={}", self.score.value);
    }

    /// Called when the death roll completes
    pub fn stop_player(&mut self) {
        self.scene.set_speed(self.player.node, 0.0);
    }

    pub fn is_running(&self) -> bool {
        self.scene.speed(self.base) > 0.0
    }

    /// Both the world and the player's own animations are stopped
    pub fn is_stopped(&self) -> bool {
        self.scene.speed(self.base) == 0.0 && self.scene.speed(self.player.node) == 0.0
    }

    pub fn phase(&self) -> GamePhase {
        if self.is_running() {
            GamePhase::Running
        } else if self.is_stopped() {
            GamePhase::Stopped
        } else {
            GamePhase::GameOver
        }
    }

    pub fn increment_score(&mut self, by: u32) {
        self.score.increment(&mut self.scene, by);
        log::debug!("score: {}", self.score.value);
    }

    /// Build a coral pair now
    pub fn spawn_obstacle(&mut self) -> Obstacle {
        self.spawner
            .spawn(&mut self.scene, self.obstacles, &mut self.rng)
    }

    /// Live coral pairs (the game-over marker is not a pair)
    pub fn obstacle_count(&self) -> usize {
        self.scene
            .children(self.obstacles)
            .iter()
            .filter(|id| !self.scene.children(**id).is_empty())
            .count()
    }
}
