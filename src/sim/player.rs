//! The shrimp

use glam::Vec2;

use super::action::{Action, Cue};
use super::category::{Category, CategorySet};
use super::physics::PhysicsBody;
use super::scene::{NodeId, NodeKind, Scene};
use super::texture::PLAYER_FRAMES;
use crate::consts::*;

/// Collision set while alive
pub const ALIVE_COLLISION: CategorySet = CategorySet::only(Category::World).with(Category::Obstacle);
/// Collision set after game over: falls through coral, lands on the floor
pub const DEAD_COLLISION: CategorySet = CategorySet::only(Category::World);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Player {
    pub node: NodeId,
}

impl Player {
    /// Setup position: 70% of half the width, mid-height
    pub fn home(viewport: Vec2) -> Vec2 {
        Vec2::new(viewport.x / 2.0 * 0.7, viewport.y / 2.0)
    }

    /// Position used by every (re)start, slightly above mid-height
    pub fn start_position(viewport: Vec2) -> Vec2 {
        Vec2::new(viewport.x / 2.0 * 0.7, viewport.y / 2.0 * 1.2)
    }

    pub fn spawn(scene: &mut Scene, viewport: Vec2) -> Self {
        let node = scene.add(
            scene.root(),
            NodeKind::Sprite {
                frames: PLAYER_FRAMES.to_vec(),
            },
            Self::home(viewport),
        );
        if let Some(n) = scene.get_mut(node) {
            n.z = PLAYER_Z;
            n.body = Some(
                PhysicsBody::dynamic(PLAYER_FRAMES[0].size, Category::Player)
                    .with_collision(ALIVE_COLLISION)
                    .with_contact_test(ALIVE_COLLISION),
            );
        }
        scene.run(node, Self::swim_action());
        Self { node }
    }

    /// Frame-cycle animation, runs for the whole scene lifetime
    pub fn swim_action() -> Action {
        Action::Animate {
            frames: PLAYER_FRAMES.len(),
            time_per_frame: PLAYER_FRAME_TIME,
        }
        .forever()
    }

    /// Stop, then kick upward
    pub fn flap(&self, scene: &mut Scene, force: f32) {
        if let Some(body) = scene.body_mut(self.node) {
            body.velocity = Vec2::ZERO;
            body.apply_impulse(Vec2::new(0.0, force), PLAYER_MASS);
        }
    }

    /// Back to the start position, upright and at rest. Drops an unfinished
    /// death roll so its cue can't freeze the next run.
    pub fn reset(&self, scene: &mut Scene, viewport: Vec2) {
        scene.stop_actions(self.node);
        scene.run(self.node, Self::swim_action());
        if let Some(node) = scene.get_mut(self.node) {
            node.transform.position = Self::start_position(viewport);
            node.transform.rotation = 0.0;
            if let Some(body) = node.body.as_mut() {
                body.velocity = Vec2::ZERO;
                body.collision_mask = ALIVE_COLLISION;
            }
        }
    }

    /// Drop out of the coral and roll; cues `RollFinished` when done
    pub fn begin_death_roll(&self, scene: &mut Scene) {
        let Some(node) = scene.get_mut(self.node) else {
            return;
        };
        if let Some(body) = node.body.as_mut() {
            body.collision_mask = DEAD_COLLISION;
        }
        let angle = std::f32::consts::PI * node.transform.position.y * ROLL_FACTOR;
        scene.run(
            self.node,
            Action::sequence([
                Action::RotateBy {
                    angle,
                    duration: ROLL_DURATION,
                },
                Action::Run(Cue::RollFinished),
            ]),
        );
    }

    pub fn position(&self, scene: &Scene) -> Vec2 {
        scene
            .get(self.node)
            .map(|n| n.transform.position)
            .unwrap_or_default()
    }

    pub fn velocity(&self, scene: &Scene) -> Vec2 {
        scene.body(self.node).map(|b| b.velocity).unwrap_or_default()
    }
}
