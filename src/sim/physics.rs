//! Axis-aligned physics
//!
//! Bodies are rectangles attached to scene nodes. Dynamic bodies integrate
//! gravity and are pushed out of any static body whose category is in their
//! collision set. Contacts are edge-triggered: a `Contact` is produced only on
//! the tick a reporting pair starts touching.

use std::collections::BTreeSet;

use glam::Vec2;

use super::category::{Category, CategorySet};
use super::scene::{NodeId, Scene};
use crate::Rect;

/// Pairs closer than this still count as touching (resting contact)
pub const CONTACT_SLOP: f32 = 0.5;

#[derive(Debug, Clone, PartialEq)]
pub struct PhysicsBody {
    pub size: Vec2,
    /// Moved by gravity and impulses; static bodies only follow their node
    pub dynamic: bool,
    pub velocity: Vec2,
    pub category: Category,
    /// Categories this body physically collides with
    pub collision_mask: CategorySet,
    /// Categories this body reports contacts with
    pub contact_test_mask: CategorySet,
}

impl PhysicsBody {
    /// Static body (follows its node, never simulated)
    pub fn fixed(size: Vec2, category: Category) -> Self {
        Self {
            size,
            dynamic: false,
            velocity: Vec2::ZERO,
            category,
            collision_mask: CategorySet::EMPTY,
            contact_test_mask: CategorySet::EMPTY,
        }
    }

    pub fn dynamic(size: Vec2, category: Category) -> Self {
        Self {
            dynamic: true,
            ..Self::fixed(size, category)
        }
    }

    pub fn with_collision(mut self, mask: CategorySet) -> Self {
        self.collision_mask = mask;
        self
    }

    pub fn with_contact_test(mut self, mask: CategorySet) -> Self {
        self.contact_test_mask = mask;
        self
    }

    /// Instantaneous change of momentum
    pub fn apply_impulse(&mut self, impulse: Vec2, mass: f32) {
        if self.dynamic && mass > 0.0 {
            self.velocity += impulse / mass;
        }
    }

    /// Whether a pair with `other` produces contact events
    pub fn reports_contact_with(&self, other: &PhysicsBody) -> bool {
        self.contact_test_mask.contains(other.category)
            || other.contact_test_mask.contains(self.category)
    }
}

/// Two bodies started touching
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    pub body_a: NodeId,
    pub body_b: NodeId,
}

#[derive(Debug, Clone)]
pub struct PhysicsWorld {
    pub gravity: Vec2,
    /// Pairs touching after the last step, (dynamic, static)
    touching: BTreeSet<(NodeId, NodeId)>,
}

struct StaticBody {
    id: NodeId,
    rect: Rect,
    body: PhysicsBody,
}

impl PhysicsWorld {
    pub fn new(gravity: Vec2) -> Self {
        Self {
            gravity,
            touching: BTreeSet::new(),
        }
    }

    /// Forget touching pairs (next overlap reports again)
    pub fn reset_contacts(&mut self) {
        self.touching.clear();
    }

    /// Advance all dynamic bodies by `dt` and return new contacts
    pub fn step(&mut self, scene: &mut Scene, dt: f32) -> Vec<Contact> {
        let statics: Vec<StaticBody> = scene
            .bodies()
            .filter(|(_, body)| !body.dynamic)
            .filter_map(|(id, body)| {
                let position = scene.world_position(id)?;
                Some(StaticBody {
                    id,
                    rect: Rect::new(position, body.size),
                    body: body.clone(),
                })
            })
            .collect();
        let movers: Vec<NodeId> = scene
            .bodies()
            .filter(|(_, body)| body.dynamic)
            .map(|(id, _)| id)
            .collect();

        let mut now = BTreeSet::new();
        for id in movers {
            let Some(offset) = scene.parent_offset(id) else {
                continue;
            };
            let Some(node) = scene.get_mut(id) else {
                continue;
            };
            let Some(body) = node.body.as_mut() else {
                continue;
            };

            body.velocity += self.gravity * dt;
            node.transform.position += body.velocity * dt;

            for other in &statics {
                let mover = Rect::new(offset + node.transform.position, body.size);

                if body.collision_mask.contains(other.body.category) {
                    let push = mover.separation(&other.rect);
                    if push != Vec2::ZERO {
                        node.transform.position += push;
                        if push.x * body.velocity.x < 0.0 {
                            body.velocity.x = 0.0;
                        }
                        if push.y * body.velocity.y < 0.0 {
                            body.velocity.y = 0.0;
                        }
                    }
                }

                if body.reports_contact_with(&other.body)
                    && mover.overlaps(&other.rect, CONTACT_SLOP)
                {
                    now.insert((id, other.id));
                }
            }
        }

        let contacts: Vec<Contact> = now
            .difference(&self.touching)
            .map(|&(body_a, body_b)| Contact { body_a, body_b })
            .collect();
        for contact in &contacts {
            log::trace!("contact begin {:?} / {:?}", contact.body_a, contact.body_b);
        }
        self.touching = now;
        contacts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::scene::NodeKind;

    fn world() -> PhysicsWorld {
        PhysicsWorld::new(Vec2::new(0.0, -300.0))
    }

    fn falling_box(scene: &mut Scene, y: f32) -> NodeId {
        let id = scene.add(scene.root(), NodeKind::Container, Vec2::new(0.0, y));
        if let Some(node) = scene.get_mut(id) {
            node.body = Some(
                PhysicsBody::dynamic(Vec2::splat(20.0), Category::Player)
                    .with_collision(CategorySet::only(Category::World))
                    .with_contact_test(CategorySet::only(Category::World).with(Category::Obstacle)),
            );
        }
        id
    }

    fn floor(scene: &mut Scene) -> NodeId {
        let id = scene.add(scene.root(), NodeKind::Container, Vec2::new(0.0, -5.0));
        if let Some(node) = scene.get_mut(id) {
            node.body = Some(PhysicsBody::fixed(Vec2::new(400.0, 10.0), Category::World));
        }
        id
    }

    #[test]
    fn test_gravity_accelerates() {
        let mut scene = Scene::new();
        let id = falling_box(&mut scene, 500.0);
        let mut physics = world();
        physics.step(&mut scene, 0.1);
        let velocity = scene.body(id).map(|b| b.velocity).unwrap_or_default();
        assert!((velocity.y + 30.0).abs() < 1e-3);
        let y = scene.world_position(id).map(|p| p.y).unwrap_or_default();
        assert!((y - 497.0).abs() < 1e-3);
    }

    #[test]
    fn test_rests_on_world_and_reports_once() {
        let mut scene = Scene::new();
        let player = falling_box(&mut scene, 30.0);
        let ground = floor(&mut scene);
        let mut physics = world();

        let mut contacts = Vec::new();
        for _ in 0..120 {
            contacts.extend(physics.step(&mut scene, 1.0 / 60.0));
        }

        // Resting on top of the floor (floor top at 0, box half height 10)
        let y = scene.world_position(player).map(|p| p.y).unwrap_or_default();
        assert!((y - 10.0).abs() < 0.5, "y = {y}");
        assert_eq!(
            contacts,
            vec![Contact {
                body_a: player,
                body_b: ground
            }]
        );
    }

    #[test]
    fn test_passes_through_non_colliding_category() {
        let mut scene = Scene::new();
        let player = falling_box(&mut scene, 0.0);
        let coral = scene.add(scene.root(), NodeKind::Container, Vec2::new(0.0, -20.0));
        if let Some(node) = scene.get_mut(coral) {
            node.body = Some(
                PhysicsBody::fixed(Vec2::new(40.0, 40.0), Category::Obstacle)
                    .with_contact_test(CategorySet::only(Category::Player)),
            );
        }
        let mut physics = world();
        let contacts = physics.step(&mut scene, 1.0 / 60.0);
        // Overlapping, reported, but not pushed out
        assert_eq!(contacts.len(), 1);
        let y = scene.world_position(player).map(|p| p.y).unwrap_or_default();
        assert!(y < 0.0);
    }

    #[test]
    fn test_silent_pair_not_reported() {
        let mut scene = Scene::new();
        falling_box(&mut scene, 0.0);
        let consumed = scene.add(scene.root(), NodeKind::Container, Vec2::ZERO);
        if let Some(node) = scene.get_mut(consumed) {
            node.body = Some(
                PhysicsBody::fixed(Vec2::new(10.0, 800.0), Category::Consumed)
                    .with_contact_test(CategorySet::only(Category::Consumed)),
            );
        }
        let mut physics = world();
        assert!(physics.step(&mut scene, 1.0 / 60.0).is_empty());
    }

    #[test]
    fn test_impulse_sets_velocity() {
        let mut body = PhysicsBody::dynamic(Vec2::splat(10.0), Category::Player);
        body.apply_impulse(Vec2::new(0.0, 10.0), 0.04);
        assert!((body.velocity.y - 250.0).abs() < 1e-3);

        let mut wall = PhysicsBody::fixed(Vec2::splat(10.0), Category::World);
        wall.apply_impulse(Vec2::new(0.0, 10.0), 0.04);
        assert_eq!(wall.velocity, Vec2::ZERO);
    }
}
