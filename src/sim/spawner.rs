//! Coral obstacle spawner
//!
//! Every `SPAWN_INTERVAL` seconds a coral pair is built just off the right
//! edge: a pillar from the floor, a pillar from the ceiling with a fixed gap
//! between them, and a thin invisible score trigger just past their far edge.
//! The pair slides left and removes itself once it has left the screen.

use glam::Vec2;
use rand::Rng;

use super::action::{Action, Cue};
use super::category::{Category, CategorySet};
use super::physics::PhysicsBody;
use super::scene::{NodeId, NodeKind, Scene};
use super::texture::{self, Texture};
use crate::consts::*;

/// Handles to one spawned coral pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    /// Parent node that moves and removes itself
    pub node: NodeId,
    /// Center height of the lower coral
    pub gap_center: f32,
    pub lower: NodeId,
    pub upper: NodeId,
    pub score_trigger: NodeId,
}

/// Spawn geometry, derived from the viewport and coral textures
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spawner {
    pub viewport: Vec2,
    pub lower: Texture,
    pub upper: Texture,
    /// Horizontal speed of a coral pair
    pub speed: f32,
}

impl Spawner {
    pub fn new(viewport: Vec2) -> Self {
        Self {
            viewport,
            lower: texture::CORAL_UNDER,
            upper: texture::CORAL_ABOVE,
            speed: LAND_SPEED,
        }
    }

    /// Vertical band unit: floor(viewport height / 12)
    pub fn band(&self) -> u32 {
        (self.viewport.y / 12.0).max(0.0) as u32
    }

    /// Random lower-coral height in [band, 3 * band)
    pub fn gap_center(&self, rng: &mut impl Rng) -> f32 {
        let band = u64::from(self.band());
        if band == 0 {
            return 0.0;
        }
        (band + rng.random_range(0..band * 2)) as f32
    }

    /// Distance a pair travels before removing itself
    pub fn travel_distance(&self) -> f32 {
        self.viewport.x + CORAL_TRAVEL_WIDTHS * self.lower.width()
    }

    /// Seconds a pair lives
    pub fn travel_time(&self) -> f32 {
        self.travel_distance() / self.speed
    }

    /// Where a new pair appears
    pub fn spawn_origin(&self) -> Vec2 {
        Vec2::new(self.viewport.x + self.lower.width() * 2.0, 0.0)
    }

    /// The repeating run-then-wait schedule
    pub fn schedule() -> Action {
        Action::sequence([Action::Run(Cue::SpawnObstacle), Action::Wait(SPAWN_INTERVAL)]).forever()
    }

    /// Slide off-screen, then free the pair
    pub fn travel_action(&self) -> Action {
        let distance = self.travel_distance();
        Action::sequence([
            Action::move_by(Vec2::new(-distance, 0.0), self.travel_time()),
            Action::RemoveFromParent,
        ])
    }

    /// Build a coral pair under `container`
    pub fn spawn(&self, scene: &mut Scene, container: NodeId, rng: &mut impl Rng) -> Obstacle {
        let gap_center = self.gap_center(rng);
        let node = scene.add(container, NodeKind::Container, self.spawn_origin());
        if let Some(n) = scene.get_mut(node) {
            n.z = ROCK_Z;
        }

        let lower = self.add_piece(
            scene,
            node,
            NodeKind::sprite(self.lower),
            Vec2::new(0.0, gap_center),
            self.lower.size,
            Category::Obstacle,
        );

        let upper_y =
            gap_center + self.lower.height() / 2.0 + CORAL_GAP + self.upper.height() / 2.0;
        let upper = self.add_piece(
            scene,
            node,
            NodeKind::sprite(self.upper),
            Vec2::new(0.0, upper_y),
            self.upper.size,
            Category::Obstacle,
        );

        let score_trigger = self.add_piece(
            scene,
            node,
            NodeKind::Container,
            Vec2::new(
                self.upper.width() / 2.0 + SCORE_TRIGGER_OFFSET,
                self.viewport.y / 2.0,
            ),
            Vec2::new(SCORE_TRIGGER_WIDTH, self.viewport.y),
            Category::ScoreTrigger,
        );

        scene.run(node, self.travel_action());
        log::debug!("spawned coral {:?} gap_center={}", node, gap_center);

        Obstacle {
            node,
            gap_center,
            lower,
            upper,
            score_trigger,
        }
    }

    fn add_piece(
        &self,
        scene: &mut Scene,
        parent: NodeId,
        kind: NodeKind,
        position: Vec2,
        size: Vec2,
        category: Category,
    ) -> NodeId {
        let id = scene.add(parent, kind, position);
        if let Some(node) = scene.get_mut(id) {
            node.z = ROCK_Z;
            node.body = Some(
                PhysicsBody::fixed(size, category)
                    .with_contact_test(CategorySet::only(Category::Player)),
            );
        }
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn spawner() -> Spawner {
        Spawner::new(Vec2::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT))
    }

    #[test]
    fn test_pair_layout() {
        let mut scene = Scene::new();
        let container = scene.add(scene.root(), NodeKind::Container, Vec2::ZERO);
        let mut rng = Pcg32::seed_from_u64(7);
        let s = spawner();
        let o = s.spawn(&mut scene, container, &mut rng);

        let lower = scene.world_position(o.lower).expect("lower");
        let upper = scene.world_position(o.upper).expect("upper");
        let trigger = scene.world_position(o.score_trigger).expect("trigger");

        assert_eq!(lower, Vec2::new(1024.0 + 192.0, o.gap_center));
        // Gap between lower top and upper bottom is the fixed spacing
        let gap = (upper.y - 160.0) - (lower.y + 160.0);
        assert!((gap - CORAL_GAP).abs() < 1e-3);
        assert_eq!(trigger, Vec2::new(1216.0 + 48.0 + 5.0, 384.0));

        let body = scene.body(o.score_trigger).expect("trigger body");
        assert_eq!(body.category, Category::ScoreTrigger);
        assert_eq!(body.size, Vec2::new(10.0, 768.0));
        assert!(!body.dynamic);
        for id in [o.lower, o.upper, o.score_trigger] {
            let b = scene.body(id).expect("body");
            assert_eq!(b.contact_test_mask, CategorySet::only(Category::Player));
        }
        // Trigger is invisible
        assert_eq!(scene.get(o.score_trigger).map(|n| n.texture().is_none()), Some(true));
    }

    #[test]
    fn test_travel_and_removal() {
        // 2.5s interval, 100 units/s, 1024 wide: travels 1024 + 2.3 * 96
        let s = spawner();
        assert!((s.travel_distance() - (1024.0 + 2.3 * 96.0)).abs() < 1e-3);

        let mut scene = Scene::new();
        let container = scene.add(scene.root(), NodeKind::Container, Vec2::ZERO);
        let mut rng = Pcg32::seed_from_u64(1);
        let o = s.spawn(&mut scene, container, &mut rng);
        let before = scene.len();

        let steps = (s.travel_time() / 0.1).floor() as usize;
        for _ in 0..steps - 1 {
            scene.advance(0.1);
        }
        assert!(scene.contains(o.node));
        let x = scene.world_position(o.lower).map(|p| p.x).unwrap_or_default();
        assert!(x < 0.0);

        scene.advance(0.2);
        assert!(!scene.contains(o.node));
        assert!(!scene.contains(o.score_trigger));
        assert_eq!(scene.len(), before - 4);
        assert!(scene.children(container).is_empty());
    }

    #[test]
    fn test_schedule_spawns_every_interval() {
        let mut scene = Scene::new();
        let base = scene.add(scene.root(), NodeKind::Container, Vec2::ZERO);
        scene.run(base, Spawner::schedule());
        let mut spawns = 0;
        for _ in 0..60 {
            spawns += scene
                .advance(0.1)
                .iter()
                .filter(|e| e.cue == Cue::SpawnObstacle)
                .count();
        }
        // t = 0, 2.5, 5.0 within the first 6 seconds
        assert_eq!(spawns, 3);
    }

    #[test]
    fn test_zero_height_viewport() {
        let s = Spawner::new(Vec2::new(1024.0, 6.0));
        let mut rng = Pcg32::seed_from_u64(3);
        assert_eq!(s.band(), 0);
        assert_eq!(s.gap_center(&mut rng), 0.0);
    }

    #[test]
    fn test_huge_viewport_does_not_overflow() {
        let s = Spawner::new(Vec2::new(1024.0, 1.0e11));
        let mut rng = Pcg32::seed_from_u64(3);
        assert_eq!(s.band(), u32::MAX);
        let y = s.gap_center(&mut rng);
        assert!(y >= u32::MAX as f32);
    }

    proptest! {
        #[test]
        fn gap_center_within_band(seed in any::<u64>(), height in 12.0f32..4000.0) {
            let s = Spawner::new(Vec2::new(1024.0, height));
            let mut rng = Pcg32::seed_from_u64(seed);
            let band = (height / 12.0).floor();
            for _ in 0..16 {
                let y = s.gap_center(&mut rng);
                prop_assert!(y >= band && y < 3.0 * band, "y={} band={}", y, band);
                prop_assert_eq!(y.fract(), 0.0);
            }
        }
    }
}
