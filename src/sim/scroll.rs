//! Looping horizontal scroll strips
//!
//! A strip is a row of identical tiles. Every tile moves left by one tile
//! width, then snaps back instantly, forever. With one spare tile beyond the
//! viewport (plus one for the seam) the row always covers the screen.

use glam::Vec2;

use super::action::Action;
use super::category::Category;
use super::physics::PhysicsBody;
use super::scene::{NodeId, NodeKind, Scene};
use super::texture::{self, Texture};
use crate::consts::*;

/// One scrolling strip
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollLayer {
    pub texture: Texture,
    /// Points per second
    pub speed: f32,
    /// Vertical center of the strip
    pub y: f32,
    pub z: f32,
    /// Solid strips get a static World body per tile
    pub solid: bool,
}

impl ScrollLayer {
    /// Strip resting on the bottom of the viewport
    pub fn bottom(texture: Texture, speed: f32, z: f32, solid: bool) -> Self {
        Self {
            texture,
            speed,
            y: texture.height() / 2.0,
            z,
            solid,
        }
    }

    /// Strip hanging from the top of the viewport
    pub fn top(texture: Texture, speed: f32, z: f32, solid: bool, viewport: Vec2) -> Self {
        Self {
            y: viewport.y - texture.height() / 2.0,
            ..Self::bottom(texture, speed, z, solid)
        }
    }

    /// Seconds for one tile-width of travel
    pub fn lap_time(&self) -> f32 {
        if self.speed > 0.0 {
            self.texture.width() / self.speed
        } else {
            f32::INFINITY
        }
    }

    /// The tile's move-left-then-snap-back loop
    pub fn loop_action(&self) -> Action {
        let width = self.texture.width();
        Action::sequence([
            Action::move_by(Vec2::new(-width, 0.0), self.lap_time()),
            Action::move_by(Vec2::new(width, 0.0), 0.0),
        ])
        .forever()
    }

    /// Build the strip's tiles under `parent`
    pub fn build(&self, scene: &mut Scene, parent: NodeId, viewport_width: f32) -> Vec<NodeId> {
        let width = self.texture.width();
        let count = tile_count(viewport_width, width);
        let action = self.loop_action();

        (0..count)
            .map(|i| {
                let id = scene.add(
                    parent,
                    NodeKind::sprite(self.texture),
                    Vec2::new(i as f32 * width, self.y),
                );
                if let Some(node) = scene.get_mut(id) {
                    node.z = self.z;
                    if self.solid {
                        node.body = Some(PhysicsBody::fixed(self.texture.size, Category::World));
                    }
                }
                scene.run(id, action.clone());
                id
            })
            .collect()
    }
}

/// Tiles needed to cover the viewport through the reset seam
pub fn tile_count(viewport_width: f32, tile_width: f32) -> usize {
    if tile_width <= 0.0 {
        return 0;
    }
    (2.0 + viewport_width / tile_width).ceil() as usize
}

/// The game's strips: sea, rock silhouettes, land and ceiling
pub fn default_layers(viewport: Vec2) -> [ScrollLayer; 5] {
    [
        ScrollLayer::bottom(texture::BACKGROUND, BG_SPEED, BG_Z, false),
        ScrollLayer::bottom(texture::ROCK_UNDER, ROCK_SPEED, ROCK_Z, false),
        ScrollLayer::top(texture::ROCK_ABOVE, ROCK_SPEED, ROCK_Z, false, viewport),
        ScrollLayer::bottom(texture::LAND, LAND_SPEED, LAND_Z, true),
        ScrollLayer::top(texture::CEILING, LAND_SPEED, LAND_Z, true, viewport),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_count() {
        // 2 + 1024/256 = 6 exactly
        assert_eq!(tile_count(1024.0, 256.0), 6);
        // 2 + 1024/512 = 4
        assert_eq!(tile_count(1024.0, 512.0), 4);
        // 2 + 1024/300 = 5.41 -> 6
        assert_eq!(tile_count(1024.0, 300.0), 6);
        assert_eq!(tile_count(1024.0, 0.0), 0);
    }

    #[test]
    fn test_build_places_tiles_side_by_side() {
        let mut scene = Scene::new();
        let root = scene.root();
        let viewport = Vec2::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT);
        let layer = ScrollLayer::top(texture::CEILING, LAND_SPEED, LAND_Z, true, viewport);
        let tiles = layer.build(&mut scene, root, viewport.x);
        assert_eq!(tiles.len(), 6);
        for (i, id) in tiles.iter().enumerate() {
            let node = scene.get(*id).expect("tile");
            assert_eq!(node.transform.position, Vec2::new(i as f32 * 256.0, 768.0 - 24.0));
            assert_eq!(node.body.as_ref().map(|b| b.category), Some(Category::World));
            assert_eq!(node.actions().len(), 1);
        }
    }

    #[test]
    fn test_background_has_no_body() {
        let mut scene = Scene::new();
        let root = scene.root();
        let layer = ScrollLayer::bottom(texture::BACKGROUND, BG_SPEED, BG_Z, false);
        let tiles = layer.build(&mut scene, root, VIEWPORT_WIDTH);
        assert!(tiles.iter().all(|id| scene.body(*id).is_none()));
    }

    #[test]
    fn test_strip_is_seamless_after_a_lap() {
        let mut scene = Scene::new();
        let root = scene.root();
        let layer = ScrollLayer::bottom(texture::LAND, LAND_SPEED, LAND_Z, true);
        let tiles = layer.build(&mut scene, root, VIEWPORT_WIDTH);

        // Lap time is 2.56s; after 3s each tile is 0.44s into its next lap
        for _ in 0..30 {
            scene.advance(0.1);
        }
        let first = scene.get(tiles[0]).map(|n| n.transform.position.x).unwrap_or_default();
        assert!((first + 44.0).abs() < 0.1, "first = {first}");

        // Tiles keep their spacing, so the row still spans the viewport
        let last = scene.get(tiles[5]).map(|n| n.transform.position.x).unwrap_or_default();
        assert!((last - first - 5.0 * 256.0).abs() < 0.1);
        assert!(last + 128.0 >= VIEWPORT_WIDTH);
    }

    #[test]
    fn test_layers_use_own_speed() {
        let layers = default_layers(Vec2::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT));
        assert!((layers[0].lap_time() - 51.2).abs() < 1e-3);
        assert!((layers[3].lap_time() - 2.56).abs() < 1e-4);
        assert_eq!(layers.iter().filter(|l| l.solid).count(), 2);
    }
}
