//! Shape generation for 2D primitives
//!
//! Every sprite becomes one flat-colored quad; labels are drawn as
//! seven-segment digits. Output is in viewport points, back to front.

use glam::Vec2;

use super::vertex::{Vertex, colors};
use crate::rotate;
use crate::sim::{NodeKind, Scene};

/// Height of one label digit in points, before scaling
pub const DIGIT_HEIGHT: f32 = 48.0;

/// Generate vertices for a (possibly rotated) rectangle
pub fn quad(center: Vec2, size: Vec2, rotation: f32, color: [f32; 4]) -> [Vertex; 6] {
    let half = size / 2.0;
    let corner = |x: f32, y: f32| {
        let p = center + rotate(Vec2::new(x, y), rotation);
        Vertex::new(p.x, p.y, color)
    };
    let bl = corner(-half.x, -half.y);
    let br = corner(half.x, -half.y);
    let tr = corner(half.x, half.y);
    let tl = corner(-half.x, half.y);
    [bl, br, tr, bl, tr, tl]
}

/// Lit segments of a digit, bit order a b c d e f g
/// (top, top-right, bottom-right, bottom, bottom-left, top-left, middle)
pub fn digit_segments(c: char) -> u8 {
    match c {
        '0' => 0b0111111,
        '1' => 0b0000110,
        '2' => 0b1011011,
        '3' => 0b1001111,
        '4' => 0b1100110,
        '5' => 0b1101101,
        '6' => 0b1111101,
        '7' => 0b0000111,
        '8' => 0b1111111,
        '9' => 0b1101111,
        _ => 0,
    }
}

/// One digit centered on `center`
fn digit(c: char, center: Vec2, height: f32, color: [f32; 4], out: &mut Vec<Vertex>) {
    let w = height * 0.5;
    let t = height * 0.12;
    let hw = w / 2.0;
    let hh = height / 2.0;
    let horizontal = Vec2::new(w, t);
    let vertical = Vec2::new(t, hh);

    // (offset, size) for segments a..g
    let segments = [
        (Vec2::new(0.0, hh), horizontal),
        (Vec2::new(hw, hh / 2.0), vertical),
        (Vec2::new(hw, -hh / 2.0), vertical),
        (Vec2::new(0.0, -hh), horizontal),
        (Vec2::new(-hw, -hh / 2.0), vertical),
        (Vec2::new(-hw, hh / 2.0), vertical),
        (Vec2::ZERO, horizontal),
    ];

    let lit = digit_segments(c);
    for (i, (offset, size)) in segments.iter().enumerate() {
        if lit & (1 << i) != 0 {
            out.extend(quad(center + *offset, *size, 0.0, color));
        }
    }
}

/// A line of digits centered on `center`
pub fn label(text: &str, center: Vec2, scale: f32, color: [f32; 4]) -> Vec<Vertex> {
    let height = DIGIT_HEIGHT * scale;
    let advance = height * 0.75;
    let count = text.chars().count();
    let start = center.x - advance * (count.saturating_sub(1)) as f32 / 2.0;

    let mut vertices = Vec::with_capacity(count * 7 * 6);
    for (i, c) in text.chars().enumerate() {
        let x = start + advance * i as f32;
        digit(c, Vec2::new(x, center.y), height, color, &mut vertices);
    }
    vertices
}

/// Tessellate the whole scene, back to front
pub fn scene_vertices(scene: &Scene) -> Vec<Vertex> {
    let mut drawables: Vec<_> = scene
        .iter()
        .filter(|node| !matches!(node.kind, NodeKind::Container))
        .collect();
    // Stable: equal z keeps creation order
    drawables.sort_by(|a, b| a.z.total_cmp(&b.z));

    let mut vertices = Vec::new();
    for node in drawables {
        let Some(position) = scene.world_position(node.id) else {
            continue;
        };
        let transform = &node.transform;
        match &node.kind {
            NodeKind::Sprite { .. } => {
                let Some(texture) = node.texture() else {
                    continue;
                };
                let mut color = colors::for_texture(texture.name);
                // Shade animation frames so the swim cycle is visible
                let shade = 1.0 - 0.06 * transform.frame as f32;
                for channel in color.iter_mut().take(3) {
                    *channel *= shade;
                }
                vertices.extend(quad(
                    position,
                    texture.size * transform.scale,
                    transform.rotation,
                    color,
                ));
            }
            NodeKind::Label { text } => {
                vertices.extend(label(text, position, transform.scale, colors::LABEL));
            }
            NodeKind::Container => {}
        }
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::texture;

    #[test]
    fn test_quad_corners() {
        let v = quad(Vec2::new(10.0, 20.0), Vec2::new(4.0, 2.0), 0.0, [1.0; 4]);
        assert_eq!(v[0].position, [8.0, 19.0]);
        assert_eq!(v[2].position, [12.0, 21.0]);
        assert_eq!(v[5].position, [8.0, 21.0]);
    }

    #[test]
    fn test_quad_rotation() {
        let v = quad(Vec2::ZERO, Vec2::new(2.0, 2.0), std::f32::consts::FRAC_PI_2, [1.0; 4]);
        // Bottom-left corner rotated a quarter turn lands bottom-right
        assert!((v[0].position[0] - 1.0).abs() < 1e-5);
        assert!((v[0].position[1] + 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_label_segment_counts() {
        assert_eq!(label("0", Vec2::ZERO, 1.0, [1.0; 4]).len(), 6 * 6);
        assert_eq!(label("1", Vec2::ZERO, 1.0, [1.0; 4]).len(), 2 * 6);
        assert_eq!(label("18", Vec2::ZERO, 1.0, [1.0; 4]).len(), 9 * 6);
        assert!(label("", Vec2::ZERO, 1.0, [1.0; 4]).is_empty());
    }

    #[test]
    fn test_scene_sorted_back_to_front() {
        let mut scene = Scene::new();
        let front = scene.add(scene.root(), NodeKind::sprite(texture::CORAL_UNDER), Vec2::ZERO);
        let back = scene.add(scene.root(), NodeKind::sprite(texture::BACKGROUND), Vec2::ZERO);
        scene.get_mut(front).expect("front").z = 5.0;
        scene.get_mut(back).expect("back").z = -5.0;
        // Containers draw nothing
        scene.add(scene.root(), NodeKind::Container, Vec2::ZERO);

        let vertices = scene_vertices(&scene);
        assert_eq!(vertices.len(), 12);
        assert_eq!(vertices[0].color, colors::SEA);
        assert_eq!(vertices[6].color, colors::CORAL);
    }

    #[test]
    fn test_children_drawn_at_world_position() {
        let mut scene = Scene::new();
        let group = scene.add(scene.root(), NodeKind::Container, Vec2::new(100.0, 0.0));
        scene.add(group, NodeKind::sprite(texture::LAND), Vec2::new(0.0, 32.0));
        let vertices = scene_vertices(&scene);
        assert_eq!(vertices[0].position, [100.0 - 128.0, 0.0]);
    }

    #[test]
    fn test_unknown_texture_is_magenta() {
        assert_eq!(colors::for_texture("nope"), colors::MISSING);
        assert_eq!(colors::for_texture("shrimp03"), colors::SHRIMP);
    }
}
