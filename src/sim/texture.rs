//! Texture catalogue
//!
//! The game ships a fixed set of bundled images; the simulation only needs
//! their names and pixel sizes.

use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Texture {
    pub name: &'static str,
    pub size: Vec2,
}

impl Texture {
    pub const fn new(name: &'static str, width: f32, height: f32) -> Self {
        Self {
            name,
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.y
    }
}

pub const BACKGROUND: Texture = Texture::new("background", 512.0, 768.0);
pub const ROCK_UNDER: Texture = Texture::new("rock_under", 512.0, 192.0);
pub const ROCK_ABOVE: Texture = Texture::new("rock_above", 512.0, 128.0);
pub const LAND: Texture = Texture::new("land", 256.0, 64.0);
pub const CEILING: Texture = Texture::new("ceiling", 256.0, 48.0);
pub const CORAL_UNDER: Texture = Texture::new("coral_under", 96.0, 320.0);
pub const CORAL_ABOVE: Texture = Texture::new("coral_above", 96.0, 320.0);
pub const GAME_OVER: Texture = Texture::new("gameover", 384.0, 96.0);

/// Shrimp swim cycle
pub const PLAYER_FRAMES: [Texture; 4] = [
    Texture::new("shrimp01", 64.0, 40.0),
    Texture::new("shrimp02", 64.0, 40.0),
    Texture::new("shrimp03", 64.0, 40.0),
    Texture::new("shrimp04", 64.0, 40.0),
];
