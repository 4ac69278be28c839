//! Shrimp Swim - A side-scrolling underwater arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (scene graph, actions, physics, game state)
//! - `renderer`: Scene tessellation and the WebGPU pipeline
//! - `settings`: Player-facing configuration

pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Fixed simulation timestep (60 Hz, the host frame rate the game was tuned for)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Default viewport (landscape tablet)
    pub const VIEWPORT_WIDTH: f32 = 1024.0;
    pub const VIEWPORT_HEIGHT: f32 = 768.0;
    /// Largest accepted viewport side from settings
    pub const MAX_VIEWPORT: f32 = 8192.0;

    /// Physics units: points per meter
    pub const POINTS_PER_METER: f32 = 150.0;
    /// World gravity, -2 m/s² downward
    pub const GRAVITY: Vec2 = Vec2::new(0.0, -2.0 * POINTS_PER_METER);

    /// Scroll speeds (points/second)
    pub const BG_SPEED: f32 = 10.0;
    pub const ROCK_SPEED: f32 = 20.0;
    pub const LAND_SPEED: f32 = 100.0;

    /// Depth layers
    pub const BG_Z: f32 = -100.0;
    pub const ROCK_Z: f32 = -50.0;
    pub const LAND_Z: f32 = 0.0;
    pub const PLAYER_Z: f32 = 10.0;
    pub const SCORE_Z: f32 = 100.0;

    /// Initial touch force (difficulty); larger is harder to control
    pub const TOUCH_FORCE_FIRST: f32 = 10.0;
    /// Player body mass, converts the touch impulse to a velocity change
    pub const PLAYER_MASS: f32 = 0.04;

    /// Seconds between obstacle spawns
    pub const SPAWN_INTERVAL: f32 = 2.5;
    /// Vertical spacing between the lower and upper coral
    pub const CORAL_GAP: f32 = 160.0;
    /// Obstacle travel distance in coral widths past the viewport
    pub const CORAL_TRAVEL_WIDTHS: f32 = 2.3;
    /// Score trigger width and its offset past the coral's far edge
    pub const SCORE_TRIGGER_WIDTH: f32 = 10.0;
    pub const SCORE_TRIGGER_OFFSET: f32 = 5.0;

    /// Player idle animation
    pub const PLAYER_FRAME_TIME: f32 = 0.2;
    /// Death roll: angle = PI * y * factor, over ROLL_DURATION seconds
    pub const ROLL_FACTOR: f32 = 0.01;
    pub const ROLL_DURATION: f32 = 1.0;

    /// Score label pulse
    pub const SCORE_PULSE_SCALE: f32 = 1.5;
    pub const SCORE_PULSE_TIME: f32 = 0.1;
}

/// Axis-aligned rectangle centered on `center`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub center: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self { center, size }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - self.size * 0.5
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + self.size * 0.5
    }

    /// Overlap test, optionally grown by `slop` on every side
    pub fn overlaps(&self, other: &Rect, slop: f32) -> bool {
        let (a_min, a_max) = (self.min() - slop, self.max() + slop);
        let (b_min, b_max) = (other.min(), other.max());
        a_min.x < b_max.x && a_max.x > b_min.x && a_min.y < b_max.y && a_max.y > b_min.y
    }

    /// Smallest translation that moves `self` out of `other` (zero if disjoint)
    pub fn separation(&self, other: &Rect) -> Vec2 {
        let delta = self.center - other.center;
        let overlap = (self.size + other.size) * 0.5 - delta.abs();
        if overlap.x <= 0.0 || overlap.y <= 0.0 {
            return Vec2::ZERO;
        }
        if overlap.x < overlap.y {
            Vec2::new(overlap.x.copysign(delta.x), 0.0)
        } else {
            Vec2::new(0.0, overlap.y.copysign(delta.y))
        }
    }
}

/// Rotate a point around the origin
#[inline]
pub fn rotate(point: Vec2, angle: f32) -> Vec2 {
    Vec2::from_angle(angle).rotate(point)
}
