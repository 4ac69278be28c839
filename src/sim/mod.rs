//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by node ID)
//! - No rendering or platform dependencies

pub mod action;
pub mod category;
pub mod collision;
pub mod physics;
pub mod player;
pub mod scene;
pub mod score;
pub mod scroll;
pub mod spawner;
pub mod state;
pub mod texture;
pub mod tick;

pub use action::{Action, Cue};
pub use category::{Category, CategorySet};
pub use collision::{ContactOutcome, resolve_contact};
pub use physics::{Contact, PhysicsBody, PhysicsWorld};
pub use player::Player;
pub use scene::{Node, NodeId, NodeKind, Scene};
pub use score::ScoreBoard;
pub use scroll::ScrollLayer;
pub use spawner::{Obstacle, Spawner};
pub use state::{GameEvent, GamePhase, GameState};
pub use texture::Texture;
pub use tick::{TickInput, tick};
