//! Spin Fling - spinning tokens you can spawn, drag and throw
//!
//! Core modules:
//! - `sim`: Deterministic simulation (integration, wall bounces, collisions, drag)
//! - `config`: Tunable physics and sizing parameters
//! - `shapes`: Visual handle provider the simulation picks from on spawn

pub mod config;
pub mod shapes;
pub mod sim;

pub use config::{ConfigError, SimConfig};
pub use shapes::{AssetStatus, ShapeId, ShapeSet, ShapeSource};

/// Tuning defaults
pub mod consts {
    /// Token-token restitution
    pub const RESTITUTION_OBJ: f32 = 0.98;
    /// Token-wall restitution
    pub const RESTITUTION_WALL: f32 = 0.98;
    /// Extra push applied when separating overlapping tokens (pixels)
    pub const EXTRA_SEPARATION: f32 = 1.0;
    /// Translational speed ceiling (pixels per step)
    pub const MAX_SPEED: f32 = 6.0;

    /// Spawn velocity half-ranges (pixels per step)
    pub const SPAWN_SPEED_X: f32 = 3.2;
    pub const SPAWN_SPEED_Y: f32 = 2.8;

    /// Spin: constant rotation, only contacts slow it down (radians per step)
    pub const SPIN_START_MIN: f32 = 0.18;
    pub const SPIN_START_MAX: f32 = 0.28;
    pub const COLLISION_SPIN_LOSS: f32 = 0.94;
    pub const MIN_SPIN: f32 = 0.06;
    /// Steps after a spin loss during which further losses are ignored
    pub const SPIN_LOSS_COOLDOWN_FRAMES: u32 = 8;

    /// Responsive sizing: diameter = clamp(min(w, h) * ratio, min, max)
    pub const SIZE_RATIO: f32 = 0.18;
    pub const MIN_SIZE: f32 = 72.0;
    pub const MAX_SIZE: f32 = 180.0;
    /// Diameter at which spawn speeds and spins are used unscaled
    pub const REFERENCE_SIZE: f32 = 180.0;
}
