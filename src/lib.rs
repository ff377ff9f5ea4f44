//! Tank Duel - a turn-based artillery game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (terrain, ballistics, turns, game state)
//! - `renderer`: Draw-side helpers that consume read-only snapshots
//! - `settings`: Tunable world constants
//! - `error`: Error types for invariant violations and config loading

pub mod error;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{ConfigError, SimError};
pub use settings::Settings;

use glam::Vec2;

/// Default world constants (the values the game ships with)
pub mod consts {
    /// World dimensions
    pub const WORLD_WIDTH: f32 = 800.0;
    pub const WORLD_HEIGHT: f32 = 600.0;

    /// Terrain random walk
    pub const TERRAIN_SEGMENTS: usize = 100;
    pub const TERRAIN_MIN_HEIGHT_FRAC: f32 = 0.5;
    pub const TERRAIN_FLOOR_MARGIN: f32 = 50.0;
    pub const TERRAIN_MAX_STEP: i32 = 30;

    /// Real-world gravity, doubled by `GRAVITY_SCALE` for pacing
    pub const BASE_GRAVITY: f32 = 9.8;
    pub const GRAVITY_SCALE: f32 = 2.0;
    /// Simulated seconds advanced per sim-dt second
    pub const TIME_SCALE: f32 = 2.0;

    /// Fixed tick rate (30 Hz)
    pub const TICK_RATE_HZ: f32 = 30.0;
    /// Frame delta multiplier (frame ms / 500 rather than / 1000)
    pub const FRAME_DT_SCALE: f32 = 2.0;

    /// Tank body and barrel
    pub const TANK_WIDTH: f32 = 40.0;
    pub const TANK_HEIGHT: f32 = 20.0;
    pub const TANK_MAX_HEALTH: i32 = 100;
    pub const BARREL_LENGTH: f32 = 30.0;
    /// Terrain point index the player spawns on (enemy mirrors from the end)
    pub const SPAWN_INSET: usize = 5;

    /// Aim and power clamp ranges
    pub const ANGLE_MIN: f32 = 0.0;
    pub const ANGLE_MAX: f32 = 90.0;
    pub const POWER_MIN: f32 = 10.0;
    pub const POWER_MAX: f32 = 250.0;
    pub const INITIAL_ANGLE: f32 = 45.0;
    pub const INITIAL_POWER: f32 = 50.0;

    /// Enemy random aim ranges
    pub const AI_ANGLE_MIN: i32 = 20;
    pub const AI_ANGLE_MAX: i32 = 90;
    pub const AI_POWER_MIN: i32 = 40;
    pub const AI_POWER_MAX: i32 = 220;

    /// Projectile draw radius
    pub const PROJECTILE_RADIUS: f32 = 5.0;
    /// Maximum number of trail points kept per projectile
    pub const TRAIL_LENGTH: usize = 24;
}

/// Mirror an aim angle (degrees) across the vertical axis
#[inline]
pub fn mirror_degrees(angle: f32) -> f32 {
    180.0 - angle
}

/// Unit direction for an angle in degrees, in screen space (y grows downward)
#[inline]
pub fn screen_direction(angle_deg: f32) -> Vec2 {
    let rad = angle_deg.to_radians();
    Vec2::new(rad.cos(), -rad.sin())
}
