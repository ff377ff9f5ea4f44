//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// 2D vertex in world units (y down) with an RGBA color
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }
}

/// Colors for game elements
pub mod colors {
    /// Sky behind everything
    pub const BACKGROUND: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const TERRAIN: [f32; 4] = [34.0 / 255.0, 177.0 / 255.0, 76.0 / 255.0, 1.0];
    pub const PLAYER_TANK: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const ENEMY_TANK: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const PROJECTILE: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const HEALTH_BACK: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    /// Same green as the terrain
    pub const HEALTH_FRONT: [f32; 4] = TERRAIN;
}
