//! Terrain height profile
//!
//! A piecewise-linear ground line sampled at evenly spaced x positions.
//! Screen coordinates: y grows downward, so larger y means lower ground.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::SimError;
use crate::settings::{TerrainSettings, WorldSettings};

/// Generated ground profile, immutable for the lifetime of a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Terrain {
    points: Vec<Vec2>,
    /// World floor, returned for queries outside the sampled range
    floor: f32,
}

impl Terrain {
    /// Generate a random-walk terrain spanning `[0, world.width]`
    pub fn generate<R: Rng>(
        world: &WorldSettings,
        settings: &TerrainSettings,
        rng: &mut R,
    ) -> Result<Self, SimError> {
        let count = settings.segment_count;
        if count < 2 {
            return Err(SimError::InvalidTerrain { points: count });
        }

        let (top, bottom) = settings.height_band(world);
        let (lo, hi) = (top.ceil() as i32, bottom.floor() as i32);
        if lo > hi {
            return Err(SimError::InvalidSettings(format!(
                "terrain height band [{top}, {bottom}] is empty"
            )));
        }

        let dx = world.width / (count - 1) as f32;
        let step = settings.max_step.max(0);

        let mut previous = rng.random_range(lo..=hi) as f32;
        let mut points = Vec::with_capacity(count);
        for i in 0..count {
            // Last point sits exactly on the right world edge
            let x = if i == count - 1 { world.width } else { i as f32 * dx };
            let delta = rng.random_range(-step..=step) as f32;
            let y = (previous + delta).clamp(top, bottom);
            points.push(Vec2::new(x, y));
            previous = y;
        }

        log::debug!(
            "Generated terrain: {} points, heights {:.0}..{:.0}",
            count,
            points.iter().map(|p| p.y).fold(f32::INFINITY, f32::min),
            points.iter().map(|p| p.y).fold(f32::NEG_INFINITY, f32::max),
        );

        Ok(Self {
            points,
            floor: world.height,
        })
    }

    /// Build a terrain from explicit points (x must be strictly increasing)
    pub fn from_points(points: Vec<Vec2>, floor: f32) -> Result<Self, SimError> {
        let increasing = points.windows(2).all(|w| w[0].x < w[1].x);
        if points.len() < 2 || !increasing {
            return Err(SimError::InvalidTerrain {
                points: points.len(),
            });
        }
        Ok(Self { points, floor })
    }

    /// Ground height at `x`, interpolated between the bracketing points.
    ///
    /// Outside the sampled range this returns the world floor; it never
    /// extrapolates.
    pub fn height_at(&self, x: f32) -> f32 {
        for w in self.points.windows(2) {
            let (a, b) = (w[0], w[1]);
            if a.x <= x && x <= b.x {
                return a.y + (b.y - a.y) * (x - a.x) / (b.x - a.x);
            }
        }
        self.floor
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn point(&self, index: usize) -> Option<Vec2> {
        self.points.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn floor(&self) -> f32 {
        self.floor
    }
}
