//! Projectile ballistics
//!
//! Position is evaluated in closed form from the accumulated flight time, so
//! the trajectory does not drift with tick size.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::tank::{Side, Tank};

/// A shell in flight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub fired_by: Side,
    pub origin: Vec2,
    /// Ballistic launch angle in degrees (already mirrored for the enemy)
    pub angle: f32,
    /// Initial speed
    pub power: f32,
    /// Simulated flight time
    pub elapsed: f32,
    pub pos: Vec2,
    /// Recent positions for rendering (newest first)
    #[serde(skip)]
    pub trail: Vec<Vec2>,
}

impl Projectile {
    pub fn new(fired_by: Side, origin: Vec2, angle: f32, power: f32) -> Self {
        Self {
            fired_by,
            origin,
            angle,
            power,
            elapsed: 0.0,
            pos: origin,
            trail: Vec::new(),
        }
    }

    /// Fire from a tank's muzzle along its ballistic angle
    pub fn launch(tank: &Tank) -> Self {
        Self::new(tank.side, tank.muzzle(), tank.ballistic_angle(), tank.power())
    }

    /// Closed-form position after `t` simulated seconds
    pub fn position_at(&self, t: f32, gravity: f32) -> Vec2 {
        let rad = self.angle.to_radians();
        let x = self.origin.x + self.power * rad.cos() * t;
        let y = self.origin.y - (self.power * rad.sin() * t - 0.5 * gravity * t * t);
        Vec2::new(x, y)
    }

    /// Advance flight time by `dt * time_scale` and update the position
    pub fn advance(&mut self, dt: f32, time_scale: f32, gravity: f32, trail_length: usize) {
        self.elapsed += dt * time_scale;
        self.pos = self.position_at(self.elapsed, gravity);
        self.record_trail(trail_length);
    }

    fn record_trail(&mut self, trail_length: usize) {
        if trail_length == 0 {
            return;
        }
        self.trail.insert(0, self.pos);
        self.trail.truncate(trail_length);
    }
}
