//! Tank entities
//!
//! Tanks never move. The stored aim angle is always in the natural
//! `[angle_min, angle_max]` range; the enemy's barrel and shots point left by
//! mirroring that angle (see [`Side::mirror`]).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::mirror_degrees;
use crate::screen_direction;
use crate::settings::TankSettings;

/// Which tank a value belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }

    /// Ballistic angle for a stored aim angle fired from this side
    pub fn mirror(self, aim_angle: f32) -> f32 {
        match self {
            Side::Player => aim_angle,
            Side::Enemy => mirror_degrees(aim_angle),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::Player => "Player",
            Side::Enemy => "Enemy",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Axis-aligned rectangle, `(x, y)` is the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Inclusive on every edge
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    pub fn min(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn max(&self) -> Vec2 {
        Vec2::new(self.x + self.width, self.y + self.height)
    }
}

/// A stationary tank
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tank {
    pub side: Side,
    /// Ground contact point (bottom center of the body)
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub health: i32,
    pub max_health: i32,
    /// Stored aim in degrees, shown to the player as-is
    aim_angle: f32,
    power: f32,
}

impl Tank {
    pub fn new(side: Side, pos: Vec2, settings: &TankSettings) -> Self {
        Self {
            side,
            pos,
            width: settings.width,
            height: settings.height,
            health: settings.max_health,
            max_health: settings.max_health,
            aim_angle: settings
                .initial_angle
                .clamp(settings.angle_min, settings.angle_max),
            power: settings
                .initial_power
                .clamp(settings.power_min, settings.power_max),
        }
    }

    /// Body box; extends upward from the ground contact point
    pub fn bounding_box(&self) -> Rect {
        Rect {
            x: self.pos.x - self.width / 2.0,
            y: self.pos.y - self.height,
            width: self.width,
            height: self.height,
        }
    }

    pub fn aim_angle(&self) -> f32 {
        self.aim_angle
    }

    pub fn power(&self) -> f32 {
        self.power
    }

    /// Angle fed into trajectory math (mirrored for the enemy)
    pub fn ballistic_angle(&self) -> f32 {
        self.side.mirror(self.aim_angle)
    }

    pub fn adjust_aim(&mut self, delta: f32, limits: &TankSettings) {
        self.aim_angle = (self.aim_angle + delta).clamp(limits.angle_min, limits.angle_max);
    }

    pub fn adjust_power(&mut self, delta: f32, limits: &TankSettings) {
        self.power = (self.power + delta).clamp(limits.power_min, limits.power_max);
    }

    /// Set aim and power directly, clamped to the limits
    pub fn set_aim(&mut self, angle: f32, power: f32, limits: &TankSettings) {
        self.aim_angle = angle.clamp(limits.angle_min, limits.angle_max);
        self.power = power.clamp(limits.power_min, limits.power_max);
    }

    /// Launch point: top center of the body
    pub fn muzzle(&self) -> Vec2 {
        Vec2::new(self.pos.x, self.pos.y - self.height)
    }

    /// End of the drawn barrel
    pub fn barrel_tip(&self, length: f32) -> Vec2 {
        self.muzzle() + screen_direction(self.ballistic_angle()) * length
    }

    pub fn apply_damage(&mut self, amount: i32) {
        self.health -= amount;
    }

    pub fn is_destroyed(&self) -> bool {
        self.health <= 0
    }

    /// Health clamped for display; the raw value may go negative
    pub fn display_health(&self) -> i32 {
        self.health.clamp(0, self.max_health)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tank(side: Side) -> Tank {
        Tank::new(side, Vec2::new(100.0, 400.0), &TankSettings::default())
    }

    #[test]
    fn test_new_tank_uses_defaults() {
        let t = tank(Side::Player);
        assert_eq!(t.health, 100);
        assert_eq!(t.aim_angle(), 45.0);
        assert_eq!(t.power(), 50.0);
    }

    #[test]
    fn test_bounding_box_extends_upward() {
        let b = tank(Side::Player).bounding_box();
        assert_eq!(b, Rect { x: 80.0, y: 380.0, width: 40.0, height: 20.0 });
        assert!(b.contains(Vec2::new(100.0, 390.0)));
        assert!(b.contains(Vec2::new(80.0, 380.0)));
        assert!(b.contains(Vec2::new(120.0, 400.0)));
        assert!(!b.contains(Vec2::new(100.0, 401.0)));
        assert!(!b.contains(Vec2::new(100.0, 379.0)));
    }

    #[test]
    fn test_adjust_clamps() {
        let limits = TankSettings::default();
        let mut t = tank(Side::Player);
        t.adjust_aim(100.0, &limits);
        assert_eq!(t.aim_angle(), 90.0);
        t.adjust_aim(-200.0, &limits);
        assert_eq!(t.aim_angle(), 0.0);
        t.adjust_power(1000.0, &limits);
        assert_eq!(t.power(), 250.0);
        t.adjust_power(-1000.0, &limits);
        assert_eq!(t.power(), 10.0);
    }

    #[test]
    fn test_enemy_ballistic_angle_is_mirrored() {
        let player = tank(Side::Player);
        let enemy = tank(Side::Enemy);
        assert_eq!(player.ballistic_angle(), 45.0);
        assert_eq!(enemy.aim_angle(), 45.0);
        assert_eq!(enemy.ballistic_angle(), 135.0);
    }

    #[test]
    fn test_barrel_points_toward_opponent() {
        let player = tank(Side::Player);
        let enemy = tank(Side::Enemy);
        let muzzle = player.muzzle();
        assert!(player.barrel_tip(30.0).x > muzzle.x);
        assert!(enemy.barrel_tip(30.0).x < muzzle.x);
        assert!(player.barrel_tip(30.0).y < muzzle.y);
        assert!(((player.barrel_tip(30.0) - muzzle).length() - 30.0).abs() < 1e-4);
    }

    #[test]
    fn test_display_health_clamps() {
        let mut t = tank(Side::Player);
        t.health = 10;
        t.apply_damage(50);
        assert_eq!(t.health, -40);
        assert_eq!(t.display_health(), 0);
        assert!(t.is_destroyed());
    }

    #[test]
    fn test_side_opponent() {
        assert_eq!(Side::Player.opponent(), Side::Enemy);
        assert_eq!(Side::Enemy.opponent(), Side::Player);
    }
}
