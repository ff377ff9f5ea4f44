//! Shot termination and damage
//!
//! A projectile is checked against, in order: the world bounds, the terrain,
//! and the opponent of the side that fired it. The first match ends the shot.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::tank::{Side, Tank};
use super::terrain::Terrain;
use crate::settings::{DamageSettings, WorldSettings};

/// Result of checking a projectile position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ShotOutcome {
    /// Still flying
    InFlight,
    /// Left the world through the sides or the bottom
    OutOfBounds,
    /// Hit the ground (terrain takes no damage)
    Terrain,
    /// Inside the target's box; `damage` may be zero near the box corners
    TankHit { target: Side, damage: i32 },
}

impl ShotOutcome {
    pub fn is_terminated(&self) -> bool {
        !matches!(self, ShotOutcome::InFlight)
    }

    pub fn damage(&self) -> Option<i32> {
        match self {
            ShotOutcome::TankHit { damage, .. } => Some(*damage),
            _ => None,
        }
    }

    pub fn target(&self) -> Option<Side> {
        match self {
            ShotOutcome::TankHit { target, .. } => Some(*target),
            _ => None,
        }
    }
}

/// Decide whether a projectile at `pos`, fired by `shooter`, has terminated.
///
/// The shooter's own tank is never tested, so a shot can't damage the side
/// that fired it.
pub fn check_termination(
    pos: Vec2,
    terrain: &Terrain,
    player: &Tank,
    enemy: &Tank,
    shooter: Side,
    world: &WorldSettings,
    damage: &DamageSettings,
) -> ShotOutcome {
    if pos.x < 0.0 || pos.x > world.width || pos.y > world.height {
        return ShotOutcome::OutOfBounds;
    }

    if pos.y >= terrain.height_at(pos.x) {
        return ShotOutcome::Terrain;
    }

    let target = match shooter {
        Side::Player => enemy,
        Side::Enemy => player,
    };
    if target.bounding_box().contains(pos) {
        let dist = pos.distance(target.pos);
        return ShotOutcome::TankHit {
            target: target.side,
            damage: damage_for_distance(dist, damage),
        };
    }

    ShotOutcome::InFlight
}

/// Damage for a hit `dist` away from the tank's ground contact point
pub fn damage_for_distance(dist: f32, settings: &DamageSettings) -> i32 {
    settings
        .bands
        .iter()
        .find(|band| dist < band.radius)
        .map_or(0, |band| band.damage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::TankSettings;

    fn flat_terrain(y: f32) -> Terrain {
        Terrain::from_points(vec![Vec2::new(0.0, y), Vec2::new(800.0, y)], 600.0).unwrap()
    }

    fn tanks(settings: &TankSettings) -> (Tank, Tank) {
        (
            Tank::new(Side::Player, Vec2::new(100.0, 500.0), settings),
            Tank::new(Side::Enemy, Vec2::new(700.0, 500.0), settings),
        )
    }

    fn check(pos: Vec2, shooter: Side, tank_settings: &TankSettings) -> ShotOutcome {
        let (player, enemy) = tanks(tank_settings);
        check_termination(
            pos,
            &flat_terrain(500.0),
            &player,
            &enemy,
            shooter,
            &WorldSettings::default(),
            &DamageSettings::default(),
        )
    }

    #[test]
    fn test_damage_thresholds_are_exact() {
        let d = DamageSettings::default();
        assert_eq!(damage_for_distance(0.0, &d), 50);
        assert_eq!(damage_for_distance(19.99, &d), 50);
        assert_eq!(damage_for_distance(20.0, &d), 30);
        assert_eq!(damage_for_distance(20.01, &d), 30);
        assert_eq!(damage_for_distance(39.99, &d), 30);
        assert_eq!(damage_for_distance(40.01, &d), 10);
        assert_eq!(damage_for_distance(59.99, &d), 10);
        assert_eq!(damage_for_distance(60.0, &d), 0);
        assert_eq!(damage_for_distance(60.01, &d), 0);
    }

    #[test]
    fn test_in_flight_above_ground() {
        let outcome = check(Vec2::new(400.0, 200.0), Side::Player, &TankSettings::default());
        assert_eq!(outcome, ShotOutcome::InFlight);
        assert!(!outcome.is_terminated());
    }

    #[test]
    fn test_out_of_bounds() {
        let s = TankSettings::default();
        assert_eq!(check(Vec2::new(-0.1, 200.0), Side::Player, &s), ShotOutcome::OutOfBounds);
        assert_eq!(check(Vec2::new(800.1, 200.0), Side::Player, &s), ShotOutcome::OutOfBounds);
        assert_eq!(check(Vec2::new(400.0, 600.1), Side::Player, &s), ShotOutcome::OutOfBounds);
        // Above the top edge is still in flight
        assert_eq!(check(Vec2::new(400.0, -500.0), Side::Player, &s), ShotOutcome::InFlight);
    }

    #[test]
    fn test_terrain_impact() {
        let s = TankSettings::default();
        assert_eq!(check(Vec2::new(400.0, 500.0), Side::Player, &s), ShotOutcome::Terrain);
        assert_eq!(check(Vec2::new(400.0, 550.0), Side::Enemy, &s), ShotOutcome::Terrain);
    }

    #[test]
    fn test_bounds_take_priority_over_terrain() {
        let s = TankSettings::default();
        // Below both the floor and the terrain
        assert_eq!(check(Vec2::new(400.0, 700.0), Side::Player, &s), ShotOutcome::OutOfBounds);
    }

    #[test]
    fn test_direct_hit_on_enemy() {
        let outcome = check(Vec2::new(700.0, 490.0), Side::Player, &TankSettings::default());
        assert_eq!(
            outcome,
            ShotOutcome::TankHit {
                target: Side::Enemy,
                damage: 50
            }
        );
        assert_eq!(outcome.damage(), Some(50));
        assert_eq!(outcome.target(), Some(Side::Enemy));
    }

    #[test]
    fn test_box_corner_hit_uses_center_distance() {
        // Top corner of the default box is sqrt(20^2 + 20^2) ~ 28.3 from the anchor
        let outcome = check(Vec2::new(720.0, 480.0), Side::Player, &TankSettings::default());
        assert_eq!(
            outcome,
            ShotOutcome::TankHit {
                target: Side::Enemy,
                damage: 30
            }
        );
    }

    #[test]
    fn test_zero_damage_hit_still_terminates() {
        let big = TankSettings {
            width: 200.0,
            height: 100.0,
            ..Default::default()
        };
        // 60.01 above the anchor, still inside the tall box
        let outcome = check(Vec2::new(700.0, 500.0 - 60.01), Side::Player, &big);
        assert_eq!(
            outcome,
            ShotOutcome::TankHit {
                target: Side::Enemy,
                damage: 0
            }
        );
        assert!(outcome.is_terminated());

        let outcome = check(Vec2::new(700.0, 500.0 - 59.99), Side::Player, &big);
        assert_eq!(outcome.damage(), Some(10));
    }

    #[test]
    fn test_never_hits_own_tank() {
        let s = TankSettings::default();
        // Inside the player's own box, above the ground line
        let outcome = check(Vec2::new(100.0, 490.0), Side::Player, &s);
        assert_eq!(outcome, ShotOutcome::InFlight);

        let outcome = check(Vec2::new(100.0, 490.0), Side::Enemy, &s);
        assert_eq!(outcome.target(), Some(Side::Player));

        let outcome = check(Vec2::new(700.0, 490.0), Side::Enemy, &s);
        assert_eq!(outcome, ShotOutcome::InFlight);
    }
}
