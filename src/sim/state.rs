//! Game session and core simulation types
//!
//! All state for one duel lives in a single owned `GameSession`.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::ShotOutcome;
use super::policy::AimPolicy;
use super::projectile::Projectile;
use super::tank::{Side, Tank};
use super::terrain::Terrain;
use super::turn::Turn;
use crate::error::SimError;
use crate::settings::{Settings, WorldSettings};

/// Notable things that happened during a tick, for renderers and logs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ShotFired {
        side: Side,
        aim_angle: f32,
        power: f32,
    },
    ShotResolved {
        side: Side,
        outcome: ShotOutcome,
    },
    TurnChanged {
        side: Side,
    },
    GameOver {
        winner: Side,
    },
}

/// Read-only view of everything a renderer needs for one frame
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub world: &'a WorldSettings,
    pub terrain: &'a Terrain,
    pub player: &'a Tank,
    pub enemy: &'a Tank,
    pub projectile: Option<&'a Projectile>,
    pub turn: &'a Turn,
    pub tick: u64,
}

impl Snapshot<'_> {
    /// Display health `(player, enemy)`, clamped at zero
    pub fn health(&self) -> (i32, i32) {
        (self.player.display_health(), self.enemy.display_health())
    }

    pub fn winner(&self) -> Option<Side> {
        self.turn.winner()
    }
}

/// One duel: terrain, both tanks, the turn state and who drives each side
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Run seed for reproducibility
    pub seed: u64,
    pub settings: Settings,
    pub terrain: Terrain,
    pub player: Tank,
    pub enemy: Tank,
    pub turn: Turn,
    player_policy: AimPolicy,
    enemy_policy: AimPolicy,
    /// Ticks processed while the game was running
    pub time_ticks: u64,
    /// Simulated seconds processed while the game was running
    pub sim_time: f32,
    pub shots_fired: u32,
    events: Vec<GameEvent>,
}

impl GameSession {
    /// Create a session with freshly generated terrain.
    ///
    /// The player is driven by input and moves first; the enemy aims at
    /// random.
    pub fn new(seed: u64, settings: Settings) -> Result<Self, SimError> {
        settings.validate()?;
        let mut rng = Pcg32::seed_from_u64(seed);
        let terrain = Terrain::generate(&settings.world, &settings.terrain, &mut rng)?;
        Self::with_terrain(seed, settings, terrain)
    }

    /// Create a session on a given terrain
    pub fn with_terrain(seed: u64, settings: Settings, terrain: Terrain) -> Result<Self, SimError> {
        settings.validate()?;

        let inset = settings.tank.spawn_inset;
        let invalid = SimError::InvalidTerrain {
            points: terrain.len(),
        };
        let enemy_index = inset
            .checked_add(1)
            .and_then(|n| terrain.len().checked_sub(n))
            .filter(|&i| i > inset)
            .ok_or(invalid.clone())?;
        let player_pos = terrain.point(inset).ok_or(invalid.clone())?;
        let enemy_pos = terrain.point(enemy_index).ok_or(invalid)?;

        let player = Tank::new(Side::Player, player_pos, &settings.tank);
        let enemy = Tank::new(Side::Enemy, enemy_pos, &settings.tank);

        let ai_seed = seed.wrapping_mul(2654435761).wrapping_add(1);
        let enemy_policy = AimPolicy::random(ai_seed, settings.ai);

        log::info!(
            "New duel (seed {}): player at ({:.0}, {:.0}), enemy at ({:.0}, {:.0})",
            seed,
            player_pos.x,
            player_pos.y,
            enemy_pos.x,
            enemy_pos.y
        );

        Ok(Self {
            seed,
            settings,
            terrain,
            player,
            enemy,
            turn: Turn::new(Side::Player),
            player_policy: AimPolicy::Human,
            enemy_policy,
            time_ticks: 0,
            sim_time: 0.0,
            shots_fired: 0,
            events: Vec::new(),
        })
    }

    pub fn tank(&self, side: Side) -> &Tank {
        match side {
            Side::Player => &self.player,
            Side::Enemy => &self.enemy,
        }
    }

    pub fn tank_mut(&mut self, side: Side) -> &mut Tank {
        match side {
            Side::Player => &mut self.player,
            Side::Enemy => &mut self.enemy,
        }
    }

    pub fn policy(&self, side: Side) -> &AimPolicy {
        match side {
            Side::Player => &self.player_policy,
            Side::Enemy => &self.enemy_policy,
        }
    }

    pub fn policy_mut(&mut self, side: Side) -> &mut AimPolicy {
        match side {
            Side::Player => &mut self.player_policy,
            Side::Enemy => &mut self.enemy_policy,
        }
    }

    pub fn set_policy(&mut self, side: Side, policy: AimPolicy) {
        *self.policy_mut(side) = policy;
    }

    /// Split borrow of a side's policy and tank
    pub(crate) fn controls_mut(&mut self, side: Side) -> (&mut AimPolicy, &mut Tank) {
        match side {
            Side::Player => (&mut self.player_policy, &mut self.player),
            Side::Enemy => (&mut self.enemy_policy, &mut self.enemy),
        }
    }

    /// True if `side` is aiming and its policy needs more input to fire
    pub fn awaiting_input(&self, side: Side) -> bool {
        self.turn == Turn::Aiming { side }
            && match self.policy(side) {
                AimPolicy::Human => true,
                policy => policy.is_exhausted(),
            }
    }

    pub fn active_side(&self) -> Option<Side> {
        self.turn.active_side()
    }

    pub fn projectile(&self) -> Option<&Projectile> {
        self.turn.projectile()
    }

    pub fn winner(&self) -> Option<Side> {
        self.turn.winner()
    }

    pub fn is_over(&self) -> bool {
        self.turn.is_over()
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            world: &self.settings.world,
            terrain: &self.terrain,
            player: &self.player,
            enemy: &self.enemy,
            projectile: self.turn.projectile(),
            turn: &self.turn,
            tick: self.time_ticks,
        }
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn flat_terrain(points: usize, y: f32) -> Terrain {
        let dx = 800.0 / (points - 1) as f32;
        Terrain::from_points(
            (0..points).map(|i| Vec2::new(i as f32 * dx, y)).collect(),
            600.0,
        )
        .unwrap()
    }

    #[test]
    fn test_new_spawns_tanks_on_terrain() {
        let session = GameSession::new(12345, Settings::default()).unwrap();
        assert_eq!(session.terrain.len(), 100);
        assert_eq!(session.player.pos, session.terrain.points()[5]);
        assert_eq!(session.enemy.pos, session.terrain.points()[94]);
        assert_eq!(session.turn, Turn::Aiming { side: Side::Player });
        assert!(session.awaiting_input(Side::Player));
        assert!(!session.awaiting_input(Side::Enemy));
    }

    #[test]
    fn test_same_seed_same_session() {
        let a = GameSession::new(5, Settings::default()).unwrap();
        let b = GameSession::new(5, Settings::default()).unwrap();
        assert_eq!(a.terrain, b.terrain);
        assert_eq!(a.player, b.player);
        assert_eq!(a.enemy, b.enemy);
    }

    #[test]
    fn test_rejects_invalid_settings() {
        let mut settings = Settings::default();
        settings.terrain.segment_count = 1;
        assert_eq!(
            GameSession::new(1, settings).unwrap_err(),
            SimError::InvalidTerrain { points: 1 }
        );
    }

    #[test]
    fn test_with_terrain_rejects_short_terrain() {
        let err = GameSession::with_terrain(1, Settings::default(), flat_terrain(11, 500.0))
            .unwrap_err();
        assert_eq!(err, SimError::InvalidTerrain { points: 11 });

        let ok = GameSession::with_terrain(1, Settings::default(), flat_terrain(12, 500.0));
        assert!(ok.is_ok());
    }

    #[test]
    fn test_with_terrain_rejects_huge_spawn_inset() {
        let mut settings = Settings::default();
        settings.tank.spawn_inset = usize::MAX;
        assert!(matches!(
            GameSession::with_terrain(1, settings, flat_terrain(12, 500.0)),
            Err(SimError::InvalidSettings(_))
        ));
    }

    #[test]
    fn test_snapshot_reflects_session() {
        let mut session = GameSession::new(1, Settings::default()).unwrap();
        session.enemy.health = -5;
        let snap = session.snapshot();
        assert_eq!(snap.health(), (100, 0));
        assert!(snap.projectile.is_none());
        assert_eq!(snap.winner(), None);
        assert_eq!(snap.terrain.len(), 100);
    }

    #[test]
    fn test_drain_events_empties_queue() {
        let mut session = GameSession::new(1, Settings::default()).unwrap();
        session.push_event(GameEvent::TurnChanged { side: Side::Enemy });
        assert_eq!(session.drain_events().len(), 1);
        assert!(session.drain_events().is_empty());
    }
}
