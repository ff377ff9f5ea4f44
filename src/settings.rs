//! Tunable world constants
//!
//! Defaults reproduce the shipped game. Any subset can be overridden from a
//! JSON file; missing fields fall back to the defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{ConfigError, SimError};

/// World extents. The origin is the top-left corner, y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldSettings {
    pub width: f32,
    pub height: f32,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            width: WORLD_WIDTH,
            height: WORLD_HEIGHT,
        }
    }
}

/// Terrain random walk parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainSettings {
    /// Number of sampled points
    pub segment_count: usize,
    /// Highest allowed ground, as a fraction of world height
    pub min_height_frac: f32,
    /// Lowest allowed ground, measured up from the world floor
    pub max_height_margin: f32,
    /// Largest per-point height change (uniform in `[-max_step, max_step]`)
    pub max_step: i32,
}

impl Default for TerrainSettings {
    fn default() -> Self {
        Self {
            segment_count: TERRAIN_SEGMENTS,
            min_height_frac: TERRAIN_MIN_HEIGHT_FRAC,
            max_height_margin: TERRAIN_FLOOR_MARGIN,
            max_step: TERRAIN_MAX_STEP,
        }
    }
}

impl TerrainSettings {
    /// Vertical band `(top, bottom)` every terrain point is clamped into
    pub fn height_band(&self, world: &WorldSettings) -> (f32, f32) {
        (
            world.height * self.min_height_frac,
            world.height - self.max_height_margin,
        )
    }
}

/// Gravity, time scaling and tick pacing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallisticsSettings {
    pub base_gravity: f32,
    pub gravity_scale: f32,
    /// Multiplier from sim dt to projectile flight time
    pub time_scale: f32,
    pub tick_rate_hz: f32,
    /// Multiplier from real frame time to sim dt
    pub frame_dt_scale: f32,
    pub projectile_radius: f32,
    pub trail_length: usize,
}

impl Default for BallisticsSettings {
    fn default() -> Self {
        Self {
            base_gravity: BASE_GRAVITY,
            gravity_scale: GRAVITY_SCALE,
            time_scale: TIME_SCALE,
            tick_rate_hz: TICK_RATE_HZ,
            frame_dt_scale: FRAME_DT_SCALE,
            projectile_radius: PROJECTILE_RADIUS,
            trail_length: TRAIL_LENGTH,
        }
    }
}

impl BallisticsSettings {
    /// Effective downward acceleration used in trajectory math
    pub fn gravity(&self) -> f32 {
        self.base_gravity * self.gravity_scale
    }

    /// Simulated seconds per tick, independent of real frame pacing
    pub fn sim_dt(&self) -> f32 {
        self.frame_dt_scale / self.tick_rate_hz
    }

    /// Real-time duration of one tick, for callers that pace frames
    pub fn tick_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs_f32(1.0 / self.tick_rate_hz)
    }
}

/// Tank geometry, health and aim limits
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TankSettings {
    pub width: f32,
    pub height: f32,
    pub max_health: i32,
    pub barrel_length: f32,
    pub initial_angle: f32,
    pub initial_power: f32,
    pub angle_min: f32,
    pub angle_max: f32,
    pub power_min: f32,
    pub power_max: f32,
    /// Degrees per tick while an angle key is held
    pub angle_step: f32,
    /// Power units per tick while a power key is held
    pub power_step: f32,
    /// Terrain point index of the player tank; the enemy uses `len - 1 - inset`
    pub spawn_inset: usize,
}

impl Default for TankSettings {
    fn default() -> Self {
        Self {
            width: TANK_WIDTH,
            height: TANK_HEIGHT,
            max_health: TANK_MAX_HEALTH,
            barrel_length: BARREL_LENGTH,
            initial_angle: INITIAL_ANGLE,
            initial_power: INITIAL_POWER,
            angle_min: ANGLE_MIN,
            angle_max: ANGLE_MAX,
            power_min: POWER_MIN,
            power_max: POWER_MAX,
            angle_step: 1.0,
            power_step: 1.0,
            spawn_inset: SPAWN_INSET,
        }
    }
}

/// One ring of the damage falloff: hits closer than `radius` deal `damage`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DamageBand {
    pub radius: f32,
    pub damage: i32,
}

/// Damage falloff by distance from the tank anchor, innermost band first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DamageSettings {
    pub bands: Vec<DamageBand>,
}

impl Default for DamageSettings {
    fn default() -> Self {
        Self {
            bands: vec![
                DamageBand {
                    radius: 20.0,
                    damage: 50,
                },
                DamageBand {
                    radius: 40.0,
                    damage: 30,
                },
                DamageBand {
                    radius: 60.0,
                    damage: 10,
                },
            ],
        }
    }
}

/// Uniform ranges the random aim policy draws from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiSettings {
    pub angle_min: i32,
    pub angle_max: i32,
    pub power_min: i32,
    pub power_max: i32,
}

impl Default for AiSettings {
    fn default() -> Self {
        Self {
            angle_min: AI_ANGLE_MIN,
            angle_max: AI_ANGLE_MAX,
            power_min: AI_POWER_MIN,
            power_max: AI_POWER_MAX,
        }
    }
}

/// All world configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub world: WorldSettings,
    pub terrain: TerrainSettings,
    pub ballistics: BallisticsSettings,
    pub tank: TankSettings,
    pub damage: DamageSettings,
    pub ai: AiSettings,
}

impl Settings {
    /// Parse settings from JSON, then validate them
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let settings = Self::from_json_str(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Pretty JSON, suitable as a starting point for a settings file
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values that would break simulation invariants
    pub fn validate(&self) -> Result<(), SimError> {
        let invalid = |msg: String| Err(SimError::InvalidSettings(msg));

        if !(self.world.width > 0.0 && self.world.height > 0.0) {
            return invalid(format!(
                "world size must be positive, got {}x{}",
                self.world.width, self.world.height
            ));
        }

        if self.terrain.segment_count < 2 {
            return Err(SimError::InvalidTerrain {
                points: self.terrain.segment_count,
            });
        }
        let (top, bottom) = self.terrain.height_band(&self.world);
        if top.ceil() > bottom.floor() {
            return invalid(format!("terrain height band [{top}, {bottom}] is empty"));
        }
        if self.terrain.max_step < 0 {
            return invalid(format!("terrain max_step {} is negative", self.terrain.max_step));
        }

        let b = &self.ballistics;
        if !(b.gravity() > 0.0) {
            return invalid(format!("gravity must be positive, got {}", b.gravity()));
        }
        if !(b.time_scale > 0.0 && b.tick_rate_hz > 0.0 && b.frame_dt_scale > 0.0) {
            return invalid("time scale, tick rate and frame dt scale must be positive".into());
        }

        let t = &self.tank;
        if !(t.width > 0.0 && t.height > 0.0) {
            return invalid(format!("tank size must be positive, got {}x{}", t.width, t.height));
        }
        if t.max_health <= 0 {
            return invalid(format!("tank max_health must be positive, got {}", t.max_health));
        }
        if t.angle_min > t.angle_max || t.power_min > t.power_max {
            return invalid("tank angle/power ranges are inverted".into());
        }
        let spawn_span = t.spawn_inset.checked_mul(2).and_then(|n| n.checked_add(1));
        if spawn_span.is_none_or(|n| n >= self.terrain.segment_count) {
            return invalid(format!(
                "spawn_inset {} leaves no room between tanks on {} terrain points",
                t.spawn_inset, self.terrain.segment_count
            ));
        }

        let ai = &self.ai;
        if ai.angle_min > ai.angle_max || ai.power_min > ai.power_max {
            return invalid("ai angle/power ranges are inverted".into());
        }

        let bands = &self.damage.bands;
        if bands.windows(2).any(|w| w[0].radius >= w[1].radius) {
            return invalid("damage bands must be sorted by strictly increasing radius".into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert!((settings.ballistics.gravity() - 19.6).abs() < 1e-5);
        assert!((settings.ballistics.sim_dt() - 2.0 / 30.0).abs() < 1e-6);
        assert_eq!(settings.terrain.height_band(&settings.world), (300.0, 550.0));
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let settings =
            Settings::from_json_str(r#"{ "world": { "width": 1024.0 }, "ai": { "power_max": 150 } }"#)
                .unwrap();
        assert_eq!(settings.world.width, 1024.0);
        assert_eq!(settings.world.height, WORLD_HEIGHT);
        assert_eq!(settings.ai.power_max, 150);
        assert_eq!(settings.ai.power_min, AI_POWER_MIN);
        assert_eq!(settings.damage, DamageSettings::default());
    }

    #[test]
    fn test_json_roundtrip_preserves_settings() {
        let mut settings = Settings::default();
        settings.tank.max_health = 60;
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json_str(&json).unwrap(), settings);
    }

    #[test]
    fn test_rejects_short_terrain() {
        let mut settings = Settings::default();
        settings.terrain.segment_count = 1;
        assert_eq!(
            settings.validate(),
            Err(SimError::InvalidTerrain { points: 1 })
        );
    }

    #[test]
    fn test_rejects_unsorted_damage_bands() {
        let mut settings = Settings::default();
        settings.damage.bands.swap(0, 2);
        assert!(matches!(
            settings.validate(),
            Err(SimError::InvalidSettings(_))
        ));
    }

    #[test]
    fn test_rejects_non_positive_gravity() {
        let mut settings = Settings::default();
        settings.ballistics.gravity_scale = 0.0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_rejects_crowded_spawn() {
        let mut settings = Settings::default();
        settings.terrain.segment_count = 11;
        assert!(settings.validate().is_err());
        settings.terrain.segment_count = 12;
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_huge_spawn_inset_is_rejected_not_overflowed() {
        let err = Settings::from_json_str(r#"{ "tank": { "spawn_inset": 18446744073709551615 } }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(SimError::InvalidSettings(_))));

        let mut settings = Settings::default();
        settings.tank.spawn_inset = usize::MAX / 2;
        assert!(matches!(settings.validate(), Err(SimError::InvalidSettings(_))));
    }

    #[test]
    fn test_load_reports_parse_errors() {
        assert!(matches!(
            Settings::from_json_str("{ not json"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            Settings::from_json_str(r#"{ "world": { "width": -1.0 } }"#),
            Err(ConfigError::Invalid(_))
        ));
    }
}
