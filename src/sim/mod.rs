//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only (terrain and AI aim each get their own stream)
//! - At most one projectile in the air, owned by the turn state
//! - No rendering or platform dependencies

pub mod collision;
pub mod policy;
pub mod projectile;
pub mod state;
pub mod tank;
pub mod terrain;
pub mod tick;
pub mod turn;

pub use collision::{ShotOutcome, check_termination, damage_for_distance};
pub use policy::{AimDecision, AimPolicy, RandomAim};
pub use projectile::Projectile;
pub use state::{GameEvent, GameSession, Snapshot};
pub use tank::{Rect, Side, Tank};
pub use terrain::Terrain;
pub use tick::{TickInput, run_to_completion, tick};
pub use turn::{Transition, Turn};
