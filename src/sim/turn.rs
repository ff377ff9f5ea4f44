//! Turn state machine
//!
//! `Aiming(side) -> InFlight(side) -> Aiming(opponent) -> ...` until a tank
//! is destroyed. The live projectile is stored in the `InFlight` state.

use serde::{Deserialize, Serialize};

use super::collision::ShotOutcome;
use super::projectile::Projectile;
use super::tank::{Side, Tank};
use crate::error::SimError;

/// Whose turn it is and what they are doing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Turn {
    /// Choosing angle and power
    Aiming { side: Side },
    /// A shot from `side` is in the air
    InFlight { side: Side, projectile: Projectile },
    /// Terminal
    GameOver { winner: Side },
}

/// What `Turn::resolve` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Shot still in the air
    Continue,
    /// Shot ended; `next` is now aiming
    TurnPassed { next: Side },
    /// Shot ended and destroyed a tank
    GameOver { winner: Side },
}

impl Turn {
    pub fn new(first: Side) -> Self {
        Turn::Aiming { side: first }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Turn::Aiming { .. } => "aiming",
            Turn::InFlight { .. } => "in flight",
            Turn::GameOver { .. } => "game over",
        }
    }

    /// Side currently aiming or firing; `None` once the game is over
    pub fn active_side(&self) -> Option<Side> {
        match self {
            Turn::Aiming { side } | Turn::InFlight { side, .. } => Some(*side),
            Turn::GameOver { .. } => None,
        }
    }

    pub fn projectile(&self) -> Option<&Projectile> {
        match self {
            Turn::InFlight { projectile, .. } => Some(projectile),
            _ => None,
        }
    }

    pub fn projectile_mut(&mut self) -> Option<&mut Projectile> {
        match self {
            Turn::InFlight { projectile, .. } => Some(projectile),
            _ => None,
        }
    }

    pub fn winner(&self) -> Option<Side> {
        match self {
            Turn::GameOver { winner } => Some(*winner),
            _ => None,
        }
    }

    pub fn is_aiming(&self) -> bool {
        matches!(self, Turn::Aiming { .. })
    }

    pub fn is_over(&self) -> bool {
        matches!(self, Turn::GameOver { .. })
    }

    /// Put a projectile in the air. Only the aiming side may fire.
    pub fn fire(&mut self, projectile: Projectile) -> Result<(), SimError> {
        match *self {
            Turn::Aiming { side } if side == projectile.fired_by => {
                *self = Turn::InFlight { side, projectile };
                Ok(())
            }
            _ => Err(SimError::IllegalTurnAction { state: self.name() }),
        }
    }

    /// Apply a resolver outcome to the shot in flight.
    ///
    /// On termination, damage goes to the outcome's target, the projectile
    /// is dropped, and the turn passes or the game ends.
    pub fn resolve(
        &mut self,
        outcome: ShotOutcome,
        player: &mut Tank,
        enemy: &mut Tank,
    ) -> Result<Transition, SimError> {
        let Turn::InFlight { side, .. } = *self else {
            return Err(SimError::IllegalTurnAction { state: self.name() });
        };
        if !outcome.is_terminated() {
            return Ok(Transition::Continue);
        }

        if let ShotOutcome::TankHit { target, damage } = outcome {
            match target {
                Side::Player => player.apply_damage(damage),
                Side::Enemy => enemy.apply_damage(damage),
            }
        }

        let (next, transition) = if player.is_destroyed() {
            (
                Turn::GameOver { winner: Side::Enemy },
                Transition::GameOver { winner: Side::Enemy },
            )
        } else if enemy.is_destroyed() {
            (
                Turn::GameOver {
                    winner: Side::Player,
                },
                Transition::GameOver {
                    winner: Side::Player,
                },
            )
        } else {
            let next = side.opponent();
            (Turn::Aiming { side: next }, Transition::TurnPassed { next })
        };
        *self = next;
        Ok(transition)
    }
}
