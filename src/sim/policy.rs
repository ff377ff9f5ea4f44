//! Aim policies
//!
//! Each side is driven by one policy while it is aiming. The policy may
//! change the tank's aim and power, and reports whether to fire this tick.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::tank::Tank;
use super::tick::TickInput;
use crate::settings::{AiSettings, TankSettings};

/// A fixed aim to fire with
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AimDecision {
    pub angle: f32,
    pub power: f32,
}

/// Uniform random aim with no targeting (the enemy's default)
#[derive(Debug, Clone)]
pub struct RandomAim {
    rng: Pcg32,
    ranges: AiSettings,
}

impl RandomAim {
    pub fn new(seed: u64, ranges: AiSettings) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            ranges,
        }
    }

    pub fn next_decision(&mut self) -> AimDecision {
        let r = &self.ranges;
        let angle = self.rng.random_range(r.angle_min..=r.angle_max) as f32;
        let power = self.rng.random_range(r.power_min..=r.power_max) as f32;
        AimDecision { angle, power }
    }
}

/// Who decides a side's aim
#[derive(Debug, Clone)]
pub enum AimPolicy {
    /// Per-tick input intents
    Human,
    /// Random angle and power, fired immediately
    Random(RandomAim),
    /// Pre-recorded shots, fired in order; holds once empty
    Scripted(VecDeque<AimDecision>),
}

impl AimPolicy {
    pub fn random(seed: u64, ranges: AiSettings) -> Self {
        AimPolicy::Random(RandomAim::new(seed, ranges))
    }

    pub fn scripted(shots: impl IntoIterator<Item = (f32, f32)>) -> Self {
        AimPolicy::Scripted(
            shots
                .into_iter()
                .map(|(angle, power)| AimDecision { angle, power })
                .collect(),
        )
    }

    /// Queue another shot on a scripted policy. Returns false for other policies.
    pub fn enqueue(&mut self, angle: f32, power: f32) -> bool {
        match self {
            AimPolicy::Scripted(queue) => {
                queue.push_back(AimDecision { angle, power });
                true
            }
            _ => false,
        }
    }

    /// True if a scripted policy has no shots left
    pub fn is_exhausted(&self) -> bool {
        matches!(self, AimPolicy::Scripted(queue) if queue.is_empty())
    }

    /// Run one aiming tick for `tank`. Returns true when the tank fires.
    pub fn drive(&mut self, tank: &mut Tank, input: &TickInput, limits: &TankSettings) -> bool {
        match self {
            AimPolicy::Human => {
                if input.increase_angle {
                    tank.adjust_aim(limits.angle_step, limits);
                }
                if input.decrease_angle {
                    tank.adjust_aim(-limits.angle_step, limits);
                }
                if input.increase_power {
                    tank.adjust_power(limits.power_step, limits);
                }
                if input.decrease_power {
                    tank.adjust_power(-limits.power_step, limits);
                }
                input.fire
            }
            AimPolicy::Random(random) => {
                let decision = random.next_decision();
                tank.set_aim(decision.angle, decision.power, limits);
                true
            }
            AimPolicy::Scripted(queue) => match queue.pop_front() {
                Some(decision) => {
                    tank.set_aim(decision.angle, decision.power, limits);
                    true
                }
                None => false,
            },
        }
    }
}
