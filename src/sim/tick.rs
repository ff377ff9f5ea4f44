//! Fixed timestep simulation tick
//!
//! Core game loop that advances a duel deterministically.

use super::collision::check_termination;
use super::projectile::Projectile;
use super::state::{GameEvent, GameSession};
use super::tank::Side;
use super::turn::{Transition, Turn};

/// Player intents for a single tick, sampled while the player is aiming
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub increase_angle: bool,
    pub decrease_angle: bool,
    pub increase_power: bool,
    pub decrease_power: bool,
    pub fire: bool,
}

/// Advance the session by one fixed timestep of `dt` simulated seconds
pub fn tick(session: &mut GameSession, input: &TickInput, dt: f32) {
    // Nothing moves once a tank is destroyed
    if session.is_over() {
        return;
    }

    session.time_ticks += 1;
    session.sim_time += dt;

    match session.turn {
        Turn::Aiming { side } => aim(session, side, input),
        Turn::InFlight { .. } => fly(session, dt),
        Turn::GameOver { .. } => {}
    }
}

/// Let the aiming side's policy adjust its tank, and fire if it decides to
fn aim(session: &mut GameSession, side: Side, input: &TickInput) {
    let limits = session.settings.tank;
    let (policy, tank) = session.controls_mut(side);
    if !policy.drive(tank, input, &limits) {
        return;
    }

    let projectile = Projectile::launch(tank);
    let (aim_angle, power) = (tank.aim_angle(), tank.power());

    match session.turn.fire(projectile) {
        Ok(()) => {
            session.shots_fired += 1;
            log::info!("{side} fires: angle {aim_angle:.0}, power {power:.0}");
            session.push_event(GameEvent::ShotFired {
                side,
                aim_angle,
                power,
            });
        }
        Err(err) => log::warn!("{side} fire rejected: {err}"),
    }
}

/// Move the shot in flight and resolve it if it terminated
fn fly(session: &mut GameSession, dt: f32) {
    let ballistics = session.settings.ballistics;
    let Some(projectile) = session.turn.projectile_mut() else {
        return;
    };
    projectile.advance(
        dt,
        ballistics.time_scale,
        ballistics.gravity(),
        ballistics.trail_length,
    );
    let (pos, shooter) = (projectile.pos, projectile.fired_by);
    log::trace!("Projectile at ({:.1}, {:.1})", pos.x, pos.y);

    let outcome = check_termination(
        pos,
        &session.terrain,
        &session.player,
        &session.enemy,
        shooter,
        &session.settings.world,
        &session.settings.damage,
    );

    let transition = session
        .turn
        .resolve(outcome, &mut session.player, &mut session.enemy);
    match transition {
        Ok(Transition::Continue) => {}
        Ok(Transition::TurnPassed { next }) => {
            log::debug!("{shooter} shot ended: {outcome:?}");
            session.push_event(GameEvent::ShotResolved {
                side: shooter,
                outcome,
            });
            session.push_event(GameEvent::TurnChanged { side: next });
        }
        Ok(Transition::GameOver { winner }) => {
            log::info!(
                "Game over after {} shots: {winner} wins (player {}, enemy {})",
                session.shots_fired,
                session.player.health,
                session.enemy.health
            );
            session.push_event(GameEvent::ShotResolved {
                side: shooter,
                outcome,
            });
            session.push_event(GameEvent::GameOver { winner });
        }
        Err(err) => log::warn!("Resolve rejected: {err}"),
    }
}

/// Tick with the configured sim dt until the game ends or `max_ticks` pass.
///
/// `input` is sampled once per tick. Returns the winner, if any.
pub fn run_to_completion<F>(session: &mut GameSession, mut input: F, max_ticks: u64) -> Option<Side>
where
    F: FnMut(&GameSession) -> TickInput,
{
    let dt = session.settings.ballistics.sim_dt();
    for _ in 0..max_ticks {
        if session.is_over() {
            break;
        }
        let tick_input = input(session);
        tick(session, &tick_input, dt);
    }
    session.winner()
}
