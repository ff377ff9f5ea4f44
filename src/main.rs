//! Tank Duel entry point
//!
//! Runs a duel in the terminal on the fixed simulation tick. The player's
//! shots come from stdin (`<angle> <power>` per line) unless `--autoplay`
//! hands the player side to the random policy as well.

use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use clap::Parser;
use tank_duel::Settings;
use tank_duel::renderer::ascii;
use tank_duel::sim::{AimPolicy, GameEvent, GameSession, ShotOutcome, Side, TickInput, tick};

/// Max ticks to catch up in one wake-up when running in real time
const MAX_SUBSTEPS: u32 = 5;

#[derive(Parser, Debug)]
#[command(version, about = "Turn-based artillery duel")]
struct Args {
    /// Seed for terrain and AI (defaults to the clock)
    #[arg(long)]
    seed: Option<u64>,

    /// JSON settings file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Let the random policy play the player side too
    #[arg(long)]
    autoplay: bool,

    #[arg(long, default_value_t = 100_000)]
    max_ticks: u64,

    /// Pace ticks to the configured tick rate
    #[arg(long)]
    realtime: bool,

    /// Print a frame every N ticks
    #[arg(long)]
    frames: Option<u64>,

    #[arg(long, default_value_t = 80)]
    cols: usize,

    #[arg(long, default_value_t = 24)]
    rows: usize,
}

/// Wall-clock pacing with a fixed-step accumulator
struct Pacer {
    interval: f32,
    accumulator: f32,
    last: Instant,
}

impl Pacer {
    fn new(interval: Duration) -> Self {
        Self {
            interval: interval.as_secs_f32(),
            accumulator: 0.0,
            last: Instant::now(),
        }
    }

    /// Ticks owed since the last call, capped to avoid a spiral after stalls
    fn due(&mut self) -> u32 {
        let now = Instant::now();
        let frame = now.duration_since(self.last).as_secs_f32().min(0.1);
        self.last = now;
        self.accumulator += frame;

        let mut substeps = 0;
        while self.accumulator >= self.interval && substeps < MAX_SUBSTEPS {
            self.accumulator -= self.interval;
            substeps += 1;
        }
        substeps
    }

    /// Forget time spent blocked (e.g. waiting on stdin)
    fn reset(&mut self) {
        self.accumulator = 0.0;
        self.last = Instant::now();
    }

    fn sleep_until_next(&self) {
        let remaining = self.interval - self.accumulator;
        if remaining > 0.0 {
            std::thread::sleep(Duration::from_secs_f32(remaining));
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("tank_duel=info"))
        .init();

    let args = Args::parse();
    let settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let seed = args.seed.unwrap_or_else(clock_seed);

    let mut session = GameSession::new(seed, settings)?;
    let player_policy = if args.autoplay {
        AimPolicy::random(seed ^ 0x9E37_79B9_7F4A_7C15, session.settings.ai)
    } else {
        AimPolicy::scripted(std::iter::empty())
    };
    session.set_policy(Side::Player, player_policy);
    log::info!("Tank Duel starting (seed {seed})");

    let dt = session.settings.ballistics.sim_dt();
    let mut pacer = Pacer::new(session.settings.ballistics.tick_interval());
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    while !session.is_over() && session.time_ticks < args.max_ticks {
        if session.awaiting_input(Side::Player) {
            println!("{}", ascii::render(&session.snapshot(), args.cols, args.rows));
            let Some((angle, power)) = prompt_shot(&mut lines)? else {
                log::info!("Input closed, stopping");
                break;
            };
            session.policy_mut(Side::Player).enqueue(angle, power);
            pacer.reset();
        }

        let steps = if args.realtime { pacer.due() } else { 1 };
        for _ in 0..steps {
            tick(&mut session, &TickInput::default(), dt);
            let every = args.frames.unwrap_or(0);
            if every > 0 && session.time_ticks % every == 0 {
                println!("{}", ascii::render(&session.snapshot(), args.cols, args.rows));
            }
        }
        for event in session.drain_events() {
            report(&event);
        }
        if args.realtime {
            pacer.sleep_until_next();
        }
    }

    println!("{}", ascii::render(&session.snapshot(), args.cols, args.rows));
    match session.winner() {
        Some(winner) => println!("Game Over: {winner} wins!"),
        None => println!("No winner after {} ticks", session.time_ticks),
    }
    Ok(())
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}

/// Ask for `<angle> <power>` until a valid line arrives. `None` on EOF.
fn prompt_shot(lines: &mut impl Iterator<Item = io::Result<String>>) -> io::Result<Option<(f32, f32)>> {
    loop {
        print!("angle power> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            return Ok(None);
        };
        match parse_shot(&line?) {
            Some(shot) => return Ok(Some(shot)),
            None => eprintln!("expected two numbers, e.g. `45 120`"),
        }
    }
}

fn parse_shot(line: &str) -> Option<(f32, f32)> {
    let mut parts = line.split_whitespace();
    let angle = parts.next()?.parse().ok()?;
    let power = parts.next()?.parse().ok()?;
    parts.next().is_none().then_some((angle, power))
}

fn report(event: &GameEvent) {
    match event {
        GameEvent::ShotFired {
            side,
            aim_angle,
            power,
        } => println!("{side} fires at {aim_angle:.0} degrees, power {power:.0}"),
        GameEvent::ShotResolved { side, outcome } => match outcome {
            ShotOutcome::TankHit { target, damage } => {
                println!("  {side} hits {target} for {damage}")
            }
            ShotOutcome::Terrain => println!("  {side} hits the ground"),
            ShotOutcome::OutOfBounds => println!("  {side}'s shot leaves the field"),
            ShotOutcome::InFlight => {}
        },
        GameEvent::TurnChanged { side } => log::debug!("{side} to aim"),
        GameEvent::GameOver { winner } => log::debug!("{winner} won"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_shot() {
        assert_eq!(parse_shot("45 120"), Some((45.0, 120.0)));
        assert_eq!(parse_shot("  30.5\t80 "), Some((30.5, 80.0)));
        assert_eq!(parse_shot("45"), None);
        assert_eq!(parse_shot("45 abc"), None);
        assert_eq!(parse_shot("1 2 3"), None);
    }

    #[test]
    fn test_prompt_skips_bad_lines() {
        let mut lines = vec![Ok("nope".to_string()), Ok("60 90".to_string())].into_iter();
        assert_eq!(prompt_shot(&mut lines).unwrap(), Some((60.0, 90.0)));
        assert_eq!(prompt_shot(&mut lines).unwrap(), None);
    }

    #[test]
    fn test_args_parse() {
        let args = Args::parse_from(["tank-duel", "--seed", "7", "--autoplay", "--frames", "10"]);
        assert_eq!(args.seed, Some(7));
        assert!(args.autoplay);
        assert_eq!(args.frames, Some(10));
        assert_eq!((args.cols, args.rows), (80, 24));
    }
}
