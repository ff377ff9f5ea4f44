//! Terminal rendering
//!
//! Rasterizes a snapshot into a `cols` x `rows` character grid, preceded by
//! a one-line status header.

use glam::Vec2;

use crate::sim::{Side, Snapshot, Turn};

const SKY: char = ' ';
const GROUND: char = '#';
const PLAYER: char = 'P';
const ENEMY: char = 'E';
const SHOT: char = '*';
const TRAIL: char = '.';

/// Render a frame as text. Later layers overwrite earlier ones:
/// terrain, trail, tanks, then the projectile.
pub fn render(snapshot: &Snapshot<'_>, cols: usize, rows: usize) -> String {
    let mut out = header(snapshot);
    out.push('\n');
    if cols == 0 || rows == 0 {
        return out;
    }

    let cell = Vec2::new(
        snapshot.world.width / cols as f32,
        snapshot.world.height / rows as f32,
    );
    let mut grid = vec![vec![SKY; cols]; rows];

    // Ground fills every cell whose center is at or below the surface
    for (col, column_x) in (0..cols).map(|c| (c, (c as f32 + 0.5) * cell.x)) {
        let surface = snapshot.terrain.height_at(column_x);
        for (row, line) in grid.iter_mut().enumerate() {
            if (row as f32 + 0.5) * cell.y >= surface {
                line[col] = GROUND;
            }
        }
    }

    let mut plot = |pos: Vec2, ch: char| {
        if let Some((col, row)) = to_cell(pos, cell, cols, rows) {
            grid[row][col] = ch;
        }
    };

    if let Some(projectile) = snapshot.projectile {
        for &p in projectile.trail.iter().skip(1) {
            plot(p, TRAIL);
        }
    }
    for tank in [snapshot.player, snapshot.enemy] {
        let body = tank.bounding_box();
        let ch = match tank.side {
            Side::Player => PLAYER,
            Side::Enemy => ENEMY,
        };
        plot((body.min() + body.max()) * 0.5, ch);
    }
    if let Some(projectile) = snapshot.projectile {
        plot(projectile.pos, SHOT);
    }

    for line in grid {
        out.extend(line);
        out.push('\n');
    }
    out
}

fn header(snapshot: &Snapshot<'_>) -> String {
    let (player, enemy) = snapshot.health();
    let status = match snapshot.turn {
        Turn::Aiming { side } => {
            let tank = match side {
                Side::Player => snapshot.player,
                Side::Enemy => snapshot.enemy,
            };
            format!(
                "{side} aiming (angle {:.0}, power {:.0})",
                tank.aim_angle(),
                tank.power()
            )
        }
        Turn::InFlight { side, .. } => format!("{side} shot in flight"),
        Turn::GameOver { winner } => format!("Game over: {winner} wins"),
    };
    format!(
        "[tick {}] Player {player:>3} | Enemy {enemy:>3} | {status}",
        snapshot.tick
    )
}

/// Grid cell for a world position, `None` if it lies outside the world
fn to_cell(pos: Vec2, cell: Vec2, cols: usize, rows: usize) -> Option<(usize, usize)> {
    if pos.x < 0.0 || pos.y < 0.0 {
        return None;
    }
    let col = (pos.x / cell.x) as usize;
    let row = (pos.y / cell.y) as usize;
    // The right and bottom world edges belong to the last cell
    let col = if col == cols && pos.x <= cell.x * cols as f32 { cols - 1 } else { col };
    let row = if row == rows && pos.y <= cell.y * rows as f32 { rows - 1 } else { row };
    (col < cols && row < rows).then_some((col, row))
}
