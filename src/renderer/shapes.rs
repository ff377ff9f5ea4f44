//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::{Vertex, colors};
use crate::settings::Settings;
use crate::sim::{Side, Snapshot, Tank, Terrain};

/// Health bar geometry, in world units from the top corners
const HEALTH_BAR_MARGIN: f32 = 20.0;
const HEALTH_BAR_WIDTH: f32 = 100.0;
const HEALTH_BAR_HEIGHT: f32 = 10.0;
/// Drawn barrel thickness
pub const BARREL_THICKNESS: f32 = 5.0;
const CIRCLE_SEGMENTS: u32 = 16;

/// Tessellate a full frame: sky, terrain, tanks, projectile and trail, then the HUD
pub fn frame(snapshot: &Snapshot<'_>, settings: &Settings) -> Vec<Vertex> {
    let world = Vec2::new(snapshot.world.width, snapshot.world.height);
    let mut vertices = rect(Vec2::ZERO, world, colors::BACKGROUND);
    vertices.extend(terrain_fill(snapshot.terrain, colors::TERRAIN));

    for tank in [snapshot.player, snapshot.enemy] {
        vertices.extend(tank_body(tank, settings.tank.barrel_length));
    }

    if let Some(projectile) = snapshot.projectile {
        let radius = settings.ballistics.projectile_radius;
        vertices.extend(trail(&projectile.trail, radius, colors::PROJECTILE));
        vertices.extend(circle(projectile.pos, radius, colors::PROJECTILE, CIRCLE_SEGMENTS));
    }

    let (player_health, enemy_health) = snapshot.health();
    vertices.extend(health_bar(
        Vec2::splat(HEALTH_BAR_MARGIN),
        player_health,
        snapshot.player.max_health,
    ));
    vertices.extend(health_bar(
        Vec2::new(
            snapshot.world.width - HEALTH_BAR_MARGIN - HEALTH_BAR_WIDTH,
            HEALTH_BAR_MARGIN,
        ),
        enemy_health,
        snapshot.enemy.max_health,
    ));

    vertices
}

/// Terrain as a polygon closed down to the floor, one quad per segment
pub fn terrain_fill(terrain: &Terrain, color: [f32; 4]) -> Vec<Vertex> {
    let floor = terrain.floor();
    let mut vertices = Vec::with_capacity(terrain.len().saturating_sub(1) * 6);

    for pair in terrain.points().windows(2) {
        let (a, b) = (pair[0], pair[1]);
        vertices.push(Vertex::new(a.x, a.y, color));
        vertices.push(Vertex::new(b.x, b.y, color));
        vertices.push(Vertex::new(a.x, floor, color));

        vertices.push(Vertex::new(a.x, floor, color));
        vertices.push(Vertex::new(b.x, b.y, color));
        vertices.push(Vertex::new(b.x, floor, color));
    }

    vertices
}

/// Body rectangle plus barrel, colored by side
pub fn tank_body(tank: &Tank, barrel_length: f32) -> Vec<Vertex> {
    let color = match tank.side {
        Side::Player => colors::PLAYER_TANK,
        Side::Enemy => colors::ENEMY_TANK,
    };
    let body = tank.bounding_box();
    let mut vertices = rect(body.min(), body.max(), color);
    vertices.extend(thick_line(
        tank.muzzle(),
        tank.barrel_tip(barrel_length),
        BARREL_THICKNESS,
        color,
    ));
    vertices
}

/// Red background bar with a green foreground proportional to health
pub fn health_bar(origin: Vec2, health: i32, max_health: i32) -> Vec<Vertex> {
    let size = Vec2::new(HEALTH_BAR_WIDTH, HEALTH_BAR_HEIGHT);
    let mut vertices = rect(origin, origin + size, colors::HEALTH_BACK);

    let frac = if max_health > 0 {
        (health as f32 / max_health as f32).clamp(0.0, 1.0)
    } else {
        0.0
    };
    if frac > 0.0 {
        let fill = Vec2::new(HEALTH_BAR_WIDTH * frac, HEALTH_BAR_HEIGHT);
        vertices.extend(rect(origin, origin + fill, colors::HEALTH_FRONT));
    }
    vertices
}

/// Axis-aligned filled rectangle between two corners
pub fn rect(min: Vec2, max: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    vec![
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

/// Line segment drawn as a quad `thickness` wide
pub fn thick_line(from: Vec2, to: Vec2, thickness: f32, color: [f32; 4]) -> Vec<Vertex> {
    let dir = (to - from).normalize_or_zero();
    let perp = Vec2::new(-dir.y, dir.x) * (thickness * 0.5);

    let a1 = from + perp;
    let a2 = from - perp;
    let b1 = to + perp;
    let b2 = to - perp;

    vec![
        Vertex::new(a1.x, a1.y, color),
        Vertex::new(a2.x, a2.y, color),
        Vertex::new(b1.x, b1.y, color),
        Vertex::new(b1.x, b1.y, color),
        Vertex::new(a2.x, a2.y, color),
        Vertex::new(b2.x, b2.y, color),
    ]
}

/// Fading, tapering trail behind a projectile (points newest first)
pub fn trail(points: &[Vec2], radius: f32, color: [f32; 4]) -> Vec<Vertex> {
    if points.len() < 2 {
        return Vec::new();
    }

    let mut vertices = Vec::with_capacity(points.len() * 6);
    let len = points.len() as f32;

    for (i, pair) in points.windows(2).enumerate() {
        let (p1, p2) = (pair[0], pair[1]);

        // Fade alpha and width along the trail
        let t1 = i as f32 / len;
        let t2 = (i + 1) as f32 / len;
        let c1 = with_alpha(color, (1.0 - t1) * 0.6);
        let c2 = with_alpha(color, (1.0 - t2) * 0.6);
        let w1 = radius * (1.0 - t1 * 0.7);
        let w2 = radius * (1.0 - t2 * 0.7);

        let dir = (p2 - p1).normalize_or_zero();
        let perp = Vec2::new(-dir.y, dir.x);

        let v1a = p1 + perp * w1;
        let v1b = p1 - perp * w1;
        let v2a = p2 + perp * w2;
        let v2b = p2 - perp * w2;

        vertices.push(Vertex::new(v1a.x, v1a.y, c1));
        vertices.push(Vertex::new(v1b.x, v1b.y, c1));
        vertices.push(Vertex::new(v2a.x, v2a.y, c2));

        vertices.push(Vertex::new(v2a.x, v2a.y, c2));
        vertices.push(Vertex::new(v1b.x, v1b.y, c1));
        vertices.push(Vertex::new(v2b.x, v2b.y, c2));
    }

    vertices
}

fn with_alpha(color: [f32; 4], alpha: f32) -> [f32; 4] {
    [color[0], color[1], color[2], alpha]
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}
