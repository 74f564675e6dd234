//! Per-frame simulation update
//!
//! Variable-dt update driven by the host's animation-frame callback. Entity
//! removal is always mark-and-compact (collect ids, then `retain`), never
//! filtering the collection being iterated.

use super::collision::circle_hit;
use super::state::{FireEvent, GameEvent, GamePhase, GameState};
use crate::consts::*;
use crate::wrap_position;

/// Input for a single tick
///
/// One-shot fields; the host clears them after the tick consumes them.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Completed drag gesture to fire this frame
    pub fire: Option<FireEvent>,
}

/// Advance the game state by one frame of `dt` milliseconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.events.clear();

    if let Some(fire) = input.fire {
        if let Some(id) = state.spawn_projectile(fire) {
            state.events.push(GameEvent::ProjectileFired { id });
            log::debug!("fired projectile {id} dir={:?} dist={}", fire.dir, fire.dist);
        }
    }

    state.time_ms += f64::from(dt);

    update_projectiles(state, dt);
    resolve_enemy_hits(state);
    resolve_ship_hits(state);
    update_ship(state, dt);
    spawn_enemies(state, dt);
}

/// Displace projectiles, wrap them, and expire the ones out of life
fn update_projectiles(state: &mut GameState, dt: f32) {
    for projectile in &mut state.projectiles {
        let step = projectile.vel * dt * projectile.speed_multiplier();
        projectile.pos = wrap_position(projectile.pos + step, state.width, state.height);
        projectile.life -= dt;
    }

    let mut expired = Vec::new();
    state.projectiles.retain(|p| {
        if p.life <= 0.0 {
            expired.push(p.id);
            false
        } else {
            true
        }
    });
    for id in expired {
        state.events.push(GameEvent::ProjectileExpired { id });
    }
}

/// Projectile-enemy overlap: each hit removes that enemy and that projectile
/// and scores one point
///
/// O(n*m) over two small collections, on purpose.
fn resolve_enemy_hits(state: &mut GameState) {
    let mut dead_enemies: Vec<u32> = Vec::new();
    let mut spent_projectiles: Vec<u32> = Vec::new();

    for projectile in &state.projectiles {
        if spent_projectiles.contains(&projectile.id) {
            continue;
        }
        for enemy in &state.enemies {
            if dead_enemies.contains(&enemy.id) {
                continue;
            }
            if circle_hit(projectile.pos, enemy.pos, ENEMY_RADIUS) {
                dead_enemies.push(enemy.id);
                spent_projectiles.push(projectile.id);
                break;
            }
        }
    }

    if dead_enemies.is_empty() {
        return;
    }

    state.score += dead_enemies.len() as u32;
    state.enemies.retain(|e| !dead_enemies.contains(&e.id));
    state.projectiles.retain(|p| !spent_projectiles.contains(&p.id));
    for id in dead_enemies {
        state.events.push(GameEvent::EnemyDestroyed { id });
    }
}

/// Projectile-ship overlap: lethal only past the firing grace window
fn resolve_ship_hits(state: &mut GameState) {
    if state.phase != GamePhase::Playing {
        return;
    }

    let hit = state
        .projectiles
        .iter()
        .find(|p| p.past_grace() && circle_hit(p.pos, state.ship.pos, SHIP_RADIUS))
        .map(|p| p.id);

    if let Some(id) = hit {
        state.kill_ship();
        state.projectiles.retain(|p| p.id != id);
        log::info!("ship destroyed by projectile {id}");
    }
}

/// Drift the ship by damped velocity and face it along its travel direction
///
/// Suspended entirely once the ship is dead.
fn update_ship(state: &mut GameState, dt: f32) {
    if state.ship.is_dead() {
        return;
    }

    let step = state.ship.vel * dt * SHIP_DAMPING;
    state.ship.pos = wrap_position(state.ship.pos + step, state.width, state.height);
    state.ship.angle = state.ship.vel.y.atan2(state.ship.vel.x);
}

/// Periodic enemy spawning, one per elapsed interval of sim time
fn spawn_enemies(state: &mut GameState, dt: f32) {
    if state.phase != GamePhase::Playing {
        return;
    }

    state.spawn_clock_ms += dt;
    while state.spawn_clock_ms >= ENEMY_SPAWN_INTERVAL_MS {
        state.spawn_clock_ms -= ENEMY_SPAWN_INTERVAL_MS;
        let id = state.spawn_enemy_random();
        state.events.push(GameEvent::EnemySpawned { id });
    }
}
