//! Game state and core simulation types

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Ship alive, normal play
    Playing,
    /// Ship destroyed; terminal until reset
    GameOver,
}

/// The player's ship
///
/// Never removed from the state; once dead it is rendered as debris anchored
/// at its final position.
#[derive(Debug, Clone, Copy)]
pub struct Ship {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Facing angle (radians), recomputed each tick from velocity
    pub angle: f32,
    /// Sim time (ms) at which the ship was destroyed
    pub death_time: Option<f64>,
}

impl Ship {
    fn new(pos: Vec2) -> Self {
        // Initial drift matches the initial facing angle of 0
        Self {
            pos,
            vel: Vec2::new(1.0, 0.0),
            angle: 0.0,
            death_time: None,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.death_time.is_some()
    }
}

/// A short-lived directional entity fired by the ship
#[derive(Debug, Clone, Copy)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    /// Unit direction of travel
    pub vel: Vec2,
    /// Length (px) of the drag that fired it; scales speed
    pub drag_dist: f32,
    /// Remaining life (ms); removed at or below zero
    pub life: f32,
    /// Sim time (ms) at creation
    pub created: f64,
}

impl Projectile {
    /// Speed multiplier from the firing drag, saturating at the bounds
    pub fn speed_multiplier(&self) -> f32 {
        (self.drag_dist * self.drag_dist / DRAG_SPEED_SCALE).clamp(SPEED_MULT_MIN, SPEED_MULT_MAX)
    }

    /// True once the projectile has lived past the self-harm grace window
    pub fn past_grace(&self) -> bool {
        self.life <= PROJECTILE_LIFE_MS - FIRE_GRACE_MS
    }
}

/// A static circular target removed on projectile contact
#[derive(Debug, Clone, Copy)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
}

/// An in-progress pointer drag
///
/// Modeled as an explicit variant rather than a nullable record: the last
/// point is legitimately unknown until the first move event arrives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragGesture {
    Idle,
    Active { start: Vec2, last: Option<Vec2> },
}

/// A completed drag, ready to spawn a projectile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FireEvent {
    /// Unit direction from drag start to release point
    pub dir: Vec2,
    /// Euclidean drag length (px)
    pub dist: f32,
}

/// Things that happened during a tick, for host-side effects (HUD, logging)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    ProjectileFired { id: u32 },
    ProjectileExpired { id: u32 },
    EnemySpawned { id: u32 },
    EnemyDestroyed { id: u32 },
    ShipDestroyed,
}

/// Complete game state
///
/// One shared mutable record, passed by reference to `tick` and the renderer.
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Drawing surface bounds
    pub width: f32,
    pub height: f32,
    /// Accumulated sim time (ms)
    pub time_ms: f64,
    pub phase: GamePhase,
    /// Monotonically non-decreasing during play
    pub score: u32,
    pub ship: Ship,
    /// Active projectiles (sorted by id for determinism)
    pub projectiles: Vec<Projectile>,
    /// Active enemies (sorted by id for determinism)
    pub enemies: Vec<Enemy>,
    /// At most one active gesture at a time
    pub drag: DragGesture,
    /// Per-piece factors in [-1, 1] for the debris pattern, fixed at init
    pub debris_factors: [f32; DEBRIS_PIECES],
    /// Time (ms) accumulated toward the next enemy spawn
    pub spawn_clock_ms: f32,
    /// Events emitted by the most recent tick
    pub events: Vec<GameEvent>,
    rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given bounds and seed
    pub fn new(width: f32, height: f32, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut debris_factors = [0.0; DEBRIS_PIECES];
        for factor in &mut debris_factors {
            *factor = rng.random_range(-1.0..1.0);
        }

        let mut state = Self {
            seed,
            width,
            height,
            time_ms: 0.0,
            phase: GamePhase::Playing,
            score: 0,
            ship: Ship::new(Vec2::new(width / 2.0, height / 2.0)),
            projectiles: Vec::new(),
            enemies: Vec::new(),
            drag: DragGesture::Idle,
            debris_factors,
            spawn_clock_ms: 0.0,
            events: Vec::new(),
            rng,
            next_id: 0,
        };

        // One enemy is on the field from the start
        state.spawn_enemy_at(Vec2::new(width / 3.0, height / 3.0));

        state
    }

    /// Reinitialize everything for a fresh session with a new seed
    ///
    /// Bounds are kept; ship, collections, gesture, score, phase, clocks, RNG
    /// and debris factors all return to their new-game values.
    pub fn reset(&mut self, seed: u64) {
        *self = Self::new(self.width, self.height, seed);
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Spawn an enemy at a fixed position
    pub fn spawn_enemy_at(&mut self, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        self.enemies.push(Enemy { id, pos });
        id
    }

    /// Spawn an enemy at an RNG-chosen position within bounds
    pub fn spawn_enemy_random(&mut self) -> u32 {
        let pos = Vec2::new(
            self.rng.random_range(0.0..self.width),
            self.rng.random_range(0.0..self.height),
        );
        self.spawn_enemy_at(pos)
    }

    /// Spawn a projectile at the ship from a completed drag, applying recoil
    ///
    /// Ignored once the game is over.
    pub fn spawn_projectile(&mut self, fire: FireEvent) -> Option<u32> {
        if self.phase == GamePhase::GameOver {
            return None;
        }

        let id = self.next_entity_id();
        self.projectiles.push(Projectile {
            id,
            pos: self.ship.pos,
            vel: fire.dir,
            drag_dist: fire.dist,
            life: PROJECTILE_LIFE_MS,
            created: self.time_ms,
        });

        // Recoil: firing pushes the ship the other way. Masses are not
        // modeled, so the exchange is deliberately unbalanced.
        self.ship.vel -= fire.dir;

        Some(id)
    }

    /// Mark the ship dead and end the session. Idempotent.
    pub fn kill_ship(&mut self) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        self.ship.death_time = Some(self.time_ms);
        self.phase = GamePhase::GameOver;
        self.events.push(GameEvent::ShipDestroyed);
    }

    // --- Drag gesture lifecycle -------------------------------------------

    /// Pointer down: begin a gesture unless one is already active
    pub fn begin_drag(&mut self, pos: Vec2) {
        if self.drag == DragGesture::Idle {
            self.drag = DragGesture::Active {
                start: pos,
                last: None,
            };
        }
    }

    /// Pointer move: update the last known point of the active gesture
    pub fn move_drag(&mut self, pos: Vec2) {
        if let DragGesture::Active { ref mut last, .. } = self.drag {
            *last = Some(pos);
        }
    }

    /// Pointer up: convert a sufficiently long drag into a fire event
    ///
    /// Always returns the gesture to `Idle`. Gestures with no move events or
    /// shorter than the fire threshold are discarded.
    pub fn end_drag(&mut self) -> Option<FireEvent> {
        let gesture = std::mem::replace(&mut self.drag, DragGesture::Idle);
        let DragGesture::Active {
            start,
            last: Some(last),
        } = gesture
        else {
            return None;
        };

        let delta = last - start;
        let dist = delta.length();
        if dist < FIRE_THRESHOLD {
            return None;
        }

        Some(FireEvent {
            dir: delta / dist,
            dist,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    fn state() -> GameState {
        GameState::new(SURFACE_WIDTH, SURFACE_HEIGHT, 7)
    }

    #[test]
    fn new_state_has_centered_ship_and_one_enemy() {
        let state = state();
        assert_eq!(state.ship.pos, Vec2::new(400.0, 300.0));
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn only_one_gesture_active_at_a_time() {
        let mut state = state();
        state.begin_drag(Vec2::new(10.0, 10.0));
        state.begin_drag(Vec2::new(99.0, 99.0));

        assert_eq!(
            state.drag,
            DragGesture::Active {
                start: Vec2::new(10.0, 10.0),
                last: None,
            }
        );
    }

    #[test]
    fn short_drag_is_discarded() {
        let mut state = state();
        state.begin_drag(Vec2::new(100.0, 100.0));
        state.move_drag(Vec2::new(104.0, 100.0));

        assert_eq!(state.end_drag(), None);
        assert_eq!(state.drag, DragGesture::Idle);
    }

    #[test]
    fn drag_without_move_is_discarded() {
        let mut state = state();
        state.begin_drag(Vec2::new(100.0, 100.0));
        assert_eq!(state.end_drag(), None);
    }

    #[test]
    fn long_drag_fires_with_unit_direction() {
        let mut state = state();
        state.begin_drag(Vec2::new(100.0, 100.0));
        state.move_drag(Vec2::new(160.0, 100.0));

        let fire = state.end_drag().expect("drag should fire");
        assert_eq!(fire.dir, Vec2::new(1.0, 0.0));
        assert_eq!(fire.dist, 60.0);
        assert_eq!(state.drag, DragGesture::Idle);
    }

    #[test]
    fn fire_spawns_at_ship_and_applies_recoil() {
        let mut state = state();
        let vel_before = state.ship.vel;
        let fire = FireEvent {
            dir: Vec2::new(0.0, 1.0),
            dist: 100.0,
        };

        state.spawn_projectile(fire).expect("should spawn");

        let projectile = state.projectiles.last().unwrap();
        assert_eq!(projectile.pos, state.ship.pos);
        assert_eq!(projectile.vel, Vec2::new(0.0, 1.0));
        assert_eq!(projectile.life, PROJECTILE_LIFE_MS);
        assert_eq!(state.ship.vel, vel_before - Vec2::new(0.0, 1.0));
    }

    #[test]
    fn no_projectile_after_game_over() {
        let mut state = state();
        state.kill_ship();

        let fire = FireEvent {
            dir: Vec2::new(1.0, 0.0),
            dist: 100.0,
        };
        assert_eq!(state.spawn_projectile(fire), None);
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn kill_ship_is_idempotent() {
        let mut state = state();
        state.kill_ship();
        let death_time = state.ship.death_time;

        state.time_ms += 100.0;
        state.kill_ship();

        assert_eq!(state.ship.death_time, death_time);
        assert_eq!(
            state
                .events
                .iter()
                .filter(|e| **e == GameEvent::ShipDestroyed)
                .count(),
            1
        );
    }

    #[test]
    fn speed_multiplier_saturates_at_bounds() {
        let mut projectile = Projectile {
            id: 0,
            pos: Vec2::ZERO,
            vel: Vec2::new(1.0, 0.0),
            drag_dist: 20.0,
            life: PROJECTILE_LIFE_MS,
            created: 0.0,
        };
        // 400 / 100_000 is far below the floor
        assert_eq!(projectile.speed_multiplier(), SPEED_MULT_MIN);

        projectile.drag_dist = 200.0;
        // 40_000 / 100_000 lands inside the bounds
        assert!((projectile.speed_multiplier() - 0.4).abs() < 1e-6);

        projectile.drag_dist = 1000.0;
        assert_eq!(projectile.speed_multiplier(), SPEED_MULT_MAX);
    }

    #[test]
    fn reset_restores_fresh_session() {
        let mut state = state();
        state.score = 12;
        state.kill_ship();
        state.time_ms = 9999.0;
        state.begin_drag(Vec2::ZERO);

        state.reset(42);

        assert_eq!(state.seed, 42);
        assert_eq!(state.score, 0);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.time_ms, 0.0);
        assert_eq!(state.drag, DragGesture::Idle);
        assert!(state.ship.death_time.is_none());
        assert!(state.projectiles.is_empty());
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.width, SURFACE_WIDTH);
    }

    #[test]
    fn debris_factors_are_deterministic_per_seed() {
        let a = GameState::new(800.0, 600.0, 5);
        let b = GameState::new(800.0, 600.0, 5);
        let c = GameState::new(800.0, 600.0, 6);
        assert_eq!(a.debris_factors, b.debris_factors);
        assert_ne!(a.debris_factors, c.debris_factors);
        assert!(a.debris_factors.iter().all(|f| (-1.0..1.0).contains(f)));
    }
}
