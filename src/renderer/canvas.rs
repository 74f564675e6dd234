//! Frame drawing against a `CanvasRenderingContext2d`
//!
//! Purely cosmetic: jitter and colors come from the renderer's own RNG stream
//! so visual noise can never perturb the simulation.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use web_sys::CanvasRenderingContext2d;

use crate::consts::*;
use crate::sim::{DragGesture, GamePhase, GameState};

/// Size of the ship triangle (px from nose to center)
const SHIP_SIZE: f64 = 20.0;
/// Projectile dot radius (px)
const PROJECTILE_DRAW_RADIUS: f64 = 5.0;

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    rng: Pcg32,
    /// Draw the in-progress drag gesture as a circle-and-line
    pub show_drag_overlay: bool,
}

impl CanvasRenderer {
    pub fn new(ctx: CanvasRenderingContext2d, seed: u64) -> Self {
        Self {
            ctx,
            rng: Pcg32::seed_from_u64(seed),
            show_drag_overlay: true,
        }
    }

    /// Clear the surface and redraw the whole frame
    pub fn render(&mut self, state: &GameState) {
        self.ctx
            .clear_rect(0.0, 0.0, f64::from(state.width), f64::from(state.height));

        match state.phase {
            GamePhase::Playing => self.draw_ship(state),
            GamePhase::GameOver => self.draw_debris(state),
        }

        if self.show_drag_overlay {
            self.draw_drag_overlay(state);
        }

        for projectile in &state.projectiles {
            let pos = projectile.pos + self.jitter(1.0);
            self.fill_circle(pos, PROJECTILE_DRAW_RADIUS);
        }

        for enemy in &state.enemies {
            let pos = enemy.pos + self.jitter(2.0);
            self.fill_circle(pos, f64::from(ENEMY_RADIUS));
        }
    }

    /// Uniform offset in (-threshold, threshold) on both axes
    fn jitter(&mut self, threshold: f32) -> Vec2 {
        Vec2::new(
            self.rng.random_range(-threshold..threshold),
            self.rng.random_range(-threshold..threshold),
        )
    }

    /// A filled circle in a fresh random hue each frame
    fn fill_circle(&mut self, pos: Vec2, radius: f64) {
        let hue: f32 = self.rng.random_range(0.0..360.0);
        self.ctx.begin_path();
        let _ = self.ctx.arc(
            f64::from(pos.x),
            f64::from(pos.y),
            radius,
            0.0,
            std::f64::consts::TAU,
        );
        self.ctx
            .set_fill_style_str(&format!("hsl({hue:.0}, 100%, 50%)"));
        self.ctx.fill();
    }

    /// Stroked triangle rotated to the ship's facing angle
    fn draw_ship(&self, state: &GameState) {
        let ship = &state.ship;

        self.ctx.save();
        let _ = self
            .ctx
            .translate(f64::from(ship.pos.x), f64::from(ship.pos.y));
        let _ = self.ctx.rotate(f64::from(ship.angle));

        self.ctx.begin_path();
        self.ctx.set_line_width(2.0);
        self.ctx.move_to(SHIP_SIZE, 0.0);
        self.ctx.line_to(-SHIP_SIZE / 2.0, SHIP_SIZE / 2.0);
        self.ctx.line_to(-SHIP_SIZE / 2.0, -SHIP_SIZE / 2.0);
        self.ctx.close_path();

        self.ctx.set_stroke_style_str("white");
        self.ctx.stroke();

        self.ctx.restore();
    }

    /// Expanding fragment burst at the ship's final position
    ///
    /// Each piece's transform chain is parameterized by the time since death
    /// and its fixed per-piece factor, so the pattern animates without any
    /// per-piece state.
    fn draw_debris(&self, state: &GameState) {
        let Some(death_time) = state.ship.death_time else {
            return;
        };
        let elapsed = (state.time_ms - death_time) as f64;
        let ship = &state.ship;

        for (i, factor) in state.debris_factors.iter().enumerate() {
            let v = f64::from(*factor);
            let i = i as f64;

            self.ctx.save();
            let _ = self
                .ctx
                .translate(f64::from(ship.pos.x), f64::from(ship.pos.y));
            let _ = self.ctx.rotate(10.0 * v * i + elapsed * 0.000_001);
            let _ = self.ctx.translate(0.0, 10.0 * elapsed * 0.001 + v * 10.0);
            let _ = self.ctx.rotate(i + elapsed * 0.003 * v);

            let size = 10.0 * v + 2.0;
            self.ctx.begin_path();
            self.ctx.set_stroke_style_str("white");
            self.ctx.set_line_width(2.0);
            self.ctx.move_to(size, 0.0);
            self.ctx.line_to(-size, 0.0);
            self.ctx.close_path();
            self.ctx.stroke();

            self.ctx.restore();
        }
    }

    /// Circle at the drag start plus a line to the last known point
    fn draw_drag_overlay(&self, state: &GameState) {
        let DragGesture::Active {
            start,
            last: Some(last),
        } = state.drag
        else {
            return;
        };

        self.ctx.set_stroke_style_str("red");
        self.ctx.begin_path();
        let _ = self.ctx.arc(
            f64::from(start.x),
            f64::from(start.y),
            10.0,
            0.0,
            std::f64::consts::TAU,
        );
        self.ctx.stroke();

        self.ctx.begin_path();
        self.ctx.move_to(f64::from(start.x), f64::from(start.y));
        self.ctx.line_to(f64::from(last.x), f64::from(last.y));
        self.ctx.stroke();
    }
}
