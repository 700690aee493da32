//! Circle targets
//!
//! A circle bounces around the window until it is clicked, then shrinks
//! away while still bouncing.

use glam::Vec2;
use rand::Rng;

use crate::consts::{HEIGHT, OUTLINE_COLOR, POP_END_RADIUS, WIDTH};
use crate::render::{Canvas, Color};
use crate::settings::Settings;

/// What happened to a circle during its draw step
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fate {
    Alive,
    /// Finished popping; the owning collection must drop it
    Destroyed,
}

/// A moving, poppable disc
#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    pub id: u32,
    pub pos: Vec2,
    /// Displacement per tick at multiplier 1.0
    pub vel: Vec2,
    pub radius: f32,
    pub color: Color,
    /// Set once clicked, never cleared
    pub popping: bool,
    /// Radius lost per frame while popping
    pub pop_speed: f32,
}

impl Circle {
    /// Create a circle with random size, position, color and heading.
    ///
    /// The disc always starts fully inside the window.
    pub fn spawn<R: Rng>(id: u32, rng: &mut R, settings: &Settings) -> Self {
        let radius = rng.random_range(settings.min_radius..=settings.max_radius);
        let pos = Vec2::new(
            rng.random_range(radius..=WIDTH - radius),
            rng.random_range(radius..=HEIGHT - radius),
        );
        let color = Color::new(
            rng.random_range(settings.min_channel..=u8::MAX),
            rng.random_range(settings.min_channel..=u8::MAX),
            rng.random_range(settings.min_channel..=u8::MAX),
        );
        let speed = rng.random_range(settings.min_speed..=settings.max_speed);
        let angle = rng.random_range(0.0..std::f32::consts::TAU);

        Self {
            id,
            pos,
            vel: Vec2::from_angle(angle) * speed,
            radius,
            color,
            popping: false,
            pop_speed: settings.pop_speed,
        }
    }

    /// Advance by one tick, scaled by the global speed multiplier, and
    /// reflect off the window edges.
    ///
    /// Axes are handled independently, so a corner hit flips both velocity
    /// components in the same tick.
    pub fn move_by(&mut self, multiplier: f64) {
        self.pos += self.vel * multiplier as f32;
        bounce_axis(&mut self.pos.x, &mut self.vel.x, self.radius, WIDTH);
        bounce_axis(&mut self.pos.y, &mut self.vel.y, self.radius, HEIGHT);
    }

    /// True if `point` lies inside the disc or exactly on its edge
    pub fn is_clicked(&self, point: Vec2) -> bool {
        self.pos.distance(point) <= self.radius
    }

    /// Start the pop animation
    pub fn pop(&mut self) {
        self.popping = true;
    }

    /// Draw one frame.
    ///
    /// A popping circle shrinks by `pop_speed` first; once its radius falls
    /// below [`POP_END_RADIUS`] nothing is drawn and [`Fate::Destroyed`] is
    /// returned.
    pub fn draw(&mut self, canvas: &mut dyn Canvas) -> Fate {
        if !self.popping {
            canvas.filled_circle(self.pos, self.radius, self.color);
            canvas.circle(self.pos, self.radius, OUTLINE_COLOR);
            return Fate::Alive;
        }

        self.radius -= self.pop_speed;
        if self.radius < POP_END_RADIUS {
            return Fate::Destroyed;
        }

        canvas.filled_circle(self.pos, self.radius, self.color);
        Fate::Alive
    }
}

/// Clamp one coordinate to `[radius, extent - radius]`, flipping its
/// velocity when a wall is crossed
#[inline]
fn bounce_axis(pos: &mut f32, vel: &mut f32, radius: f32, extent: f32) {
    if *pos > extent - radius {
        *pos = extent - radius;
        *vel = -*vel;
    } else if *pos < radius {
        *pos = radius;
        *vel = -*vel;
    }
}
