//! Particle variants and their per-tick physics.

use glam::Vec2;
use heartfall_core::{Rgba, Surface, Viewport};
use rand::Rng;

use crate::shapes;

/// Downward acceleration of a falling heart, per tick squared.
pub const HEART_GRAVITY: f32 = 1.0;
/// Downward acceleration of a shatter fragment, per tick squared.
pub const MINI_HEART_GRAVITY: f32 = 0.1;
/// Velocity retained (and inverted) on every bounce.
pub const FRICTION: f32 = 0.8;
/// Size lost by a falling heart on every shatter.
pub const SHATTER_SHRINK: f32 = 3.0;
/// Fragments emitted per shatter.
pub const SHATTER_FRAGMENTS: usize = 8;
/// Size of a shatter fragment.
pub const MINI_HEART_SIZE: f32 = 2.0;
/// Ticks a shatter fragment lives.
pub const MINI_HEART_TTL: u32 = 100;

/// Opacity lost per tick, scaled by the remaining ttl.
const OPACITY_DECAY: f32 = 0.0001;

/// Pink used for falling hearts.
pub(crate) const HEART_PINK: Rgba = Rgba::rgb(0xFF, 0xD1, 0xDC);

/// Edges a moving particle bounces against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Right edge. The left edge is always 0.
    pub width: f32,
    /// Vertical position of the ground.
    pub ground_line: f32,
}

/// A static white heart drawn behind everything else.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackgroundHeart {
    pub position: Vec2,
    pub size: f32,
}

impl BackgroundHeart {
    pub const COLOR: Rgba = Rgba::WHITE;

    /// Heart at a uniformly random spot in the viewport with size in [0, 5).
    pub fn random<R: Rng>(viewport: Viewport, rng: &mut R) -> Self {
        Self {
            position: random_point(viewport, rng),
            size: rng.gen_range(0.0..5.0),
        }
    }
}

/// A static rose drawn as a cluster of translucent circles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rose {
    pub position: Vec2,
    pub size: f32,
    pub opacity: f32,
}

impl Rose {
    /// Rose at a uniformly random spot with size in [5, 15) and opacity in
    /// [0.4, 1.0).
    pub fn random<R: Rng>(viewport: Viewport, rng: &mut R) -> Self {
        let position = random_point(viewport, rng);
        let size = rng.gen_range(5.0..15.0);
        Self {
            position,
            size,
            opacity: rng.gen_range(0.4..1.0),
        }
    }
}

/// Result of a tick in which a falling heart hit an edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shatter {
    /// Where the fragments burst from: the heart's position before it moved.
    pub origin: Vec2,
    /// Number of edges hit this tick (1 or 2).
    pub count: usize,
}

impl Shatter {
    /// Total number of fragments this shatter emits.
    pub fn fragments(&self) -> usize {
        self.count * SHATTER_FRAGMENTS
    }
}

/// A heart falling from the top of the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FallingHeart {
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: f32,
    pub color: Rgba,
}

impl FallingHeart {
    pub fn new(position: Vec2, velocity: Vec2, size: f32, color: Rgba) -> Self {
        Self {
            position,
            velocity,
            size,
            color,
        }
    }

    /// Heart entering from above the viewport with a small sideways drift.
    pub fn spawn<R: Rng>(x: f32, size: f32, rng: &mut R) -> Self {
        let velocity = Vec2::new(rng.gen_range(-2.0..2.0), 3.0);
        Self::new(Vec2::new(x, -100.0), velocity, size, HEART_PINK)
    }

    /// Advance one tick: bounce off the ground and side walls, then move.
    ///
    /// Every edge hit shrinks the heart and is reported so the caller can
    /// emit fragments.
    pub fn step(&mut self, bounds: &Bounds) -> Option<Shatter> {
        let origin = self.position;
        let mut count = 0;

        if self.position.y + self.size + self.velocity.y > bounds.ground_line {
            self.velocity.y = -self.velocity.y * FRICTION;
            self.shatter();
            count += 1;
        } else {
            self.velocity.y += HEART_GRAVITY;
        }

        if self.position.x + self.size + self.velocity.x > bounds.width
            || self.position.x - self.size <= 0.0
        {
            self.velocity.x = -self.velocity.x * FRICTION;
            self.shatter();
            count += 1;
        }

        self.position += self.velocity;

        (count > 0).then_some(Shatter { origin, count })
    }

    /// Lose a fixed chunk of size.
    pub fn shatter(&mut self) {
        self.size -= SHATTER_SHRINK;
    }

    /// True once the heart has shattered away completely.
    pub fn is_spent(&self) -> bool {
        self.size <= 0.0
    }
}

/// A small fading fragment thrown out by a shatter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MiniHeart {
    pub position: Vec2,
    pub velocity: Vec2,
    pub ttl: u32,
    /// Not clamped; may drift below zero before the fragment expires.
    pub opacity: f32,
}

impl MiniHeart {
    pub fn new(position: Vec2, velocity: Vec2) -> Self {
        Self {
            position,
            velocity,
            ttl: MINI_HEART_TTL,
            opacity: 1.0,
        }
    }

    /// Fragment at `origin` flying off in a random direction.
    pub fn burst<R: Rng>(origin: Vec2, rng: &mut R) -> Self {
        let velocity = Vec2::new(rng.gen_range(-3.0..3.0), rng.gen_range(-3.0..3.0));
        Self::new(origin, velocity)
    }

    /// Current fill color.
    pub fn color(&self) -> Rgba {
        HEART_PINK.with_alpha(self.opacity)
    }

    /// Advance one tick: bounce off the ground, move, age and fade.
    pub fn step(&mut self, bounds: &Bounds) {
        if self.position.y + MINI_HEART_SIZE + self.velocity.y > bounds.ground_line {
            self.velocity.y = -self.velocity.y * FRICTION;
        } else {
            self.velocity.y += MINI_HEART_GRAVITY;
        }

        self.position += self.velocity;
        self.ttl = self.ttl.saturating_sub(1);
        self.opacity -= OPACITY_DECAY * self.ttl as f32;
    }

    pub fn is_expired(&self) -> bool {
        self.ttl == 0
    }
}

/// A borrowed view of any particle in the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Particle<'a> {
    BackgroundHeart(&'a BackgroundHeart),
    FallingHeart(&'a FallingHeart),
    MiniHeart(&'a MiniHeart),
    Rose(&'a Rose),
}

impl Particle<'_> {
    pub fn position(&self) -> Vec2 {
        match self {
            Particle::BackgroundHeart(heart) => heart.position,
            Particle::FallingHeart(heart) => heart.position,
            Particle::MiniHeart(heart) => heart.position,
            Particle::Rose(rose) => rose.position,
        }
    }

    pub fn size(&self) -> f32 {
        match self {
            Particle::BackgroundHeart(heart) => heart.size,
            Particle::FallingHeart(heart) => heart.size,
            Particle::MiniHeart(_) => MINI_HEART_SIZE,
            Particle::Rose(rose) => rose.size,
        }
    }

    /// Draw the particle. Roses consume randomness for their jitter.
    pub fn draw<S: Surface + ?Sized, R: Rng>(&self, surface: &mut S, rng: &mut R) {
        match self {
            Particle::BackgroundHeart(heart) => {
                shapes::fill_heart(surface, heart.position, heart.size, BackgroundHeart::COLOR)
            }
            Particle::FallingHeart(heart) => {
                shapes::fill_heart(surface, heart.position, heart.size, heart.color)
            }
            Particle::MiniHeart(heart) => {
                shapes::fill_heart(surface, heart.position, MINI_HEART_SIZE, heart.color())
            }
            Particle::Rose(rose) => {
                shapes::fill_rose(surface, rose.position, rose.size, rose.opacity, rng)
            }
        }
    }
}

fn random_point<R: Rng>(viewport: Viewport, rng: &mut R) -> Vec2 {
    Vec2::new(
        sample_below(viewport.width, rng),
        sample_below(viewport.height, rng),
    )
}

/// Uniform sample in [0, limit), or 0 for a degenerate limit.
fn sample_below<R: Rng>(limit: f32, rng: &mut R) -> f32 {
    if limit > 0.0 {
        rng.gen_range(0.0..limit)
    } else {
        0.0
    }
}
