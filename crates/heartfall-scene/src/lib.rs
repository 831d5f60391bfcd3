//! Falling hearts and roses particle scene.
//!
//! The scene keeps four flat particle collections (background hearts,
//! roses, falling hearts and shatter fragments), advances their physics
//! once per tick and draws them onto any [`heartfall_core::Surface`].

mod particle;
mod scene;
pub mod shapes;
mod spawn;

pub use particle::{
    BackgroundHeart, Bounds, FRICTION, FallingHeart, HEART_GRAVITY, MINI_HEART_GRAVITY,
    MINI_HEART_SIZE, MINI_HEART_TTL, MiniHeart, Particle, Rose, SHATTER_FRAGMENTS, SHATTER_SHRINK,
    Shatter,
};
pub use scene::ParticleScene;
pub use spawn::{SpawnScheduler, TICK_WRAP};
