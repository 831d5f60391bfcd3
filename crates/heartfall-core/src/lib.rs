//! Core types shared by the heartfall crates.
//!
//! This crate holds the color and viewport types, the scene tuning
//! settings, and the [`Surface`] contract every renderer implements.

mod color;
mod recording;
mod settings;
mod surface;
mod viewport;

pub use color::{ColorStop, Rgba};
pub use recording::{DrawCommand, NullSurface, RecordingSurface};
pub use settings::SceneSettings;
pub use surface::{LinearGradient, Paint, Shadow, Surface};
pub use viewport::Viewport;
