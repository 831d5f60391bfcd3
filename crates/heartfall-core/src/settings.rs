//! Scene tuning settings.

use serde::{Deserialize, Serialize};

/// Tunables for the particle scene. Defaults reproduce the classic look.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneSettings {
    /// Number of static background hearts created per initialization.
    pub background_hearts: usize,
    /// Number of static roses created per initialization.
    pub roses: usize,
    /// Size of each newly spawned falling heart.
    pub heart_size: f32,
    /// Spawn interval in ticks before the first spawn.
    pub initial_spawn_interval: u32,
    /// Lower bound (inclusive) of the redrawn spawn interval.
    pub spawn_interval_min: u32,
    /// Upper bound (inclusive) of the redrawn spawn interval.
    pub spawn_interval_max: u32,
    /// Height of the ground band as a fraction of the viewport height.
    pub ground_fraction: f32,
    /// Recompute the ground line when the viewport is resized.
    ///
    /// Off by default: the ground line is measured once from the first
    /// viewport and kept for the lifetime of the scene.
    pub recompute_ground_on_resize: bool,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            background_hearts: 200,
            roses: 50,
            heart_size: 12.0,
            initial_spawn_interval: 75,
            spawn_interval_min: 125,
            spawn_interval_max: 200,
            ground_fraction: 0.09,
            recompute_ground_on_resize: false,
        }
    }
}
