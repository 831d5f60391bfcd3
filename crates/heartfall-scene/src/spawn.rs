//! Tick counter that decides when a new falling heart appears.

use std::ops::RangeInclusive;

use heartfall_core::SceneSettings;
use rand::Rng;

/// The tick counter wraps back to zero on reaching this value.
pub const TICK_WRAP: u64 = 1_000_000_000;

/// Spawns on every tick whose counter is a multiple of the current
/// interval; the interval is redrawn after each spawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnScheduler {
    counter: u64,
    interval: u32,
    range: RangeInclusive<u32>,
}

impl SpawnScheduler {
    /// Zero-length intervals are raised to 1, and an inverted range is
    /// collapsed onto its lower bound.
    pub fn new(initial_interval: u32, range: RangeInclusive<u32>) -> Self {
        let min = (*range.start()).max(1);
        let max = (*range.end()).max(min);
        Self {
            counter: 0,
            interval: initial_interval.max(1),
            range: min..=max,
        }
    }

    pub fn from_settings(settings: &SceneSettings) -> Self {
        Self::new(
            settings.initial_spawn_interval,
            settings.spawn_interval_min..=settings.spawn_interval_max,
        )
    }

    /// Count one tick. Returns true when a heart is due.
    pub fn advance(&mut self) -> bool {
        self.counter += 1;
        if self.counter >= TICK_WRAP {
            self.counter = 0;
        }
        self.counter % u64::from(self.interval) == 0
    }

    /// Draw the interval until the next spawn.
    pub fn reschedule<R: Rng>(&mut self, rng: &mut R) {
        self.interval = rng.gen_range(self.range.clone());
    }

    /// Ticks counted since the last wrap.
    pub fn counter(&self) -> u64 {
        self.counter
    }

    /// Current spawn interval.
    pub fn interval(&self) -> u32 {
        self.interval
    }

    /// Range intervals are redrawn from.
    pub fn range(&self) -> &RangeInclusive<u32> {
        &self.range
    }
}

impl Default for SpawnScheduler {
    fn default() -> Self {
        Self::from_settings(&SceneSettings::default())
    }
}
