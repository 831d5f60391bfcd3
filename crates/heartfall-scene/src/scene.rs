//! The particle scene: state, tick driver and rendering.

use std::time::{SystemTime, UNIX_EPOCH};

use heartfall_core::{SceneSettings, Surface, Viewport};
use log::{debug, info, trace};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;

use crate::particle::{BackgroundHeart, Bounds, FallingHeart, MiniHeart, Particle, Rose};
use crate::shapes;
use crate::spawn::SpawnScheduler;

/// Falling hearts over a field of static hearts and roses.
#[derive(Debug, Clone)]
pub struct ParticleScene<R = Pcg64Mcg> {
    settings: SceneSettings,
    viewport: Viewport,
    /// Height of the ground band, measured from the first viewport unless
    /// `recompute_ground_on_resize` is set.
    ground_height: f32,
    background_hearts: Vec<BackgroundHeart>,
    roses: Vec<Rose>,
    hearts: Vec<FallingHeart>,
    mini_hearts: Vec<MiniHeart>,
    scheduler: SpawnScheduler,
    rng: R,
}

impl ParticleScene<Pcg64Mcg> {
    /// Create a scene seeded from the system clock.
    pub fn new(viewport: Viewport, settings: SceneSettings) -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);
        Self::with_seed(viewport, settings, seed)
    }

    /// Create a scene with a fixed seed.
    pub fn with_seed(viewport: Viewport, settings: SceneSettings, seed: u64) -> Self {
        info!("Seeded scene RNG with {seed}");
        Self::with_rng(viewport, settings, Pcg64Mcg::seed_from_u64(seed))
    }
}

impl<R: Rng> ParticleScene<R> {
    /// Create a scene drawing randomness from `rng`, and initialize it.
    pub fn with_rng(viewport: Viewport, settings: SceneSettings, rng: R) -> Self {
        let mut scene = Self {
            ground_height: settings.ground_fraction * viewport.height,
            scheduler: SpawnScheduler::from_settings(&settings),
            settings,
            viewport,
            background_hearts: Vec::new(),
            roses: Vec::new(),
            hearts: Vec::new(),
            mini_hearts: Vec::new(),
            rng,
        };
        scene.init();
        scene
    }

    /// Drop every particle and regenerate the static decorations.
    pub fn init(&mut self) {
        self.hearts.clear();
        self.mini_hearts.clear();

        let viewport = self.viewport;
        let rng = &mut self.rng;
        self.background_hearts = (0..self.settings.background_hearts)
            .map(|_| BackgroundHeart::random(viewport, rng))
            .collect();
        self.roses = (0..self.settings.roses)
            .map(|_| Rose::random(viewport, rng))
            .collect();

        info!(
            "Scene initialized at {}x{}: {} background hearts, {} roses",
            viewport.width,
            viewport.height,
            self.background_hearts.len(),
            self.roses.len()
        );
    }

    /// Adopt a new viewport and rebuild the scene for it.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        if self.settings.recompute_ground_on_resize {
            self.ground_height = self.settings.ground_fraction * viewport.height;
        }
        self.init();
    }

    /// One animation frame.
    ///
    /// Decorations are drawn over the backdrop, then every falling heart and
    /// every fragment is drawn and stepped in turn. Fragments burst during
    /// this frame are drawn at their origin before they first move. Spent
    /// particles are pruned afterwards and a new heart spawns when one is due.
    pub fn tick<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        let bounds = self.bounds();
        self.draw_decorations(surface);

        for heart in &mut self.hearts {
            Particle::FallingHeart(heart).draw(surface, &mut self.rng);
            if let Some(shatter) = heart.step(&bounds) {
                trace!(
                    "Heart shattered at ({:.1}, {:.1}), size now {}",
                    shatter.origin.x, shatter.origin.y, heart.size
                );
                for _ in 0..shatter.fragments() {
                    self.mini_hearts
                        .push(MiniHeart::burst(shatter.origin, &mut self.rng));
                }
            }
        }

        for mini in &mut self.mini_hearts {
            Particle::MiniHeart(mini).draw(surface, &mut self.rng);
            mini.step(&bounds);
        }

        self.hearts.retain(|heart| !heart.is_spent());
        self.mini_hearts.retain(|mini| !mini.is_expired());

        if self.scheduler.advance() {
            self.spawn_heart();
            self.scheduler.reschedule(&mut self.rng);
        }
    }

    /// Draw the current state without advancing it.
    pub fn render<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        self.draw_decorations(surface);
        let moving = self
            .hearts
            .iter()
            .map(Particle::FallingHeart)
            .chain(self.mini_hearts.iter().map(Particle::MiniHeart));
        for particle in moving {
            particle.draw(surface, &mut self.rng);
        }
    }

    /// Backdrop, background hearts and roses.
    fn draw_decorations<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        shapes::paint_backdrop(surface);
        let decorations = self
            .background_hearts
            .iter()
            .map(Particle::BackgroundHeart)
            .chain(self.roses.iter().map(Particle::Rose));
        for particle in decorations {
            particle.draw(surface, &mut self.rng);
        }
    }

    /// Add a falling heart just above the viewport at a random column.
    fn spawn_heart(&mut self) {
        let size = self.settings.heart_size;
        let column = if self.viewport.width > 0.0 {
            self.rng.gen_range(0.0..self.viewport.width)
        } else {
            0.0
        };
        let heart = FallingHeart::spawn((column - size).max(size), size, &mut self.rng);
        debug!(
            "Spawned heart at x={:.1} on tick {}",
            heart.position.x,
            self.scheduler.counter()
        );
        self.hearts.push(heart);
    }

    /// Insert a falling heart directly.
    pub fn add_heart(&mut self, heart: FallingHeart) {
        self.hearts.push(heart);
    }

    /// Edges moving particles bounce against.
    pub fn bounds(&self) -> Bounds {
        Bounds {
            width: self.viewport.width,
            ground_line: self.ground_line(),
        }
    }

    /// Vertical position of the ground.
    pub fn ground_line(&self) -> f32 {
        self.viewport.height - self.ground_height
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn scheduler(&self) -> &SpawnScheduler {
        &self.scheduler
    }

    pub fn background_hearts(&self) -> &[BackgroundHeart] {
        &self.background_hearts
    }

    pub fn roses(&self) -> &[Rose] {
        &self.roses
    }

    pub fn hearts(&self) -> &[FallingHeart] {
        &self.hearts
    }

    pub fn mini_hearts(&self) -> &[MiniHeart] {
        &self.mini_hearts
    }

    /// Every particle in draw order.
    pub fn particles(&self) -> impl Iterator<Item = Particle<'_>> {
        chain_particles(
            &self.background_hearts,
            &self.roses,
            &self.hearts,
            &self.mini_hearts,
        )
    }
}

fn chain_particles<'a>(
    background_hearts: &'a [BackgroundHeart],
    roses: &'a [Rose],
    hearts: &'a [FallingHeart],
    mini_hearts: &'a [MiniHeart],
) -> impl Iterator<Item = Particle<'a>> {
    background_hearts
        .iter()
        .map(Particle::BackgroundHeart)
        .chain(roses.iter().map(Particle::Rose))
        .chain(hearts.iter().map(Particle::FallingHeart))
        .chain(mini_hearts.iter().map(Particle::MiniHeart))
}
