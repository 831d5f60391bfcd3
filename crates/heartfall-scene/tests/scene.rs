use glam::Vec2;
use heartfall_core::{
    DrawCommand, NullSurface, Paint, RecordingSurface, Rgba, SceneSettings, Surface, Viewport,
};
use heartfall_scene::{
    FallingHeart, MINI_HEART_TTL, ParticleScene, SHATTER_FRAGMENTS, shapes::ROSE_PETALS,
};

/// Settings with no decorations, so only moving particles are drawn.
fn bare_settings() -> SceneSettings {
    SceneSettings {
        background_hearts: 0,
        roses: 0,
        ..quiet_settings()
    }
}

fn moves_to(surface: &RecordingSurface, point: Vec2) -> usize {
    surface.count(|c| *c == DrawCommand::MoveTo(point))
}

fn fragment_alphas(surface: &RecordingSurface) -> Vec<f32> {
    surface
        .commands()
        .iter()
        .filter_map(|c| match c {
            DrawCommand::SetFillPaint(Paint::Solid(color))
                if (color.r, color.g, color.b) == (0xFF, 0xD1, 0xDC) =>
            {
                Some(color.a)
            }
            _ => None,
        })
        .collect()
}

const VIEWPORT: Viewport = Viewport::new(800.0, 600.0);

/// Settings that keep the spawner quiet for the length of a test.
fn quiet_settings() -> SceneSettings {
    SceneSettings {
        initial_spawn_interval: 1_000_000,
        ..SceneSettings::default()
    }
}

fn step(scene: &mut ParticleScene, ticks: usize) {
    let mut surface = NullSurface::new(VIEWPORT.width, VIEWPORT.height);
    for _ in 0..ticks {
        scene.tick(&mut surface);
    }
}

#[test]
fn test_init_populates_decorations_inside_viewport() {
    let scene = ParticleScene::with_seed(VIEWPORT, SceneSettings::default(), 1);

    assert_eq!(scene.background_hearts().len(), 200);
    assert_eq!(scene.roses().len(), 50);
    assert!(scene.hearts().is_empty());
    assert!(scene.mini_hearts().is_empty());

    for particle in scene.particles() {
        let position = particle.position();
        assert!((0.0..800.0).contains(&position.x));
        assert!((0.0..600.0).contains(&position.y));
        assert!((0.0..15.0).contains(&particle.size()));
    }
}

#[test]
fn test_single_tick_on_fresh_scene() {
    let mut scene = ParticleScene::with_seed(VIEWPORT, SceneSettings::default(), 5);
    step(&mut scene, 1);

    assert!(scene.hearts().is_empty());
    assert!(scene.mini_hearts().is_empty());
    assert_eq!(scene.background_hearts().len(), 200);
    assert_eq!(scene.scheduler().counter(), 1);
}

#[test]
fn test_first_heart_spawns_on_tick_75() {
    let mut scene = ParticleScene::with_seed(VIEWPORT, SceneSettings::default(), 9);
    step(&mut scene, 74);
    assert!(scene.hearts().is_empty());

    step(&mut scene, 1);
    assert_eq!(scene.hearts().len(), 1);
    let heart = scene.hearts()[0];
    assert_eq!(heart.position.y, -100.0);
    assert_eq!(heart.size, 12.0);
    assert!(heart.position.x >= 12.0);
    assert!((125..=200).contains(&scene.scheduler().interval()));
}

#[test]
fn test_shatter_emits_fragments_that_expire_on_time() {
    let mut scene = ParticleScene::with_seed(VIEWPORT, quiet_settings(), 3);
    let ground = scene.ground_line();
    scene.add_heart(FallingHeart::new(
        Vec2::new(400.0, ground - 5.0),
        Vec2::new(0.0, 10.0),
        3.0,
        Rgba::WHITE,
    ));

    step(&mut scene, 1);
    // A size-3 heart is gone after a single shatter.
    assert!(scene.hearts().is_empty());
    assert_eq!(scene.mini_hearts().len(), SHATTER_FRAGMENTS);
    assert!(scene.mini_hearts().iter().all(|m| m.ttl == MINI_HEART_TTL - 1));

    step(&mut scene, (MINI_HEART_TTL - 2) as usize);
    assert_eq!(scene.mini_hearts().len(), SHATTER_FRAGMENTS);
    assert!(scene.mini_hearts().iter().all(|m| m.ttl == 1));

    step(&mut scene, 1);
    assert!(scene.mini_hearts().is_empty());
}

#[test]
fn test_fragments_drawn_at_burst_origin_on_shatter_frame() {
    let mut scene = ParticleScene::with_seed(VIEWPORT, bare_settings(), 8);
    let ground = scene.ground_line();
    let origin = Vec2::new(400.0, ground - 15.0);
    scene.add_heart(FallingHeart::new(
        origin,
        Vec2::new(0.0, 10.0),
        12.0,
        Rgba::WHITE,
    ));

    let mut frame = RecordingSurface::new(VIEWPORT.width, VIEWPORT.height);
    scene.tick(&mut frame);

    assert_eq!(scene.mini_hearts().len(), SHATTER_FRAGMENTS);
    // The heart itself plus every fragment, all anchored at the origin.
    assert_eq!(moves_to(&frame, origin), 1 + SHATTER_FRAGMENTS);
    assert_eq!(frame.count(|c| matches!(c, DrawCommand::Fill)), 1 + SHATTER_FRAGMENTS);
    assert!(scene.mini_hearts().iter().all(|m| m.ttl == MINI_HEART_TTL - 1));

    let mut next = RecordingSurface::new(VIEWPORT.width, VIEWPORT.height);
    scene.tick(&mut next);
    assert_eq!(next.count(|c| matches!(c, DrawCommand::Fill)), 1 + SHATTER_FRAGMENTS);
}

#[test]
fn test_fragment_fill_carries_decayed_opacity() {
    let mut scene = ParticleScene::with_seed(VIEWPORT, bare_settings(), 10);
    let ground = scene.ground_line();
    scene.add_heart(FallingHeart::new(
        Vec2::new(400.0, ground - 5.0),
        Vec2::new(0.0, 10.0),
        3.0,
        Rgba::WHITE,
    ));

    let mut frame = RecordingSurface::new(VIEWPORT.width, VIEWPORT.height);
    scene.tick(&mut frame);
    let fresh = fragment_alphas(&frame);
    assert_eq!(fresh.len(), SHATTER_FRAGMENTS);
    assert!(fresh.iter().all(|&a| a == 1.0));

    step(&mut scene, 4);
    let mut frame = RecordingSurface::new(VIEWPORT.width, VIEWPORT.height);
    scene.tick(&mut frame);
    let faded = fragment_alphas(&frame);
    assert_eq!(faded.len(), SHATTER_FRAGMENTS);
    // 1 - 0.0001 * (99 + 98 + 97 + 96 + 95)
    for alpha in faded {
        assert!(alpha < 1.0);
        assert!((alpha - 0.9515).abs() < 1e-4);
    }
}

#[test]
fn test_heart_removed_after_four_shatters() {
    let mut scene = ParticleScene::with_seed(VIEWPORT, quiet_settings(), 4);
    scene.add_heart(FallingHeart::new(
        Vec2::new(400.0, 300.0),
        Vec2::ZERO,
        12.0,
        Rgba::WHITE,
    ));

    let mut emitted = 0;
    let mut ticks = 0;
    while !scene.hearts().is_empty() && ticks < 10_000 {
        let before = scene.mini_hearts().len();
        let expiring = scene.mini_hearts().iter().filter(|m| m.ttl == 1).count();
        step(&mut scene, 1);
        emitted += scene.mini_hearts().len() + expiring - before;
        ticks += 1;
    }

    assert!(scene.hearts().is_empty());
    assert_eq!(emitted, 4 * SHATTER_FRAGMENTS);
}

#[test]
fn test_resize_rebuilds_scene_and_keeps_ground_line() {
    let mut scene = ParticleScene::with_seed(VIEWPORT, SceneSettings::default(), 6);
    let ground_before = scene.ground_line();
    assert!((ground_before - 546.0).abs() < 1e-3);
    scene.add_heart(FallingHeart::new(
        Vec2::new(100.0, 100.0),
        Vec2::ZERO,
        12.0,
        Rgba::WHITE,
    ));

    scene.resize(Viewport::new(400.0, 300.0));

    assert!(scene.hearts().is_empty());
    assert_eq!(scene.background_hearts().len(), 200);
    assert_eq!(scene.roses().len(), 50);
    assert!(
        scene
            .background_hearts()
            .iter()
            .all(|h| h.position.x < 400.0 && h.position.y < 300.0)
    );
    // Ground band height is kept from the first viewport: 300 - 54.
    assert!((scene.ground_line() - 246.0).abs() < 1e-3);
}

#[test]
fn test_resize_can_recompute_ground_line() {
    let settings = SceneSettings {
        recompute_ground_on_resize: true,
        ..SceneSettings::default()
    };
    let mut scene = ParticleScene::with_seed(VIEWPORT, settings, 6);
    scene.resize(Viewport::new(400.0, 300.0));
    assert!((scene.ground_line() - 273.0).abs() < 1e-3);
}

#[test]
fn test_custom_counts_are_honored() {
    let settings = SceneSettings {
        background_hearts: 7,
        roses: 2,
        ..SceneSettings::default()
    };
    let scene = ParticleScene::with_seed(VIEWPORT, settings, 8);
    assert_eq!(scene.background_hearts().len(), 7);
    assert_eq!(scene.roses().len(), 2);
    assert_eq!(scene.particles().count(), 9);
}

#[test]
fn test_render_command_stream() {
    let mut scene = ParticleScene::with_seed(VIEWPORT, SceneSettings::default(), 10);
    let mut surface = RecordingSurface::new(VIEWPORT.width, VIEWPORT.height);
    scene.tick(&mut surface);

    let commands = surface.commands();
    assert_eq!(
        commands[0],
        DrawCommand::ClearRect {
            x: 0.0,
            y: 0.0,
            width: 800.0,
            height: 600.0
        }
    );
    assert!(matches!(
        commands[2],
        DrawCommand::SetFillPaint(Paint::LinearGradient(_))
    ));

    let saves = surface.count(|c| matches!(c, DrawCommand::Save));
    let restores = surface.count(|c| matches!(c, DrawCommand::Restore));
    assert_eq!(saves, restores);
    // Backdrop plus one bracket per particle.
    assert_eq!(saves, 1 + 200 + 50);

    let beziers = surface.count(|c| matches!(c, DrawCommand::BezierCurveTo { .. }));
    assert_eq!(beziers, 2 * 200);
    let arcs = surface.count(|c| matches!(c, DrawCommand::Arc { .. }));
    assert_eq!(arcs, ROSE_PETALS * 50);
}

#[test]
fn test_roses_jitter_between_frames() {
    let settings = SceneSettings {
        background_hearts: 0,
        roses: 1,
        ..SceneSettings::default()
    };
    let mut scene = ParticleScene::with_seed(VIEWPORT, settings, 12);
    let rose = scene.roses()[0];

    let mut first = RecordingSurface::new(VIEWPORT.width, VIEWPORT.height);
    let mut second = RecordingSurface::new(VIEWPORT.width, VIEWPORT.height);
    scene.render(&mut first);
    scene.render(&mut second);

    let arcs = |surface: &RecordingSurface| -> Vec<Vec2> {
        surface
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Arc { center, .. } => Some(*center),
                _ => None,
            })
            .collect()
    };
    assert_ne!(arcs(&first), arcs(&second));
    // The rose itself never moves.
    assert_eq!(scene.roses()[0], rose);
    assert_eq!(first.width(), 800.0);
}
