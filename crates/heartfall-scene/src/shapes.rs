//! Shape drawing helpers shared by the particle variants.

use std::f32::consts::TAU;

use glam::Vec2;
use heartfall_core::{LinearGradient, Paint, Rgba, Shadow, Surface};
use rand::Rng;

/// Backdrop color in the top-left corner.
pub const BACKDROP_TOP: Rgba = Rgba::rgb(0x1A, 0x43, 0xBF);
/// Backdrop color in the bottom-right corner.
pub const BACKDROP_BOTTOM: Rgba = Rgba::rgb(0x0A, 0x24, 0x72);

/// Navy glow behind every heart.
pub const HEART_SHADOW: Shadow = Shadow::new(Rgba::rgb(0x00, 0x00, 0x80), 20.0);
/// Soft white glow behind every rose.
pub const ROSE_SHADOW: Shadow = Shadow::new(Rgba::new(255, 255, 255, 0.7), 10.0);

/// Circles per rose cluster.
pub const ROSE_PETALS: usize = 5;

/// Clear the surface and paint the diagonal backdrop gradient over it.
pub fn paint_backdrop<S: Surface + ?Sized>(surface: &mut S) {
    let (width, height) = (surface.width(), surface.height());
    surface.clear_rect(0.0, 0.0, width, height);
    surface.save();
    surface.set_fill_paint(Paint::LinearGradient(LinearGradient::two_stop(
        Vec2::ZERO,
        Vec2::new(width, height),
        BACKDROP_TOP,
        BACKDROP_BOTTOM,
    )));
    surface.fill_rect(0.0, 0.0, width, height);
    surface.restore();
}

/// Build the heart outline anchored at its top notch.
///
/// Two mirrored cubic Béziers run from the anchor down to the tip at
/// `anchor + (0, size)` and back.
pub fn heart_outline<S: Surface + ?Sized>(surface: &mut S, anchor: Vec2, size: f32) {
    let Vec2 { x, y } = anchor;
    surface.move_to(anchor);
    surface.bezier_curve_to(
        Vec2::new(x - size / 2.0, y - size / 2.0),
        Vec2::new(x - size, y + size / 3.0),
        Vec2::new(x, y + size),
    );
    surface.bezier_curve_to(
        Vec2::new(x + size, y + size / 3.0),
        Vec2::new(x + size / 2.0, y - size / 2.0),
        anchor,
    );
}

/// Fill a glowing heart.
pub fn fill_heart<S: Surface + ?Sized>(surface: &mut S, anchor: Vec2, size: f32, color: Rgba) {
    surface.save();
    surface.begin_path();
    heart_outline(surface, anchor, size);
    surface.set_fill_paint(color.into());
    surface.set_shadow(HEART_SHADOW);
    surface.fill();
    surface.close_path();
    surface.restore();
}

/// Fill a rose as a cluster of circles jittered afresh on every call.
pub fn fill_rose<S: Surface + ?Sized, R: Rng>(
    surface: &mut S,
    center: Vec2,
    size: f32,
    opacity: f32,
    rng: &mut R,
) {
    surface.save();
    surface.begin_path();
    for _ in 0..ROSE_PETALS {
        let offset = Vec2::new(jitter(size, rng), jitter(size, rng));
        surface.arc(center + offset, size / 3.0, 0.0, TAU);
    }
    surface.set_fill_paint(Rgba::WHITE.with_alpha(opacity).into());
    surface.set_shadow(ROSE_SHADOW);
    surface.fill();
    surface.close_path();
    surface.restore();
}

/// Uniform offset in [-size/2, size/2).
fn jitter<R: Rng>(size: f32, rng: &mut R) -> f32 {
    if size > 0.0 {
        rng.gen_range(-0.5..0.5) * size
    } else {
        0.0
    }
}
