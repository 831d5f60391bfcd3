//! Color types used by paints and shadows.

/// An sRGB color with straight (non-premultiplied) alpha.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Opacity, nominally 0.0 - 1.0. Values outside that range are kept
    /// as-is and clamped by [`Rgba::alpha`].
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0.0);

    /// Create a color from channels and opacity.
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create a fully opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Same color with a different opacity.
    pub const fn with_alpha(self, a: f32) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Opacity clamped to 0.0 - 1.0.
    pub fn alpha(&self) -> f32 {
        if self.a.is_nan() {
            return 0.0;
        }
        self.a.clamp(0.0, 1.0)
    }

    /// True when drawing with this color has no visible effect.
    pub fn is_transparent(&self) -> bool {
        self.alpha() == 0.0
    }

    /// Channels as linear 0.0 - 1.0 floats (alpha excluded).
    pub fn to_f32(&self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }

    /// Interpolate channel-wise between two colors.
    pub fn lerp(self, other: Rgba, t: f32) -> Rgba {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Rgba::new(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
            self.a + (other.a - self.a) * t,
        )
    }
}

/// A color pinned at an offset (0.0 - 1.0) along a gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub offset: f32,
    pub color: Rgba,
}

impl ColorStop {
    pub const fn new(offset: f32, color: Rgba) -> Self {
        Self { offset, color }
    }
}
