//! The immediate-mode drawing surface contract.
//!
//! The shape mirrors a 2D canvas context: paint state (fill paint and
//! shadow) is set, a path is built, and `fill` rasterizes it. State can be
//! pushed and popped with `save`/`restore`.

use glam::Vec2;

use crate::color::{ColorStop, Rgba};

/// A linear gradient between two points.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub start: Vec2,
    pub end: Vec2,
    /// Stops ordered by ascending offset.
    pub stops: Vec<ColorStop>,
}

impl LinearGradient {
    /// Gradient with two stops at the ends of the `start`..`end` axis.
    pub fn two_stop(start: Vec2, end: Vec2, from: Rgba, to: Rgba) -> Self {
        Self {
            start,
            end,
            stops: vec![ColorStop::new(0.0, from), ColorStop::new(1.0, to)],
        }
    }

    /// Color of the gradient at `point`.
    ///
    /// The point is projected onto the gradient axis; positions before the
    /// first stop or after the last take that stop's color.
    pub fn color_at(&self, point: Vec2) -> Rgba {
        let Some(first) = self.stops.first() else {
            return Rgba::TRANSPARENT;
        };
        let axis = self.end - self.start;
        let len_sq = axis.length_squared();
        let t = if len_sq > 0.0 {
            (point - self.start).dot(axis) / len_sq
        } else {
            0.0
        };

        if t <= first.offset {
            return first.color;
        }
        for pair in self.stops.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t <= b.offset {
                let span = b.offset - a.offset;
                let local = if span > 0.0 { (t - a.offset) / span } else { 1.0 };
                return a.color.lerp(b.color, local);
            }
        }
        self.stops.last().map(|s| s.color).unwrap_or(first.color)
    }
}

/// What a fill is painted with.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Rgba),
    LinearGradient(LinearGradient),
}

impl Paint {
    /// Paint color at `point`.
    pub fn color_at(&self, point: Vec2) -> Rgba {
        match self {
            Paint::Solid(color) => *color,
            Paint::LinearGradient(gradient) => gradient.color_at(point),
        }
    }
}

impl Default for Paint {
    fn default() -> Self {
        Paint::Solid(Rgba::BLACK)
    }
}

impl From<Rgba> for Paint {
    fn from(color: Rgba) -> Self {
        Paint::Solid(color)
    }
}

/// Drop shadow drawn beneath filled shapes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    pub color: Rgba,
    /// Blur amount in logical units. Zero gives a hard shadow.
    pub blur: f32,
}

impl Shadow {
    pub const NONE: Shadow = Shadow {
        color: Rgba::TRANSPARENT,
        blur: 0.0,
    };

    pub const fn new(color: Rgba, blur: f32) -> Self {
        Self { color, blur }
    }

    /// True when the shadow would not produce any pixels.
    pub fn is_none(&self) -> bool {
        self.color.is_transparent()
    }
}

impl Default for Shadow {
    fn default() -> Self {
        Shadow::NONE
    }
}

/// A 2D immediate-mode drawing surface.
pub trait Surface {
    /// Current width in logical units.
    fn width(&self) -> f32;

    /// Current height in logical units.
    fn height(&self) -> f32;

    /// Resize the surface. Contents are discarded.
    fn set_size(&mut self, width: f32, height: f32);

    /// Push the current paint state (fill paint and shadow).
    fn save(&mut self);

    /// Pop the paint state pushed by the matching `save`.
    fn restore(&mut self);

    /// Reset a rectangle to transparent black.
    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32);

    /// Fill a rectangle with the current fill paint.
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32);

    /// Discard the current path and start a new one.
    fn begin_path(&mut self);

    /// Start a new subpath at `point`.
    fn move_to(&mut self, point: Vec2);

    /// Append a cubic Bézier from the current point to `end`.
    fn bezier_curve_to(&mut self, control1: Vec2, control2: Vec2, end: Vec2);

    /// Append a circular arc. When a subpath is open the arc is connected to
    /// its current point by a straight line.
    fn arc(&mut self, center: Vec2, radius: f32, start_angle: f32, end_angle: f32);

    /// Close the current subpath.
    fn close_path(&mut self);

    /// Fill the current path with the nonzero winding rule.
    fn fill(&mut self);

    /// Set the paint used by `fill` and `fill_rect`.
    fn set_fill_paint(&mut self, paint: Paint);

    /// Set the shadow drawn under subsequent fills.
    fn set_shadow(&mut self, shadow: Shadow);
}
