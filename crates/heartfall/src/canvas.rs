//! Software rasterizer implementing [`Surface`] over an RGB pixel grid.
//!
//! Paths are flattened into line segments in pixel space and filled with
//! the nonzero winding rule, sampling at pixel centers. Shadows are a
//! box-blurred copy of the coverage mask composited under the fill.

use glam::Vec2;
use heartfall_core::{Paint, Rgba, Shadow, Surface, Viewport};
use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::Widget};

/// Line segments per flattened Bézier.
const CURVE_SEGMENTS: usize = 16;
/// Segment bounds per flattened arc.
const MIN_ARC_SEGMENTS: usize = 8;
const MAX_ARC_SEGMENTS: usize = 64;

/// Upper half block: foreground paints the top pixel, background the bottom.
const HALF_BLOCK: &str = "▀";

#[derive(Debug, Clone, Default, PartialEq)]
struct PaintState {
    fill: Paint,
    shadow: Shadow,
}

/// Path under construction, in pixel coordinates.
#[derive(Debug, Clone, Default)]
struct Path {
    subpaths: Vec<Vec<Vec2>>,
}

impl Path {
    fn rect(min: Vec2, max: Vec2) -> Self {
        Self {
            subpaths: vec![vec![
                min,
                Vec2::new(max.x, min.y),
                max,
                Vec2::new(min.x, max.y),
            ]],
        }
    }

    fn current_point(&self) -> Option<Vec2> {
        self.subpaths.last().and_then(|s| s.last().copied())
    }

    fn move_to(&mut self, point: Vec2) {
        self.subpaths.push(vec![point]);
    }

    fn line_to(&mut self, point: Vec2) {
        match self.subpaths.last_mut() {
            Some(subpath) => subpath.push(point),
            None => self.subpaths.push(vec![point]),
        }
    }

    fn close(&mut self) {
        if let Some(first) = self.subpaths.last().and_then(|s| s.first().copied()) {
            self.subpaths.push(vec![first]);
        }
    }

    /// Edges of every subpath, each implicitly closed.
    fn edges(&self) -> Vec<(Vec2, Vec2)> {
        let mut edges = Vec::new();
        for subpath in self.subpaths.iter().filter(|s| s.len() > 1) {
            edges.extend(subpath.windows(2).map(|w| (w[0], w[1])));
            if let (Some(&first), Some(&last)) = (subpath.first(), subpath.last()) {
                if first != last {
                    edges.push((last, first));
                }
            }
        }
        edges
    }
}

/// Per-pixel coverage over a rectangular window of the canvas.
#[derive(Debug, Clone)]
struct Mask {
    x0: usize,
    y0: usize,
    width: usize,
    height: usize,
    data: Vec<f32>,
}

impl Mask {
    fn new(x0: usize, y0: usize, width: usize, height: usize) -> Self {
        Self {
            x0,
            y0,
            width,
            height,
            data: vec![0.0; width * height],
        }
    }

    /// Mark pixels whose centers fall inside `edges` (nonzero rule).
    fn fill_nonzero(&mut self, edges: &[(Vec2, Vec2)]) {
        let mut crossings: Vec<(f32, i32)> = Vec::new();
        for row in 0..self.height {
            let yc = (self.y0 + row) as f32 + 0.5;
            crossings.clear();
            for &(a, b) in edges {
                let (dir, lo, hi) = if a.y <= b.y { (1, a, b) } else { (-1, b, a) };
                if lo.y == hi.y || yc < lo.y || yc >= hi.y {
                    continue;
                }
                let t = (yc - lo.y) / (hi.y - lo.y);
                crossings.push((lo.x + (hi.x - lo.x) * t, dir));
            }
            crossings.sort_by(|a, b| a.0.total_cmp(&b.0));

            let mut winding = 0;
            for pair in crossings.windows(2) {
                winding += pair[0].1;
                if winding != 0 {
                    self.fill_span(row, pair[0].0, pair[1].0);
                }
            }
        }
    }

    /// Cover pixels in `row` whose centers lie in [from, to).
    fn fill_span(&mut self, row: usize, from: f32, to: f32) {
        let start = ((from - 0.5).ceil() - self.x0 as f32).max(0.0) as usize;
        let end = ((to - 0.5).ceil() - self.x0 as f32).clamp(0.0, self.width as f32) as usize;
        let offset = row * self.width;
        for value in &mut self.data[offset + start.min(end)..offset + end] {
            *value = 1.0;
        }
    }

    /// Separable box blur; samples outside the window count as empty.
    fn box_blur(&mut self, radius: usize) {
        if radius == 0 {
            return;
        }
        let norm = 1.0 / (2 * radius + 1) as f32;
        let mut scratch = vec![0.0; self.data.len()];

        for y in 0..self.height {
            for x in 0..self.width {
                let lo = x.saturating_sub(radius);
                let hi = (x + radius).min(self.width - 1);
                let sum: f32 = (lo..=hi).map(|i| self.data[y * self.width + i]).sum();
                scratch[y * self.width + x] = sum * norm;
            }
        }
        for y in 0..self.height {
            for x in 0..self.width {
                let lo = y.saturating_sub(radius);
                let hi = (y + radius).min(self.height - 1);
                let sum: f32 = (lo..=hi).map(|j| scratch[j * self.width + x]).sum();
                self.data[y * self.width + x] = sum * norm;
            }
        }
    }
}

/// A grid of opaque RGB pixels that implements [`Surface`].
#[derive(Debug, Clone)]
pub struct PixelCanvas {
    /// Logical size, as reported through [`Surface`].
    logical: Vec2,
    /// Logical units per pixel.
    pixel_scale: f32,
    width: usize,
    height: usize,
    pixels: Vec<[f32; 3]>,
    state: PaintState,
    stack: Vec<PaintState>,
    path: Path,
}

impl PixelCanvas {
    /// Canvas covering `viewport`, one pixel per `pixel_scale` logical units.
    pub fn new(viewport: Viewport, pixel_scale: f32) -> Self {
        let mut canvas = Self {
            logical: Vec2::ZERO,
            pixel_scale: pixel_scale.max(f32::EPSILON),
            width: 0,
            height: 0,
            pixels: Vec::new(),
            state: PaintState::default(),
            stack: Vec::new(),
            path: Path::default(),
        };
        canvas.set_size(viewport.width, viewport.height);
        canvas
    }

    /// Size in pixels.
    pub fn pixel_size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Color of the pixel at (`x`, `y`).
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let [r, g, b] = self.pixels[y * self.width + x];
        Some(Rgba::rgb(to_channel(r), to_channel(g), to_channel(b)))
    }

    fn to_pixels(&self, point: Vec2) -> Vec2 {
        point / self.pixel_scale
    }

    fn fill_edges(&mut self, edges: &[(Vec2, Vec2)]) {
        if edges.is_empty() || self.width == 0 || self.height == 0 {
            return;
        }
        let state = self.state.clone();
        let blur_radius = if state.shadow.is_none() {
            None
        } else {
            // Canvas shadow blur maps to a gaussian of sigma blur / 2.
            Some((state.shadow.blur / 2.0 / self.pixel_scale).ceil().max(0.0) as usize)
        };
        let margin = blur_radius.unwrap_or(0) * 2;

        let (min, max) = edges.iter().fold(
            (Vec2::splat(f32::INFINITY), Vec2::splat(f32::NEG_INFINITY)),
            |(min, max), &(a, b)| (min.min(a).min(b), max.max(a).max(b)),
        );
        if !min.is_finite() || !max.is_finite() {
            return;
        }
        let x0 = (min.x.floor() as i64 - margin as i64).clamp(0, self.width as i64) as usize;
        let y0 = (min.y.floor() as i64 - margin as i64).clamp(0, self.height as i64) as usize;
        let x1 = (max.x.ceil() as i64 + margin as i64).clamp(0, self.width as i64) as usize;
        let y1 = (max.y.ceil() as i64 + margin as i64).clamp(0, self.height as i64) as usize;
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        let mut mask = Mask::new(x0, y0, x1 - x0, y1 - y0);
        mask.fill_nonzero(edges);

        if let Some(radius) = blur_radius {
            let mut glow = mask.clone();
            glow.box_blur(radius);
            glow.box_blur(radius);
            let shape_alpha = match &state.fill {
                Paint::Solid(color) => color.alpha(),
                Paint::LinearGradient(_) => 1.0,
            };
            self.composite(&glow, &Paint::Solid(state.shadow.color), shape_alpha);
        }
        self.composite(&mask, &state.fill, 1.0);
    }

    /// Blend `paint` over the pixels covered by `mask`.
    fn composite(&mut self, mask: &Mask, paint: &Paint, opacity: f32) {
        for row in 0..mask.height {
            for col in 0..mask.width {
                let coverage = mask.data[row * mask.width + col];
                if coverage <= 0.0 {
                    continue;
                }
                let (x, y) = (mask.x0 + col, mask.y0 + row);
                let center = Vec2::new(x as f32 + 0.5, y as f32 + 0.5) * self.pixel_scale;
                let color = paint.color_at(center);
                let alpha = (coverage * color.alpha() * opacity).clamp(0.0, 1.0);
                if alpha == 0.0 {
                    continue;
                }
                let src = color.to_f32();
                let dst = &mut self.pixels[y * self.width + x];
                for (d, s) in dst.iter_mut().zip(src) {
                    *d = *d * (1.0 - alpha) + s * alpha;
                }
            }
        }
    }
}

impl Surface for PixelCanvas {
    fn width(&self) -> f32 {
        self.logical.x
    }

    fn height(&self) -> f32 {
        self.logical.y
    }

    fn set_size(&mut self, width: f32, height: f32) {
        self.logical = Vec2::new(width.max(0.0), height.max(0.0));
        self.width = (self.logical.x / self.pixel_scale).ceil() as usize;
        self.height = (self.logical.y / self.pixel_scale).ceil() as usize;
        self.pixels = vec![[0.0; 3]; self.width * self.height];
        self.path = Path::default();
    }

    fn save(&mut self) {
        self.stack.push(self.state.clone());
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        let min = self.to_pixels(Vec2::new(x, y));
        let max = self.to_pixels(Vec2::new(x + width, y + height));
        let cols = pixel_index(min.x)..pixel_index(max.x).min(self.width);
        let rows = pixel_index(min.y)..pixel_index(max.y).min(self.height);
        for row in rows {
            for col in cols.clone() {
                self.pixels[row * self.width + col] = [0.0; 3];
            }
        }
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        let min = self.to_pixels(Vec2::new(x, y));
        let max = self.to_pixels(Vec2::new(x + width, y + height));
        let edges = Path::rect(min, max).edges();
        self.fill_edges(&edges);
    }

    fn begin_path(&mut self) {
        self.path = Path::default();
    }

    fn move_to(&mut self, point: Vec2) {
        let point = self.to_pixels(point);
        self.path.move_to(point);
    }

    fn bezier_curve_to(&mut self, control1: Vec2, control2: Vec2, end: Vec2) {
        let (c1, c2, end) = (
            self.to_pixels(control1),
            self.to_pixels(control2),
            self.to_pixels(end),
        );
        let start = match self.path.current_point() {
            Some(point) => point,
            None => {
                self.path.move_to(c1);
                c1
            }
        };
        for i in 1..=CURVE_SEGMENTS {
            let t = i as f32 / CURVE_SEGMENTS as f32;
            let u = 1.0 - t;
            let point = start * (u * u * u)
                + c1 * (3.0 * u * u * t)
                + c2 * (3.0 * u * t * t)
                + end * (t * t * t);
            self.path.line_to(point);
        }
    }

    fn arc(&mut self, center: Vec2, radius: f32, start_angle: f32, end_angle: f32) {
        let center = self.to_pixels(center);
        let radius = radius / self.pixel_scale;
        let sweep = end_angle - start_angle;
        let segments =
            ((radius * sweep.abs()).ceil() as usize).clamp(MIN_ARC_SEGMENTS, MAX_ARC_SEGMENTS);

        let point_at = |angle: f32| center + Vec2::new(angle.cos(), angle.sin()) * radius;
        let start = point_at(start_angle);
        if self.path.current_point().is_some() {
            self.path.line_to(start);
        } else {
            self.path.move_to(start);
        }
        for i in 1..=segments {
            let angle = start_angle + sweep * i as f32 / segments as f32;
            self.path.line_to(point_at(angle));
        }
    }

    fn close_path(&mut self) {
        self.path.close();
    }

    fn fill(&mut self) {
        let edges = self.path.edges();
        self.fill_edges(&edges);
    }

    fn set_fill_paint(&mut self, paint: Paint) {
        self.state.fill = paint;
    }

    fn set_shadow(&mut self, shadow: Shadow) {
        self.state.shadow = shadow;
    }
}

impl Widget for &PixelCanvas {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for row in 0..area.height {
            for col in 0..area.width {
                let (x, y) = (col as usize, row as usize * 2);
                let top = self.pixel(x, y).unwrap_or(Rgba::BLACK);
                let bottom = self.pixel(x, y + 1).unwrap_or(Rgba::BLACK);
                if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
                    cell.set_symbol(HALF_BLOCK)
                        .set_fg(to_color(top))
                        .set_bg(to_color(bottom));
                }
            }
        }
    }
}

/// Round a pixel coordinate to an index, saturating negatives at 0.
fn pixel_index(value: f32) -> usize {
    value.round().max(0.0) as usize
}

fn to_channel(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn to_color(color: Rgba) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}
