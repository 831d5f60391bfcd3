//! Surfaces that do not rasterize: one that records, one that discards.

use glam::Vec2;

use crate::surface::{Paint, Shadow, Surface};

/// A single call made against a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    SetSize { width: f32, height: f32 },
    Save,
    Restore,
    ClearRect { x: f32, y: f32, width: f32, height: f32 },
    FillRect { x: f32, y: f32, width: f32, height: f32 },
    BeginPath,
    MoveTo(Vec2),
    BezierCurveTo { control1: Vec2, control2: Vec2, end: Vec2 },
    Arc { center: Vec2, radius: f32, start_angle: f32, end_angle: f32 },
    ClosePath,
    Fill,
    SetFillPaint(Paint),
    SetShadow(Shadow),
}

/// Surface that records every call, for tests and debugging.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    width: f32,
    height: f32,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    /// Commands recorded so far.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drop recorded commands, keeping the size.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Number of recorded commands matching `predicate`.
    pub fn count(&self, predicate: impl Fn(&DrawCommand) -> bool) -> usize {
        self.commands.iter().filter(|c| predicate(c)).count()
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn set_size(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.commands.push(DrawCommand::SetSize { width, height });
    }

    fn save(&mut self) {
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.commands.push(DrawCommand::Restore);
    }

    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.commands.push(DrawCommand::ClearRect { x, y, width, height });
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.commands.push(DrawCommand::FillRect { x, y, width, height });
    }

    fn begin_path(&mut self) {
        self.commands.push(DrawCommand::BeginPath);
    }

    fn move_to(&mut self, point: Vec2) {
        self.commands.push(DrawCommand::MoveTo(point));
    }

    fn bezier_curve_to(&mut self, control1: Vec2, control2: Vec2, end: Vec2) {
        self.commands.push(DrawCommand::BezierCurveTo {
            control1,
            control2,
            end,
        });
    }

    fn arc(&mut self, center: Vec2, radius: f32, start_angle: f32, end_angle: f32) {
        self.commands.push(DrawCommand::Arc {
            center,
            radius,
            start_angle,
            end_angle,
        });
    }

    fn close_path(&mut self) {
        self.commands.push(DrawCommand::ClosePath);
    }

    fn fill(&mut self) {
        self.commands.push(DrawCommand::Fill);
    }

    fn set_fill_paint(&mut self, paint: Paint) {
        self.commands.push(DrawCommand::SetFillPaint(paint));
    }

    fn set_shadow(&mut self, shadow: Shadow) {
        self.commands.push(DrawCommand::SetShadow(shadow));
    }
}

/// Surface that ignores all drawing. Used to step a scene headless.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSurface {
    width: f32,
    height: f32,
}

impl NullSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Surface for NullSurface {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn set_size(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    fn save(&mut self) {}
    fn restore(&mut self) {}
    fn clear_rect(&mut self, _x: f32, _y: f32, _width: f32, _height: f32) {}
    fn fill_rect(&mut self, _x: f32, _y: f32, _width: f32, _height: f32) {}
    fn begin_path(&mut self) {}
    fn move_to(&mut self, _point: Vec2) {}
    fn bezier_curve_to(&mut self, _control1: Vec2, _control2: Vec2, _end: Vec2) {}
    fn arc(&mut self, _center: Vec2, _radius: f32, _start_angle: f32, _end_angle: f32) {}
    fn close_path(&mut self) {}
    fn fill(&mut self) {}
    fn set_fill_paint(&mut self, _paint: Paint) {}
    fn set_shadow(&mut self, _shadow: Shadow) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_surface_records_in_order() {
        let mut surface = RecordingSurface::new(10.0, 20.0);
        surface.save();
        surface.begin_path();
        surface.move_to(Vec2::new(1.0, 2.0));
        surface.fill();
        surface.restore();

        assert_eq!(
            surface.commands(),
            &[
                DrawCommand::Save,
                DrawCommand::BeginPath,
                DrawCommand::MoveTo(Vec2::new(1.0, 2.0)),
                DrawCommand::Fill,
                DrawCommand::Restore,
            ]
        );
        assert_eq!(surface.count(|c| matches!(c, DrawCommand::Fill)), 1);

        surface.clear();
        assert!(surface.commands().is_empty());
        assert_eq!(surface.width(), 10.0);
    }

    #[test]
    fn test_set_size_updates_dimensions() {
        let mut surface = NullSurface::new(1.0, 1.0);
        surface.set_size(640.0, 480.0);
        assert_eq!((surface.width(), surface.height()), (640.0, 480.0));
    }
}
