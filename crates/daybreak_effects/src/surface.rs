//! Drawing surface abstraction.
//!
//! The engine composites through a small 2D immediate-mode API. A browser
//! canvas, a software rasterizer, or the `CommandRecorder` below can sit
//! behind it.

use daybreak_shared::{Color, Vec2};

/// Soft blur drawn around a shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    /// Blur radius in surface units.
    pub blur: f32,
    /// Glow color.
    pub color: Color,
}

/// 2D immediate-mode drawing API consumed by `ParticleEngine::render`.
///
/// Style setters affect every following draw until the matching `restore`.
pub trait DrawSurface {
    /// Clears `[0, width] x [0, height]` to transparent.
    fn clear(&mut self, width: f32, height: f32);

    /// Pushes the current style state.
    fn save(&mut self);

    /// Pops back to the last saved style state.
    fn restore(&mut self);

    /// Alpha multiplied into every following draw.
    fn set_global_alpha(&mut self, alpha: f32);

    /// Fill color for filled shapes.
    fn set_fill_color(&mut self, color: Color);

    /// Stroke color for lines.
    fn set_stroke_color(&mut self, color: Color);

    /// Enables (`Some`) or disables (`None`) the glow style.
    fn set_glow(&mut self, glow: Option<Glow>);

    /// Filled circle.
    fn fill_circle(&mut self, center: Vec2, radius: f32);

    /// Filled square of side `size` centered at `center`, rotated by `rotation` radians.
    fn fill_rotated_square(&mut self, center: Vec2, size: f32, rotation: f32);

    /// Straight line of the given width.
    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32);
}

/// A recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Surface cleared.
    Clear {
        /// Cleared width.
        width: f32,
        /// Cleared height.
        height: f32,
    },
    /// Filled circle.
    Circle {
        /// Center.
        center: Vec2,
        /// Radius.
        radius: f32,
        /// Effective fill color.
        color: Color,
        /// Effective global alpha.
        alpha: f32,
        /// Active glow, if any.
        glow: Option<Glow>,
    },
    /// Filled rotated square.
    RotatedSquare {
        /// Center.
        center: Vec2,
        /// Side length.
        size: f32,
        /// Rotation in radians.
        rotation: f32,
        /// Effective fill color.
        color: Color,
        /// Effective global alpha.
        alpha: f32,
        /// Active glow, if any.
        glow: Option<Glow>,
    },
    /// Line.
    Line {
        /// Start point.
        from: Vec2,
        /// End point.
        to: Vec2,
        /// Line width.
        width: f32,
        /// Effective stroke color.
        color: Color,
        /// Effective global alpha.
        alpha: f32,
        /// Active glow, if any.
        glow: Option<Glow>,
    },
}

#[derive(Debug, Clone, Copy)]
struct StyleState {
    alpha: f32,
    fill: Color,
    stroke: Color,
    glow: Option<Glow>,
}

impl Default for StyleState {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            fill: Color::BLACK,
            stroke: Color::BLACK,
            glow: None,
        }
    }
}

/// A `DrawSurface` that resolves style state and records flat draw commands.
///
/// Used by headless hosts and tests. One frame at a time: `begin_frame`
/// drops the previous frame's commands.
#[derive(Debug, Default)]
pub struct CommandRecorder {
    commands: Vec<DrawCommand>,
    style: StyleState,
    style_stack: Vec<StyleState>,
}

impl CommandRecorder {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            commands: Vec::with_capacity(1024),
            style: StyleState::default(),
            style_stack: Vec::with_capacity(16),
        }
    }

    /// Drops recorded commands and resets style state.
    pub fn begin_frame(&mut self) {
        self.commands.clear();
        self.style_stack.clear();
        self.style = StyleState::default();
    }

    /// Commands recorded since `begin_frame`.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of recorded commands.
    #[must_use]
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// Number of recorded shape draws (everything except clears).
    #[must_use]
    pub fn draw_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| !matches!(c, DrawCommand::Clear { .. }))
            .count()
    }

    /// Depth of unmatched `save` calls.
    #[must_use]
    pub fn save_depth(&self) -> usize {
        self.style_stack.len()
    }
}

impl DrawSurface for CommandRecorder {
    fn clear(&mut self, width: f32, height: f32) {
        self.commands.push(DrawCommand::Clear { width, height });
    }

    fn save(&mut self) {
        self.style_stack.push(self.style);
    }

    fn restore(&mut self) {
        // Unbalanced restore is ignored, like a canvas context
        if let Some(style) = self.style_stack.pop() {
            self.style = style;
        }
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.style.alpha = alpha;
    }

    fn set_fill_color(&mut self, color: Color) {
        self.style.fill = color;
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.style.stroke = color;
    }

    fn set_glow(&mut self, glow: Option<Glow>) {
        self.style.glow = glow;
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color: self.style.fill,
            alpha: self.style.alpha,
            glow: self.style.glow,
        });
    }

    fn fill_rotated_square(&mut self, center: Vec2, size: f32, rotation: f32) {
        self.commands.push(DrawCommand::RotatedSquare {
            center,
            size,
            rotation,
            color: self.style.fill,
            alpha: self.style.alpha,
            glow: self.style.glow,
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            width,
            color: self.style.stroke,
            alpha: self.style.alpha,
            glow: self.style.glow,
        });
    }
}
