//! Sparkline widget with Drawable trait implementation

use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};

use crate::ui::core::Drawable;

use super::buffer::SparklineBuffer;
use super::constants::DEFAULT_LINE_WIDTH_PX;
use super::viewport::Vertex;

/// Visual style for the sparkline stroke
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SparklineStyle {
    /// Line color
    pub color: Rgb565,
    /// Line width in pixels
    pub line_width: u32,
}

impl Default for SparklineStyle {
    fn default() -> Self {
        Self {
            color: Rgb565::WHITE,
            line_width: DEFAULT_LINE_WIDTH_PX,
        }
    }
}

/// Scrolling line chart widget
///
/// Wraps a [`SparklineBuffer`] and draws its last computed polyline. The
/// widget only becomes dirty when [`update`](Self::update) actually
/// recomputes the polyline, so appending without updating never triggers a
/// redraw of half-applied data.
#[derive(Debug, Clone)]
pub struct Sparkline {
    buffer: SparklineBuffer,
    style: SparklineStyle,
    dirty: bool,
}

impl Sparkline {
    /// Wrap `buffer` with the default white 1px stroke
    ///
    /// Starts dirty so the first frame draws the (empty) chart.
    pub fn new(buffer: SparklineBuffer) -> Self {
        Self {
            buffer,
            style: SparklineStyle::default(),
            dirty: true,
        }
    }

    /// Set the stroke style
    pub fn with_style(mut self, style: SparklineStyle) -> Self {
        self.style = style;
        self
    }

    /// Append a sample (see [`SparklineBuffer::add_value`])
    pub fn add_value(&mut self, value: f32) {
        self.buffer.add_value(value);
    }

    /// Drop all samples (see [`SparklineBuffer::clear_values`])
    pub fn clear_values(&mut self) {
        self.buffer.clear_values();
    }

    /// Recompute the polyline (see [`SparklineBuffer::update`])
    pub fn update(&mut self) -> &[Vertex] {
        if self.buffer.is_dirty() {
            self.dirty = true;
        }
        self.buffer.update()
    }

    /// Underlying sample buffer
    pub fn buffer(&self) -> &SparklineBuffer {
        &self.buffer
    }

    /// Current stroke style
    pub fn style(&self) -> &SparklineStyle {
        &self.style
    }

    /// Value drawn at the top edge
    pub fn y_top(&self) -> f32 {
        self.buffer.y_top()
    }

    /// Value drawn at the bottom edge
    pub fn y_bottom(&self) -> f32 {
        self.buffer.y_bottom()
    }
}

impl Drawable for Sparkline {
    fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        let points = self.buffer.points();
        if points.len() < 2 {
            return Ok(());
        }

        let line_style = PrimitiveStyle::with_stroke(self.style.color, self.style.line_width);

        for segment in points.windows(2) {
            Line::new(segment[0].to_point(), segment[1].to_point())
                .into_styled(line_style)
                .draw(display)?;
        }

        Ok(())
    }

    fn bounds(&self) -> Rectangle {
        self.buffer.viewport().bounding_box()
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
