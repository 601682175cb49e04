//! Viewport and coordinate transformation utilities
//!
//! Handles transformation between sample space (values and sample indices)
//! and screen space (pixel coordinates).

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use super::{SparklineError, SparklineResult};

/// A polyline vertex in screen space
///
/// Kept in `f32` so the mapping stays exact until it is rasterized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Horizontal pixel position
    pub x: f32,
    /// Vertical pixel position (grows downward)
    pub y: f32,
}

impl Vertex {
    /// Create a new vertex
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Round to the nearest pixel
    pub fn to_point(self) -> Point {
        Point::new(round_px(self.x), round_px(self.y))
    }
}

/// Round half away from zero without `std` float intrinsics
fn round_px(v: f32) -> i32 {
    if v >= 0.0 {
        (v + 0.5) as i32
    } else {
        (v - 0.5) as i32
    }
}

/// Vertical value range mapped onto the viewport height
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    y_min: f32,
    y_max: f32,
}

impl ValueRange {
    /// Create a value range
    ///
    /// Both bounds must be finite and `y_min < y_max`.
    pub fn new(y_min: f32, y_max: f32) -> SparklineResult<Self> {
        if !(y_min.is_finite() && y_max.is_finite() && y_min < y_max) {
            return Err(SparklineError::InvalidRange { y_min, y_max });
        }
        Ok(Self { y_min, y_max })
    }

    /// Lower bound (drawn at the bottom edge)
    pub fn y_min(&self) -> f32 {
        self.y_min
    }

    /// Upper bound (drawn at the top edge)
    pub fn y_max(&self) -> f32 {
        self.y_max
    }

    /// Span of the range, always positive
    ///
    /// Computed in `f64` so ranges near `f32::MAX` stay finite.
    pub fn span(&self) -> f64 {
        f64::from(self.y_max) - f64::from(self.y_min)
    }
}

/// Pixel rectangle the samples are mapped into
///
/// The mapped area is inclusive on both ends: x spans
/// `[origin.x, origin.x + width]` and y spans `[origin.y, origin.y + height]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartViewport {
    origin: Point,
    width: u32,
    height: u32,
}

impl ChartViewport {
    /// Create a viewport with its top-left corner at `origin`
    pub fn new(origin: Point, width: u32, height: u32) -> SparklineResult<Self> {
        if width == 0 || height == 0 {
            return Err(SparklineError::InvalidViewport { width, height });
        }
        Ok(Self {
            origin,
            width,
            height,
        })
    }

    /// Top-left corner
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bottom edge y coordinate
    pub fn bottom(&self) -> i32 {
        self.origin.y + self.height as i32
    }

    /// Rectangle covering every mappable pixel
    ///
    /// One pixel larger than `width`x`height` since both edges are drawable.
    pub fn bounding_box(&self) -> Rectangle {
        Rectangle::new(self.origin, Size::new(self.width + 1, self.height + 1))
    }

    /// X coordinate of sample `index` out of `count` retained samples
    ///
    /// Samples are spaced `width / max(count - 1, 1)` apart, so a single
    /// sample sits on the left edge and a full window spans the width.
    pub fn map_x(&self, index: usize, count: usize) -> f32 {
        let intervals = count.saturating_sub(1).max(1) as f32;
        self.origin.x as f32 + self.width as f32 * index as f32 / intervals
    }

    /// Y coordinate of `value`, clamped to the viewport
    ///
    /// Values above the range pin to the top edge, values below it (and NaN)
    /// pin to the bottom edge.
    pub fn map_y(&self, value: f32, range: &ValueRange) -> f32 {
        let top = f64::from(self.origin.y);
        let bottom = top + f64::from(self.height);

        if value.is_nan() {
            return bottom as f32;
        }

        // Normalize before scaling; wide f32 ranges overflow otherwise
        let fraction = (f64::from(range.y_max) - f64::from(value)) / range.span();
        let y = top + fraction * f64::from(self.height);
        y.clamp(top, bottom) as f32
    }
}
