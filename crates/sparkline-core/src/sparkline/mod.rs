//! Scrolling sparkline: a fixed-capacity sample window drawn as a polyline
//!
//! Samples are appended on the right and fall off the left once the window
//! is full. Every retained sample is re-spread across the full viewport
//! width, so the chart "fills in" while the window grows and then scrolls.
//!
//! # Update contract
//!
//! Appending only marks the buffer dirty. The polyline is recomputed by
//! [`SparklineBuffer::update`], which callers invoke once per batch of
//! appends, right before redrawing.
//!
//! # Examples
//!
//! ```ignore
//! use sparkline_core::sparkline::*;
//! use embedded_graphics::prelude::*;
//!
//! let viewport = ChartViewport::new(Point::new(40, 30), 270, 180)?;
//! let range = ValueRange::new(0.0, 10.0)?;
//! let mut sparkline = Sparkline::new(SparklineBuffer::new(40, range, viewport)?);
//!
//! sparkline.add_value(4.2);
//! sparkline.add_value(7.9);
//! let polyline = sparkline.update();
//! ```

use thiserror_no_std::Error;

mod buffer;
mod component;
pub mod constants;
mod ring;
pub mod viewport;

pub use buffer::SparklineBuffer;
pub use component::{Sparkline, SparklineStyle};
pub use viewport::{ChartViewport, ValueRange, Vertex};

/// Error types for sparkline construction
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SparklineError {
    /// Sample capacity must be at least one
    #[error("Invalid capacity: {capacity} (must be at least 1)")]
    InvalidCapacity {
        /// Requested capacity
        capacity: usize,
    },

    /// Viewport must have a non-zero width and height
    #[error("Invalid viewport size: {width}x{height}")]
    InvalidViewport {
        /// Requested width in pixels
        width: u32,
        /// Requested height in pixels
        height: u32,
    },

    /// Value range must be finite with min < max
    #[error("Invalid value range (min {y_min} must be below max {y_max})")]
    InvalidRange {
        /// Requested lower bound
        y_min: f32,
        /// Requested upper bound
        y_max: f32,
    },

    /// Renderable group is full
    #[error("Group capacity exceeded (max: {max})")]
    GroupCapacityExceeded {
        /// Maximum number of renderables in the group
        max: usize,
    },
}

/// Result type for sparkline operations
pub type SparklineResult<T> = Result<T, SparklineError>;
