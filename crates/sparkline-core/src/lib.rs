//! Hardware-independent core library for the sparkline chart
//!
//! This crate contains the scrolling sparkline buffer and everything needed
//! to put it on a small TFT: the `Sparkline` widget, range labels, chart
//! decorations, an off-screen framebuffer and the chart configuration.
//!
//! It is `#![no_std]` with `extern crate alloc` so it compiles on both
//! embedded targets and desktop hosts (for the simulator and tests).

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod chart;
pub mod config;
pub mod framebuffer;
pub mod sparkline;
pub mod ui;

pub use chart::SparklineChart;
pub use config::{ChartConfig, Config, DisplayConfig};
pub use framebuffer::FrameBuffer;
pub use sparkline::{
    ChartViewport, Sparkline, SparklineBuffer, SparklineError, SparklineResult, SparklineStyle,
    ValueRange, Vertex,
};
