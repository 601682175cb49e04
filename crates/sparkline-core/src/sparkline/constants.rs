//! Constants for sparkline rendering
//!
//! Defaults mirror the reference chart layout: a 270x180 chart at (40, 30)
//! on a 320x240 panel, holding the last 40 samples of a 0..10 signal.

/// Default number of retained samples
pub const DEFAULT_MAX_ITEMS: usize = 40;

/// Default chart width in pixels
pub const DEFAULT_CHART_WIDTH_PX: u32 = 270;

/// Default chart height in pixels
pub const DEFAULT_CHART_HEIGHT_PX: u32 = 180;

/// Default chart origin (top-left corner) in pixels
pub const DEFAULT_CHART_X_PX: i32 = 40;

/// Default chart origin (top-left corner) in pixels
pub const DEFAULT_CHART_Y_PX: i32 = 30;

/// Default lower bound of the value range
pub const DEFAULT_Y_MIN: f32 = 0.0;

/// Default upper bound of the value range
pub const DEFAULT_Y_MAX: f32 = 10.0;

/// Default sparkline stroke width in pixels
pub const DEFAULT_LINE_WIDTH_PX: u32 = 1;

/// Default line color as 24-bit RGB (white)
pub const DEFAULT_LINE_COLOR_RGB: u32 = 0xFF_FF_FF;

/// Default background color as 24-bit RGB (black)
pub const DEFAULT_BACKGROUND_RGB: u32 = 0x00_00_00;

/// Horizontal offset of the range labels from the chart's left edge
///
/// Negative values place the labels left of the chart.
pub const DEFAULT_LABEL_OFFSET_PX: i32 = -10;

/// Number of tick intervals along the left edge
pub const DEFAULT_TICK_COUNT: u32 = 10;

/// Tick mark length in pixels, drawn leftwards from the chart edge
pub const DEFAULT_TICK_LENGTH_PX: u32 = 5;

/// Maximum number of renderables in the chart group
pub const MAX_CHART_ELEMENTS: usize = 20;

/// Maximum length of a label's text (characters)
pub const MAX_LABEL_LENGTH: usize = 16;

/// Default display width in pixels
pub const DEFAULT_DISPLAY_WIDTH_PX: u32 = 320;

/// Default display height in pixels
pub const DEFAULT_DISPLAY_HEIGHT_PX: u32 = 240;
