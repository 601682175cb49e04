//! Display and chart configuration
//!
//! Every field has a default, so a config file only needs the keys it wants
//! to change. Colors are `0xRRGGBB` integers.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use serde::{Deserialize, Serialize};

use crate::sparkline::constants::*;
use crate::sparkline::{ChartViewport, SparklineResult, ValueRange};
use crate::ui::styling::rgb565_from_hex;

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub display: DisplayConfig,
    pub chart: ChartConfig,
}

/// Panel geometry
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_DISPLAY_WIDTH_PX,
            height: DEFAULT_DISPLAY_HEIGHT_PX,
        }
    }
}

impl DisplayConfig {
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Sparkline chart layout and styling
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct ChartConfig {
    /// Chart width in pixels
    pub width: u32,
    /// Chart height in pixels
    pub height: u32,
    /// Number of samples kept on screen
    pub max_items: usize,
    /// Value drawn at the bottom edge
    pub y_min: f32,
    /// Value drawn at the top edge
    pub y_max: f32,
    /// Left edge of the chart
    pub x: i32,
    /// Top edge of the chart
    pub y: i32,
    pub line_color: u32,
    pub background: u32,
    /// Horizontal offset of the range labels from the left edge
    pub label_offset: i32,
    /// Number of tick intervals along the left edge
    pub tick_count: u32,
    /// Tick mark length in pixels
    pub tick_length: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_CHART_WIDTH_PX,
            height: DEFAULT_CHART_HEIGHT_PX,
            max_items: DEFAULT_MAX_ITEMS,
            y_min: DEFAULT_Y_MIN,
            y_max: DEFAULT_Y_MAX,
            x: DEFAULT_CHART_X_PX,
            y: DEFAULT_CHART_Y_PX,
            line_color: DEFAULT_LINE_COLOR_RGB,
            background: DEFAULT_BACKGROUND_RGB,
            label_offset: DEFAULT_LABEL_OFFSET_PX,
            tick_count: DEFAULT_TICK_COUNT,
            tick_length: DEFAULT_TICK_LENGTH_PX,
        }
    }
}

impl ChartConfig {
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn viewport(&self) -> SparklineResult<ChartViewport> {
        ChartViewport::new(self.origin(), self.width, self.height)
    }

    pub fn range(&self) -> SparklineResult<ValueRange> {
        ValueRange::new(self.y_min, self.y_max)
    }

    pub fn line_color(&self) -> Rgb565 {
        rgb565_from_hex(self.line_color)
    }

    pub fn background(&self) -> Rgb565 {
        rgb565_from_hex(self.background)
    }
}
