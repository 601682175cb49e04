//! Complete sparkline chart scene
//!
//! Assembles the sparkline with its decorations: the two range labels to
//! the left, a border one pixel larger than the plot, and tick marks down
//! the left edge. The sparkline's range and viewport are the single source
//! of truth for where every decoration goes.

use core::cmp::Ordering;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle, Styled};
use log::{debug, warn};

use crate::config::ChartConfig;
use crate::sparkline::constants::MAX_CHART_ELEMENTS;
use crate::sparkline::{
    ChartViewport, Sparkline, SparklineBuffer, SparklineError, SparklineResult, SparklineStyle,
    Vertex,
};
use crate::ui::components::{Label, LabelAnchor};
use crate::ui::core::{DirtyRegion, Drawable};
use crate::ui::group::Group;

/// Sparkline plus labels, border and ticks, drawn as one group
pub struct SparklineChart {
    group: Group<MAX_CHART_ELEMENTS>,
    sparkline_index: usize,
}

impl SparklineChart {
    /// Build the chart scene described by `config`
    ///
    /// Fails if the config's capacity, viewport or range is invalid, or if
    /// there are too many ticks to fit in the group.
    pub fn new(config: &ChartConfig) -> SparklineResult<Self> {
        let viewport = config.viewport()?;
        let range = config.range()?;
        let color = config.line_color();

        let buffer = SparklineBuffer::new(config.max_items, range, viewport)?;
        let sparkline = Sparkline::new(buffer).with_style(SparklineStyle {
            color,
            ..SparklineStyle::default()
        });

        // Border, labels and sparkline take the first slots
        if config.tick_count as usize >= MAX_CHART_ELEMENTS {
            warn!(
                "{} ticks cannot fit in the chart (max elements: {})",
                config.tick_count, MAX_CHART_ELEMENTS
            );
            return Err(SparklineError::GroupCapacityExceeded {
                max: MAX_CHART_ELEMENTS,
            });
        }

        let mut group = Group::new();
        let sparkline_index = group.push(sparkline)?;

        let label_x = viewport.origin().x + config.label_offset;
        group.push(
            Label::for_value(range.y_max(), Point::new(label_x, viewport.origin().y))
                .with_anchor(LabelAnchor::RIGHT_CENTER)
                .with_color(color),
        )?;
        group.push(
            Label::for_value(range.y_min(), Point::new(label_x, viewport.bottom()))
                .with_anchor(LabelAnchor::RIGHT_CENTER)
                .with_color(color),
        )?;

        group.push(
            Rectangle::new(
                viewport.origin(),
                Size::new(viewport.width() + 1, viewport.height() + 1),
            )
            .into_styled(PrimitiveStyle::with_stroke(color, 1)),
        )?;

        for y in tick_positions(&viewport, config.tick_count) {
            group.push(tick(&viewport, y, config.tick_length, color))?;
        }

        debug!(
            "Chart scene built with {} elements (max {})",
            group.len(),
            MAX_CHART_ELEMENTS
        );

        Ok(Self {
            group,
            sparkline_index,
        })
    }

    /// Append a sample to the sparkline
    pub fn add_value(&mut self, value: f32) {
        self.sparkline_mut().add_value(value);
    }

    /// Recompute the sparkline polyline (once per batch of samples)
    pub fn update(&mut self) -> &[Vertex] {
        self.sparkline_mut().update()
    }

    pub fn sparkline(&self) -> &Sparkline {
        match self.group.sparkline(self.sparkline_index) {
            Some(sparkline) => sparkline,
            None => unreachable!("chart group always holds its sparkline"),
        }
    }

    fn sparkline_mut(&mut self) -> &mut Sparkline {
        match self.group.sparkline_mut(self.sparkline_index) {
            Some(sparkline) => sparkline,
            None => unreachable!("chart group always holds its sparkline"),
        }
    }

    pub fn group(&self) -> &Group<MAX_CHART_ELEMENTS> {
        &self.group
    }
}

impl Drawable for SparklineChart {
    fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        self.group.draw(display)
    }

    fn bounds(&self) -> Rectangle {
        self.group.bounds()
    }

    fn is_dirty(&self) -> bool {
        self.group.is_dirty()
    }

    fn mark_clean(&mut self) {
        self.group.mark_clean();
    }

    fn mark_dirty(&mut self) {
        self.group.mark_dirty();
    }

    fn dirty_region(&self) -> Option<DirtyRegion> {
        self.group.dirty_region()
    }
}

/// Y positions of the tick marks
///
/// `tick_count + 1` evenly spaced ticks starting at the top edge, using a
/// whole-pixel spacing, plus one on the bottom edge so the last tick lands
/// exactly on the border even when the spacing was rounded.
fn tick_positions(viewport: &ChartViewport, tick_count: u32) -> impl Iterator<Item = i32> {
    let top = viewport.origin().y;
    let bottom = viewport.bottom();

    let (spacing, ticks) = match tick_count {
        0 => (0, 0),
        n => (tick_spacing(viewport.height(), n) as i32, n.saturating_add(1)),
    };

    (0..ticks).map(move |i| top + i as i32 * spacing).chain(core::iter::once(bottom))
}

/// `height / tick_count` rounded to a whole pixel, ties to even
fn tick_spacing(height: u32, tick_count: u32) -> u32 {
    let quotient = height / tick_count;
    let remainder = height % tick_count;

    // Compare 2 * remainder against tick_count without overflowing
    match remainder.cmp(&(tick_count - remainder)) {
        Ordering::Greater => quotient + 1,
        Ordering::Equal if quotient % 2 == 1 => quotient + 1,
        _ => quotient,
    }
}

fn tick(
    viewport: &ChartViewport,
    y: i32,
    length: u32,
    color: Rgb565,
) -> Styled<Line, PrimitiveStyle<Rgb565>> {
    let x_end = viewport.origin().x;
    let x_start = x_end - length as i32;
    Line::new(Point::new(x_start, y), Point::new(x_end, y))
        .into_styled(PrimitiveStyle::with_stroke(color, 1))
}
