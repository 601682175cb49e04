//! Anchored text label for chart annotations

use alloc::format;

use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::mono_font::{MonoTextStyle, ascii::FONT_6X10};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyle, TextStyleBuilder};
use heapless::String;

use crate::sparkline::constants::MAX_LABEL_LENGTH;
use crate::ui::core::Drawable;
use crate::ui::styling::WHITE;

/// Which point of the label's box sits on its anchored position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelAnchor {
    /// Horizontal anchor (left, center or right edge)
    pub horizontal: Alignment,
    /// Vertical anchor (top, middle or bottom edge)
    pub vertical: Baseline,
}

impl LabelAnchor {
    pub const TOP_LEFT: Self = Self::new(Alignment::Left, Baseline::Top);
    /// Right edge, vertically centered; used for y-axis range labels
    pub const RIGHT_CENTER: Self = Self::new(Alignment::Right, Baseline::Middle);

    pub const fn new(horizontal: Alignment, vertical: Baseline) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    fn text_style(&self) -> TextStyle {
        TextStyleBuilder::new()
            .alignment(self.horizontal)
            .baseline(self.vertical)
            .build()
    }
}

/// Single-line text positioned by an anchor point
///
/// Holds up to 16 characters; longer text is cut off.
#[derive(Debug, Clone)]
pub struct Label {
    text: String<MAX_LABEL_LENGTH>,
    position: Point,
    anchor: LabelAnchor,
    character_style: MonoTextStyle<'static, Rgb565>,
    dirty: bool,
}

impl Label {
    pub fn new(text: &str, position: Point) -> Self {
        Self {
            text: truncate(text),
            position,
            anchor: LabelAnchor::TOP_LEFT,
            character_style: MonoTextStyle::new(&FONT_6X10, WHITE),
            dirty: true,
        }
    }

    /// Label showing a numeric value, e.g. a chart range bound
    ///
    /// Whole numbers print without a fraction (`10`), others in their
    /// shortest exact form (`2.5`). Values too long for a label switch to
    /// scientific notation (`1e20`).
    pub fn for_value(value: f32, position: Point) -> Self {
        let mut text = format!("{}", value);
        if text.chars().count() > MAX_LABEL_LENGTH {
            text = format!("{:e}", value);
        }
        Self::new(&text, position)
    }

    pub fn with_anchor(mut self, anchor: LabelAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn with_color(mut self, color: Rgb565) -> Self {
        self.character_style.text_color = Some(color);
        self
    }

    /// Update the displayed text.
    ///
    /// Marks the label dirty only if the text changed.
    pub fn set_text(&mut self, text: &str) {
        let new_text = truncate(text);
        if self.text != new_text {
            self.text = new_text;
            self.dirty = true;
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn anchor(&self) -> LabelAnchor {
        self.anchor
    }

    fn as_text(&self) -> Text<'_, MonoTextStyle<'static, Rgb565>> {
        Text::with_text_style(
            &self.text,
            self.position,
            self.character_style,
            self.anchor.text_style(),
        )
    }
}

fn truncate(text: &str) -> String<MAX_LABEL_LENGTH> {
    let mut out = String::new();
    for c in text.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

impl Drawable for Label {
    fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        self.as_text().draw(display)?;
        Ok(())
    }

    fn bounds(&self) -> Rectangle {
        self.as_text().bounding_box()
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framebuffer::FrameBuffer;

    #[test]
    fn test_value_formatting() {
        assert_eq!(Label::for_value(10.0, Point::zero()).text(), "10");
        assert_eq!(Label::for_value(0.0, Point::zero()).text(), "0");
        assert_eq!(Label::for_value(2.5, Point::zero()).text(), "2.5");
        assert_eq!(Label::for_value(-40.0, Point::zero()).text(), "-40");
    }

    #[test]
    fn test_long_values_fall_back_to_scientific() {
        assert_eq!(Label::for_value(1.0e20, Point::zero()).text(), "1e20");
        assert_eq!(Label::for_value(-3.5e30, Point::zero()).text(), "-3.5e30");
        assert_eq!(
            Label::for_value(123456.0, Point::zero()).text(),
            "123456"
        );
    }

    #[test]
    fn test_long_text_is_truncated() {
        let label = Label::new("this text is far too long to fit", Point::zero());
        assert_eq!(label.text().len(), MAX_LABEL_LENGTH);
        assert_eq!(label.text(), "this text is far");
    }

    #[test]
    fn test_set_text_marks_dirty_only_on_change() {
        let mut label = Label::new("10", Point::zero());
        label.mark_clean();

        label.set_text("10");
        assert!(!label.is_dirty());

        label.set_text("20");
        assert!(label.is_dirty());
    }

    #[test]
    fn test_right_center_anchor_sits_left_of_position() {
        let position = Point::new(30, 30);
        let label = Label::for_value(10.0, position).with_anchor(LabelAnchor::RIGHT_CENTER);
        let bounds = label.bounds();

        let right_edge = bounds.top_left.x + bounds.size.width as i32;
        assert!(bounds.top_left.x < position.x);
        assert!((right_edge - position.x).abs() <= 1);
        assert!(bounds.top_left.y <= position.y);
        assert!(position.y < bounds.top_left.y + bounds.size.height as i32);
    }

    #[test]
    fn test_draws_inside_bounds() {
        let label = Label::new("0", Point::new(10, 10))
            .with_anchor(LabelAnchor::RIGHT_CENTER)
            .with_color(Rgb565::RED);

        let mut fb = FrameBuffer::new(Size::new(32, 32));
        label.draw(&mut fb).unwrap();

        let drawn = fb.dirty_area().expect("label should draw pixels");
        let bounds = label.bounds();
        assert!(bounds.contains(drawn.top_left));
        assert!(bounds.contains(drawn.bottom_right().unwrap()));
    }
}
