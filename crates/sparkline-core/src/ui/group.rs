//! Ordered group of heterogeneous chart elements
//!
//! Elements are drawn in insertion order, so later elements end up on top
//! wherever they overlap.

use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle, Styled};
use heapless::Vec;
use log::warn;

use crate::sparkline::{Sparkline, SparklineError, SparklineResult};

use super::components::Label;
use super::core::{DirtyRegion, Drawable};

/// Anything a chart scene is composed of
#[derive(Debug, Clone)]
pub enum Renderable {
    /// Scrolling line chart
    Sparkline(Sparkline),
    /// Straight line, e.g. a tick mark
    Line(Styled<Line, PrimitiveStyle<Rgb565>>),
    /// Text label
    Label(Label),
    /// Rectangle, e.g. a chart border
    Rect(Styled<Rectangle, PrimitiveStyle<Rgb565>>),
}

impl Renderable {
    pub fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        match self {
            Renderable::Sparkline(sparkline) => Drawable::draw(sparkline, display),
            Renderable::Label(label) => Drawable::draw(label, display),
            Renderable::Line(line) => EgDrawable::draw(line, display),
            Renderable::Rect(rect) => EgDrawable::draw(rect, display),
        }
    }

    pub fn bounds(&self) -> Rectangle {
        match self {
            Renderable::Sparkline(sparkline) => Drawable::bounds(sparkline),
            Renderable::Label(label) => Drawable::bounds(label),
            Renderable::Line(line) => line.bounding_box(),
            Renderable::Rect(rect) => rect.bounding_box(),
        }
    }

    /// Primitives never change after insertion, so only widgets report dirty.
    pub fn is_dirty(&self) -> bool {
        match self {
            Renderable::Sparkline(sparkline) => sparkline.is_dirty(),
            Renderable::Label(label) => label.is_dirty(),
            Renderable::Line(_) | Renderable::Rect(_) => false,
        }
    }

    fn mark_clean(&mut self) {
        match self {
            Renderable::Sparkline(sparkline) => sparkline.mark_clean(),
            Renderable::Label(label) => label.mark_clean(),
            Renderable::Line(_) | Renderable::Rect(_) => {}
        }
    }
}

impl From<Sparkline> for Renderable {
    fn from(sparkline: Sparkline) -> Self {
        Renderable::Sparkline(sparkline)
    }
}

impl From<Label> for Renderable {
    fn from(label: Label) -> Self {
        Renderable::Label(label)
    }
}

impl From<Styled<Line, PrimitiveStyle<Rgb565>>> for Renderable {
    fn from(line: Styled<Line, PrimitiveStyle<Rgb565>>) -> Self {
        Renderable::Line(line)
    }
}

impl From<Styled<Rectangle, PrimitiveStyle<Rgb565>>> for Renderable {
    fn from(rect: Styled<Rectangle, PrimitiveStyle<Rgb565>>) -> Self {
        Renderable::Rect(rect)
    }
}

/// Fixed-capacity, ordered list of renderables
///
/// Generic over `MAX_ELEMENTS` so the whole scene lives inline without a
/// heap-allocated element list.
#[derive(Debug, Clone)]
pub struct Group<const MAX_ELEMENTS: usize> {
    elements: Vec<Renderable, MAX_ELEMENTS>,
    /// Set when elements were added since the last draw
    dirty: bool,
}

impl<const MAX_ELEMENTS: usize> Group<MAX_ELEMENTS> {
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
            dirty: true,
        }
    }

    /// Append an element on top of everything already in the group
    ///
    /// Returns the element index, or an error if the group is full.
    pub fn push(&mut self, element: impl Into<Renderable>) -> SparklineResult<usize> {
        let index = self.elements.len();
        if self.elements.push(element.into()).is_err() {
            warn!("Group full, dropping element (max: {})", MAX_ELEMENTS);
            return Err(SparklineError::GroupCapacityExceeded { max: MAX_ELEMENTS });
        }

        self.dirty = true;
        Ok(index)
    }

    pub fn get(&self, index: usize) -> Option<&Renderable> {
        self.elements.get(index)
    }

    /// Get the sparkline at `index`, if that element is one
    pub fn sparkline(&self, index: usize) -> Option<&Sparkline> {
        match self.elements.get(index) {
            Some(Renderable::Sparkline(sparkline)) => Some(sparkline),
            _ => None,
        }
    }

    /// Get the sparkline at `index` mutably, if that element is one
    pub fn sparkline_mut(&mut self, index: usize) -> Option<&mut Sparkline> {
        match self.elements.get_mut(index) {
            Some(Renderable::Sparkline(sparkline)) => Some(sparkline),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Renderable> {
        self.elements.iter()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub const fn capacity(&self) -> usize {
        MAX_ELEMENTS
    }
}

impl<const MAX_ELEMENTS: usize> Default for Group<MAX_ELEMENTS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const MAX_ELEMENTS: usize> Drawable for Group<MAX_ELEMENTS> {
    fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        for element in self.elements.iter() {
            element.draw(display)?;
        }
        Ok(())
    }

    fn bounds(&self) -> Rectangle {
        let mut elements = self.elements.iter();
        let Some(first) = elements.next() else {
            return Rectangle::zero();
        };

        let mut region = DirtyRegion::new(first.bounds());
        for element in elements {
            region.expand_to_include(element.bounds());
        }
        region.bounds
    }

    fn is_dirty(&self) -> bool {
        self.dirty || self.elements.iter().any(Renderable::is_dirty)
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
        for element in self.elements.iter_mut() {
            element.mark_clean();
        }
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Union of the dirty elements' bounds, or everything after a push
    fn dirty_region(&self) -> Option<DirtyRegion> {
        if self.dirty {
            return Some(DirtyRegion::new(self.bounds()));
        }

        let mut region: Option<DirtyRegion> = None;
        for element in self.elements.iter().filter(|e| e.is_dirty()) {
            match &mut region {
                Some(region) => region.expand_to_include(element.bounds()),
                None => region = Some(DirtyRegion::new(element.bounds())),
            }
        }
        region
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framebuffer::FrameBuffer;
    use crate::sparkline::{ChartViewport, SparklineBuffer, ValueRange};

    fn border() -> Styled<Rectangle, PrimitiveStyle<Rgb565>> {
        Rectangle::new(Point::new(1, 1), Size::new(6, 6))
            .into_styled(PrimitiveStyle::with_stroke(Rgb565::WHITE, 1))
    }

    fn sparkline() -> Sparkline {
        let buffer = SparklineBuffer::new(
            4,
            ValueRange::new(0.0, 1.0).unwrap(),
            ChartViewport::new(Point::new(20, 20), 10, 10).unwrap(),
        )
        .unwrap();
        Sparkline::new(buffer)
    }

    #[test]
    fn test_push_returns_indices_until_full() {
        let mut group = Group::<2>::new();
        assert_eq!(group.push(border()), Ok(0));
        assert_eq!(group.push(sparkline()), Ok(1));
        assert_eq!(
            group.push(border()),
            Err(SparklineError::GroupCapacityExceeded { max: 2 })
        );
        assert_eq!(group.len(), 2);
        assert_eq!(group.capacity(), 2);
    }

    #[test]
    fn test_sparkline_lookup_by_index() {
        let mut group = Group::<4>::new();
        group.push(border()).unwrap();
        let idx = group.push(sparkline()).unwrap();

        assert!(group.sparkline(0).is_none());
        assert!(group.sparkline(idx).is_some());
        group.sparkline_mut(idx).unwrap().add_value(0.5);
        assert_eq!(group.sparkline(idx).unwrap().buffer().len(), 1);
    }

    #[test]
    fn test_later_elements_draw_on_top() {
        let mut group = Group::<4>::new();
        group
            .push(
                Rectangle::new(Point::zero(), Size::new(4, 4))
                    .into_styled(PrimitiveStyle::with_fill(Rgb565::RED)),
            )
            .unwrap();
        group
            .push(
                Line::new(Point::new(0, 1), Point::new(3, 1))
                    .into_styled(PrimitiveStyle::with_stroke(Rgb565::BLUE, 1)),
            )
            .unwrap();

        let mut fb = FrameBuffer::new(Size::new(8, 8));
        group.draw(&mut fb).unwrap();

        assert_eq!(fb.pixel(Point::new(2, 0)), Some(Rgb565::RED));
        assert_eq!(fb.pixel(Point::new(2, 1)), Some(Rgb565::BLUE));
    }

    #[test]
    fn test_dirty_region_covers_only_changed_widgets() {
        let mut group = Group::<4>::new();
        group.push(border()).unwrap();
        let idx = group.push(sparkline()).unwrap();

        assert!(group.is_dirty());
        group.mark_clean();
        assert!(!group.is_dirty());
        assert_eq!(group.dirty_region(), None);

        let spark = group.sparkline_mut(idx).unwrap();
        spark.add_value(0.2);
        spark.add_value(0.8);
        spark.update();

        let region = group.dirty_region().unwrap();
        assert_eq!(
            region.bounds,
            Rectangle::new(Point::new(20, 20), Size::new(11, 11))
        );
    }

    #[test]
    fn test_bounds_union_all_elements() {
        let mut group = Group::<4>::new();
        assert_eq!(group.bounds(), Rectangle::zero());

        group.push(border()).unwrap();
        group.push(sparkline()).unwrap();
        assert_eq!(
            group.bounds(),
            Rectangle::new(Point::new(1, 1), Size::new(30, 30))
        );
    }
}
