//! Sparkline sample buffer and polyline computation

extern crate alloc;
use alloc::vec::Vec;

use log::{debug, trace};

use super::ring::SampleRing;
use super::viewport::{ChartViewport, ValueRange, Vertex};
use super::{SparklineError, SparklineResult};

/// Fixed-capacity scrolling sample window mapped onto a viewport
///
/// Appending is cheap and only marks the buffer dirty; the polyline is
/// recomputed lazily by [`update`](Self::update). Nothing here performs I/O,
/// so the buffer can live on any thread or inside any widget.
#[derive(Debug, Clone)]
pub struct SparklineBuffer {
    samples: SampleRing,
    range: ValueRange,
    viewport: ChartViewport,
    /// Polyline from the last `update`
    points: Vec<Vertex>,
    /// Samples changed since the last `update`
    dirty: bool,
}

impl SparklineBuffer {
    /// Create an empty buffer retaining at most `capacity` samples
    pub fn new(
        capacity: usize,
        range: ValueRange,
        viewport: ChartViewport,
    ) -> SparklineResult<Self> {
        if capacity == 0 {
            return Err(SparklineError::InvalidCapacity { capacity });
        }

        debug!(
            "Sparkline buffer: {} samples, range {}..{}, {}x{} at ({}, {})",
            capacity,
            range.y_min(),
            range.y_max(),
            viewport.width(),
            viewport.height(),
            viewport.origin().x,
            viewport.origin().y
        );

        Ok(Self {
            samples: SampleRing::new(capacity),
            range,
            viewport,
            points: Vec::with_capacity(capacity),
            dirty: true,
        })
    }

    /// Append a sample, evicting the oldest one once the window is full
    ///
    /// Any value is accepted; out-of-range values are clamped when mapped.
    pub fn add_value(&mut self, value: f32) {
        if let Some(evicted) = self.samples.push(value) {
            trace!("Sparkline evicted {}", evicted);
        }
        self.dirty = true;
    }

    /// Drop all samples
    pub fn clear_values(&mut self) {
        self.samples.clear();
        self.dirty = true;
    }

    /// Recompute the polyline if samples changed and return it
    ///
    /// Points run left (oldest) to right (newest). With no pending changes
    /// this returns the previous result untouched, so call it once per batch
    /// of [`add_value`](Self::add_value) calls rather than once per value.
    pub fn update(&mut self) -> &[Vertex] {
        if self.dirty {
            self.recompute();
            self.dirty = false;
        }
        &self.points
    }

    fn recompute(&mut self) {
        let count = self.samples.len();
        let viewport = self.viewport;
        let range = self.range;

        self.points.clear();
        self.points
            .extend(self.samples.iter().enumerate().map(|(i, value)| {
                Vertex::new(viewport.map_x(i, count), viewport.map_y(value, &range))
            }));
    }

    /// Polyline from the last [`update`](Self::update)
    pub fn points(&self) -> &[Vertex] {
        &self.points
    }

    /// Iterate retained samples oldest to newest
    pub fn values(&self) -> impl Iterator<Item = f32> + '_ {
        self.samples.iter()
    }

    /// Most recently added sample
    pub fn latest(&self) -> Option<f32> {
        self.samples.latest()
    }

    /// Value drawn at the top edge
    pub fn y_top(&self) -> f32 {
        self.range.y_max()
    }

    /// Value drawn at the bottom edge
    pub fn y_bottom(&self) -> f32 {
        self.range.y_min()
    }

    /// Number of retained samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if no samples are retained
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Maximum number of retained samples
    pub fn capacity(&self) -> usize {
        self.samples.capacity()
    }

    /// Check if samples changed since the last update
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Get the value range
    pub fn range(&self) -> &ValueRange {
        &self.range
    }

    /// Get the viewport
    pub fn viewport(&self) -> &ChartViewport {
        &self.viewport
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::prelude::Point;
    use proptest::prelude::*;

    const EPSILON: f32 = 1e-3;

    fn demo_buffer(capacity: usize) -> SparklineBuffer {
        SparklineBuffer::new(
            capacity,
            ValueRange::new(0.0, 10.0).unwrap(),
            ChartViewport::new(Point::new(40, 30), 270, 180).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let result = SparklineBuffer::new(
            0,
            ValueRange::new(0.0, 10.0).unwrap(),
            ChartViewport::new(Point::zero(), 10, 10).unwrap(),
        );
        assert_eq!(
            result.err(),
            Some(SparklineError::InvalidCapacity { capacity: 0 })
        );
    }

    #[test]
    fn test_empty_buffer_updates_to_no_points() {
        let mut buffer = demo_buffer(4);
        assert!(buffer.update().is_empty());
        assert!(!buffer.is_dirty());
    }

    #[test]
    fn test_single_sample_sits_on_left_edge() {
        let mut buffer = demo_buffer(4);
        buffer.add_value(5.0);

        let points = buffer.update();
        assert_eq!(points, &[Vertex::new(40.0, 120.0)]);
    }

    #[test]
    fn test_scrolling_scenario() {
        let mut buffer = demo_buffer(40);
        for v in 0..=40 {
            buffer.add_value(v as f32);
        }

        let retained: Vec<f32> = buffer.values().collect();
        let expected: Vec<f32> = (1..=40).map(|v| v as f32).collect();
        assert_eq!(retained, expected);

        let points = buffer.update();
        assert_eq!(points.len(), 40);

        let first = points[0];
        assert!((first.x - 40.0).abs() < EPSILON);
        assert!((first.y - 192.0).abs() < EPSILON);

        let last = points[39];
        assert!((last.x - 310.0).abs() < EPSILON);
        assert_eq!(last.y, 30.0);
    }

    #[test]
    fn test_update_without_changes_is_idempotent() {
        let mut buffer = demo_buffer(8);
        for v in [1.0, 9.0, 4.0] {
            buffer.add_value(v);
        }

        let first = buffer.update().to_vec();
        assert!(!buffer.is_dirty());
        let second = buffer.update().to_vec();
        assert_eq!(first, second);
    }

    #[test]
    fn test_points_are_stale_until_update() {
        let mut buffer = demo_buffer(8);
        buffer.add_value(1.0);
        buffer.update();

        buffer.add_value(2.0);
        assert!(buffer.is_dirty());
        assert_eq!(buffer.points().len(), 1);

        assert_eq!(buffer.update().len(), 2);
    }

    #[test]
    fn test_points_respread_as_window_fills() {
        let mut buffer = demo_buffer(3);
        buffer.add_value(0.0);
        buffer.add_value(0.0);
        let xs: Vec<f32> = buffer.update().iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![40.0, 310.0]);

        buffer.add_value(0.0);
        let xs: Vec<f32> = buffer.update().iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![40.0, 175.0, 310.0]);
    }

    #[test]
    fn test_clear_values_empties_polyline() {
        let mut buffer = demo_buffer(3);
        buffer.add_value(3.0);
        buffer.update();

        buffer.clear_values();
        assert!(buffer.is_dirty());
        assert!(buffer.update().is_empty());
        assert_eq!(buffer.latest(), None);
    }

    #[test]
    fn test_range_accessors() {
        let buffer = demo_buffer(3);
        assert_eq!(buffer.y_top(), 10.0);
        assert_eq!(buffer.y_bottom(), 0.0);
        assert_eq!(buffer.capacity(), 3);
    }

    proptest! {
        #[test]
        fn prop_point_count_and_x_order(
            capacity in 1usize..64,
            values in proptest::collection::vec(-20.0f32..20.0, 0..200),
        ) {
            let mut buffer = demo_buffer(capacity);
            for v in &values {
                buffer.add_value(*v);
            }

            let expected_len = values.len().min(capacity);
            let points = buffer.update();
            prop_assert_eq!(points.len(), expected_len);

            for pair in points.windows(2) {
                prop_assert!(pair[0].x < pair[1].x);
            }

            if expected_len > 1 {
                prop_assert!((points[0].x - 40.0).abs() < EPSILON);
                prop_assert!((points[expected_len - 1].x - 310.0).abs() < EPSILON);
            }
        }

        #[test]
        fn prop_retains_most_recent_fifo(
            capacity in 1usize..32,
            values in proptest::collection::vec(-1000.0f32..1000.0, 0..100),
        ) {
            let mut buffer = demo_buffer(capacity);
            for v in &values {
                buffer.add_value(*v);
            }

            let skip = values.len().saturating_sub(capacity);
            let retained: Vec<f32> = buffer.values().collect();
            prop_assert_eq!(retained, values[skip..].to_vec());
        }

        #[test]
        fn prop_y_mapping_and_clamping(value in -50.0f32..50.0) {
            let mut buffer = demo_buffer(1);
            buffer.add_value(value);
            let y = buffer.update()[0].y;

            if value > 10.0 {
                prop_assert_eq!(y, 30.0);
            } else if value < 0.0 {
                prop_assert_eq!(y, 210.0);
            } else {
                let expected = 30.0 + 180.0 * (10.0 - value) / 10.0;
                prop_assert!((y - expected).abs() < EPSILON);
            }
            prop_assert!((30.0..=210.0).contains(&y));
        }

        #[test]
        fn prop_update_idempotent(values in proptest::collection::vec(0.0f32..10.0, 0..50)) {
            let mut buffer = demo_buffer(16);
            for v in &values {
                buffer.add_value(*v);
            }
            let first = buffer.update().to_vec();
            let second = buffer.update().to_vec();
            prop_assert_eq!(first, second);
        }
    }
}
