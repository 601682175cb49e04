//! Fixed-capacity sample ring
//!
//! Storage is allocated once at construction. Appending to a full ring
//! overwrites the oldest sample in place, so append and evict are O(1).

extern crate alloc;
use alloc::vec;
use alloc::vec::Vec;

/// Ring of `f32` samples, iterated oldest to newest
#[derive(Debug, Clone)]
pub struct SampleRing {
    buf: Vec<f32>,
    /// Index of the oldest sample
    head: usize,
    len: usize,
}

impl SampleRing {
    /// Create an empty ring holding at most `capacity` samples
    ///
    /// `capacity` must be non-zero; [`SparklineBuffer`](super::SparklineBuffer)
    /// validates this before constructing the ring.
    pub fn new(capacity: usize) -> Self {
        debug_assert!(capacity > 0);
        Self {
            buf: vec![0.0; capacity],
            head: 0,
            len: 0,
        }
    }

    /// Append a sample, evicting the oldest one if the ring is full
    ///
    /// Returns the evicted sample.
    pub fn push(&mut self, value: f32) -> Option<f32> {
        let capacity = self.capacity();

        if self.len < capacity {
            let tail = (self.head + self.len) % capacity;
            self.buf[tail] = value;
            self.len += 1;
            None
        } else {
            let evicted = self.buf[self.head];
            self.buf[self.head] = value;
            self.head = (self.head + 1) % capacity;
            Some(evicted)
        }
    }

    /// Sample at logical index `i` (0 = oldest)
    pub fn get(&self, i: usize) -> Option<f32> {
        if i >= self.len {
            return None;
        }
        Some(self.buf[(self.head + i) % self.capacity()])
    }

    /// Most recently appended sample
    pub fn latest(&self) -> Option<f32> {
        self.len.checked_sub(1).and_then(|i| self.get(i))
    }

    /// Iterate samples oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        let capacity = self.capacity();
        (0..self.len).map(move |i| self.buf[(self.head + i) % capacity])
    }

    /// Drop all samples, keeping the allocation
    pub fn clear(&mut self) {
        self.head = 0;
        self.len = 0;
    }

    /// Number of retained samples
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if no samples are retained
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Maximum number of retained samples
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }
}
