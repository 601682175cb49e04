//! Styling helpers for chart elements

pub mod colors;

pub use colors::{WHITE, rgb565_from_hex};
