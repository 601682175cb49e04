//! Color definitions and conversion
//!
//! Panels are driven in RGB565 (16-bit). Configuration files specify colors
//! as 24-bit `0xRRGGBB` integers, which are scaled down per channel
//! (8 bits to 5/6/5 bits).

use embedded_graphics::pixelcolor::{Rgb565, Rgb888};
use embedded_graphics::prelude::*;

/// Pure white - maximum brightness in RGB565
pub const WHITE: Rgb565 = Rgb565::WHITE;

/// Convert a `0xRRGGBB` integer to RGB565
pub fn rgb565_from_hex(rgb: u32) -> Rgb565 {
    let r = ((rgb >> 16) & 0xFF) as u8;
    let g = ((rgb >> 8) & 0xFF) as u8;
    let b = (rgb & 0xFF) as u8;
    Rgb565::from(Rgb888::new(r, g, b))
}
