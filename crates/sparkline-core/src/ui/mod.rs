//! Chart UI elements for embedded displays
//!
//! This module provides:
//! - Core `Drawable` trait with dirty tracking
//! - Anchored text labels
//! - The `Renderable` group that composes a chart scene
//! - Color helpers for RGB565 panels

pub mod components;
pub mod core;
pub mod group;
pub mod styling;

// Re-export commonly used items
pub use components::{Label, LabelAnchor};
pub use core::{DirtyRegion, Drawable};
pub use group::{Group, Renderable};
