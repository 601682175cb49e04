//! UI components library

pub mod label;

pub use label::{Label, LabelAnchor};
