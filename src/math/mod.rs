//! Mathematical utilities for sizing, geometry and color

/// Lightness transform and alpha compositing of RGBA pixels
pub mod color;
/// Weight to radius mapping curves
pub mod radius;
/// Circular segment geometry used for waveform fill levels
pub mod segment;
