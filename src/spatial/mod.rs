//! Spatial data structures for the layout
//!
//! This module contains spatial-related functionality including:
//! - The item registry holding inputs and placements
//! - Canvas sizing and the margin band
//! - A grid index for fast collision queries

/// Canvas dimensions and margin band
pub mod canvas;
/// Uniform grid index over placed circles
pub mod grid;
/// Item arena with interned categories
pub mod registry;

pub use canvas::Canvas;
pub use grid::GridIndex;
pub use registry::{CategoryId, Item, ItemId, ItemRegistry, Placement};
