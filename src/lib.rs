//! Clustered icon cloud generation by stochastic circle packing
//!
//! Each item is sized by its weight and placed by sampling a Gaussian around
//! the running centroid of its category. Candidates that would overlap a placed
//! circle or leave the canvas margin are rejected; when an attempt exhausts its
//! draw budget the whole layout restarts.

#![forbid(unsafe_code)]

/// Layout orchestration, candidate sampling and collision validation
pub mod algorithm;
/// Running cluster statistics and post-layout cohesion measures
pub mod analysis;
/// Input/output operations and error handling
pub mod io;
/// Mathematical utilities for sizing, geometry and color
pub mod math;
/// Item registry, canvas and spatial index
pub mod spatial;

pub use algorithm::executor::{LayoutConfig, LayoutResult, layout};
pub use io::error::{CloudError, Result};
