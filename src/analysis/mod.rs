//! Statistical analysis of placed centers

/// Post-layout clustering quality measures
pub mod cohesion;
/// Running per-category centroid and spread
pub mod statistics;
