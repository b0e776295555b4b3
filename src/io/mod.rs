//! Input parsing, rendering, export and the command-line surface

/// Command-line arguments and cloud processing
pub mod cli;
/// Default parameters and rendering constants
pub mod configuration;
/// Error types and context management
pub mod error;
/// Icon loading, PNG export and output naming
pub mod image;
/// Item description files
pub mod input;
/// Progress bars for running layouts
pub mod progress;
/// Raster rendering of finished layouts
pub mod render;
/// Saved layouts for re-rendering
pub mod snapshot;
/// Category colors
pub mod theme;
/// Animated GIF of the placement process
pub mod visualization;
