//! Layout constants and runtime configuration defaults

// Default values for configurable layout parameters
/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;

/// Radius in pixels of an item with weight 1.0
pub const DEFAULT_BASE_ITEM_SIZE: u32 = 200;

/// Margin band as a fraction of the canvas side
pub const DEFAULT_MARGIN_RATIO: f64 = 0.05;

/// Minimum edge clearance as a fraction of the larger radius
pub const DEFAULT_GAP_RATIO: f64 = 0.1;

/// Candidate draws allowed per attempt
pub const DEFAULT_PATIENCE_BUDGET: usize = 20_000;

/// Attempts allowed before reporting the layout as infeasible
pub const DEFAULT_MAX_ATTEMPTS: usize = 200;

// Expected packing density stays well below the random sequential adsorption limit
/// Multiplier applied to the minimal canvas side
pub const CANVAS_SAFETY_MULTIPLIER: f64 = 1.6;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed canvas side in pixels
pub const MAX_CANVAS_SIZE: u32 = 20_000;
/// Largest radius a background sprite is drawn with
pub const MAX_SPRITE_RADIUS: u32 = MAX_CANVAS_SIZE / 2;

/// Category assigned to items that do not name one
pub const DEFAULT_CATEGORY: &str = "Other";

/// Theme color used when neither the category nor `Other` has one
pub const FALLBACK_THEME_COLOR: [u8; 3] = [47, 56, 64];

// Background rendering settings
/// Mean lightness shift of the waveform fill (positive tints)
pub const WAVE_LIGHTNESS_MEAN: f64 = 0.25;
/// Standard deviation of the waveform lightness jitter
pub const WAVE_LIGHTNESS_DEVIATION: f64 = 0.0625;
/// Tint applied to the unfilled part of a background disk
pub const BACKGROUND_TINT: f64 = 0.85;
/// Alpha multiplier for the background disk
pub const BACKGROUND_ALPHA: f64 = 0.75;
/// Ring outline width as a fraction of the radius
pub const RING_WIDTH_RATIO: f64 = 0.04;
/// Icon side as a fraction of the disk diameter
pub const ICON_FILL_RATIO: f64 = 0.6;
/// Opacity of the category color laid over icons
pub const ICON_OVERLAY_OPACITY: f64 = 0.15;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;

// Output settings
/// Prefix of generated image file names
pub const OUTPUT_PREFIX: &str = "image-cloud";
/// Timestamp format embedded in output file names
pub const OUTPUT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";
/// Default directory for generated images
pub const DEFAULT_OUTPUT_DIR: &str = "output";
/// Side of the visualization GIF in pixels
pub const VISUALIZATION_SIZE: u32 = 400;
/// Delay between GIF animation frames
pub const GIF_FRAME_DELAY_MS: u32 = 20;
/// Minimum frame delay that viewers reliably support (in milliseconds)
pub const VIEWER_MIN_FRAME_DELAY_MS: u32 = 50;
