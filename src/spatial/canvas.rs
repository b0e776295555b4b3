//! Canvas sizing and the margin band

use crate::io::configuration::MAX_CANVAS_SIZE;
use crate::io::error::{Result, invalid_parameter};

/// Square drawing surface the layout is placed on
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Canvas {
    /// Side length in pixels
    pub size: u32,
    /// Width of the band along every edge that centers may not enter
    pub margin: u32,
}

impl Canvas {
    /// Create a canvas whose margin is `floor(size * margin_ratio)`
    ///
    /// # Errors
    ///
    /// Returns an error if `size` is zero or above the supported maximum, or if
    /// `margin_ratio` is not in `[0, 0.5)`
    pub fn new(size: u32, margin_ratio: f64) -> Result<Self> {
        if size == 0 || size > MAX_CANVAS_SIZE {
            return Err(invalid_parameter(
                "canvas_size",
                &size,
                &format!("must be between 1 and {MAX_CANVAS_SIZE}"),
            ));
        }
        if !(0.0..0.5).contains(&margin_ratio) {
            return Err(invalid_parameter(
                "margin_ratio",
                &margin_ratio,
                &"must be in [0, 0.5)",
            ));
        }

        let margin = (f64::from(size) * margin_ratio).floor() as u32;
        Ok(Self { size, margin })
    }

    /// Center point of the canvas
    pub const fn center(&self) -> [i32; 2] {
        let c = (self.size / 2) as i32;
        [c, c]
    }

    /// Lowest coordinate a center may take
    pub const fn min_coordinate(&self) -> i32 {
        self.margin as i32
    }

    /// Highest coordinate a center may take
    pub const fn max_coordinate(&self) -> i32 {
        self.size as i32 - self.margin as i32
    }

    /// Whether a point lies inside the allowed band on both axes
    pub const fn contains(&self, point: [i32; 2]) -> bool {
        let lo = self.min_coordinate();
        let hi = self.max_coordinate();
        point[0] >= lo && point[0] <= hi && point[1] >= lo && point[1] <= hi
    }
}

/// Canvas side expected to fit `item_count` items of `base_item_size` radius
///
/// Sized as `ceil(2 * base * sqrt(n) * safety_multiplier)`, i.e. a square grid of
/// bounding boxes scaled up so random sequential placement rarely jams.
pub fn canvas_size_for(item_count: usize, base_item_size: u32, safety_multiplier: f64) -> u32 {
    let n = item_count.max(1) as f64;
    let side = 2.0 * f64::from(base_item_size) * n.sqrt() * safety_multiplier.max(1.0);
    (side.ceil() as u32).clamp(1, MAX_CANVAS_SIZE)
}
