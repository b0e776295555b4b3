//! Margin and minimum-gap checks for candidate centers

use crate::spatial::{Canvas, GridIndex, Placement};

/// Edge clearance two circles need, as a pixel distance
///
/// Proportional to the larger of the two radii.
pub fn required_gap(radius_a: u32, radius_b: u32, gap_ratio: f64) -> f64 {
    gap_ratio * f64::from(radius_a.max(radius_b))
}

/// Whether a circle at `center` with `radius` violates the gap against `other`
///
/// Two circles conflict when the space between their edges is not strictly
/// larger than the required gap.
pub fn conflicts(center: [i32; 2], radius: u32, other: &Placement, gap_ratio: f64) -> bool {
    let dx = f64::from(center[0]) - f64::from(other.center[0]);
    let dy = f64::from(center[1]) - f64::from(other.center[1]);
    let clearance = dx.hypot(dy) - f64::from(radius) - f64::from(other.radius);
    clearance <= required_gap(radius, other.radius, gap_ratio)
}

/// Accepts or rejects candidate centers against the canvas and placed circles
#[derive(Clone, Debug)]
pub struct CollisionValidator {
    canvas: Canvas,
    gap_ratio: f64,
    index: GridIndex,
}

impl CollisionValidator {
    /// Create a validator with an empty index
    ///
    /// `cell_size` should be close to the largest radius that will be placed.
    pub fn new(canvas: Canvas, gap_ratio: f64, cell_size: u32) -> Self {
        Self {
            canvas,
            gap_ratio,
            index: GridIndex::new(canvas.size, cell_size),
        }
    }

    /// Canvas the validator checks against
    pub const fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Forget every placed circle
    pub fn clear(&mut self) {
        self.index.clear();
    }

    /// Register an accepted circle
    pub fn insert(&mut self, placement: Placement) {
        self.index.insert(placement);
    }

    /// Number of circles registered
    pub const fn placed(&self) -> usize {
        self.index.len()
    }

    /// Whether a circle of `radius` may be centered at `center`
    ///
    /// Rejects centers outside the margin band and centers that would leave less
    /// than the required gap to any registered circle.
    pub fn accepts(&self, center: [i32; 2], radius: u32) -> bool {
        if !self.canvas.contains(center) {
            return false;
        }
        if self.index.is_empty() {
            return true;
        }

        let largest = self.index.max_radius();
        let reach = f64::from(radius)
            + f64::from(largest)
            + required_gap(radius, largest, self.gap_ratio);

        !self
            .index
            .neighbors(center, reach)
            .any(|other| conflicts(center, radius, other, self.gap_ratio))
    }
}

/// Linear scan equivalent of [`CollisionValidator::accepts`]
pub fn accepts_linear(
    canvas: &Canvas,
    placed: &[Placement],
    center: [i32; 2],
    radius: u32,
    gap_ratio: f64,
) -> bool {
    canvas.contains(center)
        && !placed
            .iter()
            .any(|other| conflicts(center, radius, other, gap_ratio))
}
