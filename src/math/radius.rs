//! Weight to pixel radius mapping

use crate::io::error::{CloudError, Result, WeightViolation};

/// Growth curve used to turn a weight into a radius
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RadiusCurve {
    /// `radius = base * sqrt(weight)`, area proportional to weight
    #[default]
    SquareRoot,
    /// `radius = base * cbrt(weight)`, flatter spread between small and large items
    CubeRoot,
}

/// Check that a weight lies in `(0, 1]`
pub fn is_valid_weight(weight: f64) -> bool {
    weight > 0.0 && weight <= 1.0
}

/// Map a weight in `(0, 1]` to a radius in pixels
///
/// Monotonically non-decreasing in `weight` for either curve, and `weight = 1`
/// maps to `base_size` exactly. The result is never below one pixel.
///
/// # Errors
///
/// Returns [`CloudError::InvalidWeight`] if `weight` is NaN or outside `(0, 1]`
pub fn radius_for_weight(weight: f64, base_size: u32, curve: RadiusCurve) -> Result<u32> {
    if !is_valid_weight(weight) {
        return Err(CloudError::InvalidWeight {
            violations: vec![WeightViolation {
                item: String::from("<weight>"),
                weight,
            }],
        });
    }

    let scale = match curve {
        RadiusCurve::SquareRoot => weight.sqrt(),
        RadiusCurve::CubeRoot => weight.cbrt(),
    };

    let radius = (f64::from(base_size) * scale).floor() as u32;
    Ok(radius.max(1))
}
