//! Circular segment geometry for waveform fill levels

use std::f64::consts::TAU;

const BISECTION_STEPS: usize = 64;

/// Central angle of the circular segment covering `ratio` of a circle's area
///
/// Solves `θ - sin θ = 2π · ratio` on `[0, 2π]`. The left side is
/// non-decreasing there, so bisection always converges.
pub fn segment_angle(ratio: f64) -> f64 {
    let ratio = ratio.clamp(0.0, 1.0);
    let target = TAU * ratio;

    let mut low = 0.0_f64;
    let mut high = TAU;
    for _ in 0..BISECTION_STEPS {
        let mid = 0.5 * (low + high);
        if mid - mid.sin() < target {
            low = mid;
        } else {
            high = mid;
        }
    }
    0.5 * (low + high)
}

/// Height of the chord bounding a segment of the given area ratio, for a unit circle
///
/// Measured upward from the circle's center, so the result lies in `[-1, 1]`:
/// `-1` for an empty circle, `0` for half, `1` for a full one.
pub fn segment_height(ratio: f64) -> f64 {
    -(segment_angle(ratio) / 2.0).cos()
}

/// Area fraction of a unit circle lying below a chord at `height` above the center
pub fn segment_ratio(height: f64) -> f64 {
    let h = height.clamp(-1.0, 1.0);
    let theta = 2.0 * (-h).acos();
    (theta - theta.sin()) / TAU
}
