//! Gaussian candidate sampling around a cluster estimate

use crate::analysis::statistics::ClusterEstimate;
use rand::{Rng, SeedableRng, rngs::StdRng};
use rand_distr::StandardNormal;

/// Source of normally distributed values
///
/// Every `rand::Rng` is a source. Tests and callers can inject their own to make
/// a layout fully scripted.
pub trait GaussianSource {
    /// Draw from `N(mean, std_dev²)`
    fn gaussian(&mut self, mean: f64, std_dev: f64) -> f64;
}

impl<R: Rng + ?Sized> GaussianSource for R {
    fn gaussian(&mut self, mean: f64, std_dev: f64) -> f64 {
        let z: f64 = self.sample(StandardNormal);
        std_dev.mul_add(z, mean)
    }
}

/// Seeded generator used when no other source is supplied
pub fn seeded_source(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Standard deviation actually used on each axis
///
/// The cluster spread never drops below the item's own radius, so a cluster of
/// zero or one member still explores an area proportional to the item.
pub fn effective_spread(estimate: &ClusterEstimate, radius: u32) -> [f64; 2] {
    let floor = f64::from(radius);
    estimate.spread.map(|s| s.max(floor))
}

/// Draw a candidate center for an item of `radius` around `estimate`
///
/// The x coordinate is drawn before y; the draw is rounded to whole pixels.
pub fn draw_candidate<S: GaussianSource + ?Sized>(
    source: &mut S,
    estimate: &ClusterEstimate,
    radius: u32,
) -> [i32; 2] {
    let [sx, sy] = effective_spread(estimate, radius);
    let [cx, cy] = estimate.centroid;
    let x = source.gaussian(cx, sx);
    let y = source.gaussian(cy, sy);
    [round_to_pixel(x), round_to_pixel(y)]
}

fn round_to_pixel(value: f64) -> i32 {
    if value.is_finite() {
        value.round().clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32
    } else {
        i32::MIN
    }
}
