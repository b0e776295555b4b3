//! Raster rendering of a finished layout
//!
//! Every item becomes a disk whose lower part is filled up to a waveform water
//! line, tinted with its category color and ringed by a thin outline. When an
//! icon file exists for the item it is scaled into the disk and composited on
//! top. Disks are composited onto a transparent canvas in registry order.

use crate::algorithm::executor::{LayoutResult, PlacedItem};
use crate::algorithm::sampler::GaussianSource;
use crate::io::configuration::{
    BACKGROUND_ALPHA, BACKGROUND_TINT, ICON_FILL_RATIO, ICON_OVERLAY_OPACITY, MAX_SPRITE_RADIUS,
    RING_WIDTH_RATIO, WAVE_LIGHTNESS_DEVIATION, WAVE_LIGHTNESS_MEAN,
};
use crate::io::error::{Result, invalid_parameter};
use crate::io::image::load_icon;
use crate::io::theme::Theme;
use crate::math::color::{blend_over, lightness, scale_alpha, tint_toward};
use crate::math::segment::segment_height;
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use rand::Rng;
use std::f64::consts::TAU;
use std::path::Path;

/// Shape of the water line drawn across a background disk
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Waveform {
    /// Number of full periods across the disk diameter
    pub periods: u32,
    /// Peak deviation from the mean line, as a fraction of the radius
    pub amplitude: f64,
    /// Phase offset in radians
    pub phase: f64,
    /// Lightness shift applied to the filled part
    pub shade: f64,
}

impl Waveform {
    /// Draw a random waveform
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let shade = rng
            .gaussian(WAVE_LIGHTNESS_MEAN, WAVE_LIGHTNESS_DEVIATION)
            .clamp(0.0, 0.9);
        Self {
            periods: rng.random_range(1..=3),
            amplitude: rng.random_range(0.03..0.09),
            phase: rng.random_range(0.0..TAU),
            shade,
        }
    }

    /// Vertical offset of the water line below the disk center at horizontal offset `dx`
    fn line_offset(&self, dx: f64, radius: f64, fill_ratio: f64) -> f64 {
        let level = -segment_height(fill_ratio) * radius;
        let frequency = TAU * f64::from(self.periods) / (2.0 * radius).max(1.0);
        (self.amplitude * radius).mul_add(frequency.mul_add(dx, self.phase).sin(), level)
    }
}

/// Draw the background disk of one item
///
/// The returned sprite is `2 * radius + 1` pixels wide with the disk centered.
/// Radii above [`MAX_SPRITE_RADIUS`] are drawn at that size.
/// `fill_ratio` sets how much of the disk area lies below the water line.
pub fn render_background(
    radius: u32,
    color: [u8; 3],
    fill_ratio: f64,
    waveform: &Waveform,
) -> RgbaImage {
    let clipped = radius.min(MAX_SPRITE_RADIUS);
    let side = 2 * clipped + 1;
    let r = f64::from(clipped);
    let ring_width = (r * RING_WIDTH_RATIO).max(1.0);

    let filled = lightness(color, waveform.shade);
    let empty = lightness(color, BACKGROUND_TINT);
    let [cr, cg, cb] = color;

    RgbaImage::from_fn(side, side, |px, py| {
        let dx = f64::from(px) - r;
        let dy = f64::from(py) - r;
        let distance = dx.hypot(dy);
        if distance > r + 0.5 {
            return Rgba([0, 0, 0, 0]);
        }

        let [fr, fg, fb] = if dy >= waveform.line_offset(dx, r, fill_ratio) {
            filled
        } else {
            empty
        };
        // Edge coverage fades over the outer pixel
        let edge = (r + 0.5 - distance).clamp(0.0, 1.0);
        let body = scale_alpha([fr, fg, fb, 255], BACKGROUND_ALPHA * edge);
        let ring_coverage = if distance >= r - ring_width { edge } else { 0.0 };
        let ring = scale_alpha([cr, cg, cb, 255], ring_coverage);
        Rgba(blend_over(body, ring))
    })
}

/// Scale an icon to fit a disk of `radius` and optionally tint it toward `overlay`
pub fn prepare_icon(icon: &RgbaImage, radius: u32, overlay: Option<[u8; 3]>) -> RgbaImage {
    let target = ((2.0 * f64::from(radius) * ICON_FILL_RATIO).floor() as u32).max(1);
    let (w, h) = icon.dimensions();
    let scale = f64::from(target) / f64::from(w.max(h).max(1));
    let new_w = ((f64::from(w) * scale).round() as u32).max(1);
    let new_h = ((f64::from(h) * scale).round() as u32).max(1);

    let mut scaled = imageops::resize(icon, new_w, new_h, FilterType::Lanczos3);
    if let Some(color) = overlay {
        for pixel in scaled.pixels_mut() {
            *pixel = Rgba(tint_toward(pixel.0, color, ICON_OVERLAY_OPACITY));
        }
    }
    scaled
}

/// Draws finished layouts
pub struct CloudRenderer<'a> {
    theme: &'a Theme,
    icon_dir: Option<&'a Path>,
    overlay_icons: bool,
}

impl<'a> CloudRenderer<'a> {
    /// Create a renderer using `theme` colors and icons from `icon_dir`
    pub const fn new(theme: &'a Theme, icon_dir: Option<&'a Path>, overlay_icons: bool) -> Self {
        Self {
            theme,
            icon_dir,
            overlay_icons,
        }
    }

    /// Render one item onto its own sprite
    ///
    /// # Errors
    ///
    /// Returns an error if the item's icon exists but cannot be decoded
    pub fn render_item<R: Rng + ?Sized>(&self, item: &PlacedItem, rng: &mut R) -> Result<RgbaImage> {
        let color = self.theme.color(&item.category);
        let waveform = Waveform::random(rng);
        let mut sprite = render_background(item.radius, color, item.weight, &waveform);

        let icon_path = self
            .icon_dir
            .map(|dir| dir.join(format!("{}.png", item.key)));
        match icon_path {
            Some(path) if path.is_file() => {
                let icon = load_icon(&path)?;
                let overlay = self.overlay_icons.then_some(color);
                let icon = prepare_icon(&icon, item.radius, overlay);
                let x = (i64::from(sprite.width()) - i64::from(icon.width())) / 2;
                let y = (i64::from(sprite.height()) - i64::from(icon.height())) / 2;
                imageops::overlay(&mut sprite, &icon, x, y);
            }
            Some(path) => {
                tracing::warn!(item = %item.key, path = %path.display(), "icon not found");
            }
            None => {}
        }

        Ok(sprite)
    }

    /// Render every item of `result` onto a transparent canvas
    ///
    /// # Errors
    ///
    /// Returns an error if an item's radius exceeds half the canvas or any icon
    /// cannot be decoded
    pub fn render<R: Rng + ?Sized>(&self, result: &LayoutResult, rng: &mut R) -> Result<RgbaImage> {
        let mut canvas = RgbaImage::new(result.canvas_size, result.canvas_size);

        for item in &result.items {
            if item.radius > result.canvas_size / 2 {
                return Err(invalid_parameter(
                    "radius",
                    &item.radius,
                    &format!("item '{}' does not fit a {}px canvas", item.key, result.canvas_size),
                ));
            }
            let sprite = self.render_item(item, rng)?;
            let x = i64::from(item.center[0]) - i64::from(item.radius);
            let y = i64::from(item.center[1]) - i64::from(item.radius);
            imageops::overlay(&mut canvas, &sprite, x, y);
        }

        Ok(canvas)
    }
}
