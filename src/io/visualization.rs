//! Frame capture and GIF generation for placement visualization

use crate::algorithm::executor::LayoutObserver;
use crate::io::configuration::{VIEWER_MIN_FRAME_DELAY_MS, VISUALIZATION_SIZE};
use crate::io::error::{CloudError, Result, WithContext, invalid_parameter};
use crate::io::theme::Theme;
use crate::math::color::blend_over;
use crate::spatial::{ItemId, ItemRegistry, Placement};
use image::{Delay, Frame, Rgba, RgbaImage};
use std::path::Path;

const FRAME_BACKGROUND: [u8; 4] = [250, 250, 250, 255];
const DISK_ALPHA: u8 = 210;

/// Something that happened on the canvas while a layout ran
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlacementEvent {
    /// An item was committed
    Placed {
        /// The item
        id: ItemId,
        /// Where it went
        placement: Placement,
    },
    /// Every placement was discarded before this attempt began
    Cleared {
        /// Attempt number that follows the clear
        attempt: usize,
    },
}

/// Captures placements for visualization
///
/// Attach as the [`LayoutObserver`] of a layout run, then export the recorded
/// events as an animated GIF.
pub struct VisualizationCapture {
    events: Vec<PlacementEvent>,
    colors: Vec<[u8; 4]>,
    canvas_size: u32,
    frame_size: u32,
}

impl VisualizationCapture {
    /// Prepare a capture for `registry`, coloring items by their category in `theme`
    pub fn new(registry: &ItemRegistry, theme: &Theme, canvas_size: u32) -> Self {
        let colors = registry
            .items()
            .iter()
            .map(|item| {
                let [r, g, b] = theme.color(registry.category_name(item.category).unwrap_or_default());
                [r, g, b, DISK_ALPHA]
            })
            .collect();

        Self {
            events: Vec::with_capacity(registry.len()),
            colors,
            canvas_size: canvas_size.max(1),
            frame_size: VISUALIZATION_SIZE,
        }
    }

    /// Returns all recorded events
    pub fn events(&self) -> &[PlacementEvent] {
        &self.events
    }

    /// Returns the total number of recorded events
    pub const fn event_count(&self) -> usize {
        self.events.len()
    }

    /// Export the captured events as a GIF with automatic frame skipping
    ///
    /// If `frame_delay_ms` is shorter than viewers honor, frames are skipped so
    /// the apparent animation speed is kept.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No placements were captured
    /// - File system operations fail
    /// - GIF encoding fails
    pub fn export_gif(&self, output_path: &Path, frame_delay_ms: u32) -> Result<()> {
        if self.events.is_empty() {
            return Err(invalid_parameter(
                "visualization",
                &0,
                &"no placements captured",
            ));
        }

        let frame_delay_ms = frame_delay_ms.max(1);
        let effective_delay_ms = frame_delay_ms.max(VIEWER_MIN_FRAME_DELAY_MS);
        let skip_factor = if frame_delay_ms < VIEWER_MIN_FRAME_DELAY_MS {
            VIEWER_MIN_FRAME_DELAY_MS.div_ceil(frame_delay_ms)
        } else {
            1
        };

        let frames = self.generate_frames(effective_delay_ms, skip_factor as usize);

        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent).with_path(parent, "create directory")?;
        }
        let file = std::fs::File::create(output_path).with_path(output_path, "create file")?;

        let mut encoder = image::codecs::gif::GifEncoder::new(file);
        encoder
            .encode_frames(frames)
            .map_err(|e| CloudError::ImageExport {
                path: output_path.to_path_buf(),
                source: e,
            })
    }

    fn generate_frames(&self, delay_ms: u32, skip_factor: usize) -> Vec<Frame> {
        let mut visible: Vec<(ItemId, Placement)> = Vec::new();
        let mut frames = vec![self.render_frame(&visible, delay_ms)];
        let mut frame_count = 0;

        for event in &self.events {
            match *event {
                PlacementEvent::Placed { id, placement } => visible.push((id, placement)),
                PlacementEvent::Cleared { .. } => visible.clear(),
            }
            frame_count += 1;
            if frame_count % skip_factor == 0 {
                frames.push(self.render_frame(&visible, delay_ms));
            }
        }

        if frame_count % skip_factor != 0 {
            frames.push(self.render_frame(&visible, delay_ms));
        }

        // Final frame holds longer
        if let Some(last) = frames.last().map(|f| f.buffer().clone()) {
            frames.push(Frame::from_parts(
                last,
                0,
                0,
                Delay::from_numer_denom_ms(delay_ms * 25, 1),
            ));
        }

        frames
    }

    fn render_frame(&self, visible: &[(ItemId, Placement)], delay_ms: u32) -> Frame {
        let mut img = RgbaImage::from_pixel(self.frame_size, self.frame_size, Rgba(FRAME_BACKGROUND));
        let scale = f64::from(self.frame_size) / f64::from(self.canvas_size);

        for (id, placement) in visible {
            let color = self.colors.get(id.0).copied().unwrap_or([0, 0, 0, DISK_ALPHA]);
            let cx = f64::from(placement.center[0]) * scale;
            let cy = f64::from(placement.center[1]) * scale;
            let r = (f64::from(placement.radius) * scale).max(0.5);

            let x0 = (cx - r).floor().max(0.0) as u32;
            let y0 = (cy - r).floor().max(0.0) as u32;
            let x1 = (cx + r).ceil().max(0.0) as u32;
            let y1 = (cy + r).ceil().max(0.0) as u32;

            for y in y0..=y1 {
                for x in x0..=x1 {
                    let dx = f64::from(x) + 0.5 - cx;
                    let dy = f64::from(y) + 0.5 - cy;
                    if dx.hypot(dy) > r {
                        continue;
                    }
                    if let Some(pixel) = img.get_pixel_mut_checked(x, y) {
                        *pixel = Rgba(blend_over(pixel.0, color));
                    }
                }
            }
        }

        Frame::from_parts(img, 0, 0, Delay::from_numer_denom_ms(delay_ms, 1))
    }
}

impl LayoutObserver for VisualizationCapture {
    fn attempt_started(&mut self, attempt: usize) {
        if attempt > 1 {
            self.events.push(PlacementEvent::Cleared { attempt });
        }
    }

    fn item_placed(&mut self, id: ItemId, placement: Placement, _placed: usize) {
        self.events.push(PlacementEvent::Placed { id, placement });
    }
}
