//! Command-line interface for generating icon clouds from an item description file

use crate::algorithm::executor::{
    AttemptBudget, LayoutConfig, LayoutObserver, LayoutResult, layout_many,
};
use crate::algorithm::sampler::seeded_source;
use crate::analysis::cohesion::{cohesion_score, measure_cohesion};
use crate::io::configuration::{
    CANVAS_SAFETY_MULTIPLIER, DEFAULT_BASE_ITEM_SIZE, DEFAULT_GAP_RATIO, DEFAULT_MARGIN_RATIO,
    DEFAULT_MAX_ATTEMPTS, DEFAULT_OUTPUT_DIR, DEFAULT_PATIENCE_BUDGET, DEFAULT_SEED,
    GIF_FRAME_DELAY_MS,
};
use crate::io::error::{Result, invalid_parameter};
use crate::io::image::{
    export_png, output_path, output_timestamp, snapshot_path, visualization_path,
};
use crate::io::input::CloudInput;
use crate::io::progress::{CloudProgress, ProgressManager};
use crate::io::render::CloudRenderer;
use crate::io::snapshot::LayoutSnapshot;
use crate::io::theme::Theme;
use crate::io::visualization::VisualizationCapture;
use crate::math::radius::RadiusCurve;
use crate::spatial::canvas::canvas_size_for;
use crate::spatial::{ItemId, ItemRegistry, Placement};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "iconcloud")]
#[command(
    author,
    version,
    about = "Generate clustered icon clouds by stochastic circle packing"
)]
/// Command-line arguments for the cloud generation tool
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// JSON file describing the items and theme
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Directory receiving generated images
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output: PathBuf,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Number of independent clouds to generate
    #[arg(short = 'n', long, default_value_t = 1)]
    pub count: usize,

    /// Directory holding `<key>.png` icons
    #[arg(long, value_name = "DIR")]
    pub icons: Option<PathBuf>,

    /// Radius in pixels of an item with weight 1.0
    #[arg(long, default_value_t = DEFAULT_BASE_ITEM_SIZE)]
    pub base_size: u32,

    /// Canvas side in pixels (derived from item count when omitted)
    #[arg(long)]
    pub canvas_size: Option<u32>,

    /// Margin band as a fraction of the canvas side
    #[arg(long, default_value_t = DEFAULT_MARGIN_RATIO)]
    pub margin: f64,

    /// Minimum gap as a fraction of the larger radius
    #[arg(long, default_value_t = DEFAULT_GAP_RATIO)]
    pub gap: f64,

    /// Candidate draws allowed per attempt
    #[arg(long, default_value_t = DEFAULT_PATIENCE_BUDGET)]
    pub patience: usize,

    /// Attempts before giving up (0 retries forever)
    #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: usize,

    /// Wall-clock limit per cloud in seconds
    #[arg(long, value_name = "SECS")]
    pub time_limit: Option<f64>,

    /// Scale radii by the cube root of the weight instead of the square root
    #[arg(long)]
    pub cube_root: bool,

    /// Tint icons with their category color
    #[arg(long)]
    pub overlay: bool,

    /// Write a JSON snapshot next to each image
    #[arg(long)]
    pub snapshot: bool,

    /// Re-render a saved snapshot instead of computing a new layout
    #[arg(long, value_name = "FILE")]
    pub from_snapshot: Option<PathBuf>,

    /// Write an animated GIF of the placement process
    #[arg(short, long)]
    pub visualize: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Default log filter for the chosen verbosity
    pub const fn log_filter(&self) -> &'static str {
        if self.quiet { "warn" } else { "info" }
    }

    /// One seed per requested cloud, counting up from `--seed`
    pub fn seeds(&self) -> Vec<u64> {
        (0..self.count as u64)
            .map(|offset| self.seed.wrapping_add(offset))
            .collect()
    }

    /// Layout parameters for a registry of `item_count` items
    ///
    /// # Errors
    ///
    /// Returns an error if the time limit is negative or not finite
    pub fn layout_config(&self, item_count: usize) -> Result<LayoutConfig> {
        let time_limit = self
            .time_limit
            .map(|secs| {
                Duration::try_from_secs_f64(secs)
                    .map_err(|e| invalid_parameter("time_limit", &secs, &e))
            })
            .transpose()?;

        Ok(LayoutConfig {
            canvas_size: self.canvas_size.unwrap_or_else(|| {
                canvas_size_for(item_count, self.base_size, CANVAS_SAFETY_MULTIPLIER)
            }),
            margin_ratio: self.margin,
            gap_ratio: self.gap,
            base_item_size: self.base_size,
            patience_budget: self.patience,
            radius_curve: if self.cube_root {
                RadiusCurve::CubeRoot
            } else {
                RadiusCurve::SquareRoot
            },
            budget: AttemptBudget {
                max_attempts: (self.max_attempts > 0).then_some(self.max_attempts),
                time_limit,
            },
        })
    }
}

/// Forwards layout events to a progress bar and an optional frame recorder
struct CloudObserver {
    progress: CloudProgress,
    capture: Option<VisualizationCapture>,
}

impl LayoutObserver for CloudObserver {
    fn attempt_started(&mut self, attempt: usize) {
        self.progress.attempt_started(attempt);
        if let Some(ref mut capture) = self.capture {
            capture.attempt_started(attempt);
        }
    }

    fn item_placed(&mut self, id: ItemId, placement: Placement, placed: usize) {
        self.progress.item_placed(id, placement, placed);
        if let Some(ref mut capture) = self.capture {
            capture.item_placed(id, placement, placed);
        }
    }
}

/// Orchestrates layout, rendering and export of one or more clouds
pub struct CloudProcessor {
    cli: Cli,
    progress_manager: ProgressManager,
    timestamp: String,
}

impl CloudProcessor {
    /// Create a processor stamping output names with the current local time
    pub fn new(cli: Cli) -> Self {
        let timestamp = output_timestamp(&chrono::Local::now());
        Self::with_timestamp(cli, timestamp)
    }

    /// Create a processor stamping output names with `timestamp`
    pub fn with_timestamp(cli: Cli, timestamp: String) -> Self {
        let progress_manager = if cli.should_show_progress() {
            ProgressManager::new()
        } else {
            ProgressManager::hidden()
        };

        Self {
            cli,
            progress_manager,
            timestamp,
        }
    }

    /// Generate every requested cloud and return the written image paths
    ///
    /// Every cloud that succeeds is written even when another one fails; the
    /// first failure is returned afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be read, parameters are invalid,
    /// a layout is infeasible within its budget, or an output cannot be written
    pub fn process(&mut self) -> Result<Vec<PathBuf>> {
        let input = CloudInput::from_path(&self.cli.input)?;
        let registry = input.registry();
        let theme = input.theme();

        for category in registry.categories() {
            if !theme.defines(category) {
                tracing::warn!(%category, "category has no theme color, using fallback");
            }
        }

        if let Some(snapshot_file) = self.cli.from_snapshot.clone() {
            return self.process_snapshot(registry, &theme, &snapshot_file);
        }

        let config = self.cli.layout_config(registry.len())?;
        let seeds = self.cli.seeds();
        tracing::info!(
            items = registry.len(),
            categories = registry.category_count(),
            canvas_size = config.canvas_size,
            clouds = seeds.len(),
            "starting layout"
        );

        self.progress_manager.initialize(seeds.len(), registry.len());
        let mut observers: Vec<CloudObserver> = (0..seeds.len())
            .map(|index| CloudObserver {
                progress: self.progress_manager.observer(index),
                capture: self
                    .cli
                    .visualize
                    .then(|| VisualizationCapture::new(&registry, &theme, config.canvas_size)),
            })
            .collect();

        let outcomes = layout_many(&registry, &config, &seeds, &mut observers);

        let mut written = Vec::with_capacity(outcomes.len());
        let mut first_error = None;
        for (index, ((outcome, observer), &seed)) in outcomes
            .into_iter()
            .zip(&observers)
            .zip(&seeds)
            .enumerate()
        {
            self.progress_manager.complete_cloud(index, outcome.is_ok());
            let exported = outcome.and_then(|(placed, result)| {
                self.export_cloud(index, seed, &placed, &result, &theme, observer.capture.as_ref())
            });
            match exported {
                Ok(path) => written.push(path),
                Err(e) => {
                    tracing::error!(cloud = index, seed, error = %e, "cloud generation failed");
                    first_error.get_or_insert(e);
                }
            }
        }

        self.progress_manager.finish();
        first_error.map_or(Ok(written), Err)
    }

    fn process_snapshot(
        &self,
        mut registry: ItemRegistry,
        theme: &Theme,
        snapshot_file: &Path,
    ) -> Result<Vec<PathBuf>> {
        let snapshot = LayoutSnapshot::load(snapshot_file)?;
        let result = snapshot.restore(&mut registry)?;
        tracing::info!(
            snapshot = %snapshot_file.display(),
            items = result.items.len(),
            "restored layout from snapshot"
        );
        let path = self.export_cloud(0, self.cli.seed, &registry, &result, theme, None)?;
        Ok(vec![path])
    }

    fn export_cloud(
        &self,
        index: usize,
        seed: u64,
        registry: &ItemRegistry,
        result: &LayoutResult,
        theme: &Theme,
        capture: Option<&VisualizationCapture>,
    ) -> Result<PathBuf> {
        let image_path = output_path(&self.cli.output, &self.timestamp, index);

        let renderer = CloudRenderer::new(theme, self.cli.icons.as_deref(), self.cli.overlay);
        let mut rng = seeded_source(seed);
        let image = renderer.render(result, &mut rng)?;
        export_png(&image, &image_path)?;

        if self.cli.snapshot {
            LayoutSnapshot::from_result(result).save(&snapshot_path(&image_path))?;
        }
        if let Some(capture) = capture {
            capture.export_gif(&visualization_path(&image_path), GIF_FRAME_DELAY_MS)?;
        }

        let report = measure_cohesion(registry);
        tracing::info!(
            path = %image_path.display(),
            attempts = result.attempts,
            draws = result.total_draws,
            cohesion = cohesion_score(&report).unwrap_or(f64::NAN),
            "cloud written"
        );

        Ok(image_path)
    }
}
