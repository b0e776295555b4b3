use crate::{
    algorithm::collision::CollisionValidator,
    algorithm::patience::{Patience, PatienceExhausted},
    algorithm::sampler::{GaussianSource, draw_candidate, seeded_source},
    analysis::statistics::ClusterStatistics,
    io::configuration::{
        CANVAS_SAFETY_MULTIPLIER, DEFAULT_BASE_ITEM_SIZE, DEFAULT_GAP_RATIO, DEFAULT_MARGIN_RATIO,
        DEFAULT_PATIENCE_BUDGET,
    },
    io::error::{CloudError, Result, invalid_parameter},
    math::radius::{RadiusCurve, radius_for_weight},
    spatial::canvas::canvas_size_for,
    spatial::{Canvas, CategoryId, ItemId, ItemRegistry, Placement},
};
use indexmap::IndexMap;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

/// Limits on how long the orchestrator keeps restarting
///
/// With neither limit set the orchestrator retries until an attempt succeeds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AttemptBudget {
    /// Maximum number of attempts, including the first
    pub max_attempts: Option<usize>,
    /// Wall-clock limit checked between attempts
    pub time_limit: Option<Duration>,
}

impl AttemptBudget {
    /// Retry forever
    pub const UNBOUNDED: Self = Self {
        max_attempts: None,
        time_limit: None,
    };

    /// Allow at most `max_attempts` attempts
    pub const fn attempts(max_attempts: usize) -> Self {
        Self {
            max_attempts: Some(max_attempts),
            time_limit: None,
        }
    }

    /// Whether no further attempt may start
    pub fn is_spent(&self, attempts_made: usize, elapsed: Duration) -> bool {
        self.max_attempts.is_some_and(|max| attempts_made >= max)
            || self.time_limit.is_some_and(|limit| elapsed >= limit)
    }
}

/// Layout parameters
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutConfig {
    /// Side of the square canvas in pixels
    pub canvas_size: u32,
    /// Margin band as a fraction of the canvas side
    pub margin_ratio: f64,
    /// Minimum edge clearance as a fraction of the larger radius
    pub gap_ratio: f64,
    /// Radius of an item with weight 1.0
    pub base_item_size: u32,
    /// Candidate draws allowed per attempt
    pub patience_budget: usize,
    /// Weight to radius curve
    pub radius_curve: RadiusCurve,
    /// Restart limits
    pub budget: AttemptBudget,
}

impl LayoutConfig {
    /// Default parameters with a canvas sized for `item_count` items
    pub fn for_item_count(item_count: usize) -> Self {
        Self {
            canvas_size: canvas_size_for(
                item_count,
                DEFAULT_BASE_ITEM_SIZE,
                CANVAS_SAFETY_MULTIPLIER,
            ),
            margin_ratio: DEFAULT_MARGIN_RATIO,
            gap_ratio: DEFAULT_GAP_RATIO,
            base_item_size: DEFAULT_BASE_ITEM_SIZE,
            patience_budget: DEFAULT_PATIENCE_BUDGET,
            radius_curve: RadiusCurve::default(),
            budget: AttemptBudget::UNBOUNDED,
        }
    }

    /// Check parameter ranges and derive the canvas
    ///
    /// # Errors
    ///
    /// Returns [`CloudError::InvalidParameter`] for a zero base size or patience
    /// budget, a negative or non-finite gap ratio, a zero attempt limit, an
    /// unusable canvas size or margin ratio, or a base size above half the canvas
    pub fn validate(&self) -> Result<Canvas> {
        if self.base_item_size == 0 {
            return Err(invalid_parameter(
                "base_item_size",
                &self.base_item_size,
                &"must be positive",
            ));
        }
        if self.patience_budget == 0 {
            return Err(invalid_parameter(
                "patience_budget",
                &self.patience_budget,
                &"must allow at least one draw",
            ));
        }
        if !self.gap_ratio.is_finite() || self.gap_ratio < 0.0 {
            return Err(invalid_parameter(
                "gap_ratio",
                &self.gap_ratio,
                &"must be a finite non-negative number",
            ));
        }
        if self.budget.max_attempts == Some(0) {
            return Err(invalid_parameter(
                "max_attempts",
                &0,
                &"must allow at least one attempt",
            ));
        }
        let canvas = Canvas::new(self.canvas_size, self.margin_ratio)?;
        if self.base_item_size > canvas.size / 2 {
            return Err(invalid_parameter(
                "base_item_size",
                &self.base_item_size,
                &format!("must not exceed half the canvas size ({})", canvas.size / 2),
            ));
        }
        Ok(canvas)
    }
}

/// An item with its final position
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedItem {
    /// Registry id
    pub id: ItemId,
    /// Input key
    pub key: String,
    /// Human readable name
    pub display_name: String,
    /// Category name
    pub category: String,
    /// Input weight
    pub weight: f64,
    /// Circle center `[x, y]` in pixels
    pub center: [i32; 2],
    /// Circle radius in pixels
    pub radius: u32,
}

/// A completed layout
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutResult {
    /// Side of the canvas the layout was computed for
    pub canvas_size: u32,
    /// Every item in registry order
    pub items: Vec<PlacedItem>,
    /// Centers per category, in placement order
    pub clusters: IndexMap<String, Vec<[i32; 2]>>,
    /// Attempts made, including the successful one
    pub attempts: usize,
    /// Candidate draws across every attempt
    pub total_draws: usize,
}

/// Orchestrator phases
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutState {
    /// Nothing started yet
    Idle,
    /// Searching a position for the item at this index
    Placing(usize),
    /// The attempt failed; placements are being discarded
    Restarting,
    /// Every item is placed
    Complete,
}

/// Receives progress events while a layout runs
pub trait LayoutObserver {
    /// A new attempt begins (attempts are numbered from 1)
    fn attempt_started(&mut self, _attempt: usize) {}

    /// An item was committed; `placed` counts items placed in this attempt
    fn item_placed(&mut self, _id: ItemId, _placement: Placement, _placed: usize) {}

    /// An attempt ran out of patience after placing `placed` items
    fn attempt_failed(&mut self, _attempt: usize, _placed: usize, _draws: usize) {}
}

/// Observer that ignores every event
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl LayoutObserver for NoopObserver {}

/// State owned by one layout run
///
/// Holds the per-attempt statistics, collision index and patience counter.
/// The registry is borrowed mutably only for the duration of [`LayoutEngine::run`].
pub struct LayoutEngine {
    config: LayoutConfig,
    canvas: Canvas,
    radii: Vec<u32>,
    statistics: ClusterStatistics,
    validator: CollisionValidator,
    patience: Patience,
    attempts: usize,
    total_draws: usize,
}

impl LayoutEngine {
    /// Validate parameters and weights and prepare per-attempt state
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or any item weight lies
    /// outside `(0, 1]`
    pub fn new(registry: &ItemRegistry, config: &LayoutConfig) -> Result<Self> {
        let canvas = config.validate()?;
        registry.validate_weights()?;

        let radii = registry
            .items()
            .iter()
            .map(|item| radius_for_weight(item.weight, config.base_item_size, config.radius_curve))
            .collect::<Result<Vec<u32>>>()?;
        let largest = radii.iter().copied().max().unwrap_or(config.base_item_size);

        Ok(Self {
            config: *config,
            canvas,
            radii,
            statistics: ClusterStatistics::new(registry.category_count(), canvas.center()),
            validator: CollisionValidator::new(canvas, config.gap_ratio, largest),
            patience: Patience::new(config.patience_budget),
            attempts: 0,
            total_draws: 0,
        })
    }

    /// Canvas the layout is computed for
    pub const fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Radius every item will receive, indexed by `ItemId`
    pub fn radii(&self) -> &[u32] {
        &self.radii
    }

    /// Attempts started so far
    pub const fn attempts(&self) -> usize {
        self.attempts
    }

    /// Drive the state machine until every item is placed or the budget is spent
    ///
    /// On success every item in `registry` holds a placement; on failure none does.
    ///
    /// # Errors
    ///
    /// Returns [`CloudError::LayoutInfeasible`] when the attempt budget is spent
    pub fn run<S, O>(
        &mut self,
        registry: &mut ItemRegistry,
        source: &mut S,
        observer: &mut O,
    ) -> Result<LayoutResult>
    where
        S: GaussianSource + ?Sized,
        O: LayoutObserver + ?Sized,
    {
        let started = Instant::now();
        let mut state = LayoutState::Idle;

        loop {
            state = match state {
                LayoutState::Idle => {
                    self.begin_attempt(registry, observer);
                    LayoutState::Placing(0)
                }
                LayoutState::Placing(index) if index >= registry.len() => LayoutState::Complete,
                LayoutState::Placing(index) => {
                    match self.place_item(registry, ItemId(index), source) {
                        Ok(placement) => {
                            observer.item_placed(ItemId(index), placement, index + 1);
                            LayoutState::Placing(index + 1)
                        }
                        Err(PatienceExhausted { draws }) => {
                            tracing::debug!(
                                attempt = self.attempts,
                                placed = index,
                                draws,
                                "patience exhausted, restarting layout"
                            );
                            observer.attempt_failed(self.attempts, index, draws);
                            LayoutState::Restarting
                        }
                    }
                }
                LayoutState::Restarting => {
                    registry.clear_placements();
                    if self.config.budget.is_spent(self.attempts, started.elapsed()) {
                        return Err(CloudError::LayoutInfeasible {
                            item_count: registry.len(),
                            canvas_size: self.canvas.size,
                            gap_ratio: self.config.gap_ratio,
                            attempts: self.attempts,
                        });
                    }
                    self.begin_attempt(registry, observer);
                    LayoutState::Placing(0)
                }
                LayoutState::Complete => return Ok(self.finish(registry)),
            };
        }
    }

    fn begin_attempt<O: LayoutObserver + ?Sized>(
        &mut self,
        registry: &mut ItemRegistry,
        observer: &mut O,
    ) {
        self.attempts += 1;
        self.total_draws += self.patience.draws();
        self.patience.reset();
        self.statistics.clear();
        self.validator.clear();
        registry.clear_placements();
        observer.attempt_started(self.attempts);
    }

    /// Sample and validate candidates for one item until one is accepted
    fn place_item<S: GaussianSource + ?Sized>(
        &mut self,
        registry: &mut ItemRegistry,
        id: ItemId,
        source: &mut S,
    ) -> std::result::Result<Placement, PatienceExhausted> {
        let category = registry
            .get(id)
            .map(|item| item.category)
            .unwrap_or_default();
        let radius = self.radii.get(id.0).copied().unwrap_or(1);
        let estimate = self.statistics.estimate(category);

        loop {
            // The very first circle of an attempt sits at the canvas center
            let candidate = if self.statistics.placed() == 0 {
                self.canvas.center()
            } else {
                draw_candidate(source, &estimate, radius)
            };
            self.patience.record_draw()?;

            if self.validator.accepts(candidate, radius) {
                let placement = Placement {
                    center: candidate,
                    radius,
                };
                self.validator.insert(placement);
                self.statistics.commit(category, candidate);
                registry.set_placement(id, placement);
                return Ok(placement);
            }
        }
    }

    fn finish(&mut self, registry: &ItemRegistry) -> LayoutResult {
        self.total_draws += self.patience.draws();
        self.patience.reset();

        let items: Vec<PlacedItem> = registry
            .items()
            .iter()
            .enumerate()
            .filter_map(|(index, item)| {
                let placement = item.placement()?;
                Some(PlacedItem {
                    id: ItemId(index),
                    key: item.key.clone(),
                    display_name: item.display_name.clone(),
                    category: registry
                        .category_name(item.category)
                        .unwrap_or_default()
                        .to_string(),
                    weight: item.weight,
                    center: placement.center,
                    radius: placement.radius,
                })
            })
            .collect();

        let clusters = registry
            .categories()
            .iter()
            .enumerate()
            .map(|(index, name)| (name.clone(), self.statistics.centers(CategoryId(index)).to_vec()))
            .collect();

        tracing::info!(
            items = items.len(),
            attempts = self.attempts,
            draws = self.total_draws,
            canvas_size = self.canvas.size,
            "layout complete"
        );

        LayoutResult {
            canvas_size: self.canvas.size,
            items,
            clusters,
            attempts: self.attempts,
            total_draws: self.total_draws,
        }
    }
}

/// Place every item of `registry` on the canvas described by `config`
///
/// Any placements from an earlier run are discarded first. On success every
/// item holds a placement and the same data is returned as a [`LayoutResult`];
/// on failure no item holds a placement.
///
/// # Errors
///
/// Returns an error if:
/// - The configuration is invalid
/// - Any item weight lies outside `(0, 1]`
/// - The attempt budget is spent before an attempt succeeds
pub fn layout<S: GaussianSource + ?Sized>(
    registry: &mut ItemRegistry,
    config: &LayoutConfig,
    source: &mut S,
) -> Result<LayoutResult> {
    layout_with_observer(registry, config, source, &mut NoopObserver)
}

/// [`layout`] reporting progress to `observer`
///
/// # Errors
///
/// Same as [`layout`]
pub fn layout_with_observer<S, O>(
    registry: &mut ItemRegistry,
    config: &LayoutConfig,
    source: &mut S,
    observer: &mut O,
) -> Result<LayoutResult>
where
    S: GaussianSource + ?Sized,
    O: LayoutObserver + ?Sized,
{
    registry.clear_placements();
    let mut engine = LayoutEngine::new(registry, config)?;
    engine.run(registry, source, observer)
}

/// Compute one independent layout per seed, in parallel
///
/// Each layout runs on its own thread with a private copy of `registry`, a
/// generator seeded from its seed and the observer at the same index. At most
/// [`std::thread::available_parallelism`] layouts run at once. Results come back
/// in seed order, each with the registry copy holding its placements. Seeds
/// without a matching observer are not run.
pub fn layout_many<O>(
    registry: &ItemRegistry,
    config: &LayoutConfig,
    seeds: &[u64],
    observers: &mut [O],
) -> Vec<Result<(ItemRegistry, LayoutResult)>>
where
    O: LayoutObserver + Send,
{
    let workers = std::thread::available_parallelism().map_or(1, NonZeroUsize::get);
    layout_many_with_workers(registry, config, seeds, observers, workers)
}

/// [`layout_many`] running at most `workers` layouts at once
///
/// Seeds are processed in consecutive batches of `workers`; a zero worker
/// count is treated as one.
pub fn layout_many_with_workers<O>(
    registry: &ItemRegistry,
    config: &LayoutConfig,
    seeds: &[u64],
    observers: &mut [O],
    workers: usize,
) -> Vec<Result<(ItemRegistry, LayoutResult)>>
where
    O: LayoutObserver + Send,
{
    let batch = workers.max(1);
    let mut outcomes = Vec::with_capacity(seeds.len().min(observers.len()));

    for (seed_batch, observer_batch) in seeds.chunks(batch).zip(observers.chunks_mut(batch)) {
        std::thread::scope(|scope| {
            let handles: Vec<_> = seed_batch
                .iter()
                .zip(observer_batch.iter_mut())
                .map(|(&seed, observer)| {
                    scope.spawn(move || {
                        let mut private = registry.clone();
                        let mut source = seeded_source(seed);
                        layout_with_observer(&mut private, config, &mut source, observer)
                            .map(|result| (private, result))
                    })
                })
                .collect();

            outcomes.extend(handles.into_iter().map(|handle| {
                handle
                    .join()
                    .unwrap_or_else(|payload| std::panic::resume_unwind(payload))
            }));
        });
    }

    outcomes
}
