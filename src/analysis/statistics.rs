//! Running centroid and spread of placed centers, per category and overall
//!
//! Each accumulator uses Welford's online update, so committing a center costs
//! O(1) and the reported mean and population standard deviation match a full
//! recomputation over the same centers.

use crate::spatial::registry::CategoryId;

/// Welford accumulator over 2D points
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RunningStats {
    count: usize,
    mean: [f64; 2],
    m2: [f64; 2],
}

impl RunningStats {
    /// Create an empty accumulator
    pub const fn new() -> Self {
        Self {
            count: 0,
            mean: [0.0; 2],
            m2: [0.0; 2],
        }
    }

    /// Add a point
    pub fn push(&mut self, point: [i32; 2]) {
        self.count += 1;
        let n = self.count as f64;
        for ((mean, m2), value) in self.mean.iter_mut().zip(self.m2.iter_mut()).zip(point) {
            let x = f64::from(value);
            let delta = x - *mean;
            *mean += delta / n;
            let delta2 = x - *mean;
            *m2 += delta * delta2;
        }
    }

    /// Number of points seen
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Whether no point has been added
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Arithmetic mean of the points, `None` when empty
    pub fn mean(&self) -> Option<[f64; 2]> {
        (self.count > 0).then_some(self.mean)
    }

    /// Per-axis population standard deviation, `None` when empty
    pub fn std_dev(&self) -> Option<[f64; 2]> {
        (self.count > 0).then(|| {
            let n = self.count as f64;
            self.m2.map(|m2| (m2 / n).max(0.0).sqrt())
        })
    }
}

/// Centroid and spread a candidate should be drawn around
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClusterEstimate {
    /// Mean position `[x, y]`
    pub centroid: [f64; 2],
    /// Per-axis standard deviation `[σx, σy]`
    pub spread: [f64; 2],
    /// Number of centers the estimate was computed from
    pub support: usize,
}

/// Placed centers of the current attempt, grouped by category
#[derive(Clone, Debug)]
pub struct ClusterStatistics {
    per_category: Vec<RunningStats>,
    overall: RunningStats,
    centers: Vec<Vec<[i32; 2]>>,
    canvas_center: [f64; 2],
}

impl ClusterStatistics {
    /// Create empty statistics for `category_count` categories
    pub fn new(category_count: usize, canvas_center: [i32; 2]) -> Self {
        Self {
            per_category: vec![RunningStats::new(); category_count],
            overall: RunningStats::new(),
            centers: vec![Vec::new(); category_count],
            canvas_center: canvas_center.map(f64::from),
        }
    }

    /// Drop every recorded center
    pub fn clear(&mut self) {
        for stats in &mut self.per_category {
            *stats = RunningStats::new();
        }
        for centers in &mut self.centers {
            centers.clear();
        }
        self.overall = RunningStats::new();
    }

    /// Record a committed center for `category`
    pub fn commit(&mut self, category: CategoryId, center: [i32; 2]) {
        if let Some(stats) = self.per_category.get_mut(category.0) {
            stats.push(center);
        }
        if let Some(centers) = self.centers.get_mut(category.0) {
            centers.push(center);
        }
        self.overall.push(center);
    }

    /// Where the next member of `category` should be sampled around
    ///
    /// A category with members uses its own mean and spread. A category without
    /// members borrows the statistics of everything placed so far, whatever the
    /// category. With nothing placed at all, the canvas center with zero spread.
    pub fn estimate(&self, category: CategoryId) -> ClusterEstimate {
        let own = self
            .per_category
            .get(category.0)
            .filter(|stats| !stats.is_empty());
        let source = own.unwrap_or(&self.overall);

        match (source.mean(), source.std_dev()) {
            (Some(centroid), Some(spread)) => ClusterEstimate {
                centroid,
                spread,
                support: source.count(),
            },
            _ => ClusterEstimate {
                centroid: self.canvas_center,
                spread: [0.0; 2],
                support: 0,
            },
        }
    }

    /// Total number of centers committed in this attempt
    pub const fn placed(&self) -> usize {
        self.overall.count()
    }

    /// Committed centers of one category, in placement order
    pub fn centers(&self, category: CategoryId) -> &[[i32; 2]] {
        self.centers.get(category.0).map_or(&[], Vec::as_slice)
    }
}
