//! Tests for running cluster statistics and the bootstrap rule

#[cfg(test)]
mod tests {
    use iconcloud::analysis::statistics::{ClusterStatistics, RunningStats};
    use iconcloud::spatial::CategoryId;

    const TOLERANCE: f64 = 1e-9;

    fn close(a: [f64; 2], b: [f64; 2]) -> bool {
        (a[0] - b[0]).abs() < TOLERANCE && (a[1] - b[1]).abs() < TOLERANCE
    }

    // Tests running mean and population deviation match a direct computation
    // Verified by dividing m2 by n - 1
    #[test]
    fn test_running_stats_match_direct() {
        let points = [[2, 10], [4, 10], [4, 14], [4, 6], [5, 10], [5, 10], [7, 10], [9, 10]];
        let mut stats = RunningStats::new();
        for point in points {
            stats.push(point);
        }

        assert_eq!(stats.count(), 8);
        assert!(stats.mean().is_some_and(|m| close(m, [5.0, 10.0])));
        // Both axes are the textbook population example with sigma 2
        assert!(stats.std_dev().is_some_and(|s| close(s, [2.0, 2.0])));
    }

    // Tests empty accumulators report nothing
    // Verified by returning zeros for an empty accumulator
    #[test]
    fn test_empty_running_stats() {
        let stats = RunningStats::new();
        assert!(stats.is_empty());
        assert_eq!(stats.mean(), None);
        assert_eq!(stats.std_dev(), None);
    }

    // Tests a single point has zero spread
    // Verified by seeding m2 with a non-zero value
    #[test]
    fn test_single_point_zero_spread() {
        let mut stats = RunningStats::new();
        stats.push([3, -7]);
        assert!(stats.mean().is_some_and(|m| close(m, [3.0, -7.0])));
        assert!(stats.std_dev().is_some_and(|s| close(s, [0.0, 0.0])));
    }

    // Tests the estimate falls back to the canvas center before anything is placed
    // Verified by defaulting the centroid to the origin
    #[test]
    fn test_estimate_with_nothing_placed() {
        let statistics = ClusterStatistics::new(2, [500, 500]);
        let estimate = statistics.estimate(CategoryId(1));
        assert!(close(estimate.centroid, [500.0, 500.0]));
        assert!(close(estimate.spread, [0.0, 0.0]));
        assert_eq!(estimate.support, 0);
    }

    // Tests a category without members borrows the statistics of every placed center
    // Verified by falling back to the canvas center whenever the category is empty
    #[test]
    fn test_estimate_bootstraps_from_all_placed() {
        let mut statistics = ClusterStatistics::new(2, [500, 500]);
        statistics.commit(CategoryId(0), [100, 200]);
        statistics.commit(CategoryId(0), [300, 200]);

        let bootstrap = statistics.estimate(CategoryId(1));
        assert!(close(bootstrap.centroid, [200.0, 200.0]));
        assert!(close(bootstrap.spread, [100.0, 0.0]));
        assert_eq!(bootstrap.support, 2);

        statistics.commit(CategoryId(1), [900, 900]);
        let own = statistics.estimate(CategoryId(1));
        assert!(close(own.centroid, [900.0, 900.0]));
        assert_eq!(own.support, 1);

        let first = statistics.estimate(CategoryId(0));
        assert!(close(first.centroid, [200.0, 200.0]));
        assert_eq!(statistics.placed(), 3);
    }

    // Tests clearing drops every center and per-category ordering is kept
    // Verified by leaving the overall accumulator untouched on clear
    #[test]
    fn test_centers_and_clear() {
        let mut statistics = ClusterStatistics::new(2, [0, 0]);
        statistics.commit(CategoryId(1), [5, 5]);
        statistics.commit(CategoryId(0), [1, 1]);
        statistics.commit(CategoryId(1), [7, 3]);

        assert_eq!(statistics.centers(CategoryId(1)), [[5, 5], [7, 3]]);
        assert_eq!(statistics.centers(CategoryId(0)), [[1, 1]]);
        assert!(statistics.centers(CategoryId(5)).is_empty());

        statistics.clear();
        assert_eq!(statistics.placed(), 0);
        assert!(statistics.centers(CategoryId(1)).is_empty());
        assert_eq!(statistics.estimate(CategoryId(0)).support, 0);
    }
}
