//! Tests for the uniform grid index over placed circles

#[cfg(test)]
mod tests {
    use iconcloud::spatial::{GridIndex, Placement};

    fn circle(x: i32, y: i32, radius: u32) -> Placement {
        Placement {
            center: [x, y],
            radius,
        }
    }

    // Tests insert and clear keep the length and largest radius in step
    // Verified by not resetting max_radius on clear
    #[test]
    fn test_insert_and_clear() {
        let mut index = GridIndex::new(1000, 50);
        assert!(index.is_empty());

        index.insert(circle(100, 100, 20));
        index.insert(circle(800, 800, 60));
        assert_eq!(index.len(), 2);
        assert_eq!(index.max_radius(), 60);

        index.clear();
        assert!(index.is_empty());
        assert_eq!(index.max_radius(), 0);
        assert_eq!(index.neighbors([100, 100], 1000.0).count(), 0);
    }

    // Tests neighbors only visits nearby cells
    // Verified by ignoring reach and scanning all cells
    #[test]
    fn test_neighbors_prunes_distant_circles() {
        let mut index = GridIndex::new(1000, 50);
        index.insert(circle(100, 100, 10));
        index.insert(circle(120, 90, 10));
        index.insert(circle(900, 900, 10));

        let near: Vec<_> = index.neighbors([110, 110], 60.0).collect();
        assert_eq!(near.len(), 2);
        assert!(near.iter().all(|p| p.center[0] < 500));

        let all = index.neighbors([500, 500], 1000.0).count();
        assert_eq!(all, 3);
    }

    // Tests points outside the canvas land in the border cells
    // Verified by dropping the clamp in cell_coordinate
    #[test]
    fn test_out_of_range_points_are_clamped() {
        let mut index = GridIndex::new(100, 10);
        index.insert(circle(-40, 5, 3));
        index.insert(circle(250, 250, 3));
        assert_eq!(index.len(), 2);

        assert_eq!(index.neighbors([0, 0], 5.0).count(), 1);
        assert_eq!(index.neighbors([100, 100], 5.0).count(), 1);
    }

    // Tests a zero cell size is treated as one pixel
    // Verified by dividing by the raw cell size
    #[test]
    fn test_zero_cell_size() {
        let mut index = GridIndex::new(10, 0);
        index.insert(circle(5, 5, 1));
        assert_eq!(index.neighbors([5, 5], 0.0).count(), 1);
    }
}
