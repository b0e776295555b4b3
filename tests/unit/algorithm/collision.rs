//! Tests for margin and minimum-gap validation

#[cfg(test)]
mod tests {
    use iconcloud::algorithm::collision::{
        CollisionValidator, accepts_linear, conflicts, required_gap,
    };
    use iconcloud::spatial::{Canvas, Placement};
    use rand::{Rng, SeedableRng, rngs::StdRng};

    fn canvas() -> Canvas {
        Canvas::new(1000, 0.1).expect("valid canvas")
    }

    // Tests the gap scales with the larger radius
    // Verified by using the smaller radius
    #[test]
    fn test_required_gap() {
        assert!((required_gap(10, 40, 0.1) - 4.0).abs() < 1e-12);
        assert!((required_gap(40, 10, 0.5) - 20.0).abs() < 1e-12);
        assert!(required_gap(40, 10, 0.0).abs() < 1e-12);
    }

    // Tests a clearance equal to the gap is still a conflict
    // Verified by using a strict comparison in conflicts
    #[test]
    fn test_conflict_boundary() {
        let other = Placement {
            center: [0, 0],
            radius: 10,
        };
        // clearance 21 - 20 = 1, gap 0.1 * 10 = 1
        assert!(conflicts([21, 0], 10, &other, 0.1));
        assert!(!conflicts([22, 0], 10, &other, 0.1));
        // Touching circles conflict even without a gap
        assert!(conflicts([0, 20], 10, &other, 0.0));
        assert!(!conflicts([0, 21], 10, &other, 0.0));
    }

    // Tests the margin band is enforced before any circle exists
    // Verified by skipping the canvas check when the index is empty
    #[test]
    fn test_margin_rejection() {
        let validator = CollisionValidator::new(canvas(), 0.1, 50);
        assert!(validator.accepts([100, 900], 50));
        assert!(!validator.accepts([99, 500], 50));
        assert!(!validator.accepts([500, 901], 50));
    }

    // Tests inserted circles block nearby candidates until cleared
    // Verified by not inserting into the index
    #[test]
    fn test_insert_and_clear() {
        let mut validator = CollisionValidator::new(canvas(), 0.1, 50);
        validator.insert(Placement {
            center: [500, 500],
            radius: 50,
        });
        assert_eq!(validator.placed(), 1);
        assert!(!validator.accepts([560, 500], 20));
        assert!(validator.accepts([580, 500], 20));

        validator.clear();
        assert_eq!(validator.placed(), 0);
        assert!(validator.accepts([560, 500], 20));
        assert_eq!(validator.canvas(), canvas());
    }

    // Tests a circle larger than the cell size is still found by distant queries
    // Verified by using the query radius alone as reach
    #[test]
    fn test_large_circle_beyond_cell_size() {
        let mut validator = CollisionValidator::new(canvas(), 0.0, 10);
        validator.insert(Placement {
            center: [300, 300],
            radius: 200,
        });
        assert!(!validator.accepts([450, 300], 5));
        assert!(validator.accepts([506, 300], 5));
    }

    // Tests the grid index agrees with a linear scan on random layouts
    // Verified by shrinking the neighbor reach to the candidate radius
    #[test]
    fn test_index_matches_linear_scan() {
        let canvas = canvas();
        let mut rng = StdRng::seed_from_u64(11);
        let mut validator = CollisionValidator::new(canvas, 0.2, 40);
        let mut placed = Vec::new();

        for _ in 0..60 {
            let placement = Placement {
                center: [rng.random_range(0..1000), rng.random_range(0..1000)],
                radius: rng.random_range(1..80),
            };
            validator.insert(placement);
            placed.push(placement);
        }

        for _ in 0..2000 {
            let center = [rng.random_range(-50..1050), rng.random_range(-50..1050)];
            let radius = rng.random_range(1..120);
            assert_eq!(
                validator.accepts(center, radius),
                accepts_linear(&canvas, &placed, center, radius, 0.2),
                "disagreement at {center:?} r={radius}"
            );
        }
    }
}
