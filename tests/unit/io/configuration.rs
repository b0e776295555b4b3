//! Tests for consistency between default parameters

#[cfg(test)]
mod tests {
    use iconcloud::algorithm::executor::LayoutConfig;
    use iconcloud::io::configuration::{
        BACKGROUND_ALPHA, CANVAS_SAFETY_MULTIPLIER, DEFAULT_BASE_ITEM_SIZE, DEFAULT_GAP_RATIO,
        DEFAULT_MARGIN_RATIO, DEFAULT_PATIENCE_BUDGET, GIF_FRAME_DELAY_MS, ICON_FILL_RATIO,
        MAX_CANVAS_SIZE, VIEWER_MIN_FRAME_DELAY_MS,
    };
    use iconcloud::spatial::canvas::canvas_size_for;

    // Tests the default parameters form a valid layout configuration
    // Verified by setting the default margin ratio to 0.5
    #[test]
    fn test_defaults_validate() {
        let config = LayoutConfig::for_item_count(10);
        assert_eq!(config.base_item_size, DEFAULT_BASE_ITEM_SIZE);
        assert_eq!(config.patience_budget, DEFAULT_PATIENCE_BUDGET);
        assert!((config.gap_ratio - DEFAULT_GAP_RATIO).abs() < f64::EPSILON);
        assert!((config.margin_ratio - DEFAULT_MARGIN_RATIO).abs() < f64::EPSILON);
        assert!(config.validate().is_ok());
    }

    // Tests the default canvas for a typical cloud fits below the maximum size
    // Verified by lowering MAX_CANVAS_SIZE below the typical canvas
    #[test]
    fn test_typical_canvas_fits() {
        let side = canvas_size_for(50, DEFAULT_BASE_ITEM_SIZE, CANVAS_SAFETY_MULTIPLIER);
        assert!(side < MAX_CANVAS_SIZE);
        assert!(side > 2 * DEFAULT_BASE_ITEM_SIZE);
    }

    // Tests rendering ratios stay in the unit interval
    // Verified by setting the icon fill ratio above one
    #[test]
    fn test_render_ratios() {
        assert!((0.0..=1.0).contains(&BACKGROUND_ALPHA));
        assert!((0.0..=1.0).contains(&ICON_FILL_RATIO));
    }

    // Tests the GIF delay is usable and skipping keeps the apparent speed
    // Verified by setting the frame delay to zero
    #[test]
    fn test_gif_delay() {
        let delays = [GIF_FRAME_DELAY_MS, VIEWER_MIN_FRAME_DELAY_MS];
        assert!(delays.iter().all(|&delay| delay > 0));
        let skip = VIEWER_MIN_FRAME_DELAY_MS.div_ceil(GIF_FRAME_DELAY_MS);
        assert!(skip * GIF_FRAME_DELAY_MS >= VIEWER_MIN_FRAME_DELAY_MS);
    }
}
