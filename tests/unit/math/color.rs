//! Tests for the lightness transform and alpha compositing

#[cfg(test)]
mod tests {
    use iconcloud::math::color::{blend_over, lightness, scale_alpha, tint_toward};

    // Tests positive factors tint toward white and negative shade toward black
    // Verified by applying the shade formula to both signs
    #[test]
    fn test_lightness_tint_and_shade() {
        assert_eq!(lightness([100, 50, 0], 0.0), [100, 50, 0]);
        assert_eq!(lightness([100, 50, 0], 1.0), [255, 255, 255]);
        assert_eq!(lightness([100, 50, 0], -1.0), [0, 0, 0]);
        assert_eq!(lightness([100, 50, 0], -0.5), [50, 25, 0]);

        let tinted = lightness([0, 0, 0], 0.25);
        assert_eq!(tinted, [63, 63, 63]);
    }

    // Tests factors beyond the unit range are clamped
    // Verified by removing the clamp on the factor
    #[test]
    fn test_lightness_clamps_factor() {
        assert_eq!(lightness([10, 20, 30], 4.0), [255, 255, 255]);
        assert_eq!(lightness([10, 20, 30], -4.0), [0, 0, 0]);
    }

    // Tests alpha scaling leaves color channels untouched
    // Verified by scaling every channel
    #[test]
    fn test_scale_alpha() {
        assert_eq!(scale_alpha([1, 2, 3, 200], 0.75), [1, 2, 3, 150]);
        assert_eq!(scale_alpha([1, 2, 3, 200], 0.0), [1, 2, 3, 0]);
    }

    // Tests source-over compositing for opaque, transparent and half covered sources
    // Verified by ignoring destination alpha
    #[test]
    fn test_blend_over() {
        let red = [255, 0, 0, 255];
        let blue = [0, 0, 255, 255];
        let clear = [0, 0, 0, 0];

        assert_eq!(blend_over(blue, red), red);
        assert_eq!(blend_over(blue, clear), blue);
        assert_eq!(blend_over(clear, red), red);

        let half_red = [255, 0, 0, 128];
        let mixed = blend_over(blue, half_red);
        assert_eq!(mixed[3], 255);
        assert!(mixed[0] > 120 && mixed[0] < 135);
        assert!(mixed[2] > 120 && mixed[2] < 135);

        // Over a transparent destination the source color is kept as is
        assert_eq!(blend_over(clear, half_red), [255, 0, 0, 128]);
    }

    // Tests tinting moves colors toward the overlay and keeps alpha
    // Verified by overwriting alpha with the overlay opacity
    #[test]
    fn test_tint_toward() {
        assert_eq!(tint_toward([0, 0, 0, 77], [200, 100, 0], 0.5), [100, 50, 0, 77]);
        assert_eq!(tint_toward([9, 9, 9, 255], [200, 100, 0], 0.0), [9, 9, 9, 255]);
        assert_eq!(tint_toward([9, 9, 9, 255], [200, 100, 0], 1.0), [200, 100, 0, 255]);
    }
}
