//! Lightness transform and alpha blending for RGBA pixels

/// Shift a color toward white (positive `factor`) or black (negative `factor`)
///
/// `factor` is clamped to `[-1, 1]`; zero returns the color unchanged.
pub fn lightness(color: [u8; 3], factor: f64) -> [u8; 3] {
    let f = factor.clamp(-1.0, 1.0);
    if f == 0.0 {
        return color;
    }

    color.map(|channel| {
        let c = f64::from(channel);
        let shifted = if f > 0.0 {
            (255.0 - c).mul_add(f, c)
        } else {
            c * (1.0 + f)
        };
        shifted.clamp(0.0, 255.0) as u8
    })
}

/// Scale the alpha channel of a pixel by `factor`
pub fn scale_alpha(pixel: [u8; 4], factor: f64) -> [u8; 4] {
    let alpha = (f64::from(pixel[3]) * factor.clamp(0.0, 1.0)).round() as u8;
    [pixel[0], pixel[1], pixel[2], alpha]
}

/// Porter-Duff "source over" compositing of `src` onto `dst`
///
/// Both pixels use straight (non-premultiplied) alpha.
pub fn blend_over(dst: [u8; 4], src: [u8; 4]) -> [u8; 4] {
    let src_a = f64::from(src[3]) / 255.0;
    if src_a <= 0.0 {
        return dst;
    }
    let dst_a = f64::from(dst[3]) / 255.0;
    let out_a = dst_a.mul_add(1.0 - src_a, src_a);
    if out_a <= 0.0 {
        return [0, 0, 0, 0];
    }

    let mut out = [0u8; 4];
    for (channel, (&s, &d)) in out.iter_mut().zip(src.iter().zip(dst.iter())).take(3) {
        let value = (f64::from(s) * src_a + f64::from(d) * dst_a * (1.0 - src_a)) / out_a;
        *channel = value.round().clamp(0.0, 255.0) as u8;
    }
    out[3] = (out_a * 255.0).round() as u8;
    out
}

/// Mix `overlay` into the color channels of `pixel` at the given opacity, keeping its alpha
pub fn tint_toward(pixel: [u8; 4], overlay: [u8; 3], opacity: f64) -> [u8; 4] {
    let t = opacity.clamp(0.0, 1.0);
    let mix = |base: u8, over: u8| {
        (f64::from(over) - f64::from(base))
            .mul_add(t, f64::from(base))
            .round() as u8
    };
    [
        mix(pixel[0], overlay[0]),
        mix(pixel[1], overlay[1]),
        mix(pixel[2], overlay[2]),
        pixel[3],
    ]
}
