use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Wavelength → RGB approximation
// ---------------------------------------------------------------------------

/// Map a visible wavelength to an RGBA quadruple.
///
/// Piecewise-linear approximation of the visible spectrum (380-780 nm) with
/// intensity rolled off below 420 nm and above 700 nm; wavelengths outside
/// 380-780 nm come back black. Channel math runs in unit floats on the
/// truncated integer wavelength and truncates again to 0-255 on the way
/// out, so adjacent wavelengths can share a color.
pub fn wavelength_to_rgb(wavelength_nm: f64, alpha: u8) -> [u8; 4] {
    let w = wavelength_nm as i32;

    let (r, g, b) = if (380..440).contains(&w) {
        (-(w as f64 - 440.0) / (440.0 - 350.0), 0.0, 1.0)
    } else if (440..490).contains(&w) {
        (0.0, (w as f64 - 440.0) / (490.0 - 440.0), 1.0)
    } else if (490..510).contains(&w) {
        (0.0, 1.0, -(w as f64 - 510.0) / (510.0 - 490.0))
    } else if (510..580).contains(&w) {
        ((w as f64 - 510.0) / (580.0 - 510.0), 1.0, 0.0)
    } else if (580..645).contains(&w) {
        (1.0, -(w as f64 - 645.0) / (645.0 - 580.0), 0.0)
    } else if (645..=780).contains(&w) {
        (1.0, 0.0, 0.0)
    } else {
        (0.0, 0.0, 0.0)
    };

    // Intensity falls off toward both ends of the visible range.
    let intensity = if (380..420).contains(&w) {
        0.3 + 0.7 * (w as f64 - 350.0) / (420.0 - 350.0)
    } else if (420..=700).contains(&w) {
        1.0
    } else if (701..=780).contains(&w) {
        0.3 + 0.7 * (780.0 - w as f64) / (780.0 - 700.0)
    } else {
        0.0
    };
    let scale = intensity * 255.0;

    [
        (scale * r) as u8,
        (scale * g) as u8,
        (scale * b) as u8,
        alpha,
    ]
}

/// Same mapping as [`wavelength_to_rgb`], formatted "#rrggbbaa".
pub fn wavelength_to_rgb_hex(wavelength_nm: f64, alpha: u8) -> String {
    let [r, g, b, a] = wavelength_to_rgb(wavelength_nm, alpha);
    format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
}

// ---------------------------------------------------------------------------
// Distinct-hue palette
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn distinct_palette(n: usize) -> Vec<[u8; 3]> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            [
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            ]
        })
        .collect()
}

/// Hex swatch ("#rrggbbff") for slot `i` of an `n`-slot distinct palette.
/// Out-of-range slots fall back to gray.
pub fn distinct_hex(i: usize, n: usize) -> String {
    match distinct_palette(n).get(i) {
        Some([r, g, b]) => format!("#{r:02x}{g:02x}{b:02x}ff"),
        None => "#808080ff".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cyan_500nm_truncates_the_blue_channel() {
        assert_eq!(wavelength_to_rgb(500.0, 255), [0, 255, 127, 255]);
    }

    #[test]
    fn deep_red_is_pure_red() {
        assert_eq!(wavelength_to_rgb(660.0, 255), [255, 0, 0, 255]);
    }

    #[test]
    fn outside_the_visible_range_is_black() {
        assert_eq!(wavelength_to_rgb(200.0, 255), [0, 0, 0, 255]);
        assert_eq!(wavelength_to_rgb(832.8, 255), [0, 0, 0, 255]);
        // Alpha passes through untouched.
        assert_eq!(wavelength_to_rgb(900.0, 40), [0, 0, 0, 40]);
    }

    #[test]
    fn fractional_wavelengths_truncate_before_banding() {
        // 439.9 nm lands in the violet segment, not the blue one.
        let violet = wavelength_to_rgb(439.9, 255);
        assert_eq!(violet, wavelength_to_rgb(439.0, 255));
        assert_ne!(violet, wavelength_to_rgb(440.0, 255));
    }

    #[test]
    fn hex_is_lowercase_rrggbbaa() {
        assert_eq!(wavelength_to_rgb_hex(500.0, 255), "#00ff7fff");
        assert_eq!(wavelength_to_rgb_hex(500.0, 128), "#00ff7f80");
        assert_eq!(wavelength_to_rgb_hex(200.0, 0), "#00000000");
    }

    #[test]
    fn palette_has_requested_length_and_distinct_entries() {
        let palette = distinct_palette(8);
        assert_eq!(palette.len(), 8);
        for pair in palette.windows(2) {
            assert_ne!(pair[0], pair[1]);
        }
        assert!(distinct_palette(0).is_empty());
    }

    #[test]
    fn out_of_range_swatch_falls_back_to_gray() {
        assert_eq!(distinct_hex(9, 4), "#808080ff");
    }
}
