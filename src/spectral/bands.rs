use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;

use crate::color;
use crate::spectral::calibration::WavelengthAxis;

// ---------------------------------------------------------------------------
// Sentinel-2A band emulation
// ---------------------------------------------------------------------------

/// (name, center nm, width nm) of the Sentinel-2A MSI bands the survey
/// emulates, in the order downstream tables report them.
pub const SENTINEL_S2A: &[(&str, f64, f64)] = &[
    ("b2", 492.7, 65.0),
    ("b3", 559.8, 35.0),
    ("b4", 664.6, 30.0),
    ("b8", 832.8, 105.0),
    ("b5", 704.1, 14.0),
    ("b6", 740.5, 14.0),
    ("b7", 782.8, 19.0),
    ("8a", 864.7, 21.0),
];

/// Band names in [`SENTINEL_S2A`] order, the column order of exported
/// tables.
pub fn sentinel_band_names() -> Vec<String> {
    SENTINEL_S2A.iter().map(|&(name, _, _)| name.to_string()).collect()
}

/// A named wavelength window over a calibrated axis.
///
/// The pixel window is resolved against the axis at construction time, so
/// bands must be rebuilt whenever the calibration changes.
#[derive(Debug, Clone)]
pub struct Band {
    pub name: String,
    pub center_nm: f64,
    pub width_nm: f64,
    /// Display swatch, "#rrggbbaa".
    pub color: String,
    pub w_low: f64,
    pub w_high: f64,
    /// Window bounds as pixels; -1 when the bound falls outside the axis.
    pub px_low: isize,
    pub px_high: isize,
    /// Pixel indices strictly inside (w_low, w_high).
    pub pixels: Vec<usize>,
}

impl Band {
    pub fn new(axis: &WavelengthAxis, name: &str, center_nm: f64, width_nm: f64, color: String) -> Band {
        let w_low = center_nm - width_nm / 2.0;
        let w_high = center_nm + width_nm / 2.0;
        Band {
            name: name.to_string(),
            center_nm,
            width_nm,
            color,
            w_low,
            w_high,
            px_low: axis.wavelength_to_pixel(w_low),
            px_high: axis.wavelength_to_pixel(w_high),
            pixels: axis.wavelength_range_pixels(w_low, w_high),
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:7.2} {:6.1} {} {:7.2} {:5} {:7.2} {:5}",
            self.name, self.center_nm, self.width_nm, self.color, self.w_low, self.px_low,
            self.w_high, self.px_high
        )
    }
}

/// Build the Sentinel-2A emulation set against `axis`.
///
/// Visible bands take their spectral hex color; the NIR bands have no
/// visible equivalent and get evenly spaced distinct hues instead.
pub fn sentinel_s2a(axis: &WavelengthAxis) -> Vec<Band> {
    SENTINEL_S2A
        .iter()
        .enumerate()
        .map(|(i, &(name, center, width))| {
            let color = if (380.0..=780.0).contains(&center) {
                color::wavelength_to_rgb_hex(center, 255)
            } else {
                color::distinct_hex(i, SENTINEL_S2A.len())
            };
            Band::new(axis, name, center, width, color)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Windowed statistics
// ---------------------------------------------------------------------------

/// Process-wide switches for which band statistics get computed.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct StatToggles {
    pub average: bool,
    pub mean: bool,
}

impl Default for StatToggles {
    fn default() -> Self {
        StatToggles {
            average: true,
            mean: false,
        }
    }
}

/// Statistics of one band window against one spectrum.
///
/// A statistic whose toggle is off reads 0.0. A window that selects no
/// pixels yields NaN, never an error; bands outside the calibrated range
/// are expected on narrow sensors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandStats {
    pub mean: f64,
    pub average: f64,
}

/// Arithmetic mean over the selected pixels. Empty selections give NaN.
///
/// `spectrum` must be at least as long as the axis the pixel window was
/// built from.
pub(crate) fn window_mean(spectrum: &[f64], pixels: &[usize]) -> f64 {
    let sum: f64 = pixels.iter().map(|&p| spectrum[p]).sum();
    sum / pixels.len() as f64
}

/// Unit-weight running accumulator; equal to [`window_mean`] for any window,
/// including the empty one (0.0 / 0.0 is NaN).
fn window_average(spectrum: &[f64], pixels: &[usize]) -> f64 {
    let mut acc = 0.0;
    let mut weight = 0.0;
    for &p in pixels {
        acc += spectrum[p];
        weight += 1.0;
    }
    acc / weight
}

/// Statistics for one band, honoring the process-wide toggles.
pub fn compute_band_stats(spectrum: &[f64], band: &Band, toggles: StatToggles) -> BandStats {
    BandStats {
        mean: if toggles.mean {
            window_mean(spectrum, &band.pixels)
        } else {
            0.0
        },
        average: if toggles.average {
            window_average(spectrum, &band.pixels)
        } else {
            0.0
        },
    }
}

/// Recompute every band's statistics for one spectrum.
pub fn update_all(spectrum: &[f64], bands: &[Band], toggles: StatToggles) -> BTreeMap<String, BandStats> {
    bands
        .iter()
        .map(|b| (b.name.clone(), compute_band_stats(spectrum, b, toggles)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn survey_axis() -> WavelengthAxis {
        WavelengthAxis::calibrate_two_point(1000, 0, 400.0, 999, 800.0).unwrap()
    }

    #[test]
    fn band_window_matches_range_query() {
        let axis = survey_axis();
        let bands = sentinel_s2a(&axis);
        let b2 = bands.iter().find(|b| b.name == "b2").unwrap();
        assert_eq!(b2.pixels, axis.wavelength_range_pixels(460.2, 525.2));
        assert!(!b2.pixels.is_empty());
    }

    #[test]
    fn bands_come_back_in_table_order() {
        let axis = survey_axis();
        let names: Vec<String> = sentinel_s2a(&axis).iter().map(|b| b.name.clone()).collect();
        assert_eq!(names, sentinel_band_names());
        assert_eq!(names[0], "b2");
        assert_eq!(names[7], "8a");
    }

    #[test]
    fn nir_bands_get_distinct_swatches() {
        let axis = survey_axis();
        let bands = sentinel_s2a(&axis);
        let b4 = bands.iter().find(|b| b.name == "b4").unwrap();
        let b8 = bands.iter().find(|b| b.name == "b8").unwrap();
        // 664.6 nm is visible red; 832.8 nm would map to black.
        assert_eq!(b4.color, color::wavelength_to_rgb_hex(664.6, 255));
        assert_ne!(b8.color, "#000000ff");
    }

    #[test]
    fn default_toggles_fill_average_only() {
        let axis = survey_axis();
        let bands = sentinel_s2a(&axis);
        let y = vec![2.0; axis.len()];
        let stats = compute_band_stats(&y, &bands[0], StatToggles::default());
        assert_eq!(stats.average, 2.0);
        assert_eq!(stats.mean, 0.0);
    }

    #[test]
    fn mean_and_average_agree_when_both_enabled() {
        let axis = survey_axis();
        let bands = sentinel_s2a(&axis);
        let y: Vec<f64> = (0..axis.len()).map(|i| (i % 13) as f64).collect();
        let toggles = StatToggles {
            average: true,
            mean: true,
        };
        for band in &bands {
            let stats = compute_band_stats(&y, band, toggles);
            if !band.pixels.is_empty() {
                assert!(
                    (stats.mean - stats.average).abs() < 1e-12,
                    "band {} disagrees",
                    band.name
                );
            }
        }
    }

    #[test]
    fn empty_window_yields_nan() {
        let axis = survey_axis();
        // 864.7 nm sits past the 800 nm end of this axis.
        let band = Band::new(&axis, "8a", 864.7, 21.0, "#808080ff".to_string());
        assert!(band.pixels.is_empty());
        assert_eq!(band.px_low, -1);
        let y = vec![1.0; axis.len()];
        let toggles = StatToggles {
            average: true,
            mean: true,
        };
        let stats = compute_band_stats(&y, &band, toggles);
        assert!(stats.average.is_nan());
        assert!(stats.mean.is_nan());
    }

    #[test]
    fn update_all_covers_every_band() {
        let axis = survey_axis();
        let bands = sentinel_s2a(&axis);
        let y = vec![1.0; axis.len()];
        let stats = update_all(&y, &bands, StatToggles::default());
        assert_eq!(stats.len(), bands.len());
        for band in &bands {
            assert!(stats.contains_key(&band.name), "missing {}", band.name);
        }
    }
}
