use std::path::Path;

use serde::Deserialize;

use crate::error::{HabError, Result};
use crate::spectral::bands::StatToggles;
use crate::spectral::calibration::WavelengthAxis;

// ---------------------------------------------------------------------------
// Pipeline configuration
// ---------------------------------------------------------------------------

/// Two reference points tying pixel indices to known wavelengths.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CalibrationPoints {
    pub pixel0: usize,
    pub wavelength0: f64,
    pub pixel1: usize,
    pub wavelength1: f64,
}

impl Default for CalibrationPoints {
    /// The Ca G2 Fraunhofer line at pixel 73 and the O2 A band at pixel
    /// 941, the bench calibration of the survey spectrometer.
    fn default() -> Self {
        CalibrationPoints {
            pixel0: 73,
            wavelength0: 430.774,
            pixel1: 941,
            wavelength1: 759.370,
        }
    }
}

impl CalibrationPoints {
    /// Calibrated axis for a sensor with `pixel_count` columns. Reference
    /// pixels must lie on the sensor.
    pub fn axis(&self, pixel_count: usize) -> Result<WavelengthAxis> {
        if self.pixel0 >= pixel_count || self.pixel1 >= pixel_count {
            return Err(HabError::InvalidCalibration(format!(
                "reference pixels {}/{} fall outside the {pixel_count}-pixel sensor",
                self.pixel0, self.pixel1
            )));
        }
        WavelengthAxis::calibrate_two_point(
            pixel_count,
            self.pixel0,
            self.wavelength0,
            self.pixel1,
            self.wavelength1,
        )
    }
}

/// Settings for one processing run.
///
/// Loaded from JSON with every field optional:
///
/// ```json
/// {
///   "calibration": {"pixel0": 73, "wavelength0": 430.774,
///                   "pixel1": 941, "wavelength1": 759.370},
///   "apply_average": true,
///   "remove_bias": true,
///   "stat_toggles": {"average": true, "mean": false},
///   "water_threshold": 4.0
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub calibration: CalibrationPoints,
    /// Divide each sample by the sensor's summed-row count.
    pub apply_average: bool,
    /// Subtract the post-average minimum (dark-current floor).
    pub remove_bias: bool,
    pub stat_toggles: StatToggles,
    /// IR mean at or above this reads as land or sun glint.
    pub water_threshold: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            calibration: CalibrationPoints::default(),
            apply_average: true,
            remove_bias: true,
            stat_toggles: StatToggles::default(),
            water_threshold: 4.0,
        }
    }
}

impl PipelineConfig {
    /// Load from a JSON file; unspecified fields keep their defaults.
    pub fn from_file(path: &Path) -> Result<PipelineConfig> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}
