use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{HabError, Result};
use crate::spectral::calibration::WavelengthAxis;

// ---------------------------------------------------------------------------
// Capture files
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CaptureWire {
    hab_spec: HabSpecWire,
}

#[derive(Debug, Deserialize)]
struct HabSpecWire {
    spectra: Vec<f64>,
    summed_rows: u32,
}

/// One hyperspectral capture as written by the airborne sensor.
///
/// Expected file layout:
///
/// ```json
/// {
///   "hab_spec": {
///     "spectra": [10023.0, 10118.5, ...],
///     "summed_rows": 800
///   }
/// }
/// ```
///
/// `spectra` holds one column-summed intensity per pixel; `summed_rows` is
/// how many sensor rows were summed into each value and is the divisor that
/// recovers per-pixel averages.
#[derive(Debug, Clone)]
pub struct Capture {
    pub path: PathBuf,
    pub spectra: Vec<f64>,
    pub summed_rows: u32,
}

impl Capture {
    pub fn read(path: &Path) -> Result<Capture> {
        let text = std::fs::read_to_string(path)?;
        let wire: CaptureWire =
            serde_json::from_str(&text).map_err(|e| HabError::MalformedCapture {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        if wire.hab_spec.spectra.is_empty() {
            return Err(HabError::MalformedCapture {
                path: path.to_path_buf(),
                reason: "empty spectra array".to_string(),
            });
        }
        Ok(Capture {
            path: path.to_path_buf(),
            spectra: wire.hab_spec.spectra,
            summed_rows: wire.hab_spec.summed_rows,
        })
    }

    pub fn pixel_count(&self) -> usize {
        self.spectra.len()
    }

    /// Pixel-index placeholder axis for this capture, used until a two-point
    /// calibration is applied.
    pub fn pixel_axis(&self) -> WavelengthAxis {
        WavelengthAxis::uncalibrated(self.pixel_count())
    }

    /// Average the column-summed spectrum down to per-pixel values and strip
    /// the dark-current floor.
    ///
    /// Averaging runs first; the floor is the minimum of the already
    /// averaged samples. Running the two steps in the other order changes
    /// the output, so the order is part of the contract.
    pub fn normalized(&self, apply_average: bool, remove_bias: bool) -> Result<Vec<f64>> {
        let mut y = self.spectra.clone();
        if apply_average {
            if self.summed_rows == 0 {
                return Err(HabError::MalformedCapture {
                    path: self.path.clone(),
                    reason: "summed_rows is zero".to_string(),
                });
            }
            let rows = f64::from(self.summed_rows);
            for v in &mut y {
                *v /= rows;
            }
        }
        if remove_bias {
            let floor = y.iter().copied().fold(f64::INFINITY, f64::min);
            for v in &mut y {
                *v -= floor;
            }
        }
        Ok(y)
    }
}
