//! Hyperspectral processing for aerial harmful-algal-bloom surveys.
//!
//! A mission directory of per-capture spectra is calibrated to physical
//! wavelengths, reduced to water and fluorescence indicators plus
//! Sentinel-style band averages, aligned with the aircraft GPS track, and
//! written out as a per-capture feature table.

pub mod color;
pub mod config;
pub mod error;
pub mod mission;
pub mod spectral;
pub mod track;

pub use config::{CalibrationPoints, PipelineConfig};
pub use error::{HabError, Result};
pub use mission::process_mission;
pub use mission::record::CaptureRecord;
pub use spectral::calibration::WavelengthAxis;
