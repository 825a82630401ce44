//! Spectral layer: capture loading, wavelength calibration, band
//! statistics, and per-spectrum features.
//!
//! ```text
//!  *-spec.json
//!       │
//!       ▼
//!  ┌─────────────┐
//!  │ capture     │  read + normalize → intensity per pixel
//!  └─────────────┘
//!       │
//!       ▼
//!  ┌─────────────┐
//!  │ calibration │  pixel index ↔ wavelength (two-point linear fit)
//!  └─────────────┘
//!       │
//!       ▼
//!  ┌─────────────┐
//!  │ bands       │  windowed statistics (Sentinel-2A emulation)
//!  │ features    │  fluorescence lines, IR water signal
//!  └─────────────┘
//! ```

pub mod bands;
pub mod calibration;
pub mod capture;
pub mod features;
