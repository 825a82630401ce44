//! End-to-end mission processing.
//!
//! ```text
//!  <mission>/<line>/hab_spectra/*-spec.json      GPS log
//!       │                                           │
//!       ▼                                           ▼
//!  read + normalize each capture          fixes sorted by time,
//!  (axis from two-point calibration)      course over ground filled
//!       │                                           │
//!       ▼                                           │
//!  band averages, fluorescence lines,               │
//!  IR water signal per capture                      │
//!       │                                           │
//!       └────────────── interpolate ◄───────────────┘
//!                            │
//!                            ▼
//!              CaptureRecord table → CSV / Parquet
//! ```

pub mod discovery;
pub mod export;
pub mod record;

use std::path::Path;

use log::{debug, info, warn};

use crate::config::PipelineConfig;
use crate::error::{HabError, Result};
use crate::spectral::bands::{self, Band};
use crate::spectral::calibration::WavelengthAxis;
use crate::spectral::capture::Capture;
use crate::spectral::features;
use crate::track::align::sample_track;
use crate::track::gps::read_gps_track;
use crate::track::time::FilenameTimestamp;
use record::CaptureRecord;

/// Process every capture of a mission into feature records, optionally
/// aligned with a GPS track.
///
/// Unreadable captures are logged and skipped; the run fails only when no
/// capture survives. Records come back sorted by capture time.
pub fn process_mission(
    mission_dir: &Path,
    gps_path: Option<&Path>,
    config: &PipelineConfig,
) -> Result<Vec<CaptureRecord>> {
    let capture_paths = discovery::capture_files(mission_dir)?;
    info!(
        "{} captures under {}",
        capture_paths.len(),
        mission_dir.display()
    );

    // The sensor's pixel count comes from the first readable capture; the
    // calibration then applies to the whole run.
    let mut probe = None;
    for path in &capture_paths {
        match Capture::read(path) {
            Ok(capture) => {
                probe = Some(capture);
                break;
            }
            Err(e) => debug!("probe skipped {}: {e}", path.display()),
        }
    }
    let Some(probe) = probe else {
        return Err(HabError::NotFound(format!(
            "no readable captures under {}",
            mission_dir.display()
        )));
    };
    let axis = config.calibration.axis(probe.pixel_count())?;
    info!(
        "calibrated {} pixels to {:.1}-{:.1} nm",
        axis.len(),
        axis.values()[0],
        axis.values()[axis.len() - 1]
    );
    let bands = bands::sentinel_s2a(&axis);
    for band in &bands {
        debug!("band {band}");
    }

    let mut records = Vec::with_capacity(capture_paths.len());
    for path in &capture_paths {
        match build_record(path, &axis, &bands, config) {
            Ok(record) => records.push(record),
            Err(e) => warn!("skipping {}: {e}", path.display()),
        }
    }
    if records.is_empty() {
        return Err(HabError::NotFound(format!(
            "no usable captures under {}",
            mission_dir.display()
        )));
    }
    record::sort_by_time(&mut records);

    if let Some(gps_path) = gps_path {
        align_with_track(&mut records, gps_path)?;
    }
    Ok(records)
}

fn build_record(
    path: &Path,
    axis: &WavelengthAxis,
    bands: &[Band],
    config: &PipelineConfig,
) -> Result<CaptureRecord> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| HabError::Parse(format!("bad capture path {}", path.display())))?;
    let ts = FilenameTimestamp::parse(file_name)?;

    let capture = Capture::read(path)?;
    if capture.pixel_count() != axis.len() {
        return Err(HabError::MalformedCapture {
            path: path.to_path_buf(),
            reason: format!(
                "pixel count {} does not match the calibrated axis ({})",
                capture.pixel_count(),
                axis.len()
            ),
        });
    }
    let y = capture.normalized(config.apply_average, config.remove_bias)?;

    let ir_mean = features::water_signal(axis, &y);
    Ok(CaptureRecord {
        sod: ts.sod,
        hhmmss: ts.hhmmss,
        path: path.to_path_buf(),
        ir_mean,
        is_water: ir_mean < config.water_threshold,
        fluorescence_683: features::fluorescence_683(axis, &y),
        fluorescence_700: features::fluorescence_700(axis, &y),
        band_stats: bands::update_all(&y, bands, config.stat_toggles),
        position: None,
    })
}

fn align_with_track(records: &mut [CaptureRecord], gps_path: &Path) -> Result<()> {
    let fixes = read_gps_track(gps_path)?;
    info!("{} GPS fixes from {}", fixes.len(), gps_path.display());
    let query: Vec<f64> = records.iter().map(|r| r.sod).collect();
    let samples = sample_track(&fixes, &query);
    for (record, sample) in records.iter_mut().zip(samples) {
        record.position = Some(sample);
    }
    Ok(())
}
