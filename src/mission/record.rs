use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::spectral::bands::BandStats;
use crate::track::align::TrackSample;

// ---------------------------------------------------------------------------
// Per-capture result rows
// ---------------------------------------------------------------------------

/// Everything the pipeline derives from a single capture, plus its position
/// once a GPS track has been applied.
#[derive(Debug, Clone)]
pub struct CaptureRecord {
    /// Capture time in seconds of the day, from the file name.
    pub sod: f64,
    pub hhmmss: String,
    pub path: PathBuf,
    /// 840-860 nm mean used for water/land discrimination.
    pub ir_mean: f64,
    /// `ir_mean` compared against the configured threshold.
    pub is_water: bool,
    pub fluorescence_683: f64,
    pub fluorescence_700: f64,
    /// Band name → statistics for the Sentinel emulation set.
    pub band_stats: BTreeMap<String, BandStats>,
    /// Filled by track alignment; None for track-less runs.
    pub position: Option<TrackSample>,
}

/// Stable ascending sort by capture time.
pub fn sort_by_time(records: &mut [CaptureRecord]) {
    records.sort_by(|a, b| a.sod.total_cmp(&b.sod));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(sod: f64, name: &str) -> CaptureRecord {
        CaptureRecord {
            sod,
            hhmmss: String::new(),
            path: PathBuf::from(name),
            ir_mean: 0.0,
            is_water: true,
            fluorescence_683: 0.0,
            fluorescence_700: 0.0,
            band_stats: BTreeMap::new(),
            position: None,
        }
    }

    #[test]
    fn sorts_by_capture_time() {
        let mut records = vec![record(30.0, "c"), record(10.0, "a"), record(20.0, "b")];
        sort_by_time(&mut records);
        let order: Vec<f64> = records.iter().map(|r| r.sod).collect();
        assert_eq!(order, vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn equal_times_keep_their_input_order() {
        let mut records = vec![record(10.0, "first"), record(10.0, "second")];
        sort_by_time(&mut records);
        assert_eq!(records[0].path, PathBuf::from("first"));
        assert_eq!(records[1].path, PathBuf::from("second"));
    }
}
