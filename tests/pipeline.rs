//! End-to-end run over a synthetic mission directory: captures on disk,
//! GPS track, feature extraction, CSV export, and re-read.

use std::fs;
use std::io::Write;
use std::path::Path;

use habspec::config::{CalibrationPoints, PipelineConfig};
use habspec::mission::{self, export};
use habspec::spectral::bands;
use habspec::HabError;

fn test_config() -> PipelineConfig {
    // 1000 pixels spanning 400-900 nm, so the fluorescence baselines and
    // the 840-860 nm water window all resolve to pixels.
    PipelineConfig {
        calibration: CalibrationPoints {
            pixel0: 0,
            wavelength0: 400.0,
            pixel1: 999,
            wavelength1: 900.0,
        },
        ..PipelineConfig::default()
    }
}

/// Per-pixel level as a function of wavelength, scaled to column-summed
/// counts with 800 summed rows.
fn write_capture(dir: &Path, name: &str, level: impl Fn(f64) -> f64) {
    let axis = test_config().calibration.axis(1000).unwrap();
    let spectra: Vec<f64> = axis.values().iter().map(|&w| level(w) * 800.0).collect();
    let body = serde_json::json!({
        "hab_spec": {"spectra": spectra, "summed_rows": 800}
    });
    let mut f = fs::File::create(dir.join(name)).unwrap();
    f.write_all(body.to_string().as_bytes()).unwrap();
}

fn build_mission(root: &Path) {
    let spectra_dir = root.join("165347/hab_spectra");
    fs::create_dir_all(&spectra_dir).unwrap();

    // Water captures: flat visible level, dark in the infrared.
    let water = |w: f64| if w > 800.0 { 1.0 } else { 5.0 };
    write_capture(&spectra_dir, "2021-0717-165400-000000-spec.json", water);
    write_capture(&spectra_dir, "2021-0717-165404-000000-spec.json", water);

    // Land capture: bright beyond the red edge.
    let land = |w: f64| if w > 700.0 { 10.0 } else { 5.0 };
    write_capture(&spectra_dir, "2021-0717-165402-000000-spec.json", land);

    // Corrupt capture; the pipeline logs and skips it.
    let mut f = fs::File::create(spectra_dir.join("2021-0717-165406-000000-spec.json")).unwrap();
    f.write_all(b"not json at all").unwrap();

    // Due-north GPS leg bracketing the captures: 16:53:50 to 16:54:30.
    let mut gps = fs::File::create(root.join("gps.txt")).unwrap();
    gps.write_all(
        b"# synthetic track\n\
          Week HMS Lat Lon Elev\n\
          2167 16:53:50 27.0 -82.0 400.0\n\
          2167 16:54:30 28.0 -82.0 500.0\n",
    )
    .unwrap();
}

#[test]
fn mission_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    build_mission(dir.path());

    let config = test_config();
    let gps_path = dir.path().join("gps.txt");
    let records =
        mission::process_mission(dir.path(), Some(gps_path.as_path()), &config).unwrap();

    // Three good captures survive the corrupt fourth, sorted by time.
    assert_eq!(records.len(), 3);
    let sods: Vec<f64> = records.iter().map(|r| r.sod).collect();
    assert_eq!(sods, vec![60840.0, 60842.0, 60844.0]);

    // Water/land discrimination against the default 4.0 threshold.
    assert_eq!(records[0].ir_mean, 0.0);
    assert!(records[0].is_water);
    assert_eq!(records[1].ir_mean, 5.0);
    assert!(!records[1].is_water);
    assert!(records[2].is_water);

    // Flat spectrum in the line and baseline windows: the correction is a
    // no-op and the line strength equals the normalized level.
    assert_eq!(records[0].fluorescence_683, 4.0);
    assert_eq!(records[0].fluorescence_700, 4.0);

    // Band averages for the visible bands of the flat water capture.
    let b2 = &records[0].band_stats["b2"];
    assert_eq!(b2.average, 4.0);
    assert_eq!(b2.mean, 0.0); // mean toggle defaults off

    // Positions interpolate the due-north leg; 16:54:00 is a quarter of
    // the way from the first fix to the second.
    let pos = records[0].position.unwrap();
    assert_eq!(pos.lat, 27.25);
    assert_eq!(pos.lon, -82.0);
    assert_eq!(pos.elev, 425.0);
    assert!(pos.course.abs() < 1e-6);

    // Export and re-read the CSV.
    let csv_path = dir.path().join("captures.csv");
    let band_names = bands::sentinel_band_names();
    export::write_csv(&records, &band_names, &csv_path).unwrap();

    let mut reader = csv::Reader::from_path(&csv_path).unwrap();
    let header: Vec<String> = reader
        .headers()
        .unwrap()
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(header[0], "sod");
    assert!(header.contains(&"b2".to_string()));
    assert!(header.contains(&"8a".to_string()));

    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 3);
    assert_eq!(&rows[0][0], "60840");
    assert_eq!(&rows[0][3], "27.25");
    assert_eq!(&rows[0][8], "true");
    assert_eq!(&rows[1][8], "false");
}

#[test]
fn mission_without_captures_reports_not_found() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("165347/hab_spectra")).unwrap();
    let err = mission::process_mission(dir.path(), None, &test_config()).unwrap_err();
    assert!(matches!(err, HabError::NotFound(_)));
}

#[test]
fn track_less_missions_leave_positions_unset() {
    let dir = tempfile::tempdir().unwrap();
    build_mission(dir.path());
    let records = mission::process_mission(dir.path(), None, &test_config()).unwrap();
    assert!(records.iter().all(|r| r.position.is_none()));
}
