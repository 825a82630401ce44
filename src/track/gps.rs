use std::path::Path;

use geographiclib_rs::{Geodesic, InverseGeodesic};

use crate::error::{HabError, Result};
use crate::track::time::colons_to_sod;

// ---------------------------------------------------------------------------
// GPS track
// ---------------------------------------------------------------------------

/// One fix from the aircraft GPS logger.
#[derive(Debug, Clone, PartialEq)]
pub struct GpsFix {
    /// Seconds of the day.
    pub sod: f64,
    /// Source "HH:MM:SS" string.
    pub hms: String,
    pub lat: f64,
    pub lon: f64,
    pub elev: f64,
    /// Initial bearing to the next fix in the track, degrees in [0, 360).
    /// The final fix has no successor and carries a literal 0.0.
    pub course: f64,
}

/// Read a whitespace-delimited GPS log.
///
/// Lines starting with `#` are comments. The first data line is a header
/// naming at least `HMS`, `Lat`, `Lon` and `Elev`; extra columns are
/// ignored. Fixes come back sorted by time with `course` filled in.
pub fn read_gps_track(path: &Path) -> Result<Vec<GpsFix>> {
    let text = std::fs::read_to_string(path)?;
    let mut lines = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'));

    let header: Vec<&str> = lines
        .next()
        .ok_or_else(|| {
            HabError::Parse(format!("GPS file {} has no header line", path.display()))
        })?
        .split_whitespace()
        .collect();
    let column = |name: &str| -> Result<usize> {
        header.iter().position(|h| *h == name).ok_or_else(|| {
            HabError::Parse(format!(
                "GPS file {} is missing the {name} column",
                path.display()
            ))
        })
    };
    let hms_col = column("HMS")?;
    let lat_col = column("Lat")?;
    let lon_col = column("Lon")?;
    let elev_col = column("Elev")?;

    let mut fixes = Vec::new();
    for (row, line) in lines.enumerate() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        let number = |idx: usize, name: &str| -> Result<f64> {
            let raw = fields.get(idx).ok_or_else(|| {
                HabError::Parse(format!("GPS row {row} is missing the {name} column"))
            })?;
            raw.parse()
                .map_err(|_| HabError::Parse(format!("GPS row {row}: bad {name} value {raw:?}")))
        };
        let hms = fields.get(hms_col).copied().ok_or_else(|| {
            HabError::Parse(format!("GPS row {row} is missing the HMS column"))
        })?;
        fixes.push(GpsFix {
            sod: colons_to_sod(hms)?,
            hms: hms.to_string(),
            lat: number(lat_col, "Lat")?,
            lon: number(lon_col, "Lon")?,
            elev: number(elev_col, "Elev")?,
            course: 0.0,
        });
    }
    if fixes.is_empty() {
        return Err(HabError::Parse(format!(
            "GPS file {} contains no fixes",
            path.display()
        )));
    }

    fixes.sort_by(|a, b| a.sod.total_cmp(&b.sod));

    // Course over ground is the bearing toward the successor fix.
    for i in 0..fixes.len() - 1 {
        fixes[i].course = bearing(fixes[i].lat, fixes[i].lon, fixes[i + 1].lat, fixes[i + 1].lon);
    }
    Ok(fixes)
}

/// Initial bearing from (`lat1`, `lon1`) to (`lat2`, `lon2`) along the
/// WGS84 geodesic, degrees in [0, 360).
pub fn bearing(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let geod = Geodesic::wgs84();
    let (_s12, azi1, _azi2, _a12): (f64, f64, f64, f64) = geod.inverse(lat1, lon1, lat2, lon2);
    azi1.rem_euclid(360.0)
}
