use chrono::{NaiveTime, Timelike, Utc};

use crate::error::{HabError, Result};

// ---------------------------------------------------------------------------
// Seconds-of-day conversions
// ---------------------------------------------------------------------------

/// Convert a compact "HHMMSS" clock string plus a microseconds string to
/// float seconds of the day.
///
/// `"123456"` is 12:34:56; a microseconds string `"954561"` contributes
/// 0.954561 s.
pub fn compact_to_sod(hhmmss: &str, microseconds: &str) -> Result<f64> {
    if hhmmss.len() != 6 {
        return Err(HabError::Parse(format!(
            "expected a 6-digit HHMMSS timestamp, got {hhmmss:?}"
        )));
    }
    let field = |range: std::ops::Range<usize>| -> Result<u32> {
        hhmmss
            .get(range)
            .and_then(|s| s.parse::<u32>().ok())
            .ok_or_else(|| HabError::Parse(format!("bad HHMMSS timestamp {hhmmss:?}")))
    };
    let hh = field(0..2)?;
    let mm = field(2..4)?;
    let ss = field(4..6)?;
    let usecs: u32 = microseconds
        .parse()
        .map_err(|_| HabError::Parse(format!("bad microseconds field {microseconds:?}")))?;
    Ok(f64::from(hh) * 3600.0 + f64::from(mm) * 60.0 + f64::from(ss) + f64::from(usecs) * 1e-6)
}

/// Convert "HH:MM:SS" to float seconds of the day. A fractional tail is
/// carried through ("12:34:56.789" gives 45296.789).
pub fn colons_to_sod(timestamp: &str) -> Result<f64> {
    let (whole, frac) = match timestamp.split_once('.') {
        Some((w, f)) => (w, Some(f)),
        None => (timestamp, None),
    };
    let t = NaiveTime::parse_from_str(whole, "%H:%M:%S")
        .map_err(|e| HabError::Parse(format!("bad HH:MM:SS timestamp {timestamp:?}: {e}")))?;
    let mut sod = f64::from(t.num_seconds_from_midnight());
    if let Some(frac) = frac {
        let fractional: f64 = format!("0.{frac}")
            .parse()
            .map_err(|_| HabError::Parse(format!("bad fractional seconds in {timestamp:?}")))?;
        sod += fractional;
    }
    Ok(sod)
}

// ---------------------------------------------------------------------------
// Capture filename timestamps
// ---------------------------------------------------------------------------

/// Timestamp fields embedded in capture and photo filenames of the form
/// `2021-0717-165348-272814-spec.json` (HHMMSS, then microseconds, counted
/// from the end so the tail suffix does not matter).
#[derive(Debug, Clone, PartialEq)]
pub struct FilenameTimestamp {
    pub hhmmss: String,
    pub microseconds: String,
    pub sod: f64,
}

impl FilenameTimestamp {
    /// Parse the dash-delimited fields third and second from the end.
    pub fn parse(file_name: &str) -> Result<FilenameTimestamp> {
        let parts: Vec<&str> = file_name.split('-').collect();
        if parts.len() < 3 {
            return Err(HabError::Parse(format!(
                "file name {file_name:?} does not embed a -HHMMSS-FFFFFF- timestamp"
            )));
        }
        let hhmmss = parts[parts.len() - 3];
        let microseconds = parts[parts.len() - 2];
        let sod = compact_to_sod(hhmmss, microseconds)?;
        Ok(FilenameTimestamp {
            hhmmss: hhmmss.to_string(),
            microseconds: microseconds.to_string(),
            sod,
        })
    }
}

/// Current UTC time in the log stamp layout, e.g. "2021-0812 15:39:41".
pub fn now_utc() -> String {
    Utc::now().format("%Y-%m%d %H:%M:%S").to_string()
}
