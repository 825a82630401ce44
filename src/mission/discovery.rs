use std::fs;
use std::path::{Path, PathBuf};

use log::warn;

use crate::error::{HabError, Result};
use crate::track::time::FilenameTimestamp;

// ---------------------------------------------------------------------------
// Mission directory indexing
// ---------------------------------------------------------------------------
// Layout contract:
//   <mission>/<flight line>/hab_spectra/YYYY-MMDD-HHMMSS-FFFFFF-spec.json
//   <mission>/<flight line>/hab_rgb/YYYY-MMDD-HHMMSS-FFFFFF-rgb.jpg
// Flight-line directories are named by their start clock (all digits).

pub const SPECTRA_SUBDIR: &str = "hab_spectra";
pub const RGB_SUBDIR: &str = "hab_rgb";
pub const CAPTURE_SUFFIX: &str = "-spec.json";
pub const RGB_SUFFIX: &str = "-rgb.jpg";

/// Flight-line subdirectories of a mission: names that start with a digit
/// and do not end in a lowercase letter. That skips annotation directories
/// ("165348-bad", "notes") while keeping plain clock names.
pub fn flight_lines(mission_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut lines = Vec::new();
    for entry in fs::read_dir(mission_dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        let starts_digit = name.chars().next().is_some_and(|c| c.is_ascii_digit());
        let ends_lower = name.chars().last().is_some_and(|c| c.is_ascii_lowercase());
        if starts_digit && !ends_lower {
            lines.push(entry.path());
        }
    }
    lines.sort();
    Ok(lines)
}

/// Sorted listing of `dir` restricted to file names ending in `suffix`.
pub fn files_with_suffix(dir: &Path, suffix: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let matches = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(suffix));
        if matches && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Every capture file under `<mission>/<line>/hab_spectra/`, sorted.
/// A mission with no captures at all is an error; a flight line with no
/// spectra directory only logs a warning.
pub fn capture_files(mission_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut captures = Vec::new();
    for line in flight_lines(mission_dir)? {
        let dir = line.join(SPECTRA_SUBDIR);
        if !dir.is_dir() {
            warn!("flight line {} has no {SPECTRA_SUBDIR} directory", line.display());
            continue;
        }
        captures.extend(files_with_suffix(&dir, CAPTURE_SUFFIX)?);
    }
    captures.sort();
    if captures.is_empty() {
        return Err(HabError::NotFound(format!(
            "no *{CAPTURE_SUFFIX} captures under {}",
            mission_dir.display()
        )));
    }
    Ok(captures)
}

/// Find the RGB photo taken nearest a capture: same flight line, same date
/// and HHMMSS second, microseconds wildcarded. The first match in sorted
/// order wins.
pub fn nearest_rgb_photo(capture_path: &Path) -> Result<PathBuf> {
    let file_name = capture_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| HabError::Parse(format!("bad capture path {}", capture_path.display())))?;
    // Validates the -HHMMSS-FFFFFF- fields before we go looking.
    let ts = FilenameTimestamp::parse(file_name)?;

    // "2021-0717-165348-272814-spec.json" → "2021-0717-165348-".
    let parts: Vec<&str> = file_name.split('-').collect();
    let prefix = format!("{}-", parts[..parts.len() - 2].join("-"));

    // <line>/hab_spectra/<name> → <line>/hab_rgb/
    let rgb_dir = capture_path
        .parent()
        .and_then(Path::parent)
        .map(|line| line.join(RGB_SUBDIR))
        .ok_or_else(|| {
            HabError::NotFound(format!(
                "no {RGB_SUBDIR} directory beside {}",
                capture_path.display()
            ))
        })?;
    if !rgb_dir.is_dir() {
        return Err(HabError::NotFound(format!(
            "no {RGB_SUBDIR} directory at {}",
            rgb_dir.display()
        )));
    }

    files_with_suffix(&rgb_dir, RGB_SUFFIX)?
        .into_iter()
        .find(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with(&prefix))
        })
        .ok_or_else(|| {
            HabError::NotFound(format!(
                "no RGB photo matching {prefix}*{RGB_SUFFIX} for second {} in {}",
                ts.hhmmss,
                rgb_dir.display()
            ))
        })
}
