use crate::spectral::bands::window_mean;
use crate::spectral::calibration::WavelengthAxis;

// ---------------------------------------------------------------------------
// Fluorescence lines
// ---------------------------------------------------------------------------

/// Baseline-corrected strength of an emission line.
///
/// The raw strength is the mean over the open window (`fl_start`,
/// `fl_stop`). The continuum under the line is estimated from two 1 nm
/// windows starting at `base_start` and `base_stop`, interpolated linearly
/// to the line center, and the interpolated offset is added to the raw
/// strength. Windows that select no pixels propagate NaN.
pub fn fluorescence(
    axis: &WavelengthAxis,
    spectrum: &[f64],
    fl_start: f64,
    fl_stop: f64,
    base_start: f64,
    base_stop: f64,
) -> f64 {
    let fl_sig = window_mean(spectrum, &axis.wavelength_range_pixels(fl_start, fl_stop));
    let by = window_mean(spectrum, &axis.wavelength_range_pixels(base_start, base_start + 1.0));
    let ey = window_mean(spectrum, &axis.wavelength_range_pixels(base_stop, base_stop + 1.0));
    let center_nm = fl_start + (fl_stop - fl_start) / 2.0;
    let slope = (ey - by) / (base_stop - base_start);
    fl_sig + slope * (center_nm - base_start)
}

/// Chlorophyll-a solar-induced fluorescence at 683 nm.
pub fn fluorescence_683(axis: &WavelengthAxis, spectrum: &[f64]) -> f64 {
    fluorescence(axis, spectrum, 678.0, 688.0, 668.0, 740.0)
}

/// The secondary fluorescence peak at 700 nm.
pub fn fluorescence_700(axis: &WavelengthAxis, spectrum: &[f64]) -> f64 {
    fluorescence(axis, spectrum, 693.0, 710.0, 668.0, 740.0)
}

// ---------------------------------------------------------------------------
// Water / land discrimination
// ---------------------------------------------------------------------------

/// Mean intensity strictly between 840 and 860 nm.
///
/// Water absorbs strongly in the near infrared, so low values indicate open
/// water and high values land or sun glint. This is the raw indicator only;
/// callers compare it against a survey-specific threshold (around 4.0 at
/// nominal sensor gain).
pub fn water_signal(axis: &WavelengthAxis, spectrum: &[f64]) -> f64 {
    window_mean(spectrum, &axis.wavelength_range_pixels(840.0, 860.0))
}
