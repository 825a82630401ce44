use crate::track::gps::GpsFix;

// ---------------------------------------------------------------------------
// Aligning capture times with the GPS track
// ---------------------------------------------------------------------------

/// Piecewise-linear interpolation of `(xs, ys)` samples at one query point.
///
/// `xs` must be sorted ascending. Queries outside the sampled range take
/// the nearest edge value rather than extrapolating the edge slope; an
/// empty sample set gives NaN.
pub fn interp_one(q: f64, xs: &[f64], ys: &[f64]) -> f64 {
    let (Some(&x0), Some(&xn)) = (xs.first(), xs.last()) else {
        return f64::NAN;
    };
    if q <= x0 {
        return ys[0];
    }
    if q >= xn {
        return ys[ys.len() - 1];
    }
    // First sample strictly greater than q; q strictly inside the range
    // keeps both neighbors in bounds.
    let hi = xs.partition_point(|&x| x <= q);
    let lo = hi - 1;
    let t = (q - xs[lo]) / (xs[hi] - xs[lo]);
    ys[lo] + t * (ys[hi] - ys[lo])
}

/// [`interp_one`] over a slice of query points.
pub fn interp(query: &[f64], xs: &[f64], ys: &[f64]) -> Vec<f64> {
    debug_assert_eq!(xs.len(), ys.len());
    query.iter().map(|&q| interp_one(q, xs, ys)).collect()
}

/// Interpolated GPS state at one query time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackSample {
    pub lat: f64,
    pub lon: f64,
    pub elev: f64,
    pub course: f64,
}

impl TrackSample {
    /// Placeholder for captures processed without a track.
    pub const UNKNOWN: TrackSample = TrackSample {
        lat: f64::NAN,
        lon: f64::NAN,
        elev: f64::NAN,
        course: f64::NAN,
    };
}

/// Sample the track at each query time (seconds of day, any order).
///
/// Latitude, longitude, elevation and course interpolate independently
/// against the fix times; queries before the first or after the last fix
/// clamp to that fix.
pub fn sample_track(fixes: &[GpsFix], query_sods: &[f64]) -> Vec<TrackSample> {
    let xs: Vec<f64> = fixes.iter().map(|f| f.sod).collect();
    let field = |get: fn(&GpsFix) -> f64| -> Vec<f64> {
        let ys: Vec<f64> = fixes.iter().map(get).collect();
        interp(query_sods, &xs, &ys)
    };
    let lat = field(|f| f.lat);
    let lon = field(|f| f.lon);
    let elev = field(|f| f.elev);
    let course = field(|f| f.course);

    (0..query_sods.len())
        .map(|i| TrackSample {
            lat: lat[i],
            lon: lon[i],
            elev: elev[i],
            course: course[i],
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fix(sod: f64, lat: f64, lon: f64, elev: f64, course: f64) -> GpsFix {
        GpsFix {
            sod,
            hms: String::new(),
            lat,
            lon,
            elev,
            course,
        }
    }

    #[test]
    fn interpolates_between_samples() {
        let xs = [0.0, 10.0, 20.0];
        let ys = [100.0, 200.0, 400.0];
        assert_eq!(interp_one(5.0, &xs, &ys), 150.0);
        assert_eq!(interp_one(15.0, &xs, &ys), 300.0);
        assert_eq!(interp_one(10.0, &xs, &ys), 200.0);
    }

    #[test]
    fn edges_clamp_instead_of_extrapolating() {
        let xs = [10.0, 20.0];
        let ys = [5.0, 7.0];
        assert_eq!(interp_one(-100.0, &xs, &ys), 5.0);
        assert_eq!(interp_one(10.0, &xs, &ys), 5.0);
        assert_eq!(interp_one(20.0, &xs, &ys), 7.0);
        assert_eq!(interp_one(1e6, &xs, &ys), 7.0);
    }

    #[test]
    fn empty_samples_give_nan() {
        assert!(interp_one(1.0, &[], &[]).is_nan());
    }

    #[test]
    fn track_samples_interpolate_every_field() {
        let fixes = vec![
            fix(100.0, 27.0, -82.0, 400.0, 10.0),
            fix(200.0, 28.0, -83.0, 500.0, 30.0),
        ];
        let samples = sample_track(&fixes, &[150.0]);
        assert_eq!(samples.len(), 1);
        let s = samples[0];
        assert!((s.lat - 27.5).abs() < 1e-12);
        assert!((s.lon - -82.5).abs() < 1e-12);
        assert!((s.elev - 450.0).abs() < 1e-12);
        assert!((s.course - 20.0).abs() < 1e-12);
    }

    #[test]
    fn queries_outside_the_track_clamp_to_the_end_fixes() {
        let fixes = vec![
            fix(100.0, 27.0, -82.0, 400.0, 10.0),
            fix(200.0, 28.0, -83.0, 500.0, 0.0),
        ];
        let samples = sample_track(&fixes, &[0.0, 1e9]);
        assert_eq!(samples[0].lat, 27.0);
        assert_eq!(samples[1].lat, 28.0);
        assert_eq!(samples[1].course, 0.0);
    }
}
