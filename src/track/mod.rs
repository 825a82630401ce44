//! Temporal layer: clock-string conversions, the aircraft GPS track, and
//! interpolation of the track onto capture times.

pub mod align;
pub mod gps;
pub mod time;
