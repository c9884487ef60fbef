//! Nearest-neighbour colour lookup over a flat sample list.
//!
//! The lookup is a linear scan. Longitude distance wraps across the ±180°
//! seam; latitude distance does not wrap, so the poles stay apart.

use thiserror::Error;

use crate::{Color, Sample};

/// Errors from [`nearest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The sample set was empty, so no colour can be chosen.
    #[error("cannot query the nearest sample of an empty sample set")]
    EmptySet,
}

/// Distance in degrees between two coordinates.
///
/// Computed as `sqrt(lat_dist² + lon_dist²)` where `lat_dist` is the plain
/// absolute difference and `lon_dist` is the shortest way around the
/// longitude circle.
///
/// # Examples
///
/// ```
/// use earthpic_core::query::lat_lon_distance;
///
/// assert_eq!(lat_lon_distance(0.0, 179.0, 0.0, -180.0), 1.0);
/// assert_eq!(lat_lon_distance(-90.0, 0.0, 90.0, 0.0), 180.0);
/// ```
#[must_use]
pub fn lat_lon_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat_dist = (lat1 - lat2).abs();
    let lon_dist = (lon1 - lon2)
        .abs()
        .min((360.0 + lon1 - lon2).abs())
        .min((360.0 + lon2 - lon1).abs());
    lat_dist.hypot(lon_dist)
}

/// Return the colour of the sample closest to `lat`/`lon`.
///
/// Ties go to the earliest sample: a later sample replaces the running best
/// only when it is strictly closer.
///
/// # Errors
///
/// Returns [`QueryError::EmptySet`] when `samples` is empty.
pub fn nearest(samples: &[Sample], lat: f64, lon: f64) -> Result<Color, QueryError> {
    let mut iter = samples.iter();
    let first = iter.next().ok_or(QueryError::EmptySet)?;
    let mut best = first;
    let mut best_dist = lat_lon_distance(first.lat, first.lon, lat, lon);
    for sample in iter {
        let dist = lat_lon_distance(sample.lat, sample.lon, lat, lon);
        if dist < best_dist {
            best = sample;
            best_dist = dist;
        }
    }
    Ok(best.color())
}
