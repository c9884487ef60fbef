//! Regular latitude/longitude grids.

use std::fmt;

use super::error::GridError;

/// Latitude span covered by a grid, in degrees.
const LAT_RANGE: (f64, f64) = (-90.0, 90.0);
/// Longitude span covered by a grid, in degrees.
const LON_RANGE: (f64, f64) = (-180.0, 180.0);
/// Slack when counting steps, so `180 / 0.1` does not gain a spurious step.
const STEP_EPSILON: f64 = 1e-9;
/// Largest number of coordinates a grid may hold.
pub const MAX_GRID_POINTS: u32 = 50_000_000;

/// Grid axis, used in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// North/south axis.
    Latitude,
    /// East/west axis.
    Longitude,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Latitude => f.write_str("latitude"),
            Self::Longitude => f.write_str("longitude"),
        }
    }
}

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
}

/// Evenly spaced coordinates covering the whole globe.
///
/// Latitudes run from -90 to 90 and longitudes from -180 to 180, both
/// inclusive. Each axis holds `ceil(range / step) + 1` values; when the step
/// does not divide the range, the last value is clamped onto the bound.
/// Values are computed from their index rather than by repeated addition, so
/// they do not drift.
///
/// # Examples
///
/// ```
/// use earthpic_core::Grid;
///
/// let grid = Grid::new(90.0, 180.0)?;
/// assert_eq!(grid.len(), 9);
/// assert_eq!(grid.latitudes(), vec![-90.0, 0.0, 90.0]);
/// # Ok::<(), earthpic_core::GridError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    lat_step: f64,
    lon_step: f64,
}

impl Grid {
    /// Build a grid with the given spacing in degrees.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidStep`] when either step is not a positive
    /// finite number, and [`GridError::TooLarge`] when the grid would hold
    /// more than [`MAX_GRID_POINTS`] coordinates.
    pub fn new(lat_step: f64, lon_step: f64) -> Result<Self, GridError> {
        validate_step(Axis::Latitude, lat_step)?;
        validate_step(Axis::Longitude, lon_step)?;
        let points = axis_points(LAT_RANGE, lat_step) * axis_points(LON_RANGE, lon_step);
        if points > f64::from(MAX_GRID_POINTS) {
            return Err(GridError::TooLarge {
                lat_step,
                lon_step,
                limit: MAX_GRID_POINTS,
            });
        }
        Ok(Self { lat_step, lon_step })
    }

    /// Latitudes visited, ascending.
    #[must_use]
    pub fn latitudes(&self) -> Vec<f64> {
        axis_values(LAT_RANGE, self.lat_step)
    }

    /// Longitudes visited in each latitude row, ascending.
    #[must_use]
    pub fn longitudes(&self) -> Vec<f64> {
        axis_values(LON_RANGE, self.lon_step)
    }

    /// Number of coordinates in the grid.
    #[must_use]
    pub fn len(&self) -> usize {
        self.latitudes().len() * self.longitudes().len()
    }

    /// Whether the grid has no coordinates. Always `false` for a valid grid.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every coordinate, latitude-major.
    #[must_use]
    pub fn coordinates(&self) -> Vec<Coordinate> {
        let lons = self.longitudes();
        self.latitudes()
            .into_iter()
            .flat_map(|lat| lons.iter().map(move |&lon| Coordinate { lat, lon }))
            .collect()
    }
}

fn validate_step(axis: Axis, step: f64) -> Result<(), GridError> {
    if step.is_finite() && step > 0.0 {
        Ok(())
    } else {
        Err(GridError::InvalidStep { axis, step })
    }
}

fn axis_points((start, end): (f64, f64), step: f64) -> f64 {
    ((end - start) / step - STEP_EPSILON).ceil() + 1.0
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    reason = "point counts are positive and bounded by MAX_GRID_POINTS"
)]
fn axis_values(range: (f64, f64), step: f64) -> Vec<f64> {
    let (start, end) = range;
    let steps = axis_points(range, step) as usize - 1;
    (0..=steps)
        .map(|i| (start + i as f64 * step).min(end))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1.0, 1.0, 181 * 361)]
    #[case(90.0, 180.0, 9)]
    #[case(45.0, 90.0, 5 * 5)]
    #[case(0.1, 0.1, 1801 * 3601)]
    #[case(7.0, 100.0, 27 * 5)]
    #[case(200.0, 400.0, 2 * 2)]
    fn counts_inclusive_ranges(#[case] lat: f64, #[case] lon: f64, #[case] expected: usize) {
        let grid = Grid::new(lat, lon).expect("valid grid");
        assert_eq!(grid.len(), expected);
        assert!(!grid.is_empty());
    }

    #[rstest]
    fn partial_steps_are_clamped_onto_the_bound() {
        let grid = Grid::new(7.0, 100.0).expect("valid grid");
        let lats = grid.latitudes();
        assert_eq!(lats.len(), 27);
        assert_eq!(lats.first(), Some(&-90.0));
        assert_eq!(lats[lats.len() - 2], 85.0);
        assert_eq!(lats.last(), Some(&90.0));
        assert_eq!(grid.longitudes(), vec![-180.0, -80.0, 20.0, 120.0, 180.0]);
        assert_eq!(grid.len(), 135);
    }

    #[rstest]
    fn oversized_steps_still_reach_both_bounds() {
        let grid = Grid::new(200.0, 400.0).expect("valid grid");
        assert_eq!(grid.latitudes(), vec![-90.0, 90.0]);
        assert_eq!(grid.longitudes(), vec![-180.0, 180.0]);
    }

    #[rstest]
    #[case(1e-12, 1.0)]
    #[case(1.0, 1e-12)]
    #[case(0.01, 0.01)]
    fn rejects_grids_beyond_the_point_limit(#[case] lat: f64, #[case] lon: f64) {
        let err = Grid::new(lat, lon).expect_err("grid too large");
        assert_eq!(
            err,
            GridError::TooLarge {
                lat_step: lat,
                lon_step: lon,
                limit: MAX_GRID_POINTS,
            }
        );
    }

    #[rstest]
    fn fine_steps_end_exactly_on_the_bound() {
        let grid = Grid::new(0.1, 0.1).expect("valid grid");
        assert_eq!(grid.latitudes().last(), Some(&90.0));
        assert_eq!(grid.longitudes().last(), Some(&180.0));
    }

    #[rstest]
    fn coordinates_are_latitude_major() {
        let grid = Grid::new(90.0, 180.0).expect("valid grid");
        let coords = grid.coordinates();
        assert_eq!(coords.len(), 9);
        assert_eq!(coords[0], Coordinate { lat: -90.0, lon: -180.0 });
        assert_eq!(coords[1], Coordinate { lat: -90.0, lon: 0.0 });
        assert_eq!(coords[8], Coordinate { lat: 90.0, lon: 180.0 });
    }

    #[rstest]
    #[case(0.0, 1.0, Axis::Latitude)]
    #[case(-1.0, 1.0, Axis::Latitude)]
    #[case(1.0, f64::NAN, Axis::Longitude)]
    #[case(1.0, f64::INFINITY, Axis::Longitude)]
    fn rejects_invalid_steps(#[case] lat: f64, #[case] lon: f64, #[case] axis: Axis) {
        let err = Grid::new(lat, lon).expect_err("invalid step");
        let GridError::InvalidStep { axis: found, .. } = err else {
            panic!("expected an invalid step, got {err:?}");
        };
        assert_eq!(found, axis);
    }
}
