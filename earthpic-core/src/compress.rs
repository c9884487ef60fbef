//! Lossy row-wise compression of sample sets.
//!
//! Samples are grouped into rows of equal latitude, each sorted by ascending
//! longitude. Within a row, an interior sample whose colour matches both of
//! its neighbours is redundant for a renderer that looks up the nearest
//! latitude first and the nearest longitude second, so it is dropped.
//!
//! The result is only valid for such renderers: a plain nearest-neighbour
//! lookup over the compressed set may pick a sample from a neighbouring row
//! where the dropped one used to be.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use log::{debug, info};

use crate::{Sample, SampleSet};

/// Latitude used as a row key, ordered with [`f64::total_cmp`].
#[derive(Debug, Clone, Copy)]
pub struct Latitude(f64);

impl Latitude {
    /// Wrap a latitude, folding `-0.0` onto `0.0` so both land in one row.
    #[must_use]
    pub fn new(lat: f64) -> Self {
        // Adding positive zero turns -0.0 into 0.0 and leaves every other value intact.
        Self(lat + 0.0)
    }

    /// The latitude in degrees.
    #[must_use]
    pub const fn degrees(self) -> f64 {
        self.0
    }
}

impl PartialEq for Latitude {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Latitude {}

impl PartialOrd for Latitude {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Latitude {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Samples grouped by latitude, each row sorted by ascending longitude.
///
/// # Examples
///
/// ```
/// use earthpic_core::{Color, Rows, Sample, SampleSet, compress};
///
/// let red = Color::new(1.0, 0.0, 0.0);
/// let set: SampleSet = (0..5).map(|lon| Sample::new(0.0, f64::from(lon), red)).collect();
/// let mut rows = Rows::from_samples(set);
/// let summary = compress(&mut rows);
/// assert_eq!(summary.removed, 3);
/// assert_eq!(rows.into_samples().len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rows {
    rows: BTreeMap<Latitude, Vec<Sample>>,
}

impl Rows {
    /// Group `samples` by latitude and sort each row by longitude.
    ///
    /// Sorting is stable, so samples sharing a coordinate keep their input
    /// order.
    #[must_use]
    pub fn from_samples(samples: SampleSet) -> Self {
        let mut rows: BTreeMap<Latitude, Vec<Sample>> = BTreeMap::new();
        for sample in samples {
            rows.entry(Latitude::new(sample.lat))
                .or_default()
                .push(sample);
        }
        for row in rows.values_mut() {
            row.sort_by(|a, b| a.lon.total_cmp(&b.lon));
        }
        Self { rows }
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Samples in the row at `lat`, if any.
    #[must_use]
    pub fn row(&self, lat: f64) -> Option<&[Sample]> {
        self.rows.get(&Latitude::new(lat)).map(Vec::as_slice)
    }

    /// Iterate over rows in ascending latitude order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, &[Sample])> {
        self.rows
            .iter()
            .map(|(lat, row)| (lat.degrees(), row.as_slice()))
    }

    /// Total number of samples across all rows.
    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.rows.values().map(Vec::len).sum()
    }

    /// Flatten rows back into a sample set, latitude-major.
    #[must_use]
    pub fn into_samples(self) -> SampleSet {
        self.rows.into_values().flatten().collect()
    }
}

/// Outcome of a [`compress`] pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CompressionSummary {
    /// Number of rows visited.
    pub rows: usize,
    /// Number of samples removed.
    pub removed: usize,
}

/// Remove redundant interior samples from every row in place.
///
/// Each row is written back under its own latitude key.
pub fn compress(rows: &mut Rows) -> CompressionSummary {
    let mut summary = CompressionSummary::default();
    for (lat, row) in &mut rows.rows {
        let removed = compress_row(row);
        if removed > 0 {
            debug!("row {}: removed {removed} samples", lat.degrees());
        }
        summary.rows += 1;
        summary.removed += removed;
    }
    info!(
        "compressed {} rows, removed {} samples",
        summary.rows, summary.removed
    );
    summary
}

/// Remove redundant interior samples from one longitude-sorted row.
///
/// The scan moves left to right over interior positions. When the sample at
/// the cursor matches both neighbours it is removed and the cursor stays put,
/// so the sample that slides into its place is checked next. The first and
/// last samples are never removed. Returns the number of samples removed.
pub fn compress_row(row: &mut Vec<Sample>) -> usize {
    let mut removed = 0;
    let mut i = 1;
    while i + 1 < row.len() {
        let redundant = match (row.get(i - 1), row.get(i), row.get(i + 1)) {
            (Some(prev), Some(current), Some(next)) => {
                current.same_color(prev) && current.same_color(next)
            }
            _ => false,
        };
        if redundant {
            row.remove(i);
            removed += 1;
        } else {
            i += 1;
        }
    }
    removed
}
