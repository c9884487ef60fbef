//! Colour samples of the Earth's surface and the sets that hold them.
//!
//! A [`Sample`] is a solid colour observed at one latitude/longitude pair. A
//! [`SampleSet`] is the flat list of samples that makes up one picture. The
//! set imposes no ordering or uniqueness; stages that care about order (the
//! row compressor, for example) establish it themselves.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::query::{self, QueryError};

/// An RGB colour with each channel in `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Color {
    /// Red channel.
    pub r: f64,
    /// Green channel.
    pub g: f64,
    /// Blue channel.
    pub b: f64,
}

impl Color {
    /// Construct a colour from its channels.
    #[must_use]
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }
}

/// A solid colour sampled somewhere on the surface of the Earth.
///
/// # Examples
///
/// ```
/// use earthpic_core::{Color, Sample};
///
/// let sample = Sample::new(51.5, -0.1, Color::new(0.2, 0.4, 0.6));
/// assert_eq!(sample.color(), Color::new(0.2, 0.4, 0.6));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sample {
    /// Latitude in degrees, `[-90, 90]`.
    #[cfg_attr(feature = "serde", serde(alias = "Lat"))]
    pub lat: f64,
    /// Longitude in degrees, `[-180, 180]`.
    #[cfg_attr(feature = "serde", serde(alias = "Lon"))]
    pub lon: f64,
    /// Red channel.
    #[cfg_attr(feature = "serde", serde(alias = "R"))]
    pub r: f64,
    /// Green channel.
    #[cfg_attr(feature = "serde", serde(alias = "G"))]
    pub g: f64,
    /// Blue channel.
    #[cfg_attr(feature = "serde", serde(alias = "B"))]
    pub b: f64,
}

impl Sample {
    /// Build a sample at `lat`/`lon` with the given colour.
    #[must_use]
    pub const fn new(lat: f64, lon: f64, color: Color) -> Self {
        Self {
            lat,
            lon,
            r: color.r,
            g: color.g,
            b: color.b,
        }
    }

    /// The sample's colour.
    #[must_use]
    pub const fn color(&self) -> Color {
        Color::new(self.r, self.g, self.b)
    }

    /// Whether two samples carry exactly the same colour.
    ///
    /// Channels are compared with `==`; there is no tolerance.
    #[must_use]
    #[expect(
        clippy::float_cmp,
        reason = "row compression only merges bit-identical colours"
    )]
    pub fn same_color(&self, other: &Self) -> bool {
        self.r == other.r && self.g == other.g && self.b == other.b
    }
}

/// The full collection of samples representing one picture.
///
/// # Examples
///
/// ```
/// use earthpic_core::{Color, Sample, SampleSet};
///
/// let set: SampleSet = vec![
///     Sample::new(0.0, 179.0, Color::new(1.0, 0.0, 0.0)),
///     Sample::new(0.0, -179.0, Color::new(0.0, 0.0, 1.0)),
/// ]
/// .into();
/// let color = set.nearest(0.0, -178.0)?;
/// assert_eq!(color, Color::new(0.0, 0.0, 1.0));
/// # Ok::<(), earthpic_core::QueryError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SampleSet {
    samples: Vec<Sample>,
}

impl SampleSet {
    /// Create an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            samples: Vec::new(),
        }
    }

    /// Append a sample.
    pub fn push(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    /// Number of samples held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the set holds no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Iterate over the samples in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    /// Borrow the samples as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Sample] {
        &self.samples
    }

    /// Consume the set and return its samples.
    #[must_use]
    pub fn into_vec(self) -> Vec<Sample> {
        self.samples
    }

    /// Colour of the sample nearest to `lat`/`lon`.
    ///
    /// See [`query::nearest`] for the distance metric and tie-breaking.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::EmptySet`] when the set holds no samples.
    pub fn nearest(&self, lat: f64, lon: f64) -> Result<Color, QueryError> {
        query::nearest(&self.samples, lat, lon)
    }
}

impl From<Vec<Sample>> for SampleSet {
    fn from(samples: Vec<Sample>) -> Self {
        Self { samples }
    }
}

impl FromIterator<Sample> for SampleSet {
    fn from_iter<I: IntoIterator<Item = Sample>>(iter: I) -> Self {
        Self {
            samples: iter.into_iter().collect(),
        }
    }
}

impl Extend<Sample> for SampleSet {
    fn extend<I: IntoIterator<Item = Sample>>(&mut self, iter: I) {
        self.samples.extend(iter);
    }
}

impl IntoIterator for SampleSet {
    type Item = Sample;
    type IntoIter = std::vec::IntoIter<Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.into_iter()
    }
}

impl<'a> IntoIterator for &'a SampleSet {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
