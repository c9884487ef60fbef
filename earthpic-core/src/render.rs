//! Orthographic projection of a sample set onto a raster.
//!
//! Each output pixel is mapped back onto the sphere with an inverse
//! orthographic projection and coloured with the nearest sample. Pixels that
//! fall outside the projected disc are left untouched.

use log::info;

use crate::{Color, QueryError, SampleSet};

/// An 8-bit-per-channel colour written to a raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb8 {
    /// Quantise each channel with round-half-up, `channel * 255 + 0.5`
    /// truncated.
    ///
    /// # Examples
    ///
    /// ```
    /// use earthpic_core::{Color, Rgb8};
    ///
    /// let rgb = Rgb8::from_color(Color::new(1.0, 0.5, 0.0));
    /// assert_eq!(rgb, Rgb8 { r: 255, g: 128, b: 0 });
    /// ```
    #[must_use]
    pub fn from_color(color: Color) -> Self {
        Self {
            r: quantise(color.r),
            g: quantise(color.g),
            b: quantise(color.b),
        }
    }
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "float-to-u8 casts saturate, which clamps out-of-range channels"
)]
fn quantise(channel: f64) -> u8 {
    (channel * 255.0 + 0.5) as u8
}

/// Destination for rendered pixels.
///
/// Each coordinate is written at most once per render; pixels that are never
/// written keep whatever background the sink started with.
pub trait RasterSink {
    /// Colour the pixel at column `x`, row `y`.
    fn set(&mut self, x: u32, y: u32, color: Rgb8);
}

/// Outcome of a [`render`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderSummary {
    /// Pixels inside the disc that received a colour.
    pub painted: u64,
    /// Pixels outside the disc that were left unset.
    pub skipped: u64,
}

/// Map raster pixel `(x, y)` to the latitude/longitude it shows.
///
/// Returns `None` when the pixel lies outside the projected disc, i.e. when
/// the inverse projection is undefined.
///
/// # Examples
///
/// ```
/// use earthpic_core::render::pixel_to_lat_lon;
///
/// let (lat, lon) = pixel_to_lat_lon(100, 100, 200, 200).expect("centre is on the disc");
/// assert!(lat.abs() < 1e-9 && (lon - 90.0).abs() < 1e-9);
/// assert!(pixel_to_lat_lon(0, 0, 200, 200).is_none());
/// ```
#[must_use]
pub fn pixel_to_lat_lon(x: u32, y: u32, width: u32, height: u32) -> Option<(f64, f64)> {
    let raw_y = f64::from(y) / (f64::from(height) / 2.0) - 1.0;
    let lat = raw_y.asin().to_degrees();
    let raw_x = f64::from(x) / (f64::from(width) / 2.0) - 1.0;
    let lon = (raw_x / lat.to_radians().cos()).acos().to_degrees();
    if lat.is_nan() || lon.is_nan() {
        None
    } else {
        Some((lat, lon))
    }
}

/// Render an orthographic view of `samples` into `sink`.
///
/// Every pixel of the `width × height` grid is visited row by row. Pixels on
/// the disc receive the colour of the nearest sample; the rest are skipped.
///
/// # Errors
///
/// Returns [`QueryError::EmptySet`] if any pixel lands on the disc and
/// `samples` is empty.
pub fn render<S>(
    samples: &SampleSet,
    width: u32,
    height: u32,
    sink: &mut S,
) -> Result<RenderSummary, QueryError>
where
    S: RasterSink + ?Sized,
{
    let mut summary = RenderSummary::default();
    for y in 0..height {
        for x in 0..width {
            let Some((lat, lon)) = pixel_to_lat_lon(x, y, width, height) else {
                summary.skipped += 1;
                continue;
            };
            let color = samples.nearest(lat, lon)?;
            sink.set(x, y, Rgb8::from_color(color));
            summary.painted += 1;
        }
    }
    info!(
        "rendered {width}x{height} raster: {} pixels painted, {} outside the disc",
        summary.painted, summary.skipped
    );
    Ok(summary)
}
