//! Deterministic colour providers and an in-memory raster used by unit and
//! behaviour tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::{Color, ColorProvider, Coordinate, FetchError, RasterSink, Rgb8};

/// `ColorProvider` returning one fixed colour or one fixed error.
#[derive(Debug, Clone)]
pub struct StubColorProvider {
    response: StubResponse,
}

#[derive(Debug, Clone)]
enum StubResponse {
    Color(Color),
    Error(FetchError),
}

impl StubColorProvider {
    /// Create a provider that answers every request with `color`.
    #[must_use]
    pub const fn with_color(color: Color) -> Self {
        Self {
            response: StubResponse::Color(color),
        }
    }

    /// Create a provider that fails every request with `error`.
    #[must_use]
    pub const fn with_error(error: FetchError) -> Self {
        Self {
            response: StubResponse::Error(error),
        }
    }
}

impl ColorProvider for StubColorProvider {
    fn fetch_color(&self, _lat: f64, _lon: f64) -> Result<Color, FetchError> {
        match &self.response {
            StubResponse::Color(color) => Ok(*color),
            StubResponse::Error(error) => Err(error.clone()),
        }
    }
}

/// `ColorProvider` whose colour encodes the requested coordinate.
///
/// Red rises from 0 at the south pole to 1 at the north pole, green from 0 at
/// -180° to 1 at 180°, and blue is fixed at 0.5.
#[derive(Default, Debug, Copy, Clone)]
pub struct GridColorProvider;

impl ColorProvider for GridColorProvider {
    fn fetch_color(&self, lat: f64, lon: f64) -> Result<Color, FetchError> {
        Ok(Color::new((lat + 90.0) / 180.0, (lon + 180.0) / 360.0, 0.5))
    }
}

/// [`GridColorProvider`] that fails at chosen coordinates and counts calls.
#[derive(Debug)]
pub struct FlakyColorProvider {
    failures: Vec<Coordinate>,
    error: FetchError,
    calls: AtomicUsize,
}

impl FlakyColorProvider {
    /// Fail with `error` whenever one of the `(lat, lon)` pairs is requested.
    #[must_use]
    pub fn failing_at(coordinates: &[(f64, f64)], error: FetchError) -> Self {
        Self {
            failures: coordinates
                .iter()
                .map(|&(lat, lon)| Coordinate { lat, lon })
                .collect(),
            error,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `fetch_color` calls made so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ColorProvider for FlakyColorProvider {
    fn fetch_color(&self, lat: f64, lon: f64) -> Result<Color, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failures.contains(&Coordinate { lat, lon }) {
            return Err(self.error.clone());
        }
        GridColorProvider.fetch_color(lat, lon)
    }
}

/// In-memory `RasterSink` that records which pixels were written.
#[derive(Debug, Clone, Default)]
pub struct MemoryRaster {
    width: u32,
    height: u32,
    pixels: HashMap<(u32, u32), Rgb8>,
    overwrites: u64,
}

impl MemoryRaster {
    /// Create an empty raster of the given size.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Colour written at `(x, y)`, or `None` if the pixel is unset.
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> Option<Rgb8> {
        self.pixels.get(&(x, y)).copied()
    }

    /// Number of distinct pixels written.
    #[must_use]
    pub fn painted(&self) -> u64 {
        self.pixels.len() as u64
    }

    /// Number of writes that landed on an already written pixel.
    #[must_use]
    pub const fn overwrites(&self) -> u64 {
        self.overwrites
    }

    /// Raster dimensions as `(width, height)`.
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl RasterSink for MemoryRaster {
    fn set(&mut self, x: u32, y: u32, color: Rgb8) {
        if self.pixels.insert((x, y), color).is_some() {
            self.overwrites += 1;
        }
    }
}
