//! Facade crate for earthpic, a sampled picture of the Earth.
//!
//! This crate re-exports the core sample, codec, compression and rendering
//! API and, behind the `http` feature, the static-map provider and PNG
//! raster.

#![forbid(unsafe_code)]

pub use earthpic_core::{
    AcquireError, AcquireOptions, Acquisition, Color, ColorProvider, CompressionSummary,
    Coordinate, DEFAULT_WORKERS, FetchError, FormatError, Grid, GridError, QueryError, RasterSink,
    RenderSummary, Rgb8, Rows, Sample, SampleFormat, SampleSet, acquire, acquire_grid, compress,
    decode, encode, nearest, render,
};

#[cfg(feature = "http")]
pub use earthpic_data::{
    PngRaster, ProviderBuildError, RasterError, StaticMapColorProvider, StaticMapConfig,
};

#[cfg(feature = "test-support")]
pub use earthpic_core::test_support;
