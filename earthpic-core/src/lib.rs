//! Core domain types and algorithms for earthpic.
//!
//! A picture of the Earth is a sparse [`SampleSet`] of colours observed at
//! latitude/longitude coordinates. This crate covers the whole life of such a
//! set without touching the network or the filesystem:
//!
//! - [`acquire()`] fills a set by fanning a coordinate grid out to a
//!   [`ColorProvider`] on a pool of worker threads.
//! - [`codec`] turns sets into delimited text (or JSON) and back.
//! - [`compress()`] drops samples that are redundant for row-wise renderers.
//! - [`render()`] draws an orthographic view through a [`RasterSink`] using the
//!   nearest-neighbour lookup in [`query`].
//!
//! Library code reports failures through `Result`; deciding whether to abort
//! is left to callers.

#![forbid(unsafe_code)]

pub mod acquire;
pub mod codec;
pub mod compress;
pub mod query;
pub mod render;
mod sample;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use acquire::{
    AcquireError, AcquireOptions, Acquisition, Axis, ColorProvider, Coordinate, DEFAULT_WORKERS,
    FetchError, Grid, GridError, MAX_GRID_POINTS, acquire, acquire_grid,
};
pub use codec::{FormatError, SampleFormat, decode, encode};
pub use compress::{CompressionSummary, Latitude, Rows, compress, compress_row};
pub use query::{QueryError, nearest};
pub use render::{RasterSink, RenderSummary, Rgb8, render};
pub use sample::{Color, Sample, SampleSet};
