//! Acquire colour samples over a latitude/longitude grid.
//!
//! The [`ColorProvider`] trait abstracts the remote imaging service that
//! reports the colour at one coordinate. [`acquire`] walks a regular grid of
//! coordinates with a fixed pool of worker threads and collects the samples
//! they produce.
//!
//! A failed fetch does not discard earlier work: the returned
//! [`Acquisition`] carries every sample gathered together with the first
//! error observed, so callers can persist partial results.

mod error;
mod grid;
mod pipeline;
mod provider;

pub use error::{AcquireError, FetchError, GridError};
pub use grid::{Axis, Coordinate, Grid, MAX_GRID_POINTS};
pub use pipeline::{Acquisition, AcquireOptions, DEFAULT_WORKERS, acquire, acquire_grid};
pub use provider::ColorProvider;
