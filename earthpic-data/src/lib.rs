//! Adapters that connect earthpic to the outside world.
//!
//! Responsibilities:
//! - Fetch sample colours from a static-map imaging service over HTTP.
//! - Store rendered pictures as PNG files.
//!
//! Boundaries:
//! - Do not encode domain rules (live in `earthpic-core`).
//! - Keep async I/O behind the synchronous `ColorProvider` trait.
//!
//! Invariants:
//! - Providers are `Sync` and may be shared by every acquisition worker.
//! - No global mutable state.
#![forbid(unsafe_code)]

pub mod provider;
pub mod raster;

pub use provider::{
    DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, ProviderBuildError,
    StaticMapColorProvider, StaticMapConfig, decode_pixel,
};
pub use raster::{PngRaster, RasterError};
