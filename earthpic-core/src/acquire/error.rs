use thiserror::Error;

use super::grid::Axis;

/// Errors from [`crate::acquire::ColorProvider::fetch_color`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    /// The imaging service could not be reached.
    #[error("network error requesting {url}: {message}")]
    Network {
        /// Request URL.
        url: String,
        /// Transport error description.
        message: String,
    },
    /// The imaging service returned a non-success status.
    #[error("HTTP {status} from {url}: {message}")]
    Http {
        /// Request URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error description.
        message: String,
    },
    /// The request did not complete in time.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Request URL.
        url: String,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },
    /// The response body was not a decodable image.
    #[error("failed to decode image: {message}")]
    Decode {
        /// Decoder error description.
        message: String,
    },
    /// The image did not hold exactly one pixel.
    #[error("coords {lat},{lon}: unexpected dimensions: {width}x{height}")]
    UnexpectedDimensions {
        /// Requested latitude.
        lat: f64,
        /// Requested longitude.
        lon: f64,
        /// Width of the returned image.
        width: u32,
        /// Height of the returned image.
        height: u32,
    },
}

/// Errors from building a coordinate [`crate::acquire::Grid`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GridError {
    /// A step was zero, negative or not finite.
    #[error("{axis} step must be a positive finite number of degrees, got {step}")]
    InvalidStep {
        /// Axis the step applies to.
        axis: Axis,
        /// Rejected step.
        step: f64,
    },
    /// The steps are valid but would produce too many coordinates.
    #[error("steps {lat_step}x{lon_step} would exceed the limit of {limit} grid points")]
    TooLarge {
        /// Requested latitude step.
        lat_step: f64,
        /// Requested longitude step.
        lon_step: f64,
        /// Largest allowed number of coordinates.
        limit: u32,
    },
}

/// Errors that prevent [`crate::acquire::acquire`] from starting.
///
/// Fetch failures during a run are not reported here; they travel with the
/// partial result in [`crate::acquire::Acquisition`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AcquireError {
    /// The coordinate grid could not be built.
    #[error(transparent)]
    Grid(#[from] GridError),
    /// The worker pool was configured with no workers.
    #[error("at least one fetch worker is required")]
    NoWorkers,
}
