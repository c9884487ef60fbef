//! Error types emitted by the earthpic CLI.
//!
//! Keep this error type reasonably small, as every command returns
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use earthpic_core::{AcquireError, FetchError, FormatError, QueryError};
use earthpic_data::{ProviderBuildError, RasterError};
use thiserror::Error;

/// Errors emitted by the earthpic CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Argument name.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// An option was present but unusable.
    #[error("invalid {field} {value}: {reason}")]
    InvalidArgument {
        /// Argument name.
        field: &'static str,
        /// The rejected value.
        value: String,
        /// Why it was rejected.
        reason: &'static str,
    },
    /// An input path does not exist.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Argument name.
        field: &'static str,
        /// The missing path.
        path: Utf8PathBuf,
    },
    /// An input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Argument name.
        field: &'static str,
        /// The offending path.
        path: Utf8PathBuf,
    },
    /// An input path could not be inspected.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Argument name.
        field: &'static str,
        /// The path being inspected.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Reading a sample file failed.
    #[error("failed to read samples from {path:?}: {source}")]
    ReadSamples {
        /// Sample file path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// A sample file could not be decoded.
    #[error("failed to parse samples in {path:?}: {source}")]
    ParseSamples {
        /// Sample file path.
        path: Utf8PathBuf,
        /// Decoder error.
        #[source]
        source: FormatError,
    },
    /// Samples could not be encoded.
    #[error("failed to encode samples for {path:?}: {source}")]
    EncodeSamples {
        /// Destination path.
        path: Utf8PathBuf,
        /// Encoder error.
        #[source]
        source: FormatError,
    },
    /// Writing a sample file failed.
    #[error("failed to write samples to {path:?}: {source}")]
    WriteSamples {
        /// Destination path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Constructing the imaging service client failed.
    #[error("failed to build imaging provider for {base_url:?}: {source}")]
    BuildProvider {
        /// Configured endpoint.
        base_url: String,
        /// Construction error.
        #[source]
        source: ProviderBuildError,
    },
    /// The acquisition pipeline could not start.
    #[error(transparent)]
    Acquire(#[from] AcquireError),
    /// Acquisition stopped early; the samples gathered so far were saved.
    #[error("fetch failed after {fetched} samples (partial results saved to {path:?}): {source}")]
    PartialFetch {
        /// Number of samples saved.
        fetched: usize,
        /// Where the partial results were written.
        path: Utf8PathBuf,
        /// The first fetch error.
        #[source]
        source: FetchError,
    },
    /// Rendering failed.
    #[error("failed to render {path:?}: {source}")]
    Render {
        /// Sample file being rendered.
        path: Utf8PathBuf,
        /// Query error.
        #[source]
        source: QueryError,
    },
    /// Writing the rendered image failed.
    #[error(transparent)]
    WriteImage(#[from] RasterError),
}
