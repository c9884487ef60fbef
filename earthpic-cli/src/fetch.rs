//! Fetch command implementation for the earthpic CLI.

use std::time::Duration;

use camino::Utf8PathBuf;
use clap::Parser;
use earthpic_core::{
    AcquireError, AcquireOptions, ColorProvider, DEFAULT_WORKERS, Grid, acquire_grid,
};
use earthpic_data::{DEFAULT_TIMEOUT_SECS, StaticMapColorProvider, StaticMapConfig};
use log::{error, info};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::samples::save_samples;
use crate::{
    ARG_API_KEY, ARG_BASE_URL, ARG_LAT_STEP, ARG_LON_STEP, ARG_OUTPUT, ARG_TIMEOUT_SECS,
    ARG_WORKERS, CliError, ENV_FETCH_OUTPUT,
};

/// Grid spacing in degrees used when none is configured.
const DEFAULT_STEP: f64 = 1.0;

/// CLI arguments for the `fetch` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Request one colour per grid coordinate from a static-map \
                 service and write the samples to a file. A `.json` output \
                 path selects JSON; anything else gets one `lat,lon,r,g,b` \
                 line per sample. If a request fails, the samples gathered so \
                 far are still written and the command exits with an error.",
    about = "Sample the Earth's colours over a coordinate grid"
)]
#[ortho_config(prefix = "EARTHPIC")]
pub(crate) struct FetchArgs {
    /// Where to write the samples.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
    /// Degrees between sampled latitudes (default 1).
    #[arg(long = ARG_LAT_STEP, value_name = "degrees")]
    #[serde(default)]
    pub(crate) lat_step: Option<f64>,
    /// Degrees between sampled longitudes (default 1).
    #[arg(long = ARG_LON_STEP, value_name = "degrees")]
    #[serde(default)]
    pub(crate) lon_step: Option<f64>,
    /// Number of concurrent requests (default 10).
    #[arg(long = ARG_WORKERS, value_name = "count")]
    #[serde(default)]
    pub(crate) workers: Option<usize>,
    /// Access key for the static-map service.
    #[arg(long = ARG_API_KEY, value_name = "key")]
    #[serde(default)]
    pub(crate) api_key: Option<String>,
    /// Static-map endpoint.
    #[arg(long = ARG_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) base_url: Option<String>,
    /// Per-request timeout in seconds (default 30).
    #[arg(long = ARG_TIMEOUT_SECS, value_name = "seconds")]
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
}

impl FetchArgs {
    pub(crate) fn into_config(self) -> Result<FetchConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        FetchConfig::try_from(merged)
    }
}

/// Resolved `fetch` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FetchConfig {
    pub(crate) output: Utf8PathBuf,
    pub(crate) grid: Grid,
    pub(crate) workers: usize,
    pub(crate) provider: StaticMapConfig,
}

impl TryFrom<FetchArgs> for FetchConfig {
    type Error = CliError;

    fn try_from(args: FetchArgs) -> Result<Self, Self::Error> {
        let output = args.output.ok_or(CliError::MissingArgument {
            field: ARG_OUTPUT,
            env: ENV_FETCH_OUTPUT,
        })?;

        let grid = Grid::new(
            args.lat_step.unwrap_or(DEFAULT_STEP),
            args.lon_step.unwrap_or(DEFAULT_STEP),
        )
        .map_err(AcquireError::from)?;

        let workers = args.workers.unwrap_or(DEFAULT_WORKERS);
        if workers == 0 {
            return Err(CliError::InvalidArgument {
                field: ARG_WORKERS,
                value: workers.to_string(),
                reason: "at least one worker is required",
            });
        }

        let timeout_secs = args.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(CliError::InvalidArgument {
                field: ARG_TIMEOUT_SECS,
                value: timeout_secs.to_string(),
                reason: "the timeout must be at least one second",
            });
        }

        let mut provider = args
            .base_url
            .map_or_else(StaticMapConfig::default, StaticMapConfig::new)
            .with_timeout(Duration::from_secs(timeout_secs));
        if let Some(key) = args.api_key {
            provider = provider.with_api_key(key);
        }

        Ok(Self {
            output,
            grid,
            workers,
            provider,
        })
    }
}

/// Builds the colour provider for a fetch invocation.
pub(crate) trait ProviderFactory {
    fn build(&self, config: &StaticMapConfig) -> Result<Box<dyn ColorProvider>, CliError>;
}

pub(crate) struct StaticMapProviderFactory;

impl ProviderFactory for StaticMapProviderFactory {
    fn build(&self, config: &StaticMapConfig) -> Result<Box<dyn ColorProvider>, CliError> {
        let provider = StaticMapColorProvider::with_config(config.clone()).map_err(|source| {
            CliError::BuildProvider {
                base_url: config.base_url.clone(),
                source,
            }
        })?;
        Ok(Box::new(provider))
    }
}

/// Outcome of a successful fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FetchOutcome {
    pub(crate) samples: usize,
    pub(crate) output: Utf8PathBuf,
}

pub(crate) fn run_fetch(args: FetchArgs) -> Result<FetchOutcome, CliError> {
    run_fetch_with(args, &StaticMapProviderFactory)
}

pub(crate) fn run_fetch_with(
    args: FetchArgs,
    factory: &dyn ProviderFactory,
) -> Result<FetchOutcome, CliError> {
    let config = args.into_config()?;
    fetch_with_config(&config, factory)
}

pub(crate) fn fetch_with_config(
    config: &FetchConfig,
    factory: &dyn ProviderFactory,
) -> Result<FetchOutcome, CliError> {
    let provider = factory.build(&config.provider)?;
    info!(
        "sampling {} coordinates from {}",
        config.grid.len(),
        config.provider.base_url
    );
    let options = AcquireOptions::default().with_workers(config.workers);
    let acquisition = acquire_grid(&config.grid.coordinates(), provider.as_ref(), options)?;
    let (samples, fetch_error) = acquisition.into_parts();

    save_samples(&config.output, &samples)?;

    match fetch_error {
        None => Ok(FetchOutcome {
            samples: samples.len(),
            output: config.output.clone(),
        }),
        Some(source) => {
            error!("fetch failed: {source}");
            Err(CliError::PartialFetch {
                fetched: samples.len(),
                path: config.output.clone(),
                source,
            })
        }
    }
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<FetchConfig, CliError> {
    let merged = FetchArgs::merge_from_layers(layers).map_err(CliError::from)?;
    FetchConfig::try_from(merged)
}
