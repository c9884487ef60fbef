//! Compress command implementation for the earthpic CLI.

use camino::Utf8PathBuf;
use clap::Parser;
use earthpic_core::{CompressionSummary, Rows, compress};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::samples::{load_samples, require_existing, save_samples};
use crate::{ARG_INPUT, ARG_OUTPUT, CliError, ENV_COMPRESS_INPUT, ENV_COMPRESS_OUTPUT};

/// CLI arguments for the `compress` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Group samples into rows of equal latitude, sort each row by \
                 longitude and drop interior samples whose colour matches \
                 both neighbours. The output is written latitude-major and \
                 only suits renderers that look up rows first.",
    about = "Drop samples that row-wise renderers do not need"
)]
#[ortho_config(prefix = "EARTHPIC")]
pub(crate) struct CompressArgs {
    /// Sample file to read.
    #[arg(value_name = "input")]
    #[serde(default)]
    pub(crate) input: Option<Utf8PathBuf>,
    /// Where to write the compressed samples.
    #[arg(value_name = "output")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
}

impl CompressArgs {
    pub(crate) fn into_config(self) -> Result<CompressConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        CompressConfig::try_from(merged)
    }
}

/// Resolved `compress` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CompressConfig {
    pub(crate) input: Utf8PathBuf,
    pub(crate) output: Utf8PathBuf,
}

impl TryFrom<CompressArgs> for CompressConfig {
    type Error = CliError;

    fn try_from(args: CompressArgs) -> Result<Self, Self::Error> {
        let input = args.input.ok_or(CliError::MissingArgument {
            field: ARG_INPUT,
            env: ENV_COMPRESS_INPUT,
        })?;
        let output = args.output.ok_or(CliError::MissingArgument {
            field: ARG_OUTPUT,
            env: ENV_COMPRESS_OUTPUT,
        })?;
        Ok(Self { input, output })
    }
}

pub(crate) fn run_compress(args: CompressArgs) -> Result<CompressionSummary, CliError> {
    let config = args.into_config()?;
    compress_with_config(&config)
}

pub(crate) fn compress_with_config(config: &CompressConfig) -> Result<CompressionSummary, CliError> {
    require_existing(&config.input, ARG_INPUT)?;
    let samples = load_samples(&config.input)?;
    let mut rows = Rows::from_samples(samples);
    let summary = compress(&mut rows);
    save_samples(&config.output, &rows.into_samples())?;
    Ok(summary)
}
