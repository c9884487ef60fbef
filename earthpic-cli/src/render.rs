//! Render command implementation for the earthpic CLI.

use camino::Utf8PathBuf;
use clap::Parser;
use earthpic_core::{RenderSummary, render};
use earthpic_data::PngRaster;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::samples::{load_samples, require_existing};
use crate::{
    ARG_HEIGHT, ARG_INPUT, ARG_OUTPUT, ARG_SIZE, ARG_WIDTH, CliError, DEFAULT_IMAGE_SIZE,
    ENV_RENDER_INPUT, ENV_RENDER_OUTPUT,
};

/// CLI arguments for the `render` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Draw an orthographic view of a sample file as a PNG. Each \
                 pixel on the visible disc takes the colour of the nearest \
                 sample; pixels off the disc stay transparent.",
    about = "Render an orthographic PNG of a sample file"
)]
#[ortho_config(prefix = "EARTHPIC")]
pub(crate) struct RenderArgs {
    /// Sample file to read.
    #[arg(value_name = "input")]
    #[serde(default)]
    pub(crate) input: Option<Utf8PathBuf>,
    /// Where to write the PNG.
    #[arg(value_name = "output")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
    /// Edge length of a square image (default 200).
    #[arg(long = ARG_SIZE, value_name = "pixels")]
    #[serde(default)]
    pub(crate) size: Option<u32>,
    /// Image width, overriding --size.
    #[arg(long = ARG_WIDTH, value_name = "pixels")]
    #[serde(default)]
    pub(crate) width: Option<u32>,
    /// Image height, overriding --size.
    #[arg(long = ARG_HEIGHT, value_name = "pixels")]
    #[serde(default)]
    pub(crate) height: Option<u32>,
}

impl RenderArgs {
    pub(crate) fn into_config(self) -> Result<RenderConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RenderConfig::try_from(merged)
    }
}

/// Resolved `render` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RenderConfig {
    pub(crate) input: Utf8PathBuf,
    pub(crate) output: Utf8PathBuf,
    pub(crate) width: u32,
    pub(crate) height: u32,
}

impl TryFrom<RenderArgs> for RenderConfig {
    type Error = CliError;

    fn try_from(args: RenderArgs) -> Result<Self, Self::Error> {
        let input = args.input.ok_or(CliError::MissingArgument {
            field: ARG_INPUT,
            env: ENV_RENDER_INPUT,
        })?;
        let output = args.output.ok_or(CliError::MissingArgument {
            field: ARG_OUTPUT,
            env: ENV_RENDER_OUTPUT,
        })?;
        let size = args.size.unwrap_or(DEFAULT_IMAGE_SIZE);
        let width = positive(ARG_WIDTH, args.width.unwrap_or(size))?;
        let height = positive(ARG_HEIGHT, args.height.unwrap_or(size))?;
        Ok(Self {
            input,
            output,
            width,
            height,
        })
    }
}

fn positive(field: &'static str, value: u32) -> Result<u32, CliError> {
    if value == 0 {
        Err(CliError::InvalidArgument {
            field,
            value: value.to_string(),
            reason: "images need at least one pixel on each side",
        })
    } else {
        Ok(value)
    }
}

pub(crate) fn run_render(args: RenderArgs) -> Result<RenderSummary, CliError> {
    let config = args.into_config()?;
    render_with_config(&config)
}

pub(crate) fn render_with_config(config: &RenderConfig) -> Result<RenderSummary, CliError> {
    require_existing(&config.input, ARG_INPUT)?;
    let samples = load_samples(&config.input)?;
    let mut raster = PngRaster::new(config.width, config.height);
    let summary = render(&samples, config.width, config.height, &mut raster).map_err(|source| {
        CliError::Render {
            path: config.input.clone(),
            source,
        }
    })?;
    raster.save(&config.output)?;
    Ok(summary)
}
