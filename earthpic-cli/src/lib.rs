//! Command-line interface for sampling, compressing and rendering pictures of
//! the Earth.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod compress;
mod error;
mod fetch;
mod render;
mod samples;

pub use error::CliError;

use compress::CompressArgs;
use fetch::FetchArgs;
use render::RenderArgs;

const ARG_OUTPUT: &str = "output";
const ARG_INPUT: &str = "input";
const ARG_LAT_STEP: &str = "lat-step";
const ARG_LON_STEP: &str = "lon-step";
const ARG_WORKERS: &str = "workers";
const ARG_API_KEY: &str = "api-key";
const ARG_BASE_URL: &str = "base-url";
const ARG_TIMEOUT_SECS: &str = "timeout-secs";
const ARG_SIZE: &str = "size";
const ARG_WIDTH: &str = "width";
const ARG_HEIGHT: &str = "height";
const ENV_FETCH_OUTPUT: &str = "EARTHPIC_CMDS_FETCH_OUTPUT";
const ENV_COMPRESS_INPUT: &str = "EARTHPIC_CMDS_COMPRESS_INPUT";
const ENV_COMPRESS_OUTPUT: &str = "EARTHPIC_CMDS_COMPRESS_OUTPUT";
const ENV_RENDER_INPUT: &str = "EARTHPIC_CMDS_RENDER_INPUT";
const ENV_RENDER_OUTPUT: &str = "EARTHPIC_CMDS_RENDER_OUTPUT";

/// Edge length of the square image rendered when no size is given.
const DEFAULT_IMAGE_SIZE: u32 = 200;

/// Run the earthpic CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns the first failure of argument parsing, configuration merging or
/// the selected command. A `fetch` that stops early still writes its partial
/// results before reporting [`CliError::PartialFetch`].
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse()?;
    match cli.command {
        Command::Fetch(args) => fetch::run_fetch(args).map(drop),
        Command::Compress(args) => compress::run_compress(args).map(drop),
        Command::Render(args) => render::run_render(args).map(drop),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "earthpic",
    about = "Sample, compress and render pictures of the Earth",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Sample colours over a latitude/longitude grid from a static-map service.
    Fetch(FetchArgs),
    /// Drop samples that row-wise renderers do not need.
    Compress(CompressArgs),
    /// Render an orthographic PNG of a sample file.
    Render(RenderArgs),
}

#[cfg(test)]
mod tests;
