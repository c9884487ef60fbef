//! Loading and storing sample files.
//!
//! The file format follows the extension: `.json` files hold a JSON array of
//! samples, everything else the five-column text format.

use camino::Utf8Path;
use earthpic_core::{SampleFormat, SampleSet, decode, encode};
use log::info;

use crate::CliError;

/// Fail unless `path` names an existing regular file.
pub(crate) fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match earthpic_fs::file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

pub(crate) fn load_samples(path: &Utf8Path) -> Result<SampleSet, CliError> {
    let bytes = earthpic_fs::read_file(path).map_err(|source| CliError::ReadSamples {
        path: path.to_path_buf(),
        source,
    })?;
    let samples = decode(&bytes, SampleFormat::from_path(path.as_std_path())).map_err(|source| {
        CliError::ParseSamples {
            path: path.to_path_buf(),
            source,
        }
    })?;
    info!("loaded {} samples from {path}", samples.len());
    Ok(samples)
}

pub(crate) fn save_samples(path: &Utf8Path, samples: &SampleSet) -> Result<(), CliError> {
    let bytes = encode(samples, SampleFormat::from_path(path.as_std_path())).map_err(|source| {
        CliError::EncodeSamples {
            path: path.to_path_buf(),
            source,
        }
    })?;
    earthpic_fs::write_file(path, bytes).map_err(|source| CliError::WriteSamples {
        path: path.to_path_buf(),
        source,
    })?;
    info!("wrote {} samples to {path}", samples.len());
    Ok(())
}
