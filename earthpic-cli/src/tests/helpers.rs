//! Test helpers for CLI command runs.

use camino::{Utf8Path, Utf8PathBuf};
use earthpic_core::test_support::{FlakyColorProvider, GridColorProvider, StubColorProvider};
use earthpic_core::{Color, ColorProvider, FetchError, SampleFormat, SampleSet, decode};
use earthpic_data::StaticMapConfig;
use tempfile::TempDir;

use crate::CliError;
use crate::fetch::ProviderFactory;

/// Provider factory handing out in-process test providers.
pub(super) enum TestProviders {
    /// Every coordinate succeeds with a colour unique to it.
    Healthy,
    /// Every coordinate succeeds with the same blue.
    Uniform,
    /// The north-east corner (90, 180) fails.
    FailingCorner,
}

impl ProviderFactory for TestProviders {
    fn build(&self, _config: &StaticMapConfig) -> Result<Box<dyn ColorProvider>, CliError> {
        Ok(match self {
            Self::Healthy => Box::new(GridColorProvider),
            Self::Uniform => Box::new(StubColorProvider::with_color(Color::new(0.0, 0.0, 1.0))),
            Self::FailingCorner => Box::new(FlakyColorProvider::failing_at(
                &[(90.0, 180.0)],
                corner_error(),
            )),
        })
    }
}

pub(super) fn corner_error() -> FetchError {
    FetchError::Http {
        url: "http://maps.example.com/staticmap?center=90,180".to_owned(),
        status: 503,
        message: "service unavailable".to_owned(),
    }
}

/// Temporary directory exposed as a UTF-8 path.
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }
}

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    earthpic_fs::write_file(path, contents).expect("write fixture");
}

pub(super) fn read_samples(path: &Utf8Path) -> SampleSet {
    let bytes = earthpic_fs::read_file(path).expect("read samples");
    decode(&bytes, SampleFormat::from_path(path.as_std_path())).expect("decode samples")
}
