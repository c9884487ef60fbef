//! Fan-out/fan-in worker pool that turns coordinates into samples.

use std::sync::OnceLock;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Sender};
use std::thread;

use log::{debug, info, warn};

use crate::{Sample, SampleSet};

use super::error::{AcquireError, FetchError};
use super::grid::{Coordinate, Grid};
use super::provider::ColorProvider;

/// Worker count used when none is configured.
pub const DEFAULT_WORKERS: usize = 10;

/// Tuning for [`acquire`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcquireOptions {
    /// Number of concurrent fetch workers.
    pub workers: usize,
}

impl Default for AcquireOptions {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
        }
    }
}

impl AcquireOptions {
    /// Set the number of concurrent fetch workers.
    #[must_use]
    pub const fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }
}

/// Samples gathered by a pipeline run, plus the first fetch error if any.
///
/// The order of `samples` is unspecified.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Acquisition {
    /// Every sample that was fetched successfully.
    pub samples: SampleSet,
    /// The first fetch failure observed, if the run was partial.
    pub error: Option<FetchError>,
}

impl Acquisition {
    /// Whether every coordinate was fetched without error.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.error.is_none()
    }

    /// Split into the gathered samples and the optional error.
    #[must_use]
    pub fn into_parts(self) -> (SampleSet, Option<FetchError>) {
        (self.samples, self.error)
    }
}

/// Fetch one sample per coordinate of a `lat_step` × `lon_step` grid.
///
/// See [`acquire_grid`] for the concurrency and failure semantics.
///
/// # Errors
///
/// Returns [`AcquireError::Grid`] for an invalid step and
/// [`AcquireError::NoWorkers`] when `options.workers` is zero. Fetch failures
/// are reported through [`Acquisition::error`] instead.
///
/// # Examples
///
/// ```
/// use earthpic_core::{AcquireOptions, Color, ColorProvider, FetchError, acquire};
///
/// struct Grey;
///
/// impl ColorProvider for Grey {
///     fn fetch_color(&self, _lat: f64, _lon: f64) -> Result<Color, FetchError> {
///         Ok(Color::new(0.5, 0.5, 0.5))
///     }
/// }
///
/// let acquisition = acquire(90.0, 180.0, &Grey, AcquireOptions::default())?;
/// assert!(acquisition.is_complete());
/// assert_eq!(acquisition.samples.len(), 9);
/// # Ok::<(), earthpic_core::AcquireError>(())
/// ```
pub fn acquire<P>(
    lat_step: f64,
    lon_step: f64,
    provider: &P,
    options: AcquireOptions,
) -> Result<Acquisition, AcquireError>
where
    P: ColorProvider + ?Sized,
{
    let grid = Grid::new(lat_step, lon_step)?;
    acquire_grid(&grid.coordinates(), provider, options)
}

/// Fetch one sample per coordinate with a fixed pool of worker threads.
///
/// Workers pull coordinates from a shared cursor over `coordinates` and send
/// each sample to the calling thread over a channel. The channel closes only
/// once every worker has exited, so the returned set contains every sample
/// produced, each exactly once.
///
/// A worker whose fetch fails records the error and retires. The other
/// workers keep draining the remaining coordinates; nothing is cancelled.
/// Only the first error recorded is kept.
///
/// A provider call that never returns stalls its worker, and with it the
/// whole call.
///
/// # Errors
///
/// Returns [`AcquireError::NoWorkers`] when `options.workers` is zero.
pub fn acquire_grid<P>(
    coordinates: &[Coordinate],
    provider: &P,
    options: AcquireOptions,
) -> Result<Acquisition, AcquireError>
where
    P: ColorProvider + ?Sized,
{
    if options.workers == 0 {
        return Err(AcquireError::NoWorkers);
    }
    let workers = options.workers.min(coordinates.len()).max(1);
    let supply = CoordinateSupply::new(coordinates);
    let first_error = OnceLock::new();
    let (sender, receiver) = mpsc::channel::<Sample>();

    info!(
        "fetching {} coordinates with {workers} workers",
        coordinates.len()
    );
    let samples: SampleSet = thread::scope(|scope| {
        for id in 0..workers {
            let results = sender.clone();
            let supply = &supply;
            let first_error = &first_error;
            scope.spawn(move || run_worker(id, provider, supply, &results, first_error));
        }
        // The channel closes once every worker clone of the sender is dropped.
        drop(sender);
        receiver.iter().collect()
    });

    let error = first_error.into_inner();
    match &error {
        None => info!("fetched all {} samples", samples.len()),
        Some(err) => warn!(
            "fetched {} of {} samples before failing: {err}",
            samples.len(),
            coordinates.len()
        ),
    }
    Ok(Acquisition { samples, error })
}

/// Read-only coordinate list handed out one entry at a time.
struct CoordinateSupply<'a> {
    coordinates: &'a [Coordinate],
    cursor: AtomicUsize,
}

impl<'a> CoordinateSupply<'a> {
    const fn new(coordinates: &'a [Coordinate]) -> Self {
        Self {
            coordinates,
            cursor: AtomicUsize::new(0),
        }
    }

    fn next(&self) -> Option<Coordinate> {
        let index = self.cursor.fetch_add(1, Ordering::Relaxed);
        self.coordinates.get(index).copied()
    }
}

fn run_worker<P>(
    id: usize,
    provider: &P,
    supply: &CoordinateSupply<'_>,
    results: &Sender<Sample>,
    first_error: &OnceLock<FetchError>,
) where
    P: ColorProvider + ?Sized,
{
    debug!("fetch worker {id} started");
    let mut fetched = 0_usize;
    while let Some(Coordinate { lat, lon }) = supply.next() {
        match provider.fetch_color(lat, lon) {
            Ok(color) => {
                if results.send(Sample::new(lat, lon, color)).is_err() {
                    break;
                }
                fetched += 1;
            }
            Err(err) => {
                warn!("fetch worker {id} stopping at {lat},{lon}: {err}");
                if first_error.set(err).is_err() {
                    debug!("fetch worker {id}: an earlier error is already recorded");
                }
                break;
            }
        }
    }
    debug!("fetch worker {id} finished after {fetched} samples");
}
