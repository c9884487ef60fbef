//! Colour provider trait for single-coordinate lookups.

use crate::Color;

use super::error::FetchError;

/// Fetch the colour of the Earth's surface at one coordinate.
///
/// Implementations are shared by every acquisition worker, so they must be
/// [`Sync`]. Provider-specific settings such as credentials belong to the
/// implementing type and are opaque to the pipeline.
///
/// # Examples
///
/// ```rust
/// use earthpic_core::{Color, ColorProvider, FetchError};
///
/// struct Ocean;
///
/// impl ColorProvider for Ocean {
///     fn fetch_color(&self, _lat: f64, _lon: f64) -> Result<Color, FetchError> {
///         Ok(Color::new(0.0, 0.2, 0.6))
///     }
/// }
///
/// assert_eq!(Ocean.fetch_color(10.0, 20.0)?, Color::new(0.0, 0.2, 0.6));
/// # Ok::<(), FetchError>(())
/// ```
pub trait ColorProvider: Sync {
    /// Return the colour at `lat`/`lon`.
    ///
    /// Implementations must reject responses that do not describe exactly one
    /// pixel with [`FetchError::UnexpectedDimensions`].
    fn fetch_color(&self, lat: f64, lon: f64) -> Result<Color, FetchError>;
}

impl<P: ColorProvider + ?Sized> ColorProvider for &P {
    fn fetch_color(&self, lat: f64, lon: f64) -> Result<Color, FetchError> {
        (**self).fetch_color(lat, lon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    use crate::test_support::{GridColorProvider, StubColorProvider};

    #[rstest]
    fn stub_replays_its_error() {
        let error = FetchError::Decode {
            message: "not an image".to_owned(),
        };
        let provider = StubColorProvider::with_error(error.clone());
        let err = provider
            .fetch_color(0.0, 0.0)
            .expect_err("stub should fail");
        assert_eq!(err, error);
    }

    #[rstest]
    fn grid_provider_encodes_coordinates() {
        let provider = GridColorProvider;
        let color = provider.fetch_color(90.0, -180.0).expect("colour");
        assert_eq!(color, Color::new(1.0, 0.0, 0.5));
    }

    #[rstest]
    fn references_are_providers() {
        fn fetch_via<P: ColorProvider>(provider: &P) -> Result<Color, FetchError> {
            provider.fetch_color(-90.0, 180.0)
        }
        let provider = GridColorProvider;
        let color = fetch_via(&&provider).expect("colour");
        assert_eq!(color, Color::new(0.0, 1.0, 0.5));
    }
}
