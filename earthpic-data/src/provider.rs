//! HTTP `ColorProvider` backed by a static-map imaging service.
//!
//! Each coordinate is requested as a 1×1 roadmap tile centred on the point;
//! the single pixel of the returned image is the sample's colour.
//!
//! [`ColorProvider`] is synchronous so the acquisition pipeline can drive it
//! from plain worker threads. This provider bridges onto async `reqwest` by
//! blocking on a Tokio runtime it owns.

use std::time::Duration;

use earthpic_core::{Color, ColorProvider, FetchError};
use image::GenericImageView;
use log::debug;
use reqwest::{Client, Url};
use thiserror::Error;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};

/// Static maps endpoint used when none is configured.
pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/staticmap";

/// Default user agent for imaging requests.
pub const DEFAULT_USER_AGENT: &str = "earthpic/0.1";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Failure to construct a [`StaticMapColorProvider`].
#[derive(Debug, Error)]
pub enum ProviderBuildError {
    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// The Tokio runtime could not be built.
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
    /// The configured endpoint is not an absolute URL.
    #[error("invalid base URL {url}: {message}")]
    InvalidBaseUrl {
        /// Rejected endpoint.
        url: String,
        /// Parser error description.
        message: String,
    },
}

/// Configuration for [`StaticMapColorProvider`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticMapConfig {
    /// Endpoint that serves static map images.
    pub base_url: String,
    /// Access credential appended as the `key` query parameter.
    pub api_key: Option<String>,
    /// Connect and request timeout.
    pub timeout: Duration,
    /// User agent sent with every request.
    pub user_agent: String,
}

impl Default for StaticMapConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            api_key: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl StaticMapConfig {
    /// Configuration for the given endpoint with default settings.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Send `api_key` with every request.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// `ColorProvider` that samples a static-map service one pixel at a time.
///
/// # Runtime behaviour
///
/// Outside any Tokio runtime, requests run on the provider's own
/// multi-threaded runtime, which may be shared by many calling threads at
/// once. Inside a multi-threaded runtime the caller's handle is used through
/// [`tokio::task::block_in_place`]. Inside a `current_thread` runtime the
/// provider falls back to its own runtime and blocks the caller's.
///
/// # Examples
///
/// ```no_run
/// use earthpic_core::ColorProvider;
/// use earthpic_data::{StaticMapColorProvider, StaticMapConfig};
///
/// let config = StaticMapConfig::default().with_api_key("secret");
/// let provider = StaticMapColorProvider::with_config(config)?;
/// let color = provider.fetch_color(51.5, -0.1)?;
/// println!("{color:?}");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct StaticMapColorProvider {
    client: Client,
    config: StaticMapConfig,
    endpoint: Url,
    runtime: Runtime,
}

impl std::fmt::Debug for StaticMapColorProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticMapColorProvider")
            .field("client", &self.client)
            .field("config", &self.config)
            .field("endpoint", &self.endpoint.as_str())
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish()
    }
}

impl StaticMapColorProvider {
    /// Create a provider for `base_url` with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL does not parse, or if the HTTP client
    /// or Tokio runtime fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(StaticMapConfig::new(base_url))
    }

    /// Create a provider with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL does not parse, or if the HTTP client
    /// or Tokio runtime fails to build.
    pub fn with_config(config: StaticMapConfig) -> Result<Self, ProviderBuildError> {
        let endpoint =
            Url::parse(&config.base_url).map_err(|err| ProviderBuildError::InvalidBaseUrl {
                url: config.base_url.clone(),
                message: err.to_string(),
            })?;
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ProviderBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("earthpic-http")
            .build()
            .map_err(ProviderBuildError::Runtime)?;
        Ok(Self {
            client,
            config,
            endpoint,
            runtime,
        })
    }

    /// The configuration this provider was built with.
    #[must_use]
    pub const fn config(&self) -> &StaticMapConfig {
        &self.config
    }

    /// Build the tile URL for one coordinate.
    ///
    /// The API key is percent-encoded; the fixed parameters are not.
    fn build_url(&self, lat: f64, lon: f64) -> String {
        let mut url = self.endpoint.clone();
        url.set_query(Some(&format!(
            "center={lat},{lon}&zoom=1&size=1x1&maptype=roadmap&sensor=false"
        )));
        if let Some(key) = &self.config.api_key {
            url.query_pairs_mut().append_pair("key", key);
        }
        url.into()
    }

    async fn fetch_async(&self, lat: f64, lon: f64) -> Result<Color, FetchError> {
        let url = self.build_url(lat, lon);
        debug!("requesting tile for {lat},{lon}");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, &url))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err, &url))?;
        let body = response
            .bytes()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, &url))?;

        decode_pixel(&body, lat, lon)
    }

    /// Convert a reqwest error to a `FetchError`.
    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> FetchError {
        if error.is_timeout() {
            return FetchError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }

        if let Some(status) = error.status() {
            return FetchError::Http {
                url: url.to_owned(),
                status: status.as_u16(),
                message: error.to_string(),
            };
        }

        FetchError::Network {
            url: url.to_owned(),
            message: error.to_string(),
        }
    }
}

impl ColorProvider for StaticMapColorProvider {
    fn fetch_color(&self, lat: f64, lon: f64) -> Result<Color, FetchError> {
        let future = self.fetch_async(lat, lon);
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            _ => self.runtime.block_on(future),
        }
    }
}

/// Decode a tile image and return its single pixel as a colour.
///
/// PNG, JPEG and GIF bodies are accepted. Channels are widened to 16 bits and
/// divided by `0xffff`.
///
/// # Errors
///
/// Returns [`FetchError::Decode`] if the body is not a supported image and
/// [`FetchError::UnexpectedDimensions`] unless it is exactly 1×1.
pub fn decode_pixel(bytes: &[u8], lat: f64, lon: f64) -> Result<Color, FetchError> {
    let image = image::load_from_memory(bytes).map_err(|err| FetchError::Decode {
        message: err.to_string(),
    })?;
    let (width, height) = image.dimensions();
    if (width, height) != (1, 1) {
        return Err(FetchError::UnexpectedDimensions {
            lat,
            lon,
            width,
            height,
        });
    }
    let [r, g, b, _] = image.to_rgba16().get_pixel(0, 0).0;
    Ok(Color::new(channel(r), channel(g), channel(b)))
}

fn channel(value: u16) -> f64 {
    f64::from(value) / f64::from(u16::MAX)
}
