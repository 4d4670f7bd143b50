//! `OpenRouteService` client implementing [`Geocoder`] and [`RouteProvider`].
//!
//! The core traits are synchronous so the planner stays embeddable in
//! synchronous code. The client bridges its async HTTP calls to them by
//! blocking on a Tokio runtime it owns.

use std::future::Future;
use std::time::Duration;

use fuelstop_core::{Coordinate, Geocoder, Route, RouteProvider, RouteProviderError};
use geo::Coord;
use log::{debug, warn};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};
use url::Url;

use super::ors::{DirectionsResponse, ErrorResponse, GeocodeResponse};

/// Default geocode search endpoint.
pub const DEFAULT_GEOCODE_URL: &str = "https://api.openrouteservice.org/geocode/search";

/// Default driving directions endpoint.
pub const DEFAULT_DIRECTIONS_URL: &str =
    "https://api.openrouteservice.org/v2/directions/driving-car";

/// Default user agent for `OpenRouteService` requests.
pub const DEFAULT_USER_AGENT: &str = "fuelstop-routing/0.1";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Miles per metre, as applied to the directions summary distance.
pub const METERS_TO_MILES: f64 = 0.000_621_371;

/// Error type for [`OpenRouteServiceClient`] construction failures.
#[derive(Debug, Error)]
pub enum ProviderBuildError {
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// Failed to build the Tokio runtime.
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
    /// A configured endpoint is not a valid URL.
    #[error("invalid {endpoint} URL \"{url}\": {source}")]
    InvalidUrl {
        /// Which endpoint was misconfigured.
        endpoint: &'static str,
        /// The configured value.
        url: String,
        /// Parser error.
        #[source]
        source: url::ParseError,
    },
}

/// Configuration for [`OpenRouteServiceClient`].
#[derive(Clone)]
pub struct OpenRouteServiceConfig {
    /// API key sent as the `api_key` query parameter.
    pub api_key: String,
    /// Geocode search endpoint.
    pub geocode_url: String,
    /// Directions endpoint.
    pub directions_url: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl std::fmt::Debug for OpenRouteServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenRouteServiceConfig")
            .field("api_key", &"<redacted>")
            .field("geocode_url", &self.geocode_url)
            .field("directions_url", &self.directions_url)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl OpenRouteServiceConfig {
    /// Create a configuration for the public endpoints using `api_key`.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            geocode_url: DEFAULT_GEOCODE_URL.to_owned(),
            directions_url: DEFAULT_DIRECTIONS_URL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }

    /// Set the geocode search endpoint.
    #[must_use]
    pub fn with_geocode_url(mut self, url: impl Into<String>) -> Self {
        self.geocode_url = url.into();
        self
    }

    /// Set the directions endpoint.
    #[must_use]
    pub fn with_directions_url(mut self, url: impl Into<String>) -> Self {
        self.directions_url = url.into();
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
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

/// Geocoder and route provider backed by `OpenRouteService`.
///
/// # Runtime behaviour
///
/// Outside any Tokio runtime the client blocks on its own current-thread
/// runtime. Inside a multi-threaded runtime it uses that runtime's handle
/// with [`tokio::task::block_in_place`]. Inside a `current_thread` runtime it
/// falls back to its own runtime, which can deadlock if the caller's runtime
/// is driving I/O this request depends on.
///
/// Error values name the endpoint URL only; the API key never appears in
/// errors or logs.
///
/// # Example
///
/// ```no_run
/// use fuelstop_core::{Geocoder, RouteProvider};
/// use fuelstop_data::routing::{OpenRouteServiceClient, OpenRouteServiceConfig};
///
/// let client = OpenRouteServiceClient::with_config(OpenRouteServiceConfig::new("my-key"))?;
/// let start = client.geocode("Austin, TX")?;
/// let end = client.geocode("Dallas, TX")?;
/// let route = client.route(&start, &end)?;
/// println!("{:.1} miles", route.total_distance_miles());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct OpenRouteServiceClient {
    client: Client,
    config: OpenRouteServiceConfig,
    geocode_url: Url,
    directions_url: Url,
    runtime: Runtime,
}

impl std::fmt::Debug for OpenRouteServiceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenRouteServiceClient")
            .field("client", &self.client)
            .field("config", &self.config)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish_non_exhaustive()
    }
}

impl OpenRouteServiceClient {
    /// Create a client for the public endpoints.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(OpenRouteServiceConfig::new(api_key))
    }

    /// Create a client with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if an endpoint URL does not parse, or if the HTTP
    /// client or Tokio runtime fails to build.
    pub fn with_config(config: OpenRouteServiceConfig) -> Result<Self, ProviderBuildError> {
        let geocode_url = parse_endpoint("geocode", &config.geocode_url)?;
        let directions_url = parse_endpoint("directions", &config.directions_url)?;
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ProviderBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ProviderBuildError::Runtime)?;
        Ok(Self {
            client,
            config,
            geocode_url,
            directions_url,
            runtime,
        })
    }

    /// Geocode search URL for `query`, limited to the best match.
    fn build_geocode_url(&self, query: &str) -> Url {
        let mut url = self.geocode_url.clone();
        url.query_pairs_mut()
            .append_pair("api_key", &self.config.api_key)
            .append_pair("text", query)
            .append_pair("size", "1");
        url
    }

    /// Directions URL between two positions given as `lon,lat`.
    fn build_directions_url(&self, start: &Coordinate, end: &Coordinate) -> Url {
        let mut url = self.directions_url.clone();
        url.query_pairs_mut()
            .append_pair("api_key", &self.config.api_key)
            .append_pair("start", &lon_lat(start))
            .append_pair("end", &lon_lat(end));
        url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        endpoint: &Url,
    ) -> Result<T, RouteProviderError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, endpoint.as_str()))?;
        check_status(response, endpoint.as_str())
            .await?
            .json()
            .await
            .map_err(|err| RouteProviderError::ParseError {
                message: err.to_string(),
            })
    }

    /// Convert a reqwest error to a `RouteProviderError`.
    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> RouteProviderError {
        if error.is_timeout() {
            return RouteProviderError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }

        if let Some(status) = error.status() {
            return RouteProviderError::HttpError {
                url: url.to_owned(),
                status: status.as_u16(),
                message: without_query(&error.to_string()),
            };
        }

        RouteProviderError::NetworkError {
            url: url.to_owned(),
            message: without_query(&error.to_string()),
        }
    }

    /// Run `future` to completion from synchronous code.
    ///
    /// `block_in_place` requires a multi-threaded runtime; for
    /// `current_thread` runtimes the client's own runtime is used.
    fn block_on<F: Future>(&self, future: F) -> F::Output {
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            _ => self.runtime.block_on(future),
        }
    }
}

impl Geocoder for OpenRouteServiceClient {
    fn geocode(&self, query: &str) -> Result<Coordinate, RouteProviderError> {
        if query.trim().is_empty() {
            return Err(RouteProviderError::LocationNotFound {
                query: query.to_owned(),
            });
        }
        let url = self.build_geocode_url(query);
        let response: GeocodeResponse = self.block_on(self.get_json(url, &self.geocode_url))?;
        let position = convert_geocode(query, response)?;
        debug!(
            "Geocoded \"{query}\" to ({}, {})",
            position.longitude(),
            position.latitude()
        );
        Ok(position)
    }
}

impl RouteProvider for OpenRouteServiceClient {
    fn route(&self, start: &Coordinate, end: &Coordinate) -> Result<Route, RouteProviderError> {
        let url = self.build_directions_url(start, end);
        let response: DirectionsResponse =
            self.block_on(self.get_json(url, &self.directions_url))?;
        convert_directions(response)
    }
}

fn parse_endpoint(endpoint: &'static str, raw: &str) -> Result<Url, ProviderBuildError> {
    Url::parse(raw).map_err(|source| ProviderBuildError::InvalidUrl {
        endpoint,
        url: raw.to_owned(),
        source,
    })
}

fn lon_lat(position: &Coordinate) -> String {
    format!("{},{}", position.longitude(), position.latitude())
}

/// Strip query strings from URLs quoted in reqwest messages so the API key
/// is never echoed.
fn without_query(message: &str) -> String {
    message
        .split_whitespace()
        .map(|word| word.split_once('?').map_or(word, |(head, _)| head))
        .collect::<Vec<_>>()
        .join(" ")
}

async fn check_status(response: Response, url: &str) -> Result<Response, RouteProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(convert_error_body(status.as_u16(), &body, url))
}

/// Interpret the body of a non-success response.
fn convert_error_body(status: u16, body: &str, url: &str) -> RouteProviderError {
    serde_json::from_str::<ErrorResponse>(body).map_or_else(
        |_| RouteProviderError::HttpError {
            url: url.to_owned(),
            status,
            message: body.trim().to_owned(),
        },
        |parsed| {
            let (code, message) = parsed.error.into_parts(status);
            RouteProviderError::ServiceError { code, message }
        },
    )
}

/// Take the best geocoding match.
fn convert_geocode(
    query: &str,
    response: GeocodeResponse,
) -> Result<Coordinate, RouteProviderError> {
    let feature = response
        .features
        .into_iter()
        .next()
        .ok_or_else(|| RouteProviderError::LocationNotFound {
            query: query.to_owned(),
        })?;
    Coordinate::from_slice(&feature.geometry.coordinates).map_err(|err| {
        RouteProviderError::ParseError {
            message: format!("geocode match for \"{query}\": {err}"),
        }
    })
}

/// Turn the first route into a [`Route`].
///
/// Positions with fewer than two components become NaN points so the
/// proximity index reports them like any other unusable route point.
#[expect(clippy::float_arithmetic, reason = "metre to mile conversion")]
fn convert_directions(response: DirectionsResponse) -> Result<Route, RouteProviderError> {
    let feature = response
        .features
        .into_iter()
        .next()
        .ok_or(RouteProviderError::EmptyRoute)?;

    let coordinates: Vec<Coord<f64>> = feature
        .geometry
        .coordinates
        .iter()
        .enumerate()
        .map(|(index, position)| match position.as_slice() {
            [x, y, ..] => Coord { x: *x, y: *y },
            _ => {
                warn!(
                    "Route position {index} has {} component(s); keeping it as unusable",
                    position.len()
                );
                Coord {
                    x: f64::NAN,
                    y: f64::NAN,
                }
            }
        })
        .collect();
    if coordinates.is_empty() {
        return Err(RouteProviderError::EmptyRoute);
    }

    let miles = feature.properties.summary.distance * METERS_TO_MILES;
    debug!(
        "Directions returned {} points over {miles:.1} miles",
        coordinates.len()
    );
    Ok(Route::new(coordinates, miles))
}
