//! Test utilities for routing collaborators.
//!
//! [`StubRouteService`] answers geocoding and routing requests from
//! pre-configured data without making HTTP requests.

use std::collections::HashMap;

use fuelstop_core::{Coordinate, Geocoder, Route, RouteProvider, RouteProviderError};

/// Stub geocoder and route provider for testing.
///
/// Places are matched case-insensitively after trimming. Unknown places
/// return [`RouteProviderError::LocationNotFound`].
///
/// # Example
///
/// ```
/// use fuelstop_core::{Geocoder, Route, RouteProvider};
/// use fuelstop_data::routing::test_support::StubRouteService;
/// use geo::Coord;
///
/// let route = Route::new(vec![Coord { x: -97.74, y: 30.27 }, Coord { x: -97.15, y: 31.55 }], 95.0);
/// let service = StubRouteService::with_route(route)
///     .with_place("Austin", -97.74, 30.27)
///     .with_place("Waco", -97.15, 31.55);
///
/// let start = service.geocode("austin")?;
/// let end = service.geocode("Waco")?;
/// assert_eq!(service.route(&start, &end)?.total_distance_miles(), 95.0);
/// # Ok::<(), fuelstop_core::RouteProviderError>(())
/// ```
#[derive(Debug, Clone)]
pub struct StubRouteService {
    places: HashMap<String, Coordinate>,
    response: StubResponse,
}

#[derive(Debug, Clone)]
enum StubResponse {
    Route(Route),
    Error(RouteProviderError),
}

impl StubRouteService {
    /// Create a service that returns `route` for every routing request.
    #[must_use]
    pub fn with_route(route: Route) -> Self {
        Self {
            places: HashMap::new(),
            response: StubResponse::Route(route),
        }
    }

    /// Create a service whose routing requests fail with `error`.
    ///
    /// Geocoding still answers from the configured places.
    #[must_use]
    pub fn with_error(error: RouteProviderError) -> Self {
        Self {
            places: HashMap::new(),
            response: StubResponse::Error(error),
        }
    }

    /// Register a place. Out-of-range positions are ignored.
    #[must_use]
    pub fn with_place(mut self, name: &str, longitude: f64, latitude: f64) -> Self {
        if let Ok(position) = Coordinate::new(longitude, latitude) {
            self.places.insert(place_key(name), position);
        }
        self
    }
}

fn place_key(name: &str) -> String {
    name.trim().to_lowercase()
}

impl Geocoder for StubRouteService {
    fn geocode(&self, query: &str) -> Result<Coordinate, RouteProviderError> {
        self.places
            .get(&place_key(query))
            .copied()
            .ok_or_else(|| RouteProviderError::LocationNotFound {
                query: query.to_owned(),
            })
    }
}

impl RouteProvider for StubRouteService {
    fn route(&self, _start: &Coordinate, _end: &Coordinate) -> Result<Route, RouteProviderError> {
        match &self.response {
            StubResponse::Route(route) => Ok(route.clone()),
            StubResponse::Error(error) => Err(error.clone()),
        }
    }
}
