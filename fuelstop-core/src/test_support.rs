//! Test-only collaborators used by unit and behaviour tests.

use std::collections::HashMap;

use crate::{
    CatalogError, Coordinate, Geocoder, Route, RouteProvider, RouteProviderError, Station,
    StationCatalog,
};

/// In-memory `StationCatalog` used in tests.
#[derive(Default, Debug, Clone)]
pub struct MemoryCatalog {
    stations: Vec<Station>,
}

impl MemoryCatalog {
    /// Create a catalog from a collection of stations.
    pub fn with_stations<I>(stations: I) -> Self
    where
        I: IntoIterator<Item = Station>,
    {
        Self {
            stations: stations.into_iter().collect(),
        }
    }
}

impl StationCatalog for MemoryCatalog {
    fn load_stations(&self) -> Result<Vec<Station>, CatalogError> {
        Ok(self.stations.clone())
    }
}

/// `Geocoder` answering from a fixed table of place names.
#[derive(Default, Debug, Clone)]
pub struct FixedGeocoder {
    places: HashMap<String, (f64, f64)>,
}

impl FixedGeocoder {
    /// Add a place at `longitude`, `latitude`.
    #[must_use]
    pub fn with_place(mut self, name: impl Into<String>, longitude: f64, latitude: f64) -> Self {
        self.places.insert(name.into(), (longitude, latitude));
        self
    }
}

impl Geocoder for FixedGeocoder {
    fn geocode(&self, query: &str) -> Result<Coordinate, RouteProviderError> {
        let not_found = || RouteProviderError::LocationNotFound {
            query: query.to_owned(),
        };
        let (longitude, latitude) = self.places.get(query).copied().ok_or_else(not_found)?;
        Coordinate::new(longitude, latitude).map_err(|_| not_found())
    }
}

/// `RouteProvider` returning a straight lon/lat line between the endpoints.
///
/// The line has `steps + 1` points and its length is reported as the
/// great-circle distance between the endpoints.
#[derive(Debug, Clone, Copy)]
pub struct StraightLineRouteProvider {
    steps: u32,
}

impl StraightLineRouteProvider {
    /// Create a provider splitting each route into `steps` segments.
    #[must_use]
    pub const fn new(steps: u32) -> Self {
        Self { steps }
    }
}

impl Default for StraightLineRouteProvider {
    fn default() -> Self {
        Self::new(16)
    }
}

impl RouteProvider for StraightLineRouteProvider {
    #[expect(clippy::float_arithmetic, reason = "linear interpolation")]
    fn route(&self, start: &Coordinate, end: &Coordinate) -> Result<Route, RouteProviderError> {
        let steps = self.steps.max(1);
        let delta_lon = end.longitude() - start.longitude();
        let delta_lat = end.latitude() - start.latitude();
        let mut coordinates: Vec<_> = (0..steps)
            .map(|step| {
                let t = f64::from(step) / f64::from(steps);
                geo::Coord {
                    x: start.longitude() + delta_lon * t,
                    y: start.latitude() + delta_lat * t,
                }
            })
            .collect();
        coordinates.push(end.as_coord());
        Ok(Route::new(coordinates, start.distance_miles(end)))
    }
}

/// `RouteProvider` that always fails with the configured error.
#[derive(Debug, Clone)]
pub struct FailingRouteProvider {
    error: RouteProviderError,
}

impl FailingRouteProvider {
    /// Create a provider failing with `error`.
    #[must_use]
    pub const fn new(error: RouteProviderError) -> Self {
        Self { error }
    }
}

impl RouteProvider for FailingRouteProvider {
    fn route(&self, _start: &Coordinate, _end: &Coordinate) -> Result<Route, RouteProviderError> {
        Err(self.error.clone())
    }
}
