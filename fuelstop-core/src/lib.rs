//! Core domain types and algorithms for the fuel stop planner.
//!
//! The crate is synchronous and free of I/O. A plan is produced in three
//! steps:
//!
//! 1. [`ProximityIndex`] buckets the station catalog into a lon/lat grid and
//!    returns the stations within a deviation radius of a [`Route`].
//! 2. [`plan_stops`] walks those candidates greedily, choosing the cheapest
//!    reachable station (with a small penalty for long legs) until the route
//!    is covered or nothing further is in range.
//! 3. [`calculate_fuel_cost`] prices the trip at the average price of the
//!    chosen stops.
//!
//! [`plan_fuel_stops`] runs all three, and [`plan_trip`] adds geocoding and
//! routing in front of it. Bad input data (NaN or out-of-range
//! positions) is skipped and reported as [`Warning`]s; only unusable call
//! arguments produce a [`PlanError`].
//!
//! Geocoding, routing and catalog loading are collaborators behind the
//! [`Geocoder`], [`RouteProvider`] and [`StationCatalog`] traits.

mod catalog;
mod coordinate;
mod cost;
mod distance;
mod error;
mod optimizer;
mod planner;
mod proximity;
mod route;
mod routing;
mod station;
mod trip;
mod warning;

#[doc(hidden)]
pub mod test_support;

pub use catalog::{CatalogError, StationCatalog};
pub use coordinate::{
    Coordinate, CoordinateError, LATITUDE_RANGE, LONGITUDE_RANGE, validate_coordinates,
};
pub use cost::calculate_fuel_cost;
pub use distance::{EARTH_RADIUS_MILES, MILES_PER_DEGREE, haversine_miles};
pub use error::PlanError;
pub use optimizer::{
    DEFAULT_MAX_RANGE_MILES, DEFAULT_MPG, OptimizerSettings, StopPlan, plan_stops,
    score_candidate,
};
pub use planner::{DEFAULT_DEVIATION_RADIUS_MILES, FuelPlan, PlannerSettings, plan_fuel_stops};
pub use proximity::{CellKey, ProximityIndex, RouteMatches, cell_size_for_radius};
pub use route::Route;
pub use routing::{Geocoder, RouteProvider, RouteProviderError};
pub use station::Station;
pub use trip::{TripError, plan_trip};
pub use warning::Warning;
