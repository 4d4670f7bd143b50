//! Facade crate for the fuel stop planner.
//!
//! This crate re-exports the core domain types and exposes the CSV catalog
//! and `OpenRouteService` collaborators behind the `data` feature.

#![forbid(unsafe_code)]

pub use fuelstop_core::{
    CatalogError, Coordinate, FuelPlan, Geocoder, OptimizerSettings, PlanError, PlannerSettings,
    ProximityIndex, Route, RouteProvider, RouteProviderError, Station, StationCatalog, StopPlan,
    TripError, Warning, calculate_fuel_cost, haversine_miles, plan_fuel_stops, plan_stops,
    plan_trip,
};

#[cfg(feature = "data")]
pub use fuelstop_data::{
    CatalogLoad, CsvStationCatalog, OpenRouteServiceClient, OpenRouteServiceConfig,
    ProviderBuildError,
};
