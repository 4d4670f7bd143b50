//! Data access for the fuel stop planner.
//!
//! Responsibilities:
//! - Load the fuel station catalog from CSV price lists.
//! - Geocode place names and fetch driving routes from `OpenRouteService`.
//! - Provide UTF-8 path helpers for file access.
//!
//! Boundaries:
//! - Do not encode planning rules (live in `fuelstop-core`).
//! - Expose collaborators through the core's `StationCatalog`, `Geocoder`
//!   and `RouteProvider` traits.
//!
//! Invariants:
//! - The `OpenRouteService` API key never appears in errors or logs.
//! - No global mutable state.

pub mod catalog;
pub mod fs;
pub mod routing;

pub use catalog::{CatalogLoad, CsvStationCatalog, SkippedRow, read_catalog};
pub use routing::{OpenRouteServiceClient, OpenRouteServiceConfig, ProviderBuildError};
