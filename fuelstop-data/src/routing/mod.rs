//! `OpenRouteService` geocoding and directions.
//!
//! [`OpenRouteServiceClient`] implements [`fuelstop_core::Geocoder`] and
//! [`fuelstop_core::RouteProvider`] over the geocode search and directions
//! GET APIs. The synchronous traits are implemented by blocking on async
//! HTTP calls internally.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use fuelstop_core::{PlannerSettings, plan_trip};
//! use fuelstop_data::catalog::CsvStationCatalog;
//! use fuelstop_data::routing::{OpenRouteServiceClient, OpenRouteServiceConfig};
//!
//! let config = OpenRouteServiceConfig::new("my-key")
//!     .with_timeout(Duration::from_secs(60))
//!     .with_user_agent("my-app/1.0");
//! let client = OpenRouteServiceClient::with_config(config)?;
//! let catalog = CsvStationCatalog::new("fuel-prices.csv");
//!
//! let plan = plan_trip(
//!     &client,
//!     &client,
//!     &catalog,
//!     "Austin, TX",
//!     "Chicago, IL",
//!     &PlannerSettings::default(),
//! )?;
//! println!("{} stops", plan.fuel_stops.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod ors;
mod provider;

#[doc(hidden)]
pub mod test_support;

pub use provider::{
    DEFAULT_DIRECTIONS_URL, DEFAULT_GEOCODE_URL, DEFAULT_USER_AGENT, METERS_TO_MILES,
    OpenRouteServiceClient, OpenRouteServiceConfig, ProviderBuildError,
};
