//! Collaborators that turn place names into a drivable route.
//!
//! Geocoding and routing are network concerns, so the core only defines the
//! synchronous [`Geocoder`] and [`RouteProvider`] traits and the
//! [`RouteProviderError`] they share. `fuelstop-data` implements both against
//! `OpenRouteService`; tests use the stubs in `test_support`.

mod error;
mod provider;

pub use error::RouteProviderError;
pub use provider::{Geocoder, RouteProvider};
