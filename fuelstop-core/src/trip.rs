//! End-to-end planning between two named places.

use log::{debug, info};
use thiserror::Error;

use crate::{
    CatalogError, Coordinate, FuelPlan, Geocoder, PlanError, PlannerSettings, RouteProvider,
    RouteProviderError, StationCatalog, plan_fuel_stops,
};

/// Errors from [`plan_trip`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TripError {
    /// A place name could not be resolved.
    #[error("invalid location \"{location}\"")]
    InvalidLocation {
        /// Place text as supplied by the caller.
        location: String,
    },
    /// Geocoding or routing failed for another reason.
    #[error("route lookup failed: {0}")]
    Routing(#[source] RouteProviderError),
    /// The station catalog could not be read.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    /// The planner rejected its parameters.
    #[error(transparent)]
    Plan(#[from] PlanError),
}

/// Geocode `start` and `end`, fetch the route between them and plan fuel
/// stops along it from `catalog`.
///
/// # Errors
///
/// Returns [`TripError::InvalidLocation`] when either place is unknown,
/// [`TripError::Routing`] for any other collaborator failure, and the
/// catalog and planner errors otherwise.
///
/// # Examples
/// ```
/// use fuelstop_core::{PlannerSettings, Station, plan_trip};
/// use fuelstop_core::test_support::{FixedGeocoder, MemoryCatalog, StraightLineRouteProvider};
///
/// let geocoder = FixedGeocoder::default()
///     .with_place("Austin", -97.74, 30.27)
///     .with_place("Round Rock", -97.68, 30.51);
/// let catalog = MemoryCatalog::with_stations([
///     Station::new("Round Rock Travel Center", 30.50, -97.68, 3.15, "I-35 Exit 253"),
/// ]);
///
/// let plan = plan_trip(
///     &geocoder,
///     &StraightLineRouteProvider::default(),
///     &catalog,
///     "Austin",
///     "Round Rock",
///     &PlannerSettings::default(),
/// )?;
/// assert_eq!(plan.fuel_stops.len(), 1);
/// # Ok::<(), fuelstop_core::TripError>(())
/// ```
pub fn plan_trip<G, R, C>(
    geocoder: &G,
    router: &R,
    catalog: &C,
    start: &str,
    end: &str,
    settings: &PlannerSettings,
) -> Result<FuelPlan, TripError>
where
    G: Geocoder + ?Sized,
    R: RouteProvider + ?Sized,
    C: StationCatalog + ?Sized,
{
    let from = resolve(geocoder, start)?;
    let to = resolve(geocoder, end)?;
    let route = router.route(&from, &to).map_err(TripError::Routing)?;
    debug!(
        "Route from {start} to {end}: {} points over {:.1} miles",
        route.coordinates().len(),
        route.total_distance_miles()
    );

    let stations = catalog.load_stations()?;
    let plan = plan_fuel_stops(&stations, &route, settings)?;
    info!(
        "Planned {} fuel stop(s) from {start} to {end}; estimated fuel cost ${:.2}",
        plan.fuel_stops.len(),
        plan.total_fuel_cost
    );
    Ok(plan)
}

fn resolve<G: Geocoder + ?Sized>(geocoder: &G, place: &str) -> Result<Coordinate, TripError> {
    geocoder.geocode(place).map_err(|err| match err {
        RouteProviderError::LocationNotFound { .. } => TripError::InvalidLocation {
            location: place.to_owned(),
        },
        other => TripError::Routing(other),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    use crate::Station;
    use crate::test_support::{
        FailingRouteProvider, FixedGeocoder, MemoryCatalog, StraightLineRouteProvider,
    };

    #[fixture]
    fn geocoder() -> FixedGeocoder {
        FixedGeocoder::default()
            .with_place("Austin", -97.74, 30.27)
            .with_place("Georgetown", -97.68, 30.63)
    }

    #[fixture]
    fn catalog() -> MemoryCatalog {
        MemoryCatalog::with_stations([
            Station::new("Round Rock", 30.51, -97.69, 3.10, "I-35 Exit 253"),
            Station::new("Houston", 29.76, -95.37, 2.50, "I-10"),
        ])
    }

    #[rstest]
    fn unknown_end_is_an_invalid_location(geocoder: FixedGeocoder, catalog: MemoryCatalog) {
        let err = plan_trip(
            &geocoder,
            &StraightLineRouteProvider::default(),
            &catalog,
            "Austin",
            "Atlantis",
            &PlannerSettings::default(),
        )
        .expect_err("unknown place");
        assert_eq!(
            err,
            TripError::InvalidLocation {
                location: "Atlantis".to_owned()
            }
        );
    }

    #[rstest]
    fn routing_failures_are_surfaced(geocoder: FixedGeocoder, catalog: MemoryCatalog) {
        let router = FailingRouteProvider::new(RouteProviderError::EmptyRoute);
        let err = plan_trip(
            &geocoder,
            &router,
            &catalog,
            "Austin",
            "Georgetown",
            &PlannerSettings::default(),
        )
        .expect_err("routing fails");
        assert_eq!(err, TripError::Routing(RouteProviderError::EmptyRoute));
    }

    #[rstest]
    fn corridor_station_is_planned(geocoder: FixedGeocoder, catalog: MemoryCatalog) {
        let plan = plan_trip(
            &geocoder,
            &StraightLineRouteProvider::default(),
            &catalog,
            "Austin",
            "Georgetown",
            &PlannerSettings::default(),
        )
        .expect("trip plans");
        let names: Vec<&str> = plan.fuel_stops.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Round Rock"]);
    }
}
