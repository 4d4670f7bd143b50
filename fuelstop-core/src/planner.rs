//! One-call planning: index the catalog, query the route, pick stops, price
//! the trip.

use geo::Coord;
use log::debug;

use crate::error::{PlanError, require_non_negative};
use crate::optimizer::{DEFAULT_MAX_RANGE_MILES, DEFAULT_MPG, OptimizerSettings, plan_stops};
use crate::{ProximityIndex, Route, Station, Warning};

/// Default corridor half-width around the route, in miles.
pub const DEFAULT_DEVIATION_RADIUS_MILES: f64 = 5.0;

/// Parameters for [`plan_fuel_stops`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannerSettings {
    /// Stations further than this from every route point are ignored.
    pub deviation_radius_miles: f64,
    /// Vehicle range and fuel economy.
    pub optimizer: OptimizerSettings,
    /// Query the route in chunks of this many points instead of one pass.
    pub batch_size: Option<usize>,
}

impl Default for PlannerSettings {
    fn default() -> Self {
        Self {
            deviation_radius_miles: DEFAULT_DEVIATION_RADIUS_MILES,
            optimizer: OptimizerSettings {
                max_range_miles: DEFAULT_MAX_RANGE_MILES,
                mpg: DEFAULT_MPG,
            },
            batch_size: None,
        }
    }
}

/// The outcome of planning a route.
#[derive(Debug, Clone, PartialEq)]
pub struct FuelPlan {
    /// Route points exactly as supplied by the route provider.
    pub coordinates: Vec<Coord<f64>>,
    /// Route length in miles.
    pub total_distance_miles: f64,
    /// Fuel cost for the route at the average price of the chosen stops.
    pub total_fuel_cost: f64,
    /// Chosen stops in driving order.
    pub fuel_stops: Vec<Station>,
    /// Number of stations found within the deviation radius.
    pub candidate_count: usize,
    /// Whether the chosen legs cover the whole route.
    pub complete: bool,
    /// Stations and route points skipped along the way.
    pub warnings: Vec<Warning>,
}

/// Plan fuel stops for `route` from `stations`.
///
/// A route without any usable point yields an empty plan: nothing can be
/// searched and the trip has no start.
///
/// # Errors
///
/// Returns [`PlanError`] when the radius, range, mpg or batch size is
/// unusable, or when the route's total distance is negative or non-finite.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use fuelstop_core::{PlannerSettings, Route, Station, plan_fuel_stops};
///
/// let stations = vec![
///     Station::new("Amarillo", 35.19, -101.83, 3.05, "I-40 Exit 71"),
///     Station::new("Groom", 35.20, -101.10, 3.40, "I-40 Exit 113"),
/// ];
/// let route = Route::new(
///     vec![Coord { x: -101.84, y: 35.19 }, Coord { x: -101.10, y: 35.21 }],
///     40.0,
/// );
///
/// let plan = plan_fuel_stops(&stations, &route, &PlannerSettings::default())?;
/// assert_eq!(plan.candidate_count, 2);
/// assert!(plan.complete);
/// # Ok::<(), fuelstop_core::PlanError>(())
/// ```
pub fn plan_fuel_stops(
    stations: &[Station],
    route: &Route,
    settings: &PlannerSettings,
) -> Result<FuelPlan, PlanError> {
    let total_distance = require_non_negative("total distance", route.total_distance_miles())?;
    settings.optimizer.validate()?;

    let index = ProximityIndex::build(stations, settings.deviation_radius_miles)?;
    let matches = match settings.batch_size {
        Some(batch_size) => index.query_route_batched(route.coordinates(), batch_size)?,
        None => index.query_route(route.coordinates()),
    };

    let mut warnings = index.warnings().to_vec();
    warnings.extend_from_slice(matches.warnings());
    let candidates = matches.stations();

    let Some(origin) = route.start() else {
        debug!("Route has no usable point; returning an empty plan");
        return Ok(FuelPlan {
            coordinates: route.coordinates().to_vec(),
            total_distance_miles: total_distance,
            total_fuel_cost: 0.0,
            fuel_stops: Vec::new(),
            candidate_count: candidates.len(),
            complete: total_distance <= 0.0,
            warnings,
        });
    };

    let plan = plan_stops(&origin, &candidates, total_distance, &settings.optimizer)?;
    debug!(
        "Planned {} stop(s) from {} candidate(s) over {total_distance:.1} miles",
        plan.stops().len(),
        candidates.len()
    );
    Ok(FuelPlan {
        coordinates: route.coordinates().to_vec(),
        total_distance_miles: total_distance,
        total_fuel_cost: plan.fuel_cost(),
        complete: plan.is_complete(),
        fuel_stops: plan.into_stops(),
        candidate_count: candidates.len(),
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn stations() -> Vec<Station> {
        vec![
            Station::new("Amarillo", 35.19, -101.83, 3.05, "I-40 Exit 71"),
            Station::new("Groom", 35.20, -101.10, 3.40, "I-40 Exit 113"),
            Station::new("Dallas", 32.78, -96.80, 2.80, "I-30"),
            Station::new("Broken", f64::NAN, -101.5, 1.00, "Nowhere"),
        ]
    }

    fn route(distance: f64) -> Route {
        Route::new(
            vec![
                Coord { x: -101.84, y: 35.19 },
                Coord { x: f64::NAN, y: 35.2 },
                Coord { x: -101.10, y: 35.21 },
            ],
            distance,
        )
    }

    #[rstest]
    fn plan_collects_warnings_from_index_and_query(stations: Vec<Station>) {
        let plan = plan_fuel_stops(&stations, &route(40.0), &PlannerSettings::default())
            .expect("valid settings");
        assert_eq!(plan.candidate_count, 2);
        assert_eq!(plan.warnings.len(), 2);
        assert!(plan.fuel_stops.iter().all(|stop| stop.name != "Dallas"));
        assert_eq!(plan.coordinates.len(), 3);
    }

    #[rstest]
    fn zero_length_route_costs_nothing(stations: Vec<Station>) {
        let plan = plan_fuel_stops(&stations, &route(0.0), &PlannerSettings::default())
            .expect("valid settings");
        assert!(plan.fuel_stops.is_empty());
        assert_eq!(plan.total_fuel_cost, 0.0);
        assert!(plan.complete);
    }

    #[rstest]
    fn batching_does_not_change_the_plan(stations: Vec<Station>) {
        let single = plan_fuel_stops(&stations, &route(40.0), &PlannerSettings::default())
            .expect("valid settings");
        let batched_settings = PlannerSettings {
            batch_size: Some(1),
            ..PlannerSettings::default()
        };
        let batched =
            plan_fuel_stops(&stations, &route(40.0), &batched_settings).expect("valid settings");
        // NaN route points and warning payloads never compare equal.
        assert_eq!(single.fuel_stops, batched.fuel_stops);
        assert_eq!(single.total_fuel_cost, batched.total_fuel_cost);
        assert_eq!(single.warnings.len(), batched.warnings.len());
    }

    #[rstest]
    fn route_without_usable_points_yields_empty_plan(stations: Vec<Station>) {
        let route = Route::new(vec![Coord { x: f64::NAN, y: 0.0 }], 100.0);
        let plan =
            plan_fuel_stops(&stations, &route, &PlannerSettings::default()).expect("valid settings");
        assert!(plan.fuel_stops.is_empty());
        assert!(!plan.complete);
    }

    #[rstest]
    fn negative_route_distance_is_rejected(stations: Vec<Station>) {
        let result = plan_fuel_stops(&stations, &route(-5.0), &PlannerSettings::default());
        assert!(matches!(result, Err(PlanError::InvalidArgument { .. })));
    }

    #[rstest]
    fn zero_batch_size_is_rejected(stations: Vec<Station>) {
        let settings = PlannerSettings {
            batch_size: Some(0),
            ..PlannerSettings::default()
        };
        assert_eq!(
            plan_fuel_stops(&stations, &route(40.0), &settings),
            Err(PlanError::ZeroBatchSize)
        );
    }
}
