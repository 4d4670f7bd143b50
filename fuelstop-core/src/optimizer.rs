//! Greedy, range-constrained selection of fuel stops.
//!
//! Starting from the trip origin, each step looks at the candidates that come
//! after the previous stop, keeps those within the vehicle's range of the
//! previous stop, and picks the one with the lowest score
//! `price + (leg_miles / max_range) * 10`. Ties keep the earliest candidate.
//! The walk ends once the chosen legs add up to the route length, or early
//! when nothing further is reachable, in which case the partial plan is
//! returned as a normal outcome.

use std::borrow::Borrow;

use log::debug;

use crate::cost::calculate_fuel_cost;
use crate::error::{PlanError, require_non_negative, require_positive};
use crate::{Coordinate, Station};

/// Default maximum distance between stops, in miles.
pub const DEFAULT_MAX_RANGE_MILES: f64 = 500.0;

/// Default fuel economy, in miles per gallon.
pub const DEFAULT_MPG: f64 = 10.0;

/// Weight of the normalised leg length in [`score_candidate`].
const LEG_PENALTY_WEIGHT: f64 = 10.0;

/// Vehicle parameters for [`plan_stops`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptimizerSettings {
    /// Longest leg the vehicle can drive without refuelling, in miles.
    pub max_range_miles: f64,
    /// Fuel economy in miles per gallon, used for the plan's fuel cost.
    pub mpg: f64,
}

impl Default for OptimizerSettings {
    fn default() -> Self {
        Self {
            max_range_miles: DEFAULT_MAX_RANGE_MILES,
            mpg: DEFAULT_MPG,
        }
    }
}

impl OptimizerSettings {
    /// Check that both parameters are finite and positive.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::InvalidArgument`] naming the offending field.
    pub fn validate(&self) -> Result<(), PlanError> {
        require_positive("max range", self.max_range_miles)?;
        require_positive("mpg", self.mpg)?;
        Ok(())
    }
}

/// Ordered stops chosen for a route, with running totals.
#[derive(Debug, Clone, PartialEq)]
pub struct StopPlan {
    stops: Vec<Station>,
    candidate_positions: Vec<usize>,
    distance_covered_miles: f64,
    fuel_cost: f64,
    complete: bool,
}

impl StopPlan {
    /// Chosen stations in driving order.
    #[must_use]
    pub fn stops(&self) -> &[Station] {
        &self.stops
    }

    /// Positions of the chosen stations within the candidate slice.
    #[must_use]
    pub fn candidate_positions(&self) -> &[usize] {
        &self.candidate_positions
    }

    /// Sum of the chosen legs, in miles.
    #[must_use]
    pub const fn distance_covered_miles(&self) -> f64 {
        self.distance_covered_miles
    }

    /// Fuel cost for the whole route at the average price of the stops.
    #[must_use]
    pub const fn fuel_cost(&self) -> f64 {
        self.fuel_cost
    }

    /// Whether the legs cover the route. `false` means the walk stopped
    /// early because no further candidate was in range.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.complete
    }

    /// Whether no stop was chosen.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Consume the plan, returning the chosen stations.
    #[must_use]
    pub fn into_stops(self) -> Vec<Station> {
        self.stops
    }
}

/// Score of a reachable candidate; lower is better.
///
/// # Examples
/// ```
/// use fuelstop_core::score_candidate;
///
/// // A 250 mile leg with a 500 mile range adds 5 to the price.
/// assert_eq!(score_candidate(3.0, 250.0, 500.0), 8.0);
/// ```
#[must_use]
#[expect(clippy::float_arithmetic, reason = "weighted price/distance blend")]
pub fn score_candidate(price: f64, leg_miles: f64, max_range_miles: f64) -> f64 {
    price + (leg_miles / max_range_miles) * LEG_PENALTY_WEIGHT
}

/// Mutable walk state, initialised before the first step.
#[derive(Debug, Clone, Copy)]
struct OptimizerState {
    distance_covered: f64,
    current_range: f64,
    /// Candidate position of the previous stop; `None` while still at the
    /// origin.
    last_stop: Option<usize>,
    position: Coordinate,
}

#[derive(Debug, Clone, Copy)]
struct Choice {
    candidate: usize,
    coordinate: Coordinate,
    leg_miles: f64,
    score: f64,
}

/// Choose fuel stops along a route.
///
/// `candidates` should be roughly ordered along the route, as returned by
/// [`crate::ProximityIndex::query_route`]. Candidates with unusable
/// positions are never chosen. Every other candidate is eligible, the first
/// one included, since `origin` is a position rather than a station.
///
/// # Errors
///
/// Returns [`PlanError::InvalidArgument`] when `total_distance_miles` is
/// negative or non-finite, or when the settings fail
/// [`OptimizerSettings::validate`].
///
/// # Examples
/// ```
/// use fuelstop_core::{Coordinate, OptimizerSettings, Station, plan_stops};
///
/// let origin = Coordinate::new(-100.0, 35.0)?;
/// let candidates = vec![
///     Station::new("Pricey", 35.0, -99.0, 4.50, "Exit 10"),
///     Station::new("Cheap", 35.0, -98.9, 3.10, "Exit 11"),
/// ];
/// let plan = plan_stops(&origin, &candidates, 60.0, &OptimizerSettings::default())?;
///
/// assert_eq!(plan.stops()[0].name, "Cheap");
/// assert!(plan.is_complete());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn plan_stops<S: Borrow<Station>>(
    origin: &Coordinate,
    candidates: &[S],
    total_distance_miles: f64,
    settings: &OptimizerSettings,
) -> Result<StopPlan, PlanError> {
    let total_distance = require_non_negative("total distance", total_distance_miles)?;
    settings.validate()?;
    let max_range = settings.max_range_miles;

    let mut state = OptimizerState {
        distance_covered: 0.0,
        current_range: max_range,
        last_stop: None,
        position: *origin,
    };
    let mut stops = Vec::new();
    let mut candidate_positions = Vec::new();

    while state.distance_covered < total_distance {
        let scan_from = state.last_stop.map_or(0, |index| index.saturating_add(1));
        let Some(choice) = best_reachable(candidates, scan_from, &state, max_range) else {
            debug!(
                "No candidate within {:.1} miles after {} stop(s); ending plan early",
                state.current_range,
                stops.len()
            );
            break;
        };
        let Some(chosen) = candidates.get(choice.candidate) else {
            break;
        };
        let station: &Station = chosen.borrow();
        debug!(
            "Stop {}: {} at ${:.3} after a {:.1} mile leg (score {:.3})",
            stops.len().saturating_add(1),
            station.name,
            station.price,
            choice.leg_miles,
            choice.score
        );
        stops.push(station.clone());
        candidate_positions.push(choice.candidate);
        state = advance(state, &choice, max_range);
    }

    let fuel_cost = calculate_fuel_cost(&stops, total_distance, settings.mpg)?;
    Ok(StopPlan {
        complete: state.distance_covered >= total_distance,
        stops,
        candidate_positions,
        distance_covered_miles: state.distance_covered,
        fuel_cost,
    })
}

#[expect(clippy::float_arithmetic, reason = "accumulating leg distances")]
fn advance(state: OptimizerState, choice: &Choice, max_range: f64) -> OptimizerState {
    OptimizerState {
        distance_covered: state.distance_covered + choice.leg_miles,
        current_range: max_range,
        last_stop: Some(choice.candidate),
        position: choice.coordinate,
    }
}

fn best_reachable<S: Borrow<Station>>(
    candidates: &[S],
    scan_from: usize,
    state: &OptimizerState,
    max_range: f64,
) -> Option<Choice> {
    let mut best: Option<Choice> = None;
    for (candidate, entry) in candidates.iter().enumerate().skip(scan_from) {
        let station: &Station = entry.borrow();
        let Ok(coordinate) = station.coordinate() else {
            continue;
        };
        let leg_miles = state.position.distance_miles(&coordinate);
        if leg_miles > state.current_range {
            continue;
        }
        let score = score_candidate(station.price, leg_miles, max_range);
        // Strict comparison keeps the first of equally scored candidates.
        if best.is_none_or(|current| score < current.score) {
            best = Some(Choice {
                candidate,
                coordinate,
                leg_miles,
                score,
            });
        }
    }
    best
}
