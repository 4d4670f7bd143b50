//! Fuel cost for a planned route.

use std::borrow::Borrow;

use crate::Station;
use crate::error::{PlanError, require_non_negative, require_positive};

/// Cost of fuelling the whole route at the average price of `stops`.
///
/// The gallons needed for `total_distance_miles` at `mpg` are priced at the
/// arithmetic mean of the stop prices. A plan without stops costs nothing.
///
/// # Errors
///
/// Returns [`PlanError::InvalidArgument`] when the distance is negative or
/// non-finite, or when `mpg` is not finite and positive.
///
/// # Examples
/// ```
/// use fuelstop_core::{Station, calculate_fuel_cost};
///
/// let stops = [
///     Station::new("A", 35.0, -100.0, 3.0, "Exit 1"),
///     Station::new("B", 35.0, -95.0, 5.0, "Exit 2"),
/// ];
/// // 1000 miles at 10 mpg is 100 gallons at an average of $4.
/// assert_eq!(calculate_fuel_cost(&stops, 1000.0, 10.0)?, 400.0);
/// assert_eq!(calculate_fuel_cost::<Station>(&[], 1000.0, 10.0)?, 0.0);
/// # Ok::<(), fuelstop_core::PlanError>(())
/// ```
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "gallon and average price arithmetic; stop counts are small"
)]
pub fn calculate_fuel_cost<S: Borrow<Station>>(
    stops: &[S],
    total_distance_miles: f64,
    mpg: f64,
) -> Result<f64, PlanError> {
    let distance = require_non_negative("total distance", total_distance_miles)?;
    let miles_per_gallon = require_positive("mpg", mpg)?;
    if stops.is_empty() {
        return Ok(0.0);
    }
    let price_sum: f64 = stops.iter().map(|stop| stop.borrow().price).sum();
    let average_price = price_sum / stops.len() as f64;
    Ok((distance / miles_per_gallon) * average_price)
}
