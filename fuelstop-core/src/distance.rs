//! Great-circle distance on a spherical Earth.
//!
//! Every distance in the engine is expressed in statute miles. The radius is
//! fixed so that results are reproducible across catalogs and routes.

/// Mean Earth radius used by [`haversine_miles`], in miles.
pub const EARTH_RADIUS_MILES: f64 = 3959.87433;

/// Approximate length of one degree of latitude, in miles.
///
/// Used to translate a radius in miles into a search window in degrees.
pub const MILES_PER_DEGREE: f64 = 69.0;

/// Great-circle distance in miles between two WGS84 positions.
///
/// Inputs are degrees and must be finite; this function neither clamps nor
/// rejects them. The result is never negative, is zero for identical points
/// and is symmetric under swapping the two positions.
///
/// # Examples
/// ```
/// use fuelstop_core::haversine_miles;
///
/// let d = haversine_miles(40.0, -100.0, 41.0, -100.0);
/// assert!((d - 69.1).abs() < 0.1);
/// assert_eq!(haversine_miles(40.0, -100.0, 40.0, -100.0), 0.0);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "the haversine formula is floating-point trigonometry"
)]
pub fn haversine_miles(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let delta_phi = (lat2 - lat1).to_radians();
    let delta_lambda = (lon2 - lon1).to_radians();

    let raw_h = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
    // Rounding can push `h` a hair past 1 for antipodal points.
    let h = raw_h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_MILES * c
}
